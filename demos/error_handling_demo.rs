// demos/error_handling_demo.rs
use fast_chf::models::model::CharacteristicFunction;
use fast_chf::{
    ChfError, CorrelationParams, ExtendedBatesCf, ExtendedBatesParams, HestonCf, HestonParams,
    JumpParams, QuadratureConfig, RateParams, VarianceParams,
};
use num_complex::Complex64;

fn base_params() -> ExtendedBatesParams {
    ExtendedBatesParams {
        tau: 1.0,
        horizon: 1.0,
        variance: VarianceParams {
            kappa: 1.2,
            gamma: 0.4,
            vbar: 0.05,
            v0: 0.06,
        },
        rate: RateParams {
            kappa_r: 0.8,
            gamma_r: 0.05,
            mu_r: 0.03,
            r0: 0.02,
        },
        correlation: CorrelationParams {
            kappa_rho: 2.0,
            mu_rho: -0.5,
            sigma_rho: 0.2,
            rho0: -0.6,
            rho4: 0.3,
            rho5: 0.2,
        },
        jumps: JumpParams::none(),
    }
}

fn report(result: Result<ExtendedBatesCf, ChfError>) {
    match result {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
}

fn main() {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    println!("Error Handling Demo for fast-chf");
    println!("================================\n");

    // Test 1: Long-run variance below the convexity bound
    println!("1. Testing v̄ < γ²/(8κ)...");
    let mut params = base_params();
    params.variance.vbar = 0.01;
    report(ExtendedBatesCf::new(params, QuadratureConfig::default()));

    // Test 2: Long-run rate below the convexity bound
    println!("\n2. Testing μr < γr²/(8κr)...");
    let mut params = base_params();
    params.rate.gamma_r = 0.5;
    report(ExtendedBatesCf::new(params, QuadratureConfig::default()));

    // Test 3: Singular correlation dynamics
    println!("\n3. Testing κρ = 0...");
    let mut params = base_params();
    params.correlation.kappa_rho = 0.0;
    report(ExtendedBatesCf::new(params, QuadratureConfig::default()));

    // Test 4: Degenerate quadrature grid
    println!("\n4. Testing a one-point quadrature grid...");
    report(ExtendedBatesCf::new(base_params(), QuadratureConfig::new(1)));

    // Test 5: Feller violation warns but evaluates
    println!("\n5. Testing a Heston model violating the Feller condition...");
    let extreme = HestonCf::new(HestonParams {
        r: 0.05,
        tau: 1.0,
        kappa: 1.0,
        gamma: 0.8,
        vbar: 0.04,
        v0: 0.04,
        rho: -0.5,
    });
    match extreme.evaluate_real(1.0) {
        Ok(phi) => println!("   ✓ Evaluated with warning: φ(1) = {:.6}", phi),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 6: Non-finite value far into the complex plane
    println!("\n6. Testing a frequency with an overflowing value...");
    match extreme.evaluate(Complex64::new(0.0, -400.0)) {
        Ok(phi) => println!("   Value: {}", phi),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Zero maturity short-circuits
    println!("\n7. Testing zero maturity...");
    let params = ExtendedBatesParams {
        tau: 0.0,
        ..base_params()
    };
    let zero_maturity = ExtendedBatesCf::new(params, QuadratureConfig::default());
    match zero_maturity.and_then(|cf| cf.evaluate_real(3.0)) {
        Ok(phi) => println!("   ✓ φ(3) = {}", phi),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 8: Error type matching
    println!("\n8. Testing error type matching...");
    let mut params = base_params();
    params.variance.kappa = -1.0;
    match ExtendedBatesCf::new(params, QuadratureConfig::default()) {
        Err(ChfError::InvalidParameterDomain {
            parameter,
            value,
            constraint,
        }) => println!(
            "   ✓ Correctly identified: {} = {} ({})",
            parameter, value, constraint
        ),
        Err(e) => println!("   Different error type: {}", e),
        Ok(_) => println!("   Unexpected: Should have failed!"),
    }

    println!("\nError handling demo completed!");
}
