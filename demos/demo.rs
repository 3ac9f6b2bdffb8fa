// demos/demo.rs
use fast_chf::analytics::cumulants::{numerical_cumulants, DEFAULT_STEP};
use fast_chf::math_utils::Timer;
use fast_chf::models::model::CharacteristicFunction;
use fast_chf::{
    BatesCf, BlackScholesCf, ChfResult, CorrelationParams, ExtendedBatesCf, ExtendedBatesParams,
    HestonCf, HestonParams, JumpParams, QuadratureConfig, RateParams, VarianceParams,
};
use ndarray::Array1;
use num_complex::Complex64;
use tracing_subscriber::EnvFilter;

fn main() -> ChfResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("Running fast-chf Characteristic Function Demo\n");

    let heston_params = HestonParams {
        r: 0.02,
        tau: 1.0,
        kappa: 1.5,
        gamma: 0.3,
        vbar: 0.04,
        v0: 0.04,
        rho: -0.7,
    };
    let jumps = JumpParams {
        intensity: 0.5,
        mu_j: -0.1,
        sigma_j: 0.15,
    };

    let bs = BlackScholesCf::new(heston_params.r, heston_params.v0.sqrt(), heston_params.tau);
    let heston = HestonCf::new(heston_params);
    let bates = BatesCf::new(heston_params, jumps);
    let extended = ExtendedBatesCf::new(
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
            jumps: JumpParams {
                intensity: 0.3,
                mu_j: -0.05,
                sigma_j: 0.1,
            },
        },
        QuadratureConfig::default(),
    )?;

    let models: [&dyn CharacteristicFunction; 4] = [&bs, &heston, &bates, &extended];
    let u = Array1::from(vec![0.0, 0.5, 1.0, 2.0, 5.0, 10.0]);

    println!("{:<16} {:>6} {:>24} {:>12}", "Model", "u", "φ(u)", "|φ(u)|");
    println!("{}", "-".repeat(62));
    for model in &models {
        let values = model.evaluate_grid(&u)?;
        for (ui, phi) in u.iter().zip(values.iter()) {
            println!(
                "{:<16} {:>6.1} {:>11.6} {:>+11.6}i {:>12.6}",
                model.name(),
                ui,
                phi.re,
                phi.im,
                phi.norm()
            );
        }
    }

    println!("\nLog-return cumulants (finite differences of ln φ):");
    for model in &models {
        let cumulants = numerical_cumulants(*model, DEFAULT_STEP)?;
        println!(
            "  {:<16} mean = {:>10.6}, variance = {:>10.6}",
            model.name(),
            cumulants.mean,
            cumulants.variance
        );
    }

    println!("\nBatch evaluation over 100,000 frequencies:");
    let grid = Array1::linspace(-200.0, 200.0, 100_000).mapv(|x| Complex64::new(x, 0.0));
    let mut timer = Timer::new();

    timer.start();
    let sequential = bates.evaluate_many(&grid)?;
    let sequential_ms = timer.elapsed_ms();

    timer.start();
    let parallel = bates.par_evaluate_many(&grid)?;
    let parallel_ms = timer.elapsed_ms();

    println!("  Bates sequential: {:.2} ms", sequential_ms);
    println!(
        "  Bates parallel:   {:.2} ms on {} threads (identical: {})",
        parallel_ms,
        rayon::current_num_threads(),
        sequential == parallel
    );

    let sweep: Vec<f64> = (0..=400).map(|k| k as f64 * 0.5).collect();
    let tracked = heston.evaluate_sweep(&sweep)?;
    println!(
        "\nHeston tracked sweep over [0, 200]: φ(200) = {:.3e}",
        tracked[tracked.len() - 1]
    );

    Ok(())
}
