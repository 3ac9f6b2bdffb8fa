// scripts/benchmark.rs
use fast_chf::math_utils::Timer;
use fast_chf::models::model::CharacteristicFunction;
use fast_chf::{
    BatesCf, CorrelationParams, ExtendedBatesCf, ExtendedBatesParams, HestonCf, HestonParams,
    JumpParams, QuadratureConfig, RateParams, VarianceParams,
};
use ndarray::Array1;
use num_complex::Complex64;
use std::env;
use std::fs::File;
use std::io::{self, Write};

/// Host details recorded in the CSV header.
#[derive(Debug)]
struct SystemInfo {
    os: &'static str,
    cpu_cores: usize,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS,
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    points: usize,
    time_ms: f64,
    throughput_points_per_sec: f64,
    checksum: Complex64,
}

fn heston_params() -> HestonParams {
    HestonParams {
        r: 0.02,
        tau: 1.0,
        kappa: 1.5,
        gamma: 0.3,
        vbar: 0.04,
        v0: 0.04,
        rho: -0.7,
    }
}

fn extended_params() -> ExtendedBatesParams {
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
    }
}

fn time_batch<M, F>(name: &str, model: &M, u: &Array1<Complex64>, batch: F) -> BenchmarkResult
where
    M: CharacteristicFunction,
    F: Fn(&M, &Array1<Complex64>) -> Array1<Complex64>,
{
    let mut timer = Timer::new();
    timer.start();
    let values = batch(model, u);
    let time_ms = timer.elapsed_ms();

    BenchmarkResult {
        name: name.to_string(),
        points: u.len(),
        time_ms,
        throughput_points_per_sec: u.len() as f64 / (time_ms / 1000.0),
        checksum: values.sum(),
    }
}

fn sequential<M: CharacteristicFunction>(model: &M, u: &Array1<Complex64>) -> Array1<Complex64> {
    model.evaluate_many(u).expect("finite values")
}

fn parallel<M: CharacteristicFunction>(model: &M, u: &Array1<Complex64>) -> Array1<Complex64> {
    model.par_evaluate_many(u).expect("finite values")
}

fn run_closed_form_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let heston = HestonCf::new(heston_params());
    let bates = BatesCf::new(
        heston_params(),
        JumpParams {
            intensity: 0.5,
            mu_j: -0.1,
            sigma_j: 0.15,
        },
    );

    for &points in &[10_000, 100_000, 1_000_000] {
        println!("Running closed-form benchmarks with {} points...", points);
        let u = Array1::linspace(-200.0, 200.0, points).mapv(|x| Complex64::new(x, 0.0));

        let label = |model: &str, mode: &str| format!("{} {} ({}k)", model, mode, points / 1000);

        results.push(time_batch(&label("Heston", "sequential"), &heston, &u, sequential));
        results.push(time_batch(&label("Heston", "parallel"), &heston, &u, parallel));
        results.push(time_batch(&label("Bates", "sequential"), &bates, &u, sequential));
        results.push(time_batch(&label("Bates", "parallel"), &bates, &u, parallel));
    }

    results
}

fn run_extended_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let u = Array1::linspace(-100.0, 100.0, 10_000).mapv(|x| Complex64::new(x, 0.0));

    for &grid_size in &[50, 100, 400] {
        println!("Benchmarking extended Bates with {} grid points...", grid_size);
        let model = ExtendedBatesCf::new(extended_params(), QuadratureConfig::new(grid_size))
            .expect("valid parameters");

        results.push(time_batch(
            &format!("Extended Bates sequential (grid {})", grid_size),
            &model,
            &u,
            sequential,
        ));
        results.push(time_batch(
            &format!("Extended Bates parallel (grid {})", grid_size),
            &model,
            &u,
            parallel,
        ));
    }

    results
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(
        file,
        "# os={} cpu_cores={} rayon_threads={}",
        system_info.os, system_info.cpu_cores, system_info.rayon_threads
    )?;

    writeln!(file, "Benchmark,Points,Time_ms,Throughput_points_per_sec,Checksum_re,Checksum_im")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6},{:.6}",
            result.name,
            result.points,
            result.time_ms,
            result.throughput_points_per_sec,
            result.checksum.re,
            result.checksum.im
        )?;
    }

    println!("Results written to {}", filename);
    Ok(())
}

fn main() -> io::Result<()> {
    println!("fast-chf Benchmark Suite");
    println!("========================\n");

    let system_info = SystemInfo::gather();
    println!(
        "{} with {} cores, {} rayon threads",
        system_info.os, system_info.cpu_cores, system_info.rayon_threads
    );
    println!();

    let mut results = run_closed_form_benchmarks();
    results.extend(run_extended_benchmarks());

    println!("\n{:<40} {:>10} {:>12} {:>16}", "Benchmark", "Points", "Time (ms)", "Points/sec");
    for result in &results {
        println!(
            "{:<40} {:>10} {:>12.2} {:>16.0}",
            result.name, result.points, result.time_ms, result.throughput_points_per_sec
        );
    }

    let filename = env::args().nth(1).unwrap_or_else(|| "benchmark_results.csv".to_string());
    write_results_to_csv(&results, &system_info, &filename)
}
