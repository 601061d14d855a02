use std::path::{Path, PathBuf};

use clap::Parser;
use retrace_bench::{
    BenchError, RunConfig, Suite, config::DEFAULT_RESULTS_DIR, logging::init_logging,
    report::write_report, workloads::run_suite,
};
use tracing::error;

#[derive(Parser)]
#[command(
    name = "bench_driver",
    about = "Run every trial suite and write one report per suite"
)]
struct Cli {
    /// Run label used in report file names, e.g. baseline or retrace
    #[arg(long)]
    label: String,

    /// Output directory for the reports
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    out: PathBuf,

    /// Multiplier for every test's iteration count
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = match RunConfig::with_scale(cli.scale) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    if cli.label.trim().is_empty() || cli.label.contains(['/', '\\']) {
        eprintln!("error: label must be a plain file name fragment");
        std::process::exit(2);
    }

    println!("retrace bench driver\n====================");
    let suites = Suite::all();
    let results = collect_results(&suites, |suite| {
        match run_and_write(suite, &cli.label, &cli.out, &config) {
            Ok(path) => {
                println!("wrote {}", path.display());
                true
            }
            Err(err) => {
                error!(%suite, %err, "suite failed");
                false
            }
        }
    });
    println!("\nSummary\n=======");
    let mut all_ok = true;
    for (suite, ok) in &results {
        println!("{:<20}{}", suite.as_str(), if *ok { "OK" } else { "FAIL" });
        all_ok &= *ok;
    }
    if !all_ok {
        std::process::exit(1);
    }
}

fn run_and_write(
    suite: Suite,
    label: &str,
    dir: &Path,
    config: &RunConfig,
) -> Result<PathBuf, BenchError> {
    let report = run_suite(suite, config)?;
    let path = dir.join(suite.report_file_name(label));
    write_report(&path, &report)?;
    Ok(path)
}

fn collect_results<F>(suites: &[Suite], mut runner: F) -> Vec<(Suite, bool)>
where
    F: FnMut(Suite) -> bool,
{
    suites.iter().map(|&suite| (suite, runner(suite))).collect()
}
