use std::{io, path::PathBuf, process};

use clap::{Parser, Subcommand};
use retrace_bench::{
    AnalyzerConfig, BenchError, RunConfig, Suite,
    logging::init_logging,
    render_report,
    report::write_report,
    summary::{Analyzer, guidance},
    workloads::run_suite,
};

#[derive(Parser)]
#[command(
    name = "retrace_bench",
    about = "Run Retrace overhead benchmarks and compare their reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare baseline and Retrace reports and print the overhead summary
    Analyze {
        /// Directory holding the four report files (default: results)
        #[arg(long)]
        results: Option<PathBuf>,

        /// JSON file overriding report file names
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run one trial suite and print or save its report
    Run {
        /// internal, external or synthetic
        suite: Suite,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Multiplier for every test's iteration count
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Analyze { results, config } => analyze(results, config),
        Commands::Run { suite, out, scale } => run(suite, out, scale),
    };
    if let Err(err) = outcome {
        match err {
            BenchError::InvalidInput(_) => {
                eprintln!("error: {err}");
                process::exit(2);
            }
            _ => {
                eprintln!("{}", guidance(&err));
                process::exit(1);
            }
        }
    }
}

fn analyze(results: Option<PathBuf>, config: Option<PathBuf>) -> Result<(), BenchError> {
    let base = match config {
        Some(path) => AnalyzerConfig::load(&path)?,
        None => AnalyzerConfig::default(),
    };
    let config = base.apply_env().override_root(results);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    Analyzer::new(config).run(&mut out)
}

fn run(suite: Suite, out: Option<PathBuf>, scale: f64) -> Result<(), BenchError> {
    let config = RunConfig::with_scale(scale)?;
    let report = run_suite(suite, &config)?;
    match out {
        Some(path) => write_report(&path, &report),
        None => {
            print!("{}", render_report(&report)?);
            Ok(())
        }
    }
}
