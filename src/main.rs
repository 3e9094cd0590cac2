use clap::{Args, Parser, Subcommand};
use raffle_fixtures::config::{FailurePolicy, Settings};
use raffle_fixtures::driver;
use raffle_fixtures::error::Result;
use raffle_fixtures::names::NameTables;
use raffle_fixtures::{logging, report, verify};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "raffle-fixtures", about = "Generate sample CSV files for testing the raffle spinner", version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,

    /// Generate flags, also accepted without the `generate` subcommand
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Write the raffle-*.csv fixture set (the default)
    Generate(GenerateArgs),
    /// Check fixture files for ticket gaps, width mismatches and unknown names
    Verify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Directory the CSV files are written to
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Seed for reproducible names; random when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Stop at the first batch that fails instead of continuing
    #[arg(long = "fail-fast", conflicts_with = "parallel")]
    fail_fast: bool,

    /// Generate batches concurrently
    #[arg(short = 'p', long = "parallel")]
    parallel: bool,

    /// Also write a JSON summary of the run to this file
    #[arg(long = "report")]
    report: Option<PathBuf>,
}

impl GenerateArgs {
    fn into_settings(self) -> Settings {
        Settings {
            out_dir: self.out_dir,
            seed: self.seed,
            policy: if self.fail_fast { FailurePolicy::FailFast } else { FailurePolicy::Continue },
            parallel: self.parallel,
            report: self.report,
            ..Settings::default()
        }
    }
}

fn generate(args: GenerateArgs) -> Result<bool> {
    let settings = args.into_settings();
    let summary = driver::run(&settings, &NameTables::builtin())?;

    if let Some(path) = &settings.report {
        report::write_report(path, &summary)?;
    }

    if summary.all_written() {
        println!("\nAll sample CSV files generated successfully!");
        println!("Files are located in: {}", summary.out_dir.display());
    } else {
        eprintln!(
            "\n{} of {} files generated, {} failed",
            summary.written(),
            summary.outcomes.len(),
            summary.failed()
        );
    }
    Ok(summary.all_written())
}

fn verify_files(files: &[PathBuf]) -> Result<bool> {
    let tables = NameTables::builtin();
    let mut clean = true;
    for path in files {
        match verify::verify(path, &tables) {
            Ok(report) if report.is_clean() => {
                println!("{}: ok ({} rows)", path.display(), driver::thousands(report.rows as u64));
            }
            Ok(report) => {
                clean = false;
                println!("{}: {} problem(s)", path.display(), report.findings.len() + report.suppressed);
                for finding in &report.findings {
                    println!("  {}", finding);
                }
                if report.suppressed > 0 {
                    println!("  ... and {} more", report.suppressed);
                }
            }
            Err(e) => {
                clean = false;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }
    Ok(clean)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome = match cli.command {
        None => generate(cli.generate),
        Some(Command::Generate(args)) => generate(args),
        Some(Command::Verify { files }) => verify_files(&files),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
