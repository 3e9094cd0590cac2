use crate::config::{validate_batches, BatchSpec, FailurePolicy, Settings};
use crate::error::{Error, Result};
use crate::names::NameTables;
use crate::participant::generate;
use crate::rng::batch_rng;
use crate::write::write;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum BatchStatus {
    Written { rows: u64 },
    Failed { reason: String },
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub file_name: String,
    pub path: PathBuf,
    pub count: i64,
    pub first_ticket: u64,
    pub last_ticket: Option<u64>,
    #[serde(flatten)]
    pub status: BatchStatus,
    pub elapsed_ms: u64,
}

impl BatchOutcome {
    fn new(spec: &BatchSpec, out_dir: &Path, status: BatchStatus, elapsed_ms: u64) -> Self {
        BatchOutcome {
            file_name: spec.file_name.to_string(),
            path: out_dir.join(spec.file_name),
            count: spec.count,
            first_ticket: spec.start_ticket,
            last_ticket: spec.last_ticket(),
            status,
            elapsed_ms,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self.status, BatchStatus::Written { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, BatchStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub out_dir: PathBuf,
    pub seed: Option<u64>,
    pub policy: FailurePolicy,
    pub parallel: bool,
    pub outcomes: Vec<BatchOutcome>,
}

impl RunSummary {
    pub fn all_written(&self) -> bool {
        self.outcomes.iter().all(BatchOutcome::is_written)
    }

    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

/// Formats `n` with comma thousands separators, e.g. `100,000`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Generates and writes one batch, returning the number of rows written.
pub fn run_batch(
    out_dir: &Path,
    spec: &BatchSpec,
    index: usize,
    seed: Option<u64>,
    tables: &NameTables,
) -> Result<u64> {
    let mut rng = batch_rng(seed, index);
    let participants = generate(spec.count, spec.start_ticket, tables, &mut rng)?;
    write(&out_dir.join(spec.file_name), &participants)?;
    Ok(participants.len() as u64)
}

fn timed_batch(
    out_dir: &Path,
    spec: &BatchSpec,
    index: usize,
    seed: Option<u64>,
    tables: &NameTables,
) -> BatchOutcome {
    let _span = tracing::info_span!("batch", file = spec.file_name).entered();
    tracing::debug!(count = spec.count, start_ticket = spec.start_ticket, "generating");
    let start_time = Instant::now();
    let status = match run_batch(out_dir, spec, index, seed, tables) {
        Ok(rows) => {
            tracing::info!(rows, "written");
            BatchStatus::Written { rows }
        }
        Err(e) => {
            tracing::error!(error = %e, "batch failed");
            BatchStatus::Failed { reason: e.to_string() }
        }
    };
    BatchOutcome::new(spec, out_dir, status, start_time.elapsed().as_millis() as u64)
}

/// Operator-facing line for one finished batch.
pub fn announce(outcome: &BatchOutcome) {
    match &outcome.status {
        BatchStatus::Written { rows } => {
            println!("Generated {}: {} entries", outcome.file_name, thousands(*rows))
        }
        BatchStatus::Failed { reason } => {
            eprintln!("Failed to generate {}: {}", outcome.file_name, reason)
        }
        BatchStatus::Skipped => println!("Skipped {}", outcome.file_name),
    }
}

/// Runs every configured batch.
///
/// The batch table and name tables are validated first; a configuration
/// error is returned before any file is opened. After that, per-batch
/// failures are recorded in the summary instead of being returned. Under
/// `FailFast` the batches after the first failure are marked skipped.
/// Parallel runs always continue, so `parallel` with `FailFast` is rejected.
pub fn run(settings: &Settings, tables: &NameTables) -> Result<RunSummary> {
    if settings.parallel && settings.policy == FailurePolicy::FailFast {
        return Err(Error::invalid("parallel runs cannot stop at the first failure"));
    }
    validate_batches(&settings.batches)?;

    if let Err(e) = fs::create_dir_all(&settings.out_dir) {
        tracing::warn!(dir = %settings.out_dir.display(), error = %e, "could not create output directory");
    }

    let out_dir = settings.out_dir.as_path();
    let outcomes = if settings.parallel {
        let outcomes: Vec<BatchOutcome> = settings
            .batches
            .par_iter()
            .enumerate()
            .map(|(index, spec)| timed_batch(out_dir, spec, index, settings.seed, tables))
            .collect();
        outcomes.iter().for_each(announce);
        outcomes
    } else {
        let mut outcomes = Vec::with_capacity(settings.batches.len());
        let mut halted = false;
        for (index, spec) in settings.batches.iter().enumerate() {
            let outcome = if halted {
                BatchOutcome::new(spec, out_dir, BatchStatus::Skipped, 0)
            } else {
                timed_batch(out_dir, spec, index, settings.seed, tables)
            };
            announce(&outcome);
            if outcome.is_failed() && settings.policy == FailurePolicy::FailFast {
                halted = true;
            }
            outcomes.push(outcome);
        }
        outcomes
    };

    Ok(RunSummary {
        out_dir: settings.out_dir.clone(),
        seed: settings.seed,
        policy: settings.policy,
        parallel: settings.parallel,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::read;
    use tempfile::tempdir;

    fn small_batches() -> Vec<BatchSpec> {
        vec![
            BatchSpec::new("a.csv", 20, 10_001),
            BatchSpec::new("b.csv", 0, 20_001),
            BatchSpec::new("c.csv", 150, 95),
        ]
    }

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            out_dir: dir.to_path_buf(),
            batches: small_batches(),
            seed: Some(2024),
            ..Settings::default()
        }
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(5_000), "5,000");
        assert_eq!(thousands(100_000), "100,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_run_writes_every_batch() {
        let dir = tempdir().unwrap();
        let summary = run(&settings_in(dir.path()), &NameTables::builtin()).unwrap();
        assert!(summary.all_written());
        assert_eq!(summary.written(), 3);

        assert_eq!(read(&dir.path().join("a.csv")).unwrap().len(), 20);
        assert_eq!(fs::read_to_string(dir.path().join("b.csv")).unwrap(), "first,last,ticket_number\n");
        let c = read(&dir.path().join("c.csv")).unwrap();
        assert_eq!(c[0].ticket_number, "095");
        assert_eq!(c[149].ticket_number, "244");
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("samples").join("raffle");
        let summary = run(&settings_in(&nested), &NameTables::builtin()).unwrap();
        assert!(summary.all_written());
        assert!(nested.join("a.csv").exists());
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut settings = settings_in(dir.path());
        settings.batches.push(BatchSpec::new("neg.csv", -5, 1));
        let err = run(&settings, &NameTables::builtin()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_name_table_fails_before_any_file() {
        let dir = tempdir().unwrap();
        let first: [&str; 0] = [];
        let err = NameTables::new(&first, crate::names::LAST_NAMES)
            .and_then(|tables| run(&settings_in(dir.path()), &tables))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_continue_policy_keeps_going_after_failure() {
        let dir = tempdir().unwrap();
        // a directory in the way makes the final rename of b.csv fail
        fs::create_dir(dir.path().join("b.csv")).unwrap();

        let summary = run(&settings_in(dir.path()), &NameTables::builtin()).unwrap();
        let statuses: Vec<_> = summary.outcomes.iter().map(|o| o.status.clone()).collect();
        assert_eq!(statuses[0], BatchStatus::Written { rows: 20 });
        assert!(matches!(statuses[1], BatchStatus::Failed { .. }));
        assert_eq!(statuses[2], BatchStatus::Written { rows: 150 });
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_written());
        assert!(dir.path().join("c.csv").exists());
        assert!(!dir.path().join(".b.csv.partial").exists());
    }

    #[test]
    fn test_fail_fast_policy_skips_remaining() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("b.csv")).unwrap();
        let settings = Settings {
            policy: FailurePolicy::FailFast,
            ..settings_in(dir.path())
        };

        let summary = run(&settings, &NameTables::builtin()).unwrap();
        assert!(summary.outcomes[0].is_written());
        assert!(summary.outcomes[1].is_failed());
        assert_eq!(summary.outcomes[2].status, BatchStatus::Skipped);
        assert!(!dir.path().join("c.csv").exists());
    }

    #[test]
    fn test_parallel_fail_fast_rejected() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            parallel: true,
            policy: FailurePolicy::FailFast,
            ..settings_in(dir.path())
        };
        let err = run(&settings, &NameTables::builtin()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_seeded_runs_are_identical_sequential_or_parallel() {
        let sequential = tempdir().unwrap();
        let parallel = tempdir().unwrap();
        run(&settings_in(sequential.path()), &NameTables::builtin()).unwrap();
        let settings = Settings {
            parallel: true,
            ..settings_in(parallel.path())
        };
        let summary = run(&settings, &NameTables::builtin()).unwrap();
        assert!(summary.all_written());
        let names: Vec<_> = summary.outcomes.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);

        for spec in small_batches() {
            let a = fs::read(sequential.path().join(spec.file_name)).unwrap();
            let b = fs::read(parallel.path().join(spec.file_name)).unwrap();
            assert_eq!(a, b, "{} differs", spec.file_name);
        }
    }
}
