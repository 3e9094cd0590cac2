use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// One generation unit: a file name, how many rows, and the first ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSpec {
    pub file_name: &'static str,
    pub count: i64,
    pub start_ticket: u64,
}

impl BatchSpec {
    pub const fn new(file_name: &'static str, count: i64, start_ticket: u64) -> Self {
        BatchSpec { file_name, count, start_ticket }
    }

    /// Last ticket in the batch, `None` when the batch is empty or invalid.
    pub fn last_ticket(&self) -> Option<u64> {
        if self.count <= 0 {
            return None;
        }
        self.start_ticket.checked_add(self.count as u64 - 1)
    }

    fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(Error::invalid("batch file name is empty"));
        }
        if self.file_name.contains(|c: char| c == '/' || c == '\\') || self.file_name == "." || self.file_name == ".." {
            return Err(Error::invalid(format!("batch file name {:?} must be a plain file name", self.file_name)));
        }
        if self.count < 0 {
            return Err(Error::invalid(format!("{}: count must not be negative, got {}", self.file_name, self.count)));
        }
        if self.start_ticket < 1 {
            return Err(Error::invalid(format!("{}: start ticket must be at least 1", self.file_name)));
        }
        if self.count > 0 && self.last_ticket().is_none() {
            return Err(Error::invalid(format!("{}: ticket range overflows", self.file_name)));
        }
        Ok(())
    }
}

/// The fixture set the spinner is tested against.
pub const DEFAULT_BATCHES: &[BatchSpec] = &[
    BatchSpec::new("raffle-5k.csv", 5_000, 10_001),
    BatchSpec::new("raffle-10k.csv", 10_000, 20_001),
    BatchSpec::new("raffle-25k.csv", 25_000, 50_001),
    BatchSpec::new("raffle-50k.csv", 50_000, 100_001),
    BatchSpec::new("raffle-100k.csv", 100_000, 200_001),
];

/// Checks a whole batch table before anything touches the disk.
pub fn validate_batches(batches: &[BatchSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for batch in batches {
        batch.validate()?;
        if !seen.insert(batch.file_name) {
            return Err(Error::invalid(format!("batch file name {} appears twice", batch.file_name)));
        }
    }
    Ok(())
}

/// What to do with the remaining batches after one fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    Continue,
    FailFast,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Continue
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub out_dir: PathBuf,
    pub batches: Vec<BatchSpec>,
    pub seed: Option<u64>,
    pub policy: FailurePolicy,
    pub parallel: bool,
    pub report: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            out_dir: PathBuf::from("."),
            batches: DEFAULT_BATCHES.to_vec(),
            seed: None,
            policy: FailurePolicy::default(),
            parallel: false,
            report: None,
        }
    }
}
