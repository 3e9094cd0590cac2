use crate::driver::RunSummary;
use crate::error::Result;
use crate::write::write_atomically;
use std::io::Write;
use std::path::Path;

pub fn to_json(summary: &RunSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Writes the run summary as pretty-printed JSON at `path`.
pub fn write_report(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = to_json(summary)?;
    write_atomically(path, |out| {
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BatchSpec, FailurePolicy};
    use crate::driver::{BatchOutcome, BatchStatus};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn summary() -> RunSummary {
        let spec = BatchSpec::new("raffle-5k.csv", 5_000, 10_001);
        RunSummary {
            out_dir: PathBuf::from("samples"),
            seed: Some(7),
            policy: FailurePolicy::Continue,
            parallel: false,
            outcomes: vec![
                BatchOutcome {
                    file_name: spec.file_name.to_string(),
                    path: PathBuf::from("samples/raffle-5k.csv"),
                    count: spec.count,
                    first_ticket: spec.start_ticket,
                    last_ticket: spec.last_ticket(),
                    status: BatchStatus::Written { rows: 5_000 },
                    elapsed_ms: 3,
                },
                BatchOutcome {
                    file_name: "raffle-10k.csv".to_string(),
                    path: PathBuf::from("samples/raffle-10k.csv"),
                    count: 10_000,
                    first_ticket: 20_001,
                    last_ticket: Some(30_000),
                    status: BatchStatus::Failed { reason: "i/o failure: denied".to_string() },
                    elapsed_ms: 1,
                },
            ],
        }
    }

    #[test]
    fn test_report_shape() {
        let value: serde_json::Value = serde_json::from_str(&to_json(&summary()).unwrap()).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["policy"], "continue");
        let outcomes = value["outcomes"].as_array().unwrap();
        assert_eq!(outcomes[0]["status"], "written");
        assert_eq!(outcomes[0]["rows"], 5_000);
        assert_eq!(outcomes[0]["last_ticket"], 15_000);
        assert_eq!(outcomes[1]["status"], "failed");
        assert_eq!(outcomes[1]["reason"], "i/o failure: denied");
    }

    #[test]
    fn test_write_report_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        write_report(&path, &summary()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"raffle-10k.csv\""));
    }
}
