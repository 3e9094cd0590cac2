use crate::error::Result;
use crate::names::NameTables;
use crate::participant::Participant;
use crate::read::read;
use serde::Serialize;
use std::path::{Path, PathBuf};

// Past this many findings the rest are counted but not listed.
const MAX_FINDINGS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub path: PathBuf,
    pub rows: usize,
    pub first_ticket: Option<u64>,
    pub last_ticket: Option<u64>,
    pub findings: Vec<String>,
    pub suppressed: usize,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    fn note(&mut self, finding: String) {
        if self.findings.len() < MAX_FINDINGS {
            self.findings.push(finding);
        } else {
            self.suppressed += 1;
        }
    }
}

/// Checks rows already in memory: contiguous ascending tickets of one width,
/// names taken from `tables`.
pub fn check(path: &Path, participants: &[Participant], tables: &NameTables) -> VerifyReport {
    let mut report = VerifyReport {
        path: path.to_path_buf(),
        rows: participants.len(),
        first_ticket: None,
        last_ticket: None,
        findings: Vec::new(),
        suppressed: 0,
    };

    let width = participants.first().map(|p| p.ticket_number.len());
    let mut expected: Option<u64> = None;
    for (row, participant) in participants.iter().enumerate() {
        // rows are numbered from 2, after the header line
        let line = row + 2;
        if !tables.knows_first(&participant.first) {
            report.note(format!("row {}: unknown first name {:?}", line, participant.first));
        }
        if !tables.knows_last(&participant.last) {
            report.note(format!("row {}: unknown last name {:?}", line, participant.last));
        }
        if Some(participant.ticket_number.len()) != width {
            report.note(format!(
                "row {}: ticket {:?} is not {} digits wide",
                line,
                participant.ticket_number,
                width.unwrap_or_default()
            ));
        }
        let ticket = match participant.ticket_number.parse::<u64>() {
            Ok(ticket) if participant.ticket_number.bytes().all(|b| b.is_ascii_digit()) => ticket,
            _ => {
                report.note(format!("row {}: ticket {:?} is not a number", line, participant.ticket_number));
                expected = None;
                continue;
            }
        };
        if let Some(want) = expected {
            if ticket != want {
                report.note(format!("row {}: expected ticket {}, found {}", line, want, ticket));
            }
        }
        report.first_ticket.get_or_insert(ticket);
        report.last_ticket = Some(ticket);
        expected = ticket.checked_add(1);
    }

    if let (Some(width), Some(last)) = (width, report.last_ticket) {
        let needed = crate::participant::digit_count(last);
        if width != needed {
            report.note(format!("ticket width {} does not match last ticket {} ({} digits)", width, last, needed));
        }
    }
    report
}

/// Reads the fixture at `path` and checks it.
///
/// Only unreadable or malformed files are errors; rule violations end up in
/// the report's findings.
pub fn verify(path: &Path, tables: &NameTables) -> Result<VerifyReport> {
    let participants = read(path)?;
    Ok(check(path, &participants, tables))
}
