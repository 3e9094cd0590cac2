use crate::error::{Error, Result};
use crate::names::NameTables;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// One fixture row. Field names are the CSV column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub first: String,
    pub last: String,
    pub ticket_number: String,
}

impl Participant {
    pub fn new(first: &str, last: &str, ticket_number: String) -> Self {
        Participant {
            first: first.to_string(),
            last: last.to_string(),
            ticket_number,
        }
    }
}

/// Number of decimal digits in `n`.
pub fn digit_count(n: u64) -> usize {
    let mut digits = 1;
    let mut rest = n / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

/// Last ticket of the range `start_ticket..start_ticket + count`.
///
/// Returns `None` for an empty range; callers must not derive a width from it.
pub fn last_ticket(count: u64, start_ticket: u64) -> Result<Option<u64>> {
    if count == 0 {
        return Ok(None);
    }
    start_ticket
        .checked_add(count - 1)
        .map(Some)
        .ok_or_else(|| Error::invalid(format!(
            "ticket range starting at {} with {} entries overflows",
            start_ticket, count
        )))
}

/// Pads `ticket` with leading zeros to `width` digits.
pub fn format_ticket(ticket: u64, width: usize) -> String {
    format!("{:0width$}", ticket, width = width)
}

/// Builds `count` participants with tickets `start_ticket ..= start_ticket + count - 1`.
///
/// Names are drawn independently and uniformly, with replacement, from
/// `tables` using `rng`. The result is in ascending ticket order and every
/// ticket number has the width of the last one.
pub fn generate<R: Rng + ?Sized>(
    count: i64,
    start_ticket: u64,
    tables: &NameTables,
    rng: &mut R,
) -> Result<Vec<Participant>> {
    if count < 0 {
        return Err(Error::invalid(format!("count must not be negative, got {}", count)));
    }
    let count = count as u64;
    let width = match last_ticket(count, start_ticket)? {
        Some(last) => digit_count(last),
        None => return Ok(Vec::new()),
    };

    let capacity = usize::try_from(count)
        .map_err(|_| Error::invalid(format!("count {} does not fit in memory", count)))?;
    let mut participants = Vec::new();
    participants
        .try_reserve(capacity)
        .map_err(|e| Error::invalid(format!("cannot hold {} participants: {}", count, e)))?;
    for i in 0..count {
        // Tables are non-empty by construction.
        let first = tables.first().choose(&mut *rng).copied().unwrap_or_default();
        let last = tables.last().choose(&mut *rng).copied().unwrap_or_default();
        participants.push(Participant::new(first, last, format_ticket(start_ticket + i, width)));
    }
    Ok(participants)
}
