use crate::error::{Error, Result};
use crate::participant::Participant;
use crate::write::HEADER;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a fixture document back into participants.
///
/// The header must be exactly `first,last,ticket_number`.
pub fn read_from<R: Read>(input: R) -> Result<Vec<Participant>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let headers = reader.headers()?;
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(Error::invalid(format!(
            "unexpected header {:?}, expected {}",
            headers.iter().collect::<Vec<_>>(),
            HEADER.join(",")
        )));
    }

    let mut participants = Vec::new();
    for record in reader.deserialize() {
        participants.push(record?);
    }
    Ok(participants)
}

pub fn read(path: &Path) -> Result<Vec<Participant>> {
    let file = File::open(path)?;
    read_from(std::io::BufReader::new(file))
}
