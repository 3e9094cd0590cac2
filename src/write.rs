use crate::error::{Error, Result};
use crate::participant::Participant;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 3] = ["first", "last", "ticket_number"];

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out)
}

/// Serializes the header and `participants` to `out`.
///
/// The header is written explicitly so an empty batch still yields a
/// header-only document.
pub fn write_to<W: Write>(out: W, participants: &[Participant]) -> Result<W> {
    let mut writer = csv_writer(out);
    writer.write_record(&HEADER)?;
    for participant in participants {
        writer.serialize(participant)?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| Error::from(e.into_error()))
}

/// Sibling path the rows are staged in before the final rename.
fn partial_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::invalid(format!("{} has no file name", path.display())))?;
    let mut partial = OsString::from(".");
    partial.push(name);
    partial.push(".partial");
    Ok(path.with_file_name(partial))
}

/// Creates or replaces `path` with whatever `fill` writes.
///
/// Output is staged next to `path` and renamed into place once flushed and
/// synced, so a reader never sees a half-written file. On failure the
/// staging file is removed and `path` is left as it was.
pub fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let partial = partial_path(path)?;
    let staged = File::create(&partial)
        .map_err(Error::from)
        .and_then(|file| {
            let mut out = BufWriter::new(file);
            fill(&mut out)?;
            out.into_inner().map_err(|e| Error::from(e.into_error()))
        })
        .and_then(|file| file.sync_all().map_err(Error::from))
        .and_then(|_| fs::rename(&partial, path).map_err(Error::from));

    if let Err(e) = staged {
        if let Err(cleanup) = fs::remove_file(&partial) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %partial.display(), error = %cleanup, "could not remove staging file");
            }
        }
        return Err(e);
    }
    Ok(())
}

/// Writes a complete fixture file at `path`, replacing any existing file.
pub fn write(path: &Path, participants: &[Participant]) -> Result<()> {
    write_atomically(path, |out| {
        write_to(out, participants)?;
        Ok(())
    })
}
