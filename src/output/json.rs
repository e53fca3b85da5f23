//! JSON output writer

use crate::output::record::OutputRecord;
use crate::output::OutputError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes records as a pretty-printed JSON array
pub fn save_to_json(records: &[OutputRecord], path: &Path) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}
