//! Prebuilt page payloads read back from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use roster_model::{PagePayload, Schema};

use crate::error::{IngestError, Result};

/// Reads a `{records, choices, columns}` payload and checks that every record
/// carries a non-blank year and site.
pub fn read_payload(path: &Path, schema: &Schema) -> Result<PagePayload> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: PagePayload =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| IngestError::Payload {
            path: path.to_path_buf(),
            source,
        })?;
    payload
        .records
        .validate(schema)
        .map_err(|source| IngestError::InvalidPayload {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(payload)
}
