//! Opens a flight list from a local path or an HTTP(S) URL.
//!
//! OpenSky publishes monthly flight lists as `.csv.gz`; gzip input is detected
//! by its magic bytes and decompressed on the fly.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use tracing::debug;

use crate::fetch::{BasicClient, fetch_bytes};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Returns a reader over the decompressed contents of `location`.
///
/// Remote sources are downloaded in full before reading; local files are
/// streamed.
#[tracing::instrument(fields(source = %location))]
pub async fn open_source(location: &str) -> Result<Box<dyn Read + Send>> {
    if is_remote(location) {
        let client = BasicClient::new().context("failed to build HTTP client")?;
        let bytes = fetch_bytes(&client, location)
            .await
            .with_context(|| format!("failed to download {location}"))?;
        debug!(bytes = bytes.len(), "Flight list downloaded");
        decode(Cursor::new(bytes)).with_context(|| format!("failed to read {location}"))
    } else {
        open_path(Path::new(location))
    }
}

/// Opens a local file, transparently decompressing gzip.
pub fn open_path(path: &Path) -> Result<Box<dyn Read + Send>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    decode(BufReader::new(file)).with_context(|| format!("failed to read {}", path.display()))
}

fn decode<R>(mut reader: R) -> Result<Box<dyn Read + Send>>
where
    R: BufRead + Send + 'static,
{
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    debug!(is_gzip, "Detected input encoding");

    if is_gzip {
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}
