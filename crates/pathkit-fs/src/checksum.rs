//! SHA-256 checksums in the canonical `sha256:<hex>` form

use sha2::{Digest, Sha256};
use std::io::Read;

const PREFIX: &str = "sha256:";

/// Checksum of in-memory bytes.
pub fn checksum_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Checksum of a stream, read in fixed-size chunks.
pub fn checksum_reader(mut reader: impl Read) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 16_000];
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}
