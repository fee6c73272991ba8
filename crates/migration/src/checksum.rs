use sha2::{Digest, Sha256};

/// Length of a rendered checksum in hex characters.
pub const CHECKSUM_LEN: usize = 64;

pub fn script_checksum(script: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(script.as_bytes());
    hex::encode(hasher.finalize())
}
