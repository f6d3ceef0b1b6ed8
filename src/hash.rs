//! SHA-256 comparison of an original file and its reconstruction.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::io_utils::io_error;

const CHUNK: usize = 64 * 1024;

/// Stream `path` through SHA-256.
pub fn file_digest(path: &Path) -> Result<[u8; 32]> {
    let file = File::open(path).map_err(|e| io_error("opening", path, e))?;
    let mut reader = BufReader::with_capacity(CHUNK, file);
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| io_error("reading", path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().into())
}

pub fn digest_hex(digest: &[u8; 32]) -> String {
    hex::encode(digest)
}

/// Digests of two files and whether they agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileComparison {
    pub left: String,
    pub right: String,
    pub matches: bool,
}

pub fn compare_files(left: &Path, right: &Path) -> Result<FileComparison> {
    let a = file_digest(left)?;
    let b = file_digest(right)?;
    Ok(FileComparison {
        left: digest_hex(&a),
        right: digest_hex(&b),
        matches: a == b,
    })
}
