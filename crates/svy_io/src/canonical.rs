//! Canonical JSON bytes, SHA-256 fingerprints, and atomic writes.
//!
//! - Objects: keys sorted lexicographically (serde_json's default map is
//!   ordered; values are materialized through `serde_json::Value` so struct
//!   field order never leaks into the bytes).
//! - Arrays: order preserved (caller is responsible for stable ordering).
//! - Output: compact, no trailing newline.
//! - Atomic write: unique temp file in the same dir + fsync(temp) + rename;
//!   direct-write fallback if rename fails (e.g. cross-device).

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::{IoError, IoResult};

/// Serialize any value to canonical JSON bytes.
pub fn canonical_json_bytes<T: Serialize>(value: &T) -> IoResult<Vec<u8>> {
    // Round-trip through Value: serde_json's map sorts keys on serialization.
    let v: Value = serde_json::to_value(value)?;
    Ok(serde_json::to_vec(&v)?)
}

/// Lowercase SHA-256 hex digest of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Fingerprint of a value's canonical JSON bytes (lowercase 64-hex).
///
/// Plan artifacts embed the design fingerprint so a stored plan can always be
/// traced back to the exact design it was derived from.
pub fn fingerprint<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&canonical_json_bytes(value)?))
}

/// Write canonical JSON to `path` atomically (with cross-device fallback).
pub fn write_canonical_file<T: Serialize>(path: &Path, value: &T) -> IoResult<()> {
    let bytes = canonical_json_bytes(value)?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&parent).map_err(|e| IoError::Write(e.to_string()))?;

    // Unique temp next to the destination (same directory, same filesystem).
    let tmp = unique_tmp_path(path);
    write_bytes(&tmp, &bytes, true).map_err(|e| IoError::Write(e.to_string()))?;

    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            // Cross-device or exotic filesystems: write directly, then clean up.
            let res = write_bytes(path, &bytes, false);
            let _ = fs::remove_file(&tmp);
            res.map_err(|e| IoError::Write(e.to_string()))
        }
    }
}

fn write_bytes(path: &Path, bytes: &[u8], create_new: bool) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true);
    if create_new {
        opts.create_new(true);
    } else {
        opts.create(true).truncate(true);
    }
    let mut f = opts.open(path)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    Ok(())
}

fn unique_tmp_path(path: &Path) -> PathBuf {
    let pid = std::process::id();
    let mut n: u32 = 0;
    loop {
        let candidate = path.with_extension(format!("tmp.{pid}.{n}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Read a whole local file, enforcing the offline posture.
pub(crate) fn read_local_file(path: &Path) -> IoResult<Vec<u8>> {
    let shown = path.display().to_string();
    if crate::looks_like_url(&shown) {
        return Err(IoError::Path(format!("networked paths are rejected: {shown}")));
    }
    if path.is_dir() {
        return Err(IoError::Path(format!("expected a file, found a directory: {shown}")));
    }
    let mut buf = Vec::new();
    use std::io::Read;
    File::open(path)
        .map_err(|e| IoError::Read(format!("{shown}: {e}")))?
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Read(format!("{shown}: {e}")))?;
    Ok(buf)
}
