//! Artifact naming and persistence.
//!
//! Artifacts are flat `.txt` files under one output directory. Names are
//! derived from the source identifier (or resolved title): every character
//! outside `[A-Za-z0-9]` becomes a single underscore, the result is
//! truncated to a per-pipeline length bound, and the text extension is
//! appended. Two distinct sources can derive the same truncated name; the
//! later write wins and no uniqueness is guaranteed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name-length bound for URL-derived artifacts
pub const URL_NAME_LIMIT: usize = 100;

/// Name-length bound for reference-derived artifacts
pub const REFERENCE_NAME_LIMIT: usize = 80;

/// Replace every character outside `[A-Za-z0-9]` with `_` and truncate to
/// `max_len` characters. Runs of replaced characters are kept as one `_`
/// each, never collapsed. Idempotent: sanitizing an already-sanitized
/// string returns it unchanged.
pub fn sanitize(seed: &str, max_len: usize) -> String {
    seed.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(max_len)
        .collect()
}

/// Derive the full artifact file name for a seed string.
pub fn safe_file_name(seed: &str, max_len: usize) -> String {
    format!("{}.txt", sanitize(seed, max_len))
}

/// Writes artifacts into one flat output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    /// Create the output directory if needed.
    pub fn new(out_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir)?;
        Ok(Self { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write one artifact, overwriting any prior artifact with the same
    /// name (last write wins). Fails only on unrecoverable filesystem
    /// errors, which are left to the caller.
    pub fn write(&self, file_name: &str, body: &str) -> io::Result<PathBuf> {
        let path = self.out_dir.join(file_name);
        fs::write(&path, body)?;
        Ok(path)
    }
}
