//! Result sink
//!
//! Appends one JSON record per line to the output destination. The file is
//! opened, written and closed for every record, so existing content from
//! earlier runs is preserved and a failed write never poisons later ones.

use crate::browser::CaptureResult;
use crate::error::SinkError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON-lines append writer
#[derive(Debug, Clone)]
pub struct ResultSink {
    path: PathBuf,
}

impl ResultSink {
    /// Create a sink appending to `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append exactly one serialized record, creating the file if absent
    pub fn append(&self, result: &CaptureResult) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(result)?;
        line.push(b'\n');

        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let mut file = options.open(&self.path).map_err(|source| SinkError::Open {
            path: self.path.clone(),
            source,
        })?;

        // one write_all per record keeps the line contiguous in append mode
        file.write_all(&line)
            .and_then(|_| file.flush())
            .map_err(|source| SinkError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("Appended record for {} to {}", result.url, self.path.display());
        Ok(())
    }
}
