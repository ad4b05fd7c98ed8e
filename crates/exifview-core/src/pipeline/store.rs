//! Writing files into the upload working directory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::PipelineError;

/// Write `bytes` to `path`, replacing any existing file.
///
/// The handle is closed before returning, on success and on error.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    let io_err = |source: std::io::Error| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(io_err)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Create the working directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), PipelineError> {
    std::fs::create_dir_all(dir).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
