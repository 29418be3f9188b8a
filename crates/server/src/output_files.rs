use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Failures of the output-file endpoint, each with its HTTP status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutputFileError {
    #[error("Forbidden path")]
    Forbidden,

    #[error("File not found")]
    NotFound,
}

impl OutputFileError {
    pub fn http_status(&self) -> u16 {
        match self {
            OutputFileError::Forbidden => 403,
            OutputFileError::NotFound => 404,
        }
    }
}

/// Resolves a client-supplied filename inside the output directory.
///
/// Any name that would resolve outside the directory (parent components,
/// absolute paths, symlink escapes) is rejected before touching the file;
/// names that stay inside but do not exist yield `NotFound`.
pub fn resolve_output_file(output_dir: &Path, name: &str) -> Result<PathBuf, OutputFileError> {
    let mut depth: i64 = 0;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    log::warn!("rejected path escaping output folder: {name}");
                    return Err(OutputFileError::Forbidden);
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                log::warn!("rejected absolute output path: {name}");
                return Err(OutputFileError::Forbidden);
            }
        }
    }

    let candidate = output_dir.join(name);
    if !candidate.is_file() {
        return Err(OutputFileError::NotFound);
    }

    // Symlinks inside the directory may still point elsewhere.
    let canonical_dir = output_dir
        .canonicalize()
        .map_err(|_| OutputFileError::NotFound)?;
    let canonical = candidate
        .canonicalize()
        .map_err(|_| OutputFileError::NotFound)?;
    if !canonical.starts_with(&canonical_dir) {
        log::warn!("rejected symlinked path escaping output folder: {name}");
        return Err(OutputFileError::Forbidden);
    }

    Ok(candidate)
}
