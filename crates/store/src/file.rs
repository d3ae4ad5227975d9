//! Whole-file JSON persistence for the project collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use projboard_core::project::Project;

use crate::StoreError;

/// Read the full collection from `path`.
///
/// A missing or blank file is an empty collection. Anything else that cannot
/// be read or parsed is an error, so "no projects yet" stays distinguishable
/// from "data file is broken".
pub(crate) async fn read_collection(path: &Path) -> Result<Vec<Project>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the collection at `path` with `projects`.
///
/// Writes a sibling temp file and renames it over the target, so concurrent
/// readers see either the old or the new collection, never a partial one.
/// The parent directory is created if needed.
pub(crate) async fn write_collection(path: &Path, projects: &[Project]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
    }

    let data = serde_json::to_vec_pretty(projects).map_err(StoreError::Serialize)?;
    let tmp = temp_path(path);

    if let Err(source) = tokio::fs::write(&tmp, &data).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_err(source));
    }
    if let Err(source) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_err(source));
    }
    Ok(())
}

/// `dir/projects.json` -> `dir/.projects.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "projects.json".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}
