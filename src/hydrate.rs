use crate::{
    errors::{FileOperation, IoError},
    placeholders::PlaceholderMap,
    stage::{StagedFile, StagedTree},
};
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum HydrateError {
    #[error("I/O error while hydrating stubs")]
    #[diagnostic(code(guardgen::hydrate::io))]
    Io(#[from] IoError),

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(guardgen::hydrate::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        dir: PathBuf,
        source: std::path::StripPrefixError,
    },
}

/// Name of the hydrated output tree, written as a sibling of the stub root.
pub const OUTPUT_DIR_NAME: &str = ".stubs";

/// The output root for a given stub root: its sibling named `.stubs`.
///
/// Resetting and rebuilding the output is the caller's decision; this
/// function only computes the location.
pub fn output_root(source_root: &Path) -> PathBuf {
    source_root.with_file_name(OUTPUT_DIR_NAME)
}

/// Recursively deletes a previous output tree. A missing tree is fine; a
/// tree that cannot be removed aborts the run before any hydration starts.
pub fn reset_output(output_root: &Path) -> Result<(), HydrateError> {
    if output_root.exists() {
        log::debug!("removing stale output at {}", output_root.display());

        std::fs::remove_dir_all(output_root).map_err(|error| {
            IoError::new(FileOperation::Remove, output_root.to_path_buf(), error)
        })?;
    }

    Ok(())
}

/// Hydrates every stub under `source_root` into `output_root` and returns
/// the number of files written. Any I/O failure aborts the whole run.
pub fn hydrate(
    source_root: &Path,
    output_root: &Path,
    map: &PlaceholderMap,
) -> Result<usize, HydrateError> {
    let tree = stage(source_root, map)?;

    apply(&tree, output_root)?;

    Ok(tree.len())
}

/// Walks `source_root` and builds the [`StagedTree`] of hydrated files:
/// every path segment and every content byte run through token
/// substitution. Directory-only entries are skipped; symlinks are not
/// followed, so a link cycle cannot hang the traversal.
pub fn stage(source_root: &Path, map: &PlaceholderMap) -> Result<StagedTree, HydrateError> {
    let mut tree = StagedTree::new();

    for entry in WalkDir::new(source_root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = error.path().unwrap_or_else(|| Path::new(""));

                Err(IoError::new(
                    FileOperation::Read,
                    path.to_path_buf(),
                    error.into(),
                ))?
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let full_path = entry.path();
        let relative = match full_path.strip_prefix(source_root) {
            Ok(r) => r,
            Err(error) => Err(HydrateError::StripPrefix {
                path: full_path.to_path_buf(),
                dir: source_root.to_path_buf(),
                source: error,
            })?,
        };

        let content = std::fs::read(full_path)
            .map_err(|error| IoError::new(FileOperation::Read, full_path.to_path_buf(), error))?;

        tree.files.push(StagedFile {
            destination: rewrite_path(relative, map),
            content: map.substitute_bytes(&content),
        });
    }

    Ok(tree)
}

/// Writes a staged tree under `output_root`, creating parent directories as
/// needed. `create_dir_all` is idempotent, so files sharing a parent are
/// safe to apply in any order.
pub fn apply(tree: &StagedTree, output_root: &Path) -> Result<(), HydrateError> {
    for file in &tree.files {
        let final_path = output_root.join(&file.destination);

        if let Some(parent) = final_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|error| IoError::new(FileOperation::Mkdir, parent.to_path_buf(), error))?;
        }

        std::fs::write(&final_path, &file.content)
            .map_err(|error| IoError::new(FileOperation::Write, final_path.clone(), error))?;

        log::debug!("hydrated {}", final_path.display());
    }

    Ok(())
}

/// Token-substitutes each segment of a relative path, including the file's
/// base name.
fn rewrite_path(relative: &Path, map: &PlaceholderMap) -> PathBuf {
    let mut result = PathBuf::new();

    for component in relative.components() {
        let segment = component.as_os_str().to_string_lossy();

        result.push(map.substitute(&segment));
    }

    result
}
