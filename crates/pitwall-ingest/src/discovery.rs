//! Table discovery in an input tree.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// A table file found under an input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTable {
    /// Full path of the file.
    pub path: PathBuf,
    /// Path relative to the input root; mirrored under the output root.
    pub relative: PathBuf,
}

/// Lazy, ordered walk over the table files of a tree.
///
/// Entries are visited depth-first with siblings sorted by file name, so
/// two runs over the same tree see the same order. Unreadable directories
/// are yielded as errors and the walk continues past them.
pub struct TableWalk {
    root: PathBuf,
    extension: String,
    entries: walkdir::IntoIter,
}

impl Iterator for TableWalk {
    type Item = Result<DiscoveredTable>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Some(Err(IngestError::Walk { path, source }));
                }
            };

            if !entry.file_type().is_file() || !has_extension(entry.path(), &self.extension) {
                continue;
            }

            let path = entry.into_path();
            let relative = path
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            return Some(Ok(DiscoveredTable { path, relative }));
        }
    }
}

/// Starts a walk over every `*.{extension}` file below `root`.
///
/// The extension is matched case-insensitively and given without a dot.
pub fn walk_tables(root: &Path, extension: &str) -> Result<TableWalk> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    Ok(TableWalk {
        root: root.to_path_buf(),
        extension: extension.trim_start_matches('.').to_string(),
        entries: WalkDir::new(root).sort_by_file_name().into_iter(),
    })
}

/// Location of a discovered table in the output tree.
pub fn mirror_path(output_root: &Path, relative: &Path) -> PathBuf {
    output_root.join(relative)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
