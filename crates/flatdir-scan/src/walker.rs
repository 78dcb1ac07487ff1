//! Work-stack based lazy tree walker.

use std::fs::{self, ReadDir};
use std::path::PathBuf;

use compact_str::CompactString;
use tracing::{trace, warn};

use flatdir_core::{DirectoryEntry, ScanError};

/// The directory listing currently being drained.
struct Listing {
    dir: PathBuf,
    entries: ReadDir,
}

/// Lazy iterator over every file and directory below a root.
///
/// Each directory's direct entries are yielded before any of its
/// subdirectories are opened; subdirectories are then visited depth-first in
/// the order the listing returned them. Nothing is sorted. The root itself is
/// not yielded.
///
/// Symbolic links are followed, so a link cycle makes the walk endless.
///
/// Errors are yielded in place and do not end the iteration; the caller
/// decides whether to keep pulling.
pub struct TreeWalker {
    /// Directories waiting to be listed, next one on top.
    pending: Vec<PathBuf>,
    /// Subdirectories found in the current listing.
    discovered: Vec<PathBuf>,
    current: Option<Listing>,
    files_only: bool,
}

impl TreeWalker {
    /// Walk everything below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            pending: vec![root.into()],
            discovered: Vec::new(),
            current: None,
            files_only: false,
        }
    }

    /// Walk below `root`, yielding only non-directory entries.
    ///
    /// Directories are still descended into.
    pub fn files(root: impl Into<PathBuf>) -> Self {
        Self {
            files_only: true,
            ..Self::new(root)
        }
    }

    /// Start listing the next pending directory.
    fn open_next(&mut self) -> Option<Result<(), ScanError>> {
        let dir = self.pending.pop()?;
        trace!(path = %dir.display(), "reading directory");
        Some(match fs::read_dir(&dir) {
            Ok(entries) => {
                self.current = Some(Listing { dir, entries });
                Ok(())
            }
            Err(e) => Err(ScanError::io(dir, e)),
        })
    }

    /// Queue the subdirectories of the finished listing so the first one
    /// listed is visited first.
    fn finish_listing(&mut self) {
        self.current = None;
        self.pending.extend(self.discovered.drain(..).rev());
    }
}

impl Iterator for TreeWalker {
    type Item = Result<DirectoryEntry, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(listing) = self.current.as_mut() else {
                if let Err(e) = self.open_next()? {
                    return Some(Err(e));
                }
                continue;
            };

            let dir_entry = match listing.entries.next() {
                Some(Ok(dir_entry)) => dir_entry,
                Some(Err(e)) => return Some(Err(ScanError::io(&listing.dir, e))),
                None => {
                    self.finish_listing();
                    continue;
                }
            };

            let entry = match load_entry(&dir_entry) {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };

            if entry.is_dir() {
                self.discovered.push(entry.path().to_path_buf());
                if self.files_only {
                    continue;
                }
            }

            return Some(Ok(entry));
        }
    }
}

/// Build a [`DirectoryEntry`] from a raw listing entry, following symlinks.
fn load_entry(dir_entry: &fs::DirEntry) -> Result<DirectoryEntry, ScanError> {
    let path = dir_entry.path();
    let name = CompactString::from(dir_entry.file_name().to_string_lossy().as_ref());

    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && is_symlink(dir_entry) => {
            warn!(path = %path.display(), "dangling symbolic link, using the link itself");
            fs::symlink_metadata(&path).map_err(|e| ScanError::io(&path, e))?
        }
        Err(e) => return Err(ScanError::io(&path, e)),
    };

    if metadata.is_dir() {
        Ok(DirectoryEntry::directory(path, name))
    } else {
        Ok(DirectoryEntry::file(path, name, metadata.len()))
    }
}

fn is_symlink(dir_entry: &fs::DirEntry) -> bool {
    dir_entry.file_type().is_ok_and(|t| t.is_symlink())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        // Create directory structure
        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        // Create files
        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    fn collect(walker: TreeWalker) -> Vec<DirectoryEntry> {
        walker.collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(collect(TreeWalker::new(temp.path())).is_empty());
    }

    #[test]
    fn test_every_node_once() {
        let temp = create_test_tree();
        let entries = collect(TreeWalker::new(temp.path()));

        // 4 files + 3 directories, root excluded
        assert_eq!(entries.len(), 7);
        let unique: HashSet<_> = entries.iter().map(|e| e.path().to_path_buf()).collect();
        assert_eq!(unique.len(), 7);
        assert!(!unique.contains(temp.path()));

        let dirs = entries.iter().filter(|e| e.is_dir()).count();
        assert_eq!(dirs, 3);
    }

    #[test]
    fn test_sizes() {
        let temp = create_test_tree();
        for entry in collect(TreeWalker::new(temp.path())) {
            if entry.is_file() {
                let expected = fs::metadata(entry.path()).unwrap().len();
                assert_eq!(entry.size(), Some(expected));
            } else {
                assert_eq!(entry.size(), None);
            }
        }
    }

    #[test]
    fn test_direct_entries_before_subdirectory_contents() {
        let temp = create_test_tree();
        let entries = collect(TreeWalker::new(temp.path()));
        let position = |name: &str| entries.iter().position(|e| e.name() == name).unwrap();

        // Root listing comes first, in whatever order.
        let top: HashSet<_> = entries[..3].iter().map(|e| e.name().to_string()).collect();
        assert_eq!(top, HashSet::from(["dir1", "dir2", "file1.txt"].map(String::from)));

        // Each directory precedes its contents, and a directory's own
        // listing precedes its nested contents.
        assert!(position("dir1") < position("file2.txt"));
        assert!(position("subdir") < position("file3.txt"));
        assert!(position("file2.txt") < position("file3.txt"));
        assert!(position("dir2") < position("file4.txt"));
    }

    #[test]
    fn test_subtrees_are_not_interleaved() {
        let temp = create_test_tree();
        let entries = collect(TreeWalker::new(temp.path()));
        let position = |name: &str| entries.iter().position(|e| e.name() == name).unwrap();

        // Depth-first: dir1's whole subtree is either before or after dir2's.
        let dir1_span = [position("file2.txt"), position("subdir"), position("file3.txt")];
        let file4 = position("file4.txt");
        assert!(
            dir1_span.iter().all(|&p| p < file4) || dir1_span.iter().all(|&p| p > file4)
        );
    }

    #[test]
    fn test_files_only() {
        let temp = create_test_tree();
        let entries = collect(TreeWalker::files(temp.path()));
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(DirectoryEntry::is_file));
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let mut walker = TreeWalker::new(temp.path().join("nope"));
        let err = walker.next().unwrap().unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
        assert!(walker.next().is_none());
    }

    #[test]
    fn test_fresh_scan_each_time() {
        let temp = create_test_tree();
        assert_eq!(collect(TreeWalker::new(temp.path())).len(), 7);

        fs::write(temp.path().join("dir2/late.txt"), "late").unwrap();
        assert_eq!(collect(TreeWalker::new(temp.path())).len(), 8);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed() {
        use std::os::unix::fs::symlink;

        let temp = create_test_tree();
        symlink(temp.path().join("dir2"), temp.path().join("link_dir")).unwrap();
        symlink(temp.path().join("file1.txt"), temp.path().join("link_file")).unwrap();

        let entries = collect(TreeWalker::new(temp.path()));
        let link_dir = entries.iter().find(|e| e.name() == "link_dir").unwrap();
        assert!(link_dir.is_dir());
        let link_file = entries.iter().find(|e| e.name() == "link_file").unwrap();
        assert_eq!(link_file.size(), Some(5));

        // dir2's file appears twice: once directly, once through the link.
        let file4 = entries.iter().filter(|e| e.name() == "file4.txt").count();
        assert_eq!(file4, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_a_file() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        symlink("does-not-exist", temp.path().join("broken")).unwrap();

        let entries = collect(TreeWalker::new(temp.path()));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_file());
    }
}
