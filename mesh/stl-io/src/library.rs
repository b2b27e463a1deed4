//! Directory-backed collection of binary STL files.
//!
//! A library is a single flat directory. Models are addressed by file
//! name, and a loaded model is named after its file.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use stl_types::Model;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::binary::{decode_with, encode_to};
use crate::config::{DecodeOptions, LibraryConfig};
use crate::error::{IoError, IoResult};

/// A directory of `.stl` files.
///
/// # Example
///
/// ```no_run
/// use stl_io::{LibraryConfig, StlLibrary};
///
/// let library = StlLibrary::open(LibraryConfig::new("assets/upload")).unwrap();
/// for name in library.list().unwrap() {
///     let model = library.load(&name).unwrap();
///     println!("{name}: {} facets", model.face_count());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StlLibrary {
    config: LibraryConfig,
}

impl StlLibrary {
    /// Open a library over an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::NotADirectory`] if `config.root` does not exist
    /// or is not a directory.
    pub fn open(config: LibraryConfig) -> IoResult<Self> {
        if !config.root.is_dir() {
            return Err(IoError::NotADirectory { path: config.root });
        }
        debug!(root = %config.root.display(), "opened STL library");
        Ok(Self { config })
    }

    /// Directory the library reads from and writes to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Decode options used by [`load`](Self::load).
    #[must_use]
    pub const fn decode_options(&self) -> &DecodeOptions {
        &self.config.decode
    }

    /// Names of the `.stl` files in the library, sorted.
    ///
    /// The extension match is case-insensitive. Subdirectories are skipped,
    /// including ones whose names end in `.stl` and symlinks that resolve
    /// to a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn list(&self) -> IoResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(self.root())? {
            let entry = entry?;
            let path = entry.path();
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_dir() => continue,
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            }
            if !has_stl_extension(&path) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(name = ?raw, "skipping non UTF-8 file name"),
            }
        }
        names.sort();
        debug!(root = %self.root().display(), count = names.len(), "listed STL files");
        Ok(names)
    }

    /// Resolve a model name to its path inside the library.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidName`] for names that are empty, `.`,
    /// `..`, or contain a path separator.
    pub fn path_of(&self, name: &str) -> IoResult<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\']);
        if invalid {
            return Err(IoError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.root().join(name))
    }

    /// Read and decode a model by file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, the file cannot be read,
    /// or its content is not a valid binary STL.
    pub fn load(&self, name: &str) -> IoResult<Model> {
        let path = self.path_of(name)?;
        read_model(&path, name, self.decode_options())
    }

    /// Encode a model and write it to `root/<model name>`.
    ///
    /// An existing file with the same name is replaced atomically: readers
    /// see either the old content or the complete new file.
    ///
    /// # Errors
    ///
    /// Returns an error if the model name is invalid or the file cannot be
    /// written.
    pub fn save(&self, model: &Model) -> IoResult<PathBuf> {
        let path = self.path_of(model.name())?;
        if path.exists() {
            debug!(path = %path.display(), "replacing existing model");
        }
        write_model(model, &path)?;
        info!(
            name = model.name(),
            faces = model.face_count(),
            "saved STL model"
        );
        Ok(path)
    }
}

/// Load a binary STL file, naming the model after the file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid binary
/// STL.
///
/// # Example
///
/// ```no_run
/// use stl_io::load_stl;
///
/// let model = load_stl("model.stl").unwrap();
/// println!("Loaded {} facets", model.face_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Model> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    read_model(path, &name, &DecodeOptions::default())
}

/// Save a model as a binary STL file at `path`.
///
/// The model name is not stored in the file. The bytes go to a temporary
/// file in the same directory, which is then renamed over `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_stl<P: AsRef<Path>>(model: &Model, path: P) -> IoResult<()> {
    write_model(model, path.as_ref())
}

fn read_model(path: &Path, name: &str, options: &DecodeOptions) -> IoResult<Model> {
    let bytes = std::fs::read(path).map_err(|e| IoError::from_open(e, path))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read STL file");
    decode_with(&bytes, name, options).map_err(|source| IoError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn write_model(model: &Model, path: &Path) -> IoResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    encode_to(model, BufWriter::new(tmp.as_file_mut()))?;
    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
    Ok(())
}

fn has_stl_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("stl"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::DecodeError;
    use stl_types::Facet;
    use tempfile::TempDir;

    fn library() -> (TempDir, StlLibrary) {
        let dir = tempfile::tempdir().expect("temp dir");
        let library = StlLibrary::open(LibraryConfig::new(dir.path())).expect("open");
        (dir, library)
    }

    fn model(name: &str, faces: usize) -> Model {
        let facet = Facet::from_arrays(
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        );
        Model::new(name, vec![facet; faces]).unwrap()
    }

    #[test]
    fn open_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = StlLibrary::open(LibraryConfig::new(&missing)).unwrap_err();
        assert!(matches!(err, IoError::NotADirectory { .. }));

        let file = dir.path().join("file.stl");
        std::fs::write(&file, b"").unwrap();
        assert!(StlLibrary::open(LibraryConfig::new(&file)).is_err());
    }

    #[test]
    fn list_filters_and_sorts() {
        let (dir, library) = library();
        std::fs::write(dir.path().join("b.stl"), b"").unwrap();
        std::fs::write(dir.path().join("A.STL"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("stl"), b"").unwrap();
        std::fs::create_dir(dir.path().join("nested.stl")).unwrap();

        assert_eq!(library.list().unwrap(), vec!["A.STL", "b.stl"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_skips_links_to_directories() {
        let (dir, library) = library();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("inner.stl"), b"").unwrap();
        std::fs::write(dir.path().join("part.stl"), b"").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("link.stl")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("part.stl"), dir.path().join("alias.stl"))
            .unwrap();

        assert_eq!(library.list().unwrap(), vec!["alias.stl", "part.stl"]);
    }

    #[test]
    fn save_then_load() {
        let (_dir, library) = library();
        let original = model("part.stl", 4);

        let path = library.save(&original).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 84 + 4 * 50);

        let loaded = library.load("part.stl").unwrap();
        assert_eq!(loaded, original);
        assert_eq!(library.list().unwrap(), vec!["part.stl"]);
    }

    #[test]
    fn save_replaces_existing() {
        let (_dir, library) = library();
        library.save(&model("part.stl", 3)).unwrap();
        library.save(&model("part.stl", 1)).unwrap();
        assert_eq!(library.load("part.stl").unwrap().face_count(), 1);
    }

    #[test]
    fn save_leaves_no_temporary_files() {
        let (dir, library) = library();
        library.save(&model("part.stl", 3)).unwrap();
        library.save(&model("part.stl", 2)).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("part.stl")]);
        assert_eq!(
            std::fs::metadata(dir.path().join("part.stl")).unwrap().len(),
            84 + 2 * 50
        );
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.stl");
        save_stl(&model("kept.stl", 2), &path).unwrap();

        let blocked = dir.path().join("missing").join("kept.stl");
        assert!(save_stl(&model("kept.stl", 5), &blocked).is_err());
        assert_eq!(load_stl(&path).unwrap().face_count(), 2);
    }

    #[test]
    fn load_missing_file() {
        let (_dir, library) = library();
        let err = library.load("nope.stl").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn load_reports_decode_errors_with_path() {
        let (dir, library) = library();
        std::fs::write(dir.path().join("short.stl"), [0u8; 40]).unwrap();

        let err = library.load("short.stl").unwrap_err();
        assert_eq!(
            err.decode_error(),
            Some(&DecodeError::TruncatedHeader { actual: 40 })
        );
        assert!(err.to_string().contains("short.stl"));
    }

    #[test]
    fn rejects_traversal_names() {
        let (_dir, library) = library();
        for name in ["", ".", "..", "../x.stl", "a/b.stl", "a\\b.stl"] {
            assert!(
                matches!(library.path_of(name), Err(IoError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
        assert!(library.save(&model("../escape.stl", 1)).is_err());
    }

    #[test]
    fn library_uses_its_decode_options() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig::new(dir.path())
            .with_decode_options(DecodeOptions::default().with_max_face_count(1));
        let library = StlLibrary::open(config).unwrap();
        save_stl(&model("two.stl", 2), dir.path().join("two.stl")).unwrap();

        let err = library.load("two.stl").unwrap_err();
        assert_eq!(
            err.decode_error(),
            Some(&DecodeError::InvalidCount { count: 2 })
        );
    }

    #[test]
    fn free_functions_name_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("free.stl");
        save_stl(&model("ignored", 2), &path).unwrap();

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.name(), "free.stl");
        assert_eq!(loaded.face_count(), 2);
    }
}
