//! Decoder and library configuration.

use std::path::{Path, PathBuf};

/// Default ceiling on the declared facet count (5 GB of facet data).
pub const DEFAULT_MAX_FACE_COUNT: u32 = 100_000_000;

/// Options controlling how strictly binary STL buffers are decoded.
///
/// # Example
///
/// ```
/// use stl_io::DecodeOptions;
///
/// let options = DecodeOptions::default().with_max_face_count(1_000);
/// assert_eq!(options.max_face_count, 1_000);
/// assert!(!options.allow_trailing_bytes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest facet count accepted before any length check or allocation.
    pub max_face_count: u32,

    /// Ignore bytes after the last declared facet instead of rejecting
    /// the buffer.
    pub allow_trailing_bytes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_face_count: DEFAULT_MAX_FACE_COUNT,
            allow_trailing_bytes: false,
        }
    }
}

impl DecodeOptions {
    /// No facet-count ceiling. Overflow and length checks still apply.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_face_count: u32::MAX,
            allow_trailing_bytes: false,
        }
    }

    /// Set the facet-count ceiling.
    #[must_use]
    pub const fn with_max_face_count(mut self, max_face_count: u32) -> Self {
        self.max_face_count = max_face_count;
        self
    }

    /// Accept (and ignore) bytes after the last facet.
    #[must_use]
    pub const fn allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }
}

/// Where a [`StlLibrary`](crate::StlLibrary) keeps its files and how it
/// decodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Directory holding the `.stl` files.
    pub root: PathBuf,

    /// Options used by [`StlLibrary::load`](crate::StlLibrary::load).
    pub decode: DecodeOptions,
}

impl LibraryConfig {
    /// Library rooted at `root` with default decode options.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            decode: DecodeOptions::default(),
        }
    }

    /// Library rooted at `relative`, resolved against the directory of the
    /// running executable with symlinks followed.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path cannot be determined or its
    /// directory cannot be canonicalized.
    pub fn relative_to_executable(relative: impl AsRef<Path>) -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        let dir = std::fs::canonicalize(dir)?;
        Ok(Self::new(dir.join(relative)))
    }

    /// Replace the decode options.
    #[must_use]
    pub const fn with_decode_options(mut self, decode: DecodeOptions) -> Self {
        self.decode = decode;
        self
    }
}
