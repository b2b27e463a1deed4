//! Binary STL decoding, encoding and file access.
//!
//! The [`binary`] module is the codec: a pure transformation between a
//! complete byte buffer and a [`Model`]. It validates length and facet
//! count upfront and reports malformed input as a [`DecodeError`], never
//! by panicking or returning partial data.
//!
//! Around it, [`StlLibrary`] serves a directory of `.stl` files by name,
//! and [`load_stl`] / [`save_stl`] work on arbitrary paths.
//!
//! # Example
//!
//! ```
//! use stl_io::{decode, encode, DecodeError};
//! use stl_types::{Facet, Model};
//!
//! let model = Model::new("part.stl", vec![Facet::default(); 3]).unwrap();
//! let bytes = encode(&model);
//! assert_eq!(bytes.len(), 84 + 3 * 50);
//!
//! let back = decode(&bytes, "part.stl").unwrap();
//! assert_eq!(back.facets(), model.facets());
//!
//! // Cut off inside the second facet
//! let err = decode(&bytes[..150], "part.stl").unwrap_err();
//! assert_eq!(err, DecodeError::TruncatedBody { expected: 234, actual: 150 });
//! ```
//!
//! # Features
//!
//! - `serde` - enables serde support on the re-exported `stl-types`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod binary;
mod config;
mod error;
mod library;

pub use binary::{decode, decode_with, encode, encode_to};
pub use config::{DEFAULT_MAX_FACE_COUNT, DecodeOptions, LibraryConfig};
pub use error::{DecodeError, IoError, IoResult};
pub use library::{StlLibrary, load_stl, save_stl};

pub use stl_types::{Facet, Model, ModelError, Vector3};
