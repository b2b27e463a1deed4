//! Value types for binary STL meshes.
//!
//! - [`Vector3`] - Three `f32` components, the precision STL stores
//! - [`Facet`] - A normal and three vertices
//! - [`Model`] - A named, ordered facet sequence with its count
//!
//! These types carry no geometry algorithms. They are what the
//! `stl-io` codec produces and consumes, and what callers hand on to JSON
//! or storage.
//!
//! # Features
//!
//! - `serde` - `Serialize`/`Deserialize` for all types. A [`Model`]
//!   serializes as `{ "name", "face_num", "triangle_face_array" }` and
//!   facets as `{ "n", "a", "b", "c" }`.
//!
//! # Example
//!
//! ```
//! use stl_types::{Facet, Model, Vector3};
//!
//! let facet = Facet::new(
//!     Vector3::new(0.0, 0.0, 1.0),
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//!
//! let model = Model::new("triangle.stl", vec![facet]).unwrap();
//! assert_eq!(model.face_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod facet;
mod model;
mod vector;

pub use error::{ModelError, ModelResult};
pub use facet::Facet;
pub use model::Model;
pub use vector::Vector3;
