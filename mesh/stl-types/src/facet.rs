//! Triangular facet as stored in binary STL.

use crate::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One triangle of an STL mesh: a normal and three vertices.
///
/// The normal is whatever the file carried; it is not recomputed or
/// checked against the vertex winding. The two attribute bytes that follow
/// each facet on disk are not part of this value.
///
/// With the `serde` feature the fields serialize as `n`, `a`, `b`, `c`.
///
/// # Example
///
/// ```
/// use stl_types::{Facet, Vector3};
///
/// let facet = Facet::new(
///     Vector3::new(0.0, 0.0, 1.0),
///     Vector3::new(0.0, 0.0, 0.0),
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
/// );
/// assert_eq!(facet.vertices()[1], Vector3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Facet normal as stored in the file.
    #[cfg_attr(feature = "serde", serde(rename = "n"))]
    pub normal: Vector3,
    /// First vertex.
    pub a: Vector3,
    /// Second vertex.
    pub b: Vector3,
    /// Third vertex.
    pub c: Vector3,
}

impl Facet {
    /// Create a facet from its normal and vertices.
    #[inline]
    #[must_use]
    pub const fn new(normal: Vector3, a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { normal, a, b, c }
    }

    /// Create a facet from coordinate arrays, normal first.
    #[inline]
    #[must_use]
    pub const fn from_arrays(normal: [f32; 3], a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Self {
        Self::new(
            Vector3::from_array(normal),
            Vector3::from_array(a),
            Vector3::from_array(b),
            Vector3::from_array(c),
        )
    }

    /// The three vertices in winding order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Vector3; 3] {
        [self.a, self.b, self.c]
    }

    /// Normal followed by the vertices, the order used on the wire.
    #[inline]
    #[must_use]
    pub const fn components(&self) -> [Vector3; 4] {
        [self.normal, self.a, self.b, self.c]
    }

    /// Check that the normal and all vertices are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|v| v.is_finite())
    }
}
