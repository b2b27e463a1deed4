//! Single-precision 3D vector as stored in binary STL.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize, Serializer, ser::Error as _};

/// Three `f32` components with no unit attached.
///
/// STL stores every normal and vertex as three little-endian IEEE-754
/// singles, so this type keeps them at that precision instead of widening
/// to `f64`.
///
/// With the `serde` feature it serializes as a plain `[x, y, z]` array.
/// Serializing a vector with a NaN or infinite component fails instead of
/// emitting a lossy value such as JSON `null`.
///
/// # Example
///
/// ```
/// use stl_types::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// assert_eq!(Vector3::from([1.0, 2.0, 3.0]), v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(from = "[f32; 3]"))]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector from an `[x, y, z]` array.
    #[inline]
    #[must_use]
    pub const fn from_array(xyz: [f32; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }

    /// Components as an `[x, y, z]` array, in wire order.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Check that no component is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Vector3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.is_finite() {
            return Err(S::Error::custom(format_args!(
                "non-finite vector component in {self:?}"
            )));
        }
        self.to_array().serialize(serializer)
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from(xyz: [f32; 3]) -> Self {
        Self::from_array(xyz)
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}
