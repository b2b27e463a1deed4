//! Named STL mesh.

use crate::{Facet, ModelError, ModelResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named mesh: an ordered sequence of facets and their count.
///
/// The name is supplied by whoever produced the model (usually the source
/// file name). It is never taken from, or written to, the 80-byte STL
/// header.
///
/// Fields are private so that `facets().len() == face_count()` holds for
/// every value of this type. Facet order is file order.
///
/// # Serialized Shape
///
/// With the `serde` feature a model serializes as
///
/// ```text
/// { "name": "part.stl", "face_num": 2, "triangle_face_array": [ {n,a,b,c}, ... ] }
/// ```
///
/// and deserialization rejects documents whose `face_num` disagrees with
/// the array length. Serialization fails for models holding NaN or
/// infinite components; see [`Model::check_finite`].
///
/// # Example
///
/// ```
/// use stl_types::{Facet, Model};
///
/// let model = Model::new("part.stl", vec![Facet::default(); 2]).unwrap();
/// assert_eq!(model.name(), "part.stl");
/// assert_eq!(model.face_count(), 2);
/// assert_eq!(model.facets().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ModelRepr"))]
pub struct Model {
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "face_num"))]
    face_count: u32,
    #[cfg_attr(feature = "serde", serde(rename = "triangle_face_array"))]
    facets: Vec<Facet>,
}

impl Model {
    /// Create a model, deriving the facet count from the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooManyFacets`] if `facets.len()` does not fit
    /// in a `u32`.
    pub fn new(name: impl Into<String>, facets: Vec<Facet>) -> ModelResult<Self> {
        let face_count = u32::try_from(facets.len())
            .map_err(|_| ModelError::TooManyFacets { len: facets.len() })?;
        Ok(Self {
            name: name.into(),
            face_count,
            facets,
        })
    }

    /// Create an empty model with the given name.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            face_count: 0,
            facets: Vec::new(),
        }
    }

    /// The model's name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub const fn face_count(&self) -> u32 {
        self.face_count
    }

    /// Facets in file order.
    #[inline]
    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Check whether the model has no facets.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.face_count == 0
    }

    /// Iterate over the facets in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Facet> {
        self.facets.iter()
    }

    /// Check that every facet is finite.
    ///
    /// Binary STL can carry NaN or infinite floats, but JSON cannot; run
    /// this before serializing a decoded model for transport.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonFinite`] naming the first facet with a
    /// NaN or infinite component.
    pub fn check_finite(&self) -> ModelResult<()> {
        match self.facets.iter().position(|f| !f.is_finite()) {
            Some(index) => Err(ModelError::NonFinite { index }),
            None => Ok(()),
        }
    }

    /// Return the same model under a different name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Split the model into its name and facets.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Facet>) {
        (self.name, self.facets)
    }
}

impl<'a> IntoIterator for &'a Model {
    type Item = &'a Facet;
    type IntoIter = std::slice::Iter<'a, Facet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Unchecked deserialization target for [`Model`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ModelRepr {
    name: String,
    face_num: u32,
    triangle_face_array: Vec<Facet>,
}

#[cfg(feature = "serde")]
impl TryFrom<ModelRepr> for Model {
    type Error = ModelError;

    fn try_from(repr: ModelRepr) -> ModelResult<Self> {
        if repr.triangle_face_array.len() != repr.face_num as usize {
            return Err(ModelError::CountMismatch {
                declared: repr.face_num,
                actual: repr.triangle_face_array.len(),
            });
        }
        Self::new(repr.name, repr.triangle_face_array)
    }
}
