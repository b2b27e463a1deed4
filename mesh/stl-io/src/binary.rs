//! Binary STL codec.
//!
//! # Layout
//!
//! ```text
//! UINT8[80]    – Header (ignored on decode, zero on encode)
//! UINT32       – Number of facets, little-endian
//! foreach facet
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex A
//!     REAL32[3] – Vertex B
//!     REAL32[3] – Vertex C
//!     UINT16    – Attribute bytes (skipped on decode, zero on encode)
//! end
//! ```
//!
//! A file holding `n` facets is exactly `84 + 50 * n` bytes long.
//!
//! Facets are read at absolute offsets (`84 + 50 * i`) from a buffer whose
//! length has already been checked against the declared count, so decoding
//! never over-reads and never allocates for facets that are not present.
//!
//! Both directions are pure: no I/O, no logging.

use std::io::Write;

use stl_types::{Facet, Model, Vector3};

use crate::config::DecodeOptions;
use crate::error::DecodeError;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of the facet count field.
pub const COUNT_SIZE: usize = 4;

/// Header plus facet count: the offset of the first facet.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + COUNT_SIZE;

/// Size of one facet on the wire (normal + 3 vertices + attribute).
pub const FACET_SIZE: usize = 50;

/// Bytes of float data in a facet; the attribute bytes follow.
pub const FACET_DATA_SIZE: usize = 48;

/// Size of one encoded vector.
const VECTOR_SIZE: usize = 12;

/// Exact byte length of a binary STL holding `face_count` facets.
///
/// Returns `None` if the length does not fit in `usize`.
///
/// # Example
///
/// ```
/// use stl_io::binary::encoded_len;
///
/// assert_eq!(encoded_len(0), Some(84));
/// assert_eq!(encoded_len(1), Some(134));
/// ```
#[must_use]
pub fn encoded_len(face_count: u32) -> Option<usize> {
    usize::try_from(face_count)
        .ok()?
        .checked_mul(FACET_SIZE)?
        .checked_add(PREAMBLE_SIZE)
}

/// Decode a complete binary STL buffer with default options.
///
/// `name` becomes [`Model::name`]; the in-file header is not read.
///
/// # Errors
///
/// - [`DecodeError::TruncatedHeader`] if the buffer is shorter than 84 bytes
/// - [`DecodeError::InvalidCount`] if the declared count is above the
///   default ceiling
/// - [`DecodeError::TruncatedBody`] if the buffer length is not exactly
///   `84 + 50 * count`
///
/// # Example
///
/// ```
/// use stl_io::binary::{decode, encode};
/// use stl_types::{Facet, Model};
///
/// let model = Model::new("a.stl", vec![Facet::default()]).unwrap();
/// let bytes = encode(&model);
///
/// let decoded = decode(&bytes, "a.stl").unwrap();
/// assert_eq!(decoded, model);
/// ```
pub fn decode(bytes: &[u8], name: impl Into<String>) -> Result<Model, DecodeError> {
    decode_with(bytes, name, &DecodeOptions::default())
}

/// Decode a complete binary STL buffer with explicit options.
///
/// # Errors
///
/// Same as [`decode`]; with
/// [`allow_trailing_bytes`](DecodeOptions::allow_trailing_bytes) set, only
/// buffers that are too short fail with [`DecodeError::TruncatedBody`].
pub fn decode_with(
    bytes: &[u8],
    name: impl Into<String>,
    options: &DecodeOptions,
) -> Result<Model, DecodeError> {
    let face_count = read_face_count(bytes)?;

    if face_count > options.max_face_count {
        return Err(DecodeError::InvalidCount { count: face_count });
    }
    let expected =
        encoded_len(face_count).ok_or(DecodeError::InvalidCount { count: face_count })?;

    let actual = bytes.len();
    if actual < expected || (actual > expected && !options.allow_trailing_bytes) {
        return Err(DecodeError::TruncatedBody { expected, actual });
    }

    // Length is proven above, so the count also fits in usize.
    let facets: Vec<Facet> = (0..face_count as usize)
        .map(|i| read_facet(bytes, PREAMBLE_SIZE + FACET_SIZE * i))
        .collect();

    Model::new(name, facets).map_err(|_| DecodeError::InvalidCount { count: face_count })
}

/// Read the declared facet count without decoding any facets.
///
/// # Errors
///
/// Returns [`DecodeError::TruncatedHeader`] if the buffer is shorter than
/// 84 bytes.
pub fn read_face_count(bytes: &[u8]) -> Result<u32, DecodeError> {
    if bytes.len() < PREAMBLE_SIZE {
        return Err(DecodeError::TruncatedHeader {
            actual: bytes.len(),
        });
    }
    Ok(u32::from_le_bytes([
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ]))
}

/// Read one facet starting at `offset`. The caller guarantees
/// `offset + FACET_SIZE <= bytes.len()`.
fn read_facet(bytes: &[u8], offset: usize) -> Facet {
    Facet::new(
        read_vector(bytes, offset),
        read_vector(bytes, offset + VECTOR_SIZE),
        read_vector(bytes, offset + 2 * VECTOR_SIZE),
        read_vector(bytes, offset + 3 * VECTOR_SIZE),
    )
}

/// Read a vector from 12 bytes (3 little-endian f32s).
fn read_vector(bytes: &[u8], offset: usize) -> Vector3 {
    Vector3::new(
        read_f32(bytes, offset),
        read_f32(bytes, offset + 4),
        read_f32(bytes, offset + 8),
    )
}

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Encode a model as binary STL.
///
/// The result is exactly `84 + 50 * model.facets().len()` bytes: a zeroed
/// header, the facet count taken from the facet sequence, then each facet
/// with zeroed attribute bytes. The model name is not written.
///
/// # Example
///
/// ```
/// use stl_io::binary::encode;
/// use stl_types::Model;
///
/// let bytes = encode(&Model::empty("empty.stl"));
/// assert_eq!(bytes.len(), 84);
/// assert!(bytes.iter().all(|&b| b == 0));
/// ```
#[must_use]
pub fn encode(model: &Model) -> Vec<u8> {
    let facets = model.facets();
    let mut buf = Vec::with_capacity(PREAMBLE_SIZE + FACET_SIZE * facets.len());
    buf.extend_from_slice(&preamble(facets));
    for facet in facets {
        buf.extend_from_slice(&facet_bytes(facet));
    }
    buf
}

/// Stream the bytes produced by [`encode`] into `writer`.
///
/// # Errors
///
/// Returns any error reported by `writer`.
pub fn encode_to<W: Write>(model: &Model, mut writer: W) -> std::io::Result<()> {
    let facets = model.facets();
    writer.write_all(&preamble(facets))?;
    for facet in facets {
        writer.write_all(&facet_bytes(facet))?;
    }
    writer.flush()
}

/// Zero header followed by the little-endian facet count.
fn preamble(facets: &[Facet]) -> [u8; PREAMBLE_SIZE] {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: Model keeps its facet sequence within u32 range
    let count = facets.len() as u32;
    let mut out = [0u8; PREAMBLE_SIZE];
    out[HEADER_SIZE..].copy_from_slice(&count.to_le_bytes());
    out
}

/// One facet as 50 wire bytes; the attribute bytes stay zero.
fn facet_bytes(facet: &Facet) -> [u8; FACET_SIZE] {
    let mut out = [0u8; FACET_SIZE];
    for (slot, vector) in facet.components().iter().enumerate() {
        let base = slot * VECTOR_SIZE;
        for (axis, value) in vector.to_array().iter().enumerate() {
            let at = base + axis * 4;
            out[at..at + 4].copy_from_slice(&value.to_le_bytes());
        }
    }
    out
}
