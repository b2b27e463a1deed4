//! Library tests against hand-assembled STL files.
//!
//! Fixtures are written byte by byte (not through `encode`) into a temporary
//! directory, so these tests pin the on-disk layout independently of the
//! encoder.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::path::Path;

use approx::assert_relative_eq;
use stl_io::{DecodeError, IoError, LibraryConfig, StlLibrary, encode};
use tempfile::tempdir;

/// Raw bytes for a unit square made of two facets, with a text header and
/// non-zero attribute bytes.
fn square_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut header = [b' '; 80];
    let text = b"solid square exported by a CAD tool";
    header[..text.len()].copy_from_slice(text);
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&2u32.to_le_bytes());

    let facets: [[[f32; 3]; 4]; 2] = [
        [[0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
        [[0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    ];
    for facet in &facets {
        for vector in facet {
            for value in vector {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&[0x12, 0x34]);
    }
    bytes
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(name), bytes).expect("write fixture");
}

#[test]
fn loads_hand_built_square() {
    let dir = tempdir().unwrap();
    write(dir.path(), "square.stl", &square_bytes());
    let library = StlLibrary::open(LibraryConfig::new(dir.path())).unwrap();

    let model = library.load("square.stl").unwrap();
    assert_eq!(model.name(), "square.stl");
    assert_eq!(model.face_count(), 2);

    let second = model.facets()[1];
    assert_eq!(second.normal.z, 1.0);
    assert_relative_eq!(second.b.x, 1.0);
    assert_relative_eq!(second.c.y, 1.0);
}

#[test]
fn header_and_attributes_are_not_preserved() {
    let dir = tempdir().unwrap();
    let original = square_bytes();
    write(dir.path(), "square.stl", &original);
    let library = StlLibrary::open(LibraryConfig::new(dir.path())).unwrap();

    let model = library.load("square.stl").unwrap();
    let reencoded = encode(&model);

    assert_eq!(reencoded.len(), original.len());
    assert!(reencoded[..80].iter().all(|&b| b == 0));
    assert_eq!(&reencoded[80..84], &original[80..84]);
    // Float data is identical, attribute bytes are zeroed.
    assert_eq!(&reencoded[84..132], &original[84..132]);
    assert_eq!(&reencoded[132..134], &[0, 0]);
}

#[test]
fn check_every_listed_file() {
    let dir = tempdir().unwrap();
    let square = square_bytes();
    write(dir.path(), "good.stl", &square);
    write(dir.path(), "header-only.STL", &square[..60]);
    write(dir.path(), "cut.stl", &square[..120]);
    write(dir.path(), "readme.md", b"not a mesh");
    let library = StlLibrary::open(LibraryConfig::new(dir.path())).unwrap();

    let names = library.list().unwrap();
    assert_eq!(names, vec!["cut.stl", "good.stl", "header-only.STL"]);

    let results: Vec<_> = names
        .iter()
        .map(|name| library.load(name).map_err(|e| e.decode_error().copied()))
        .collect();

    assert_eq!(
        results[0].as_ref().err(),
        Some(&Some(DecodeError::TruncatedBody {
            expected: 184,
            actual: 120
        }))
    );
    assert!(results[1].is_ok());
    assert_eq!(
        results[2].as_ref().err(),
        Some(&Some(DecodeError::TruncatedHeader { actual: 60 }))
    );
}

#[test]
fn saved_models_appear_in_listing() {
    let dir = tempdir().unwrap();
    let library = StlLibrary::open(LibraryConfig::new(dir.path())).unwrap();
    write(dir.path(), "square.stl", &square_bytes());

    let copy = library.load("square.stl").unwrap().with_name("copy.stl");
    library.save(&copy).unwrap();

    assert_eq!(library.list().unwrap(), vec!["copy.stl", "square.stl"]);
    assert_eq!(library.load("copy.stl").unwrap().facets(), copy.facets());
}

#[test]
fn invalid_names_never_touch_disk() {
    let dir = tempdir().unwrap();
    let library = StlLibrary::open(LibraryConfig::new(dir.path())).unwrap();
    let err = library.load("../square.stl").unwrap_err();
    assert!(matches!(err, IoError::InvalidName { .. }));
}

#[cfg(feature = "serde")]
#[test]
fn json_transport_shape() {
    let dir = tempdir().unwrap();
    write(dir.path(), "square.stl", &square_bytes());
    let library = StlLibrary::open(LibraryConfig::new(dir.path())).unwrap();
    let model = library.load("square.stl").unwrap();

    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["name"], "square.stl");
    assert_eq!(json["face_num"], 2);
    assert_eq!(json["triangle_face_array"][0]["c"][1], 1.0);
}
