//! Conformance tests for format detection and the two parsers.

use std::io::Write;

use stl_analysis::{StlError, StlFormat, ascii, load_polyhedron};
use tempfile::NamedTempFile;

const WEDGE: &str = "\
solid wedge
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 3 0 0
      vertex 0 4 0
    endloop
  endfacet
endsolid wedge
";

#[test]
fn ascii_buffers_classify_as_ascii() {
    // Real ASCII files are longer than the 80 byte window.
    let mut text = WEDGE.to_string();
    while text.len() < 80 {
        text.push('\n');
    }
    assert_eq!(StlFormat::classify(text.as_bytes()).unwrap(), StlFormat::Ascii);
}

#[test]
fn binary_buffers_classify_as_binary() {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(StlFormat::classify(&bytes).unwrap(), StlFormat::Binary);
}

#[test]
fn short_buffers_cannot_be_classified() {
    assert!(matches!(
        StlFormat::classify(b"solid"),
        Err(StlError::HeaderTooShort { len: 5 })
    ));
}

#[test]
fn solid_prefixed_binary_is_misclassified_as_ascii() {
    // Documented limitation of the classification rule: the header bytes
    // win, even when the rest of the buffer is binary.
    let mut bytes = vec![0u8; 200];
    bytes[..5].copy_from_slice(b"solid");
    assert_eq!(StlFormat::classify(&bytes).unwrap(), StlFormat::Ascii);
}

#[test]
fn ascii_name_comes_from_the_solid_line() {
    let parse = ascii::parse(WEDGE.as_bytes(), "file.stl").unwrap();
    assert_eq!(parse.polyhedron.name(), "wedge");
}

#[test]
fn ascii_skip_and_continue_reports_each_bad_facet() {
    let good = "\
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
";
    let bad_vertex = good.replace("vertex 0 1 0", "vertex 0 one 0");
    let bad_structure = good.replace("    endloop\n", "");
    let text = format!(
        "solid mixed\n{}{}{}{}{}endsolid mixed\n",
        good, bad_vertex, good, bad_structure, good
    );

    let parse = ascii::parse(text.as_bytes(), "file.stl").unwrap();
    assert_eq!(parse.polyhedron.face_count(), 3);
    assert_eq!(parse.skipped.len(), 2);

    assert_eq!(parse.skipped[0].facet, 1);
    assert!(matches!(parse.skipped[0].error, StlError::InvalidVertex { .. }));
    assert_eq!(parse.skipped[1].facet, 3);
    assert!(matches!(
        parse.skipped[1].error,
        StlError::MalformedFacet { .. }
    ));
}

#[test]
fn binary_name_falls_back_to_file_name() {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&0u32.to_le_bytes());

    let mut file = NamedTempFile::with_suffix(".stl").unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let poly = load_polyhedron(file.path()).unwrap();
    let expected = file.path().file_name().unwrap().to_str().unwrap();
    assert_eq!(poly.name(), expected);
}

#[test]
fn binary_embedded_name_wins_over_file_name() {
    let mut bytes = vec![0u8; 80];
    bytes[..12].copy_from_slice(b"turbine fan ");
    bytes.extend_from_slice(&0u32.to_le_bytes());

    let mut file = NamedTempFile::with_suffix(".stl").unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let poly = load_polyhedron(file.path()).unwrap();
    assert_eq!(poly.name(), "turbine fan");
}

#[test]
fn declared_count_larger_than_buffer_is_truncation() {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&3u32.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 100]); // two full records worth of zeros

    let mut file = NamedTempFile::with_suffix(".stl").unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    match load_polyhedron(file.path()) {
        Err(StlError::TruncatedData {
            declared,
            expected,
            actual,
        }) => {
            assert_eq!(declared, 3);
            assert_eq!(expected, 234);
            assert_eq!(actual, 184);
        }
        other => panic!("expected TruncatedData, got {:?}", other),
    }
}
