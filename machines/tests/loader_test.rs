use lc3sim_machines::{LoadError, parse_object, read_object_file};

use std::path::Path;

#[test]
fn test_words_are_big_endian() {
    let image = parse_object(&[0x30, 0x00, 0x12, 0x63, 0x00, 0x42]).unwrap();
    assert_eq!(image, vec![0x3000, 0x1263, 0x0042]);
}

#[test]
fn test_single_word_image_is_just_an_origin() {
    let image = parse_object(&[0x30, 0x00]).unwrap();
    assert_eq!(image, vec![0x3000]);
}

#[test]
fn test_empty_stream_is_rejected() {
    assert!(matches!(parse_object(&[]), Err(LoadError::Empty)));
}

#[test]
fn test_odd_length_stream_is_rejected() {
    assert!(matches!(
        parse_object(&[0x30, 0x00, 0x12]),
        Err(LoadError::TruncatedWord)
    ));
}

#[test]
fn test_missing_file_reports_the_path() {
    let err = read_object_file(Path::new("does-not-exist.obj")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist.obj"));
}
