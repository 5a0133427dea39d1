use super::{lump_name, name_to_field, slice_to_cstring};
use std::ffi::CString;
use std::path::Path;

#[test]
fn short_name_is_padded() {
    assert_eq!(name_to_field("hi"), *b"hi\0\0\0\0\0\0\0\0\0\0\0\0\0\0");
}

#[test]
fn full_width_name_fills_field() {
    assert_eq!(name_to_field("in_16_characters"), *b"in_16_characters");
}

#[test]
fn long_name_is_truncated() {
    assert_eq!(name_to_field("this_string_is_too_long"), *b"this_string_is_t");
}

#[test]
fn name_strips_extension() {
    assert_eq!(lump_name(Path::new("textures/wall01.png")), "wall01");
}

#[test]
fn name_stops_at_first_dot() {
    assert_eq!(lump_name(Path::new("+0slime.final.tga")), "+0slime");
}

#[test]
fn name_without_extension() {
    assert_eq!(lump_name(Path::new("/tmp/CONCHARS")), "CONCHARS");
}

#[test]
fn cstring_from_padded_field() {
    assert_eq!(
        slice_to_cstring(b"wall01\0\0\0\0\0\0\0\0\0\0"),
        CString::new("wall01").unwrap()
    );
}

#[test]
fn cstring_from_unterminated_field() {
    assert_eq!(
        slice_to_cstring(b"namenamenamename"),
        CString::new("namenamenamename").unwrap()
    );
}
