use stave::config::ParseOptions;
use stave::id3::v2::{Frame, FrameCategory, FrameId};
use stave::tag::Tag;

use std::io::Cursor;

fn read(bytes: Vec<u8>) -> Tag {
	Tag::read_from(&mut Cursor::new(bytes), ParseOptions::new()).unwrap()
}

#[test_log::test]
fn v24_utf8_text() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 24]);
	file.extend_from_slice(b"TIT2");
	file.extend_from_slice(&[0, 0, 0, 14, 0, 0]);
	file.push(0x03);
	file.extend_from_slice("Hello, 世界".as_bytes());

	let tag = read(file);

	assert!(tag.has_id3v2());
	assert!(!tag.is_null());
	assert_eq!(tag.title(), Some("Hello, 世界"));
}

#[test_log::test]
fn v23_utf16_bom() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 3, 0, 0, 0, 0, 0, 17]);
	file.extend_from_slice(b"TALB");
	file.extend_from_slice(&[0, 0, 0, 7, 0, 0]);
	file.extend_from_slice(&[0x01, 0xFF, 0xFE, 0x41, 0x00, 0x42, 0x00]);

	let tag = read(file);

	assert_eq!(tag.album(), Some("AB"));
}

#[test_log::test]
fn v22_frame_translation() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 2, 0, 0, 0, 0, 0, 12]);
	file.extend_from_slice(b"TT2");
	file.extend_from_slice(&[0, 0, 6]);
	file.push(0x00);
	file.extend_from_slice(b"Hello");

	let tag = read(file);

	// The 3 character ID never appears in the in-memory model
	let frame = tag.id3v2().get(&FrameId::new("TIT2").unwrap()).unwrap();
	assert_eq!(frame.id_str(), "TIT2");
	assert_eq!(frame.category(), FrameCategory::Text);
	assert_eq!(tag.title(), Some("Hello"));

	// Serialization produces an ID3v2.4 header over the translated ID, with
	// the size synchsafe and the discard-on-tag-alter flag set
	let written = frame.write().unwrap();
	let mut expected = Vec::new();
	expected.extend_from_slice(b"TIT2");
	expected.extend_from_slice(&[0, 0, 0, 6, 0x40, 0x00]);
	expected.push(0x00);
	expected.extend_from_slice(b"Hello");
	assert_eq!(written, expected);
}

#[test_log::test]
fn v23_multi_value_artist() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 3, 0, 0, 0, 0, 0, 20]);
	file.extend_from_slice(b"TPE1");
	file.extend_from_slice(&[0, 0, 0, 10, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"Alice/Bob");

	let tag = read(file);
	assert_eq!(tag.artists(), vec!["Alice", "Bob"]);

	// The same frame in ID3v2.4, NUL separated, splits identically
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 20]);
	file.extend_from_slice(b"TPE1");
	file.extend_from_slice(&[0, 0, 0, 10, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"Alice\0Bob");

	let tag = read(file);
	assert_eq!(tag.artists(), vec!["Alice", "Bob"]);
}

#[test_log::test]
fn v2_takes_precedence_over_v1() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 18]);
	file.extend_from_slice(b"TIT2");
	file.extend_from_slice(&[0, 0, 0, 8, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"v2title");

	let mut trailer = vec![0_u8; 128];
	trailer[..3].copy_from_slice(b"TAG");
	trailer[3..10].copy_from_slice(b"v1title");
	trailer[33..41].copy_from_slice(b"v1artist");
	file.extend_from_slice(&trailer);

	let tag = read(file);

	// The v2 frame wins; v1 only fills the IDs v2 did not provide
	assert_eq!(tag.title(), Some("v2title"));
	assert_eq!(tag.artist(), Some("v1artist"));
}

#[test_log::test]
fn padding_ends_iteration() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 50]);
	file.extend_from_slice(b"TIT2");
	file.extend_from_slice(&[0, 0, 0, 6, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"Hello");
	// The rest of the declared region is padding
	file.resize(10 + 50, 0);

	let tag = read(file);
	assert_eq!(tag.title(), Some("Hello"));
	assert_eq!(tag.id3v2().len(), 1);
	assert_eq!(tag.id3v2().padding_start(), Some(26));
}

#[test_log::test]
fn unknown_frame_is_preserved() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 14]);
	file.extend_from_slice(b"ZZZ1");
	file.extend_from_slice(&[0, 0, 0, 4, 0, 0]);
	file.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

	let tag = read(file);

	let id = FrameId::new("ZZZ1").unwrap();
	let Some(Frame::Binary(binary)) = tag.id3v2().get(&id) else {
		panic!("expected a binary frame");
	};
	assert_eq!(binary.data, vec![0xDE, 0xAD, 0xBE, 0xEF]);
	assert!(!binary.is_null());
}

#[test_log::test]
fn malformed_v2_header_still_reads_v1() {
	let mut file = Vec::new();
	// Version 9 is unsupported; the v2 section is skipped entirely
	file.extend_from_slice(&[b'I', b'D', b'3', 9, 0, 0, 0, 0, 0, 24]);
	file.resize(200, 0);

	let mut trailer = vec![0_u8; 128];
	trailer[..3].copy_from_slice(b"TAG");
	trailer[3..8].copy_from_slice(b"Hello");
	file.extend_from_slice(&trailer);

	let tag = read(file);

	assert!(!tag.has_id3v2());
	assert!(tag.has_id3v1());
	assert_eq!(tag.title(), Some("Hello"));
}

#[test_log::test]
fn zero_size_frame_enters_padding() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 40]);
	file.extend_from_slice(b"TIT2");
	file.extend_from_slice(&[0, 0, 0, 6, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"Hello");
	// A frame header with a zero size ends the iteration
	file.extend_from_slice(b"TALB");
	file.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
	file.resize(10 + 40, 0);

	let tag = read(file);
	assert_eq!(tag.id3v2().len(), 1);
	assert_eq!(tag.title(), Some("Hello"));
}
