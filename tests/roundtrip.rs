use stave::config::{ParseOptions, WriteOptions};
use stave::id3::v2::{DescriptiveTextFrame, Frame, FrameId, PopularimeterFrame};
use stave::tag::Tag;

use std::io::Cursor;

fn read(bytes: Vec<u8>) -> Tag {
	Tag::read_from(&mut Cursor::new(bytes), ParseOptions::new()).unwrap()
}

#[test_log::test]
fn unedited_v24_tag_is_byte_identical() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 24]);
	file.extend_from_slice(b"TIT2");
	file.extend_from_slice(&[0, 0, 0, 14, 0, 0]);
	file.push(0x03);
	file.extend_from_slice("Hello, 世界".as_bytes());

	let tag = read(file.clone());
	let written = tag.as_bytes(WriteOptions::default()).unwrap();

	assert_eq!(written, file);
}

#[test_log::test]
fn unedited_unknown_frames_are_byte_identical() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 30]);
	file.extend_from_slice(b"ZZZ1");
	file.extend_from_slice(&[0, 0, 0, 4, 0, 0]);
	file.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
	file.extend_from_slice(b"TIT2");
	file.extend_from_slice(&[0, 0, 0, 6, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"Hello");

	let tag = read(file.clone());
	let written = tag.as_bytes(WriteOptions::default()).unwrap();

	assert_eq!(written, file);
}

#[test_log::test]
fn editing_reserializes_only_the_edited_frame() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 32]);
	file.extend_from_slice(b"TIT2");
	file.extend_from_slice(&[0, 0, 0, 6, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"Hello");
	file.extend_from_slice(b"TALB");
	file.extend_from_slice(&[0, 0, 0, 6, 0, 0]);
	file.push(0x00);
	file.extend_from_slice(b"Album");

	let mut tag = read(file);
	tag.set_title("Howdy");

	let written = tag.as_bytes(WriteOptions::default()).unwrap();
	let reparsed = read(written);
	assert_eq!(reparsed.title(), Some("Howdy"));
	assert_eq!(reparsed.album(), Some("Album"));
}

#[test_log::test]
fn parse_of_serialize_is_identity() {
	let mut tag = Tag::new();
	tag.set_title("Title");
	tag.set_artist("Artist One\0Artist Two");
	tag.set_album("caf\u{00e9} culture");
	tag.set_year(1998);
	tag.set_track(5);
	tag.set_genre("(17)");
	tag.set_comment("a test comment");
	tag.id3v2_mut().insert(Frame::Popularimeter(PopularimeterFrame::new(
		"someone@example.com",
		196,
		42,
	)));
	tag.id3v2_mut().insert(Frame::Descriptive(DescriptiveTextFrame::new(
		FrameId::new("USLT").unwrap(),
		None,
		"some lyrics\nover two lines",
	)));

	let bytes = tag.as_bytes(WriteOptions::default()).unwrap();
	let reparsed = read(bytes);

	assert_eq!(reparsed.title(), Some("Title"));
	assert_eq!(reparsed.artists(), vec!["Artist One", "Artist Two"]);
	assert_eq!(reparsed.album(), Some("caf\u{00e9} culture"));
	assert_eq!(reparsed.year(), Some(1998));
	assert_eq!(reparsed.track(), Some(5));
	assert_eq!(reparsed.genre().as_deref(), Some("Rock"));
	assert_eq!(reparsed.comment(), Some("a test comment"));
	assert_eq!(reparsed.lyrics(), Some("some lyrics\nover two lines"));

	let popm_id = FrameId::new("POPM").unwrap();
	let Some(Frame::Popularimeter(popm)) = reparsed.id3v2().get(&popm_id) else {
		panic!("expected a POPM frame");
	};
	assert_eq!(popm.email, "someone@example.com");
	assert_eq!(popm.rating, 196);
	assert_eq!(popm.stars(), 4);
	assert_eq!(popm.counter, 42);

	// Frame equality is semantic, so a second round trip compares equal
	let bytes_again = reparsed.as_bytes(WriteOptions::default()).unwrap();
	assert_eq!(read(bytes_again).id3v2(), reparsed.id3v2());
}

#[test_log::test]
fn v23_source_reserializes_as_v24() {
	let mut file = Vec::new();
	file.extend_from_slice(&[b'I', b'D', b'3', 3, 0, 0, 0, 0, 0, 17]);
	file.extend_from_slice(b"TALB");
	file.extend_from_slice(&[0, 0, 0, 7, 0, 0]);
	file.extend_from_slice(&[0x01, 0xFF, 0xFE, 0x41, 0x00, 0x42, 0x00]);

	let tag = read(file);
	let written = tag.as_bytes(WriteOptions::default()).unwrap();

	// The new tag is ID3v2.4: synchsafe sizes and normalized text
	assert_eq!(written[3], 4);
	let reparsed = read(written);
	assert_eq!(reparsed.album(), Some("AB"));
	assert_eq!(reparsed.id3v2().original_version(), stave::id3::v2::Id3v2Version::V4);
}
