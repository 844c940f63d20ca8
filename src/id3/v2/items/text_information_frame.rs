use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::frame::id::{FrameCategory, FrameId, KnownFrameId};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader};
use crate::util::text::{decode_text, TextDecodeOptions, TextEncoding};

use std::io::Read;

use byteorder::ReadBytesExt;

// The IDs that use '/' as a multi-value separator prior to ID3v2.4
const SLASH_SEPARATED_IDS: &[KnownFrameId] = &[
	KnownFrameId::Tcom,
	KnownFrameId::Text,
	KnownFrameId::Toly,
	KnownFrameId::Tope,
	KnownFrameId::Tpe1,
];

/// An `ID3v2` text information frame
///
/// The content is normalized to UTF-8 at parse time regardless of the
/// on-disk encoding. Multiple values are stored NUL separated, the ID3v2.4
/// form; the `/` separator used by the artist family of frames prior to
/// ID3v2.4 is translated on read.
#[derive(Clone, Debug, Eq)]
pub struct TextInformationFrame {
	pub(crate) header: FrameHeader,
	/// The encoding the text was stored in
	///
	/// This records what was read. When written, the frame chooses Latin-1
	/// for pure ASCII content and UTF-8 otherwise.
	pub encoding: TextEncoding,
	/// The text itself, NUL separated when multi-valued
	pub value: String,
}

impl PartialEq for TextInformationFrame {
	fn eq(&self, other: &Self) -> bool {
		self.header.id == other.header.id && self.value == other.value
	}
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`]
	///
	/// If the ID is a numerical text frame (`TYER`, `TBPM`, …), any value
	/// element that is not an ASCII integer string is silently dropped.
	pub fn new(id: FrameId, value: impl Into<String>) -> Self {
		let header = FrameHeader::new(id, FrameFlags::default());
		let mut frame = Self {
			header,
			encoding: TextEncoding::UTF8,
			value: String::new(),
		};
		frame.set_value(value);
		frame
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// The values of the frame, split at NUL separators
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.value.split('\0').filter(|v| !v.is_empty())
	}

	/// Replace the content of the frame
	///
	/// For numerical text frames, non-integer elements of the value are
	/// dropped individually rather than rejecting the value wholesale.
	pub fn set_value(&mut self, value: impl Into<String>) {
		let value = value.into();

		if self.header.id.category() == FrameCategory::NumericalText {
			self.value = filter_numeric(&value);
		} else {
			self.value = value;
		}

		self.header.mark_edited();
	}

	/// Replace the content of the frame with multiple values
	pub fn set_values<I>(&mut self, values: I)
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		let joined = values
			.into_iter()
			.map(Into::into)
			.collect::<Vec<_>>()
			.join("\0");
		self.set_value(joined);
	}

	/// Read a [`TextInformationFrame`] from a reader
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
	pub fn parse<R>(
		reader: &mut R,
		id: FrameId,
		frame_flags: FrameFlags,
		version: Id3v2Version,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version, parse_mode)?;
		let mut value = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?.content;

		// Prior to ID3v2.4, the artist family of frames separated multiple
		// values with '/' rather than NUL
		if version != Id3v2Version::V4 {
			if let FrameId::Known(known) = &id {
				if SLASH_SEPARATED_IDS.contains(known) && value.contains('/') {
					value = value.replace('/', "\0");
				}
			}
		}

		let header = FrameHeader::parsed(id, frame_flags, version, None);
		Ok(Some(TextInformationFrame {
			header,
			encoding,
			value,
		}))
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
	pub(crate) fn as_bytes(&self) -> Vec<u8> {
		let encoding = if self.value.is_ascii() {
			TextEncoding::Latin1
		} else {
			TextEncoding::UTF8
		};

		let mut content = encoding.encode(&self.value, false);
		content.insert(0, encoding as u8);
		content
	}

	// Serialize with the content trimmed until the body fits in `max_body` bytes
	pub(crate) fn as_bytes_limited(&self, max_body: usize) -> Vec<u8> {
		let mut frame = self.clone();

		loop {
			let bytes = frame.as_bytes();
			if bytes.len() <= max_body || frame.value.is_empty() {
				return bytes;
			}

			let excess = bytes.len() - max_body;
			let mut new_len = frame.value.len().saturating_sub(excess);
			while new_len > 0 && !frame.value.is_char_boundary(new_len) {
				new_len -= 1;
			}
			frame.value.truncate(new_len);
		}
	}
}

fn filter_numeric(value: &str) -> String {
	value
		.split('\0')
		.filter(|element| {
			let keep = !element.is_empty() && element.bytes().all(|b| b.is_ascii_digit());
			if !keep && !element.is_empty() {
				log::warn!("Dropping non-numeric value \"{element}\" in a numerical text frame");
			}
			keep
		})
		.collect::<Vec<_>>()
		.join("\0")
}

#[cfg(test)]
mod tests {
	use super::TextInformationFrame;
	use crate::config::ParsingMode;
	use crate::id3::v2::frame::id::FrameId;
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::FrameFlags;
	use crate::util::text::TextEncoding;

	use std::io::Cursor;

	fn parse(body: &[u8], id: &str, version: Id3v2Version) -> TextInformationFrame {
		TextInformationFrame::parse(
			&mut Cursor::new(body),
			FrameId::parse(id),
			FrameFlags::default(),
			version,
			ParsingMode::BestAttempt,
		)
		.unwrap()
		.unwrap()
	}

	#[test_log::test]
	fn utf8_content() {
		let frame = parse(b"\x03Hello, \xE4\xB8\x96\xE7\x95\x8C", "TIT2", Id3v2Version::V4);
		assert_eq!(frame.value, "Hello, 世界");
	}

	#[test_log::test]
	fn utf16_bom_content() {
		let frame = parse(
			&[0x01, 0xFF, 0xFE, 0x41, 0x00, 0x42, 0x00],
			"TALB",
			Id3v2Version::V3,
		);
		assert_eq!(frame.value, "AB");
	}

	#[test_log::test]
	fn v23_slash_separation() {
		let frame = parse(b"\x00Alice/Bob", "TPE1", Id3v2Version::V3);
		assert_eq!(frame.values().collect::<Vec<_>>(), vec!["Alice", "Bob"]);

		// The same frame in ID3v2.4 uses NUL separators
		let frame = parse(b"\x00Alice\x00Bob", "TPE1", Id3v2Version::V4);
		assert_eq!(frame.values().collect::<Vec<_>>(), vec!["Alice", "Bob"]);

		// Only the artist family splits on '/'
		let frame = parse(b"\x00AC/DC", "TALB", Id3v2Version::V3);
		assert_eq!(frame.value, "AC/DC");
	}

	#[test_log::test]
	fn ascii_writes_latin1() {
		let frame = TextInformationFrame::new(FrameId::parse("TIT2"), "Hello");
		let bytes = frame.as_bytes();
		assert_eq!(bytes[0], TextEncoding::Latin1 as u8);
		assert_eq!(&bytes[1..], b"Hello");
	}

	#[test_log::test]
	fn non_ascii_writes_utf8() {
		let frame = TextInformationFrame::new(FrameId::parse("TIT2"), "caf\u{00e9}");
		let bytes = frame.as_bytes();
		assert_eq!(bytes[0], TextEncoding::UTF8 as u8);
		assert_eq!(&bytes[1..], "caf\u{00e9}".as_bytes());
	}

	#[test_log::test]
	fn numeric_filtering() {
		let frame = TextInformationFrame::new(FrameId::parse("TYER"), "1984");
		assert_eq!(frame.value, "1984");

		let frame = TextInformationFrame::new(FrameId::parse("TYER"), "nineteen84");
		assert_eq!(frame.value, "");

		// Elements are filtered individually
		let mut frame = TextInformationFrame::new(FrameId::parse("TBPM"), "");
		frame.set_values(["120", "fast", "121"]);
		assert_eq!(frame.value, "120\x00121");
	}

	#[test_log::test]
	fn content_trimming() {
		let frame = TextInformationFrame::new(FrameId::parse("TALB"), "A".repeat(64));
		let bytes = frame.as_bytes_limited(33);
		assert_eq!(bytes.len(), 33);
		assert_eq!(&bytes[1..], "A".repeat(32).as_bytes());
	}
}
