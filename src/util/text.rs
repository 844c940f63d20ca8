use crate::error::Result;

use std::io::Read;

use byteorder::ReadBytesExt;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	pub(crate) fn verify_latin1(text: &str) -> bool {
		text.chars().all(|c| c as u32 <= 255)
	}

	pub(crate) fn encode(self, text: &str, terminated: bool) -> Vec<u8> {
		match self {
			TextEncoding::Latin1 => {
				let mut out = latin1_encode(text).collect::<Vec<u8>>();
				if terminated {
					out.push(0);
				}

				out
			},
			TextEncoding::UTF16 => utf16_encode(text, u16::to_le_bytes, true, terminated),
			TextEncoding::UTF16BE => utf16_encode(text, u16::to_be_bytes, false, terminated),
			TextEncoding::UTF8 => {
				let mut out = text.as_bytes().to_vec();

				if terminated {
					out.push(0);
				}

				out
			},
		}
	}
}

#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodeTextResult {
	pub(crate) content: String,
	pub(crate) bytes_read: usize,
	pub(crate) bom: [u8; 2],
}

impl DecodeTextResult {
	pub(crate) fn text_or_none(self) -> Option<String> {
		if self.content.is_empty() {
			return None;
		}

		Some(self.content)
	}
}

/// Specify how to decode the provided text
///
/// By default, this will:
///
/// * Use [`TextEncoding::UTF8`] as the encoding
/// * Not expect the text to be null terminated
/// * Have no byte order mark
#[derive(Copy, Clone, Debug)]
pub(crate) struct TextDecodeOptions {
	pub encoding: TextEncoding,
	pub terminated: bool,
	pub bom: [u8; 2],
}

impl TextDecodeOptions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn encoding(mut self, encoding: TextEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub(crate) fn terminated(mut self, terminated: bool) -> Self {
		self.terminated = terminated;
		self
	}

	pub(crate) fn bom(mut self, bom: [u8; 2]) -> Self {
		self.bom = bom;
		self
	}
}

impl Default for TextDecodeOptions {
	fn default() -> Self {
		Self {
			encoding: TextEncoding::UTF8,
			terminated: false,
			bom: [0, 0],
		}
	}
}

pub(crate) fn decode_text<R>(reader: &mut R, options: TextDecodeOptions) -> Result<DecodeTextResult>
where
	R: Read,
{
	let raw_bytes;
	let bytes_read;

	if options.terminated {
		let (bytes, terminator_len) = read_to_terminator(reader, options.encoding);

		if bytes.is_empty() {
			return Ok(DecodeTextResult {
				bytes_read: terminator_len,
				..DecodeTextResult::default()
			});
		}

		bytes_read = bytes.len() + terminator_len;
		raw_bytes = bytes;
	} else {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes)?;

		if bytes.is_empty() {
			return Ok(DecodeTextResult::default());
		}

		bytes_read = bytes.len();
		raw_bytes = bytes;
	}

	let mut bom = [0, 0];
	let read_string = match options.encoding {
		TextEncoding::Latin1 => latin1_decode(&raw_bytes),
		TextEncoding::UTF16 => {
			if raw_bytes.len() < 2 {
				return Ok(DecodeTextResult {
					bytes_read,
					..DecodeTextResult::default()
				});
			}

			match [raw_bytes[0], raw_bytes[1]] {
				[0xFE, 0xFF] => {
					bom = [0xFE, 0xFF];
					utf16_decode_bytes(&raw_bytes[2..], u16::from_be_bytes)
				},
				[0xFF, 0xFE] => {
					bom = [0xFF, 0xFE];
					utf16_decode_bytes(&raw_bytes[2..], u16::from_le_bytes)
				},
				// No byte order mark of its own. Some encoders only write a BOM on
				// the first string of a frame, so fall back to the caller provided
				// one, and failing that assume big endian.
				_ => {
					bom = options.bom;
					if bom == [0xFF, 0xFE] {
						utf16_decode_bytes(&raw_bytes, u16::from_le_bytes)
					} else {
						utf16_decode_bytes(&raw_bytes, u16::from_be_bytes)
					}
				},
			}
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(raw_bytes.as_slice(), u16::from_be_bytes),
		TextEncoding::UTF8 => utf8_decode(raw_bytes)?,
	};

	Ok(DecodeTextResult {
		content: read_string,
		bytes_read,
		bom,
	})
}

pub(crate) fn read_to_terminator<R>(reader: &mut R, encoding: TextEncoding) -> (Vec<u8>, usize)
where
	R: Read,
{
	let mut text_bytes = Vec::new();
	let mut terminator_len = 0;

	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			while let Ok(byte) = reader.read_u8() {
				if byte == 0 {
					terminator_len = 1;
					break;
				}

				text_bytes.push(byte);
			}
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			// The terminator must be aligned to a 2-byte code unit boundary, so a lone
			// NUL inside a code unit never ends the scan
			while let (Ok(b1), Ok(b2)) = (reader.read_u8(), reader.read_u8()) {
				if b1 == 0 && b2 == 0 {
					terminator_len = 2;
					break;
				}

				text_bytes.push(b1);
				text_bytes.push(b2);
			}
		},
	}

	(text_bytes, terminator_len)
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| *c as char).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn latin1_encode(s: &str) -> impl Iterator<Item = u8> + '_ {
	// Out-of-range characters collapse to '?', the caller is expected to
	// have chosen Latin-1 only for content it can represent
	s.chars().map(|c| {
		if (c as u32) <= 255 {
			c as u8
		} else {
			b'?'
		}
	})
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(Into::into)
}

pub(crate) fn utf16_decode(words: &[u16]) -> String {
	let mut text = match String::from_utf16(words) {
		Ok(text) => text,
		Err(_) => {
			log::warn!("Invalid UTF-16 string, decoding lossily");
			String::from_utf16_lossy(words)
		},
	};

	trim_end_nulls(&mut text);
	text
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> String {
	if bytes.len() < 2 {
		return String::new();
	}

	if bytes.len() % 2 != 0 {
		log::warn!("UTF-16 string has an odd length, discarding the trailing byte");
	}

	// `chunks_exact` drops any trailing half code unit
	let unverified: Vec<u16> = bytes
		.chunks_exact(2)
		// In ID3v2, it is possible to have multiple UTF-16 strings separated by null.
		// This also makes it possible for us to encounter multiple BOMs in a single string.
		// We must filter them out.
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			_ => Some(endianness(c.try_into().unwrap())), // Infallible
		})
		.collect();

	utf16_decode(&unverified)
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}

#[cfg(test)]
mod tests {
	use super::{TextDecodeOptions, TextEncoding};
	use std::io::Cursor;

	const TEST_STRING: &str = "l\u{00f8}ft\u{00a5}";

	#[test_log::test]
	fn text_decode() {
		// No BOM
		let utf16_decode = super::utf16_decode_bytes(
			&[
				0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00,
			],
			u16::from_be_bytes,
		);

		assert_eq!(utf16_decode, TEST_STRING.to_string());

		// BOM test
		let be_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFE, 0xFF, 0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();
		let le_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFF, 0xFE, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();

		assert_eq!(be_utf16_decode.content, le_utf16_decode.content);
		assert_eq!(be_utf16_decode.bytes_read, le_utf16_decode.bytes_read);
		assert_eq!(be_utf16_decode.content, TEST_STRING.to_string());

		let utf8_decode = super::decode_text(
			&mut TEST_STRING.as_bytes(),
			TextDecodeOptions::new().encoding(TextEncoding::UTF8),
		)
		.unwrap();

		assert_eq!(utf8_decode.content, TEST_STRING.to_string());
	}

	#[test_log::test]
	fn text_encode() {
		let be_utf16_encode = TextEncoding::UTF16BE.encode(TEST_STRING, false);
		let le_utf16_encode = TextEncoding::UTF16.encode(TEST_STRING, false);

		// TextEncoding::UTF16BE has no BOM
		assert_eq!(
			be_utf16_encode.as_slice(),
			&[0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5]
		);
		assert_eq!(
			le_utf16_encode.as_slice(),
			&[
				0xFF, 0xFE, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00
			]
		);

		let utf8_encode = TextEncoding::UTF8.encode(TEST_STRING, false);
		assert_eq!(utf8_encode.as_slice(), TEST_STRING.as_bytes());
	}

	#[test_log::test]
	fn utf16_odd_length() {
		// The trailing half code unit is discarded
		let decoded = super::utf16_decode_bytes(&[0x00, 0x41, 0x00, 0x42, 0x00], u16::from_be_bytes);
		assert_eq!(decoded, "AB");
	}

	#[test_log::test]
	fn utf16_too_short() {
		assert_eq!(super::utf16_decode_bytes(&[0x41], u16::from_be_bytes), "");
		assert_eq!(super::utf16_decode_bytes(&[], u16::from_be_bytes), "");
	}

	#[test_log::test]
	fn latin1_to_utf8() {
		// 0xE9 ("é") must become the two byte UTF-8 sequence 0xC3 0xA9
		let decoded = super::latin1_decode(&[0x63, 0x61, 0x66, 0xE9]);
		assert_eq!(decoded, "caf\u{00e9}");
		assert_eq!(decoded.as_bytes(), &[0x63, 0x61, 0x66, 0xC3, 0xA9]);
	}

	#[test_log::test]
	fn terminated_utf16_unaligned_null() {
		// A lone NUL inside a code unit must not end the scan; only an aligned
		// NUL-NUL pair does
		let mut reader = Cursor::new(vec![
			0xFE, 0xFF, 0x04, 0x00, 0x00, 0x41, 0x00, 0x00, 0xFF, 0xFF,
		]);
		let (bytes, terminator_len) = super::read_to_terminator(&mut reader, TextEncoding::UTF16);
		assert_eq!(bytes, vec![0xFE, 0xFF, 0x04, 0x00, 0x00, 0x41]);
		assert_eq!(terminator_len, 2);
	}
}
