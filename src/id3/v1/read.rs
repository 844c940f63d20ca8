use super::tag::{Id3v1ExtendedTag, Id3v1Tag};
use super::{
	GENRES, ID3V1_EXTENDED_TAG_MARKER, ID3V1_EXTENDED_TAG_SIZE, ID3V1_TAG_MARKER, ID3V1_TAG_SIZE,
};
use crate::error::Result;
use crate::macros::err;
use crate::util::text::latin1_decode;

impl Id3v1Tag {
	/// Parse a 128 byte ID3v1 trailer
	///
	/// # Errors
	///
	/// * The block does not start with `TAG`
	pub fn parse(reader: [u8; ID3V1_TAG_SIZE]) -> Result<Self> {
		let mut tag = Self::new();

		if reader[..3] != ID3V1_TAG_MARKER {
			err!(FakeTag);
		}

		let reader = &reader[3..];

		tag.title = decode_text(&reader[..30]);
		tag.artist = decode_text(&reader[30..60]);
		tag.album = decode_text(&reader[60..90]);
		tag.year = decode_year(&reader[90..94]);

		// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
		// We check for the null terminator 28 bytes in, and for a non-zero track number after it.
		// A track number of 0 is invalid.
		let range = if reader[122] == 0 && reader[123] != 0 {
			tag.track_number = Some(reader[123]);

			94_usize..122
		} else {
			94..124
		};

		tag.comment = decode_text(&reader[range]);

		if (reader[124] as usize) < GENRES.len() {
			tag.genre = Some(reader[124]);
		}

		Ok(tag)
	}
}

impl Id3v1ExtendedTag {
	/// Parse a 227 byte ID3v1-Extended block
	///
	/// # Errors
	///
	/// * The block does not start with `TAG+`
	pub fn parse(reader: [u8; ID3V1_EXTENDED_TAG_SIZE]) -> Result<Self> {
		let mut tag = Self::new();

		if reader[..4] != ID3V1_EXTENDED_TAG_MARKER {
			err!(FakeTag);
		}

		let reader = &reader[4..];

		tag.title = decode_text(&reader[..60]);
		tag.artist = decode_text(&reader[60..120]);
		tag.album = decode_text(&reader[120..180]);

		if (1..=4).contains(&reader[180]) {
			tag.speed = Some(reader[180]);
		}

		tag.genre = decode_text(&reader[181..211]);
		tag.start_time = decode_text(&reader[211..217]);
		tag.end_time = decode_text(&reader[217..223]);

		Ok(tag)
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	let mut first_null_pos = data.len();
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if null_pos == 0 {
			return None;
		}

		if data[null_pos..].iter().any(|b| *b != b'\0') {
			log::warn!("ID3v1 text field contains trailing junk, skipping");
		}

		first_null_pos = null_pos;
	}

	Some(latin1_decode(&data[..first_null_pos]))
}

fn decode_year(input: &[u8]) -> Option<String> {
	if input.iter().all(|c| c.is_ascii_digit()) {
		// Most writers store "\0\0\0\0" rather than "0000" for empty years,
		// which `decode_text` maps to `None`
		return decode_text(input);
	}

	None
}

#[cfg(test)]
mod tests {
	use crate::id3::v1::tag::{Id3v1ExtendedTag, Id3v1Tag};
	use crate::id3::v1::{ID3V1_EXTENDED_TAG_SIZE, ID3V1_TAG_SIZE};

	fn v1_block(
		title: &str,
		artist: &str,
		comment_tail: [u8; 2],
		genre: u8,
	) -> [u8; ID3V1_TAG_SIZE] {
		let mut block = [0_u8; ID3V1_TAG_SIZE];
		block[..3].copy_from_slice(b"TAG");
		block[3..3 + title.len()].copy_from_slice(title.as_bytes());
		block[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
		block[125..127].copy_from_slice(&comment_tail);
		block[127] = genre;
		block
	}

	#[test_log::test]
	fn v1_fields() {
		let tag = Id3v1Tag::parse(v1_block("Hello", "World", [0, 0], 17)).unwrap();
		assert_eq!(tag.title.as_deref(), Some("Hello"));
		assert_eq!(tag.artist.as_deref(), Some("World"));
		assert_eq!(tag.album, None);
		assert_eq!(tag.genre, Some(17));
		assert_eq!(tag.genre_str(), Some("Rock"));
		assert!(!tag.is_v11());
	}

	#[test_log::test]
	fn v11_track_number() {
		let tag = Id3v1Tag::parse(v1_block("Hello", "World", [0, 7], 17)).unwrap();
		assert_eq!(tag.track_number, Some(7));
		assert!(tag.is_v11());
	}

	#[test_log::test]
	fn out_of_range_genre() {
		let tag = Id3v1Tag::parse(v1_block("Hello", "World", [0, 0], 250)).unwrap();
		assert_eq!(tag.genre, None);
	}

	#[test_log::test]
	fn missing_marker() {
		assert!(Id3v1Tag::parse([0; ID3V1_TAG_SIZE]).is_err());
	}

	#[test_log::test]
	fn extended_fields() {
		let mut block = [0_u8; ID3V1_EXTENDED_TAG_SIZE];
		block[..4].copy_from_slice(b"TAG+");
		block[4..23].copy_from_slice(b"A Much Longer Title");
		block[184] = 2;
		block[185..196].copy_from_slice(b"Stoner Rock");
		block[215..221].copy_from_slice(b"000:00");

		let tag = Id3v1ExtendedTag::parse(block).unwrap();
		assert_eq!(tag.title.as_deref(), Some("A Much Longer Title"));
		assert_eq!(tag.speed, Some(2));
		assert_eq!(tag.genre.as_deref(), Some("Stoner Rock"));
		assert_eq!(tag.start_time.as_deref(), Some("000:00"));
		assert_eq!(tag.end_time, None);
	}
}
