use super::tag::Id3v2Tag;
use super::util::synchsafe::encode_int;
use super::{MAX_TAG_SIZE, SUPPORTED_MINOR_VERSION, TAG_HEADER_SIZE, WRITE_VERSION};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::macros::err;

/// Serialize a tag as a complete ID3v2.4 byte block
///
/// An empty tag produces no bytes at all, implying the tag should be
/// stripped.
pub(crate) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	if tag.frames.is_empty() {
		return Ok(Vec::new());
	}

	log::debug!("Serializing {} frames as ID3v2.4", tag.frames.len());

	let mut frame_bytes = Vec::new();
	for frame in &tag.frames {
		frame_bytes.extend(frame.write()?);
	}

	// Pad the frame region out to the requested minimum
	if let Some(preferred_padding) = write_options.preferred_padding {
		let padded_len = frame_bytes.len().max(preferred_padding as usize);
		frame_bytes.resize(padded_len, 0);
	}

	if frame_bytes.len() > MAX_TAG_SIZE as usize {
		err!(TooMuchData);
	}

	let mut id3v2 = Vec::with_capacity(TAG_HEADER_SIZE + frame_bytes.len());
	id3v2.extend_from_slice(b"ID3");
	id3v2.push(WRITE_VERSION);
	id3v2.push(SUPPORTED_MINOR_VERSION);
	id3v2.push(tag.flags().as_id3v24_byte());
	id3v2.extend(encode_int(frame_bytes.len() as u64, 4, true));
	id3v2.append(&mut frame_bytes);

	Ok(id3v2)
}

#[cfg(test)]
mod tests {
	use crate::config::WriteOptions;
	use crate::id3::v2::tag::Id3v2Tag;

	#[test_log::test]
	fn empty_tag_writes_nothing()  {
		let tag = Id3v2Tag::new();
		assert!(tag.as_bytes(WriteOptions::default()).unwrap().is_empty());
	}

	#[test_log::test]
	fn header_layout() {
		let mut tag = Id3v2Tag::new();
		tag.set_title("Hi");

		let bytes = tag.as_bytes(WriteOptions::default()).unwrap();
		assert_eq!(&bytes[..3], b"ID3");
		assert_eq!(bytes[3], 4);
		assert_eq!(bytes[4], 0);
		assert_eq!(bytes[5], 0);

		// 10 byte frame header + encoding byte + "Hi"
		assert_eq!(&bytes[6..10], &[0, 0, 0, 13]);
		assert_eq!(bytes.len(), 10 + 13);
	}

	#[test_log::test]
	fn padding_to_minimum() {
		let mut tag = Id3v2Tag::new();
		tag.set_title("Hi");

		let bytes = tag
			.as_bytes(WriteOptions::new().preferred_padding(64))
			.unwrap();
		assert_eq!(bytes.len(), 10 + 64);
		assert!(bytes[10 + 13..].iter().all(|&b| b == 0));
	}
}
