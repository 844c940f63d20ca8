use crate::error::Result;
use crate::id3::v2::frame::id::FrameId;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader};
use crate::util::text::{decode_text, TextDecodeOptions, TextEncoding};

use std::io::Read;

/// An `ID3v2` URL frame
///
/// The content is always Latin-1 and the body carries no encoding byte.
#[derive(Clone, Debug, Eq)]
pub struct UrlLinkFrame {
	pub(crate) header: FrameHeader,
	pub(crate) content: String,
}

impl PartialEq for UrlLinkFrame {
	fn eq(&self, other: &Self) -> bool {
		self.header.id == other.header.id && self.content == other.content
	}
}

impl UrlLinkFrame {
	/// Create a new [`UrlLinkFrame`]
	pub fn new(id: FrameId, content: impl Into<String>) -> Self {
		UrlLinkFrame {
			header: FrameHeader::new(id, FrameFlags::default()),
			content: content.into(),
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Read an [`UrlLinkFrame`] from a reader
	///
	/// NOTE: This expects the frame header to have already been skipped
	pub fn parse<R>(
		reader: &mut R,
		id: FrameId,
		frame_flags: FrameFlags,
		version: Id3v2Version,
	) -> Result<Option<Self>>
	where
		R: Read,
	{
		let url = decode_text(
			reader,
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)?;
		if url.bytes_read == 0 {
			return Ok(None);
		}

		let header = FrameHeader::parsed(id, frame_flags, version, None);
		Ok(Some(UrlLinkFrame {
			header,
			content: url.content,
		}))
	}

	/// Convert an [`UrlLinkFrame`] to a byte vec
	pub(crate) fn as_bytes(&self) -> Vec<u8> {
		TextEncoding::Latin1.encode(&self.content, false)
	}

	/// Get the URL of the frame
	pub fn url(&self) -> &str {
		&self.content
	}

	/// Change the URL of the frame
	///
	/// This will return a `bool` indicating whether or not the URL provided is Latin-1
	pub fn set_url(&mut self, url: impl Into<String>) -> bool {
		let url = url.into();
		if TextEncoding::verify_latin1(&url) {
			self.content = url;
			self.header.mark_edited();
			return true;
		}

		false
	}
}

#[cfg(test)]
mod tests {
	use super::UrlLinkFrame;
	use crate::id3::v2::frame::id::FrameId;
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::FrameFlags;

	use std::io::Cursor;

	#[test_log::test]
	fn no_encoding_byte() {
		let frame = UrlLinkFrame::parse(
			&mut Cursor::new(b"https://example.com/audio"),
			FrameId::parse("WOAF"),
			FrameFlags::default(),
			Id3v2Version::V4,
		)
		.unwrap()
		.unwrap();

		assert_eq!(frame.url(), "https://example.com/audio");
		assert_eq!(frame.as_bytes(), b"https://example.com/audio");
	}

	#[test_log::test]
	fn set_url_verifies_latin1() {
		let mut frame = UrlLinkFrame::new(FrameId::parse("WOAF"), "https://example.com");
		assert!(frame.set_url("https://example.com/new"));
		assert!(!frame.set_url("https://例え.jp"));
		assert_eq!(frame.url(), "https://example.com/new");
	}
}
