use crate::error::Result;
use crate::id3::v2::frame::id::{FrameCategory, FrameId};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader};

use std::io::Read;

/// A binary fallback for all unknown `ID3v2` frames
///
/// This doubles as the *null* frame: when a known frame's body cannot be
/// parsed, its payload is preserved here so a rewrite keeps the original
/// bytes.
#[derive(Clone, Debug, Eq)]
pub struct BinaryFrame {
	pub(crate) header: FrameHeader,
	/// The binary data
	pub data: Vec<u8>,
}

impl PartialEq for BinaryFrame {
	fn eq(&self, other: &Self) -> bool {
		if self.header.id != other.header.id {
			return false;
		}

		// Two null frames with the same ID are equal regardless of payload
		if self.is_null() && other.is_null() {
			return true;
		}

		self.data == other.data
	}
}

impl BinaryFrame {
	/// Create a new [`BinaryFrame`]
	pub fn new(id: FrameId, data: Vec<u8>) -> Self {
		let header = FrameHeader::new(id, FrameFlags::default());
		Self { header, data }
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Whether this is a parse failure fallback rather than a genuinely opaque frame
	pub fn is_null(&self) -> bool {
		self.header.id.category() != FrameCategory::Unknown
	}

	/// Read a [`BinaryFrame`]
	///
	/// NOTE: This will exhaust the entire reader
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn parse<R>(
		reader: &mut R,
		id: FrameId,
		frame_flags: FrameFlags,
		version: Id3v2Version,
	) -> Result<Self>
	where
		R: Read,
	{
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let header = FrameHeader::parsed(id, frame_flags, version, None);
		Ok(BinaryFrame { header, data })
	}

	/// Convert a [`BinaryFrame`] to a byte vec
	pub(crate) fn as_bytes(&self) -> Vec<u8> {
		self.data.clone()
	}
}
