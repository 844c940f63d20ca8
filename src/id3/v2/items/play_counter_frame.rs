use crate::error::Result;
use crate::id3::v2::frame::id::KnownFrameId;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader};

use std::io::Read;

/// An `ID3v2` play counter frame ("PCNT")
///
/// The counter is written as at least 4 bytes, growing a byte at a time once
/// the value no longer fits.
#[derive(Clone, Debug, Eq)]
pub struct PlayCounterFrame {
	pub(crate) header: FrameHeader,
	/// The number of times the file has been played
	pub counter: u64,
}

impl PartialEq for PlayCounterFrame {
	fn eq(&self, other: &Self) -> bool {
		self.counter == other.counter
	}
}

impl PlayCounterFrame {
	/// Create a new [`PlayCounterFrame`]
	pub fn new(counter: u64) -> Self {
		let header = FrameHeader::new(KnownFrameId::Pcnt.into(), FrameFlags::default());
		Self { header, counter }
	}

	/// Get the ID for the frame
	pub fn id(&self) -> KnownFrameId {
		KnownFrameId::Pcnt
	}

	/// Increment the counter by one, saturating at [`u64::MAX`]
	pub fn increment(&mut self) {
		self.counter = self.counter.saturating_add(1);
		self.header.mark_edited();
	}

	/// Read a [`PlayCounterFrame`] from a reader
	///
	/// NOTE: This expects the frame header to have already been skipped
	pub fn parse<R>(
		reader: &mut R,
		frame_flags: FrameFlags,
		version: Id3v2Version,
	) -> Result<Self>
	where
		R: Read,
	{
		let mut counter_content = Vec::new();
		reader.read_to_end(&mut counter_content)?;

		let counter;
		let remaining_size = counter_content.len();
		if remaining_size > 8 {
			log::warn!("PCNT counter is wider than 8 bytes, saturating");
			counter = u64::MAX;
		} else {
			let mut counter_bytes = [0; 8];
			let counter_start_pos = 8 - remaining_size;

			counter_bytes[counter_start_pos..].copy_from_slice(&counter_content);
			counter = u64::from_be_bytes(counter_bytes);
		}

		let header = FrameHeader::parsed(
			KnownFrameId::Pcnt.into(),
			frame_flags,
			version,
			None,
		);
		Ok(Self { header, counter })
	}

	/// Convert a [`PlayCounterFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	pub(crate) fn as_bytes(&self) -> Vec<u8> {
		// When the counter reaches all one's, one byte is inserted in front
		// of the counter, making it one byte wider
		//
		// $xx xx xx xx (xx ...)
		if let Ok(counter) = u32::try_from(self.counter) {
			counter.to_be_bytes().to_vec()
		} else {
			let counter_bytes = self.counter.to_be_bytes();
			let i = counter_bytes.iter().position(|b| *b != 0).unwrap_or(4);

			counter_bytes[i..].to_vec()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::PlayCounterFrame;
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::FrameFlags;

	use std::io::Cursor;

	#[test_log::test]
	fn minimum_width() {
		let counter = PlayCounterFrame::new(1);
		assert_eq!(counter.as_bytes(), vec![0, 0, 0, 1]);
	}

	#[test_log::test]
	fn widens_past_u32() {
		let counter = PlayCounterFrame::new(u64::from(u32::MAX) + 1);
		assert_eq!(counter.as_bytes(), vec![1, 0, 0, 0, 0]);
	}

	#[test_log::test]
	fn narrow_and_wide_counters_parse() {
		let narrow = PlayCounterFrame::parse(
			&mut Cursor::new(&[0x02]),
			FrameFlags::default(),
			Id3v2Version::V4,
		)
		.unwrap();
		assert_eq!(narrow.counter, 2);

		let wide = PlayCounterFrame::parse(
			&mut Cursor::new(&[0x01, 0x00, 0x00, 0x00, 0x00]),
			FrameFlags::default(),
			Id3v2Version::V4,
		)
		.unwrap();
		assert_eq!(wide.counter, u64::from(u32::MAX) + 1);
	}
}
