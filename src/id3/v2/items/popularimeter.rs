use crate::error::Result;
use crate::id3::v2::frame::id::KnownFrameId;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader};
use crate::util::text::{decode_text, TextDecodeOptions, TextEncoding};

use std::io::Read;

use byteorder::ReadBytesExt;

/// The contents of a popularimeter ("POPM") frame
///
/// A tag can contain multiple "POPM" frames, but there must only be
/// one with the same email address.
#[derive(Clone, Debug, Eq)]
pub struct PopularimeterFrame {
	pub(crate) header: FrameHeader,
	/// An email address of the user performing the rating
	pub email: String,
	/// A rating of 1-255, where 1 is the worst and 255 is the best.
	/// A rating of 0 is unknown.
	///
	/// See [`Self::stars`] for the conventional 5 star bucketing.
	pub rating: u8,
	/// A play counter for the user. It is to be incremented each time the file is played.
	pub counter: u64,
}

impl PartialEq for PopularimeterFrame {
	fn eq(&self, other: &Self) -> bool {
		self.email == other.email && self.rating == other.rating && self.counter == other.counter
	}
}

impl PopularimeterFrame {
	/// Create a new [`PopularimeterFrame`]
	pub fn new(email: impl Into<String>, rating: u8, counter: u64) -> Self {
		let header = FrameHeader::new(KnownFrameId::Popm.into(), FrameFlags::default());
		Self {
			header,
			email: email.into(),
			rating,
			counter,
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> KnownFrameId {
		KnownFrameId::Popm
	}

	/// The rating as a 0-5 star value
	///
	/// The breakpoints are the ones established by the ID3v1-era players:
	///
	/// | rating | stars |
	/// |---|---|
	/// | 0 | 0 |
	/// | 1-31 | 1 |
	/// | 32-95 | 2 |
	/// | 96-159 | 3 |
	/// | 160-223 | 4 |
	/// | 224-255 | 5 |
	pub fn stars(&self) -> u8 {
		match self.rating {
			0 => 0,
			1..=31 => 1,
			32..=95 => 2,
			96..=159 => 3,
			160..=223 => 4,
			224..=255 => 5,
		}
	}

	/// Convert ID3v2 POPM frame bytes into a [`PopularimeterFrame`].
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * `reader` doesn't contain enough data
	pub fn parse<R>(
		reader: &mut R,
		frame_flags: FrameFlags,
		version: Id3v2Version,
	) -> Result<Self>
	where
		R: Read,
	{
		let email = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		)?;
		let rating = reader.read_u8()?;

		let mut counter_content = Vec::new();
		reader.read_to_end(&mut counter_content)?;

		let counter;
		let remaining_size = counter_content.len();
		if remaining_size > 8 {
			counter = u64::MAX;
		} else {
			let mut counter_bytes = [0; 8];
			let counter_start_pos = 8 - remaining_size;

			counter_bytes[counter_start_pos..].copy_from_slice(&counter_content);
			counter = u64::from_be_bytes(counter_bytes);
		}

		let header = FrameHeader::parsed(
			KnownFrameId::Popm.into(),
			frame_flags,
			version,
			None,
		);
		Ok(Self {
			header,
			email: email.content,
			rating,
			counter,
		})
	}

	/// Convert a [`PopularimeterFrame`] into an ID3v2 POPM frame byte Vec
	///
	/// NOTE: This does not include a frame header
	pub(crate) fn as_bytes(&self) -> Vec<u8> {
		let mut content = Vec::with_capacity(self.email.len() + 9);
		content.extend(TextEncoding::Latin1.encode(&self.email, true));
		content.push(self.rating);

		// When the counter reaches all one's, one byte is inserted in front of the counter
		// thus making the counter eight bits bigger in the same way as the play counter ("PCNT")
		//
		// $xx xx xx xx (xx ...)
		if let Ok(counter) = u32::try_from(self.counter) {
			content.extend(counter.to_be_bytes());
		} else {
			let counter_bytes = self.counter.to_be_bytes();
			let i = counter_bytes.iter().position(|b| *b != 0).unwrap_or(4);

			content.extend(&counter_bytes[i..]);
		}

		content
	}
}
