pub(crate) mod content;
pub(crate) mod id;
pub(crate) mod read;

use super::header::Id3v2Version;
use super::items::{
	AttachedPictureFrame, BinaryFrame, DescriptiveTextFrame, EventTimingCodesFrame,
	PlayCounterFrame, PopularimeterFrame, TextInformationFrame, UrlLinkFrame,
};
use super::util::synchsafe::encode_int;
use super::{FRAME_HEADER_SIZE, MAX_TAG_SIZE};
use crate::error::Result;
use crate::macros::err;
use id::{FrameCategory, FrameId};

/// Information shared by every frame variant
///
/// Alongside the ID and flags, this captures the frame's provenance: the
/// ID3v2 version it was read from, the raw bytes as they appeared in the
/// source, and whether the frame has been edited since. Frames read from an
/// ID3v2.4 source re-emit their captured bytes verbatim until edited.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameHeader {
	/// The frame ID
	pub id: FrameId,
	/// The frame flags
	pub flags: FrameFlags,
	pub(crate) version: Id3v2Version,
	pub(crate) raw: Option<Vec<u8>>,
	pub(crate) edited: bool,
}

impl FrameHeader {
	/// Create a new `FrameHeader` for a caller constructed frame
	pub fn new(id: FrameId, flags: FrameFlags) -> Self {
		Self {
			id,
			flags,
			version: Id3v2Version::V4,
			raw: None,
			edited: true,
		}
	}

	// A header for a frame captured from a byte source
	pub(crate) fn parsed(
		id: FrameId,
		flags: FrameFlags,
		version: Id3v2Version,
		raw: Option<Vec<u8>>,
	) -> Self {
		Self {
			id,
			flags,
			version,
			raw,
			edited: false,
		}
	}

	pub(crate) fn mark_edited(&mut self) {
		self.edited = true;
	}
}

macro_rules! define_frames {
	(
		$(#[$meta:meta])*
		pub enum Frame {
			$(
				$(#[$field_meta:meta])+
				$variant:ident($type:ty),
			)*
		}
	) => {
		$(#[$meta])*
		pub enum Frame {
			$(
				$(#[$field_meta])+
				$variant($type),
			)*
		}

		impl Frame {
			/// Get the ID of the frame
			pub fn id(&self) -> &FrameId {
				match self {
					$(
						Frame::$variant(frame) => &frame.header.id,
					)*
				}
			}

			/// Get the flags for the frame
			pub fn flags(&self) -> FrameFlags {
				match self {
					$(
						Frame::$variant(frame) => frame.header.flags,
					)*
				}
			}

			/// Set the flags for the frame
			pub fn set_flags(&mut self, flags: FrameFlags) {
				match self {
					$(
						Frame::$variant(frame) => frame.header.flags = flags,
					)*
				}
			}

			pub(crate) fn header(&self) -> &FrameHeader {
				match self {
					$(
						Frame::$variant(frame) => &frame.header,
					)*
				}
			}

			pub(crate) fn header_mut(&mut self) -> &mut FrameHeader {
				match self {
					$(
						Frame::$variant(frame) => &mut frame.header,
					)*
				}
			}
		}

		$(
			impl From<$type> for Frame {
				fn from(value: $type) -> Self {
					Frame::$variant(value)
				}
			}
		)*
	}
}

define_frames! {
	/// Represents an `ID3v2` frame
	///
	/// The variant is chosen by the [`FrameCategory`] of the frame's ID.
	/// ID3v2.2 frames are upgraded to their ID3v2.4 IDs before a variant is
	/// chosen, so 3 character IDs never appear here.
	#[non_exhaustive]
	#[derive(Clone, Debug, PartialEq)]
	pub enum Frame {
		/// Represents a "T..." (excluding TXXX) frame
		Text(TextInformationFrame),
		/// Represents a "COMM", "USLT", "USER", "TXXX", or "WXXX" frame
		Descriptive(DescriptiveTextFrame),
		/// Represents a "W..." (excluding WXXX) frame
		Url(UrlLinkFrame),
		/// Represents an "APIC" or upgraded "PIC" frame
		Picture(AttachedPictureFrame),
		/// Represents a "PCNT" frame
		PlayCounter(PlayCounterFrame),
		/// Represents a "POPM" frame
		Popularimeter(PopularimeterFrame),
		/// Represents an "ETCO" frame
		EventTimingCodes(EventTimingCodesFrame),
		/// Binary data
		///
		/// This is used for frames the crate does not parse further (SYLT,
		/// GEOB, PRIV, …), and as the fallback for frames whose bodies could
		/// not be parsed. In both cases the payload survives a rewrite
		/// untouched.
		Binary(BinaryFrame),
	}
}

impl Frame {
	/// Extract the string from the [`FrameId`]
	pub fn id_str(&self) -> &str {
		self.id().as_str()
	}

	/// How this frame's body is laid out
	pub fn category(&self) -> FrameCategory {
		self.id().category()
	}

	/// Whether the frame's body could not be parsed
	///
	/// A null frame preserves its raw payload and answers accessors with
	/// neutral values. A [`Frame::Binary`] carrying an ID the registry knows
	/// how to parse is a parse failure; an unrecognized MIME type nulls a
	/// picture frame.
	pub fn is_null(&self) -> bool {
		match self {
			Frame::Picture(picture) => picture.is_null(),
			Frame::Binary(binary) => binary.is_null(),
			_ => false,
		}
	}

	/// Check for empty content
	///
	/// Returns `None` if emptiness is undefined for the frame type.
	pub fn is_empty(&self) -> Option<bool> {
		let is_empty = match self {
			Frame::Text(text) => text.value.is_empty(),
			Frame::Descriptive(descriptive) => descriptive.content.is_empty(),
			Frame::Url(link) => link.content.is_empty(),
			Frame::Picture(picture) => picture.data.is_empty(),
			Frame::EventTimingCodes(event_timing) => event_timing.events.is_empty(),
			Frame::Binary(binary) => binary.data.is_empty(),
			Frame::PlayCounter(_) | Frame::Popularimeter(_) => {
				// Undefined.
				return None;
			},
		};
		Some(is_empty)
	}

	/// A human readable, single line description of the frame for debugging
	pub fn print(&self) -> String {
		let id = self.id();
		match self {
			Frame::Text(text) => format!("{id} ({}): {}", id.description(), text.value),
			Frame::Descriptive(descriptive) => format!(
				"{id} ({}): {}",
				id.description(),
				descriptive.content
			),
			Frame::Url(link) => format!("{id} ({}): {}", id.description(), link.content),
			Frame::Picture(picture) => format!(
				"{id} ({}): <{} bytes>",
				id.description(),
				picture.data.len()
			),
			Frame::PlayCounter(counter) => {
				format!("{id} ({}): {}", id.description(), counter.counter)
			},
			Frame::Popularimeter(popm) => format!(
				"{id} ({}): {} rated {} played {}",
				id.description(),
				popm.email,
				popm.rating,
				popm.counter
			),
			Frame::EventTimingCodes(event_timing) => format!(
				"{id} ({}): {} events",
				id.description(),
				event_timing.events.len()
			),
			Frame::Binary(binary) => {
				format!("{id} ({}): <{} bytes>", id.description(), binary.data.len())
			},
		}
	}

	pub(crate) fn mark_edited(&mut self) {
		self.header_mut().mark_edited();
	}

	// The frame body, excluding the 10 byte header
	pub(crate) fn as_bytes(&self) -> Result<Vec<u8>> {
		Ok(match self {
			Frame::Text(tif) => tif.as_bytes(),
			Frame::Descriptive(descriptive) => descriptive.as_bytes(),
			Frame::Url(link) => link.as_bytes(),
			Frame::Picture(attached_picture) => attached_picture.as_bytes()?,
			Frame::PlayCounter(counter) => counter.as_bytes(),
			Frame::Popularimeter(popularimeter) => popularimeter.as_bytes(),
			Frame::EventTimingCodes(event_timing) => event_timing.as_bytes(),
			Frame::Binary(binary) => binary.as_bytes(),
		})
	}

	/// Produce the complete frame bytes: a 10 byte ID3v2.4 header followed by the body
	///
	/// An unedited frame read from an ID3v2.4 source re-emits its captured
	/// bytes. Everything else is serialized fresh, with the size written
	/// synchsafe and over-long text content trimmed to fit the hard frame
	/// size ceiling.
	pub fn write(&self) -> Result<Vec<u8>> {
		self.write_limited(MAX_TAG_SIZE as usize)
	}

	pub(crate) fn write_limited(&self, max_frame_size: usize) -> Result<Vec<u8>> {
		let header = self.header();
		if !header.edited && header.version == Id3v2Version::V4 {
			if let Some(raw) = &header.raw {
				return Ok(raw.clone());
			}
		}

		let mut body = self.as_bytes()?;
		if body.len() + FRAME_HEADER_SIZE > max_frame_size {
			body = self.trimmed_body(max_frame_size - FRAME_HEADER_SIZE)?;
		}

		let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + body.len());
		out.extend_from_slice(self.id().as_str().as_bytes());
		out.extend(encode_int(body.len() as u64, 4, true));
		out.extend_from_slice(&self.flags().as_id3v24_bytes().to_be_bytes());
		out.append(&mut body);
		Ok(out)
	}

	fn trimmed_body(&self, max_body: usize) -> Result<Vec<u8>> {
		match self {
			Frame::Text(tif) => Ok(tif.as_bytes_limited(max_body)),
			Frame::Descriptive(descriptive) => Ok(descriptive.as_bytes_limited(max_body)),
			_ => err!(TooMuchData),
		}
	}
}

/// Various flags to describe the content of an item
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Discard the frame on tag alteration if it is unknown
	pub tag_alter_preservation: bool,
	/// Discard the frame on file alteration
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The frame belongs to a group
	pub grouping_identity: bool,
	/// Frame is zlib compressed
	///
	/// Compressed bodies are preserved as opaque [`Frame::Binary`] payloads.
	pub compression: bool,
	/// Frame is encrypted
	///
	/// Encrypted bodies are preserved as opaque [`Frame::Binary`] payloads.
	pub encryption: bool,
	/// Frame is unsynchronised
	pub unsynchronisation: bool,
	/// Frame has a data length indicator
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 != 0,
			file_alter_preservation: flags & 0x2000 != 0,
			read_only: flags & 0x1000 != 0,
			grouping_identity: flags & 0x0040 != 0,
			compression: flags & 0x0008 != 0,
			encryption: flags & 0x0004 != 0,
			unsynchronisation: flags & 0x0002 != 0,
			data_length_indicator: flags & 0x0001 != 0,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 != 0,
			file_alter_preservation: flags & 0x4000 != 0,
			read_only: flags & 0x2000 != 0,
			grouping_identity: flags & 0x0020 != 0,
			compression: flags & 0x0080 != 0,
			encryption: flags & 0x0040 != 0,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}

	/// Get the ID3v2.4 byte representation of the flags
	pub fn as_id3v24_bytes(&self) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		if self.tag_alter_preservation {
			flags |= 0x4000;
		}

		if self.file_alter_preservation {
			flags |= 0x2000;
		}

		if self.read_only {
			flags |= 0x1000;
		}

		if self.grouping_identity {
			flags |= 0x0040;
		}

		if self.compression {
			flags |= 0x0008;
		}

		if self.encryption {
			flags |= 0x0004;
		}

		if self.unsynchronisation {
			flags |= 0x0002;
		}

		if self.data_length_indicator {
			flags |= 0x0001;
		}

		flags
	}
}
