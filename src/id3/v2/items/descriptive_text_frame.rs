use crate::config::ParsingMode;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::frame::id::{FrameId, KnownFrameId};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader, LANGUAGE_SIZE};
use crate::util::text::{decode_text, TextDecodeOptions, TextEncoding};

use std::io::Read;

use byteorder::ReadBytesExt;

// The layout options of a descriptive frame, fixed per frame ID
#[derive(Copy, Clone, Debug, Default)]
struct DescriptiveOptions {
	has_language: bool,
	latin1_content: bool,
	no_description: bool,
}

fn options_for(id: &FrameId) -> DescriptiveOptions {
	match id {
		FrameId::Known(KnownFrameId::Comm | KnownFrameId::Uslt) => DescriptiveOptions {
			has_language: true,
			..DescriptiveOptions::default()
		},
		FrameId::Known(KnownFrameId::User) => DescriptiveOptions {
			has_language: true,
			no_description: true,
			..DescriptiveOptions::default()
		},
		FrameId::Known(KnownFrameId::Wxxx) => DescriptiveOptions {
			latin1_content: true,
			..DescriptiveOptions::default()
		},
		_ => DescriptiveOptions::default(),
	}
}

/// An `ID3v2` text frame carrying an optional language and description
///
/// This covers the "COMM", "USLT", "USER", "TXXX", and "WXXX" frames. Which
/// of the fields a frame carries is fixed by its ID: comments and lyrics
/// have a language, terms of use have a language but no description, and
/// user defined URLs store their content as Latin-1.
#[derive(Clone, Debug, Eq)]
pub struct DescriptiveTextFrame {
	pub(crate) header: FrameHeader,
	/// The encoding the description and content were stored in
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes), if the frame carries one
	pub language: Option<[u8; LANGUAGE_SIZE]>,
	/// Unique content description
	pub description: Option<String>,
	/// The actual frame content
	pub content: String,
}

impl PartialEq for DescriptiveTextFrame {
	fn eq(&self, other: &Self) -> bool {
		self.header.id == other.header.id
			&& self.language == other.language
			&& self.description == other.description
			&& self.content == other.content
	}
}

impl DescriptiveTextFrame {
	/// Create a new [`DescriptiveTextFrame`]
	pub fn new(id: FrameId, description: Option<String>, content: impl Into<String>) -> Self {
		let header = FrameHeader::new(id, FrameFlags::default());
		Self {
			header,
			encoding: TextEncoding::UTF8,
			language: None,
			description,
			content: content.into(),
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.header.id
	}

	/// Replace the content of the frame
	pub fn set_content(&mut self, content: impl Into<String>) {
		self.content = content.into();
		self.header.mark_edited();
	}

	/// Set the ISO-639-2 language code
	pub fn set_language(&mut self, language: [u8; LANGUAGE_SIZE]) {
		self.language = Some(language);
		self.header.mark_edited();
	}

	/// Read a [`DescriptiveTextFrame`] from a reader
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The frame is too short to hold its language
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
		let options = options_for(&id);

		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version, parse_mode)?;

		let mut language = None;
		if options.has_language {
			let mut lang = [0; LANGUAGE_SIZE];
			reader
				.read_exact(&mut lang)
				.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadFrameLength))?;
			language = Some(lang);
		}

		let mut description = None;
		let mut bom = [0, 0];
		if !options.no_description {
			let result = decode_text(
				reader,
				TextDecodeOptions::new().encoding(encoding).terminated(true),
			)?;
			bom = result.bom;
			description = result.text_or_none();
		}

		// It's possible for the description to be the only string with a BOM,
		// so its byte order is carried over to the content
		let content = if options.latin1_content {
			decode_text(
				reader,
				TextDecodeOptions::new().encoding(TextEncoding::Latin1),
			)?
			.content
		} else {
			decode_text(
				reader,
				TextDecodeOptions::new().encoding(encoding).bom(bom),
			)?
			.content
		};

		let header = FrameHeader::parsed(id, frame_flags, version, None);
		Ok(Some(DescriptiveTextFrame {
			header,
			encoding,
			language,
			description,
			content,
		}))
	}

	/// Convert a [`DescriptiveTextFrame`] to a byte vec
	///
	/// The description is always written as UTF-8. The content is written as
	/// UTF-8 as well, unless the frame ID forces Latin-1.
	pub(crate) fn as_bytes(&self) -> Vec<u8> {
		let options = options_for(&self.header.id);

		let mut bytes = vec![TextEncoding::UTF8 as u8];

		if options.has_language {
			bytes.extend_from_slice(&self.language.unwrap_or(*b"xxx"));
		}

		if !options.no_description {
			bytes.extend(
				TextEncoding::UTF8.encode(self.description.as_deref().unwrap_or_default(), true),
			);
		}

		if options.latin1_content {
			bytes.extend(TextEncoding::Latin1.encode(&self.content, false));
		} else {
			bytes.extend(TextEncoding::UTF8.encode(&self.content, false));
		}

		bytes
	}

	// Serialize with the content, and failing that the description, trimmed
	// until the body fits in `max_body` bytes
	pub(crate) fn as_bytes_limited(&self, max_body: usize) -> Vec<u8> {
		let mut frame = self.clone();

		loop {
			let bytes = frame.as_bytes();
			if bytes.len() <= max_body {
				return bytes;
			}

			let excess = bytes.len() - max_body;

			if !frame.content.is_empty() {
				let mut new_len = frame.content.len().saturating_sub(excess);
				while new_len > 0 && !frame.content.is_char_boundary(new_len) {
					new_len -= 1;
				}
				frame.content.truncate(new_len);
				continue;
			}

			match frame.description.as_mut() {
				Some(description) if !description.is_empty() => {
					let mut new_len = description.len().saturating_sub(excess);
					while new_len > 0 && !description.is_char_boundary(new_len) {
						new_len -= 1;
					}
					description.truncate(new_len);
				},
				_ => return bytes,
			}
		}
	}
}
