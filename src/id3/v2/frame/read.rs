use super::content::parse_content;
use super::id::{FrameId, UNKNOWN_ID_STR};
use super::{Frame, FrameFlags, FrameHeader};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::BinaryFrame;
use crate::id3::v2::util::synchsafe::{decode_int, encode_int};
use crate::id3::v2::util::upgrade::upgrade_v2;
use crate::id3::v2::{FRAME_HEADER_SIZE, V2_FRAME_HEADER_SIZE};

use std::io::{Cursor, Read};

pub(crate) enum ParsedFrame {
	Next(Frame),
	Skip { size: u32 },
	Eof,
}

impl ParsedFrame {
	/// Read a single frame at the reader's position
	///
	/// The reader is expected to be limited to the tag's frame region, so a
	/// frame whose declared size overflows the region simply runs out of
	/// bytes; it is preserved with the bytes that were available and ends
	/// the iteration.
	pub(crate) fn read<R>(
		reader: &mut R,
		version: Id3v2Version,
		parse_options: ParseOptions,
		capture_raw: bool,
	) -> Result<Self>
	where
		R: Read,
	{
		let parse_mode = parse_options.parsing_mode;

		let parsed_header;
		if version == Id3v2Version::V2 {
			parsed_header = parse_v2_header(reader, parse_mode)?;
		} else {
			parsed_header = parse_header(reader, version, parse_mode)?;
		}

		let (id, flags, size, raw_header) = match parsed_header {
			ParsedHeader::Next(header) => header,
			ParsedHeader::Skip { size } => return Ok(Self::Skip { size }),
			ParsedHeader::Eof => return Ok(Self::Eof),
		};

		if size == 0 {
			// The tag has ended, and we just started reading padding
			log::debug!("Encountered a zero length frame, assuming the tag has ended");
			return Ok(Self::Eof);
		}

		let mut body = Vec::new();
		reader.by_ref().take(u64::from(size)).read_to_end(&mut body)?;

		if body.len() < size as usize {
			log::warn!(
				"Frame \"{id}\" declared {size} bytes but only {} were available",
				body.len()
			);
		}

		if !parse_options.read_cover_art && id.as_str() == "APIC" {
			return Ok(Self::Skip { size: 0 });
		}

		// Capture the frame as it will be re-emitted: for ID3v2.2, a
		// synthetic ID3v2.4 header is rebuilt over the translated ID so
		// downstream code sees a uniform representation
		let raw = if capture_raw {
			let mut raw = Vec::with_capacity(FRAME_HEADER_SIZE + body.len());
			match raw_header {
				Some(original) => raw.extend_from_slice(&original),
				None => {
					raw.extend_from_slice(id.as_str().as_bytes());
					raw.extend(encode_int(body.len() as u64, 4, true));
					raw.extend_from_slice(&flags.as_id3v24_bytes().to_be_bytes());
				},
			}
			raw.extend_from_slice(&body);
			Some(raw)
		} else {
			None
		};

		let parse_result = {
			let mut body_reader = Cursor::new(body.as_slice());
			parse_content(&mut body_reader, id.clone(), flags, version, parse_mode)
		};

		match parse_result {
			Ok(Some(mut frame)) => {
				let header = frame.header_mut();
				header.version = version;
				header.raw = raw;
				header.edited = false;
				Ok(Self::Next(frame))
			},
			Ok(None) => {
				log::debug!("Frame \"{id}\" had no content, preserving as binary");
				Ok(Self::Next(binary_fallback(id, flags, version, raw, body)))
			},
			Err(err) => {
				if parse_mode == ParsingMode::Strict {
					return Err(err);
				}

				log::warn!("Failed to parse frame \"{id}\" ({err}), preserving as binary");
				Ok(Self::Next(binary_fallback(id, flags, version, raw, body)))
			},
		}
	}
}

// A frame whose body could not be parsed keeps its payload verbatim
fn binary_fallback(
	id: FrameId,
	flags: FrameFlags,
	version: Id3v2Version,
	raw: Option<Vec<u8>>,
	body: Vec<u8>,
) -> Frame {
	Frame::Binary(BinaryFrame {
		header: FrameHeader::parsed(id, flags, version, raw),
		data: body,
	})
}

enum ParsedHeader {
	Next((FrameId, FrameFlags, u32, Option<Vec<u8>>)),
	Skip { size: u32 },
	Eof,
}

fn parse_v2_header<R>(reader: &mut R, parse_mode: ParsingMode) -> Result<ParsedHeader>
where
	R: Read,
{
	let mut header = [0; V2_FRAME_HEADER_SIZE];
	match reader.read_exact(&mut header) {
		Ok(()) => {},
		Err(_) => return Ok(ParsedHeader::Eof),
	}

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(ParsedHeader::Eof);
	}

	let size = decode_int(&header[3..6], false) as u32;

	let id_bytes = &header[..3];
	let Ok(id_str) = std::str::from_utf8(id_bytes) else {
		return skip_invalid_id(id_bytes, size, parse_mode);
	};
	if FrameId::verify_id(id_str).is_err() {
		return skip_invalid_id(id_bytes, size, parse_mode);
	}

	let id = match upgrade_v2(id_str) {
		Some(upgraded) => FrameId::parse(upgraded),
		None => {
			log::warn!("No ID3v2.4 mapping for ID3v2.2 frame \"{id_str}\"");
			FrameId::Unknown(UNKNOWN_ID_STR.to_owned())
		},
	};

	// ID3v2.2 doesn't store flags; the frame is marked to be discarded on
	// tag alteration if it isn't understood
	let flags = FrameFlags {
		tag_alter_preservation: true,
		..FrameFlags::default()
	};

	Ok(ParsedHeader::Next((id, flags, size, None)))
}

fn parse_header<R>(
	reader: &mut R,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<ParsedHeader>
where
	R: Read,
{
	let synchsafe = version == Id3v2Version::V4;

	let mut header = [0; FRAME_HEADER_SIZE];
	match reader.read_exact(&mut header) {
		Ok(()) => {},
		Err(_) => return Ok(ParsedHeader::Eof),
	}

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(ParsedHeader::Eof);
	}

	let size = decode_int(&header[4..8], synchsafe) as u32;

	// For some reason, some apps make v3 tags with v2 frame IDs.
	// The actual frame header is v3 though
	let mut id_end = 4;
	let mut invalid_v2_frame = false;
	if header[3] == 0 && !synchsafe {
		log::warn!("Found a v2 frame ID in a v3 tag, attempting to upgrade");

		invalid_v2_frame = true;
		id_end = 3;
	}

	let id_bytes = &header[..id_end];
	let Ok(id_str) = std::str::from_utf8(id_bytes) else {
		return skip_invalid_id(id_bytes, size, parse_mode);
	};
	if FrameId::verify_id(id_str).is_err() {
		return skip_invalid_id(id_bytes, size, parse_mode);
	}

	let id = if invalid_v2_frame {
		match upgrade_v2(id_str) {
			Some(upgraded) => FrameId::parse(upgraded),
			None => FrameId::Unknown(UNKNOWN_ID_STR.to_owned()),
		}
	} else {
		FrameId::parse(id_str)
	};

	let flags_raw = u16::from_be_bytes([header[8], header[9]]);
	let flags = if synchsafe {
		FrameFlags::parse_id3v24(flags_raw)
	} else {
		FrameFlags::parse_id3v23(flags_raw)
	};

	Ok(ParsedHeader::Next((id, flags, size, Some(header.to_vec()))))
}

fn skip_invalid_id(id_bytes: &[u8], size: u32, parse_mode: ParsingMode) -> Result<ParsedHeader> {
	if parse_mode == ParsingMode::Strict {
		return Err(crate::error::Id3v2Error::new(
			crate::error::Id3v2ErrorKind::BadFrameId(id_bytes.to_vec()),
		)
		.into());
	}

	log::warn!("Skipping frame with invalid ID: {id_bytes:x?}");
	Ok(ParsedHeader::Skip { size })
}
