use crate::config::ParsingMode;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::frame::id::{FrameCategory, FrameId};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::{
	AttachedPictureFrame, BinaryFrame, DescriptiveTextFrame, EventTimingCodesFrame,
	PlayCounterFrame, PopularimeterFrame, TextInformationFrame, UrlLinkFrame,
};
use crate::id3::v2::{Frame, FrameFlags};
use crate::util::text::TextEncoding;

use std::io::Read;

pub(super) fn parse_content<R: Read>(
	reader: &mut R,
	id: FrameId,
	flags: FrameFlags,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<Option<Frame>> {
	log::trace!("Parsing frame content for ID: {}", id);

	// Compressed, encrypted, and otherwise specially stored bodies are
	// preserved untouched; their sub-flag payloads are not interpreted
	if flags.compression
		|| flags.encryption
		|| flags.grouping_identity
		|| flags.data_length_indicator
		|| flags.unsynchronisation
	{
		return Ok(Some(Frame::Binary(BinaryFrame::parse(
			reader, id, flags, version,
		)?)));
	}

	Ok(match id.category() {
		FrameCategory::Picture => Some(Frame::Picture(AttachedPictureFrame::parse(
			reader, flags, version, parse_mode,
		)?)),
		FrameCategory::DescriptiveText => {
			DescriptiveTextFrame::parse(reader, id, flags, version, parse_mode)?
				.map(Frame::Descriptive)
		},
		FrameCategory::Text | FrameCategory::NumericalText => {
			TextInformationFrame::parse(reader, id, flags, version, parse_mode)?.map(Frame::Text)
		},
		FrameCategory::Url => UrlLinkFrame::parse(reader, id, flags, version)?.map(Frame::Url),
		FrameCategory::PlayCount => Some(Frame::PlayCounter(PlayCounterFrame::parse(
			reader, flags, version,
		)?)),
		FrameCategory::Popularimeter => Some(Frame::Popularimeter(PopularimeterFrame::parse(
			reader, flags, version,
		)?)),
		FrameCategory::EventTiming => {
			EventTimingCodesFrame::parse(reader, flags, version)?.map(Frame::EventTimingCodes)
		},
		// SYLT, GEOB, PRIV, and any unknown frames
		FrameCategory::Unknown => Some(Frame::Binary(BinaryFrame::parse(
			reader, id, flags, version,
		)?)),
	})
}

pub(in crate::id3::v2) fn verify_encoding(
	encoding: u8,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<TextEncoding> {
	if version == Id3v2Version::V2 && (encoding != 0 && encoding != 1) {
		if parse_mode == ParsingMode::Strict {
			return Err(Id3v2Error::new(Id3v2ErrorKind::V2InvalidTextEncoding).into());
		}

		log::warn!("ID3v2.2 only supports Latin-1 and UTF-16 encodings, defaulting to Latin-1");
		return Ok(TextEncoding::Latin1);
	}

	match TextEncoding::from_u8(encoding) {
		Some(encoding) => Ok(encoding),
		None if parse_mode == ParsingMode::Strict => {
			crate::macros::err!(TextDecode("Found invalid encoding"))
		},
		None => {
			log::warn!("Invalid encoding byte {encoding:#04x}, defaulting to Latin-1");
			Ok(TextEncoding::Latin1)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::verify_encoding;
	use crate::config::ParsingMode;
	use crate::id3::v2::header::Id3v2Version;
	use crate::util::text::TextEncoding;

	#[test]
	fn invalid_encoding_defaults_to_latin1() {
		assert_eq!(
			verify_encoding(0x42, Id3v2Version::V4, ParsingMode::BestAttempt).unwrap(),
			TextEncoding::Latin1
		);
		assert!(verify_encoding(0x42, Id3v2Version::V4, ParsingMode::Strict).is_err());
	}

	#[test]
	fn v2_restricts_encodings() {
		assert_eq!(
			verify_encoding(0x03, Id3v2Version::V2, ParsingMode::BestAttempt).unwrap(),
			TextEncoding::Latin1
		);
		assert!(verify_encoding(0x03, Id3v2Version::V2, ParsingMode::Strict).is_err());
		assert_eq!(
			verify_encoding(0x01, Id3v2Version::V2, ParsingMode::Strict).unwrap(),
			TextEncoding::UTF16
		);
	}
}
