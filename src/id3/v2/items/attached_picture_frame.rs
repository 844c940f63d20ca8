use crate::config::ParsingMode;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::frame::id::KnownFrameId;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader};
use crate::macros::err;
use crate::picture::{MimeType, PictureType};
use crate::util::text::{decode_text, TextDecodeOptions, TextEncoding};

use std::io::Read;

use byteorder::ReadBytesExt;

/// An `ID3v2` attached picture frame
///
/// A picture with an unrecognized MIME type is *null*: it keeps its payload,
/// but is not considered a usable image.
#[derive(Clone, Debug, Eq)]
pub struct AttachedPictureFrame {
	pub(crate) header: FrameHeader,
	/// The encoding the description was stored in
	pub encoding: TextEncoding,
	/// The picture's MIME type, `None` when unrecognized
	pub mime_type: Option<MimeType>,
	/// The type of picture
	pub pic_type: PictureType,
	/// A short description of the picture
	pub description: Option<String>,
	/// The binary image data
	pub data: Vec<u8>,
}

impl PartialEq for AttachedPictureFrame {
	fn eq(&self, other: &Self) -> bool {
		if self.is_null() && other.is_null() {
			return true;
		}

		self.mime_type == other.mime_type
			&& self.pic_type == other.pic_type
			&& self.description == other.description
			&& self.data == other.data
	}
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`]
	///
	/// The MIME type is sniffed from `mime`; see [`Self::set_mime_type`].
	/// The picture type defaults to [`PictureType::CoverFront`].
	pub fn new(mime: &str, data: Vec<u8>) -> Self {
		let header = FrameHeader::new(KnownFrameId::Apic.into(), FrameFlags::default());
		Self {
			header,
			encoding: TextEncoding::UTF8,
			mime_type: MimeType::sniff(mime),
			pic_type: PictureType::CoverFront,
			description: None,
			data,
		}
	}

	/// Whether the picture's MIME type was unrecognized
	pub fn is_null(&self) -> bool {
		self.mime_type.is_none()
	}

	/// Set the MIME type from a string
	///
	/// `png`, `jpg`, `jpeg`, `image/png`, and `image/jpeg` are accepted in
	/// any case and normalized to the full `image/…` form. Returns whether
	/// the string was recognized; an unrecognized string nulls the picture.
	pub fn set_mime_type(&mut self, mime: &str) -> bool {
		self.mime_type = MimeType::sniff(mime);
		self.header.mark_edited();
		self.mime_type.is_some()
	}

	/// Set the picture type
	pub fn set_pic_type(&mut self, pic_type: PictureType) {
		self.pic_type = pic_type;
		self.header.mark_edited();
	}

	/// Get an [`AttachedPictureFrame`] from ID3v2 A/PIC bytes
	///
	/// NOTE: This expects *only* the frame content
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * Unable to decode any of the text
	///
	/// ID3v2.2:
	///
	/// * The format is not "PNG" or "JPG"
	pub fn parse<R>(
		reader: &mut R,
		frame_flags: FrameFlags,
		version: Id3v2Version,
		parse_mode: ParsingMode,
	) -> Result<Self>
	where
		R: Read,
	{
		let encoding = verify_encoding(reader.read_u8()?, version, parse_mode)?;

		let mime_type;
		if version == Id3v2Version::V2 {
			let mut format = [0; 3];
			reader.read_exact(&mut format)?;

			match &format {
				b"PNG" => mime_type = Some(MimeType::Png),
				b"JPG" => mime_type = Some(MimeType::Jpeg),
				_ => {
					return Err(Id3v2Error::new(Id3v2ErrorKind::BadPictureFormat(
						String::from_utf8_lossy(&format).into_owned(),
					))
					.into());
				},
			}
		} else {
			let mime_type_str = decode_text(
				reader,
				TextDecodeOptions::new()
					.encoding(TextEncoding::Latin1)
					.terminated(true),
			)?
			.text_or_none();

			mime_type = match mime_type_str {
				Some(mime_type_str) => {
					let sniffed = MimeType::sniff(&mime_type_str);
					if sniffed.is_none() {
						log::warn!("Unrecognized picture MIME type \"{mime_type_str}\"");
					}
					sniffed
				},
				None => None,
			};
		}

		let pic_type = PictureType::from_u8(reader.read_u8()?);

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?
		.text_or_none();

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let header = FrameHeader::parsed(
			KnownFrameId::Apic.into(),
			frame_flags,
			version,
			None,
		);
		Ok(Self {
			header,
			encoding,
			mime_type,
			pic_type,
			description,
			data,
		})
	}

	/// Convert an [`AttachedPictureFrame`] to an ID3v2 APIC byte Vec
	///
	/// NOTE: This does not include the frame header
	///
	/// # Errors
	///
	/// * Too much data was provided
	pub(crate) fn as_bytes(&self) -> Result<Vec<u8>> {
		let mut data = vec![TextEncoding::UTF8 as u8];

		if let Some(mime_type) = &self.mime_type {
			data.extend_from_slice(mime_type.as_str().as_bytes());
		}
		data.push(0);

		data.push(self.pic_type.as_u8());

		match &self.description {
			Some(description) => data.extend(TextEncoding::UTF8.encode(description, true)),
			None => data.push(0),
		}

		data.extend_from_slice(&self.data);

		if data.len() as u64 > u64::from(u32::MAX) {
			err!(TooMuchData);
		}

		Ok(data)
	}
}

#[cfg(test)]
mod tests {
	use super::AttachedPictureFrame;
	use crate::config::ParsingMode;
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::FrameFlags;
	use crate::picture::{MimeType, PictureType};

	use std::io::Cursor;

	#[test_log::test]
	fn parse_apic() {
		let mut body = vec![0x00];
		body.extend_from_slice(b"image/png\0");
		body.push(0x03); // Front cover
		body.extend_from_slice(b"cover\0");
		body.extend_from_slice(&[0x89, b'P', b'N', b'G']);

		let frame = AttachedPictureFrame::parse(
			&mut Cursor::new(&body),
			FrameFlags::default(),
			Id3v2Version::V4,
			ParsingMode::BestAttempt,
		)
		.unwrap();

		assert_eq!(frame.mime_type, Some(MimeType::Png));
		assert_eq!(frame.pic_type, PictureType::CoverFront);
		assert_eq!(frame.description.as_deref(), Some("cover"));
		assert_eq!(frame.data, &[0x89, b'P', b'N', b'G']);
		assert!(!frame.is_null());
	}

	#[test_log::test]
	fn short_form_mime() {
		let frame = AttachedPictureFrame::new("png", Vec::new());
		assert_eq!(frame.mime_type, Some(MimeType::Png));

		let mut frame = frame;
		assert!(frame.set_mime_type("JPEG"));
		assert_eq!(frame.mime_type, Some(MimeType::Jpeg));

		assert!(!frame.set_mime_type("image/webp"));
		assert!(frame.is_null());
	}

	#[test_log::test]
	fn v22_format_codes() {
		let mut body = vec![0x00];
		body.extend_from_slice(b"JPG");
		body.push(0x04); // Back cover
		body.extend_from_slice(b"\0");
		body.extend_from_slice(&[0xFF, 0xD8]);

		let frame = AttachedPictureFrame::parse(
			&mut Cursor::new(&body),
			FrameFlags::default(),
			Id3v2Version::V2,
			ParsingMode::BestAttempt,
		)
		.unwrap();

		assert_eq!(frame.mime_type, Some(MimeType::Jpeg));
		assert_eq!(frame.pic_type, PictureType::CoverBack);

		let mut bad = vec![0x00];
		bad.extend_from_slice(b"BMP");
		bad.push(0x00);
		bad.extend_from_slice(b"\0");

		assert!(AttachedPictureFrame::parse(
			&mut Cursor::new(&bad),
			FrameFlags::default(),
			Id3v2Version::V2,
			ParsingMode::BestAttempt,
		)
		.is_err());
	}
}
