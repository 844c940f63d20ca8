use super::util::synchsafe::decode_int;
use super::{
	MAX_SUPPORTED_VERSION, MIN_SUPPORTED_VERSION, SUPPORTED_MINOR_VERSION, TAG_HEADER_SIZE,
};
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::macros::err;

use std::io::Read;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	///
	/// The unsynchronization stream transform is not applied by this crate;
	/// the flag is only surfaced.
	pub unsynchronisation: bool,
	/// Whether the tag carries an extended header
	///
	/// The extended header's length is consumed, its contents are skipped.
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer
	pub footer: bool,
}

impl Id3v2TagFlags {
	/// Get the **ID3v2.4** byte representation of the flags
	///
	/// Only the experimental flag survives a rewrite: written tags are never
	/// unsynchronized, their extended headers are dropped, and no footer is
	/// produced.
	pub fn as_id3v24_byte(&self) -> u8 {
		let mut byte = 0;

		if self.experimental {
			byte |= 0x20;
		}

		byte
	}
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents, including the extended header
	/// (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
	pub extended_size: u32,
}

impl Id3v2Header {
	/// Parse an ID3v2 header at the reader's position
	///
	/// `file_len` is used to resolve the ID3v2.3 size ambiguity: the size is
	/// read as a plain integer per the specification, and re-read as
	/// synchsafe when the plain interpretation overruns the file.
	pub(crate) fn parse<R>(bytes: &mut R, file_len: Option<u64>) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; TAG_HEADER_SIZE];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		let (major, minor) = (header[3], header[4]);
		if !(MIN_SUPPORTED_VERSION..=MAX_SUPPORTED_VERSION).contains(&major)
			|| minor != SUPPORTED_MINOR_VERSION
		{
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadId3v2Version(major, minor)).into());
		}

		let version = match major {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			_ => Id3v2Version::V4,
		};

		let flags = header[5];

		// Compression was a flag only used in ID3v2.2 (bit 2).
		// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
		// The spec recommends just ignoring the tag in this case.
		if version == Id3v2Version::V2 && flags & 0x40 != 0 {
			return Err(Id3v2Error::new(Id3v2ErrorKind::V2Compression).into());
		}

		let has_extended_header = version != Id3v2Version::V2 && flags & 0x40 != 0;

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 != 0,
			extended_header: has_extended_header,
			experimental: version != Id3v2Version::V2 && flags & 0x20 != 0,
			footer: version != Id3v2Version::V2 && flags & 0x10 != 0,
		};

		let size_bytes = &header[6..10];
		let size = match version {
			// ID3v2.3 specifies a plain integer, but tags written with a
			// synchsafe size exist in the wild. A synchsafe value read as
			// plain is always >= the true value, so an overrun of the file
			// identifies them.
			Id3v2Version::V3 => {
				let plain = decode_int(size_bytes, false) as u32;
				match file_len {
					Some(len) if u64::from(plain) + TAG_HEADER_SIZE as u64 > len => {
						let synchsafe = decode_int(size_bytes, true) as u32;
						log::warn!(
							"ID3v2.3 tag size {plain} overruns the file, re-reading as \
							 synchsafe ({synchsafe})"
						);
						synchsafe
					},
					_ => plain,
				}
			},
			_ => decode_int(size_bytes, true) as u32,
		};

		let mut extended_size = 0;
		if has_extended_header {
			let mut ext_size_bytes = [0; 4];
			bytes.read_exact(&mut ext_size_bytes)?;

			let ext_size =
				decode_int(&ext_size_bytes, version == Id3v2Version::V4) as u32;

			if ext_size >= size {
				return Err(Id3v2Error::new(Id3v2ErrorKind::BadExtendedHeaderSize).into());
			}

			// The contents are skipped, only the length is consumed
			std::io::copy(
				&mut bytes.take(u64::from(ext_size)),
				&mut std::io::sink(),
			)?;

			extended_size = 4 + ext_size;
		}

		Ok(Id3v2Header {
			version,
			flags: flags_parsed,
			size,
			extended_size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u32 {
		self.size + TAG_HEADER_SIZE as u32 + if self.flags.footer { 10 } else { 0 }
	}
}

#[cfg(test)]
mod tests {
	use super::{Id3v2Header, Id3v2Version};

	use std::io::Cursor;

	#[test_log::test]
	fn v24_header() {
		let mut reader = Cursor::new([b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 0x18]);
		let header = Id3v2Header::parse(&mut reader, None).unwrap();
		assert_eq!(header.version, Id3v2Version::V4);
		assert_eq!(header.size, 24);
		assert_eq!(header.full_tag_size(), 34);
	}

	#[test_log::test]
	fn bad_magic() {
		let mut reader = Cursor::new([b'N', b'O', b'T', 4, 0, 0, 0, 0, 0, 0x18]);
		assert!(Id3v2Header::parse(&mut reader, None).is_err());
	}

	#[test_log::test]
	fn unsupported_version() {
		let mut reader = Cursor::new([b'I', b'D', b'3', 5, 0, 0, 0, 0, 0, 0x18]);
		assert!(Id3v2Header::parse(&mut reader, None).is_err());

		// Minor revisions are not supported either
		let mut reader = Cursor::new([b'I', b'D', b'3', 4, 1, 0, 0, 0, 0, 0x18]);
		assert!(Id3v2Header::parse(&mut reader, None).is_err());
	}

	#[test_log::test]
	fn v23_size_is_plain() {
		// 0x01 0x48 plain is 328; the file is big enough, so no fallback
		let mut reader = Cursor::new([b'I', b'D', b'3', 3, 0, 0, 0, 0, 0x01, 0x48]);
		let header = Id3v2Header::parse(&mut reader, Some(1000)).unwrap();
		assert_eq!(header.size, 328);
	}

	#[test_log::test]
	fn v23_synchsafe_size_fallback() {
		// Plain 328 overruns a 230 byte file; synchsafe reads 200
		let mut reader = Cursor::new([b'I', b'D', b'3', 3, 0, 0, 0, 0, 0x01, 0x48]);
		let header = Id3v2Header::parse(&mut reader, Some(230)).unwrap();
		assert_eq!(header.size, 200);
	}

	#[test_log::test]
	fn tag_flags() {
		let mut reader = Cursor::new([b'I', b'D', b'3', 4, 0, 0xA0, 0, 0, 0, 0]);
		let header = Id3v2Header::parse(&mut reader, None).unwrap();
		assert!(header.flags.unsynchronisation);
		assert!(header.flags.experimental);
		assert!(!header.flags.footer);
	}
}
