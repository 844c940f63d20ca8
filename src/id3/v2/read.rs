use super::frame::read::ParsedFrame;
use super::header::Id3v2Header;
use super::tag::Id3v2Tag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FRAME_HEADER_SIZE, TAG_HEADER_SIZE, V2_FRAME_HEADER_SIZE};

use std::io::Read;

pub(crate) fn parse_id3v2<R>(
	bytes: &mut R,
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let mut tag_bytes = bytes.take(u64::from(header.size - header.extended_size));
	let ret = read_all_frames_into_tag(&mut tag_bytes, header, parse_options)?;

	// Throw away the rest of the tag (padding, bad frames)
	std::io::copy(&mut tag_bytes, &mut std::io::sink())?;
	Ok(ret)
}

fn skip_frame(reader: &mut impl Read, size: u32) -> Result<()> {
	log::trace!("Skipping frame of size {}", size);

	let size = u64::from(size);
	let mut reader = reader.take(size);
	let skipped = std::io::copy(&mut reader, &mut std::io::sink())?;
	debug_assert!(skipped <= size);

	Ok(())
}

fn read_all_frames_into_tag<R>(
	reader: &mut R,
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag>
where
	R: Read,
{
	let mut tag = Id3v2Tag::default();
	tag.original_version = header.version;
	tag.set_flags(header.flags);
	tag.size = header.size;

	// The unsynchronization stream transform is out of scope; affected
	// frames re-serialize on write rather than re-emitting captured bytes
	let capture_raw = !header.flags.unsynchronisation;
	if !capture_raw {
		log::warn!("Tag is unsynchronized; content is passed through untransformed");
	}

	// Tracks where the frame region ends and padding begins, from the start
	// of the tag
	let mut offset = u64::from(header.extended_size) + TAG_HEADER_SIZE as u64;

	loop {
		match ParsedFrame::read(reader, header.version, parse_options, capture_raw)? {
			ParsedFrame::Next(frame) => {
				if let Some(raw) = &frame.header().raw {
					offset += raw.len() as u64;
				}

				let frame_value_is_empty = frame.is_empty();
				if let Some(replaced_frame) = tag.insert(frame) {
					// Duplicate frames are not allowed. But if this occurs we try
					// to keep the frame with the non-empty content. Superfluous,
					// duplicate frames that follow the first frame are often empty.
					if frame_value_is_empty == Some(true)
						&& replaced_frame.is_empty() == Some(false)
					{
						log::warn!(
							"Restoring non-empty frame with ID \"{id}\" that has been replaced by \
							 an empty frame with the same ID",
							id = replaced_frame.id()
						);
						drop(tag.insert(replaced_frame));
					} else {
						log::warn!(
							"Replaced frame with ID \"{id}\" by a frame with the same ID",
							id = replaced_frame.id()
						);
					}
				}
			},
			// No frame content found or ignored due to errors, but we can expect more frames
			ParsedFrame::Skip { size } => {
				let header_size = if header.version == Id3v2Version::V2 {
					V2_FRAME_HEADER_SIZE
				} else {
					FRAME_HEADER_SIZE
				};
				offset += header_size as u64 + u64::from(size);

				skip_frame(reader, size)?;
			},
			// No frame content found, and we can expect there are no more frames
			ParsedFrame::Eof => break,
		}
	}

	if capture_raw && offset < u64::from(header.full_tag_size()) {
		tag.padding_start = Some(offset);
	}

	Ok(tag)
}
