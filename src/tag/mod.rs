//! The tag assembler
//!
//! [`Tag`] locates every ID3 marker a file can carry (the `TAG` trailer,
//! the `TAG+` block preceding it, and the `ID3` header at the start),
//! parses what it finds, and exposes one merged view. ID3v2 frames take
//! precedence; the v1 trailers are only consulted for IDs the v2 tag did
//! not provide.

use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::id3::v1::{
	Id3v1ExtendedTag, Id3v1Tag, ID3V1_EXTENDED_TAG_MARKER, ID3V1_EXTENDED_TAG_SIZE,
	ID3V1_TAG_MARKER, ID3V1_TAG_SIZE,
};
use crate::id3::v2::header::Id3v2Header;
use crate::id3::v2::read::parse_id3v2;
use crate::id3::v2::{
	AttachedPictureFrame, DescriptiveTextFrame, Frame, FrameId, Id3v2Tag, KnownFrameId,
	TextInformationFrame, TAG_HEADER_SIZE,
};

use std::io::{Read, Seek, SeekFrom};

/// The complete ID3 metadata of a byte source
///
/// No recoverable condition escapes [`Tag::read_from`]: a missing or
/// malformed ID3v2 section is skipped (the v1 trailers may still
/// populate), malformed frames degrade to opaque binary frames, and a
/// source too short for any marker yields a null tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tag {
	v2: Id3v2Tag,
	v2_present: bool,
	v1: Option<Id3v1Tag>,
	v1_extended: Option<Id3v1ExtendedTag>,
}

impl Tag {
	/// Create an empty tag
	pub fn new() -> Self {
		Self::default()
	}

	/// Read the ID3 metadata of `reader`
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		let file_len = reader.seek(SeekFrom::End(0))?;
		let mut tag = Self::new();

		if file_len >= ID3V1_TAG_SIZE as u64 {
			reader.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))?;

			let mut trailer = [0; ID3V1_TAG_SIZE];
			reader.read_exact(&mut trailer)?;

			if trailer[..3] == ID3V1_TAG_MARKER {
				log::debug!("Found an ID3v1 trailer");
				tag.v1 = Id3v1Tag::parse(trailer).ok();
			}
		}

		// The extended block precedes the trailer, and is meaningless without one
		if tag.v1.is_some() && file_len >= (ID3V1_TAG_SIZE + ID3V1_EXTENDED_TAG_SIZE) as u64 {
			reader.seek(SeekFrom::End(
				-((ID3V1_TAG_SIZE + ID3V1_EXTENDED_TAG_SIZE) as i64),
			))?;

			let mut block = [0; ID3V1_EXTENDED_TAG_SIZE];
			reader.read_exact(&mut block)?;

			if block[..4] == ID3V1_EXTENDED_TAG_MARKER {
				log::debug!("Found an ID3v1-Extended block");
				tag.v1_extended = Id3v1ExtendedTag::parse(block).ok();
			}
		}

		if file_len >= TAG_HEADER_SIZE as u64 {
			reader.rewind()?;

			match Id3v2Header::parse(reader, Some(file_len))
				.and_then(|header| parse_id3v2(reader, header, parse_options))
			{
				Ok(v2) => {
					tag.v2 = v2;
					tag.v2_present = true;
				},
				Err(err) => {
					log::warn!("Skipping the ID3v2 section: {err}");
				},
			}
		}

		tag.merge_id3v1();
		Ok(tag)
	}

	/// Whether no ID3 marker was found at all
	pub fn is_null(&self) -> bool {
		!self.v2_present && self.v1.is_none()
	}

	/// Whether an ID3v1 trailer was present
	pub fn has_id3v1(&self) -> bool {
		self.v1.is_some()
	}

	/// Whether the ID3v1 trailer carried a track number (ID3v1.1)
	pub fn has_id3v1_1(&self) -> bool {
		self.v1.as_ref().is_some_and(Id3v1Tag::is_v11)
	}

	/// Whether an ID3v1-Extended block was present
	pub fn has_id3v1_extended(&self) -> bool {
		self.v1_extended.is_some()
	}

	/// Whether an ID3v2 header was present and parsed
	pub fn has_id3v2(&self) -> bool {
		self.v2_present
	}

	/// The merged frame view of the tag
	pub fn id3v2(&self) -> &Id3v2Tag {
		&self.v2
	}

	/// The merged frame view of the tag, for mutation
	pub fn id3v2_mut(&mut self) -> &mut Id3v2Tag {
		&mut self.v2
	}

	/// The ID3v1 trailer as read, if any
	pub fn id3v1(&self) -> Option<&Id3v1Tag> {
		self.v1.as_ref()
	}

	/// The ID3v1-Extended block as read, if any
	pub fn id3v1_extended(&self) -> Option<&Id3v1ExtendedTag> {
		self.v1_extended.as_ref()
	}

	/// Serialize the tag as a complete ID3v2.4 byte block
	///
	/// The v1 trailers are not re-emitted; their contents were merged into
	/// the frame view at read time.
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		self.v2.as_bytes(write_options)
	}

	// v2 frames win; v1 fields only fill IDs the v2 tag did not provide,
	// with the extended block overriding the fields it widens
	fn merge_id3v1(&mut self) {
		let Some(v1) = &self.v1 else {
			return;
		};
		let extended = self.v1_extended.as_ref();

		let title = extended
			.and_then(|e| e.title.clone())
			.or_else(|| v1.title.clone());
		let artist = extended
			.and_then(|e| e.artist.clone())
			.or_else(|| v1.artist.clone());
		let album = extended
			.and_then(|e| e.album.clone())
			.or_else(|| v1.album.clone());
		let genre = extended
			.and_then(|e| e.genre.clone())
			.or_else(|| v1.genre_str().map(str::to_owned));
		let year = v1.year.clone();
		let track = v1.track_number.map(|t| t.to_string());
		let comment = v1.comment.clone();

		self.fill_text(KnownFrameId::Tit2, title);
		self.fill_text(KnownFrameId::Tpe1, artist);
		self.fill_text(KnownFrameId::Talb, album);
		self.fill_text(KnownFrameId::Tyer, year);
		self.fill_text(KnownFrameId::Trck, track);
		self.fill_text(KnownFrameId::Tcon, genre);

		if let Some(comment) = comment {
			let id = FrameId::Known(KnownFrameId::Comm);
			if self.v2.get(&id).is_none() {
				self.v2
					.insert(Frame::Descriptive(DescriptiveTextFrame::new(id, None, comment)));
			}
		}
	}

	fn fill_text(&mut self, id: KnownFrameId, value: Option<String>) {
		let Some(value) = value else {
			return;
		};
		if value.is_empty() {
			return;
		}

		let id = FrameId::Known(id);
		if self.v2.get(&id).is_none() {
			self.v2
				.insert(Frame::Text(TextInformationFrame::new(id, value)));
		}
	}

	// Accessors, delegated to the merged frame view

	/// The track title
	pub fn title(&self) -> Option<&str> {
		self.v2.title()
	}

	/// Set the track title
	pub fn set_title(&mut self, title: impl Into<String>) {
		self.v2.set_title(title);
	}

	/// The track artist
	pub fn artist(&self) -> Option<&str> {
		self.v2.artist()
	}

	/// Set the track artist
	pub fn set_artist(&mut self, artist: impl Into<String>) {
		self.v2.set_artist(artist);
	}

	/// All values of the track artist
	pub fn artists(&self) -> Vec<&str> {
		self.v2.artists()
	}

	/// The album title
	pub fn album(&self) -> Option<&str> {
		self.v2.album()
	}

	/// Set the album title
	pub fn set_album(&mut self, album: impl Into<String>) {
		self.v2.set_album(album);
	}

	/// The release year
	pub fn year(&self) -> Option<u32> {
		self.v2.year()
	}

	/// Set the release year
	pub fn set_year(&mut self, year: u32) {
		self.v2.set_year(year);
	}

	/// The track number
	pub fn track(&self) -> Option<u32> {
		self.v2.track()
	}

	/// The total number of tracks
	pub fn track_total(&self) -> Option<u32> {
		self.v2.track_total()
	}

	/// Set the track number
	pub fn set_track(&mut self, track: u32) {
		self.v2.set_track(track);
	}

	/// The disc number
	pub fn disc(&self) -> Option<u32> {
		self.v2.disc()
	}

	/// The total number of discs
	pub fn disc_total(&self) -> Option<u32> {
		self.v2.disc_total()
	}

	/// Set the disc number
	pub fn set_disc(&mut self, disc: u32) {
		self.v2.set_disc(disc);
	}

	/// The composer
	pub fn composer(&self) -> Option<&str> {
		self.v2.composer()
	}

	/// Set the composer
	pub fn set_composer(&mut self, composer: impl Into<String>) {
		self.v2.set_composer(composer);
	}

	/// The tempo in beats per minute
	pub fn bpm(&self) -> Option<u32> {
		self.v2.bpm()
	}

	/// Set the tempo in beats per minute
	pub fn set_bpm(&mut self, bpm: u32) {
		self.v2.set_bpm(bpm);
	}

	/// The genre, with ID3v1 numeric forms resolved
	pub fn genre(&self) -> Option<String> {
		self.v2.genre()
	}

	/// The genre exactly as stored
	pub fn genre_raw(&self) -> Option<&str> {
		self.v2.genre_raw()
	}

	/// Set the genre
	pub fn set_genre(&mut self, genre: impl Into<String>) {
		self.v2.set_genre(genre);
	}

	/// The content of the first comment frame
	pub fn comment(&self) -> Option<&str> {
		self.v2.comment()
	}

	/// Set a comment, replacing any existing comment frames
	pub fn set_comment(&mut self, comment: impl Into<String>) {
		self.v2.set_comment(comment);
	}

	/// The content of the first lyrics frame
	pub fn lyrics(&self) -> Option<&str> {
		self.v2.lyrics()
	}

	/// The first attached picture
	pub fn picture(&self) -> Option<&AttachedPictureFrame> {
		self.v2.picture()
	}
}

#[cfg(test)]
mod tests {
	use super::Tag;
	use crate::config::ParseOptions;

	use std::io::Cursor;

	#[test_log::test]
	fn short_file_yields_null_tag() {
		let mut reader = Cursor::new(vec![0_u8; 64]);
		let tag = Tag::read_from(&mut reader, ParseOptions::new()).unwrap();
		assert!(tag.is_null());
		assert_eq!(tag.title(), None);
	}

	#[test_log::test]
	fn garbage_is_not_a_tag() {
		let mut reader = Cursor::new(vec![0xAB_u8; 400]);
		let tag = Tag::read_from(&mut reader, ParseOptions::new()).unwrap();
		assert!(tag.is_null());
	}
}
