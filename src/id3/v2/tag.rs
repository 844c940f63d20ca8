use super::frame::id::{FrameId, KnownFrameId};
use super::header::{Id3v2TagFlags, Id3v2Version};
use super::items::{AttachedPictureFrame, DescriptiveTextFrame, TextInformationFrame};
use super::Frame;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v1::GENRES;

const TITLE_ID: FrameId = FrameId::Known(KnownFrameId::Tit2);
const ARTIST_ID: FrameId = FrameId::Known(KnownFrameId::Tpe1);
const ALBUM_ID: FrameId = FrameId::Known(KnownFrameId::Talb);
const YEAR_ID: FrameId = FrameId::Known(KnownFrameId::Tyer);
const RECORDING_TIME_ID: FrameId = FrameId::Known(KnownFrameId::Tdrc);
const TRACK_ID: FrameId = FrameId::Known(KnownFrameId::Trck);
const DISC_ID: FrameId = FrameId::Known(KnownFrameId::Tpos);
const COMPOSER_ID: FrameId = FrameId::Known(KnownFrameId::Tcom);
const BPM_ID: FrameId = FrameId::Known(KnownFrameId::Tbpm);
const GENRE_ID: FrameId = FrameId::Known(KnownFrameId::Tcon);
const COMMENT_ID: FrameId = FrameId::Known(KnownFrameId::Comm);
const LYRICS_ID: FrameId = FrameId::Known(KnownFrameId::Uslt);

/// An ID3v2 tag
///
/// Frames are kept in file order, so an unedited tag writes back
/// byte-identically when its source was already ID3v2.4. IDs in the
/// multiple-instance subset (pictures, comments, lyrics, user defined
/// text/URL, …) accumulate; for every other ID the latest insert wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Id3v2Tag {
	pub(crate) frames: Vec<Frame>,
	pub(crate) original_version: Id3v2Version,
	flags: Id3v2TagFlags,
	/// The byte size of the frame region, exclusive of the tag header
	pub(crate) size: u32,
	/// The offset from the start of the tag at which padding begins
	pub(crate) padding_start: Option<u64>,
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self {
			frames: Vec::new(),
			original_version: Id3v2Version::V4,
			flags: Id3v2TagFlags::default(),
			size: 0,
			padding_start: None,
		}
	}
}

impl Id3v2Tag {
	/// Create an empty tag
	pub fn new() -> Self {
		Self::default()
	}

	/// The tag's flags
	pub fn flags(&self) -> Id3v2TagFlags {
		self.flags
	}

	/// Restrict the tag's flags
	pub fn set_flags(&mut self, flags: Id3v2TagFlags) {
		self.flags = flags;
	}

	/// The ID3v2 version of the tag's source
	///
	/// Tags are always written as ID3v2.4 regardless of this value.
	pub fn original_version(&self) -> Id3v2Version {
		self.original_version
	}

	/// The byte size of the frame region as declared by the source
	pub fn region_size(&self) -> u32 {
		self.size
	}

	/// The offset from the start of the tag at which padding begins, if any
	pub fn padding_start(&self) -> Option<u64> {
		self.padding_start
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// An iterator over the tag's frames, in file order
	pub fn iter(&self) -> impl Iterator<Item = &Frame> {
		self.frames.iter()
	}

	/// Get the first frame with the given ID
	pub fn get(&self, id: &FrameId) -> Option<&Frame> {
		self.frames.iter().find(|frame| frame.id() == id)
	}

	/// Get all frames with the given ID
	pub fn get_all<'a>(&'a self, id: &'a FrameId) -> impl Iterator<Item = &'a Frame> + 'a {
		self.frames.iter().filter(move |frame| frame.id() == id)
	}

	/// Get the text of the first text frame with the given ID
	pub fn get_text(&self, id: &FrameId) -> Option<&str> {
		match self.get(id) {
			Some(Frame::Text(tif)) => Some(&tif.value),
			_ => None,
		}
	}

	/// Insert a frame into the tag
	///
	/// If the frame's ID does not allow multiple instances, an existing
	/// frame with the same ID is replaced and returned.
	pub fn insert(&mut self, frame: Frame) -> Option<Frame> {
		if frame.id().allows_multiple() {
			self.frames.push(frame);
			return None;
		}

		match self.frames.iter().position(|f| f.id() == frame.id()) {
			Some(pos) => Some(std::mem::replace(&mut self.frames[pos], frame)),
			None => {
				self.frames.push(frame);
				None
			},
		}
	}

	/// Remove all frames with the given ID
	pub fn remove(&mut self, id: &FrameId) {
		self.frames.retain(|frame| frame.id() != id);
	}

	/// Create or update a text frame
	///
	/// An empty value removes the frame instead.
	pub fn set_text(&mut self, id: FrameId, value: impl Into<String>) {
		let value = value.into();
		if value.is_empty() {
			self.remove(&id);
			return;
		}

		match self.frames.iter().position(|f| f.id() == &id) {
			Some(pos) => {
				if let Frame::Text(tif) = &mut self.frames[pos] {
					tif.set_value(value);
				} else {
					self.frames[pos] = Frame::Text(TextInformationFrame::new(id, value));
				}
			},
			None => {
				self.frames
					.push(Frame::Text(TextInformationFrame::new(id, value)));
			},
		}
	}

	/// Serialize the tag as a complete ID3v2.4 byte block
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		super::write::create_tag(self, write_options)
	}

	// Accessors

	/// The track title ("TIT2")
	pub fn title(&self) -> Option<&str> {
		self.get_text(&TITLE_ID)
	}

	/// Set the track title ("TIT2")
	pub fn set_title(&mut self, title: impl Into<String>) {
		self.set_text(TITLE_ID, title);
	}

	/// The track artist ("TPE1")
	pub fn artist(&self) -> Option<&str> {
		self.get_text(&ARTIST_ID)
	}

	/// Set the track artist ("TPE1")
	pub fn set_artist(&mut self, artist: impl Into<String>) {
		self.set_text(ARTIST_ID, artist);
	}

	/// All values of the track artist ("TPE1")
	pub fn artists(&self) -> Vec<&str> {
		match self.get(&ARTIST_ID) {
			Some(Frame::Text(tif)) => tif.values().collect(),
			_ => Vec::new(),
		}
	}

	/// The album title ("TALB")
	pub fn album(&self) -> Option<&str> {
		self.get_text(&ALBUM_ID)
	}

	/// Set the album title ("TALB")
	pub fn set_album(&mut self, album: impl Into<String>) {
		self.set_text(ALBUM_ID, album);
	}

	/// The release year ("TYER", falling back to the "TDRC" year component)
	pub fn year(&self) -> Option<u32> {
		if let Some(year) = self.get_text(&YEAR_ID) {
			return year.parse().ok();
		}

		// In ID3v2.4, TYER was unified into the TDRC timestamp, whose first
		// four characters are the year
		self.get_text(&RECORDING_TIME_ID)
			.filter(|timestamp| timestamp.len() >= 4)
			.and_then(|timestamp| timestamp[..4].parse().ok())
	}

	/// Set the release year ("TYER")
	pub fn set_year(&mut self, year: u32) {
		self.set_text(YEAR_ID, year.to_string());
	}

	/// The track number ("TRCK", the part before any '/')
	pub fn track(&self) -> Option<u32> {
		self.split_num_pair(&TRACK_ID).0
	}

	/// The total number of tracks ("TRCK", the part after a '/')
	pub fn track_total(&self) -> Option<u32> {
		self.split_num_pair(&TRACK_ID).1
	}

	/// Set the track number ("TRCK")
	pub fn set_track(&mut self, track: u32) {
		let total = self.track_total();
		self.set_num_pair(TRACK_ID, Some(track), total);
	}

	/// The disc number ("TPOS", the part before any '/')
	pub fn disc(&self) -> Option<u32> {
		self.split_num_pair(&DISC_ID).0
	}

	/// The total number of discs ("TPOS", the part after a '/')
	pub fn disc_total(&self) -> Option<u32> {
		self.split_num_pair(&DISC_ID).1
	}

	/// Set the disc number ("TPOS")
	pub fn set_disc(&mut self, disc: u32) {
		let total = self.disc_total();
		self.set_num_pair(DISC_ID, Some(disc), total);
	}

	/// The composer ("TCOM")
	pub fn composer(&self) -> Option<&str> {
		self.get_text(&COMPOSER_ID)
	}

	/// Set the composer ("TCOM")
	pub fn set_composer(&mut self, composer: impl Into<String>) {
		self.set_text(COMPOSER_ID, composer);
	}

	/// The tempo in beats per minute ("TBPM")
	pub fn bpm(&self) -> Option<u32> {
		self.get_text(&BPM_ID).and_then(|bpm| bpm.parse().ok())
	}

	/// Set the tempo in beats per minute ("TBPM")
	pub fn set_bpm(&mut self, bpm: u32) {
		self.set_text(BPM_ID, bpm.to_string());
	}

	/// The genre ("TCON"), with ID3v1 numeric forms resolved
	///
	/// A bare integer, and the legacy `(n)` prefix when no text follows it,
	/// are replaced with the ID3v1 genre at that index.
	pub fn genre(&self) -> Option<String> {
		self.get_text(&GENRE_ID).map(process_genre)
	}

	/// The genre ("TCON") exactly as stored
	pub fn genre_raw(&self) -> Option<&str> {
		self.get_text(&GENRE_ID)
	}

	/// Set the genre ("TCON")
	pub fn set_genre(&mut self, genre: impl Into<String>) {
		self.set_text(GENRE_ID, genre);
	}

	/// The content of the first comment frame ("COMM")
	pub fn comment(&self) -> Option<&str> {
		match self.get(&COMMENT_ID) {
			Some(Frame::Descriptive(comment)) => Some(&comment.content),
			_ => None,
		}
	}

	/// Set a comment ("COMM"), replacing any existing comment frames
	pub fn set_comment(&mut self, comment: impl Into<String>) {
		self.remove(&COMMENT_ID);
		self.frames.push(Frame::Descriptive(DescriptiveTextFrame::new(
			COMMENT_ID, None, comment,
		)));
	}

	/// The content of the first lyrics frame ("USLT")
	pub fn lyrics(&self) -> Option<&str> {
		match self.get(&LYRICS_ID) {
			Some(Frame::Descriptive(lyrics)) => Some(&lyrics.content),
			_ => None,
		}
	}

	/// The first attached picture ("APIC")
	pub fn picture(&self) -> Option<&AttachedPictureFrame> {
		self.frames.iter().find_map(|frame| match frame {
			Frame::Picture(picture) if !picture.is_null() => Some(picture),
			_ => None,
		})
	}

	/// All attached pictures ("APIC"), including null ones
	pub fn pictures(&self) -> impl Iterator<Item = &AttachedPictureFrame> {
		self.frames.iter().filter_map(|frame| match frame {
			Frame::Picture(picture) => Some(picture),
			_ => None,
		})
	}

	fn split_num_pair(&self, id: &FrameId) -> (Option<u32>, Option<u32>) {
		let Some(text) = self.get_text(id) else {
			return (None, None);
		};

		// Only the first value of a multi-valued frame is considered
		let text = text.split('\0').next().unwrap_or_default();

		let mut split = text.splitn(2, '/');
		let number = split.next().and_then(|number| number.parse().ok());
		let total = split.next().and_then(|total| total.parse().ok());
		(number, total)
	}

	fn set_num_pair(&mut self, id: FrameId, number: Option<u32>, total: Option<u32>) {
		let content = match (number, total) {
			(Some(number), None) => number.to_string(),
			(Some(number), Some(total)) => format!("{number}/{total}"),
			(None, Some(total)) => format!("0/{total}"),
			(None, None) => String::new(),
		};
		self.set_text(id, content);
	}
}

fn process_genre(genre: &str) -> String {
	if genre.is_empty() {
		return String::new();
	}

	// A bare integer is an index into the ID3v1 genre list
	if genre.bytes().all(|b| b.is_ascii_digit()) {
		return genre
			.parse::<usize>()
			.ok()
			.and_then(|index| GENRES.get(index))
			.map_or_else(String::new, |&s| s.to_owned());
	}

	// The legacy "(n)" prefix; any trailing text wins over the index
	if let Some(rest) = genre.strip_prefix('(') {
		if let Some(close) = rest.find(')') {
			let index = &rest[..close];
			if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
				let remainder = &rest[close + 1..];
				if !remainder.is_empty() {
					return remainder.to_owned();
				}

				return index
					.parse::<usize>()
					.ok()
					.and_then(|index| GENRES.get(index))
					.map_or_else(String::new, |&s| s.to_owned());
			}
		}
	}

	genre.to_owned()
}

#[cfg(test)]
mod tests {
	use super::{process_genre, Id3v2Tag};
	use crate::id3::v2::frame::id::{FrameId, KnownFrameId};
	use crate::id3::v2::items::{DescriptiveTextFrame, TextInformationFrame};
	use crate::id3::v2::Frame;

	#[test_log::test]
	fn replacement_policy() {
		let mut tag = Id3v2Tag::new();

		// TIT2 does not allow multiples: the latest write wins
		tag.set_title("First");
		tag.set_title("Second");
		assert_eq!(tag.len(), 1);
		assert_eq!(tag.title(), Some("Second"));

		// COMM accumulates
		tag.insert(Frame::Descriptive(DescriptiveTextFrame::new(
			KnownFrameId::Comm.into(),
			Some(String::from("a")),
			"one",
		)));
		tag.insert(Frame::Descriptive(DescriptiveTextFrame::new(
			KnownFrameId::Comm.into(),
			Some(String::from("b")),
			"two",
		)));
		assert_eq!(tag.get_all(&KnownFrameId::Comm.into()).count(), 2);
	}

	#[test_log::test]
	fn insertion_order_is_preserved() {
		let mut tag = Id3v2Tag::new();
		for id in ["TIT2", "TALB", "TPE1"] {
			tag.insert(Frame::Text(TextInformationFrame::new(
				FrameId::parse(id),
				id.to_lowercase(),
			)));
		}

		let order: Vec<&str> = tag.iter().map(Frame::id_str).collect();
		assert_eq!(order, vec!["TIT2", "TALB", "TPE1"]);
	}

	#[test_log::test]
	fn number_pairs() {
		let mut tag = Id3v2Tag::new();

		tag.set_text(FrameId::parse("TRCK"), "5");
		assert_eq!(tag.track(), Some(5));
		assert_eq!(tag.track_total(), None);

		tag.set_text(FrameId::parse("TRCK"), "5/12");
		assert_eq!(tag.track(), Some(5));
		assert_eq!(tag.track_total(), Some(12));

		tag.set_text(FrameId::parse("TRCK"), "five");
		assert_eq!(tag.track(), None);
		assert_eq!(tag.track_total(), None);
	}

	#[test_log::test]
	fn genre_processing() {
		assert_eq!(process_genre("17"), "Rock");
		assert_eq!(process_genre("(17)"), "Rock");
		assert_eq!(process_genre("(17)Stoner Rock"), "Stoner Rock");
		assert_eq!(process_genre("Shoegaze"), "Shoegaze");
		assert_eq!(process_genre("(255)"), "");
		assert_eq!(process_genre(""), "");
	}

	#[test_log::test]
	fn year_from_tdrc() {
		let mut tag = Id3v2Tag::new();
		tag.set_text(FrameId::parse("TDRC"), "1984-06-17");
		assert_eq!(tag.year(), Some(1984));

		// TYER wins when present
		tag.set_text(FrameId::parse("TYER"), "1990");
		assert_eq!(tag.year(), Some(1990));
	}
}
