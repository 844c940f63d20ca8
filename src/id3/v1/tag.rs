use super::GENRES;

/// An ID3v1 tag
///
/// ID3v1 is a severely limited format, with each field being incredibly
/// small in size. All fields have been commented with their maximum sizes
/// and any other additional restrictions.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub title: Option<String>,
	/// Track artist, 30 bytes max
	pub artist: Option<String>,
	/// Album title, 30 bytes max
	pub album: Option<String>,
	/// Release year, 4 ASCII digits
	pub year: Option<String>,
	/// A short comment
	///
	/// The number of bytes differs between versions, but not much.
	/// A v1 tag has 30 bytes available, a v1.1 tag only 28.
	pub comment: Option<String>,
	/// The track number, 1 byte max
	///
	/// Issues:
	///
	/// * The track number **cannot** be 0. Readers look for a null byte at
	///   the end of the comment to differentiate between v1 and v1.1.
	/// * A v1 tag may have been read, which does *not* have a track number.
	pub track_number: Option<u8>,
	/// The track's genre, 1 byte max
	///
	/// ID3v1 has a predefined set of genres, see [`GENRES`](crate::id3::v1::GENRES).
	/// This byte should be an index into it.
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	/// Create a new empty `Id3v1Tag`
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the trailer carried a track number, making it ID3v1.1
	pub fn is_v11(&self) -> bool {
		self.track_number.is_some()
	}

	/// The genre as a string, resolved through [`GENRES`]
	pub fn genre_str(&self) -> Option<&'static str> {
		self.genre
			.and_then(|genre| GENRES.get(usize::from(genre)).copied())
	}

	/// Whether every field is empty
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// An ID3v1-Extended block
///
/// The `TAG+` block immediately precedes the `TAG` trailer and widens its
/// text fields. It is only meaningful alongside a v1 trailer; a `TAG+`
/// block without a following `TAG` is ignored.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1ExtendedTag {
	/// Track title, 60 bytes max
	pub title: Option<String>,
	/// Track artist, 60 bytes max
	pub artist: Option<String>,
	/// Album title, 60 bytes max
	pub album: Option<String>,
	/// Playback speed, 1 = slow through 4 = hardcore
	pub speed: Option<u8>,
	/// The genre as free-form text, 30 bytes max
	pub genre: Option<String>,
	/// The start of the music, as "mmm:ss"
	pub start_time: Option<String>,
	/// The end of the music, as "mmm:ss"
	pub end_time: Option<String>,
}

impl Id3v1ExtendedTag {
	/// Create a new empty `Id3v1ExtendedTag`
	pub fn new() -> Self {
		Self::default()
	}
}
