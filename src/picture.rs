//! Picture item types shared by the attached picture frame

use std::fmt::{Display, Formatter};

/// The MIME type of an attached picture
///
/// Only PNG and JPEG are recognized; anything else nulls the picture that
/// carries it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
}

impl MimeType {
	/// Recognize a MIME string, accepting the short forms
	///
	/// `png`, `jpg`, `jpeg`, `image/png`, and `image/jpeg` are accepted in
	/// any case; everything else returns `None`.
	pub fn sniff(mime: &str) -> Option<Self> {
		match mime.to_ascii_lowercase().as_str() {
			"png" | "image/png" => Some(Self::Png),
			"jpg" | "jpeg" | "image/jpeg" => Some(Self::Jpeg),
			_ => None,
		}
	}

	/// The full `image/…` form of the MIME type
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Png => "image/png",
			Self::Jpeg => "image/jpeg",
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to the ID3v2 APIC frame
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	/// Other
	Other,
	/// 32x32 pixels 'file icon' (PNG only)
	Icon,
	/// Other file icon
	OtherIcon,
	/// Cover (front)
	CoverFront,
	/// Cover (back)
	CoverBack,
	/// Leaflet page
	Leaflet,
	/// Media (e.g. label side of CD)
	Media,
	/// Lead artist/lead performer/soloist
	LeadArtist,
	/// Artist/performer
	Artist,
	/// Conductor
	Conductor,
	/// Band/Orchestra
	Band,
	/// Composer
	Composer,
	/// Lyricist/text writer
	Lyricist,
	/// Recording location
	RecordingLocation,
	/// During recording
	DuringRecording,
	/// During performance
	DuringPerformance,
	/// Movie/video screen capture
	ScreenCapture,
	/// A bright coloured fish
	BrightFish,
	/// Illustration
	Illustration,
	/// Band/artist logotype
	BandLogo,
	/// Publisher/Studio logotype
	PublisherLogo,
	/// An unknown picture type
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a [`PictureType`]
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a [`PictureType`] from a `u8`
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}
