use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

/// The disposition of a frame's body, which decides how it is parsed
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FrameCategory {
	/// A frame whose body is an encoding byte followed by text
	Text,
	/// A text frame whose content must be an ASCII integer string
	NumericalText,
	/// A text frame carrying an optional language and description
	DescriptiveText,
	/// A frame whose body is a Latin-1 URL with no encoding byte
	Url,
	/// An attached picture
	Picture,
	/// An unsigned play counter
	PlayCount,
	/// A rating and play counter keyed by an email address
	Popularimeter,
	/// A list of timestamped event codes
	EventTiming,
	/// Anything the crate does not parse further
	Unknown,
}

macro_rules! frame_ids {
	($($variant:ident => ($id:literal, $category:ident, $multiple:literal, $description:literal)),+ $(,)?) => {
		/// A frame ID defined by the ID3v2.3/ID3v2.4 specifications
		///
		/// The variant names are the four character IDs themselves. ID3v2.2
		/// three character IDs never appear here; they are translated with
		/// [`upgrade_v2`](crate::id3::v2::upgrade_v2) at parse time.
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
		#[allow(missing_docs)]
		#[non_exhaustive]
		pub enum KnownFrameId {
			$(
				#[doc = $description]
				$variant,
			)+
		}

		impl KnownFrameId {
			/// Look up a 4 character ID string in the registry
			pub fn from_str(id: &str) -> Option<Self> {
				static INSTANCE: OnceLock<HashMap<&'static str, KnownFrameId>> = OnceLock::new();
				INSTANCE
					.get_or_init(|| {
						let mut map = HashMap::new();
						$(
							map.insert($id, KnownFrameId::$variant);
						)+
						map
					})
					.get(id)
					.copied()
			}

			/// The 4 character textual form of the ID
			pub fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $id,)+
				}
			}

			/// How the frame body is laid out
			pub fn category(self) -> FrameCategory {
				match self {
					$(Self::$variant => FrameCategory::$category,)+
				}
			}

			/// Whether a tag may contain more than one frame with this ID
			pub fn allows_multiple(self) -> bool {
				match self {
					$(Self::$variant => $multiple,)+
				}
			}

			/// A human readable description of the frame
			pub fn description(self) -> &'static str {
				match self {
					$(Self::$variant => $description,)+
				}
			}
		}
	};
}

frame_ids! {
	Aenc => ("AENC", Unknown, true, "Audio encryption"),
	Apic => ("APIC", Picture, true, "Attached picture"),
	Aspi => ("ASPI", Unknown, false, "Audio seek point index"),
	Comm => ("COMM", DescriptiveText, true, "Comments"),
	Comr => ("COMR", Unknown, true, "Commercial frame"),
	Encr => ("ENCR", Unknown, true, "Encryption method registration"),
	Equ2 => ("EQU2", Unknown, true, "Equalisation (2)"),
	Equa => ("EQUA", Unknown, false, "Equalisation"),
	Etco => ("ETCO", EventTiming, false, "Event timing codes"),
	Geob => ("GEOB", Unknown, true, "General encapsulated object"),
	Grid => ("GRID", Unknown, true, "Group identification registration"),
	Ipls => ("IPLS", Text, false, "Involved people list"),
	Link => ("LINK", Unknown, true, "Linked information"),
	Mcdi => ("MCDI", Unknown, false, "Music CD identifier"),
	Mllt => ("MLLT", Unknown, false, "MPEG location lookup table"),
	Owne => ("OWNE", Unknown, false, "Ownership frame"),
	Pcnt => ("PCNT", PlayCount, false, "Play counter"),
	Popm => ("POPM", Popularimeter, true, "Popularimeter"),
	Poss => ("POSS", Unknown, false, "Position synchronisation frame"),
	Priv => ("PRIV", Unknown, true, "Private frame"),
	Rbuf => ("RBUF", Unknown, false, "Recommended buffer size"),
	Rva2 => ("RVA2", Unknown, true, "Relative volume adjustment (2)"),
	Rvad => ("RVAD", Unknown, false, "Relative volume adjustment"),
	Rvrb => ("RVRB", Unknown, false, "Reverb"),
	Seek => ("SEEK", Unknown, false, "Seek frame"),
	Sign => ("SIGN", Unknown, true, "Signature frame"),
	Sylt => ("SYLT", Unknown, true, "Synchronised lyrics/text"),
	Sytc => ("SYTC", Unknown, false, "Synchronised tempo codes"),
	Talb => ("TALB", Text, false, "Album/Movie/Show title"),
	Tbpm => ("TBPM", NumericalText, false, "BPM (beats per minute)"),
	Tcom => ("TCOM", Text, false, "Composer"),
	Tcon => ("TCON", Text, false, "Content type"),
	Tcop => ("TCOP", Text, false, "Copyright message"),
	Tdat => ("TDAT", NumericalText, false, "Date"),
	Tden => ("TDEN", Text, false, "Encoding time"),
	Tdly => ("TDLY", NumericalText, false, "Playlist delay"),
	Tdor => ("TDOR", Text, false, "Original release time"),
	Tdrc => ("TDRC", Text, false, "Recording time"),
	Tdrl => ("TDRL", Text, false, "Release time"),
	Tdtg => ("TDTG", Text, false, "Tagging time"),
	Tenc => ("TENC", Text, false, "Encoded by"),
	Text => ("TEXT", Text, false, "Lyricist/Text writer"),
	Tflt => ("TFLT", Text, false, "File type"),
	Time => ("TIME", NumericalText, false, "Time"),
	Tipl => ("TIPL", Text, false, "Involved people list"),
	Tit1 => ("TIT1", Text, false, "Content group description"),
	Tit2 => ("TIT2", Text, false, "Title/songname/content description"),
	Tit3 => ("TIT3", Text, false, "Subtitle/Description refinement"),
	Tkey => ("TKEY", Text, false, "Initial key"),
	Tlan => ("TLAN", Text, false, "Language(s)"),
	Tlen => ("TLEN", NumericalText, false, "Length"),
	Tmcl => ("TMCL", Text, false, "Musician credits list"),
	Tmed => ("TMED", Text, false, "Media type"),
	Tmoo => ("TMOO", Text, false, "Mood"),
	Toal => ("TOAL", Text, false, "Original album/movie/show title"),
	Tofn => ("TOFN", Text, false, "Original filename"),
	Toly => ("TOLY", Text, false, "Original lyricist(s)/text writer(s)"),
	Tope => ("TOPE", Text, false, "Original artist(s)/performer(s)"),
	Tory => ("TORY", NumericalText, false, "Original release year"),
	Town => ("TOWN", Text, false, "File owner/licensee"),
	Tpe1 => ("TPE1", Text, false, "Lead performer(s)/Soloist(s)"),
	Tpe2 => ("TPE2", Text, false, "Band/orchestra/accompaniment"),
	Tpe3 => ("TPE3", Text, false, "Conductor/performer refinement"),
	Tpe4 => ("TPE4", Text, false, "Interpreted, remixed, or otherwise modified by"),
	Tpos => ("TPOS", Text, false, "Part of a set"),
	Tpro => ("TPRO", Text, false, "Produced notice"),
	Tpub => ("TPUB", Text, false, "Publisher"),
	Trck => ("TRCK", Text, false, "Track number/Position in set"),
	Trda => ("TRDA", Text, false, "Recording dates"),
	Trsn => ("TRSN", Text, false, "Internet radio station name"),
	Trso => ("TRSO", Text, false, "Internet radio station owner"),
	Tsiz => ("TSIZ", Text, false, "Size"),
	Tso2 => ("TSO2", Text, false, "Album artist sort order"),
	Tsoa => ("TSOA", Text, false, "Album sort order"),
	Tsoc => ("TSOC", Text, false, "Composer sort order"),
	Tsop => ("TSOP", Text, false, "Performer sort order"),
	Tsot => ("TSOT", Text, false, "Title sort order"),
	Tsrc => ("TSRC", Text, false, "ISRC (international standard recording code)"),
	Tsse => ("TSSE", Text, false, "Software/Hardware and settings used for encoding"),
	Tsst => ("TSST", Text, false, "Set subtitle"),
	Txxx => ("TXXX", DescriptiveText, true, "User defined text information"),
	Tyer => ("TYER", NumericalText, false, "Year"),
	Ufid => ("UFID", Unknown, true, "Unique file identifier"),
	User => ("USER", DescriptiveText, true, "Terms of use"),
	Uslt => ("USLT", DescriptiveText, true, "Unsynchronised lyrics/text transcription"),
	Wcom => ("WCOM", Url, true, "Commercial information"),
	Wcop => ("WCOP", Url, false, "Copyright/Legal information"),
	Woaf => ("WOAF", Url, false, "Official audio file webpage"),
	Woar => ("WOAR", Url, true, "Official artist/performer webpage"),
	Woas => ("WOAS", Url, false, "Official audio source webpage"),
	Wors => ("WORS", Url, false, "Official Internet radio station homepage"),
	Wpay => ("WPAY", Url, false, "Payment"),
	Wpub => ("WPUB", Url, false, "Publishers official webpage"),
	Wxxx => ("WXXX", DescriptiveText, true, "User defined URL link"),
}

/// The 4 character form given to IDs with no registry entry
pub const UNKNOWN_ID_STR: &str = "XXXX";

/// An ID3v2 frame ID
///
/// Known IDs compare by their registry entry; unknown IDs compare only by
/// their literal 4 character form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameId {
	/// An ID present in the registry
	Known(KnownFrameId),
	/// An ID with no registry entry, stored as its literal form
	Unknown(String),
}

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 4)
	pub fn new(id: &str) -> Result<Self> {
		Self::verify_id(id)?;

		if id.len() != 4 {
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameId(id.as_bytes().to_vec())).into());
		}

		Ok(Self::parse(id))
	}

	// Infallible construction for IDs that have already been verified
	pub(crate) fn parse(id: &str) -> Self {
		match KnownFrameId::from_str(id) {
			Some(known) => Self::Known(known),
			None => Self::Unknown(id.to_owned()),
		}
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		match self {
			Self::Known(known) => known.as_str(),
			Self::Unknown(literal) => literal,
		}
	}

	/// How the frame body is laid out
	///
	/// Unknown IDs are always [`FrameCategory::Unknown`].
	pub fn category(&self) -> FrameCategory {
		match self {
			Self::Known(known) => known.category(),
			Self::Unknown(_) => FrameCategory::Unknown,
		}
	}

	/// Whether a tag may contain more than one frame with this ID
	pub fn allows_multiple(&self) -> bool {
		match self {
			Self::Known(known) => known.allows_multiple(),
			Self::Unknown(_) => false,
		}
	}

	/// A human readable description of the frame
	pub fn description(&self) -> Cow<'static, str> {
		match self {
			Self::Known(known) => Cow::Borrowed(known.description()),
			Self::Unknown(literal) => Cow::Owned(format!("Unknown frame ({literal})")),
		}
	}

	/// Whether the ID has no registry entry
	pub fn is_unknown(&self) -> bool {
		matches!(self, Self::Unknown(_))
	}

	pub(crate) fn verify_id(id_str: &str) -> Result<()> {
		for c in id_str.chars() {
			if !c.is_ascii_uppercase() && !c.is_ascii_digit() {
				return Err(
					Id3v2Error::new(Id3v2ErrorKind::BadFrameId(id_str.as_bytes().to_vec())).into(),
				);
			}
		}

		Ok(())
	}
}

impl From<KnownFrameId> for FrameId {
	fn from(value: KnownFrameId) -> Self {
		Self::Known(value)
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
