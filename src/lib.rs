//! Read, edit, and write ID3 metadata.
//!
//! # Supported formats
//!
//! * **ID3v1** / **ID3v1.1** / **ID3v1-Extended** — the fixed trailers at the
//!   end of the file (read)
//! * **ID3v2.2** / **ID3v2.3** / **ID3v2.4** — the frame container at the
//!   start of the file (read); tags are always written as ID3v2.4
//!
//! # Examples
//!
//! ## Reading a tag
//!
//! ```rust,no_run
//! # fn main() -> stave::error::Result<()> {
//! use stave::config::ParseOptions;
//! use stave::tag::Tag;
//!
//! use std::fs::File;
//!
//! let mut file = File::open("music.mp3")?;
//! let tag = Tag::read_from(&mut file, ParseOptions::new())?;
//!
//! if let Some(title) = tag.title() {
//! 	println!("Title: {title}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Editing and serializing
//!
//! ```rust
//! # fn main() -> stave::error::Result<()> {
//! use stave::config::WriteOptions;
//! use stave::tag::Tag;
//!
//! let mut tag = Tag::new();
//! tag.set_title("Dirge");
//! tag.set_artist("Death In Vegas");
//!
//! // A complete ID3v2.4 tag, ready to be spliced ahead of the audio
//! let bytes = tag.as_bytes(WriteOptions::default())?;
//! assert_eq!(&bytes[..3], b"ID3");
//! # Ok(())
//! # }
//! ```
//!
//! Reads never fail on malformed content: frames that cannot be parsed are
//! preserved as opaque binary frames, a malformed ID3v2 section is skipped
//! while the v1 trailers still populate, and a file too short for any
//! marker yields a null [`Tag`](tag::Tag).

pub mod config;
pub mod error;
pub mod id3;
mod macros;
pub mod picture;
pub mod tag;
pub(crate) mod util;

pub use crate::tag::Tag;
pub use crate::util::text::TextEncoding;
