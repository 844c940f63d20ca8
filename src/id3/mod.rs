//! ID3 specific items
//!
//! ID3 does things differently than other tags, making working with them a
//! little more effort than other formats. Check the other modules for
//! important notes and/or warnings.

pub mod v1;
pub mod v2;
