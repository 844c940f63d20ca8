//! Utilities for working with ID3v2 integers
//!
//! ID3v2 stores multi-byte integers in two big-endian forms: plain base-256,
//! and *synchsafe*, where the most significant bit of every byte is zero so
//! the value can never be mistaken for an MPEG frame sync.
//!
//! Whether a field is synchsafe depends solely on the tag version, so the
//! flag is passed in at the single boundary where the version is known.

/// Decode a big-endian integer of 1 to 8 bytes
///
/// When `synchsafe` is set, each byte contributes 7 bits instead of 8.
///
/// # Examples
///
/// ```rust
/// use stave::id3::v2::util::synchsafe::decode_int;
///
/// // 0x0201 read plain
/// assert_eq!(decode_int(&[0x02, 0x01], false), 513);
///
/// // The same bytes read synchsafe
/// assert_eq!(decode_int(&[0x02, 0x01], true), 257);
/// ```
pub fn decode_int(bytes: &[u8], synchsafe: bool) -> u64 {
	debug_assert!(bytes.len() <= 8);

	let shift = if synchsafe { 7 } else { 8 };

	bytes
		.iter()
		.fold(0_u64, |value, byte| (value << shift) | u64::from(*byte))
}

/// Encode an integer as `width` big-endian bytes
///
/// When `synchsafe` is set, each byte carries 7 bits and its high bit is
/// always zero. A value that does not fit in `width` bytes is clamped to the
/// maximum representable value for that width.
///
/// # Panics
///
/// If `width` is zero or greater than 8.
///
/// # Examples
///
/// ```rust
/// use stave::id3::v2::util::synchsafe::encode_int;
///
/// assert_eq!(encode_int(257, 2, true), vec![0x02, 0x01]);
/// assert_eq!(encode_int(257, 2, false), vec![0x01, 0x01]);
///
/// // Out of range values clamp to the maximum for the width
/// assert_eq!(encode_int(u64::MAX, 2, true), vec![0x7F, 0x7F]);
/// ```
pub fn encode_int(value: u64, width: usize, synchsafe: bool) -> Vec<u8> {
	assert!(width >= 1 && width <= 8, "integer width must be within 1..=8");

	let bits_per_byte = if synchsafe { 7 } else { 8 };
	let byte_mask = if synchsafe { 0x7F_u64 } else { 0xFF_u64 };

	let max_value = if width * bits_per_byte >= 64 {
		u64::MAX
	} else {
		(1_u64 << (width * bits_per_byte)) - 1
	};
	let value = std::cmp::min(value, max_value);

	(0..width)
		.rev()
		.map(|i| ((value >> (i * bits_per_byte)) & byte_mask) as u8)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::{decode_int, encode_int};

	#[test]
	fn tag_size_round_trip() {
		// The size field of the spec's second end-to-end scenario
		assert_eq!(decode_int(&[0x00, 0x00, 0x00, 0x18], true), 24);
		assert_eq!(encode_int(24, 4, true), vec![0x00, 0x00, 0x00, 0x18]);
	}

	#[test]
	fn synchsafe_high_bits() {
		// Every encoded byte must have a zero MSB
		for byte in encode_int(0xFFF_FFFF, 4, true) {
			assert_eq!(byte & 0x80, 0);
		}

		assert_eq!(
			encode_int(0xFFF_FFFF, 4, true),
			vec![0x7F, 0x7F, 0x7F, 0x7F]
		);
		assert_eq!(decode_int(&[0x7F, 0x7F, 0x7F, 0x7F], true), 0xFFF_FFFF);
	}

	#[test]
	fn clamping() {
		assert_eq!(encode_int(u64::MAX, 4, false), vec![0xFF; 4]);
		assert_eq!(encode_int(u64::MAX, 4, true), vec![0x7F; 4]);
		assert_eq!(encode_int(300, 1, false), vec![0xFF]);
		assert_eq!(encode_int(200, 1, true), vec![0x7F]);
	}

	macro_rules! byte_round_trip_tests {
		($($width:literal),+) => {
			paste::paste! {
				$(
					#[test]
					fn [<width_ $width _round_trip>]() {
						// decode -> encode must reproduce the input bytes for
						// both integer forms, provided the high bits respect
						// the synchsafe flag
						let plain: Vec<u8> = (1..=$width).map(|i| i as u8 | 0x80).collect();
						assert_eq!(
							encode_int(decode_int(&plain, false), $width, false),
							plain
						);

						let synch: Vec<u8> = (1..=$width).map(|i| i as u8 & 0x7F).collect();
						assert_eq!(
							encode_int(decode_int(&synch, true), $width, true),
							synch
						);
					}
				)+
			}
		};
	}

	byte_round_trip_tests!(1, 2, 3, 4, 5, 6, 7, 8);
}
