//! pad10*1 for a single 64-byte preimage.

use keccak_gf2_core::Bit;

use super::{
	KeccakError, PREIMAGE_BYTES, RATE_LANES,
	gates::Lane,
	reference::{PADDING_BYTE, RATE_BYTES},
};
use crate::api::GateApi;

/// Pads a 64-byte preimage into one rate block: `0x01`, zeros, then `0x80` in the last byte.
pub fn pad_bytes(preimage: &[u8]) -> Result<[u8; RATE_BYTES], KeccakError> {
	if preimage.len() != PREIMAGE_BYTES {
		return Err(KeccakError::UnsupportedPreimageLength {
			actual_bits: preimage.len() * 8,
		});
	}
	let mut block = [0u8; RATE_BYTES];
	block[..PREIMAGE_BYTES].copy_from_slice(preimage);
	block[PREIMAGE_BYTES] = PADDING_BYTE;
	block[RATE_BYTES - 1] |= 0x80;
	Ok(block)
}

/// Pads 512 preimage bits (LSB first within each byte) and slices the 1088-bit result into
/// 17 lanes. Padding bits are constants.
pub fn pad<A: GateApi>(
	api: &A,
	preimage: &[A::Var],
) -> Result<[Lane<A::Var>; RATE_LANES], KeccakError> {
	if preimage.len() != PREIMAGE_BYTES * 8 {
		return Err(KeccakError::UnsupportedPreimageLength {
			actual_bits: preimage.len(),
		});
	}

	let mut padding = [0u8; RATE_BYTES - PREIMAGE_BYTES];
	padding[0] = PADDING_BYTE;
	padding[padding.len() - 1] |= 0x80;

	let bits = preimage
		.iter()
		.copied()
		.chain(
			Bit::bits_of_bytes(&padding)
				.into_iter()
				.map(|bit| api.constant(bit)),
		)
		.collect::<Vec<_>>();
	debug_assert_eq!(bits.len(), RATE_BYTES * 8);

	Ok(std::array::from_fn(|lane| std::array::from_fn(|i| bits[64 * lane + i])))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{api::NativeApi, compiler::CircuitBuilder};

	#[test]
	fn test_pad_bytes_layout() {
		let block = pad_bytes(&[0xab; 64]).unwrap();
		assert!(block[..64].iter().all(|byte| *byte == 0xab));
		assert_eq!(block[64], 0x01);
		assert!(block[65..135].iter().all(|byte| *byte == 0));
		assert_eq!(block[135], 0x80);
	}

	#[test]
	fn test_rejects_other_lengths() {
		assert!(matches!(
			pad_bytes(&[0; 63]),
			Err(KeccakError::UnsupportedPreimageLength { actual_bits: 504 })
		));

		let api = NativeApi::new();
		assert!(matches!(
			pad(&api, &[Bit::ZERO; 513]),
			Err(KeccakError::UnsupportedPreimageLength { actual_bits: 513 })
		));
	}

	#[test]
	fn test_pad_lanes_match_bytes() {
		let preimage = (0..64u8).map(|i| i.wrapping_mul(37)).collect::<Vec<_>>();
		let api = NativeApi::new();
		let lanes = pad(&api, &Bit::bits_of_bytes(&preimage)).unwrap();

		let block = pad_bytes(&preimage).unwrap();
		for (lane, chunk) in lanes.iter().zip(block.chunks_exact(8)) {
			let expected = u64::from_le_bytes(chunk.try_into().unwrap());
			assert_eq!(Bit::u64_from_bits(lane), expected);
		}
		// Bit 512 opens the padding and bit 1087 closes it.
		assert_eq!(lanes[8][0], Bit::ONE);
		assert_eq!(lanes[16][63], Bit::ONE);
	}

	#[test]
	fn test_padding_emits_no_gates() {
		let builder = CircuitBuilder::new();
		let preimage = (0..512).map(|_| builder.add_witness()).collect::<Vec<_>>();
		let lanes = pad(&builder, &preimage).unwrap();
		assert_eq!(lanes[0][0], preimage[0]);
		assert_eq!(lanes[7][63], preimage[511]);
		assert_eq!(builder.build().n_gates(), 0);
	}
}
