//! Keccak-256 of a fixed 64-byte preimage, built bit by bit out of GF(2) gates.
//!
//! The preimage is padded into a single rate block, absorbed into a zero state, permuted by
//! Keccak-f\[1600\] and the first 256 bits of the rate are squeezed out as the digest.

pub mod batch;
pub mod gates;
pub mod padding;
pub mod permutation;
pub mod reference;
pub mod sponge;

pub use batch::Keccak256Batch;
use keccak_gf2_core::Bit;
pub use permutation::ThetaVariant;

use crate::{
	api::GateApi,
	compiler::{CircuitBuilder, Wire, WitnessFiller},
};

pub const PREIMAGE_BYTES: usize = 64;
pub const DIGEST_BYTES: usize = 32;
pub const RATE_LANES: usize = reference::RATE_BYTES / 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeccakError {
	#[error("preimage must be exactly {} bits, got {actual_bits}", PREIMAGE_BYTES * 8)]
	UnsupportedPreimageLength { actual_bits: usize },
	#[error(
		"output length {output_len} must be a multiple of 8 bytes and at most the rate of {rate_bytes} bytes"
	)]
	UnsupportedOutputLength { output_len: usize, rate_bytes: usize },
	#[error("rate of {rate_bytes} bytes must be a multiple of 8 and at most 200")]
	UnsupportedRate { rate_bytes: usize },
	#[error("expected one claim per instance ({expected}), got {actual}")]
	ClaimCountMismatch { expected: usize, actual: usize },
}

/// Knobs for the Keccak circuits.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakParams {
	pub theta: ThetaVariant,
}

/// Computes the Keccak-256 digest bits of a 512-bit preimage with the default parameters.
pub fn compute_keccak256<A: GateApi>(
	api: &A,
	preimage: &[A::Var],
) -> Result<Vec<A::Var>, KeccakError> {
	compute_keccak256_with_params(api, preimage, &KeccakParams::default())
}

/// Computes the Keccak-256 digest bits of a 512-bit preimage.
///
/// Bits are least significant first within each byte, both for the preimage and the returned
/// 256-bit digest.
#[tracing::instrument(level = "debug", skip_all, fields(theta = ?params.theta))]
pub fn compute_keccak256_with_params<A: GateApi>(
	api: &A,
	preimage: &[A::Var],
	params: &KeccakParams,
) -> Result<Vec<A::Var>, KeccakError> {
	let block = padding::pad(api, preimage)?;

	let zero = api.constant(Bit::ZERO);
	let state = [[zero; 64]; 25];
	let state = sponge::absorb(api, &state, &block);
	let state = permutation::keccak_f1600(api, &state, params.theta);

	sponge::squeeze(&state, reference::RATE_BYTES, DIGEST_BYTES)
}

/// Asserts that `digest` is the Keccak-256 hash of `preimage`, one `digest[i]` assertion per
/// bit.
pub fn assert_keccak256<A: GateApi>(
	api: &A,
	preimage: &[A::Var],
	digest: &[A::Var],
	params: &KeccakParams,
) -> Result<(), KeccakError> {
	if digest.len() != DIGEST_BYTES * 8 {
		return Err(KeccakError::UnsupportedOutputLength {
			output_len: digest.len() / 8,
			rate_bytes: reference::RATE_BYTES,
		});
	}
	let computed = compute_keccak256_with_params(api, preimage, params)?;
	for (i, (computed, claimed)) in computed.iter().zip(digest).enumerate() {
		api.assert_eq(&format!("digest[{i}]"), *computed, *claimed);
	}
	Ok(())
}

/// Keccak-256 gadget asserting that a private preimage hashes to a public digest.
pub struct Keccak256 {
	/// 512 private preimage bits.
	pub preimage: Vec<Wire>,
	/// 256 public digest bits.
	pub digest: Vec<Wire>,
}

impl Keccak256 {
	/// Allocates the preimage as witness wires and the digest as inout wires and constrains
	/// them.
	pub fn new(b: &CircuitBuilder, params: &KeccakParams) -> Result<Self, KeccakError> {
		let preimage = (0..PREIMAGE_BYTES * 8).map(|_| b.add_witness()).collect();
		let digest = (0..DIGEST_BYTES * 8).map(|_| b.add_inout()).collect();
		Self::with_wires(b, preimage, digest, params)
	}

	/// Constrains `digest` to be the Keccak-256 hash of `preimage`.
	pub fn with_wires(
		b: &CircuitBuilder,
		preimage: Vec<Wire>,
		digest: Vec<Wire>,
		params: &KeccakParams,
	) -> Result<Self, KeccakError> {
		assert_keccak256(&b.subcircuit("keccak256"), &preimage, &digest, params)?;
		Ok(Self { preimage, digest })
	}

	pub fn populate_preimage(&self, w: &mut WitnessFiller, preimage: &[u8; PREIMAGE_BYTES]) {
		w.fill(&self.preimage, &Bit::bits_of_bytes(preimage));
	}

	pub fn populate_digest(&self, w: &mut WitnessFiller, digest: &[u8; DIGEST_BYTES]) {
		w.fill(&self.digest, &Bit::bits_of_bytes(digest));
	}

	/// Reads the digest currently held by the digest wires.
	pub fn read_digest(&self, w: &WitnessFiller) -> [u8; DIGEST_BYTES] {
		let bytes = Bit::bytes_from_bits(&w.read(&self.digest));
		std::array::from_fn(|i| bytes[i])
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::{Rng, SeedableRng, rngs::StdRng};
	use sha3::{Digest, Keccak256 as Keccak256Oracle};

	use super::*;
	use crate::{api::NativeApi, compiler::Circuit, constraint_verifier::verify_constraints};

	fn oracle(message: &[u8]) -> [u8; 32] {
		Keccak256Oracle::digest(message).into()
	}

	fn build(params: &KeccakParams) -> (Circuit, Keccak256) {
		let builder = CircuitBuilder::new();
		let keccak = Keccak256::new(&builder, params).unwrap();
		(builder.build(), keccak)
	}

	#[test]
	fn test_zero_message() {
		let message = [0u8; 64];
		let expected = oracle(&message);
		assert_eq!(reference::keccak_256(&message), expected);

		let (circuit, keccak) = build(&KeccakParams::default());
		let mut w = circuit.new_witness_filler();
		keccak.populate_preimage(&mut w, &message);
		keccak.populate_digest(&mut w, &expected);
		circuit.populate_wire_witness(&mut w).unwrap();
		assert_eq!(keccak.read_digest(&w), expected);

		let cs = circuit.constraint_system();
		verify_constraints(&cs, &w.into_value_vec()).unwrap();
	}

	#[test]
	fn test_flipped_preimage_bit_fails() {
		let message = [0u8; 64];
		let expected = oracle(&message);
		let mut tampered = message;
		tampered[0] ^= 1;

		let (circuit, keccak) = build(&KeccakParams::default());
		let mut w = circuit.new_witness_filler();
		keccak.populate_preimage(&mut w, &tampered);
		keccak.populate_digest(&mut w, &expected);
		let err = circuit.populate_wire_witness(&mut w).unwrap_err();
		assert!(err.total_count > 0);
		assert!(err.messages[0].starts_with("keccak256.digest["), "{}", err.messages[0]);

		// The unsatisfied assertions also show up as violated constraints.
		let cs = circuit.constraint_system();
		assert!(verify_constraints(&cs, &w.into_value_vec()).is_err());
	}

	#[test]
	fn test_canonical_theta_circuit() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut message = [0u8; 64];
		rng.fill(&mut message);

		let (circuit, keccak) = build(&KeccakParams {
			theta: ThetaVariant::Canonical,
		});
		let mut w = circuit.new_witness_filler();
		keccak.populate_preimage(&mut w, &message);
		keccak.populate_digest(&mut w, &oracle(&message));
		circuit.populate_wire_witness(&mut w).unwrap();
	}

	#[test]
	fn test_native_matches_oracle() {
		let mut rng = StdRng::seed_from_u64(0);
		let api = NativeApi::new();

		for _ in 0..8 {
			let mut message = [0u8; 64];
			rng.fill(&mut message);
			let expected = oracle(&message);

			for theta in [ThetaVariant::Compensated, ThetaVariant::Canonical] {
				let digest = compute_keccak256_with_params(
					&api,
					&Bit::bits_of_bytes(&message),
					&KeccakParams { theta },
				)
				.unwrap();
				assert_eq!(Bit::bytes_from_bits(&digest), expected.to_vec());
			}
		}
	}

	#[test]
	fn test_counting_bytes() {
		let message = (0..64u8).collect::<Vec<_>>();
		let api = NativeApi::new();
		let digest = compute_keccak256(&api, &Bit::bits_of_bytes(&message)).unwrap();
		assert_eq!(Bit::bytes_from_bits(&digest), oracle(&message).to_vec());

		let preimage = Bit::bits_of_bytes(&message);
		let claimed = Bit::bits_of_bytes(&oracle(&message));
		assert_keccak256(&api, &preimage, &claimed, &KeccakParams::default()).unwrap();
		assert_eq!(api.failed_assertions(), 0);
	}

	#[test]
	fn test_native_stale_digest_fails() {
		let message = [0u8; 64];
		let stale = Bit::bits_of_bytes(&oracle(&message));
		let mut tampered = message;
		tampered[0] ^= 1;

		let api = NativeApi::new();
		assert_keccak256(&api, &Bit::bits_of_bytes(&tampered), &stale, &KeccakParams::default())
			.unwrap();
		assert!(api.failed_assertions() > 0);
	}

	#[test]
	fn test_assert_rejects_short_digest() {
		let api = NativeApi::new();
		assert_eq!(
			assert_keccak256(&api, &[Bit::ZERO; 512], &[Bit::ZERO; 64], &KeccakParams::default()),
			Err(KeccakError::UnsupportedOutputLength {
				output_len: 8,
				rate_bytes: reference::RATE_BYTES
			})
		);
		assert_eq!(api.failed_assertions(), 0);
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(32))]

		#[test]
		fn prop_any_flipped_bit_fails(
			message in proptest::collection::vec(any::<u8>(), PREIMAGE_BYTES),
			bit in 0usize..PREIMAGE_BYTES * 8,
		) {
			let claimed = Bit::bits_of_bytes(&oracle(&message));
			let mut preimage = Bit::bits_of_bytes(&message);
			preimage[bit] = preimage[bit] + Bit::ONE;

			let api = NativeApi::new();
			assert_keccak256(&api, &preimage, &claimed, &KeccakParams::default()).unwrap();
			prop_assert!(api.failed_assertions() > 0);
		}
	}

	#[test]
	fn test_rejects_wrong_preimage_length() {
		let api = NativeApi::new();
		assert_eq!(
			compute_keccak256(&api, &[Bit::ZERO; 256]),
			Err(KeccakError::UnsupportedPreimageLength { actual_bits: 256 })
		);

		let builder = CircuitBuilder::new();
		let preimage = (0..512).map(|_| builder.add_witness()).collect();
		let digest = (0..128).map(|_| builder.add_inout()).collect();
		assert!(matches!(
			Keccak256::with_wires(&builder, preimage, digest, &KeccakParams::default()),
			Err(KeccakError::UnsupportedOutputLength { output_len: 16, .. })
		));
	}
}
