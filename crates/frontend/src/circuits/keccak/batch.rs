use super::{DIGEST_BYTES, Keccak256, KeccakError, KeccakParams, PREIMAGE_BYTES};
use crate::compiler::{Circuit, CircuitBuilder, PopulateError, WitnessFiller};

/// One preimage and its claimed digest.
pub type Claim = ([u8; PREIMAGE_BYTES], [u8; DIGEST_BYTES]);

/// Several independent Keccak-256 instances sharing one circuit.
///
/// Instances share no wires; each lives in its own `instance{i}` subcircuit.
pub struct Keccak256Batch {
	pub instances: Vec<Keccak256>,
}

impl Keccak256Batch {
	pub const DEFAULT_N_INSTANCES: usize = 8;

	pub fn new(
		b: &CircuitBuilder,
		n_instances: usize,
		params: &KeccakParams,
	) -> Result<Self, KeccakError> {
		let instances = (0..n_instances)
			.map(|i| Keccak256::new(&b.subcircuit(format!("instance{i}")), params))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Self { instances })
	}

	pub fn n_instances(&self) -> usize {
		self.instances.len()
	}

	/// Fills the preimage and the claimed digest of one instance.
	pub fn populate(
		&self,
		w: &mut WitnessFiller,
		instance: usize,
		preimage: &[u8; PREIMAGE_BYTES],
		digest: &[u8; DIGEST_BYTES],
	) {
		let keccak = &self.instances[instance];
		keccak.populate_preimage(w, preimage);
		keccak.populate_digest(w, digest);
	}

	/// Fills every instance from `claims`, one claim per instance.
	pub fn populate_all(&self, w: &mut WitnessFiller, claims: &[Claim]) -> Result<(), KeccakError> {
		self.check_claim_count(claims)?;
		self.fill_claims(w, claims);
		Ok(())
	}

	fn check_claim_count(&self, claims: &[Claim]) -> Result<(), KeccakError> {
		if claims.len() != self.n_instances() {
			return Err(KeccakError::ClaimCountMismatch {
				expected: self.n_instances(),
				actual: claims.len(),
			});
		}
		Ok(())
	}

	fn fill_claims(&self, w: &mut WitnessFiller, claims: &[Claim]) {
		for (instance, (preimage, digest)) in claims.iter().enumerate() {
			self.populate(w, instance, preimage, digest);
		}
	}

	/// Evaluates many full assignments of the batch in parallel.
	///
	/// Each assignment must hold one claim per instance. Returns one outcome per assignment, in
	/// order.
	pub fn check_assignments(
		&self,
		circuit: &Circuit,
		assignments: &[Vec<Claim>],
	) -> Result<Vec<Result<(), PopulateError>>, KeccakError> {
		let _span =
			tracing::debug_span!("check_assignments", n_assignments = assignments.len()).entered();
		for claims in assignments {
			self.check_claim_count(claims)?;
		}
		Ok(circuit.populate_many(assignments, |claims, w| self.fill_claims(w, claims)))
	}
}

#[cfg(test)]
mod tests {
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;
	use crate::circuits::keccak::reference::keccak_256;

	fn random_claim(rng: &mut StdRng) -> Claim {
		let mut preimage = [0u8; PREIMAGE_BYTES];
		rng.fill(&mut preimage);
		let mut digest = keccak_256(&preimage);
		if rng.random_bool(0.25) {
			digest[rng.random_range(0..DIGEST_BYTES)] ^= 1 << rng.random_range(0..8);
		}
		(preimage, digest)
	}

	#[test]
	fn test_batch_matches_isolated_instances() {
		const N_INSTANCES: usize = 2;
		const K: usize = 16;
		let params = KeccakParams::default();

		let builder = CircuitBuilder::new();
		let batch = Keccak256Batch::new(&builder, N_INSTANCES, &params).unwrap();
		let circuit = builder.build();

		let builder = CircuitBuilder::new();
		let single = Keccak256::new(&builder, &params).unwrap();
		let single_circuit = builder.build();

		let mut rng = StdRng::seed_from_u64(0);
		let assignments = (0..K)
			.map(|_| (0..N_INSTANCES).map(|_| random_claim(&mut rng)).collect::<Vec<_>>())
			.collect::<Vec<_>>();

		let outcomes = batch.check_assignments(&circuit, &assignments).unwrap();
		assert_eq!(outcomes.len(), K);

		for (claims, outcome) in assignments.iter().zip(&outcomes) {
			let isolated = claims
				.iter()
				.map(|(preimage, digest)| {
					let mut w = single_circuit.new_witness_filler();
					single.populate_preimage(&mut w, preimage);
					single.populate_digest(&mut w, digest);
					single_circuit.populate_wire_witness(&mut w).is_ok()
				})
				.collect::<Vec<_>>();
			assert_eq!(outcome.is_ok(), isolated.iter().all(|ok| *ok));

			// Failures name exactly the instances that failed in isolation.
			if let Err(err) = outcome {
				for (instance, ok) in isolated.iter().enumerate() {
					let prefix = format!("instance{instance}.");
					let named = err.messages.iter().any(|m| m.starts_with(&prefix));
					assert_eq!(named, !ok);
				}
			}
		}
	}

	#[test]
	fn test_claim_count_mismatch() {
		let builder = CircuitBuilder::new();
		let batch = Keccak256Batch::new(&builder, 2, &KeccakParams::default()).unwrap();
		let circuit = builder.build();

		let mut rng = StdRng::seed_from_u64(1);
		let one_claim = vec![random_claim(&mut rng)];
		let mut w = circuit.new_witness_filler();
		assert_eq!(
			batch.populate_all(&mut w, &one_claim),
			Err(KeccakError::ClaimCountMismatch {
				expected: 2,
				actual: 1
			})
		);

		let two_claims = vec![random_claim(&mut rng), random_claim(&mut rng)];
		assert!(batch.populate_all(&mut w, &two_claims).is_ok());

		assert!(matches!(
			batch.check_assignments(&circuit, &[two_claims, one_claim]),
			Err(KeccakError::ClaimCountMismatch {
				expected: 2,
				actual: 1
			})
		));
	}
}
