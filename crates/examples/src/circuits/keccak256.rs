//! Batch of Keccak-256 instances over 64-byte preimages

use anyhow::{Result, ensure};
use clap::{Args, ValueEnum};
use keccak_gf2_frontend::{
	circuits::keccak::{
		DIGEST_BYTES, KeccakParams, Keccak256Batch, PREIMAGE_BYTES, ThetaVariant,
	},
	compiler::{CircuitBuilder, WitnessFiller},
};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use sha3::{Digest, Keccak256};

use crate::ExampleCircuit;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Theta {
	Compensated,
	Canonical,
}

impl From<Theta> for ThetaVariant {
	fn from(theta: Theta) -> Self {
		match theta {
			Theta::Compensated => ThetaVariant::Compensated,
			Theta::Canonical => ThetaVariant::Canonical,
		}
	}
}

#[derive(Debug, Clone, Args)]
pub struct Params {
	/// Number of independent Keccak-256 instances in the circuit
	#[arg(short = 'n', long, default_value_t = Keccak256Batch::DEFAULT_N_INSTANCES)]
	pub n_instances: usize,

	/// Formulation of the Theta step
	#[arg(long, value_enum, default_value_t = Theta::Compensated)]
	pub theta: Theta,
}

#[derive(Debug, Clone, Args)]
pub struct Instance {
	/// Seed for the random preimages
	#[arg(long, default_value_t = 0)]
	pub seed: u64,

	/// Flip this bit of the first preimage after its digest is computed, which must make the
	/// circuit reject the witness
	#[arg(long)]
	pub flip_bit: Option<usize>,
}

pub struct Keccak256Example {
	batch: Keccak256Batch,
}

impl ExampleCircuit for Keccak256Example {
	type Params = Params;
	type Instance = Instance;

	fn build(params: Params, builder: &CircuitBuilder) -> Result<Self> {
		ensure!(params.n_instances > 0, "n_instances must be positive");

		let keccak_params = KeccakParams {
			theta: params.theta.into(),
		};
		let batch = Keccak256Batch::new(builder, params.n_instances, &keccak_params)?;
		Ok(Self { batch })
	}

	fn populate_witness(&self, instance: Instance, w: &mut WitnessFiller) -> Result<()> {
		if let Some(bit) = instance.flip_bit {
			ensure!(bit < PREIMAGE_BYTES * 8, "flip_bit must be below {}", PREIMAGE_BYTES * 8);
		}

		let mut rng = StdRng::seed_from_u64(instance.seed);
		for i in 0..self.batch.n_instances() {
			let mut preimage = [0u8; PREIMAGE_BYTES];
			rng.fill_bytes(&mut preimage);
			let digest: [u8; DIGEST_BYTES] = Keccak256::digest(&preimage).into();

			if let (0, Some(bit)) = (i, instance.flip_bit) {
				preimage[bit / 8] ^= 1 << (bit % 8);
				tracing::info!(bit, "flipped preimage bit of instance 0");
			}

			self.batch.populate(w, i, &preimage, &digest);
		}

		Ok(())
	}
}
