pub mod circuits;
pub mod cli;

use anyhow::Result;
pub use cli::Cli;
use keccak_gf2_core::constraint_system::{ConstraintSystem, ValueVec};
use keccak_gf2_frontend::{
	compiler::{CircuitBuilder, WitnessFiller},
	constraint_verifier::verify_constraints,
};
use tracing_subscriber::{EnvFilter, fmt};

/// A circuit that can be driven from the command line by [`Cli`].
///
/// `Params` shape the circuit, `Instance` chooses the values it is evaluated on.
pub trait ExampleCircuit: Sized {
	type Params;
	type Instance;

	fn build(params: Self::Params, builder: &CircuitBuilder) -> Result<Self>;

	fn populate_witness(&self, instance: Self::Instance, w: &mut WitnessFiller) -> Result<()>;
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() -> Result<()> {
	let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
	fmt()
		.with_env_filter(filter)
		.try_init()
		.map_err(|err| anyhow::anyhow!(err))?;
	Ok(())
}

/// Checks the populated witness against the lowered constraint system.
pub fn check_constraints(cs: &ConstraintSystem, witness: &ValueVec) -> Result<()> {
	let _scope = tracing::info_span!("Checking constraints").entered();
	verify_constraints(cs, witness)?;
	tracing::info!(
		n_linear = cs.n_linear_constraints(),
		n_mul = cs.n_mul_constraints(),
		n_public = witness.public().len(),
		n_witness = witness.witness().len(),
		"all constraints satisfied"
	);
	Ok(())
}
