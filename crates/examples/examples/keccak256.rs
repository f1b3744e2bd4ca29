use anyhow::Result;
use keccak_gf2_examples::{Cli, circuits::keccak256::Keccak256Example, init_tracing};

fn main() -> Result<()> {
	init_tracing()?;

	Cli::<Keccak256Example>::new("keccak256")
		.about("Keccak-256 of 64-byte preimages as a GF(2) circuit, evaluated and checked")
		.run()
}
