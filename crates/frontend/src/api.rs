//! The gate capability the hash circuits are written against.
//!
//! Circuits only ever need GF(2) constants, the three field operations and equality
//! assertions. Writing them against [`GateApi`] lets the same construction either record gates
//! on a [`CircuitBuilder`] or compute bits directly with [`NativeApi`].

use std::cell::Cell;

use keccak_gf2_core::Bit;

use crate::compiler::{CircuitBuilder, Wire};

pub trait GateApi {
	/// A GF(2) value as seen by this backend.
	type Var: Copy;

	fn constant(&self, bit: Bit) -> Self::Var;

	/// `a + b`, i.e. XOR.
	fn add(&self, a: Self::Var, b: Self::Var) -> Self::Var;

	/// `a * b`, i.e. AND.
	fn mul(&self, a: Self::Var, b: Self::Var) -> Self::Var;

	/// `a - b`. Over GF(2) this computes the same value as [`GateApi::add`].
	fn sub(&self, a: Self::Var, b: Self::Var) -> Self::Var;

	fn assert_eq(&self, name: &str, a: Self::Var, b: Self::Var);
}

impl GateApi for CircuitBuilder {
	type Var = Wire;

	fn constant(&self, bit: Bit) -> Wire {
		self.add_constant(bit)
	}

	fn add(&self, a: Wire, b: Wire) -> Wire {
		CircuitBuilder::add(self, a, b)
	}

	fn mul(&self, a: Wire, b: Wire) -> Wire {
		CircuitBuilder::mul(self, a, b)
	}

	fn sub(&self, a: Wire, b: Wire) -> Wire {
		CircuitBuilder::sub(self, a, b)
	}

	fn assert_eq(&self, name: &str, a: Wire, b: Wire) {
		CircuitBuilder::assert_eq(self, name, a, b)
	}
}

/// Evaluates gates on concrete bits.
///
/// Failed assertions are counted instead of aborting, mirroring how a built circuit reports
/// them.
#[derive(Default)]
pub struct NativeApi {
	failed_assertions: Cell<usize>,
}

impl NativeApi {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failed_assertions(&self) -> usize {
		self.failed_assertions.get()
	}
}

impl GateApi for NativeApi {
	type Var = Bit;

	fn constant(&self, bit: Bit) -> Bit {
		bit
	}

	fn add(&self, a: Bit, b: Bit) -> Bit {
		a + b
	}

	fn mul(&self, a: Bit, b: Bit) -> Bit {
		a * b
	}

	fn sub(&self, a: Bit, b: Bit) -> Bit {
		a - b
	}

	fn assert_eq(&self, name: &str, a: Bit, b: Bit) {
		if a != b {
			tracing::trace!(name, "assertion failed");
			self.failed_assertions.set(self.failed_assertions.get() + 1);
		}
	}
}
