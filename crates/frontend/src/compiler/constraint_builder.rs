use cranelift_entity::SecondaryMap;
use keccak_gf2_core::constraint_system::{
	ConstraintSystem, LinearConstraint, MulConstraint, ValueIndex,
};

use crate::compiler::Wire;

/// Builder for creating constraints using Wire references.
///
/// Wires are resolved to their final [`ValueIndex`] as constraints are added.
pub struct ConstraintBuilder<'a> {
	wire_mapping: &'a SecondaryMap<Wire, ValueIndex>,
	cs: &'a mut ConstraintSystem,
}

impl<'a> ConstraintBuilder<'a> {
	pub fn new(
		wire_mapping: &'a SecondaryMap<Wire, ValueIndex>,
		cs: &'a mut ConstraintSystem,
	) -> Self {
		Self { wire_mapping, cs }
	}

	/// Adds a linear constraint: the sum of all `terms` is zero.
	pub fn linear(&mut self, terms: impl IntoIterator<Item = Wire>) {
		let wire_mapping = self.wire_mapping;
		let constraint = LinearConstraint::new(terms.into_iter().map(|wire| wire_mapping[wire]));
		self.cs.add_linear_constraint(constraint);
	}

	/// Adds a multiplication constraint: `a * b = c`.
	pub fn mul(&mut self, a: Wire, b: Wire, c: Wire) {
		self.cs.add_mul_constraint(MulConstraint {
			a: self.wire_mapping[a],
			b: self.wire_mapping[b],
			c: self.wire_mapping[c],
		});
	}
}
