//! Simple constraint verifier for testing

use keccak_gf2_core::{
	Bit,
	constraint_system::{ConstraintSystem, LinearConstraint, MulConstraint, ValueVec},
	error::ConstraintSystemError,
};

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
	#[error("value vector does not fit the constraint system: {0}")]
	ValueVec(#[from] ConstraintSystemError),
	#[error("linear constraint {index} failed: terms sum to 1 (expected 0)")]
	Linear { index: usize },
	#[error("MUL constraint {index} failed: {a:?} * {b:?} != {c:?}")]
	Mul { index: usize, a: Bit, b: Bit, c: Bit },
}

/// Verifies that a linear constraint is satisfied: the terms sum to zero.
pub fn verify_linear_constraint(witness: &ValueVec, constraint: &LinearConstraint) -> bool {
	let sum = constraint
		.terms
		.iter()
		.fold(Bit::ZERO, |acc, index| acc + witness[*index]);
	sum == Bit::ZERO
}

/// Verifies that a MUL constraint is satisfied: `a * b = c`.
pub fn verify_mul_constraint(witness: &ValueVec, constraint: &MulConstraint) -> bool {
	witness[constraint.a] * witness[constraint.b] == witness[constraint.c]
}

/// Verifies all constraints in a constraint system are satisfied by the witness.
///
/// Stops at the first violated constraint.
pub fn verify_constraints(cs: &ConstraintSystem, witness: &ValueVec) -> Result<(), VerifyError> {
	cs.validate_value_vec(witness)?;
	for (index, constraint) in cs.linear_constraints.iter().enumerate() {
		if !verify_linear_constraint(witness, constraint) {
			return Err(VerifyError::Linear { index });
		}
	}
	for (index, constraint) in cs.mul_constraints.iter().enumerate() {
		if !verify_mul_constraint(witness, constraint) {
			return Err(VerifyError::Mul {
				index,
				a: witness[constraint.a],
				b: witness[constraint.b],
				c: witness[constraint.c],
			});
		}
	}
	Ok(())
}
