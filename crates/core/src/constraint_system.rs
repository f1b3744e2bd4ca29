use std::ops::{Index, IndexMut};

use crate::{bit::Bit, error::ConstraintSystemError};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ValueIndex(pub u32);

impl ValueIndex {
	/// The value index that is not considered to be valid.
	pub const INVALID: ValueIndex = ValueIndex(u32::MAX);
}

// The most sensible default for a value index is to make it invalid.
impl Default for ValueIndex {
	fn default() -> Self {
		Self::INVALID
	}
}

/// A linear constraint over GF(2): the sum (XOR) of all the terms must be zero.
///
/// Addition, subtraction and equality all lower to this form, since over GF(2) `c = a + b`,
/// `c = a - b` and `a = b` are respectively `a + b + c = 0`, `a + b + c = 0` and `a + b = 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearConstraint {
	pub terms: Vec<ValueIndex>,
}

impl LinearConstraint {
	pub fn new(terms: impl IntoIterator<Item = ValueIndex>) -> Self {
		Self {
			terms: terms.into_iter().collect(),
		}
	}
}

/// A multiplication constraint over GF(2): `a * b = c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulConstraint {
	pub a: ValueIndex,
	pub b: ValueIndex,
	pub c: ValueIndex,
}

#[derive(Debug, Clone)]
pub struct ConstraintSystem {
	pub value_vec_layout: ValueVecLayout,
	pub constants: Vec<Bit>,
	pub linear_constraints: Vec<LinearConstraint>,
	pub mul_constraints: Vec<MulConstraint>,
}

impl ConstraintSystem {
	pub fn new(constants: Vec<Bit>, value_vec_layout: ValueVecLayout) -> Self {
		assert_eq!(constants.len(), value_vec_layout.n_const);
		ConstraintSystem {
			constants,
			value_vec_layout,
			linear_constraints: Vec::new(),
			mul_constraints: Vec::new(),
		}
	}

	pub fn add_linear_constraint(&mut self, linear_constraint: LinearConstraint) {
		self.linear_constraints.push(linear_constraint);
	}

	pub fn add_mul_constraint(&mut self, mul_constraint: MulConstraint) {
		self.mul_constraints.push(mul_constraint);
	}

	pub fn n_linear_constraints(&self) -> usize {
		self.linear_constraints.len()
	}

	pub fn n_mul_constraints(&self) -> usize {
		self.mul_constraints.len()
	}

	/// The total length of the [`ValueVec`] expected by this constraint system.
	pub fn value_vec_len(&self) -> usize {
		self.value_vec_layout.total_len
	}

	/// Create a new [`ValueVec`] with the size expected by this constraint system.
	pub fn new_value_vec(&self) -> ValueVec {
		ValueVec::new(self.value_vec_layout.clone())
	}

	/// Checks that the given value vector has the shape of this constraint system and that its
	/// constant section holds the declared constants.
	pub fn validate_value_vec(&self, values: &ValueVec) -> Result<(), ConstraintSystemError> {
		if values.layout != self.value_vec_layout {
			return Err(ConstraintSystemError::ValueVecLenMismatch {
				expected: self.value_vec_layout.total_len,
				actual: values.size(),
			});
		}
		for (index, constant) in self.constants.iter().enumerate() {
			if values.get(index) != *constant {
				return Err(ConstraintSystemError::ConstantMismatch { index });
			}
		}
		Ok(())
	}
}

/// Description of a layout of the value vector for a particular circuit.
///
/// Values are laid out as constants, then input/output parameters, then witness parameters,
/// then internal values produced by gates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueVecLayout {
	/// The number of the constants declared by the circuit.
	pub n_const: usize,
	/// The number of the input output parameters declared by the circuit.
	pub n_inout: usize,
	/// The number of the witness parameters declared by the circuit.
	pub n_witness: usize,
	/// The number of the internal values declared by the circuit.
	///
	/// Those are outputs created by the gates.
	pub n_internal: usize,

	/// The offset at which `inout` parameters start.
	pub offset_inout: usize,
	/// The offset at which `witness` parameters start.
	pub offset_witness: usize,
	/// The offset at which internal values start.
	pub offset_internal: usize,
	/// The total size of the value vec vector.
	pub total_len: usize,
}

impl ValueVecLayout {
	pub fn new(n_const: usize, n_inout: usize, n_witness: usize, n_internal: usize) -> Self {
		let offset_inout = n_const;
		let offset_witness = offset_inout + n_inout;
		let offset_internal = offset_witness + n_witness;
		Self {
			n_const,
			n_inout,
			n_witness,
			n_internal,
			offset_inout,
			offset_witness,
			offset_internal,
			total_len: offset_internal + n_internal,
		}
	}

	/// Asserts that the value vec layout has a correct shape.
	pub fn validate(&self) {
		assert_eq!(self.offset_inout, self.n_const);
		assert_eq!(self.offset_witness, self.offset_inout + self.n_inout);
		assert_eq!(self.offset_internal, self.offset_witness + self.n_witness);
		assert_eq!(self.total_len, self.offset_internal + self.n_internal);
	}
}

/// The vector of values.
///
/// This is a prover-only structure.
#[derive(Clone, Debug)]
pub struct ValueVec {
	layout: ValueVecLayout,
	data: Vec<Bit>,
}

impl ValueVec {
	pub fn new(layout: ValueVecLayout) -> ValueVec {
		let size = layout.total_len;
		ValueVec {
			layout,
			data: vec![Bit::ZERO; size],
		}
	}

	pub fn layout(&self) -> &ValueVecLayout {
		&self.layout
	}

	/// The total size of the vector.
	pub fn size(&self) -> usize {
		self.data.len()
	}

	pub fn get(&self, index: usize) -> Bit {
		self.data[index]
	}

	pub fn set(&mut self, index: usize, value: Bit) {
		self.data[index] = value;
	}

	/// Returns the public portion of the values vector: constants and inout values.
	pub fn public(&self) -> &[Bit] {
		&self.data[..self.layout.offset_witness]
	}

	/// Returns the witness portion of the values vector.
	pub fn witness(&self) -> &[Bit] {
		&self.data[self.layout.offset_witness..self.layout.offset_internal]
	}

	/// Returns the combined values vector.
	pub fn combined_witness(&self) -> &[Bit] {
		&self.data
	}
}

impl Index<ValueIndex> for ValueVec {
	type Output = Bit;

	fn index(&self, index: ValueIndex) -> &Self::Output {
		&self.data[index.0 as usize]
	}
}

impl IndexMut<ValueIndex> for ValueVec {
	fn index_mut(&mut self, index: ValueIndex) -> &mut Self::Output {
		&mut self.data[index.0 as usize]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layout_offsets() {
		let layout = ValueVecLayout::new(2, 3, 4, 5);
		layout.validate();
		assert_eq!(layout.offset_inout, 2);
		assert_eq!(layout.offset_witness, 5);
		assert_eq!(layout.offset_internal, 9);
		assert_eq!(layout.total_len, 14);

		let values = ValueVec::new(layout);
		assert_eq!(values.public().len(), 5);
		assert_eq!(values.witness().len(), 4);
		assert_eq!(values.combined_witness().len(), 14);
	}

	#[test]
	fn test_validate_value_vec_constants() {
		let layout = ValueVecLayout::new(2, 0, 1, 0);
		let cs = ConstraintSystem::new(vec![Bit::ZERO, Bit::ONE], layout);

		let mut values = cs.new_value_vec();
		assert!(matches!(
			cs.validate_value_vec(&values),
			Err(ConstraintSystemError::ConstantMismatch { index: 1 })
		));

		values.set(1, Bit::ONE);
		cs.validate_value_vec(&values).unwrap();

		let other = ValueVec::new(ValueVecLayout::new(2, 0, 2, 0));
		assert!(matches!(
			cs.validate_value_vec(&other),
			Err(ConstraintSystemError::ValueVecLenMismatch {
				expected: 3,
				actual: 4
			})
		));
	}
}
