use std::{error, fmt};

use cranelift_entity::SecondaryMap;
use keccak_gf2_core::{
	Bit,
	constraint_system::{ConstraintSystem, ValueIndex, ValueVec, ValueVecLayout},
};
use rayon::prelude::*;

use super::{Shared, gate};
use crate::compiler::{
	constraint_builder::ConstraintBuilder,
	gate::Opcode,
	gate_graph::{Wire, WireKind},
};

const MAX_ASSERTION_MESSAGES: usize = 100;

/// Error returned when populating wire witness fails due to assertion failures.
///
/// This is how an invalid witness, for example a preimage that does not hash to the claimed
/// digest, shows up. It is not a malformed circuit.
#[derive(Debug, Clone)]
pub struct PopulateError {
	/// List of assertion failure messages (limited to MAX_ASSERTION_MESSAGES).
	pub messages: Vec<String>,
	/// Total count of assertion failures (may exceed messages.len()).
	pub total_count: usize,
}

impl fmt::Display for PopulateError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "assertions failed:")?;
		for message in &self.messages {
			writeln!(f, "{message}")?;
		}
		if self.total_count > self.messages.len() {
			writeln!(f, "(Some assertions are omitted. Total: {})", self.total_count)?;
		}
		Ok(())
	}
}

impl error::Error for PopulateError {}

pub struct WitnessFiller<'a> {
	pub(crate) circuit: &'a Circuit,
	pub(crate) value_vec: ValueVec,
	pub(crate) assertion_failed_message_vec: Vec<String>,
	pub(crate) assertion_failed_count: usize,
}

impl<'a> WitnessFiller<'a> {
	pub fn flag_assertion_failed(
		&mut self,
		name: &str,
		condition: impl FnOnce(&mut Self) -> String,
	) {
		self.assertion_failed_count += 1;
		if self.assertion_failed_message_vec.len() < MAX_ASSERTION_MESSAGES {
			let assertion_message = condition(self);
			self.assertion_failed_message_vec
				.push(format!("{name} failed: {assertion_message}"));
		}
	}

	/// Writes `bits` into `wires`, one bit per wire.
	pub fn fill(&mut self, wires: &[Wire], bits: &[Bit]) {
		assert_eq!(wires.len(), bits.len(), "wire and value counts differ");
		for (wire, bit) in wires.iter().zip(bits) {
			self[*wire] = *bit;
		}
	}

	/// Reads the values currently held by `wires`.
	pub fn read(&self, wires: &[Wire]) -> Vec<Bit> {
		wires.iter().map(|wire| self[*wire]).collect()
	}

	pub fn into_value_vec(self) -> ValueVec {
		self.value_vec
	}
}

impl<'a> std::ops::Index<Wire> for WitnessFiller<'a> {
	type Output = Bit;

	fn index(&self, wire: Wire) -> &Self::Output {
		&self.value_vec[self.circuit.witness_index(wire)]
	}
}

impl<'a> std::ops::IndexMut<Wire> for WitnessFiller<'a> {
	fn index_mut(&mut self, wire: Wire) -> &mut Self::Output {
		&mut self.value_vec[self.circuit.witness_index(wire)]
	}
}

pub struct Circuit {
	shared: Shared,
	value_vec_layout: ValueVecLayout,
	wire_mapping: SecondaryMap<Wire, ValueIndex>,
}

impl Circuit {
	/// Creates a new circuit with the given shared data and wire mapping. Only used during building
	/// by the circuit builder.
	pub(super) fn new(
		shared: Shared,
		value_vec_layout: ValueVecLayout,
		wire_mapping: SecondaryMap<Wire, ValueIndex>,
	) -> Self {
		value_vec_layout.validate();
		Self {
			shared,
			value_vec_layout,
			wire_mapping,
		}
	}

	/// For the given wire, returns its index in the witness vector.
	#[inline(always)]
	pub fn witness_index(&self, wire: Wire) -> ValueIndex {
		self.wire_mapping[wire]
	}

	pub fn value_vec_layout(&self) -> &ValueVecLayout {
		&self.value_vec_layout
	}

	pub fn new_witness_filler(&self) -> WitnessFiller<'_> {
		WitnessFiller {
			circuit: self,
			value_vec: ValueVec::new(self.value_vec_layout.clone()),
			assertion_failed_message_vec: Vec::new(),
			assertion_failed_count: 0,
		}
	}

	/// Populates non-input values (wires) in the witness.
	///
	/// Specifically, this will evaluate the circuit gate-by-gate and save the results in the
	/// witness vector.
	///
	/// This function expects that the input wires are already filled. The input wires are
	///
	/// - [`super::CircuitBuilder::add_inout`],
	/// - [`super::CircuitBuilder::add_witness`].
	///
	/// The wires created by [`super::CircuitBuilder::add_constant`] are populated by this
	/// function as well.
	///
	/// # Errors
	///
	/// In case the circuit is not satisfiable (any assertion fails), this function will return
	/// an error with a list of assertion failure messages.
	pub fn populate_wire_witness(&self, w: &mut WitnessFiller) -> Result<(), PopulateError> {
		for (wire, wire_data) in self.shared.graph.wires.iter() {
			if let WireKind::Constant(value) = wire_data.kind {
				w[wire] = value;
			}
		}

		for (gate_id, _) in self.shared.graph.gates.iter() {
			gate::evaluate(gate_id, &self.shared.graph, w);
		}

		if w.assertion_failed_count > 0 {
			return Err(PopulateError {
				messages: w.assertion_failed_message_vec.clone(),
				total_count: w.assertion_failed_count,
			});
		}

		Ok(())
	}

	/// Evaluates the circuit once per assignment, in parallel.
	///
	/// Each assignment gets a fresh witness filler which `assign` populates with the inputs.
	/// The outcomes are returned in the order of `assignments`.
	pub fn populate_many<A, F>(&self, assignments: &[A], assign: F) -> Vec<Result<(), PopulateError>>
	where
		A: Sync,
		F: Fn(&A, &mut WitnessFiller) + Sync,
	{
		assignments
			.par_iter()
			.map(|assignment| {
				let mut w = self.new_witness_filler();
				assign(assignment, &mut w);
				self.populate_wire_witness(&mut w)
			})
			.collect()
	}

	/// Builds a constraint system from this circuit.
	pub fn constraint_system(&self) -> ConstraintSystem {
		let mut constants = vec![Bit::ZERO; self.value_vec_layout.n_const];
		for (bit, wire) in self.shared.graph.const_pool.pool.iter() {
			constants[self.wire_mapping[*wire].0 as usize] = *bit;
		}

		let mut cs = ConstraintSystem::new(constants, self.value_vec_layout.clone());
		let mut builder = ConstraintBuilder::new(&self.wire_mapping, &mut cs);
		for (gate_id, _) in self.shared.graph.gates.iter() {
			gate::constrain(gate_id, &self.shared.graph, &mut builder);
		}
		cs
	}

	/// Returns the number of gates in this circuit, assertions included.
	pub fn n_gates(&self) -> usize {
		self.shared.graph.gates.len()
	}

	/// Returns the number of gates with the given opcode.
	pub fn n_gates_of(&self, opcode: Opcode) -> usize {
		self.shared
			.graph
			.gates
			.values()
			.filter(|data| data.opcode == opcode)
			.count()
	}

	/// Returns the gate count for every opcode, in [`Opcode::ALL`] order.
	pub fn gate_counts(&self) -> Vec<(Opcode, usize)> {
		let mut counts = [0usize; Opcode::ALL.len()];
		for data in self.shared.graph.gates.values() {
			counts[data.opcode as usize] += 1;
		}
		Opcode::ALL.into_iter().zip(counts).collect()
	}
}
