use std::collections::HashMap;

use cranelift_entity::{PrimaryMap, SecondaryMap, entity_impl};
use keccak_gf2_core::Bit;

use crate::compiler::gate::opcode::Opcode;

#[derive(Default)]
pub struct ConstPool {
	pub pool: HashMap<Bit, Wire>,
}

impl ConstPool {
	pub fn new() -> Self {
		ConstPool::default()
	}

	pub fn get(&self, value: Bit) -> Option<Wire> {
		self.pool.get(&value).cloned()
	}

	pub fn insert(&mut self, bit: Bit, wire: Wire) {
		let prev = self.pool.insert(bit, wire);
		assert!(prev.is_none());
	}
}

/// A wire through which a single GF(2) value flows in and out of gates.
///
/// The difference from `ValueIndex` is that a wire is abstract: it only gets its position in the
/// value vector once the circuit is built.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Wire(u32);
entity_impl!(Wire);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WireKind {
	Constant(Bit),
	Inout,
	Witness,
	/// An internal wire is a wire created as the output of a gate.
	Internal,
}

#[derive(Copy, Clone)]
pub struct WireData {
	pub kind: WireKind,
}

/// Gate ID - identifies a gate in the graph
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gate(u32);
entity_impl!(Gate);

/// A handy struct that allows a more type safe destructure.
pub struct GateParam<'a> {
	pub inputs: &'a [Wire],
	pub outputs: &'a [Wire],
}

/// Describes a particular gate in the gate graph, its opcode and its wires.
pub struct GateData {
	/// The code of operation of this gate.
	pub opcode: Opcode,

	/// The wires of this gate, laid out as inputs, then outputs.
	///
	/// The number of wires in each group is specified by the opcode's shape.
	pub wires: Vec<Wire>,
}

impl GateData {
	pub fn gate_param(&self) -> GateParam<'_> {
		let shape = self.opcode.shape();
		let end_input = shape.n_in;
		let end_output = end_input + shape.n_out;
		GateParam {
			inputs: &self.wires[..end_input],
			outputs: &self.wires[end_input..end_output],
		}
	}

	/// Ensures the gate has the right shape.
	pub fn validate_shape(&self) {
		let shape = self.opcode.shape();
		assert_eq!(
			self.wires.len(),
			shape.n_in + shape.n_out,
			"{:?} gate has a wrong number of wires",
			self.opcode
		);
	}
}

pub struct GateGraph {
	pub gates: PrimaryMap<Gate, GateData>,
	pub wires: PrimaryMap<Wire, WireData>,

	/// Fully qualified names of assertion gates, used for failure reports.
	pub assertion_names: SecondaryMap<Gate, String>,

	pub const_pool: ConstPool,
	pub n_inout: usize,
	pub n_witness: usize,
	pub n_internal: usize,
}

impl Default for GateGraph {
	fn default() -> Self {
		Self {
			gates: PrimaryMap::new(),
			wires: PrimaryMap::new(),
			assertion_names: SecondaryMap::new(),
			const_pool: ConstPool::new(),
			n_inout: 0,
			n_witness: 0,
			n_internal: 0,
		}
	}
}

impl GateGraph {
	/// Runs a validation pass ensuring all the invariants hold.
	pub fn validate(&self) {
		for gate in self.gates.values() {
			gate.validate_shape();
		}
	}

	pub fn add_inout(&mut self) -> Wire {
		self.n_inout += 1;
		self.wires.push(WireData {
			kind: WireKind::Inout,
		})
	}

	pub fn add_witness(&mut self) -> Wire {
		self.n_witness += 1;
		self.wires.push(WireData {
			kind: WireKind::Witness,
		})
	}

	pub fn add_internal(&mut self) -> Wire {
		self.n_internal += 1;
		self.wires.push(WireData {
			kind: WireKind::Internal,
		})
	}

	pub fn add_constant(&mut self, bit: Bit) -> Wire {
		if let Some(wire) = self.const_pool.get(bit) {
			return wire;
		}
		let wire = self.wires.push(WireData {
			kind: WireKind::Constant(bit),
		});
		self.const_pool.insert(bit, wire);
		wire
	}

	/// Emits a gate with the given opcode and inputs, allocating fresh internal wires for its
	/// outputs.
	///
	/// Returns the gate and its output wires.
	///
	/// Panics if the inputs do not match the opcode's shape.
	pub fn emit_gate(&mut self, opcode: Opcode, inputs: &[Wire]) -> (Gate, Vec<Wire>) {
		let shape = opcode.shape();
		assert_eq!(inputs.len(), shape.n_in, "{opcode:?} expects {} inputs", shape.n_in);

		let mut wires: Vec<Wire> = Vec::with_capacity(shape.n_in + shape.n_out);
		wires.extend_from_slice(inputs);
		let outputs = (0..shape.n_out)
			.map(|_| self.add_internal())
			.collect::<Vec<_>>();
		wires.extend_from_slice(&outputs);

		let data = GateData { opcode, wires };
		data.validate_shape();

		(self.gates.push(data), outputs)
	}

	/// Return the number of constants this graph defines.
	pub fn n_const(&self) -> usize {
		self.const_pool.pool.len()
	}
}
