use std::{
	cell::{RefCell, RefMut},
	rc::Rc,
};

use cranelift_entity::SecondaryMap;
use keccak_gf2_core::{
	Bit,
	constraint_system::{ValueIndex, ValueVecLayout},
};

pub mod circuit;
pub mod constraint_builder;
pub mod gate;
mod gate_graph;


pub use circuit::{Circuit, PopulateError, WitnessFiller};
use gate::Opcode;
use gate_graph::{GateGraph, WireKind};
pub use gate_graph::Wire;

pub(crate) struct Shared {
	pub(crate) graph: GateGraph,
}

/// Records GF(2) gates into a gate graph.
///
/// # Clone
///
/// This is a light-weight reference. Cloning is cheap.
#[derive(Clone)]
pub struct CircuitBuilder {
	name: String,
	shared: Rc<RefCell<Option<Shared>>>,
}

impl Default for CircuitBuilder {
	fn default() -> Self {
		CircuitBuilder {
			name: String::new(),
			shared: Rc::new(RefCell::new(Some(Shared {
				graph: GateGraph::default(),
			}))),
		}
	}
}

impl CircuitBuilder {
	pub fn new() -> Self {
		CircuitBuilder::default()
	}

	/// # Preconditions
	///
	/// Must be called only once.
	pub fn build(&self) -> Circuit {
		let shared = self.shared.borrow_mut().take();
		let Some(shared) = shared else {
			panic!("CircuitBuilder::build called twice");
		};
		shared.graph.validate();

		// `ValueVec` expects the wires to be in a certain order. Specifically:
		//
		// 1. const
		// 2. inout
		// 3. witness
		// 4. internal
		//
		// So we create a mapping between a `Wire` to the final `ValueIndex`. Within each group
		// wires keep their creation order.
		let graph = &shared.graph;
		let layout =
			ValueVecLayout::new(graph.n_const(), graph.n_inout, graph.n_witness, graph.n_internal);

		let mut next_const = 0;
		let mut next_inout = layout.offset_inout;
		let mut next_witness = layout.offset_witness;
		let mut next_internal = layout.offset_internal;

		let mut wire_mapping = SecondaryMap::new();
		for (wire, wire_data) in graph.wires.iter() {
			let cursor = match wire_data.kind {
				WireKind::Constant(_) => &mut next_const,
				WireKind::Inout => &mut next_inout,
				WireKind::Witness => &mut next_witness,
				WireKind::Internal => &mut next_internal,
			};
			wire_mapping[wire] = ValueIndex(*cursor as u32);
			*cursor += 1;
		}

		tracing::debug!(
			n_gates = graph.gates.len(),
			n_const = layout.n_const,
			n_inout = layout.n_inout,
			n_witness = layout.n_witness,
			n_internal = layout.n_internal,
			"built circuit"
		);

		Circuit::new(shared, layout, wire_mapping)
	}

	/// Creates a builder that emits into the same circuit but qualifies assertion names with
	/// `name`.
	pub fn subcircuit(&self, name: impl Into<String>) -> CircuitBuilder {
		CircuitBuilder {
			name: self.qualified_name(name),
			shared: self.shared.clone(),
		}
	}

	fn qualified_name(&self, name: impl Into<String>) -> String {
		let name = name.into();
		if self.name.is_empty() {
			name
		} else {
			format!("{}.{name}", self.name)
		}
	}

	fn graph_mut(&self) -> RefMut<'_, GateGraph> {
		RefMut::map(self.shared.borrow_mut(), |shared| {
			&mut shared
				.as_mut()
				.expect("CircuitBuilder used after build")
				.graph
		})
	}

	fn emit(&self, opcode: Opcode, inputs: &[Wire]) -> Wire {
		let (_, outputs) = self.graph_mut().emit_gate(opcode, inputs);
		outputs[0]
	}

	pub fn add_constant(&self, bit: Bit) -> Wire {
		self.graph_mut().add_constant(bit)
	}

	pub fn add_inout(&self) -> Wire {
		self.graph_mut().add_inout()
	}

	pub fn add_witness(&self) -> Wire {
		self.graph_mut().add_witness()
	}

	/// GF(2) addition, i.e. XOR.
	pub fn add(&self, a: Wire, b: Wire) -> Wire {
		self.emit(Opcode::Add, &[a, b])
	}

	/// GF(2) multiplication, i.e. AND.
	pub fn mul(&self, a: Wire, b: Wire) -> Wire {
		self.emit(Opcode::Mul, &[a, b])
	}

	/// GF(2) subtraction. `sub(1, a)` is NOT.
	pub fn sub(&self, a: Wire, b: Wire) -> Wire {
		self.emit(Opcode::Sub, &[a, b])
	}

	pub fn assert_eq(&self, name: impl Into<String>, x: Wire, y: Wire) {
		let name = self.qualified_name(name);
		let mut graph = self.graph_mut();
		let (gate, _) = graph.emit_gate(Opcode::AssertEq, &[x, y]);
		graph.assertion_names[gate] = name;
	}

	/// Asserts element-wise equality of two equally long wire sequences.
	pub fn assert_eq_v(&self, name: impl Into<String>, x: &[Wire], y: &[Wire]) {
		assert_eq!(x.len(), y.len(), "assert_eq_v operands differ in length");
		let name = name.into();
		for (i, (x, y)) in x.iter().zip(y).enumerate() {
			self.assert_eq(format!("{name}[{i}]"), *x, *y);
		}
	}
}
