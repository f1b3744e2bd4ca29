use crate::compiler::{
	circuit,
	constraint_builder::ConstraintBuilder,
	gate_graph::{Gate, GateGraph},
};

pub mod opcode;

pub use opcode::Opcode;

pub mod add;
pub mod assert_eq;
pub mod mul;
pub mod sub;

pub fn constrain(gate: Gate, graph: &GateGraph, builder: &mut ConstraintBuilder) {
	let data = &graph.gates[gate];
	match data.opcode {
		Opcode::Add => add::constrain(gate, data, builder),
		Opcode::Mul => mul::constrain(gate, data, builder),
		Opcode::Sub => sub::constrain(gate, data, builder),
		Opcode::AssertEq => assert_eq::constrain(gate, data, builder),
	}
}

pub fn evaluate(gate: Gate, graph: &GateGraph, w: &mut circuit::WitnessFiller) {
	let data = &graph.gates[gate];
	match data.opcode {
		Opcode::Add => add::evaluate(gate, data, w),
		Opcode::Mul => mul::evaluate(gate, data, w),
		Opcode::Sub => sub::evaluate(gate, data, w),
		Opcode::AssertEq => assert_eq::evaluate(gate, data, &graph.assertion_names[gate], w),
	}
}
