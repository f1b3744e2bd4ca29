//! Equality assertion.
//!
//! Enforces `x = y`.
//!
//! # Constraints
//!
//! The gate generates 1 linear constraint:
//! - `x + y = 0`
use crate::compiler::{
	circuit,
	constraint_builder::ConstraintBuilder,
	gate::opcode::OpcodeShape,
	gate_graph::{Gate, GateData, GateParam},
};

pub fn shape() -> OpcodeShape {
	OpcodeShape { n_in: 2, n_out: 0 }
}

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };

	builder.linear([*x, *y]);
}

pub fn evaluate(_gate: Gate, data: &GateData, name: &str, w: &mut circuit::WitnessFiller) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };

	if w[*x] != w[*y] {
		w.flag_assertion_failed(name, |w| format!("{:?} != {:?}", w[*x], w[*y]));
	}
}
