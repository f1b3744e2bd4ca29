//! GF(2) multiplication.
//!
//! Returns `z = x * y`, which is the boolean AND of `x` and `y`.
//!
//! # Constraints
//!
//! The gate generates 1 multiplication constraint:
//! - `x * y = z`
use crate::compiler::{
	circuit,
	constraint_builder::ConstraintBuilder,
	gate::opcode::OpcodeShape,
	gate_graph::{Gate, GateData, GateParam},
};

pub fn shape() -> OpcodeShape {
	OpcodeShape { n_in: 2, n_out: 1 }
}

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam { inputs, outputs } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };
	let [z] = outputs else { unreachable!() };

	builder.mul(*x, *y, *z);
}

pub fn evaluate(_gate: Gate, data: &GateData, w: &mut circuit::WitnessFiller) {
	let GateParam { inputs, outputs } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };
	let [z] = outputs else { unreachable!() };

	w[*z] = w[*x] * w[*y];
}
