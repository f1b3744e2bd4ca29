#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
	// Field operations
	Add,
	Mul,
	Sub,

	// Assertions
	AssertEq,
}

pub struct OpcodeShape {
	pub n_in: usize,
	pub n_out: usize,
}

impl Opcode {
	pub const ALL: [Opcode; 4] = [Opcode::Add, Opcode::Mul, Opcode::Sub, Opcode::AssertEq];

	pub fn shape(&self) -> OpcodeShape {
		match self {
			Opcode::Add => super::add::shape(),
			Opcode::Mul => super::mul::shape(),
			Opcode::Sub => super::sub::shape(),
			Opcode::AssertEq => super::assert_eq::shape(),
		}
	}
}
