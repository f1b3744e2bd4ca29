#[derive(Debug, thiserror::Error)]
pub enum ConstraintSystemError {
	#[error("the value vector length doesn't match the layout: expected {expected}, got {actual}")]
	ValueVecLenMismatch { expected: usize, actual: usize },
	#[error("the value at constant index {index} doesn't match the declared constant")]
	ConstantMismatch { index: usize },
}
