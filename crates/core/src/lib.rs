pub mod bit;
pub mod constraint_system;
pub mod error;

pub use bit::Bit;
pub use constraint_system::*;
pub use error::ConstraintSystemError;
