pub mod api;
pub mod circuits;
pub mod compiler;
pub mod constraint_verifier;
pub mod stat;
