pub mod keccak256;
