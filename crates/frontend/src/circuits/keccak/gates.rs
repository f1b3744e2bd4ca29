//! Elementwise boolean operations on bit sequences, expressed with GF(2) gates.
//!
//! Every output bit costs exactly one gate. Rotation costs none: it only relabels bits.

use keccak_gf2_core::Bit;

use crate::api::GateApi;

/// A 64-bit lane, least significant bit first.
pub type Lane<V> = [V; 64];

/// `a[i] + b[i]` for every `i`.
///
/// # Panics
///
/// Panics if `a` and `b` differ in length.
pub fn xor<A: GateApi>(api: &A, a: &[A::Var], b: &[A::Var]) -> Vec<A::Var> {
	assert_eq!(a.len(), b.len(), "xor operands differ in length");
	a.iter().zip(b).map(|(a, b)| api.add(*a, *b)).collect()
}

/// `a[i] * b[i]` for every `i`.
///
/// # Panics
///
/// Panics if `a` and `b` differ in length.
pub fn and<A: GateApi>(api: &A, a: &[A::Var], b: &[A::Var]) -> Vec<A::Var> {
	assert_eq!(a.len(), b.len(), "and operands differ in length");
	a.iter().zip(b).map(|(a, b)| api.mul(*a, *b)).collect()
}

/// `1 - a[i]` for every `i`.
pub fn not<A: GateApi>(api: &A, a: &[A::Var]) -> Vec<A::Var> {
	let one = api.constant(Bit::ONE);
	a.iter().map(|a| api.sub(one, *a)).collect()
}

/// Lane-sized [`xor`].
pub fn xor_lane<A: GateApi>(api: &A, a: &Lane<A::Var>, b: &Lane<A::Var>) -> Lane<A::Var> {
	std::array::from_fn(|i| api.add(a[i], b[i]))
}

/// Rotates a lane left by `k` bit positions: `output[i] = input[(i - k) mod 64]`.
///
/// `k` is reduced modulo 64.
pub fn rotate_left<V: Copy>(lane: &Lane<V>, k: u32) -> Lane<V> {
	let s = (k & 63) as usize;
	std::array::from_fn(|i| lane[(i + 64 - s) % 64])
}
