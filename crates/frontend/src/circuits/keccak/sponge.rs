//! Absorbing the single rate block and squeezing the digest out of the rate.

use super::{
	KeccakError, RATE_LANES,
	gates::{Lane, xor_lane},
	permutation::State,
	reference::idx,
};
use crate::api::GateApi;

/// XORs the message lanes into the rate portion of the state.
///
/// Message lanes are in canonical order `x + 5y` while the state is stored at `5x + y`.
pub fn absorb<A: GateApi>(
	api: &A,
	state: &State<A::Var>,
	message: &[Lane<A::Var>; RATE_LANES],
) -> State<A::Var> {
	let mut out = *state;
	for y in 0..5 {
		for x in 0..5 {
			let lane = idx(x, y);
			if lane < RATE_LANES {
				out[5 * x + y] = xor_lane(api, &state[5 * x + y], &message[lane]);
			}
		}
	}
	out
}

/// Reads `output_len` bytes from the rate, lane by lane in canonical order.
///
/// Only whole lanes from a single squeeze are supported, so `output_len` must be a multiple of
/// 8 no larger than `rate_bytes`. The rate itself must be whole lanes within the state.
pub fn squeeze<V: Copy>(
	state: &State<V>,
	rate_bytes: usize,
	output_len: usize,
) -> Result<Vec<V>, KeccakError> {
	if rate_bytes % 8 != 0 || rate_bytes > 25 * 8 {
		return Err(KeccakError::UnsupportedRate { rate_bytes });
	}
	if output_len % 8 != 0 || output_len > rate_bytes {
		return Err(KeccakError::UnsupportedOutputLength { output_len, rate_bytes });
	}

	let mut out = Vec::with_capacity(output_len * 8);
	'outer: for y in 0..5 {
		for x in 0..5 {
			if out.len() == output_len * 8 {
				break 'outer;
			}
			if idx(x, y) < rate_bytes / 8 {
				out.extend_from_slice(&state[5 * x + y]);
			}
		}
	}
	Ok(out)
}
