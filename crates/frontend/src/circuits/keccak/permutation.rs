//! Keccak-f\[1600\] over GF(2) gates.
//!
//! The state is 25 lanes addressed by `(x, y)` and stored transposed: lane `(x, y)` lives at
//! index `5x + y`. Every step takes the previous state by reference and returns a new one.

use std::sync::LazyLock;

use keccak_gf2_core::Bit;

use super::{
	gates::{Lane, and, not, rotate_left, xor, xor_lane},
	reference::{R, RC, idx},
};
use crate::api::GateApi;

pub const N_ROUNDS: usize = 24;

/// The Keccak state, 25 lanes stored at `5x + y`.
pub type State<V> = [Lane<V>; 25];

/// Round constants decomposed least significant bit first.
static RC_BITS: LazyLock<[Lane<Bit>; N_ROUNDS]> = LazyLock::new(|| RC.map(Bit::bits_of_u64));

/// Rho and Pi as relabeling triples `(source, destination, rotation)` over the transposed
/// layout.
///
/// Lane `(x, y)` moves to `(y, 2x + 3y)` rotated by `r[x, y]`.
static RHO_PI: LazyLock<[(usize, usize, u32); 25]> = LazyLock::new(|| {
	std::array::from_fn(|source| {
		let (x, y) = (source / 5, source % 5);
		let destination = 5 * y + (2 * x + 3 * y) % 5;
		(source, destination, R[idx(x, y)])
	})
});

#[inline(always)]
const fn pos(x: usize, y: usize) -> usize {
	5 * x + y
}

/// Which formulation of Theta to emit. Both produce identical values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThetaVariant {
	/// Column parities over rows 1..4 only, with row 0 folded in separately.
	///
	/// Costs 4800 XOR gates per round.
	#[default]
	Compensated,
	/// Column parities over all five rows, `a[x, y] += D[x]`.
	///
	/// Costs 3200 XOR gates per round.
	Canonical,
}

pub fn theta<A: GateApi>(api: &A, a: &State<A::Var>, variant: ThetaVariant) -> State<A::Var> {
	match variant {
		ThetaVariant::Compensated => theta_compensated(api, a),
		ThetaVariant::Canonical => theta_canonical(api, a),
	}
}

fn theta_compensated<A: GateApi>(api: &A, a: &State<A::Var>) -> State<A::Var> {
	// C[x] = a[x,1] + a[x,2] + a[x,3] + a[x,4]
	let c: [Lane<A::Var>; 5] = std::array::from_fn(|x| {
		let c = xor_lane(api, &a[pos(x, 1)], &a[pos(x, 2)]);
		let c = xor_lane(api, &c, &a[pos(x, 3)]);
		xor_lane(api, &c, &a[pos(x, 4)])
	});
	// D[x] = C[x-1] + rotl1(C[x+1])
	let d: [Lane<A::Var>; 5] = std::array::from_fn(|x| {
		xor_lane(api, &c[(x + 4) % 5], &rotate_left(&c[(x + 1) % 5], 1))
	});
	// da[x] = a[x-1,0] + rotl1(a[x+1,0])
	let da: [Lane<A::Var>; 5] = std::array::from_fn(|x| {
		xor_lane(api, &a[pos((x + 4) % 5, 0)], &rotate_left(&a[pos((x + 1) % 5, 0)], 1))
	});

	std::array::from_fn(|i| {
		let x = i / 5;
		xor_lane(api, &xor_lane(api, &da[x], &a[i]), &d[x])
	})
}

fn theta_canonical<A: GateApi>(api: &A, a: &State<A::Var>) -> State<A::Var> {
	let c: [Lane<A::Var>; 5] = std::array::from_fn(|x| {
		(1..5).fold(a[pos(x, 0)], |c, y| xor_lane(api, &c, &a[pos(x, y)]))
	});
	let d: [Lane<A::Var>; 5] = std::array::from_fn(|x| {
		xor_lane(api, &c[(x + 4) % 5], &rotate_left(&c[(x + 1) % 5], 1))
	});
	std::array::from_fn(|i| xor_lane(api, &a[i], &d[i / 5]))
}

/// Rho and Pi together. Emits no gates.
pub fn rho_pi<V: Copy>(a: &State<V>) -> State<V> {
	let mut b = *a;
	for &(source, destination, rotation) in RHO_PI.iter() {
		b[destination] = rotate_left(&a[source], rotation);
	}
	b
}

/// `a[i] = b[i] + (1 - b[i+5]) * b[i+10]`, lane indices mod 25.
pub fn chi<A: GateApi>(api: &A, b: &State<A::Var>) -> State<A::Var> {
	std::array::from_fn(|i| {
		let not_next = not(api, &b[(i + 5) % 25]);
		let masked = and(api, &not_next, &b[(i + 10) % 25]);
		let lane = xor(api, &b[i], &masked);
		std::array::from_fn(|j| lane[j])
	})
}

/// Flips the bits of lane 0 where the round constant has a one. Bits where it has a zero are
/// left as they are, without a gate.
pub fn iota<A: GateApi>(api: &A, a: &State<A::Var>, round: usize) -> State<A::Var> {
	let one = api.constant(Bit::ONE);
	let mut out = *a;
	for (j, rc) in RC_BITS[round].iter().enumerate() {
		if rc.is_one() {
			out[0][j] = api.sub(one, a[0][j]);
		}
	}
	out
}

pub fn keccak_round<A: GateApi>(
	api: &A,
	a: &State<A::Var>,
	round: usize,
	variant: ThetaVariant,
) -> State<A::Var> {
	let a = theta(api, a, variant);
	let b = rho_pi(&a);
	let a = chi(api, &b);
	iota(api, &a, round)
}

pub fn keccak_f1600<A: GateApi>(
	api: &A,
	state: &State<A::Var>,
	variant: ThetaVariant,
) -> State<A::Var> {
	(0..N_ROUNDS).fold(*state, |state, round| keccak_round(api, &state, round, variant))
}

#[cfg(test)]
mod tests {
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;
	use crate::{
		api::NativeApi,
		circuits::keccak::reference,
		compiler::{CircuitBuilder, Wire, gate::Opcode},
	};

	fn to_circuit_state(canonical: &[u64; 25]) -> State<Bit> {
		std::array::from_fn(|i| Bit::bits_of_u64(canonical[idx(i / 5, i % 5)]))
	}

	fn from_circuit_state(state: &State<Bit>) -> [u64; 25] {
		std::array::from_fn(|i| Bit::u64_from_bits(&state[pos(i % 5, i / 5)]))
	}

	fn random_state(rng: &mut StdRng) -> [u64; 25] {
		std::array::from_fn(|_| rng.random())
	}

	/// Builds a circuit applying `step` to a fresh witness state and returns the gate counts.
	fn count_gates(step: impl FnOnce(&CircuitBuilder, &State<Wire>)) -> Vec<(Opcode, usize)> {
		let builder = CircuitBuilder::new();
		let state: State<Wire> =
			std::array::from_fn(|_| std::array::from_fn(|_| builder.add_witness()));
		step(&builder, &state);
		builder.build().gate_counts()
	}

	#[test]
	fn test_rho_pi_triples() {
		let triples = *RHO_PI;
		assert_eq!(triples[0], (0, 0, 0));
		assert_eq!(triples[1], (1, 8, 36));
		assert_eq!(triples[5], (5, 2, 1));
		assert_eq!(triples[12], (12, 10, 43));
		assert_eq!(triples[24], (24, 20, 14));

		let mut destinations = triples.map(|(_, destination, _)| destination);
		destinations.sort();
		assert_eq!(destinations, std::array::from_fn(|i| i));
	}

	#[test]
	fn test_steps_match_reference() {
		let mut rng = StdRng::seed_from_u64(0);
		let api = NativeApi::new();

		for round in 0..N_ROUNDS {
			let canonical = random_state(&mut rng);
			let state = to_circuit_state(&canonical);

			let mut expected = canonical;
			reference::theta(&mut expected);
			for variant in [ThetaVariant::Compensated, ThetaVariant::Canonical] {
				assert_eq!(from_circuit_state(&theta(&api, &state, variant)), expected);
			}

			let mut expected = canonical;
			reference::rho_pi(&mut expected);
			assert_eq!(from_circuit_state(&rho_pi(&state)), expected);

			let mut expected = canonical;
			reference::chi(&mut expected);
			assert_eq!(from_circuit_state(&chi(&api, &state)), expected);

			let mut expected = canonical;
			reference::iota(&mut expected, round);
			assert_eq!(from_circuit_state(&iota(&api, &state, round)), expected);

			let mut expected = canonical;
			reference::round(&mut expected, round);
			assert_eq!(
				from_circuit_state(&keccak_round(&api, &state, round, ThetaVariant::Compensated)),
				expected
			);
		}
	}

	#[test]
	fn test_zero_state_permutation_matches_reference() {
		let api = NativeApi::new();
		let mut expected = [0u64; 25];
		reference::keccak_f1600(&mut expected);

		let zero = [[Bit::ZERO; 64]; 25];
		for variant in [ThetaVariant::Compensated, ThetaVariant::Canonical] {
			assert_eq!(from_circuit_state(&keccak_f1600(&api, &zero, variant)), expected);
		}
	}

	#[test]
	fn test_theta_gate_counts() {
		let counts = count_gates(|b, state| {
			theta(b, state, ThetaVariant::Compensated);
		});
		assert_eq!(counts[0], (Opcode::Add, 4800));

		let counts = count_gates(|b, state| {
			theta(b, state, ThetaVariant::Canonical);
		});
		assert_eq!(counts[0], (Opcode::Add, 3200));
	}

	#[test]
	fn test_step_gate_counts() {
		let counts = count_gates(|_, state| {
			rho_pi(state);
		});
		assert!(counts.iter().all(|(_, count)| *count == 0));

		let counts = count_gates(|b, state| {
			chi(b, state);
		});
		assert_eq!(
			counts,
			vec![
				(Opcode::Add, 1600),
				(Opcode::Mul, 1600),
				(Opcode::Sub, 1600),
				(Opcode::AssertEq, 0)
			]
		);

		for round in 0..N_ROUNDS {
			let counts = count_gates(|b, state| {
				iota(b, state, round);
			});
			assert_eq!(counts[2], (Opcode::Sub, RC[round].count_ones() as usize));
		}
	}

	#[test]
	fn test_permutation_gate_counts() {
		let counts = count_gates(|b, state| {
			keccak_f1600(b, state, ThetaVariant::Compensated);
		});
		let iota_flips: usize = RC.iter().map(|rc| rc.count_ones() as usize).sum();
		assert_eq!(
			counts,
			vec![
				(Opcode::Add, N_ROUNDS * (4800 + 1600)),
				(Opcode::Mul, N_ROUNDS * 1600),
				(Opcode::Sub, N_ROUNDS * 1600 + iota_flips),
				(Opcode::AssertEq, 0)
			]
		);
	}
}
