//! Plain `u64` Keccak, indexed canonically as `x + 5y`.
//!
//! The circuit stores lanes transposed (`5x + y`), see [`super::permutation`].

/// First padding byte of the Keccak (not SHA-3) pad10*1 rule.
pub const PADDING_BYTE: u8 = 0x01;
pub const RATE_BYTES: usize = 136;

// ι round constants
pub const RC: [u64; 24] = [
	0x0000_0000_0000_0001,
	0x0000_0000_0000_8082,
	0x8000_0000_0000_808A,
	0x8000_0000_8000_8000,
	0x0000_0000_0000_808B,
	0x0000_0000_8000_0001,
	0x8000_0000_8000_8081,
	0x8000_0000_0000_8009,
	0x0000_0000_0000_008A,
	0x0000_0000_0000_0088,
	0x0000_0000_8000_8009,
	0x0000_0000_8000_000A,
	0x0000_0000_8000_808B,
	0x8000_0000_0000_008B,
	0x8000_0000_0000_8089,
	0x8000_0000_0000_8003,
	0x8000_0000_0000_8002,
	0x8000_0000_0000_0080,
	0x0000_0000_0000_800A,
	0x8000_0000_8000_000A,
	0x8000_0000_8000_8081,
	0x8000_0000_0000_8080,
	0x0000_0000_8000_0001,
	0x8000_0000_8000_8008,
];

// ρ rotation offsets r[x,y] in lane order (i = x + 5*y)
pub const R: [u32; 25] = [
	0, 1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56, 14,
];

#[inline(always)]
pub const fn idx(x: usize, y: usize) -> usize {
	x + 5 * y
}

/// Computes the Keccak-256 hash of a byte message of any length.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
	let mut state = [0u64; 25];

	let mut blocks = data.chunks_exact(RATE_BYTES);
	for block in blocks.by_ref() {
		xor_bytes_into_state(&mut state, block);
		keccak_f1600(&mut state);
	}

	let tail = blocks.remainder();
	let mut block = [0u8; RATE_BYTES];
	block[..tail.len()].copy_from_slice(tail);
	block[tail.len()] = PADDING_BYTE;
	block[RATE_BYTES - 1] |= 0x80;
	xor_bytes_into_state(&mut state, &block);
	keccak_f1600(&mut state);

	let mut digest = [0u8; 32];
	for (i, byte) in digest.iter_mut().enumerate() {
		*byte = (state[i / 8] >> (8 * (i % 8))) as u8;
	}
	digest
}

fn xor_bytes_into_state(state: &mut [u64; 25], block: &[u8]) {
	for (i, byte) in block.iter().enumerate() {
		state[i / 8] ^= u64::from(*byte) << (8 * (i % 8));
	}
}

pub fn theta(state: &mut [u64; 25]) {
	let mut c = [0u64; 5];
	for x in 0..5 {
		c[x] = (0..5).fold(0, |acc, y| acc ^ state[idx(x, y)]);
	}
	for x in 0..5 {
		let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
		for y in 0..5 {
			state[idx(x, y)] ^= d;
		}
	}
}

pub fn rho_pi(state: &mut [u64; 25]) {
	let mut temp = [state[0]; 25];
	for y in 0..5 {
		for x in 0..5 {
			temp[idx(y, (2 * x + 3 * y) % 5)] = state[idx(x, y)].rotate_left(R[idx(x, y)]);
		}
	}
	*state = temp;
}

pub fn chi(state: &mut [u64; 25]) {
	for y in 0..5 {
		let row: [u64; 5] = std::array::from_fn(|x| state[idx(x, y)]);
		for x in 0..5 {
			state[idx(x, y)] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
		}
	}
}

pub fn iota(state: &mut [u64; 25], round: usize) {
	state[0] ^= RC[round];
}

pub fn round(state: &mut [u64; 25], round: usize) {
	theta(state);
	rho_pi(state);
	chi(state);
	iota(state, round);
}

pub fn keccak_f1600(state: &mut [u64; 25]) {
	for r in 0..24 {
		round(state, r);
	}
}
