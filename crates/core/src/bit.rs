use std::{
	fmt,
	ops::{Add, BitAnd, BitXor, Mul, Not, Sub},
};

/// An element of GF(2).
///
/// Addition and subtraction are both XOR, multiplication is AND. There is no carry and no
/// range to check: every `Bit` is a valid field element.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bit(pub bool);

impl Bit {
	pub const ZERO: Bit = Bit(false);
	pub const ONE: Bit = Bit(true);

	pub fn is_one(self) -> bool {
		self.0
	}

	pub fn as_u8(self) -> u8 {
		self.0 as u8
	}

	/// Returns bit `i` of `value`, counting from the least significant bit.
	pub fn of_u64(value: u64, i: usize) -> Bit {
		debug_assert!(i < 64);
		Bit((value >> i) & 1 == 1)
	}

	/// Decomposes a 64-bit value into bits, least significant bit first.
	pub fn bits_of_u64(value: u64) -> [Bit; 64] {
		std::array::from_fn(|i| Bit::of_u64(value, i))
	}

	/// Recomposes a 64-bit value from bits given least significant bit first.
	pub fn u64_from_bits(bits: &[Bit]) -> u64 {
		assert_eq!(bits.len(), 64, "a lane has exactly 64 bits");
		bits.iter()
			.enumerate()
			.fold(0u64, |acc, (i, bit)| acc | ((bit.0 as u64) << i))
	}

	/// Expands bytes into bits, least significant bit of each byte first.
	pub fn bits_of_bytes(bytes: &[u8]) -> Vec<Bit> {
		bytes
			.iter()
			.flat_map(|byte| (0..8).map(move |j| Bit((byte >> j) & 1 == 1)))
			.collect()
	}

	/// Packs bits, least significant bit first within each byte, back into bytes.
	///
	/// # Preconditions
	///
	/// The number of bits must be a multiple of 8.
	pub fn bytes_from_bits(bits: &[Bit]) -> Vec<u8> {
		assert!(bits.len() % 8 == 0, "bit length {} is not byte aligned", bits.len());
		bits.chunks_exact(8)
			.map(|chunk| {
				chunk
					.iter()
					.enumerate()
					.fold(0u8, |acc, (j, bit)| acc | (bit.as_u8() << j))
			})
			.collect()
	}
}

impl fmt::Debug for Bit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Bit({})", self.as_u8())
	}
}

impl From<bool> for Bit {
	fn from(value: bool) -> Self {
		Bit(value)
	}
}

impl Add for Bit {
	type Output = Self;

	fn add(self, rhs: Self) -> Self::Output {
		Bit(self.0 ^ rhs.0)
	}
}

impl Sub for Bit {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		Bit(self.0 ^ rhs.0)
	}
}

impl Mul for Bit {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self::Output {
		Bit(self.0 & rhs.0)
	}
}

impl BitXor for Bit {
	type Output = Self;

	fn bitxor(self, rhs: Self) -> Self::Output {
		self + rhs
	}
}

impl BitAnd for Bit {
	type Output = Self;

	fn bitand(self, rhs: Self) -> Self::Output {
		self * rhs
	}
}

impl Not for Bit {
	type Output = Self;

	fn not(self) -> Self::Output {
		Bit::ONE - self
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_constants() {
		assert_eq!(Bit::ZERO, Bit(false));
		assert_eq!(Bit::ONE, Bit(true));
		assert_eq!(Bit::default(), Bit::ZERO);
		assert_eq!(Bit::ONE + Bit::ONE, Bit::ZERO);
		assert_eq!(Bit::ONE - Bit::ONE, Bit::ZERO);
		assert_eq!(Bit::ZERO - Bit::ONE, Bit::ONE);
	}

	#[test]
	fn test_bytes_lsb_first() {
		let bits = Bit::bits_of_bytes(&[0x01, 0x80]);
		assert_eq!(bits.len(), 16);
		assert_eq!(bits[0], Bit::ONE);
		assert!(bits[1..15].iter().all(|bit| *bit == Bit::ZERO));
		assert_eq!(bits[15], Bit::ONE);
	}

	proptest! {
		#[test]
		fn prop_field_laws(a in any::<bool>(), b in any::<bool>(), c in any::<bool>()) {
			let (a, b, c) = (Bit(a), Bit(b), Bit(c));

			assert_eq!(a + a, Bit::ZERO);
			assert_eq!(a + Bit::ZERO, a);
			assert_eq!(a + b, b + a);
			assert_eq!((a + b) + c, a + (b + c));
			assert_eq!(a * b, b * a);
			assert_eq!(a * (b + c), a * b + a * c);
			assert_eq!(a - b, a + b);
			assert_eq!(!!a, a);
			assert_eq!((a ^ b).0, a.0 ^ b.0);
			assert_eq!((a & b).0, a.0 & b.0);
			assert_eq!((!a).0, !a.0);
		}

		#[test]
		fn prop_u64_roundtrip(value in any::<u64>()) {
			let bits = Bit::bits_of_u64(value);
			assert_eq!(Bit::u64_from_bits(&bits), value);
			assert_eq!(bits[0].is_one(), value & 1 == 1);
			assert_eq!(bits[63].is_one(), value >> 63 == 1);
		}

		#[test]
		fn prop_bytes_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
			let bits = Bit::bits_of_bytes(&bytes);
			assert_eq!(bits.len(), bytes.len() * 8);
			assert_eq!(Bit::bytes_from_bits(&bits), bytes);
		}
	}
}
