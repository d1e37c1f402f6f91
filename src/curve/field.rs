/*
    Arithmetic modulo the secp256k1 field prime

        p = 2^256 - 2^32 - 977

    The prime's shape makes reduction cheap: 2^256 is congruent to
    2^32 + 977 mod p, so the high half of a 512 bit product folds back
    into the low half with one small multiplication.
*/

use super::uint::U256;

/// The secp256k1 field prime p.
pub const P: U256 = U256 {
    limbs: [
        0xFFFFFFFEFFFFFC2F,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
    ],
};

// 2^256 mod p = 2^32 + 977
const REDUCE_C: u128 = 0x1_000003D1;

// (p + 1) / 4. For p = 3 (mod 4), a^((p+1)/4) is a square root of a
// whenever a is a quadratic residue.
const SQRT_EXP: U256 = U256 {
    limbs: [
        0xFFFFFFFFBFFFFF0C,
        0xFFFFFFFFFFFFFFFF,
        0xFFFFFFFFFFFFFFFF,
        0x3FFFFFFFFFFFFFFF,
    ],
};

/// (a + b) mod p. Inputs must already be below p.
pub fn add(a: &U256, b: &U256) -> U256 {
    let (sum, carry) = a.overflowing_add(b);
    if carry || sum >= P {
        sum.overflowing_sub(&P).0
    } else {
        sum
    }
}

/// (a - b) mod p. Inputs must already be below p.
pub fn sub(a: &U256, b: &U256) -> U256 {
    let (diff, borrow) = a.overflowing_sub(b);
    if borrow {
        diff.overflowing_add(&P).0
    } else {
        diff
    }
}

/// Additive inverse: p - a, with zero mapped to zero.
pub fn neg(a: &U256) -> U256 {
    if a.is_zero() {
        U256::ZERO
    } else {
        P.overflowing_sub(a).0
    }
}

/// (a * b) mod p.
pub fn mul(a: &U256, b: &U256) -> U256 {
    reduce_wide(a.mul_wide(b))
}

/// Reduce a 512 bit product mod p by folding the high half twice.
fn reduce_wide(wide: [u64; 8]) -> U256 {
    // First fold: value = lo + hi * (2^32 + 977).
    let mut folded = [0u64; 4];
    let mut carry: u128 = 0;
    for i in 0..4 {
        let t = wide[i] as u128 + wide[i + 4] as u128 * REDUCE_C + carry;
        folded[i] = t as u64;
        carry = t >> 64;
    }

    // Second fold for the leftover carry (at most ~2^33).
    let mut limbs = [0u64; 4];
    let mut t = folded[0] as u128 + carry * REDUCE_C;
    limbs[0] = t as u64;
    t >>= 64;
    for i in 1..4 {
        t += folded[i] as u128;
        limbs[i] = t as u64;
        t >>= 64;
    }
    let mut r = U256 { limbs };

    // A carry out of the top limb wraps past 2^256 exactly once; the
    // remainder is tiny, so adding the fold constant cannot carry again.
    if t != 0 {
        r = r.overflowing_add(&U256::from_u128(REDUCE_C)).0;
    }
    if r >= P {
        r = r.overflowing_sub(&P).0;
    }
    r
}

/// base^exp mod p, square and multiply from the most significant bit.
pub fn pow(base: &U256, exp: &U256) -> U256 {
    let mut acc = U256::ONE;
    for i in (0..256).rev() {
        acc = mul(&acc, &acc);
        if exp.bit(i) {
            acc = mul(&acc, base);
        }
    }
    acc
}

/// Multiplicative inverse via Fermat: a^(p-2) mod p.
pub fn inv(a: &U256) -> U256 {
    let exp = P.overflowing_sub(&U256::from_u64(2)).0;
    pow(a, &exp)
}

/// Candidate square root a^((p+1)/4) mod p.
///
/// Only an actual root when a is a quadratic residue; callers must check
/// that squaring the result gives back a.
pub fn sqrt(a: &U256) -> U256 {
    pow(a, &SQRT_EXP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::try_into;

    fn u(hex_str: &str) -> U256 {
        U256::from_be_bytes(&try_into(hex::decode(hex_str).unwrap()))
    }

    fn a() -> U256 {
        u("deadbeef00000000cafebabe000000001234567890abcdef1122334455667788")
    }

    #[test]
    fn mul_against_reference() {
        let p_minus_1 = P.overflowing_sub(&U256::ONE).0;
        assert_eq!(
            mul(&a(), &p_minus_1),
            u("21524110ffffffff35014541ffffffffedcba9876f543210eeddccbaaa9984a7")
        );
        assert_eq!(
            mul(&a(), &a()),
            u("aa8ec8a8dabba767f581d9462ff12edb7f5831abe0626c4064363289ef989cf8")
        );
    }

    #[test]
    fn add_sub_wrap_at_p() {
        let p_minus_1 = P.overflowing_sub(&U256::ONE).0;
        assert_eq!(add(&p_minus_1, &U256::ONE), U256::ZERO);
        assert_eq!(sub(&U256::ZERO, &U256::ONE), p_minus_1);
        assert_eq!(neg(&U256::ONE), p_minus_1);
        assert_eq!(neg(&U256::ZERO), U256::ZERO);
    }

    #[test]
    fn inv_against_reference() {
        assert_eq!(
            inv(&a()),
            u("9db42e9be32d8cf35947a850cb7d56b0e1fbbbbb591eb1b98611f868d308b88e")
        );
        assert_eq!(mul(&a(), &inv(&a())), U256::ONE);
    }

    #[test]
    fn sqrt_of_square_round_trips() {
        let sq = mul(&a(), &a());
        let root = sqrt(&sq);
        assert_eq!(mul(&root, &root), sq);
    }
}
