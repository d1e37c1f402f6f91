/*
    secp256k1 point arithmetic.

    Curve: y^2 = x^3 + 7 over the prime field of curve::field, with the
    standard affine chord-and-tangent formulas. The point at infinity is a
    distinct sentinel; it is never a valid public key and has no
    serialization.

    Reference:
        https://www.secg.org/sec2-v2.pdf (curve parameters)
        https://en.bitcoin.it/wiki/Secp256k1
*/

pub mod field;
pub mod uint;

use crate::error::Error;
use uint::U256;

/// The group order n of the secp256k1 base point.
pub const N: U256 = U256 {
    limbs: [
        0xBFD25E8CD0364141,
        0xBAAEDCE6AF48A03B,
        0xFFFFFFFFFFFFFFFE,
        0xFFFFFFFFFFFFFFFF,
    ],
};

const GX: U256 = U256 {
    limbs: [
        0x59F2815B16F81798,
        0x029BFCDB2DCE28D9,
        0x55A06295CE870B07,
        0x79BE667EF9DCBBAC,
    ],
};

const GY: U256 = U256 {
    limbs: [
        0x9C47D08FFB10D4B8,
        0xFD17B448A6855419,
        0x5DA4FBFC0E1108A8,
        0x483ADA7726A3C465,
    ],
};

/// An affine point on secp256k1, or the point at infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: U256, y: U256 },
}

impl Point {
    /// The base point G.
    pub fn generator() -> Point {
        Point::Affine { x: GX, y: GY }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Whether the coordinates satisfy y^2 = x^3 + 7. The point at infinity
    /// is not on the curve in this sense.
    pub fn is_on_curve(&self) -> bool {
        match self {
            Point::Infinity => false,
            Point::Affine { x, y } => field::mul(y, y) == curve_rhs(x),
        }
    }

    /// Affine point addition covering every special case: either operand
    /// at infinity, mirrored points, and doubling.
    pub fn add(&self, other: &Point) -> Point {
        let (x1, y1) = match self {
            Point::Infinity => return *other,
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match other {
            Point::Infinity => return *self,
            Point::Affine { x, y } => (x, y),
        };

        if x1 == x2 {
            // Same x means the points are equal or mirrored; mirrored
            // points sum to infinity.
            return if y1 == y2 { self.double() } else { Point::Infinity };
        }

        let lambda = field::mul(&field::sub(y2, y1), &field::inv(&field::sub(x2, x1)));
        let x3 = field::sub(&field::sub(&field::mul(&lambda, &lambda), x1), x2);
        let y3 = field::sub(&field::mul(&lambda, &field::sub(x1, &x3)), y1);
        Point::Affine { x: x3, y: y3 }
    }

    /// Affine point doubling with the tangent slope 3x^2 / 2y.
    pub fn double(&self) -> Point {
        let (x, y) = match self {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            return Point::Infinity;
        }

        let lambda = field::mul(
            &field::mul(&U256::from_u64(3), &field::mul(x, x)),
            &field::inv(&field::add(y, y)),
        );
        let x3 = field::sub(&field::sub(&field::mul(&lambda, &lambda), x), x);
        let y3 = field::sub(&field::mul(&lambda, &field::sub(x, &x3)), y);
        Point::Affine { x: x3, y: y3 }
    }

    /// Scalar multiplication k * self, double-and-add from the most
    /// significant bit. Scalars at or above the group order are rejected.
    pub fn mul(&self, k: &U256) -> Result<Point, Error> {
        if *k >= N {
            return Err(Error::InvalidKey("scalar is not below the curve order"));
        }
        let mut acc = Point::Infinity;
        for i in (0..256).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add(self);
            }
        }
        Ok(acc)
    }

    /// SEC1 compressed form: a parity byte (0x02 even y, 0x03 odd y)
    /// followed by the big-endian x coordinate.
    ///
    /// Panics on the point at infinity, which every constructor in this
    /// crate rejects before a point is stored.
    pub fn compress(&self) -> [u8; 33] {
        match self {
            Point::Infinity => panic!("the point at infinity has no serialization"),
            Point::Affine { x, y } => {
                let mut out = [0u8; 33];
                out[0] = if y.is_even() { 0x02 } else { 0x03 };
                out[1..].copy_from_slice(&x.to_be_bytes());
                out
            }
        }
    }

    /// Recover the affine point behind a 33 byte compressed key.
    ///
    /// Solving for y takes the modular square root y = (x^3+7)^((p+1)/4);
    /// when x^3+7 has no root the key is not on the curve. Crate-internal:
    /// derivation and codec validation need the full point, but no public
    /// API hands out a decompressed key.
    pub(crate) fn from_compressed(bytes: &[u8; 33]) -> Result<Point, Error> {
        let want_odd = match bytes[0] {
            0x02 => false,
            0x03 => true,
            _ => return Err(Error::InvalidKey("compressed key parity byte must be 0x02 or 0x03")),
        };

        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&bytes[1..]);
        let x = U256::from_be_bytes(&x_bytes);
        if x >= field::P {
            return Err(Error::InvalidKey("x coordinate is not a field element"));
        }

        let rhs = curve_rhs(&x);
        let root = field::sqrt(&rhs);
        if field::mul(&root, &root) != rhs {
            return Err(Error::InvalidKey("x coordinate is not on the curve"));
        }

        // The root and its negation have opposite parity; pick the one the
        // prefix byte asks for.
        let y = if root.is_even() == want_odd {
            field::neg(&root)
        } else {
            root
        };
        Ok(Point::Affine { x, y })
    }
}

/// Right hand side of the curve equation, x^3 + 7.
fn curve_rhs(x: &U256) -> U256 {
    field::add(&field::mul(&field::mul(x, x), x), &U256::from_u64(7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::try_into;

    fn u(hex_str: &str) -> U256 {
        U256::from_be_bytes(&try_into(hex::decode(hex_str).unwrap()))
    }

    #[test]
    fn generator_is_on_curve() {
        assert!(Point::generator().is_on_curve());
        assert!(!Point::Infinity.is_on_curve());
    }

    #[test]
    fn doubling_matches_known_2g() {
        let two_g = Point::generator().double();
        assert_eq!(
            two_g,
            Point::Affine {
                x: u("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
                y: u("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
            }
        );
        assert!(two_g.is_on_curve());
    }

    #[test]
    fn scalar_mul_agrees_with_addition() {
        let g = Point::generator();
        let three_g = g.mul(&U256::from_u64(3)).unwrap();
        assert_eq!(three_g, g.add(&g).add(&g));
        assert!(three_g.is_on_curve());
    }

    #[test]
    fn infinity_is_the_additive_identity() {
        let g = Point::generator();
        assert_eq!(Point::Infinity.add(&g), g);
        assert_eq!(g.add(&Point::Infinity), g);
        assert_eq!(g.mul(&U256::ZERO).unwrap(), Point::Infinity);
    }

    #[test]
    fn mirrored_points_cancel() {
        let g = Point::generator();
        let neg_g = match g {
            Point::Affine { x, y } => Point::Affine {
                x,
                y: field::neg(&y),
            },
            Point::Infinity => unreachable!(),
        };
        assert!(neg_g.is_on_curve());
        assert_eq!(g.add(&neg_g), Point::Infinity);
    }

    #[test]
    fn scalar_at_order_is_rejected() {
        assert_eq!(
            Point::generator().mul(&N),
            Err(Error::InvalidKey("scalar is not below the curve order"))
        );
    }

    #[test]
    fn order_minus_one_gives_negated_generator() {
        let n_minus_1 = N.overflowing_sub(&U256::ONE).0;
        let p = Point::generator().mul(&n_minus_1).unwrap();
        match (p, Point::generator()) {
            (Point::Affine { x, y }, Point::Affine { x: gx, y: gy }) => {
                assert_eq!(x, gx);
                assert_eq!(y, field::neg(&gy));
            }
            _ => panic!("expected affine points"),
        }
    }

    #[test]
    fn compress_and_recover_round_trip() {
        let g = Point::generator();
        let compressed = g.compress();
        assert_eq!(
            hex::encode(compressed),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(Point::from_compressed(&compressed).unwrap(), g);
    }

    #[test]
    fn recover_honors_parity() {
        let key: [u8; 33] = try_into(
            hex::decode("030589ee559348bd6a7325994f9c8eff12bd5d73cc683142bd0dd1a17abc99b0dc")
                .unwrap(),
        );
        let point = Point::from_compressed(&key).unwrap();
        assert!(point.is_on_curve());
        assert_eq!(point.compress(), key);
        match point {
            Point::Affine { y, .. } => assert!(!y.is_even()),
            Point::Infinity => panic!("expected affine point"),
        }
    }

    #[test]
    fn recover_rejects_off_curve_x() {
        // x = 5: x^3 + 7 is not a quadratic residue mod p.
        let mut key = [0u8; 33];
        key[0] = 0x02;
        key[32] = 5;
        assert_eq!(
            Point::from_compressed(&key),
            Err(Error::InvalidKey("x coordinate is not on the curve"))
        );
    }

    #[test]
    fn recover_rejects_bad_parity_byte() {
        let mut key = Point::generator().compress();
        key[0] = 0x04;
        assert!(matches!(
            Point::from_compressed(&key),
            Err(Error::InvalidKey(_))
        ));
    }
}
