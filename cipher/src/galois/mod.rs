//! GF(2^8)有限域运算<br>
//!
//! AES is based on the mathematical behavior of binary polynomials
//! (polynomials over GF(2)) modulo the irreducible polynomial x⁸ + x⁴ + x³ + x + 1.
//! Addition of these binary polynomials corresponds to binary xor.
//! Reducing mod poly corresponds to binary xor with poly every
//! time a 0x100 bit appears.<br>
//!
//! 非零元素在乘法下构成255阶循环群, 故`a^255 = 1`, `a^254`即`a`的乘法逆元.

use crate::CipherError;

mod sbox;
pub use sbox::SBox;

/// 既约多项式 x⁸ + x⁴ + x³ + x + 1, 约简常数
const POLY: u8 = 0x1b;

/// GF(2^8)元素, 字节的每一位是GF(2)上多项式的系数.
///
/// 运算均为具名纯函数, 无隐式整数转换.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldElement(u8);

impl FieldElement {
    pub const BITS: usize = 8;

    pub const fn new(x: u8) -> Self {
        Self(x)
    }

    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// 加法, 即按位异或. 满足`add(a, a) = 0`.
    pub const fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }

    /// 乘法, 俄罗斯农民乘法: 逐位扫描`rhs`, 置位则累加当前的`self`,
    /// 每轮`self`左移一位, 溢出时异或约简常数`0x1b`.
    pub const fn mul(self, rhs: Self) -> Self {
        let (mut a, mut b, mut product) = (self.0, rhs.0, 0u8);

        while b != 0 {
            if (b & 1) != 0 {
                product ^= a;
            }
            let carry = (a & 0x80) != 0;
            a <<= 1;
            if carry {
                a ^= POLY;
            }
            b >>= 1;
        }

        Self(product)
    }

    /// 幂运算, `n-1`次乘原值. `pow(a, 254)`即非零元`a`的乘法逆元,
    /// `pow(0, n) = 0`.
    pub const fn pow(self, n: usize) -> Self {
        let mut e = self;
        let mut i = 1;
        while i < n {
            e = e.mul(self);
            i += 1;
        }
        e
    }

    /// 乘法逆元, 0的逆元约定为0.
    pub const fn inv(self) -> Self {
        self.pow(254)
    }

    /// 取第`i`位(0..7), 越界返回[`CipherError::InvalidIndex`].
    pub fn bit(self, i: usize) -> Result<u8, CipherError> {
        if i < Self::BITS {
            Ok(self.bit_at(i))
        } else {
            Err(CipherError::InvalidIndex {
                index: i,
                bound: Self::BITS,
            })
        }
    }

    // 域内派生S盒用, 调用方保证`i < 8`
    const fn bit_at(self, i: usize) -> u8 {
        (self.0 >> i) & 1
    }
}

#[cfg(test)]
mod tests {
    use super::FieldElement;
    use crate::CipherError;
    use rand::Rng;

    #[test]
    fn add_is_xor_and_self_inverse() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (x, y) = (FieldElement::new(a), FieldElement::new(b));
                assert_eq!(x.add(y), y.add(x));
                assert_eq!(x.add(y).add(y), x);
            }
            let x = FieldElement::new(a);
            assert_eq!(x.add(x), FieldElement::new(0));
        }
    }

    #[test]
    fn mul_commutative() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let (x, y) = (FieldElement::new(a), FieldElement::new(b));
                assert_eq!(x.mul(y), y.mul(x), "a={a:#x}, b={b:#x}");
            }
        }
    }

    #[test]
    fn mul_distributes_over_add() {
        let mut rng = rand::thread_rng();
        for _ in 0..10000 {
            let (a, b, c): (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
            let (x, y, z) = (
                FieldElement::new(a),
                FieldElement::new(b),
                FieldElement::new(c),
            );
            assert_eq!(
                x.mul(y.add(z)),
                x.mul(y).add(x.mul(z)),
                "a={a:#x}, b={b:#x}, c={c:#x}"
            );
        }
    }

    #[test]
    fn pow_254_is_multiplicative_inverse() {
        for a in 1..=255u8 {
            let x = FieldElement::new(a);
            assert_eq!(x.mul(x.pow(254)), FieldElement::new(1), "a={a:#x}");
        }

        let zero = FieldElement::new(0);
        assert_eq!(zero.pow(254), zero);
        for a in 0..=255u8 {
            assert_eq!(zero.mul(FieldElement::new(a)), zero);
        }
    }

    #[test]
    fn known_products() {
        // FIPS 197 4.2: {57} · {83} = {c1}
        assert_eq!(
            FieldElement::new(0x57).mul(FieldElement::new(0x83)),
            FieldElement::new(0xc1)
        );
        // {57} + {83} = {d4}
        assert_eq!(
            FieldElement::new(0x57).add(FieldElement::new(0x83)),
            FieldElement::new(0xd4)
        );
    }

    #[test]
    fn bit_accessor_bounds() {
        let x = FieldElement::new(0b1010_0101);
        assert_eq!(x.bit(0).unwrap(), 1);
        assert_eq!(x.bit(1).unwrap(), 0);
        assert_eq!(x.bit(7).unwrap(), 1);
        assert!(matches!(
            x.bit(8),
            Err(CipherError::InvalidIndex { index: 8, bound: 8 })
        ));
    }
}
