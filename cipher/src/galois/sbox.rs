//! S盒: 字节替换表<br>
//!
//! 正向变换为域上求逆(`pow(c, 254)`)后接仿射变换(常数0x63),
//! 逆向变换为逆仿射变换(常数0x05)后接域上求逆.
//! 两张256项表在进程内惰性构建一次后只读共享.

use std::sync::OnceLock;

use super::FieldElement;

/// 仿射变换常数
const AFFINE: u8 = 0x63;
/// 逆仿射变换常数
const INV_AFFINE: u8 = 0x05;

static TABLES: OnceLock<SBox> = OnceLock::new();

/// 预计算的正/逆向字节替换表.
#[derive(Clone, Debug)]
pub struct SBox {
    forward: [u8; 256],
    inverse: [u8; 256],
}

impl SBox {
    /// 进程级共享表, 首次访问时构建.
    pub fn tables() -> &'static Self {
        TABLES.get_or_init(Self::derive)
    }

    fn derive() -> Self {
        let (mut forward, mut inverse) = ([0u8; 256], [0u8; 256]);
        for x in 0..=255u8 {
            forward[x as usize] = Self::transform(x);
            inverse[x as usize] = Self::inverse_transform(x);
        }
        Self { forward, inverse }
    }

    /// 正向替换: `s[i] = b[i] ^ b[(i+4)%8] ^ b[(i+5)%8] ^ b[(i+6)%8] ^ b[(i+7)%8] ^ k[i]`,
    /// 其中`b = c^254`, `k`为0x63的位.
    fn transform(c: u8) -> u8 {
        let b = FieldElement::new(c).inv();
        let k = FieldElement::new(AFFINE);

        let mut s = 0u8;
        for i in 0..8 {
            let bit = b.bit_at(i)
                ^ b.bit_at((i + 4) % 8)
                ^ b.bit_at((i + 5) % 8)
                ^ b.bit_at((i + 6) % 8)
                ^ b.bit_at((i + 7) % 8)
                ^ k.bit_at(i);
            s |= bit << i;
        }
        s
    }

    /// 逆向替换: 先做逆仿射变换再求逆元.
    fn inverse_transform(x: u8) -> u8 {
        let s = FieldElement::new(x);
        let k = FieldElement::new(INV_AFFINE);

        let mut b = 0u8;
        b |= s.bit_at(2) ^ s.bit_at(5) ^ s.bit_at(7) ^ k.bit_at(0);
        b |= (s.bit_at(0) ^ s.bit_at(3) ^ s.bit_at(6) ^ k.bit_at(1)) << 1;
        b |= (s.bit_at(1) ^ s.bit_at(4) ^ s.bit_at(7) ^ k.bit_at(2)) << 2;
        b |= (s.bit_at(0) ^ s.bit_at(2) ^ s.bit_at(5) ^ k.bit_at(3)) << 3;
        b |= (s.bit_at(1) ^ s.bit_at(3) ^ s.bit_at(6) ^ k.bit_at(4)) << 4;
        b |= (s.bit_at(2) ^ s.bit_at(4) ^ s.bit_at(7) ^ k.bit_at(5)) << 5;
        b |= (s.bit_at(0) ^ s.bit_at(3) ^ s.bit_at(5) ^ k.bit_at(6)) << 6;
        b |= (s.bit_at(1) ^ s.bit_at(4) ^ s.bit_at(6) ^ k.bit_at(7)) << 7;

        FieldElement::new(b).inv().to_byte()
    }

    pub fn forward(&self, x: u8) -> u8 {
        self.forward[x as usize]
    }

    pub fn inverse(&self, x: u8) -> u8 {
        self.inverse[x as usize]
    }

    pub fn forward_table(&self) -> &[u8; 256] {
        &self.forward
    }

    pub fn inverse_table(&self) -> &[u8; 256] {
        &self.inverse
    }
}
