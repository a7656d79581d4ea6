use super::key_schedule::RoundKeys;
use crate::galois::{FieldElement, SBox};
use crate::CipherError;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// AES-128分组加密器, 持有派生好的轮密钥.
///
/// 加密流水线固定10轮, 对任意字节输入都是全函数, 运行期不会失败.
/// 本实现只组装了正向(加密)流水线.
#[derive(Clone)]
pub struct AES128 {
    round_keys: RoundKeys,
}

impl AES128 {
    pub const KEY_SIZE: usize = 16;
    pub const BLOCK_SIZE: usize = 16;
    // 加密轮数
    const NR: usize = 10;

    pub fn new(key: [u8; Self::KEY_SIZE]) -> Self {
        Self {
            round_keys: RoundKeys::expand(&key),
        }
    }

    pub fn from_slice(key: &[u8]) -> Result<Self, CipherError> {
        match <[u8; Self::KEY_SIZE]>::try_from(key) {
            Ok(key) => Ok(Self::new(key)),
            Err(_) => Err(CipherError::InvalidKeySize {
                target: Self::KEY_SIZE,
                real: key.len(),
            }),
        }
    }

    /// 换钥: 丢弃旧轮密钥并整表重建.
    pub fn rekey(&mut self, key: [u8; Self::KEY_SIZE]) {
        self.round_keys = RoundKeys::expand(&key);
    }

    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    pub(super) fn encrypt_block_inner(
        &self,
        data: &[u8; Self::BLOCK_SIZE],
    ) -> [u8; Self::BLOCK_SIZE] {
        self.encrypt_block_traced(data, |_, _| {})
    }

    /// 加密单个分组, 每轮AddRoundKey后回调`observe(round, state)`.
    ///
    /// 回调仅作诊断观察, 对密文无任何影响.
    pub fn encrypt_block_traced<F>(
        &self,
        data: &[u8; Self::BLOCK_SIZE],
        mut observe: F,
    ) -> [u8; Self::BLOCK_SIZE]
    where
        F: FnMut(usize, &[u8; Self::BLOCK_SIZE]),
    {
        let mut state = *data;

        // AddRoundKey
        self.round_keys.block(0).xor_into(&mut state);
        observe(0, &state);

        // SubBytes -> ShiftRows -> MixColumns -> AddRoundKey
        for round in 1..Self::NR {
            sub_bytes(&mut state);
            shift_rows(&mut state);
            mix_columns(&mut state);
            self.round_keys.block(round).xor_into(&mut state);
            observe(round, &state);
        }

        // 最终轮不做MixColumns
        sub_bytes(&mut state);
        shift_rows(&mut state);
        self.round_keys.block(Self::NR).xor_into(&mut state);
        observe(Self::NR, &state);

        state
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for AES128 {
    fn zeroize(&mut self) {
        self.round_keys.zeroize();
    }
}

/// 逐字节过S盒正向替换
fn sub_bytes(state: &mut [u8; 16]) {
    let sbox = SBox::tables();
    for b in state.iter_mut() {
        *b = sbox.forward(*b);
    }
}

/// 行循环左移: 第r行(字节{r, r+4, r+8, r+12})左移r个字节, 第0行不动.
fn shift_rows(state: &mut [u8; 16]) {
    for r in 1..4 {
        let row = [state[r], state[r + 4], state[r + 8], state[r + 12]];
        for c in 0..4 {
            state[r + 4 * c] = row[(c + r) % 4];
        }
    }
}

/// 列混合: 每列(连续4字节)左乘固定矩阵
/// [2 3 1 1 / 1 2 3 1 / 1 1 2 3 / 3 1 1 2], 运算在GF(2^8)上.
fn mix_columns(state: &mut [u8; 16]) {
    const X2: FieldElement = FieldElement::new(2);
    const X3: FieldElement = FieldElement::new(3);

    for col in state.chunks_exact_mut(4) {
        let b0 = FieldElement::new(col[0]);
        let b1 = FieldElement::new(col[1]);
        let b2 = FieldElement::new(col[2]);
        let b3 = FieldElement::new(col[3]);

        col[0] = b0.mul(X2).add(b1.mul(X3)).add(b2).add(b3).to_byte();
        col[1] = b0.add(b1.mul(X2)).add(b2.mul(X3)).add(b3).to_byte();
        col[2] = b0.add(b1).add(b2.mul(X2)).add(b3.mul(X3)).to_byte();
        col[3] = b0.mul(X3).add(b1).add(b2).add(b3.mul(X2)).to_byte();
    }
}
