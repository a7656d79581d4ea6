use super::state::{Block, Word};
use crate::CipherError;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 轮常数表, GF(2^8)上x的连续幂次, 下标0不使用.
const RCON: [u8; 11] = [
    0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

/// AES-128轮密钥: 11个分组(44个字), 下标0为原始密钥, 1..10为各轮密钥.
///
/// 换钥时整表重建, 不做增量更新.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundKeys([Block; 11]);

impl RoundKeys {
    pub const COUNT: usize = 11;

    /// 密钥派生(Key Schedule), FIPS 197 5.2
    pub fn expand(key: &[u8; 16]) -> Self {
        let mut keys = [Block::default(); Self::COUNT];
        keys[0] = Block::new(*key);

        for round in 1..Self::COUNT {
            let prev = keys[round - 1].words();

            let temp = prev[3].rot_word().sub_word() ^ u32::from(RCON[round]);

            let mut w = [Word::default(); 4];
            w[0] = temp ^ prev[0];
            w[1] = w[0] ^ prev[1];
            w[2] = w[1] ^ prev[2];
            w[3] = w[2] ^ prev[3];
            keys[round] = Block::from_words(w);
        }

        Self(keys)
    }

    /// 取第`round`轮密钥(0..=10), 越界返回[`CipherError::InvalidIndex`].
    pub fn get(&self, round: usize) -> Result<&Block, CipherError> {
        match self.0.get(round) {
            Some(block) => Ok(block),
            None => Err(CipherError::InvalidIndex {
                index: round,
                bound: Self::COUNT,
            }),
        }
    }

    pub(super) fn block(&self, round: usize) -> &Block {
        &self.0[round]
    }
}

impl TryFrom<&[Block]> for RoundKeys {
    type Error = CipherError;

    fn try_from(value: &[Block]) -> Result<Self, Self::Error> {
        match <[Block; Self::COUNT]>::try_from(value) {
            Ok(blocks) => Ok(Self(blocks)),
            Err(_) => Err(CipherError::InvalidRoundKeyCount {
                target: Self::COUNT,
                real: value.len(),
            }),
        }
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for RoundKeys {
    fn zeroize(&mut self) {
        for block in self.0.iter_mut() {
            block.zeroize();
        }
    }
}
