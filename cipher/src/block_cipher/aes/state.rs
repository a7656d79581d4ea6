use std::ops::BitXor;

use crate::galois::SBox;
use crate::CipherError;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 4字节字, 密钥派生的基本单位, 也是状态矩阵的行视图.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Word([u8; 4]);

impl Word {
    pub const SIZE: usize = 4;

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// 取第`i`字节(0..3), 越界返回[`CipherError::InvalidIndex`].
    pub fn get(self, i: usize) -> Result<u8, CipherError> {
        match self.0.get(i) {
            Some(&b) => Ok(b),
            None => Err(CipherError::InvalidIndex {
                index: i,
                bound: Self::SIZE,
            }),
        }
    }

    /// 字节循环左移一位: `(v0,v1,v2,v3) -> (v1,v2,v3,v0)`
    pub const fn rot_word(self) -> Self {
        let [v0, v1, v2, v3] = self.0;
        Self([v1, v2, v3, v0])
    }

    /// 逐字节过S盒正向替换
    pub fn sub_word(self) -> Self {
        let sbox = SBox::tables();
        let [v0, v1, v2, v3] = self.0;
        Self([
            sbox.forward(v0),
            sbox.forward(v1),
            sbox.forward(v2),
            sbox.forward(v3),
        ])
    }
}

impl BitXor for Word {
    type Output = Word;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0.iter()) {
            *a ^= b;
        }
        Self(out)
    }
}

/// 与32位常数异或, 常数字节按低位在前注入(轮常数只占低字节).
impl BitXor<u32> for Word {
    type Output = Word;

    fn bitxor(self, rhs: u32) -> Self::Output {
        self ^ Word(rhs.to_le_bytes())
    }
}

/// 16字节状态块, 轮密钥与加密状态的统一容器.
///
/// 字视图`word(i)`对应字节`[4i..4i+3]`, 所有访问都做边界检查.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Block([u8; 16]);

impl Block {
    pub const SIZE: usize = 16;
    const WORDS: usize = 4;

    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn from_words(words: [Word; 4]) -> Self {
        let mut bytes = [0u8; Self::SIZE];
        for (chunk, w) in bytes.chunks_exact_mut(Word::SIZE).zip(words.iter()) {
            chunk.copy_from_slice(&w.to_bytes());
        }
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// 取第`i`个字(0..3), 越界返回[`CipherError::InvalidIndex`].
    pub fn word(&self, i: usize) -> Result<Word, CipherError> {
        if i < Self::WORDS {
            Ok(self.words()[i])
        } else {
            Err(CipherError::InvalidIndex {
                index: i,
                bound: Self::WORDS,
            })
        }
    }

    /// 完整的4字视图
    pub fn words(&self) -> [Word; 4] {
        let mut words = [Word::default(); Self::WORDS];
        for (w, chunk) in words.iter_mut().zip(self.0.chunks_exact(Word::SIZE)) {
            let mut bytes = [0u8; Word::SIZE];
            bytes.copy_from_slice(chunk);
            *w = Word::new(bytes);
        }
        words
    }

    /// 将本块16字节原位异或进`buf`, 用于AddRoundKey和链接混合.
    pub fn xor_into(&self, buf: &mut [u8; 16]) {
        for (b, x) in buf.iter_mut().zip(self.0.iter()) {
            *b ^= x;
        }
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl From<[u8; 16]> for Block {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = CipherError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match <[u8; Self::SIZE]>::try_from(value) {
            Ok(bytes) => Ok(Self(bytes)),
            Err(_) => Err(CipherError::InvalidBlockSize {
                target: Self::SIZE,
                real: value.len(),
            }),
        }
    }
}
