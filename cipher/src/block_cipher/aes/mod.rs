//! AES-128加密<br>
//! FIPS 197  <br>
//! [FIPS 197-upd1](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.197-upd1.pdf)<br>
//!
//! 从第一性原理实现: S盒由[`crate::galois`]的域运算派生而来,
//! MixColumns直接在GF(2^8)上做矩阵乘法, 不使用预展开的T表.
//! 仅组装加密流水线, 逆向S盒只作为独立表暴露.

mod cipher;
mod key_schedule;
mod state;

pub use cipher::AES128;
pub use key_schedule::RoundKeys;
pub use state::{Block, Word};

#[cfg(test)]
mod tests;

use crate::{BlockEncrypt, CipherError, Encrypt};

impl BlockEncrypt<16> for AES128 {
    fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
        self.encrypt_block_inner(plaintext)
    }
}

impl Encrypt for AES128 {
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        match <&[u8; 16]>::try_from(plaintext) {
            Ok(block) => {
                ciphertext.extend(self.encrypt_block(block));
                Ok(())
            }
            Err(_) => Err(CipherError::InvalidBlockSize {
                target: Self::BLOCK_SIZE,
                real: plaintext.len(),
            }),
        }
    }
}
