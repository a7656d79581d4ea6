mod error;
pub use error::CipherError;

pub mod galois;
pub use galois::{FieldElement, SBox};

pub mod block_cipher;
pub use block_cipher::{Block, BlockCipher, BlockEncrypt, RoundKeys, Word, AES128};

pub mod stream_cipher;
pub use stream_cipher::{StreamCipherFinish, StreamEncrypt};

pub mod cipher_mode;
pub use cipher_mode::BlockPadding;

pub trait Encrypt {
    // 写入ciphertext之前不清空
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError>;
}
