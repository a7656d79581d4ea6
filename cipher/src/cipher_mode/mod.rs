//! # Recommendation for Block Cipher Mode of Operation: Method and Techniques
//!
//! [Block Cipher Techniques](https://csrc.nist.gov/Projects/block-cipher-techniques/BCM/current-modes)<br>
//! [NIST 800-38A, Recommendation for Block Cipher Modes of operation Methods and Techniques](https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf)<br>
//!
//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//! $$
//!
//! ## The Cipher Block Chaining Mode(CBC)
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//! $$
//!
//! 本crate只实现加密方向, 解密不在范围内.

mod padding;
pub use padding::{BlockPadding, EmptyPadding, Pkcs7Padding};

mod ecb;
pub use ecb::{AES128Ecb, ECB};

mod cbc;
pub use cbc::{AES128Cbc, CBC};
