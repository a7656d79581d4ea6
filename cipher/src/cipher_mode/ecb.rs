//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//! $$
//!
//! 给定的密钥, 每个明文块和密文块一一对应
//! (如果不期待使用这一特性, 不应该使用ECB模式), 加密可并行. <br>

use super::cbc::to_arr;
use crate::block_cipher::AES128;
use crate::cipher_mode::BlockPadding;
use crate::{BlockEncrypt, CipherError, StreamCipherFinish, StreamEncrypt};
use std::io::{Read, Write};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// Electronic Codebook Mode <br>
///
/// `ECB<Padding, BlockCipher, BLOCK_SIZE>`
pub struct ECB<P, E, const BLOCK_SIZE: usize> {
    //缓存输入数据
    data: Vec<u8>,
    cipher: E,
    padding: P,
}

pub type AES128Ecb<P> = ECB<P, AES128, 16>;

impl<P, E, const N: usize> ECB<P, E, N>
where
    P: BlockPadding,
{
    pub fn new(cipher: E) -> Self {
        Self {
            data: Vec::with_capacity(N),
            cipher,
            padding: P::new(N),
        }
    }

    pub fn set_padding(&mut self, padding: P) {
        self.padding = padding;
    }
}

#[cfg(feature = "sec-zeroize")]
impl<P, E, const N: usize> Zeroize for ECB<P, E, N>
where
    E: Zeroize,
{
    fn zeroize(&mut self) {
        self.cipher.zeroize();
        self.data.zeroize();
    }
}

impl<P, E, const N: usize> StreamEncrypt for ECB<P, E, N>
where
    E: BlockEncrypt<N>,
    P: BlockPadding,
{
    fn stream_encrypt<'a, R: Read, W: Write>(
        &'a mut self,
        in_data: &'a mut R,
        out_data: &mut W,
    ) -> Result<StreamCipherFinish<'a, Self, R, W>, CipherError> {
        let (mut buf, mut out_len) = (Vec::with_capacity(2048), 0);
        buf.extend(self.data.iter());
        self.data.clear();
        let in_len = in_data.read_to_end(&mut buf).map_err(CipherError::from)?;

        let mut itr = buf.chunks_exact(N);
        for chunk in &mut itr {
            let block = to_arr(chunk)?;
            let d = self.cipher.encrypt_block(&block);
            out_data
                .write_all(d.as_slice())
                .map_err(CipherError::from)?;
            out_len += N;
        }
        self.data.extend(itr.remainder());

        let s = StreamCipherFinish::new(self, (in_len, out_len), |sf, outdata: &mut W| {
            sf.padding.padding(sf.data.as_mut());

            let (mut itr, mut s) = (sf.data.chunks_exact(N), 0);
            for chunk in &mut itr {
                let block = to_arr(chunk)?;
                let d = sf.cipher.encrypt_block(&block);
                outdata.write_all(d.as_slice()).map_err(CipherError::from)?;
                s += N;
            }

            let len = itr.remainder().len();
            sf.data.clear();
            if len > 0 {
                Err(CipherError::InvalidBlockSize {
                    target: N,
                    real: len,
                })
            } else {
                Ok(s)
            }
        });

        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::super::cbc::tests::from_hex;
    use super::AES128Ecb;
    use crate::block_cipher::AES128;
    use crate::cipher_mode::{EmptyPadding, Pkcs7Padding};
    use crate::{Encrypt, StreamEncrypt};
    use std::cell::RefCell;
    use std::io::Write;

    #[test]
    fn ecb_aes_nist_vector() {
        // NIST SP 800-38A F.1.1
        let key = from_hex("2b7e151628aed2a6abf7158809cf4f3c");
        let pt = from_hex("6bc1bee22e409f96e93d7e117393172a");
        let ct = from_hex("3ad77bb40d7a3660a89ecaf32466ef97");

        let ecb: RefCell<AES128Ecb<EmptyPadding>> =
            AES128Ecb::new(AES128::from_slice(key.as_slice()).unwrap()).into();
        let mut out = vec![];
        ecb.encrypt(pt.as_slice(), &mut out).unwrap();
        assert_eq!(out, ct);
    }

    #[test]
    fn ecb_pkcs7_aligned_input_appends_padding_block() {
        // 填充块与数据块同为16个0x10, 密文两块必然相同
        let key = from_hex("000102030405060708090a0b0c0d0e0f");
        let pt = [0x10u8; 16];

        let ecb: RefCell<AES128Ecb<Pkcs7Padding>> =
            AES128Ecb::new(AES128::from_slice(key.as_slice()).unwrap()).into();
        let mut out = vec![];
        ecb.encrypt(&pt, &mut out).unwrap();
        assert_eq!(out.len(), 32);
        assert_eq!(out[..16], out[16..]);
        assert_eq!(
            out[..16],
            from_hex("954f64f2e4e86e9eee82d20216684899")[..]
        );
    }

    #[test]
    fn ecb_reference_vector_with_padding() {
        let key = from_hex("2b28ab097eaef7cf15d2154f16a6883c");
        let pt = from_hex("328831e0435a3137f6309807a88da234");

        let ecb: RefCell<AES128Ecb<Pkcs7Padding>> =
            AES128Ecb::new(AES128::from_slice(key.as_slice()).unwrap()).into();
        let mut out = vec![];
        ecb.encrypt(pt.as_slice(), &mut out).unwrap();
        assert_eq!(out.len(), 32);
        assert_eq!(out[..16], from_hex("5716aafa2cc68b9b8b9be50d30e3f206")[..]);
        assert_eq!(out[16..], from_hex("f885d11c6aa64615828be2928a4a0e7e")[..]);
    }

    #[test]
    fn sink_failure_aborts_encryption() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "sink full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut ecb: AES128Ecb<Pkcs7Padding> = AES128Ecb::new(AES128::new([0u8; 16]));
        let mut data = &[0u8; 32][..];
        let r = ecb.stream_encrypt(&mut data, &mut FailingSink);
        assert!(r.is_err());
    }
}
