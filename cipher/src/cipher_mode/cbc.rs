//! ## The Cipher Block Chaining Mode(CBC)
//!
//! 给定初始向量IV, IV可以不保密, 但是**它必须是不可预测的(unpredictable)**. <br>
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//! $$
//!
//! 加密每个明文块依赖前一个密文输出, 故Encrypt无法并行. <br>

use crate::block_cipher::AES128;
use crate::cipher_mode::BlockPadding;
use crate::{BlockEncrypt, CipherError, StreamCipherFinish, StreamEncrypt};
use std::io::{Read, Write};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// Cipher Block Chaining Mode(CBC) <br>
///
/// 链接值随加密逐块演进: 同一实例再次调用`stream_encrypt`会从当前链接值继续,
/// 独立的加密流需使用独立实例, 或调用`self.set_iv`显式重置为新的`IV`.
pub struct CBC<P, E, const BLOCK_SIZE: usize> {
    //缓存输入数据
    data: Vec<u8>,
    /// 初始化向量, 亦即当前链接值
    iv: Option<[u8; BLOCK_SIZE]>,
    cipher: E,
    padding: P,
}

pub type AES128Cbc<P> = CBC<P, AES128, 16>;

impl<P, E, const N: usize> CBC<P, E, N> {
    fn check_iv(&self) -> Result<(), CipherError> {
        if self.iv.is_none() {
            Err(CipherError::NotSetInitialVec)
        } else {
            Ok(())
        }
    }
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    P: BlockPadding,
{
    pub fn new(cipher: E, iv: [u8; N]) -> Self {
        Self {
            data: Vec::with_capacity(N),
            iv: Some(iv),
            cipher,
            padding: P::new(N),
        }
    }

    pub fn set_padding(&mut self, padding: P) {
        self.padding = padding;
    }

    /// 重置链接值
    pub fn set_iv(&mut self, iv: [u8; N]) {
        self.iv = Some(iv);
    }
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    E: BlockEncrypt<N>,
    P: BlockPadding,
{
    fn encrypt_inner(cipher: &E, iv: &mut [u8; N], block: &[u8; N]) -> [u8; N] {
        iv.iter_mut().zip(block.iter()).for_each(|(a, b)| *a ^= b);
        let d = cipher.encrypt_block(&*iv);
        iv.copy_from_slice(d.as_slice());
        d
    }
}

#[cfg(feature = "sec-zeroize")]
impl<P, E, const N: usize> Zeroize for CBC<P, E, N>
where
    E: Zeroize,
{
    fn zeroize(&mut self) {
        self.cipher.zeroize();
        self.iv.zeroize();
        self.data.zeroize();
    }
}

impl<P, E, const N: usize> StreamEncrypt for CBC<P, E, N>
where
    E: BlockEncrypt<N>,
    P: BlockPadding,
{
    fn stream_encrypt<'a, R: Read, W: Write>(
        &'a mut self,
        in_data: &'a mut R,
        out_data: &mut W,
    ) -> Result<StreamCipherFinish<'a, Self, R, W>, CipherError> {
        self.check_iv()?;

        let (mut buf, mut out_len) = (Vec::with_capacity(2048), 0);
        buf.extend(self.data.iter());
        self.data.clear();
        let in_len = in_data.read_to_end(&mut buf).map_err(CipherError::from)?;

        let mut itr = buf.chunks_exact(N);
        for chunk in &mut itr {
            let block = to_arr(chunk)?;
            let d = Self::encrypt_inner(&self.cipher, self.iv.as_mut().unwrap(), &block);
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
                let d = Self::encrypt_inner(&sf.cipher, sf.iv.as_mut().unwrap(), &block);
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

pub(super) fn to_arr<const N: usize>(chunk: &[u8]) -> Result<[u8; N], CipherError> {
    match <[u8; N]>::try_from(chunk) {
        Ok(block) => Ok(block),
        Err(_) => Err(CipherError::InvalidBlockSize {
            target: N,
            real: chunk.len(),
        }),
    }
}

#[cfg(test)]
pub(in crate::cipher_mode) mod tests {
    use super::{AES128Cbc, StreamEncrypt};
    use crate::block_cipher::AES128;
    use crate::cipher_mode::{EmptyPadding, Pkcs7Padding};
    use crate::{BlockEncrypt, CipherError, Encrypt};
    use num_bigint::BigUint;
    use num_traits::Num;
    use std::cell::RefCell;
    use std::io::Write;

    pub(in crate::cipher_mode) fn from_hex(s: &str) -> Vec<u8> {
        let mut v = BigUint::from_str_radix(s, 16).unwrap().to_bytes_be();
        let l = s.len() / 2;
        while v.len() < l {
            v.insert(0, 0);
        }
        v
    }

    /// (key, iv, plaintext, ciphertext), NIST SP 800-38A F.2.1
    fn cases() -> Vec<(Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>)> {
        let cases = [
            (
                "2b7e151628aed2a6abf7158809cf4f3c",
                "000102030405060708090a0b0c0d0e0f",
                "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710",
                "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b273bed6b8e3c1743b7116e69e222295163ff1caa1681fac09120eca307586e1a7",
            ),
        ];

        cases
            .into_iter()
            .map(|(key, iv, pt, ct)| (from_hex(key), from_hex(iv), from_hex(pt), from_hex(ct)))
            .collect()
    }

    #[test]
    fn cbc_aes_empty_padding() {
        for (i, (key, iv, pt, ct)) in cases().into_iter().enumerate() {
            let iv: [u8; 16] = iv.try_into().unwrap();
            let mut cbc =
                AES128Cbc::<EmptyPadding>::new(AES128::from_slice(key.as_slice()).unwrap(), iv);

            let mut data = pt.as_slice();
            let mut buf = vec![];
            let (in_len, out_len) = cbc
                .stream_encrypt(&mut data, &mut buf)
                .unwrap()
                .finish(&mut buf)
                .unwrap();
            assert_eq!(in_len, out_len, "case {i} stream encrypt failed");
            assert_eq!(buf, ct, "case {i} stream encrypt failed");

            let cbc: RefCell<_> = cbc.into();
            buf.clear();
            cbc.borrow_mut().set_iv(iv);
            cbc.encrypt(pt.as_slice(), &mut buf).unwrap();
            assert_eq!(buf, ct, "case {i} one-shot encrypt failed");
        }
    }

    #[test]
    fn cbc_aes_pkcs7_padding_length() {
        for (key, iv, pt, ct) in cases() {
            let iv: [u8; 16] = iv.try_into().unwrap();
            let aes = AES128::from_slice(key.as_slice()).unwrap();
            let cbc: RefCell<_> = AES128Cbc::<Pkcs7Padding>::new(aes, iv).into();

            let mut out = vec![];
            cbc.encrypt(pt.as_slice(), &mut out).unwrap();
            // 对齐的输入多出一整块填充
            assert_eq!(out.len(), ct.len() + 16);
            assert_eq!(&out[..ct.len()], ct);
        }
    }

    #[test]
    fn chaining_matches_manual_decomposition() {
        // block1 = E(IV ^ P1), block2 = E(block1 ^ P2)
        let key = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let iv = key;
        let p = [0x10u8; 16];

        let aes = AES128::new(key);
        let mut b1 = [0u8; 16];
        for (x, (a, b)) in b1.iter_mut().zip(iv.iter().zip(p.iter())) {
            *x = a ^ b;
        }
        let c1 = aes.encrypt_block(&b1);
        let mut b2 = [0u8; 16];
        for (x, (a, b)) in b2.iter_mut().zip(c1.iter().zip(p.iter())) {
            *x = a ^ b;
        }
        let c2 = aes.encrypt_block(&b2);

        let mut cbc = AES128Cbc::<EmptyPadding>::new(AES128::new(key), iv);
        let mut data = &[0x10u8; 32][..];
        let mut out = vec![];
        cbc.stream_encrypt(&mut data, &mut out)
            .unwrap()
            .finish(&mut out)
            .unwrap();
        assert_eq!(&out[..16], &c1);
        assert_eq!(&out[16..], &c2);
    }

    #[test]
    fn rerun_continues_from_held_chaining_value() {
        let key = [0x5a; 16];
        let iv = [0xa5; 16];
        let pt = [0x33u8; 64];

        let mut whole = AES128Cbc::<EmptyPadding>::new(AES128::new(key), iv);
        let mut data = &pt[..];
        let mut expected = vec![];
        whole
            .stream_encrypt(&mut data, &mut expected)
            .unwrap()
            .finish(&mut expected)
            .unwrap();

        // 两段输入接力, 链接值跨调用保持
        let mut split = AES128Cbc::<EmptyPadding>::new(AES128::new(key), iv);
        let mut out = vec![];
        let (mut head, mut tail) = (&pt[..32], &pt[32..]);
        split
            .stream_encrypt(&mut head, &mut out)
            .unwrap()
            .finish(&mut out)
            .unwrap();
        split
            .stream_encrypt(&mut tail, &mut out)
            .unwrap()
            .finish(&mut out)
            .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn sink_failure_aborts_and_iv_reset_recovers() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "sink full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let (key, iv) = ([0x5au8; 16], [0xa5u8; 16]);
        let mut cbc = AES128Cbc::<EmptyPadding>::new(AES128::new(key), iv);
        let mut data = &[0x33u8; 32][..];
        let r = cbc.stream_encrypt(&mut data, &mut FailingSink);
        assert!(matches!(r.err(), Some(CipherError::Io(_))));

        // 中止时链接值可能已前进, 重置IV后结果应与全新实例一致
        cbc.set_iv(iv);
        let (mut out, mut data) = (vec![], &[0x33u8; 32][..]);
        cbc.stream_encrypt(&mut data, &mut out)
            .unwrap()
            .finish(&mut out)
            .unwrap();

        let mut fresh = AES128Cbc::<EmptyPadding>::new(AES128::new(key), iv);
        let (mut expected, mut data) = (vec![], &[0x33u8; 32][..]);
        fresh
            .stream_encrypt(&mut data, &mut expected)
            .unwrap()
            .finish(&mut expected)
            .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_padding_rejects_misaligned_tail() {
        let mut cbc = AES128Cbc::<EmptyPadding>::new(AES128::new([0u8; 16]), [0u8; 16]);
        let mut data = &[0u8; 20][..];
        let mut out = vec![];
        let r = cbc
            .stream_encrypt(&mut data, &mut out)
            .unwrap()
            .finish(&mut out);
        assert!(r.is_err());
    }
}
