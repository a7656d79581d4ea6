use super::{Block, RoundKeys, AES128};
use crate::{BlockEncrypt, CipherError, Encrypt};

// FIPS 197 Appendix C.1
const FIPS_KEY: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];
const FIPS_PLAIN: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];
const FIPS_CIPHER: [u8; 16] = [
    0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5, 0x5a,
];

#[test]
fn key_expansion_golden_word() {
    // FIPS 197 A.1: 密钥2b7e1516...的w[4] = a0fafe17
    let key = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];
    let keys = RoundKeys::expand(&key);
    assert_eq!(
        keys.get(1).unwrap().word(0).unwrap().to_bytes(),
        [0xa0, 0xfa, 0xfe, 0x17]
    );
    // w[43], 最后一个派生字
    assert_eq!(
        keys.get(10).unwrap().word(3).unwrap().to_bytes(),
        [0xb6, 0x63, 0x0c, 0xa6]
    );
}

#[test]
fn key_expansion_round_keys() {
    // FIPS 197 C.1的轮密钥
    let keys = RoundKeys::expand(&FIPS_KEY);
    assert_eq!(keys.get(0).unwrap().as_bytes(), &FIPS_KEY);
    assert_eq!(
        keys.get(1).unwrap().as_bytes(),
        &[
            0xd6, 0xaa, 0x74, 0xfd, 0xd2, 0xaf, 0x72, 0xfa, 0xda, 0xa6, 0x78, 0xf1, 0xd6, 0xab,
            0x76, 0xfe
        ]
    );
    assert_eq!(
        keys.get(10).unwrap().as_bytes(),
        &[
            0x13, 0x11, 0x1d, 0x7f, 0xe3, 0x94, 0x4a, 0x17, 0xf3, 0x07, 0xa7, 0x8b, 0x4d, 0x2b,
            0x30, 0xc5
        ]
    );
    assert!(matches!(
        keys.get(11),
        Err(CipherError::InvalidIndex {
            index: 11,
            bound: 11
        })
    ));
}

#[test]
fn round_keys_from_slice_checks_count() {
    let keys = RoundKeys::expand(&FIPS_KEY);
    let blocks = (0..=10)
        .map(|i| *keys.get(i).unwrap())
        .collect::<Vec<Block>>();
    assert_eq!(RoundKeys::try_from(blocks.as_slice()).unwrap(), keys);
    assert!(matches!(
        RoundKeys::try_from(&blocks[..10]),
        Err(CipherError::InvalidRoundKeyCount {
            target: 11,
            real: 10
        })
    ));
}

#[test]
fn encrypt_matches_fips_vector() {
    let aes = AES128::new(FIPS_KEY);
    assert_eq!(aes.encrypt_block(&FIPS_PLAIN), FIPS_CIPHER);
}

#[test]
fn encrypt_reference_vector() {
    // 与独立的标准AES实现核对的参考值, ECB单分组
    let aes = AES128::from_slice(&[
        0x2b, 0x28, 0xab, 0x09, 0x7e, 0xae, 0xf7, 0xcf, 0x15, 0xd2, 0x15, 0x4f, 0x16, 0xa6, 0x88,
        0x3c,
    ])
    .unwrap();
    let plaintext = [
        0x32, 0x88, 0x31, 0xe0, 0x43, 0x5a, 0x31, 0x37, 0xf6, 0x30, 0x98, 0x07, 0xa8, 0x8d, 0xa2,
        0x34,
    ];
    assert_eq!(
        aes.encrypt_block(&plaintext),
        [
            0x57, 0x16, 0xaa, 0xfa, 0x2c, 0xc6, 0x8b, 0x9b, 0x8b, 0x9b, 0xe5, 0x0d, 0x30, 0xe3,
            0xf2, 0x06
        ]
    );
}

#[test]
fn rekey_rebuilds_schedule() {
    let mut aes = AES128::new([0u8; 16]);
    let before = aes.encrypt_block(&FIPS_PLAIN);
    aes.rekey(FIPS_KEY);
    assert_eq!(aes.encrypt_block(&FIPS_PLAIN), FIPS_CIPHER);
    assert_ne!(aes.encrypt_block(&FIPS_PLAIN), before);
}

#[test]
fn from_slice_checks_key_size() {
    assert!(matches!(
        AES128::from_slice(&[0u8; 15]),
        Err(CipherError::InvalidKeySize {
            target: 16,
            real: 15
        })
    ));
}

#[test]
fn trace_observer_sees_all_rounds_without_affecting_output() {
    let aes = AES128::new(FIPS_KEY);
    let mut rounds = Vec::new();
    let mut last_state = [0u8; 16];
    let out = aes.encrypt_block_traced(&FIPS_PLAIN, |round, state| {
        rounds.push(round);
        last_state = *state;
    });
    assert_eq!(out, FIPS_CIPHER);
    assert_eq!(rounds, (0..=10).collect::<Vec<usize>>());
    assert_eq!(last_state, out);
}

#[test]
fn encrypt_trait_checks_block_size() {
    let aes = AES128::new(FIPS_KEY);
    let mut out = Vec::new();
    aes.encrypt(&FIPS_PLAIN, &mut out).unwrap();
    assert_eq!(out, FIPS_CIPHER);

    assert!(matches!(
        aes.encrypt(&FIPS_PLAIN[..7], &mut out),
        Err(CipherError::InvalidBlockSize { target: 16, real: 7 })
    ));
}

#[test]
fn encrypt_decrypt_tables_standalone() {
    // 解密流水线不在范围内, 逆向S盒仅独立验证
    let sbox = crate::galois::SBox::tables();
    for x in 0..=255u8 {
        assert_eq!(sbox.inverse(sbox.forward(x)), x);
    }
}
