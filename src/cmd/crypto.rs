use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use cipher::cipher_mode::{AES128Cbc, AES128Ecb, Pkcs7Padding};
use cipher::{StreamEncrypt, AES128};
use clap::{Arg, ArgMatches, Command};

use super::Cmd;

/// `crypto <ecb|cbc> --key HEX [--iv HEX] [-i FILE] [-o FILE]`
///
/// 输入缺省为stdin, 输出缺省为stdout(十六进制).
pub struct CryptoCmd;

impl CryptoCmd {
    pub fn new() -> Self {
        Self
    }

    fn common_args(cmd: Command) -> Command {
        cmd.arg(
            Arg::new("key")
                .long("key")
                .short('k')
                .value_name("HEX")
                .required(true)
                .help("the 16-byte encryption key, hex encoded"),
        )
        .arg(
            Arg::new("ifile")
                .long("ifile")
                .short('i')
                .value_name("PATH")
                .help("the input file path, stdin by default"),
        )
        .arg(
            Arg::new("ofile")
                .long("ofile")
                .short('o')
                .value_name("PATH")
                .help("the output file path, hex to stdout by default"),
        )
    }

    fn exe(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let (mode, m) = m
            .subcommand()
            .ok_or_else(|| anyhow!("the mode `ecb` or `cbc` need to specified"))?;

        let key = hex::decode(
            m.get_one::<String>("key")
                .ok_or_else(|| anyhow!("the key need to specified"))?,
        )
        .context("invalid hex key")?;
        let aes = AES128::from_slice(key.as_slice())?;

        let mut reader: Box<dyn Read> = match m.get_one::<String>("ifile") {
            Some(p) => {
                let p = PathBuf::from(p);
                Box::new(File::open(&p).with_context(|| format!("open `{}`", p.display()))?)
            }
            None => Box::new(std::io::stdin().lock()),
        };

        let mut out = Vec::with_capacity(1024);
        let (in_len, out_len) = match mode {
            "cbc" => {
                let iv = hex::decode(
                    m.get_one::<String>("iv")
                        .ok_or_else(|| anyhow!("the iv need to specified"))?,
                )
                .context("invalid hex iv")?;
                let iv: [u8; 16] = iv
                    .try_into()
                    .map_err(|_| anyhow!("the iv must be 16 bytes"))?;

                let mut cbc = AES128Cbc::<Pkcs7Padding>::new(aes, iv);
                let lens = cbc.stream_encrypt(&mut reader, &mut out)?.finish(&mut out)?;
                lens
            }
            "ecb" => {
                let mut ecb = AES128Ecb::<Pkcs7Padding>::new(aes);
                let lens = ecb.stream_encrypt(&mut reader, &mut out)?.finish(&mut out)?;
                lens
            }
            name => anyhow::bail!("unsupport mode `{name}`"),
        };
        log::info!("{in_len} bytes in, {out_len} bytes out");

        match m.get_one::<String>("ofile") {
            Some(p) => {
                let p = PathBuf::from(p);
                let mut f =
                    File::create(&p).with_context(|| format!("create `{}`", p.display()))?;
                f.write_all(out.as_slice())?;
            }
            None => println!("{}", hex::encode(out)),
        }

        Ok(())
    }
}

impl Cmd for CryptoCmd {
    const NAME: &'static str = "crypto";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("AES-128 encryption(stdin | file)")
            .subcommand(Self::common_args(
                Command::new("ecb").about("electronic codebook mode, PKCS#7 padding"),
            ))
            .subcommand(
                Self::common_args(
                    Command::new("cbc").about("cipher block chaining mode, PKCS#7 padding"),
                )
                .arg(
                    Arg::new("iv")
                        .long("iv")
                        .value_name("HEX")
                        .required(true)
                        .help("the 16-byte initial vector, hex encoded"),
                ),
            )
    }

    fn run(&self, m: &ArgMatches) {
        if let Err(e) = self.exe(m) {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
