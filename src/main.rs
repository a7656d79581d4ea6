use clap::Command;
use log::LevelFilter;

mod cmd;
use cmd::{Cmd, CryptoCmd};

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let app = Command::new("rijndael")
        .version(env!("CARGO_PKG_VERSION"))
        .about("AES-128 encryption built from GF(2^8) first principles")
        .subcommand(CryptoCmd::cmd())
        .get_matches();

    if let Some((s, m)) = app.subcommand() {
        match s {
            CryptoCmd::NAME => CryptoCmd::new().run(m),
            name => {
                panic!("unsupport for {}", name)
            }
        }
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
}
