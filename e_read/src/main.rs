use std::io;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;

use e_read::cli::{self, Args};
use e_read::driver::{self, Outcome};
use ehal::Hal;

fn main() -> Result<()> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(_) => usage_exit(),
    };
    let inv = match cli::interpret(&args) {
        Ok(inv) => inv,
        Err(_) => usage_exit(),
    };

    let hal = Hal::init().context("platform initialization failed")?;
    let outcome = driver::run(&inv, &hal, &mut io::stdout().lock());
    hal.finalize().context("platform finalization failed")?;

    match outcome? {
        Outcome::Done => Ok(()),
        Outcome::OutOfBounds => exit(1),
    }
}

fn usage_exit() -> ! {
    print!("{}", cli::USAGE);
    exit(1)
}
