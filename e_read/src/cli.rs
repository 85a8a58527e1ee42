//! Command-line argument parsing.
//!
//! The grammar is positional after the optional mode flag:
//!
//! ```text
//! e-read [-v|-r] <row> [<col>] <address> [<num-words>]
//! ```
//!
//! A negative row selects the external-memory path, in which case the
//! column token is omitted. Clap captures the flags and the raw positional
//! tokens; [`interpret`] turns the tokens into an [`Invocation`].

use clap::Parser;

/// Usage text printed on malformed invocations.
pub const USAGE: &str = "\
Usage: e-read [-v|-r] <row> [<col>] <address> [<num-words>]
   row            - target core row coordinate, or (-1) for ext. memory.
   col            - target core column coordinate. If row is (-1) skip this parameter.
   address        - base address of destination array of words (32-bit hex)
   num-words      - number of data words to read from destination. If only one
                    word is required, this parameter may be omitted.
   -v             - verbose mode. Print more information.
   -r             - raw mode. Print only the memory contents.
";

#[derive(Parser, Debug)]
#[command(name = "e-read")]
pub struct Args {
    /// Verbose mode. Print more information.
    #[arg(short = 'v', conflicts_with = "raw")]
    pub verbose: bool,

    /// Raw mode. Print only the memory contents.
    #[arg(short = 'r')]
    pub raw: bool,

    /// Positional tokens: row, optional col, address, optional word count.
    #[arg(
        required = true,
        allow_negative_numbers = true,
        value_name = "ROW [COL] ADDRESS [NUM-WORDS]"
    )]
    pub tokens: Vec<String>,
}

/// Output options: at most one of the two is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintOpts {
    pub verbose: bool,
    pub raw: bool,
}

/// Read target, before any bounds check against the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSpec {
    /// One core's local memory.
    Core { row: i32, col: i32 },
    /// The shared external-memory region.
    External,
}

/// A fully parsed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub opts: PrintOpts,
    pub target: TargetSpec,
    /// Base address, already masked to 4-byte alignment.
    pub addr: u32,
    pub num_words: u32,
}

/// Grammar violations; all of them print [`USAGE`] and exit 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("missing required arguments")]
    MissingArgs,
    #[error("malformed decimal value '{0}'")]
    BadDecimal(String),
    #[error("malformed hex address '{0}'")]
    BadAddress(String),
}

/// Interpret the captured positional tokens.
pub fn interpret(args: &Args) -> Result<Invocation, UsageError> {
    let mut tokens = args.tokens.iter();
    let mut next = || tokens.next().ok_or(UsageError::MissingArgs);

    let row = parse_decimal(next()?)?;
    let target = if row < 0 {
        TargetSpec::External
    } else {
        let col = parse_decimal(next()?)?;
        TargetSpec::Core { row, col }
    };
    let addr = parse_address(next()?)? & !3;
    // first token past the address is the count; anything after it is ignored
    let num_words = match tokens.next() {
        Some(token) => parse_count(token)?,
        None => 1,
    };

    Ok(Invocation {
        opts: PrintOpts {
            verbose: args.verbose,
            raw: args.raw,
        },
        target,
        addr,
        num_words,
    })
}

fn parse_decimal(token: &str) -> Result<i32, UsageError> {
    token
        .parse()
        .map_err(|_| UsageError::BadDecimal(token.to_string()))
}

/// The count is signed; a negative count reads nothing.
fn parse_count(token: &str) -> Result<u32, UsageError> {
    let count: i32 = token
        .parse()
        .map_err(|_| UsageError::BadDecimal(token.to_string()))?;
    Ok(count.max(0) as u32)
}

fn parse_address(token: &str) -> Result<u32, UsageError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).map_err(|_| UsageError::BadAddress(token.to_string()))
}
