//! The read-and-print sequence against an initialized platform.

use std::io::Write;

use anyhow::{Context, Result};
use log::info;

use ehal::{Hal, HalError};

use crate::EMEM_WINDOW_SIZE;
use crate::cli::{Invocation, TargetSpec};
use crate::output;

/// Message printed when core coordinates fail the bounds check.
pub const BOUNDS_MSG: &str = "Core coordinates exceed platform boundaries!";

/// How a run ended, short of a hard error.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// All requested words were read and printed.
    Done,
    /// Core coordinates were outside the platform grid; nothing was read.
    /// The caller still finalizes the session, then exits 1.
    OutOfBounds,
}

/// Perform the read-and-print sequence for `inv`, writing lines to `out`.
///
/// The session handle (core context or external window) is opened here and
/// released before returning; `hal` itself stays open for the caller to
/// finalize.
pub fn run(inv: &Invocation, hal: &Hal, out: &mut dyn Write) -> Result<Outcome> {
    match inv.target {
        TargetSpec::Core { row, col } => {
            let plat = hal.platform_info();
            if row >= plat.rows || col >= plat.cols || col < 0 {
                writeln!(out, "{BOUNDS_MSG}")?;
                return Ok(Outcome::OutOfBounds);
            }
            let core = hal
                .open_core(row, col)
                .with_context(|| format!("failed to open core ({row},{col})"))?;
            // release the context even when a read fails mid-loop
            let result = read_loop(inv, out, |addr| core.read_word(addr));
            let closed = core
                .close()
                .with_context(|| format!("failed to close core ({row},{col})"));
            result.and(closed)?;
        }
        TargetSpec::External => {
            let window = hal
                .alloc(0, EMEM_WINDOW_SIZE)
                .context("failed to allocate external memory window")?;
            let result = read_loop(inv, out, |addr| window.read_word(addr));
            let freed = window
                .free()
                .context("failed to free external memory window");
            result.and(freed)?;
        }
    }
    Ok(Outcome::Done)
}

/// Issue one word read per requested word, printing and stepping by 4 bytes.
fn read_loop(
    inv: &Invocation,
    out: &mut dyn Write,
    mut read_word: impl FnMut(u32) -> Result<u32, HalError>,
) -> Result<()> {
    if inv.opts.verbose {
        writeln!(out, "{}", output::context_line(inv.target, inv.addr))?;
    }
    info!(
        "reading {} word(s) starting at 0x{:08x}",
        inv.num_words, inv.addr
    );
    let mut addr = inv.addr;
    for _ in 0..inv.num_words {
        let value = read_word(addr)
            .with_context(|| format!("read transaction at 0x{addr:08x} failed"))?;
        writeln!(out, "{}", output::value_line(inv.opts.raw, addr, value))?;
        addr += 4;
    }
    Ok(())
}
