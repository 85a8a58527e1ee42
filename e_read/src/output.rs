//! Formatting of read values and the verbose context line.

use crate::cli::TargetSpec;

/// One-time context line printed before the read loop in verbose mode.
/// `addr` is the post-alignment base address.
pub fn context_line(target: TargetSpec, addr: u32) -> String {
    match target {
        TargetSpec::External => {
            format!("Reading from external memory buffer at offset 0x{addr:x}.")
        }
        TargetSpec::Core { row, col } => {
            format!("Reading from core ({row},{col}) at offset 0x{addr:x}.")
        }
    }
}

/// One line per word read: bare value in raw mode, address-prefixed otherwise.
pub fn value_line(raw: bool, addr: u32, value: u32) -> String {
    if raw {
        format!("0x{value:08x}")
    } else {
        format!("[0x{addr:08x}] = 0x{value:08x}")
    }
}
