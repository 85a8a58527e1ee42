//! Read 32-bit words from a mesh-accelerator core or external memory.
//!
//! `e-read` targets either one core's local memory, named by a
//! `(row, col)` coordinate pair, or the shared external-memory region,
//! selected by a negative row. It issues one blocking word read per
//! requested word and prints each as a formatted line.

pub mod cli;
pub mod driver;
pub mod output;

/// External-memory window requested on the external path: 32 MiB at offset 0.
pub const EMEM_WINDOW_SIZE: u64 = 0x0200_0000;
