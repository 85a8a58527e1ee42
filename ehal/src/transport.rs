//! The transport seam between the session API and a concrete device.

use crate::error::HalError;
use crate::platform::PlatformInfo;

/// A device transport: topology, context lifecycle, and read transactions.
///
/// The session layer ([`crate::Hal`]) performs all bookkeeping through this
/// trait, so tests can substitute a recording implementation for the
/// file-backed simulator.
pub trait Transport {
    /// Platform topology, queried once per session.
    fn info(&self) -> PlatformInfo;

    /// Open a 1x1 core context at `(row, col)`.
    fn open_core(&self, row: i32, col: i32) -> Result<(), HalError>;

    /// Close a previously opened core context.
    fn close_core(&self, row: i32, col: i32) -> Result<(), HalError>;

    /// Allocate an external-memory window of `size` bytes at `offset`.
    fn alloc(&self, offset: u64, size: u64) -> Result<(), HalError>;

    /// Free a previously allocated external-memory window.
    fn free(&self, offset: u64) -> Result<(), HalError>;

    /// Read `buf.len()` bytes from a core's local memory at `addr`.
    fn core_read(&self, row: i32, col: i32, addr: u32, buf: &mut [u8]) -> Result<(), HalError>;

    /// Read `buf.len()` bytes at `addr` within the window based at `offset`.
    fn emem_read(&self, offset: u64, addr: u32, buf: &mut [u8]) -> Result<(), HalError>;
}
