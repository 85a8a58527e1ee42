//! Error types for hardware-access operations.

use std::path::PathBuf;

/// Error type for HAL session and transport operations.
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    /// No device directory is configured in the environment.
    #[error("no device configured: set EHAL_DEVICE to the device directory")]
    DeviceNotConfigured,
    /// The configured device directory does not exist.
    #[error("device directory '{}' does not exist", .0.display())]
    DeviceMissing(PathBuf),
    /// The platform extent specification is malformed.
    #[error("malformed platform spec '{0}', expected ROWSxCOLS")]
    BadPlatformSpec(String),
    /// Core coordinates fall outside the platform grid.
    #[error("core ({row},{col}) is outside the {rows}x{cols} platform grid")]
    CoordsOutOfRange {
        row: i32,
        col: i32,
        rows: i32,
        cols: i32,
    },
    /// A read crosses the end of the target address space.
    #[error("read of {len} bytes at 0x{addr:08x} crosses the end of the address space")]
    AddressOutOfRange { addr: u32, len: usize },
    /// An allocation extends past the external memory region.
    #[error("allocation of 0x{size:x} bytes at offset 0x{offset:x} exceeds the external region")]
    WindowExhausted { offset: u64, size: u64 },
    /// An underlying I/O operation failed.
    #[error("device I/O failed")]
    Io(#[from] std::io::Error),
}
