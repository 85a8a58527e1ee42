//! Hardware-access layer for a 2D mesh accelerator.
//!
//! The accelerator is a grid of cores, each with a small local memory,
//! plus a shared external-memory region. This crate exposes the session
//! surface a host tool needs:
//!
//! - platform initialization/finalization and a topology query
//! - open/close of a 1x1 core context
//! - allocate/free of an external-memory window
//! - blocking read transactions against either target
//!
//! The concrete device sits behind the [`Transport`] trait. The default
//! transport is a file-backed simulator ([`SimTransport`]) configured through
//! the environment:
//!
//! - `EHAL_DEVICE`: directory of device images (`core-<row>-<col>.mem` per
//!   core, `emem.mem` for the external region)
//! - `EHAL_PLATFORM`: grid extent as `ROWSxCOLS` (default `4x4`)
//!
//! Reads past the end of an image yield zeros; reads crossing an address
//! space bound fail with [`HalError::AddressOutOfRange`].

mod error;
mod platform;
mod session;
mod sim;
mod transport;

pub use error::HalError;
pub use platform::{DEVICE_ENV, HalConfig, PLATFORM_ENV, PlatformInfo, parse_extent};
pub use session::{CoreHandle, ExternalBuffer, Hal};
pub use sim::SimTransport;
pub use transport::Transport;

/// Local memory address space of a single core: 32 KiB.
pub const CORE_MEM_SIZE: u32 = 0x8000;

/// Size of the shared external-memory region: 32 MiB.
pub const EMEM_REGION_SIZE: u64 = 0x0200_0000;
