//! HAL session and the handles it hands out.

use log::info;

use crate::error::HalError;
use crate::platform::{HalConfig, PlatformInfo};
use crate::sim::SimTransport;
use crate::transport::Transport;

/// A hardware-access session.
///
/// `init` opens the simulated device described by the environment; tests
/// inject their own [`Transport`] through `with_transport`. Handles borrow
/// the session, so every context is released before [`Hal::finalize`] can
/// consume it.
pub struct Hal {
    transport: Box<dyn Transport>,
    info: PlatformInfo,
}

impl Hal {
    /// Initialize the platform from the environment.
    pub fn init() -> Result<Self, HalError> {
        let config = HalConfig::from_env()?;
        let transport = SimTransport::new(config)?;
        Ok(Self::with_transport(Box::new(transport)))
    }

    /// Build a session over an arbitrary transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        let info = transport.info();
        info!("platform initialized, grid {}x{}", info.rows, info.cols);
        Self { transport, info }
    }

    /// Grid extent queried at session start.
    pub fn platform_info(&self) -> PlatformInfo {
        self.info
    }

    /// Open a 1x1 core context at `(row, col)`.
    pub fn open_core(&self, row: i32, col: i32) -> Result<CoreHandle<'_>, HalError> {
        self.transport.open_core(row, col)?;
        info!("opened core ({row},{col})");
        Ok(CoreHandle {
            hal: self,
            row,
            col,
        })
    }

    /// Allocate an external-memory window of `size` bytes at `offset`.
    pub fn alloc(&self, offset: u64, size: u64) -> Result<ExternalBuffer<'_>, HalError> {
        self.transport.alloc(offset, size)?;
        info!("allocated external window of 0x{size:x} bytes at offset 0x{offset:x}");
        Ok(ExternalBuffer {
            hal: self,
            offset,
            size,
        })
    }

    /// Tear the session down.
    pub fn finalize(self) -> Result<(), HalError> {
        info!("platform finalized");
        Ok(())
    }
}

/// An open 1x1 core context.
pub struct CoreHandle<'a> {
    hal: &'a Hal,
    row: i32,
    col: i32,
}

impl CoreHandle<'_> {
    /// Read `buf.len()` bytes from the core's local memory at `addr`.
    pub fn read(&self, addr: u32, buf: &mut [u8]) -> Result<(), HalError> {
        self.hal.transport.core_read(self.row, self.col, addr, buf)
    }

    /// Read one little-endian 32-bit word at `addr`.
    pub fn read_word(&self, addr: u32) -> Result<u32, HalError> {
        let mut buf = [0u8; 4];
        self.read(addr, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Close the context.
    pub fn close(self) -> Result<(), HalError> {
        self.hal.transport.close_core(self.row, self.col)
    }
}

/// An allocated external-memory window.
pub struct ExternalBuffer<'a> {
    hal: &'a Hal,
    offset: u64,
    size: u64,
}

impl ExternalBuffer<'_> {
    /// Read `buf.len()` bytes at `addr` within the window.
    pub fn read(&self, addr: u32, buf: &mut [u8]) -> Result<(), HalError> {
        if addr as u64 + buf.len() as u64 > self.size {
            return Err(HalError::AddressOutOfRange {
                addr,
                len: buf.len(),
            });
        }
        self.hal.transport.emem_read(self.offset, addr, buf)
    }

    /// Read one little-endian 32-bit word at `addr`.
    pub fn read_word(&self, addr: u32) -> Result<u32, HalError> {
        let mut buf = [0u8; 4];
        self.read(addr, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Free the window.
    pub fn free(self) -> Result<(), HalError> {
        self.hal.transport.free(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Open(i32, i32),
        Close(i32, i32),
        Alloc(u64, u64),
        Free(u64),
        CoreRead(i32, i32, u32, usize),
        EmemRead(u64, u32, usize),
    }

    type EventLog = Rc<RefCell<Vec<Event>>>;

    struct RecordingTransport {
        info: PlatformInfo,
        events: EventLog,
    }

    impl Transport for RecordingTransport {
        fn info(&self) -> PlatformInfo {
            self.info
        }

        fn open_core(&self, row: i32, col: i32) -> Result<(), HalError> {
            self.events.borrow_mut().push(Event::Open(row, col));
            Ok(())
        }

        fn close_core(&self, row: i32, col: i32) -> Result<(), HalError> {
            self.events.borrow_mut().push(Event::Close(row, col));
            Ok(())
        }

        fn alloc(&self, offset: u64, size: u64) -> Result<(), HalError> {
            self.events.borrow_mut().push(Event::Alloc(offset, size));
            Ok(())
        }

        fn free(&self, offset: u64) -> Result<(), HalError> {
            self.events.borrow_mut().push(Event::Free(offset));
            Ok(())
        }

        fn core_read(&self, row: i32, col: i32, addr: u32, buf: &mut [u8]) -> Result<(), HalError> {
            self.events
                .borrow_mut()
                .push(Event::CoreRead(row, col, addr, buf.len()));
            buf.fill(0x5a);
            Ok(())
        }

        fn emem_read(&self, offset: u64, addr: u32, buf: &mut [u8]) -> Result<(), HalError> {
            self.events
                .borrow_mut()
                .push(Event::EmemRead(offset, addr, buf.len()));
            buf.fill(0x5a);
            Ok(())
        }
    }

    fn session() -> (Hal, EventLog) {
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let transport = RecordingTransport {
            info: PlatformInfo { rows: 4, cols: 4 },
            events: Rc::clone(&events),
        };
        (Hal::with_transport(Box::new(transport)), events)
    }

    #[test]
    fn core_context_opens_and_closes_once() {
        let (hal, events) = session();
        let core = hal.open_core(1, 2).unwrap();
        let word = core.read_word(0x100).unwrap();
        assert_eq!(word, 0x5a5a5a5a);
        core.close().unwrap();
        hal.finalize().unwrap();
        assert_eq!(
            events.take(),
            vec![
                Event::Open(1, 2),
                Event::CoreRead(1, 2, 0x100, 4),
                Event::Close(1, 2),
            ]
        );
    }

    #[test]
    fn external_window_allocs_and_frees_once() {
        let (hal, events) = session();
        let buf = hal.alloc(0, 0x1000).unwrap();
        buf.read_word(0x10).unwrap();
        buf.free().unwrap();
        hal.finalize().unwrap();
        assert_eq!(
            events.take(),
            vec![
                Event::Alloc(0, 0x1000),
                Event::EmemRead(0, 0x10, 4),
                Event::Free(0),
            ]
        );
    }

    #[test]
    fn window_bound_is_enforced_before_the_transport() {
        let (hal, events) = session();
        let buf = hal.alloc(0, 0x10).unwrap();
        let err = buf.read_word(0x10).unwrap_err();
        assert!(matches!(err, HalError::AddressOutOfRange { .. }));
        buf.free().unwrap();
        assert_eq!(events.take(), vec![Event::Alloc(0, 0x10), Event::Free(0)]);
    }
}
