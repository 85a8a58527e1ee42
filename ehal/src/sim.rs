//! File-backed simulated transport.
//!
//! The device is a directory of flat binary images: `core-<row>-<col>.mem`
//! for each core's local memory and `emem.mem` for the external region.
//! Reads past the end of an image yield zeros, matching uninitialized device
//! memory; reads crossing the end of the address space are errors.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::HalError;
use crate::platform::{HalConfig, PlatformInfo};
use crate::transport::Transport;
use crate::{CORE_MEM_SIZE, EMEM_REGION_SIZE};

/// Image file holding the external region.
const EMEM_IMAGE: &str = "emem.mem";

/// Simulated device rooted at an image directory.
#[derive(Debug)]
pub struct SimTransport {
    device_dir: PathBuf,
    info: PlatformInfo,
}

impl SimTransport {
    /// Open the simulated device described by `config`.
    pub fn new(config: HalConfig) -> Result<Self, HalError> {
        if !config.device_dir.is_dir() {
            return Err(HalError::DeviceMissing(config.device_dir));
        }
        debug!(
            "simulated device at '{}', grid {}x{}",
            config.device_dir.display(),
            config.info.rows,
            config.info.cols
        );
        Ok(Self {
            device_dir: config.device_dir,
            info: config.info,
        })
    }

    fn core_image(&self, row: i32, col: i32) -> PathBuf {
        self.device_dir.join(format!("core-{row}-{col}.mem"))
    }

    fn check_coords(&self, row: i32, col: i32) -> Result<(), HalError> {
        if self.info.contains(row, col) {
            Ok(())
        } else {
            Err(HalError::CoordsOutOfRange {
                row,
                col,
                rows: self.info.rows,
                cols: self.info.cols,
            })
        }
    }
}

impl Transport for SimTransport {
    fn info(&self) -> PlatformInfo {
        self.info
    }

    fn open_core(&self, row: i32, col: i32) -> Result<(), HalError> {
        self.check_coords(row, col)
    }

    fn close_core(&self, row: i32, col: i32) -> Result<(), HalError> {
        self.check_coords(row, col)
    }

    fn alloc(&self, offset: u64, size: u64) -> Result<(), HalError> {
        if offset.checked_add(size).is_none_or(|end| end > EMEM_REGION_SIZE) {
            return Err(HalError::WindowExhausted { offset, size });
        }
        Ok(())
    }

    fn free(&self, _offset: u64) -> Result<(), HalError> {
        Ok(())
    }

    fn core_read(&self, row: i32, col: i32, addr: u32, buf: &mut [u8]) -> Result<(), HalError> {
        self.check_coords(row, col)?;
        let end = addr as u64 + buf.len() as u64;
        if end > CORE_MEM_SIZE as u64 {
            return Err(HalError::AddressOutOfRange {
                addr,
                len: buf.len(),
            });
        }
        read_image(&self.core_image(row, col), addr as u64, buf)
    }

    fn emem_read(&self, offset: u64, addr: u32, buf: &mut [u8]) -> Result<(), HalError> {
        let pos = offset + addr as u64;
        if pos + buf.len() as u64 > EMEM_REGION_SIZE {
            return Err(HalError::AddressOutOfRange {
                addr,
                len: buf.len(),
            });
        }
        read_image(&self.device_dir.join(EMEM_IMAGE), pos, buf)
    }
}

/// Read `buf.len()` bytes from `path` at `pos`, zero-filling past end-of-file.
/// A missing image reads as all zeros.
fn read_image(path: &Path, pos: u64, buf: &mut [u8]) -> Result<(), HalError> {
    buf.fill(0);
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    file.seek(SeekFrom::Start(pos))?;
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(())
}
