//! Platform topology and environment-driven configuration.

use std::env;
use std::path::PathBuf;

use crate::error::HalError;

/// Environment variable naming the device directory.
pub const DEVICE_ENV: &str = "EHAL_DEVICE";

/// Environment variable carrying the platform extent as `ROWSxCOLS`.
pub const PLATFORM_ENV: &str = "EHAL_PLATFORM";

/// Default grid extent when [`PLATFORM_ENV`] is unset (a 4x4 mesh).
pub const DEFAULT_EXTENT: (i32, i32) = (4, 4);

/// Row/column extent of the accelerator grid.
///
/// Extents are signed to match the CLI's signed coordinate arithmetic; a
/// negative row selects the external-memory path before any bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    pub rows: i32,
    pub cols: i32,
}

impl PlatformInfo {
    /// Whether `(row, col)` names a core within the grid.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }
}

/// Resolved HAL configuration: where the device lives and how big the grid is.
#[derive(Debug, Clone)]
pub struct HalConfig {
    pub device_dir: PathBuf,
    pub info: PlatformInfo,
}

impl HalConfig {
    /// Read the configuration from the environment.
    pub fn from_env() -> Result<Self, HalError> {
        let device_dir = env::var_os(DEVICE_ENV)
            .map(PathBuf::from)
            .ok_or(HalError::DeviceNotConfigured)?;
        let info = match env::var(PLATFORM_ENV) {
            Ok(spec) => parse_extent(&spec)?,
            Err(_) => PlatformInfo {
                rows: DEFAULT_EXTENT.0,
                cols: DEFAULT_EXTENT.1,
            },
        };
        Ok(Self { device_dir, info })
    }
}

/// Parse a `ROWSxCOLS` extent specification.
pub fn parse_extent(spec: &str) -> Result<PlatformInfo, HalError> {
    let bad = || HalError::BadPlatformSpec(spec.to_string());
    let (rows, cols) = spec.trim().split_once('x').ok_or_else(bad)?;
    let rows: i32 = rows.parse().map_err(|_| bad())?;
    let cols: i32 = cols.parse().map_err(|_| bad())?;
    if rows <= 0 || cols <= 0 {
        return Err(bad());
    }
    Ok(PlatformInfo { rows, cols })
}
