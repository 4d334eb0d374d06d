//! Hardware identifier providers.
//!
//! The issuer only needs an opaque, stable string per machine. The system
//! provider derives one from the platform machine id plus OS, architecture
//! and hostname, hashed so raw identifiers never end up in a key preimage.

use crate::crypto::digest::sha256_hex;
use crate::errors::{LicenseError, LicenseResult};
use std::env;
use tracing::debug;

/// Source of the hardware identifier bound into a key.
pub trait HardwareIdProvider: Send + Sync {
    /// Identifier for the current machine.
    ///
    /// # Errors
    /// * `HardwareIdUnavailable` - The platform identifier could not be read.
    fn current_id(&self) -> LicenseResult<String>;
}

/// Platform-derived identifier for the machine this process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHardwareId;

impl HardwareIdProvider for SystemHardwareId {
    fn current_id(&self) -> LicenseResult<String> {
        let machine_id = get_machine_id().ok_or_else(|| {
            LicenseError::HardwareIdUnavailable(format!(
                "no machine id available on {}",
                env::consts::OS
            ))
        })?;

        let components = [
            env::consts::OS.to_string(),
            env::consts::ARCH.to_string(),
            get_hostname(),
            machine_id,
        ];
        debug!(os = env::consts::OS, arch = env::consts::ARCH, "derived hardware id");
        Ok(sha256_hex(components.join("|").as_bytes()))
    }
}

/// A caller-supplied identifier, used verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHardwareId(String);

impl FixedHardwareId {
    /// Wrap an identifier obtained out of band.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl HardwareIdProvider for FixedHardwareId {
    fn current_id(&self) -> LicenseResult<String> {
        if self.0.is_empty() {
            return Err(LicenseError::HardwareIdUnavailable(
                "hardware id is empty".to_string(),
            ));
        }
        Ok(self.0.clone())
    }
}

/// Gets the machine hostname.
fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Gets the machine ID (platform-specific unique identifier).
fn get_machine_id() -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("reg")
            .args([
                "query",
                r"HKLM\SOFTWARE\Microsoft\Cryptography",
                "/v",
                "MachineGuid",
            ])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("MachineGuid"))
                    .and_then(|l| l.split_whitespace().last())
                    .map(String::from)
            })
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        None
    }
}
