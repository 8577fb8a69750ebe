//! Machine identifier used to key the local session cache.
//!
//! The raw platform id is normalized, hashed with SHA-256 and hex encoded,
//! then the first [`SESSION_KEY_LEN`](constants::SESSION_KEY_LEN) hex
//! characters are used directly as the 32-byte AES key. There is no salt and
//! no KDF; see [`crate::core::cipher::session`].

use std::process::Command;

use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{AuthError, Result};

/// Environment variable overriding the platform machine id.
pub const MACHINE_ID_ENV: &str = "PNUT_MACHINE_ID";

/// Read the raw platform machine identifier.
///
/// # Errors
///
/// `AuthError::MachineId` when no source yields a value.
pub fn raw_machine_id() -> Result<String> {
    if let Ok(id) = std::env::var(MACHINE_ID_ENV) {
        if !id.trim().is_empty() {
            debug!("machine id from environment");
            return Ok(id);
        }
    }
    platform_machine_id()
}

#[cfg(target_os = "linux")]
fn platform_machine_id() -> Result<String> {
    for path in ["/var/lib/dbus/machine-id", "/etc/machine-id"] {
        if let Ok(contents) = std::fs::read_to_string(path) {
            if let Some(line) = contents.lines().next().filter(|l| !l.trim().is_empty()) {
                debug!(path, "machine id read");
                return Ok(line.to_string());
            }
        }
    }
    command_output("hostname", &[])
}

#[cfg(target_os = "macos")]
fn platform_machine_id() -> Result<String> {
    let out = command_output("ioreg", &["-rd1", "-c", "IOPlatformExpertDevice"])?;
    out.lines()
        .find(|l| l.contains("IOPlatformUUID"))
        .and_then(|l| l.split('=').nth(1))
        .map(|v| v.trim().trim_matches('"').to_string())
        .ok_or_else(|| AuthError::MachineId("IOPlatformUUID not found".to_string()).into())
}

#[cfg(target_os = "windows")]
fn platform_machine_id() -> Result<String> {
    let out = command_output(
        "REG",
        &[
            "QUERY",
            r"HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Cryptography",
            "/v",
            "MachineGuid",
        ],
    )?;
    out.split("REG_SZ")
        .nth(1)
        .map(|v| v.trim().to_string())
        .ok_or_else(|| AuthError::MachineId("MachineGuid not found".to_string()).into())
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_machine_id() -> Result<String> {
    command_output("kenv", &["-q", "smbios.system.uuid"])
        .or_else(|_| command_output("sysctl", &["-n", "kern.hostuuid"]))
}

fn command_output(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| AuthError::MachineId(format!("{}: {}", program, e)))?;
    if !output.status.success() {
        return Err(AuthError::MachineId(format!("{} exited with {}", program, output.status)).into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Normalize a raw id: strip all whitespace, lowercase.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// SHA-256 hex digest of the normalized id.
pub fn hashed_machine_id(raw: &str) -> String {
    let digest = Sha256::digest(normalize(raw).as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Session key derived from a raw id.
pub fn session_key_from(raw: &str) -> Zeroizing<Vec<u8>> {
    let hashed = hashed_machine_id(raw);
    Zeroizing::new(hashed.as_bytes()[..constants::SESSION_KEY_LEN].to_vec())
}

/// Session key for this machine.
pub fn session_key() -> Result<Zeroizing<Vec<u8>>> {
    Ok(session_key_from(&raw_machine_id()?))
}
