//! Host queries used while resolving the install scope.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Environment variables naming the active environment, checked in order.
const PREFIX_ENV_VARS: [&str; 2] = ["VIRTUAL_ENV", "CONDA_PREFIX"];

/// Facts about the running process that influence the install scope.
pub trait HostProbe {
    /// Whether the process runs with administrative privileges.
    fn is_privileged(&self) -> bool;

    /// Installation prefix of the current environment (the `--sys-prefix` target).
    fn runtime_prefix(&self) -> anyhow::Result<PathBuf>;
}

/// Probe backed by the real process and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostProbe for SystemHost {
    fn is_privileged(&self) -> bool {
        is_privileged()
    }

    fn runtime_prefix(&self) -> anyhow::Result<PathBuf> {
        if let Some(prefix) = prefix_from_env(|var| std::env::var_os(var)) {
            return Ok(prefix);
        }

        let exe = std::env::current_exe().context("Failed to locate the running executable")?;
        prefix_from_executable(&exe).ok_or_else(|| {
            anyhow::anyhow!(
                "Could not determine installation prefix from {}",
                exe.display()
            )
        })
    }
}

/// First non-empty `VIRTUAL_ENV` / `CONDA_PREFIX` value, read through `lookup`.
pub(crate) fn prefix_from_env(lookup: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    PREFIX_ENV_VARS
        .iter()
        .copied()
        .filter_map(|var| lookup(var).filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .next()
}

/// `<prefix>/bin/<exe>` -> `<prefix>`
pub(crate) fn prefix_from_executable(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.parent().map(Path::to_path_buf)
}

/// Returns true when the effective user is root.
#[cfg(unix)]
pub fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// No privilege concept is probed on this platform; assume an unprivileged user.
#[cfg(not(unix))]
pub fn is_privileged() -> bool {
    false
}
