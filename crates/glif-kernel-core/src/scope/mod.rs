//! Scope resolution for kernel-spec installs.
//!
//! Turns the `--user` / `--sys-prefix` / `--prefix` flags plus a host probe
//! into the `(user, prefix)` pair handed to the kernel-spec registry.

pub mod host;

use std::fmt;
use std::path::PathBuf;

pub use host::{HostProbe, SystemHost, is_privileged};

/// Install intent as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeRequest {
    pub user: bool,
    pub sys_prefix: bool,
    pub prefix: Option<PathBuf>,
}

/// Resolved scope passed to the registry.
///
/// `user` and `prefix` are forwarded as-is; the registry rejects the
/// combination when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallScope {
    pub user: bool,
    pub prefix: Option<PathBuf>,
}

impl InstallScope {
    pub fn user() -> Self {
        Self {
            user: true,
            prefix: None,
        }
    }

    pub fn prefix(prefix: impl Into<PathBuf>) -> Self {
        Self {
            user: false,
            prefix: Some(prefix.into()),
        }
    }

    pub fn system() -> Self {
        Self {
            user: false,
            prefix: None,
        }
    }
}

impl fmt::Display for InstallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, self.user) {
            (Some(prefix), false) => write!(f, "prefix {}", prefix.display()),
            (Some(prefix), true) => write!(f, "user and prefix {}", prefix.display()),
            (None, true) => write!(f, "user"),
            (None, false) => write!(f, "system"),
        }
    }
}

/// Resolve the install scope.
///
/// `sys_prefix` replaces any explicit prefix with the runtime prefix. With no
/// prefix left and an unprivileged process, the install falls back to the
/// per-user registry. Conflicting flags are not an error here.
pub fn resolve_scope(request: &ScopeRequest, host: &dyn HostProbe) -> anyhow::Result<InstallScope> {
    let mut user = request.user;
    // An empty `--prefix` counts as unset.
    let mut prefix = request
        .prefix
        .clone()
        .filter(|p| !p.as_os_str().is_empty());

    if request.sys_prefix {
        prefix = Some(host.runtime_prefix()?);
    }

    if prefix.is_none() && !host.is_privileged() {
        user = true;
    }

    let scope = InstallScope { user, prefix };
    tracing::debug!(%scope, "Resolved install scope");
    Ok(scope)
}
