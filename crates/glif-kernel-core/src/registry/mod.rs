//! Kernel-spec registration.
//!
//! The registry owns the final placement of a bundle; callers only pick the
//! scope.

pub mod jupyter;

use std::path::{Path, PathBuf};

pub use jupyter::JupyterKernelSpecs;

/// Registration failures detected before anything is written.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Can't specify both user scope and prefix. Please choose one or the other.")]
    UserAndPrefix,
    #[error("Invalid kernel name {0:?}: only letters, digits, '.', '_' and '-' are allowed")]
    InvalidKernelName(String),
    #[error("Could not determine the per-user Jupyter data directory")]
    NoDataDir,
}

/// Places kernel-spec bundles into a kernel registry.
pub trait KernelSpecRegistry {
    /// Install the bundle at `source_dir` as `kernel_name` and return the
    /// directory it was installed to.
    fn install_kernel_spec(
        &self,
        source_dir: &Path,
        kernel_name: &str,
        user: bool,
        prefix: Option<&Path>,
    ) -> anyhow::Result<PathBuf>;
}
