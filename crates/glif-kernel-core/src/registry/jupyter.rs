//! Jupyter's on-disk kernel registry.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{KernelSpecRegistry, RegistryError};
use crate::bundle::assets::KERNEL_JSON;

/// Kernel registry laid out the way `jupyter kernelspec` expects:
/// `<jupyter dir>/kernels/<name>/`.
#[derive(Debug, Clone)]
pub struct JupyterKernelSpecs {
    user_data_dir: Option<PathBuf>,
    system_dir: PathBuf,
}

impl JupyterKernelSpecs {
    /// Registry rooted at the platform's Jupyter directories.
    pub fn from_env() -> Self {
        Self {
            user_data_dir: user_data_dir(),
            system_dir: system_dir(),
        }
    }

    /// Registry with explicit directories (for testing).
    pub fn with_dirs(user_data_dir: PathBuf, system_dir: PathBuf) -> Self {
        Self {
            user_data_dir: Some(user_data_dir),
            system_dir,
        }
    }

    /// Directory the kernel would be installed to for the given scope.
    pub fn destination_dir(
        &self,
        kernel_name: &str,
        user: bool,
        prefix: Option<&Path>,
    ) -> anyhow::Result<PathBuf> {
        let base = match (user, prefix) {
            (true, Some(_)) => return Err(RegistryError::UserAndPrefix.into()),
            (true, None) => self
                .user_data_dir
                .clone()
                .ok_or(RegistryError::NoDataDir)?,
            (false, Some(prefix)) => prefix.join("share").join("jupyter"),
            (false, None) => self.system_dir.clone(),
        };
        Ok(base.join("kernels").join(normalize_kernel_name(kernel_name)?))
    }
}

impl KernelSpecRegistry for JupyterKernelSpecs {
    fn install_kernel_spec(
        &self,
        source_dir: &Path,
        kernel_name: &str,
        user: bool,
        prefix: Option<&Path>,
    ) -> anyhow::Result<PathBuf> {
        let destination = self.destination_dir(kernel_name, user, prefix)?;
        ensure_bundle_dir(source_dir)?;

        if destination.is_dir() {
            fs::remove_dir_all(&destination).with_context(|| {
                format!(
                    "Failed to remove existing kernel spec: {}",
                    destination.display()
                )
            })?;
        }
        fs::create_dir_all(&destination).with_context(|| {
            format!(
                "Failed to create kernel spec directory: {}",
                destination.display()
            )
        })?;
        let files = copy_bundle(source_dir, &destination)?;

        tracing::info!(
            kernel = kernel_name,
            files,
            path = %destination.display(),
            "Installed kernelspec"
        );
        Ok(destination)
    }
}

/// Kernel names are case-insensitive and stored lowercased.
fn normalize_kernel_name(name: &str) -> anyhow::Result<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !valid {
        return Err(RegistryError::InvalidKernelName(name.to_string()).into());
    }
    Ok(name.to_ascii_lowercase())
}

fn user_data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("JUPYTER_DATA_DIR").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    platform_data_dir()
}

#[cfg(target_os = "macos")]
fn platform_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join("Jupyter"))
}

#[cfg(not(target_os = "macos"))]
fn platform_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("jupyter"))
}

#[cfg(windows)]
fn system_dir() -> PathBuf {
    let program_data = std::env::var_os("PROGRAMDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"));
    program_data.join("jupyter")
}

#[cfg(not(windows))]
fn system_dir() -> PathBuf {
    PathBuf::from("/usr/local/share/jupyter")
}

/// A bundle must be a directory holding `kernel.json`.
fn ensure_bundle_dir(source_dir: &Path) -> anyhow::Result<()> {
    let meta = fs::metadata(source_dir)
        .with_context(|| format!("Kernel spec bundle not found: {}", source_dir.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("Kernel spec bundle is not a directory: {}", source_dir.display());
    }
    if !source_dir.join(KERNEL_JSON).is_file() {
        anyhow::bail!(
            "Kernel spec bundle has no {}: {}",
            KERNEL_JSON,
            source_dir.display()
        );
    }
    Ok(())
}

/// Copy the bundle into `destination`, returning the number of files copied.
fn copy_bundle(source_dir: &Path, destination: &Path) -> anyhow::Result<usize> {
    let mut copied = 0;
    let entries = fs::read_dir(source_dir)
        .with_context(|| format!("Failed to list bundle: {}", source_dir.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to list bundle: {}", source_dir.display()))?;
        let from = entry.path();
        let to = destination.join(entry.file_name());
        let ty = entry
            .file_type()
            .with_context(|| format!("Failed to stat bundle entry: {}", from.display()))?;

        if ty.is_dir() {
            fs::create_dir_all(&to)
                .with_context(|| format!("Failed to create {}", to.display()))?;
            copied += copy_bundle(&from, &to)?;
        } else if ty.is_file() {
            fs::copy(&from, &to).with_context(|| {
                format!("Failed to copy {} into {}", from.display(), to.display())
            })?;
            tracing::debug!(file = %to.display(), "Copied bundle file");
            copied += 1;
        } else {
            anyhow::bail!("Kernel spec bundle entry is not a file: {}", from.display());
        }
    }
    Ok(copied)
}
