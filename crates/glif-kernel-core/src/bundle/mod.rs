//! Kernel-spec bundle assembly in a scratch directory.

pub mod assets;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;

pub use assets::{AssetSource, SCRIPT_SOURCES, STYLESHEET_SOURCE};

use crate::kernelspec::KernelSpec;

/// A fully written bundle.
///
/// Owns its scratch directory; the directory is removed when the bundle is
/// dropped or closed.
#[derive(Debug)]
pub struct KernelBundle {
    dir: TempDir,
}

impl KernelBundle {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the scratch directory, reporting any failure.
    pub fn close(self) -> anyhow::Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .with_context(|| format!("Failed to remove scratch directory: {}", path.display()))
    }
}

/// Builds kernel-spec bundles from the assets under `asset_root`.
#[derive(Debug, Clone)]
pub struct BundleAssembler {
    asset_root: PathBuf,
    scratch_parent: Option<PathBuf>,
}

impl BundleAssembler {
    pub fn new(asset_root: PathBuf) -> Self {
        Self {
            asset_root,
            scratch_parent: None,
        }
    }

    /// Create scratch directories under `parent` instead of the system temp dir.
    pub fn with_scratch_parent(mut self, parent: PathBuf) -> Self {
        self.scratch_parent = Some(parent);
        self
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Write `kernel.json`, `kernel.js` and `glif.css` into a fresh scratch
    /// directory.
    ///
    /// On error the scratch directory is removed before returning.
    pub fn assemble(&self, spec: &KernelSpec) -> anyhow::Result<KernelBundle> {
        let dir = self.create_scratch_dir()?;
        let root = dir.path();
        tracing::debug!(path = %root.display(), "Created scratch directory");

        relax_permissions(root)?;

        let kernel_json = root.join(assets::KERNEL_JSON);
        fs::write(&kernel_json, spec.to_json()?)
            .with_context(|| format!("Failed to write {}", kernel_json.display()))?;
        tracing::debug!(path = %kernel_json.display(), "Wrote kernel descriptor");

        let script = assets::concat_scripts(&self.asset_root, SCRIPT_SOURCES)?;
        let kernel_js = root.join(assets::KERNEL_JS);
        fs::write(&kernel_js, script)
            .with_context(|| format!("Failed to write {}", kernel_js.display()))?;
        tracing::debug!(
            path = %kernel_js.display(),
            sources = SCRIPT_SOURCES.len(),
            "Wrote script asset"
        );

        let stylesheet = assets::read_asset(&self.asset_root, &STYLESHEET_SOURCE)?;
        let css = root.join(assets::STYLESHEET);
        fs::write(&css, stylesheet).with_context(|| format!("Failed to write {}", css.display()))?;
        tracing::debug!(path = %css.display(), "Wrote stylesheet asset");

        Ok(KernelBundle { dir })
    }

    fn create_scratch_dir(&self) -> anyhow::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("glif-kernel-");
        match &self.scratch_parent {
            Some(parent) => builder.tempdir_in(parent).with_context(|| {
                format!("Failed to create scratch directory in {}", parent.display())
            }),
            None => builder
                .tempdir()
                .context("Failed to create scratch directory"),
        }
    }
}

/// Scratch directories start out as 0700; open them up so the bundle stays
/// readable after it is copied into a shared registry.
#[cfg(unix)]
fn relax_permissions(dir: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(dir, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to set permissions on {}", dir.display()))
}

#[cfg(not(unix))]
fn relax_permissions(_dir: &Path) -> anyhow::Result<()> {
    Ok(())
}
