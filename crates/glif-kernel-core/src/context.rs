//! Install context: paths and settings shared by one install run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::bundle::BundleAssembler;
use crate::kernelspec::KernelSpec;

/// Environment variable pointing at the asset directory.
pub const ASSETS_ENV: &str = "GLIF_KERNEL_ASSETS";

/// Interpreter used to launch the kernel when none is configured and no
/// environment prefix is known.
pub const DEFAULT_PYTHON: &str = "python3";

/// Settings for a single install.
///
/// Frontends build this once from flags and environment, then hand it to
/// the [`Installer`](crate::install::Installer).
#[derive(Debug, Clone)]
pub struct InstallContext {
    asset_root: PathBuf,
    scratch_parent: Option<PathBuf>,
    python: Option<String>,
}

impl InstallContext {
    /// Create a context with an explicit asset directory.
    pub fn new(asset_root: PathBuf) -> Self {
        Self {
            asset_root,
            scratch_parent: None,
            python: None,
        }
    }

    /// Create a context, locating assets from `assets_override`, then
    /// `GLIF_KERNEL_ASSETS`, then `<exe>/../share/glif-kernel`, then the
    /// assets bundled with this crate.
    pub fn discover(assets_override: Option<PathBuf>) -> Self {
        let installed_assets = std::env::current_exe()
            .ok()
            .and_then(|exe| installed_asset_dir(&exe))
            .filter(|dir| dir.is_dir());

        let asset_root = pick_asset_root(
            assets_override,
            std::env::var_os(ASSETS_ENV),
            installed_assets,
        );
        tracing::debug!(path = %asset_root.display(), "Using asset directory");

        Self::new(asset_root)
    }

    pub fn with_scratch_parent(mut self, parent: PathBuf) -> Self {
        self.scratch_parent = Some(parent);
        self
    }

    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = Some(python.into());
        self
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn scratch_parent(&self) -> Option<&Path> {
        self.scratch_parent.as_deref()
    }

    /// Interpreter configured with [`with_python`](Self::with_python), if any.
    pub fn python(&self) -> Option<&str> {
        self.python.as_deref()
    }

    /// Descriptor written to `kernel.json`.
    ///
    /// Without a configured interpreter, `env_prefix` (the `--sys-prefix`
    /// target) selects that environment's python; otherwise `python3`.
    pub fn kernel_spec(&self, env_prefix: Option<&Path>) -> KernelSpec {
        let python = match (&self.python, env_prefix) {
            (Some(python), _) => python.clone(),
            (None, Some(prefix)) => prefix_python(prefix).to_string_lossy().into_owned(),
            (None, None) => DEFAULT_PYTHON.to_string(),
        };
        KernelSpec::glif(python)
    }

    /// Get a BundleAssembler for this context.
    pub fn bundle_assembler(&self) -> BundleAssembler {
        let assembler = BundleAssembler::new(self.asset_root.clone());
        match &self.scratch_parent {
            Some(parent) => assembler.with_scratch_parent(parent.clone()),
            None => assembler,
        }
    }
}

/// Asset directory precedence: override, non-empty env value, installed
/// share dir, bundled dir.
fn pick_asset_root(
    assets_override: Option<PathBuf>,
    env_assets: Option<OsString>,
    installed_assets: Option<PathBuf>,
) -> PathBuf {
    let env_assets = env_assets.filter(|v| !v.is_empty()).map(PathBuf::from);
    assets_override
        .or(env_assets)
        .or(installed_assets)
        .unwrap_or_else(bundled_asset_dir)
}

/// `<prefix>/bin/<exe>` -> `<prefix>/share/glif-kernel`
fn installed_asset_dir(exe: &Path) -> Option<PathBuf> {
    let prefix = exe.parent()?.parent()?;
    Some(prefix.join("share").join("glif-kernel"))
}

fn bundled_asset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

#[cfg(windows)]
fn prefix_python(prefix: &Path) -> PathBuf {
    prefix.join("python.exe")
}

#[cfg(not(windows))]
fn prefix_python(prefix: &Path) -> PathBuf {
    prefix.join("bin").join("python")
}
