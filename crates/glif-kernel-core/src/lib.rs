//! GLIF Kernel Core Library
//!
//! Builds the GLIF kernel-spec bundle and registers it with the Jupyter
//! kernel registry at a per-user, per-environment or explicit-prefix scope.

pub mod bundle;
pub mod context;
pub mod install;
pub mod kernelspec;
pub mod registry;
pub mod scope;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::context::InstallContext;

    // Scope
    pub use crate::scope::{HostProbe, InstallScope, ScopeRequest, SystemHost, resolve_scope};

    // Bundle
    pub use crate::bundle::{AssetSource, BundleAssembler, KernelBundle};
    pub use crate::kernelspec::KernelSpec;

    // Registry
    pub use crate::registry::{JupyterKernelSpecs, KernelSpecRegistry, RegistryError};

    // Orchestration
    pub use crate::install::{InstallReport, Installer};
}
