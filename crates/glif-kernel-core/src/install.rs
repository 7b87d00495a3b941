//! Install orchestration: resolve scope, assemble bundle, register.

use std::path::PathBuf;

use crate::context::InstallContext;
use crate::kernelspec::KERNEL_NAME;
use crate::registry::KernelSpecRegistry;
use crate::scope::{HostProbe, InstallScope, ScopeRequest, resolve_scope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub scope: InstallScope,
    /// Directory the registry installed the kernel spec into.
    pub destination: PathBuf,
}

pub struct Installer<'a> {
    ctx: &'a InstallContext,
    host: &'a dyn HostProbe,
    registry: &'a dyn KernelSpecRegistry,
}

impl<'a> Installer<'a> {
    pub fn new(
        ctx: &'a InstallContext,
        host: &'a dyn HostProbe,
        registry: &'a dyn KernelSpecRegistry,
    ) -> Self {
        Self {
            ctx,
            host,
            registry,
        }
    }

    /// Install the GLIF kernel spec.
    ///
    /// The scratch bundle is removed on every path. Registry errors are
    /// returned unchanged.
    pub fn install(&self, request: &ScopeRequest) -> anyhow::Result<InstallReport> {
        let scope = resolve_scope(request, self.host)?;

        // `--sys-prefix` launches the kernel with that environment's interpreter.
        let env_prefix = if request.sys_prefix {
            scope.prefix.as_deref()
        } else {
            None
        };
        let bundle = self
            .ctx
            .bundle_assembler()
            .assemble(&self.ctx.kernel_spec(env_prefix))?;

        tracing::info!("Installing Jupyter kernel spec to {}", scope);
        let registered = self.registry.install_kernel_spec(
            bundle.path(),
            KERNEL_NAME,
            scope.user,
            scope.prefix.as_deref(),
        );
        let cleanup = bundle.close();

        let destination = registered?;
        cleanup?;

        Ok(InstallReport { scope, destination })
    }
}
