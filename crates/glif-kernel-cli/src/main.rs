//! GLIF kernel installer
//!
//! Usage:
//!   glif-kernel-install                  # per-user unless running as root
//!   glif-kernel-install --user           # per-user kernels registry
//!   glif-kernel-install --sys-prefix     # current environment (virtualenv / conda)
//!   glif-kernel-install --prefix <dir>   # <dir>/share/jupyter/kernels/

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glif_kernel_core::context::InstallContext;
use glif_kernel_core::install::Installer;
use glif_kernel_core::registry::JupyterKernelSpecs;
use glif_kernel_core::scope::{ScopeRequest, SystemHost};

#[derive(Parser)]
#[command(name = "glif-kernel-install")]
#[command(about = "Install the GLIF Jupyter kernel spec", long_about = None)]
struct Cli {
    /// Install to the per-user kernels registry. Default if not root.
    #[arg(long)]
    user: bool,

    /// Install to the current environment's prefix (e.g. a virtualenv or conda env).
    /// Takes precedence over --prefix.
    #[arg(long)]
    sys_prefix: bool,

    /// Install to the given prefix. Kernelspec will be installed in
    /// {PREFIX}/share/jupyter/kernels/
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<PathBuf>,

    /// Directory holding the js/ and css/ assets
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Python interpreter written into the kernel launch command
    /// [default: the environment's python with --sys-prefix, else python3]
    #[arg(long)]
    python: Option<String>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glif_kernel=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut ctx = InstallContext::discover(cli.assets);
    if let Some(python) = cli.python {
        ctx = ctx.with_python(python);
    }
    let request = ScopeRequest {
        user: cli.user,
        sys_prefix: cli.sys_prefix,
        prefix: cli.prefix,
    };

    let host = SystemHost;
    let registry = JupyterKernelSpecs::from_env();
    let report = Installer::new(&ctx, &host, &registry).install(&request)?;

    println!("{}", report.destination.display());
    Ok(())
}
