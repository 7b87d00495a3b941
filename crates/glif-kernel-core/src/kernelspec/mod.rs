//! Kernel spec descriptor (`kernel.json`).

use serde::{Deserialize, Serialize};

/// Name under which the kernel is registered.
pub const KERNEL_NAME: &str = "GLIF";

/// Placeholder the notebook runtime replaces with the connection file path.
pub const CONNECTION_FILE_PLACEHOLDER: &str = "{connection_file}";

/// Python module that hosts the kernel's execution engine.
pub const KERNEL_MODULE: &str = "glif_kernel";

/// Launch command and labels the notebook runtime reads from `kernel.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub argv: Vec<String>,
    pub display_name: String,
    pub language: String,
}

impl KernelSpec {
    /// Descriptor for the GLIF kernel launched through `python`.
    pub fn glif(python: impl Into<String>) -> Self {
        Self {
            argv: vec![
                python.into(),
                "-m".to_string(),
                KERNEL_MODULE.to_string(),
                "-f".to_string(),
                CONNECTION_FILE_PLACEHOLDER.to_string(),
            ],
            display_name: "GLIF".to_string(),
            language: "glif".to_string(),
        }
    }

    /// Serialize with keys in sorted order.
    ///
    /// Going through `serde_json::Value` keeps the key order independent of
    /// field declaration order.
    pub fn to_json(&self) -> anyhow::Result<String> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::to_string(&value)?)
    }
}
