//! Client-side assets shipped inside the kernel-spec bundle.

use std::fs;
use std::path::Path;

use anyhow::Context;

/// A source file under the asset root and the name recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSource {
    /// Path relative to the asset root.
    pub path: &'static str,
    pub name: &'static str,
}

/// Scripts concatenated into `kernel.js`, in evaluation order.
pub const SCRIPT_SOURCES: &[AssetSource] = &[
    AssetSource {
        path: "js/loadAdvancedMode.js",
        name: "loadAdvancedMode.js",
    },
    AssetSource {
        path: "js/loadGlifHighlighting.js",
        name: "loadGlifHighlighting.js",
    },
    AssetSource {
        path: "js/kernel.js",
        name: "kernel.js",
    },
];

pub const STYLESHEET_SOURCE: AssetSource = AssetSource {
    path: "css/glif.css",
    name: "glif.css",
};

/// Bundle file names.
pub const KERNEL_JSON: &str = "kernel.json";
pub const KERNEL_JS: &str = "kernel.js";
pub const STYLESHEET: &str = "glif.css";

/// Read an asset as UTF-8.
pub fn read_asset(root: &Path, source: &AssetSource) -> anyhow::Result<String> {
    let path = root.join(source.path);
    fs::read_to_string(&path)
        .with_context(|| format!("Failed to read asset {}: {}", source.name, path.display()))
}

/// Concatenate `sources` into a single script, each framed by
/// `// BEGIN FILE:` / `// END FILE:` marker lines.
pub fn concat_scripts(root: &Path, sources: &[AssetSource]) -> anyhow::Result<String> {
    let mut out = String::new();
    for source in sources {
        let content = read_asset(root, source)?;
        push_framed(&mut out, source.name, &content);
    }
    Ok(out)
}

fn push_framed(out: &mut String, name: &str, content: &str) {
    out.push_str("// BEGIN FILE: ");
    out.push_str(name);
    out.push_str("\n\n");
    out.push_str(content);
    if !content.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out.push_str("// END FILE: ");
    out.push_str(name);
    out.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_wraps_content_with_markers() {
        let mut out = String::new();
        push_framed(&mut out, "a.js", "let a = 1;\n");
        assert_eq!(
            out,
            "// BEGIN FILE: a.js\n\nlet a = 1;\n\n// END FILE: a.js\n\n"
        );
    }

    #[test]
    fn framing_terminates_unterminated_content() {
        let mut out = String::new();
        push_framed(&mut out, "b.js", "let b = 2;");
        assert_eq!(
            out,
            "// BEGIN FILE: b.js\n\nlet b = 2;\n\n// END FILE: b.js\n\n"
        );
    }

    #[test]
    fn framing_of_empty_content() {
        let mut out = String::new();
        push_framed(&mut out, "empty.js", "");
        assert_eq!(
            out,
            "// BEGIN FILE: empty.js\n\n\n\n// END FILE: empty.js\n\n"
        );
    }

    #[test]
    fn concat_preserves_source_order() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        fs::create_dir_all(tmp.path().join("js")).unwrap();
        fs::write(tmp.path().join("js/first.js"), "first();\n").unwrap();
        fs::write(tmp.path().join("js/second.js"), "second();\n").unwrap();

        let sources = [
            AssetSource {
                path: "js/second.js",
                name: "second.js",
            },
            AssetSource {
                path: "js/first.js",
                name: "first.js",
            },
        ];
        let out = concat_scripts(tmp.path(), &sources).unwrap();

        let second = out.find("// BEGIN FILE: second.js").unwrap();
        let first = out.find("// BEGIN FILE: first.js").unwrap();
        assert!(second < first);
    }

    #[test]
    fn missing_asset_names_the_file() {
        let tmp = tempfile::tempdir().expect("tempdir should succeed");
        let err = read_asset(tmp.path(), &STYLESHEET_SOURCE).unwrap_err();
        assert!(err.to_string().contains("glif.css"));
    }
}
