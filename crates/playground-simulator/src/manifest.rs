//! `Move.toml` sources for scratch packages.

use std::path::PathBuf;

use crate::workspace::WorkspaceError;

const FRAMEWORK_GIT: &str = "https://github.com/aptos-labs/aptos-core.git";
const FRAMEWORK_REV: &str = "main";

/// Where the manifest of a scratch package comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Built-in `playground` package declaring `named_address` as an unassigned named address.
    Builtin { named_address: String },
    /// A file copied verbatim into every workspace.
    Template(PathBuf),
}

impl Default for ManifestSource {
    fn default() -> Self {
        ManifestSource::Builtin {
            named_address: "demo".to_string(),
        }
    }
}

impl ManifestSource {
    pub fn builtin(named_address: impl Into<String>) -> Self {
        ManifestSource::Builtin {
            named_address: named_address.into(),
        }
    }

    pub async fn render(&self) -> Result<String, WorkspaceError> {
        match self {
            ManifestSource::Builtin { named_address } => Ok(builtin_manifest(named_address)),
            ManifestSource::Template(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| WorkspaceError::Template {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

pub fn builtin_manifest(named_address: &str) -> String {
    format!(
        r#"[package]
name = "playground"
version = "0.0.1"

[addresses]
{named_address} = "_"

[dependencies]
AptosFramework = {{ git = "{FRAMEWORK_GIT}", subdir = "aptos-move/framework/aptos-framework", rev = "{FRAMEWORK_REV}" }}
AptosStdlib = {{ git = "{FRAMEWORK_GIT}", subdir = "aptos-move/framework/aptos-stdlib", rev = "{FRAMEWORK_REV}" }}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn builtin_declares_named_address() {
        let manifest = ManifestSource::builtin("demo").render().await.unwrap();
        assert!(manifest.contains("name = \"playground\""));
        assert!(manifest.contains("demo = \"_\""));
        assert!(manifest.contains("AptosFramework = {"));
        assert!(manifest.contains("AptosStdlib = {"));
    }

    #[tokio::test]
    async fn template_is_copied_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[package]\nname = \"custom\"\n").unwrap();
        let source = ManifestSource::Template(file.path().to_path_buf());
        assert_eq!(source.render().await.unwrap(), "[package]\nname = \"custom\"\n");
    }

    #[tokio::test]
    async fn missing_template_is_an_error() {
        let source = ManifestSource::Template(PathBuf::from("/nonexistent/Move.toml"));
        assert!(matches!(
            source.render().await,
            Err(WorkspaceError::Template { .. })
        ));
    }
}
