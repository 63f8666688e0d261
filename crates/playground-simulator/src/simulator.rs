use playground_types::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::manifest::ManifestSource;
use crate::runner::{ToolchainError, ToolchainOutput, ToolchainRunner};
use crate::workspace::{ScratchWorkspace, WorkspaceError};

/// Body of `POST /simulate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub output: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Missing code or entry function")]
    MissingInput,
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
    /// The toolchain ran and reported failure; carries its stderr.
    #[error("{0}")]
    Failed(String),
}

impl From<SimulationError> for ApiError {
    fn from(value: SimulationError) -> Self {
        match value {
            SimulationError::MissingInput => ApiError::Validation(value.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

/// Runs submitted Move code in a throwaway package.
pub struct Simulator {
    runner: Arc<dyn ToolchainRunner>,
    workspace_root: PathBuf,
    manifest: ManifestSource,
    fail_on_stderr: bool,
}

impl Simulator {
    pub fn new(runner: Arc<dyn ToolchainRunner>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workspace_root: workspace_root.into(),
            manifest: ManifestSource::default(),
            fail_on_stderr: true,
        }
    }

    pub fn with_manifest(mut self, manifest: ManifestSource) -> Self {
        self.manifest = manifest;
        self
    }

    /// When set, any stderr output fails the simulation even on a zero exit status.
    pub fn with_fail_on_stderr(mut self, fail_on_stderr: bool) -> Self {
        self.fail_on_stderr = fail_on_stderr;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    #[tracing::instrument(skip_all, fields(entry))]
    pub async fn simulate(
        &self,
        request: SimulationRequest,
    ) -> Result<SimulationOutput, SimulationError> {
        let code = non_empty(request.code).ok_or(SimulationError::MissingInput)?;
        let entry = non_empty(request.entry).ok_or(SimulationError::MissingInput)?;
        let args = request.args.unwrap_or_default();
        tracing::Span::current().record("entry", entry.as_str());

        let workspace = ScratchWorkspace::create(&self.workspace_root).await?;
        let result = self.run_in(&workspace, &code, &entry, &args).await;
        if let Err(error) = workspace.remove().await {
            tracing::warn!(%error, "Workspace cleanup failed");
        }

        let output = result?;
        self.judge(output)
    }

    async fn run_in(
        &self,
        workspace: &ScratchWorkspace,
        code: &str,
        entry: &str,
        args: &[String],
    ) -> Result<ToolchainOutput, SimulationError> {
        workspace.write_source(code).await?;
        let manifest = self.manifest.render().await?;
        workspace.write_manifest(&manifest).await?;
        let output = self
            .runner
            .compile_and_run(workspace.path(), entry, args)
            .await?;
        Ok(output)
    }

    fn judge(&self, output: ToolchainOutput) -> Result<SimulationOutput, SimulationError> {
        let has_stderr = !output.stderr.is_empty();
        if output.success() && !(self.fail_on_stderr && has_stderr) {
            return Ok(SimulationOutput {
                output: output.stdout,
            });
        }
        tracing::info!(exit_code = ?output.exit_code, "Simulation failed");
        let message = if has_stderr {
            output.stderr
        } else {
            match output.exit_code {
                Some(code) => format!("Toolchain exited with status {code}"),
                None => "Toolchain was terminated by a signal".to_string(),
            }
        };
        Err(SimulationError::Failed(message))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
