//! Toolchain invocation.
//!
//! [`ToolchainRunner`] is the seam between the simulator and the Move toolchain.
//! [`AptosCliRunner`] drives the `aptos` binary as two subprocesses, compile then
//! run, passing every argument as a separate argv entry. No shell is involved, so
//! entry names and arguments are never interpreted.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// Captured result of a toolchain invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ToolchainOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    fn from_output(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        }
    }

    fn append(mut self, next: ToolchainOutput) -> Self {
        self.stdout.push_str(&next.stdout);
        self.stderr.push_str(&next.stderr);
        self.exit_code = next.exit_code;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Toolchain did not finish within {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait ToolchainRunner: Send + Sync {
    /// Compiles the package in `workspace` and, if that succeeds, simulates `entry` with `args`.
    async fn compile_and_run(
        &self,
        workspace: &Path,
        entry: &str,
        args: &[String],
    ) -> Result<ToolchainOutput, ToolchainError>;
}

/// Runs the `aptos` CLI as a child process.
#[derive(Debug, Clone)]
pub struct AptosCliRunner {
    program: PathBuf,
    module_address: String,
    named_address: String,
    profile: Option<String>,
    simulate_flag: String,
    timeout: Option<Duration>,
}

impl Default for AptosCliRunner {
    fn default() -> Self {
        Self::new("aptos")
    }
}

impl AptosCliRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            module_address: "0x1".to_string(),
            named_address: "demo".to_string(),
            profile: None,
            simulate_flag: "--local".to_string(),
            timeout: None,
        }
    }

    pub fn with_module_address(mut self, module_address: impl Into<String>) -> Self {
        self.module_address = module_address.into();
        self
    }

    pub fn with_named_address(mut self, named_address: impl Into<String>) -> Self {
        self.named_address = named_address.into();
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_simulate_flag(mut self, simulate_flag: impl Into<String>) -> Self {
        self.simulate_flag = simulate_flag.into();
        self
    }

    /// Bounds each subprocess. The child is killed when the limit is hit.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn compile_args(&self, workspace: &Path) -> Vec<OsString> {
        vec![
            "move".into(),
            "compile".into(),
            "--package-dir".into(),
            workspace.as_os_str().to_owned(),
            "--named-addresses".into(),
            format!("{}={}", self.named_address, self.module_address).into(),
        ]
    }

    pub fn run_args(&self, entry: &str, args: &[String]) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![
            "move".into(),
            "run".into(),
            "--function-id".into(),
            format!("{}::main::{}", self.module_address, entry).into(),
        ];
        if !args.is_empty() {
            argv.push("--args".into());
            argv.extend(args.iter().map(|a| OsString::from(format!("string:{a}"))));
        }
        argv.push(self.simulate_flag.clone().into());
        if let Some(profile) = &self.profile {
            argv.push("--profile".into());
            argv.push(profile.into());
        }
        argv
    }

    async fn exec(
        &self,
        workspace: &Path,
        argv: Vec<OsString>,
    ) -> Result<ToolchainOutput, ToolchainError> {
        let mut command = Command::new(&self.program);
        command
            .args(&argv)
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        tracing::debug!(program = %self.program.display(), ?argv, "Spawning toolchain");

        let spawn_error = |source| ToolchainError::Spawn {
            program: self.program.display().to_string(),
            source,
        };
        let output = match self.timeout {
            None => command.output().await.map_err(spawn_error)?,
            Some(timeout) => tokio::time::timeout(timeout, command.output())
                .await
                .map_err(|_| ToolchainError::Timeout(timeout))?
                .map_err(spawn_error)?,
        };
        Ok(ToolchainOutput::from_output(output))
    }
}

#[async_trait]
impl ToolchainRunner for AptosCliRunner {
    #[tracing::instrument(skip(self, workspace, args), fields(workspace = %workspace.display()), err)]
    async fn compile_and_run(
        &self,
        workspace: &Path,
        entry: &str,
        args: &[String],
    ) -> Result<ToolchainOutput, ToolchainError> {
        let compiled = self.exec(workspace, self.compile_args(workspace)).await?;
        if !compiled.success() {
            tracing::info!(exit_code = ?compiled.exit_code, "Compilation failed");
            return Ok(compiled);
        }
        let ran = self.exec(workspace, self.run_args(entry, args)).await?;
        tracing::info!(exit_code = ?ran.exit_code, "Toolchain finished");
        Ok(compiled.append(ran))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(argv: Vec<OsString>) -> Vec<String> {
        argv.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn compile_argv() {
        let runner = AptosCliRunner::new("aptos").with_module_address("0xcafe");
        assert_eq!(
            strings(runner.compile_args(Path::new("/tmp/ws"))),
            [
                "move",
                "compile",
                "--package-dir",
                "/tmp/ws",
                "--named-addresses",
                "demo=0xcafe"
            ]
        );
    }

    #[test]
    fn run_argv_with_and_without_args() {
        let runner = AptosCliRunner::default();
        assert_eq!(
            strings(runner.run_args("hello", &[])),
            ["move", "run", "--function-id", "0x1::main::hello", "--local"]
        );

        let runner = runner
            .with_profile(Some("devnet".to_string()))
            .with_simulate_flag("--benchmark");
        assert_eq!(
            strings(runner.run_args("greet", &["a b".to_string(), "c".to_string()])),
            [
                "move",
                "run",
                "--function-id",
                "0x1::main::greet",
                "--args",
                "string:a b",
                "string:c",
                "--benchmark",
                "--profile",
                "devnet"
            ]
        );
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = AptosCliRunner::new("/nonexistent/aptos");
        let err = runner
            .compile_and_run(dir.path(), "hello", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ToolchainError::Spawn { .. }), "{err}");
    }

    #[cfg(unix)]
    mod fake_cli {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};
        use std::time::Duration;

        /// Writes an executable shell script that logs its argv to `calls.log` next to itself.
        fn fake_aptos(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-aptos");
            let script = format!(
                "#!/bin/sh\necho \"$@\" >> \"$(dirname \"$0\")/calls.log\"\n{body}\n"
            );
            std::fs::write(&path, script).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn calls(dir: &Path) -> Vec<String> {
            std::fs::read_to_string(dir.join("calls.log"))
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }

        #[tokio::test]
        async fn compiles_then_runs() {
            let bin = tempfile::tempdir().unwrap();
            let ws = tempfile::tempdir().unwrap();
            let program = fake_aptos(
                bin.path(),
                r#"case "$2" in
  compile) echo compiled ;;
  run) echo ran; echo warning >&2 ;;
esac"#,
            );
            let runner = AptosCliRunner::new(program);
            let output = runner
                .compile_and_run(ws.path(), "hello", &["x".to_string()])
                .await
                .unwrap();

            assert_eq!(output.exit_code, Some(0));
            assert_eq!(output.stdout, "compiled\nran\n");
            assert_eq!(output.stderr, "warning\n");
            let calls = calls(bin.path());
            assert_eq!(calls.len(), 2);
            assert_eq!(
                calls[0],
                format!(
                    "move compile --package-dir {} --named-addresses demo=0x1",
                    ws.path().display()
                )
            );
            assert_eq!(
                calls[1],
                "move run --function-id 0x1::main::hello --args string:x --local"
            );
        }

        #[tokio::test]
        async fn stops_after_failed_compile() {
            let bin = tempfile::tempdir().unwrap();
            let ws = tempfile::tempdir().unwrap();
            let program = fake_aptos(
                bin.path(),
                r#"if [ "$2" = compile ]; then echo "error: unbound module" >&2; exit 1; fi"#,
            );
            let output = AptosCliRunner::new(program)
                .compile_and_run(ws.path(), "hello", &[])
                .await
                .unwrap();

            assert_eq!(output.exit_code, Some(1));
            assert_eq!(output.stderr, "error: unbound module\n");
            assert_eq!(calls(bin.path()).len(), 1);
        }

        #[tokio::test]
        async fn enforces_timeout() {
            let bin = tempfile::tempdir().unwrap();
            let ws = tempfile::tempdir().unwrap();
            let program = fake_aptos(bin.path(), "sleep 5");
            let timeout = Duration::from_millis(200);
            let started = std::time::Instant::now();
            let err = AptosCliRunner::new(program)
                .with_timeout(Some(timeout))
                .compile_and_run(ws.path(), "hello", &[])
                .await
                .unwrap_err();

            assert!(matches!(err, ToolchainError::Timeout(t) if t == timeout));
            assert!(started.elapsed() < Duration::from_secs(4));
        }
    }
}
