//! Hands the resolved pod over to `kubectl exec`.

mod error;

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::ExitStatus,
};

use snafu::ResultExt;
use tokio::process::Command;

pub use self::error::Error;

/// Everything `kubectl exec` needs to reach the selected pod.
#[derive(Clone, Debug)]
pub struct ExecRequest {
    pub namespace: String,
    pub context: Option<String>,
    pub pod_name: String,
    /// Flags forwarded verbatim, placed before the pod name.
    pub passthrough: Vec<OsString>,
    pub command: Vec<OsString>,
}

impl ExecRequest {
    /// `exec --namespace <ns> [--context <ctx>] <passthrough...> <pod> -- <command...>`
    pub fn kubectl_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> =
            vec!["exec".into(), "--namespace".into(), (&self.namespace).into()];
        if let Some(context) = &self.context {
            args.push("--context".into());
            args.push(context.into());
        }
        args.extend(self.passthrough.iter().cloned());
        args.push((&self.pod_name).into());
        args.push("--".into());
        args.extend(self.command.iter().cloned());
        args
    }
}

pub trait Dispatch {
    /// Runs the request to completion and returns the exit code to leave
    /// with.
    async fn dispatch(&self, request: &ExecRequest) -> Result<i32, Error>;
}

/// Runs `kubectl` as a child process sharing this process's stdio.
#[derive(Clone, Debug)]
pub struct KubectlDispatcher {
    program: PathBuf,
}

impl KubectlDispatcher {
    pub fn new(program: impl Into<PathBuf>) -> Self { Self { program: program.into() } }
}

impl Dispatch for KubectlDispatcher {
    async fn dispatch(&self, request: &ExecRequest) -> Result<i32, Error> {
        let args = request.kubectl_args();
        tracing::info!("Running {}", render_command_line(&self.program, &args));

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .await
            .with_context(|_| error::SpawnKubectlSnafu { program: self.program.clone() })?;
        tracing::debug!("{} finished with {status}", self.program.display());

        Ok(exit_code(status))
    }
}

/// The child's exit code, or `128 + signal` when a signal terminated it.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

fn render_command_line(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|arg| shell_escape::escape(arg.to_string_lossy()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
