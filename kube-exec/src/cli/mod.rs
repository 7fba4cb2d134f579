//! Command line entry point of `kube-exec`.
//!
//! ```bash
//! # Open a shell in a pod of deployment `web`
//! kube-exec -it web -- sh
//!
//! # Run a command in a pod of statefulset `db` in namespace `data`
//! kube-exec -n data sts/db -- psql -c 'select 1'
//!
//! # Pick the container with a flag forwarded to `kubectl exec`
//! kube-exec -c sidecar deploy/api -- cat /etc/resolv.conf
//! ```

mod argv;
pub mod error;

use std::{ffi::OsString, io::Write, path::PathBuf};

use clap::{CommandFactory, Parser};
use kube_exec_base::{CLI_PROGRAM_NAME, PROJECT_NAME, PROJECT_VERSION};
use snafu::ResultExt;
use tokio::runtime::Builder;

pub use self::error::Error;
use self::argv::SplitArgs;
use crate::{
    cluster::KubeCluster,
    config::Config,
    dispatch::KubectlDispatcher,
    pipeline::{self, Invocation},
    resolve::WorkloadReference,
};

/// Executes a command in a pod selected by a workload's label selector.
#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    about = "Execute a command in a pod of a Kubernetes workload.",
    long_about = "Resolves OBJECT (KIND/NAME, or NAME for a deployment) to the first pod \
                  matching its label selector and runs COMMAND there with `kubectl exec`. \
                  Flags before OBJECT that kube-exec does not know, such as -it or -c \
                  CONTAINER, are forwarded to `kubectl exec`.",
    override_usage = "kube-exec [OPTIONS] [KUBECTL FLAGS] <OBJECT> [--] <COMMAND>...",
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Namespace the workload lives in.
    ///
    /// Defaults to the namespace of the kubeconfig context, or `default`.
    #[arg(
        short,
        long,
        help = "Namespace of the workload. Defaults to the namespace of the kubeconfig context."
    )]
    namespace: Option<String>,

    /// Kubeconfig context used for discovery and forwarded to `kubectl`.
    #[arg(long, help = "Kubeconfig context to use, also forwarded to kubectl.")]
    context: Option<String>,

    /// Program invoked as `<kubectl> exec ...`.
    ///
    /// Takes precedence over `kubectlProgram` in the configuration file.
    #[arg(
        long = "kubectl",
        env = "KUBE_EXEC_KUBECTL",
        value_name = "PATH",
        help = "Program used to exec into the pod. Overrides the configuration file."
    )]
    kubectl_program: Option<PathBuf>,

    /// Path to the configuration file.
    ///
    /// Defaults to `~/.config/kube-exec/config.yaml` or the path in the
    /// `KUBE_EXEC_CONFIG_FILE_PATH` environment variable.
    #[arg(
        long = "config",
        env = "KUBE_EXEC_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/kube-exec/config.yaml or \
                KUBE_EXEC_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    /// Sets the logging level for the application.
    ///
    /// Logs go to stderr; only warnings and errors are shown by default.
    #[arg(
        long = "log-level",
        env = "KUBE_EXEC_LOG_LEVEL",
        help = "Set the logging level (e.g., warn, info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,

    /// Prints a shell completion script instead of running.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        help = "Print a completion script for the given shell and exit."
    )]
    completions: Option<clap_complete::Shell>,

    /// Prints the default configuration instead of running.
    #[arg(long = "default-config", help = "Print the default configuration as YAML and exit.")]
    default_config: bool,

    /// The workload, as `KIND/NAME` or a bare deployment `NAME`.
    #[arg(
        value_name = "OBJECT",
        required_unless_present_any = ["completions", "default_config"],
        help = "Workload to exec into: KIND/NAME, or NAME for a deployment."
    )]
    object: Option<String>,

    /// The command and its arguments, run inside the pod.
    #[arg(
        value_name = "COMMAND",
        required_unless_present_any = ["completions", "default_config"],
        help = "Command to run in the pod."
    )]
    command: Vec<OsString>,

    /// Flags set aside for `kubectl exec`.
    #[arg(skip)]
    passthrough: Vec<OsString>,
}

impl Default for Cli {
    /// Parses the process arguments, setting aside the flags meant for
    /// `kubectl exec`.
    fn default() -> Self {
        let mut command = Self::command();
        command.build();
        let SplitArgs { cli_args, passthrough } = argv::split(&command, std::env::args_os());
        Self { passthrough, ..Self::parse_from(cli_args) }
    }
}

impl Cli {
    /// Loads the configuration and applies the command line overrides.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = Config::load_or_default(self.config_file.clone())?;

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }
        if let Some(kubectl_program) = &self.kubectl_program {
            config.kubectl_program.clone_from(kubectl_program);
        }

        Ok(config)
    }

    /// Runs the tool and returns the exit code to leave with.
    ///
    /// # Errors
    ///
    /// Returns an `Error` when configuration, kubeconfig or any resolution
    /// stage fails, or when `kubectl` cannot be started.
    ///
    /// # Panics
    ///
    /// Panics when writing the completion script to stdout fails.
    pub fn run(self) -> Result<i32, Error> {
        if let Some(shell) = self.completions {
            let mut app = Self::command();
            let bin_name = app.get_name().to_string();
            clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
            return Ok(0);
        }
        if self.default_config {
            let yaml = Config::default().to_yaml()?;
            std::io::stdout().write_all(yaml.as_bytes()).context(error::WriteStdoutSnafu)?;
            return Ok(0);
        }

        let config = self.load_config()?;
        config.log.registry();
        tracing::debug!("{PROJECT_NAME} {PROJECT_VERSION}");

        let Self { namespace, context, object, command, passthrough, .. } = self;
        let Some(object) = object else {
            let help = Self::command().render_long_help().ansi().to_string();
            std::io::stderr().write_all(help.as_bytes()).context(error::WriteStdoutSnafu)?;
            return Ok(2);
        };

        let fut = async move {
            let kube_client = kube_client(context.as_deref()).await?;
            let namespace = namespace_or_default(namespace, kube_client.default_namespace());

            let invocation = Invocation {
                reference: WorkloadReference::parse(&object, namespace)?,
                context,
                passthrough,
                command,
                api_groups: config.api_groups,
            };
            let cluster = KubeCluster::from(kube_client);
            let dispatcher = KubectlDispatcher::new(config.kubectl_program);
            pipeline::run(&cluster, &dispatcher, invocation).await
        };

        Builder::new_current_thread()
            .enable_all()
            .build()
            .context(error::InitializeTokioRuntimeSnafu)?
            .block_on(fut)
    }
}

/// Picks the namespace given on the command line, unless it is missing or
/// empty.
fn namespace_or_default(namespace: Option<String>, default_namespace: &str) -> String {
    namespace
        .filter(|namespace| !namespace.is_empty())
        .unwrap_or_else(|| default_namespace.to_string())
}

async fn kube_client(context: Option<&str>) -> Result<kube::Client, Error> {
    let Some(context) = context else {
        return kube::Client::try_default().await.context(error::KubeConfigSnafu);
    };
    let options = kube::config::KubeConfigOptions {
        context: Some(context.to_string()),
        ..kube::config::KubeConfigOptions::default()
    };
    let config = kube::Config::from_kubeconfig(&options)
        .await
        .context(error::LoadKubeconfigSnafu { context })?;
    kube::Client::try_from(config).context(error::KubeConfigSnafu)
}
