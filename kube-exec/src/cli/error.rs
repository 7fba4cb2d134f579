use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Resolve { source: crate::resolve::Error },

    #[snafu(display("{source}"))]
    Dispatch { source: crate::dispatch::Error },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to load kubeconfig context {context}, error: {source}"))]
    LoadKubeconfig {
        context: String,
        #[snafu(source(from(kube::config::KubeconfigError, Box::new)))]
        source: Box<kube::config::KubeconfigError>,
    },

    #[snafu(display("Failed to initialize Kubernetes client configuration, error: {source}"))]
    KubeConfig {
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to create tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<crate::resolve::Error> for Error {
    fn from(source: crate::resolve::Error) -> Self { Self::Resolve { source } }
}

impl From<crate::dispatch::Error> for Error {
    fn from(source: crate::dispatch::Error) -> Self { Self::Dispatch { source } }
}
