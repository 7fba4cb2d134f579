use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to run {}, error: {source}", program.display()))]
    SpawnKubectl { program: PathBuf, source: std::io::Error },
}
