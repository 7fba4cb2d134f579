mod error;

use std::path::{Path, PathBuf};

use kube_exec_cli::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::error::Error;
use crate::consts;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Program invoked as `<kubectl> exec ...`.
    #[serde(default = "default_kubectl_program")]
    pub kubectl_program: PathBuf,

    /// Group/versions queried during discovery. Earlier entries take
    /// precedence on name collisions.
    #[serde(default = "default_api_groups")]
    pub api_groups: Vec<String>,

    #[serde(default = "LogConfig::default")]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubectl_program: default_kubectl_program(),
            api_groups: default_api_groups(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn search_config_file_path() -> PathBuf {
        let paths = vec![Self::default_path()]
            .into_iter()
            .chain(kube_exec_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(kube_exec_base::CLI_CONFIG_NAME);
                    path
                },
            ))
            .collect::<Vec<_>>();
        for path in paths {
            let Ok(exists) = path.try_exists() else {
                continue;
            };
            if exists {
                return path;
            }
        }
        Self::default_path()
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        [
            kube_exec_base::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(kube_exec_base::CLI_CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    /// Loads the file given on the command line, or the first file found in
    /// the search path. Falls back to the defaults when nothing was given and
    /// nothing was found.
    pub fn load_or_default(explicit_path: Option<PathBuf>) -> Result<Self, Error> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }
        let path = Self::search_config_file_path();
        if path.try_exists().unwrap_or(false) {
            Self::load(path)
        } else {
            tracing::debug!("No configuration file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path =
                path.as_ref().try_resolve().map(|path| path.to_path_buf()).with_context(|_| {
                    error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() }
                })?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.kubectl_program = resolve_program_path(config.kubectl_program)?;

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).context(error::SerializeConfigSnafu)
    }
}

// Bare program names are looked up in `PATH` by the OS; only paths get `~`
// expansion.
fn resolve_program_path(program: PathBuf) -> Result<PathBuf, Error> {
    if program.components().count() <= 1 {
        return Ok(program);
    }
    program
        .try_resolve()
        .map(|path| path.to_path_buf())
        .with_context(|_| error::ResolveFilePathSnafu { file_path: program.clone() })
}

fn default_kubectl_program() -> PathBuf { PathBuf::from(consts::DEFAULT_KUBECTL_PROGRAM) }

fn default_api_groups() -> Vec<String> {
    consts::DEFAULT_API_GROUPS.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("{}-{name}-{}.yaml", kube_exec_base::PROJECT_NAME, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.kubectl_program, PathBuf::from("kubectl"));
        assert_eq!(config.api_groups.first().map(String::as_str), Some("v1"));
        assert!(config.api_groups.iter().any(|group| group == "apps/v1"));
    }

    #[test]
    fn test_load_partial_config() {
        let path = write_temp_config("partial", "kubectlProgram: /usr/local/bin/kubectl\n");
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.kubectl_program, PathBuf::from("/usr/local/bin/kubectl"));
        assert_eq!(config.api_groups, default_api_groups());
        assert_eq!(config.log.level, tracing::Level::WARN);
    }

    #[test]
    fn test_load_api_groups_in_order() {
        let path = write_temp_config("groups", "apiGroups:\n  - apps/v1\n  - v1\n");
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.api_groups, vec!["apps/v1".to_string(), "v1".to_string()]);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = write_temp_config("invalid", "apiGroups: [unterminated\n");
        let err = Config::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, Error::ParseConfig { .. }));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let path = std::env::temp_dir().join("kube-exec-definitely-missing-config.yaml");
        let err = Config::load_or_default(Some(path)).unwrap_err();
        assert!(matches!(err, Error::OpenConfig { .. } | Error::ResolveFilePath { .. }));
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.api_groups, default_api_groups());
        assert_eq!(config.kubectl_program, PathBuf::from("kubectl"));
    }
}
