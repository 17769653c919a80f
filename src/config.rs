use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use snafu::Snafu;
use std::path::{Path, PathBuf};

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Unable to read config file {}: {}", path.display(), source))]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to parse file {}: {}", path.display(), source))]
    ParseFile {
        source: toml::de::Error,
        path: PathBuf,
    },
}

/// Settings that can be given in a config file instead of on the
/// command line. Command line options and environment variables take
/// precedence.
///
/// ```toml
/// base_url = "https://simapi.sim.lrz.de"
/// timeout = 20
/// netrc = "/home/me/.config/sim-api/netrc"
/// ```
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimApiConfig {
    /// The base url of the SIM API.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,

    /// The netrc file to read credentials from.
    pub netrc: Option<PathBuf>,
}

impl SimApiConfig {
    pub fn read(file: &Path) -> Result<SimApiConfig, ConfigError> {
        let cnt = std::fs::read_to_string(file).map_err(|e| ConfigError::ReadFile {
            source: e,
            path: file.to_path_buf(),
        });
        cnt.and_then(|c| {
            toml::from_str(&c).map_err(|e| ConfigError::ParseFile {
                source: e,
                path: file.to_path_buf(),
            })
        })
    }

    /// Reads the given file, or the default config file if it exists.
    /// Without either, an empty config is returned.
    pub fn load(file: Option<&Path>) -> Result<SimApiConfig, ConfigError> {
        match file {
            Some(f) => {
                log::debug!("Reading config file {}", f.display());
                SimApiConfig::read(f)
            }
            None => match default_config_file() {
                Some(f) if f.exists() => {
                    log::debug!("Reading default config file {}", f.display());
                    SimApiConfig::read(&f)
                }
                _ => Ok(SimApiConfig::default()),
            },
        }
    }
}

pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("de", "lrz", "sim-api").map(|pp| pp.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_config() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("config.toml");
        std::fs::write(
            &target,
            "base_url = \"http://localhost:8080\"\ntimeout = 3\nnetrc = \"/tmp/netrc\"\n",
        )
        .unwrap();
        let cfg = SimApiConfig::load(Some(&target)).unwrap();
        assert_eq!(
            cfg,
            SimApiConfig {
                base_url: Some("http://localhost:8080".into()),
                timeout: Some(3),
                netrc: Some(PathBuf::from("/tmp/netrc")),
            }
        );
    }

    #[test]
    fn partial_config() {
        let cfg: SimApiConfig = toml::from_str("timeout = 30").unwrap();
        assert_eq!(cfg.timeout, Some(30));
        assert_eq!(cfg.base_url, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("config.toml");
        std::fs::write(&target, "base-url = \"x\"\n").unwrap();
        assert!(matches!(
            SimApiConfig::read(&target),
            Err(ConfigError::ParseFile { .. })
        ));
    }

    #[test]
    fn missing_explicit_file() {
        let err = SimApiConfig::load(Some(Path::new("/no/such/sim-api.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
