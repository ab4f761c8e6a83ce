use crate::controller::CompletionPolicy;
use crate::domain::CoercionPolicy;
use crate::prelude::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://covid19deathprediction-production.up.railway.app";

/// Client settings, usually loaded from YAML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub timeout_secs: Option<u64>,
    pub coercion: CoercionPolicy,
    pub completion: CompletionPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: None,
            coercion: CoercionPolicy::default(),
            completion: CompletionPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> ClientResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            ClientError::Config(format!("reading {}: {err}", path_ref.display()))
        })?;
        Self::from_yaml(&contents)
            .map_err(|err| ClientError::Config(format!("parsing {}: {err}", path_ref.display())))
    }

    pub fn from_yaml(contents: &str) -> ClientResult<Self> {
        serde_yaml::from_str(contents).map_err(|err| ClientError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_preserve_observed_behaviour() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, None);
        assert_eq!(cfg.coercion, CoercionPolicy::Permissive);
        assert_eq!(cfg.completion, CompletionPolicy::LastCompletion);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"base_url: http://127.0.0.1:9000\ncompletion: latest-dispatch\ncoercion: strict\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = ClientConfig::load(&path).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.completion, CompletionPolicy::LatestDispatch);
        assert_eq!(cfg.coercion, CoercionPolicy::Strict);
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = ClientConfig::from_yaml("completion: first-wins\n").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        assert!(matches!(
            ClientConfig::load("/nonexistent/client.yaml"),
            Err(ClientError::Config(_))
        ));
    }
}
