use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const API_BASE_VAR: &str = "OPENAI_BASE_URL";
pub const CI_VAR: &str = "GITHUB_ACTIONS";

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const MODEL: &str = "gpt-4-turbo-preview";
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path, api_key_flag: Option<&str>) -> AppResult<Self> {
        Self::from_lookup(workspace_hint, api_key_flag, |name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup instead of
    /// the process environment.
    pub fn from_lookup<F>(
        workspace_hint: &Path,
        api_key_flag: Option<&str>,
        lookup: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = resolve_api_key(api_key_flag, &lookup)?;
        let api_base = non_empty(lookup(API_BASE_VAR))
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            model: MODEL.to_string(),
            temperature: TEMPERATURE,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }
}

/// Resolves the API key: the command-line flag wins, then the CI secret when
/// running under GitHub Actions, then the local environment (including `.env`).
pub fn resolve_api_key<F>(flag: Option<&str>, lookup: F) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = flag.filter(|key| !key.is_empty()) {
        return Ok(key.to_string());
    }

    let env_key = non_empty(lookup(API_KEY_VAR));

    if lookup(CI_VAR).as_deref() == Some("true") {
        return env_key.ok_or_else(|| {
            AppError::Configuration(format!(
                "{API_KEY_VAR} not found in GitHub Actions secrets. Please add it to your repository secrets."
            ))
        });
    }

    env_key.ok_or_else(|| {
        AppError::Configuration(format!(
            "{API_KEY_VAR} not found. Please provide it via --api-key option or set it in .env file"
        ))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn flag_wins_over_environment() {
        let env = lookup(&[(API_KEY_VAR, "from-env"), (CI_VAR, "true")]);
        let key = resolve_api_key(Some("from-flag"), env).unwrap();
        assert_eq!(key, "from-flag");
    }

    #[test]
    fn empty_flag_falls_through() {
        let env = lookup(&[(API_KEY_VAR, "from-env")]);
        let key = resolve_api_key(Some(""), env).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn ci_uses_environment_secret() {
        let env = lookup(&[(API_KEY_VAR, "secret"), (CI_VAR, "true")]);
        assert_eq!(resolve_api_key(None, env).unwrap(), "secret");
    }

    #[test]
    fn ci_without_secret_reports_actions_error() {
        let env = lookup(&[(CI_VAR, "true")]);
        let err = resolve_api_key(None, env).unwrap_err();
        match err {
            AppError::Configuration(message) => {
                assert!(message.contains("GitHub Actions secrets"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn local_without_key_reports_generic_error() {
        let env = lookup(&[(CI_VAR, "false")]);
        let err = resolve_api_key(None, env).unwrap_err();
        match err {
            AppError::Configuration(message) => {
                assert!(message.contains("--api-key"), "{message}");
                assert!(!message.contains("GitHub Actions"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_environment_key_is_missing() {
        let env = lookup(&[(API_KEY_VAR, "")]);
        assert!(resolve_api_key(None, env).is_err());
    }

    #[test]
    fn loads_defaults_and_trims_base_url() {
        let cfg = AppConfig::from_lookup(Path::new("/repo"), Some("k"), lookup(&[])).unwrap();
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.model, MODEL);
        assert_eq!(cfg.workspace_root, PathBuf::from("/repo"));

        let cfg = AppConfig::from_lookup(
            Path::new("/repo"),
            Some("k"),
            lookup(&[(API_BASE_VAR, "http://localhost:8080/v1/")]),
        )
        .unwrap();
        assert_eq!(cfg.api_base, "http://localhost:8080/v1");
    }
}
