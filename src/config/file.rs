use crate::utils::error::{PostgenError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML configuration file.
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 3001
///
/// [provider]
/// api_key = "${OPENAI_API_KEY}"
/// model = "gpt-4o"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub provider: ProviderSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| PostgenError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the value of the environment variable. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PostgenError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_file() {
        let config = FileConfig::from_toml_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[provider]
api_key = "sk-file"
api_base = "http://localhost:11434/v1"
model = "gpt-4o-mini"
timeout_seconds = 30
"#,
        )
        .unwrap();

        assert_eq!(config.server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.server.port, Some(8080));
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.provider.timeout_seconds, Some(30));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = FileConfig::from_toml_str("[server]\nport = 4000\n").unwrap();
        assert_eq!(config.server.port, Some(4000));
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("POSTGEN_TEST_FILE_KEY", "sk-from-env");
        let config = FileConfig::from_toml_str(
            "[provider]\napi_key = \"${POSTGEN_TEST_FILE_KEY}\"\nmodel = \"${POSTGEN_TEST_UNSET_VAR}\"\n",
        )
        .unwrap();

        assert_eq!(config.provider.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(
            config.provider.model.as_deref(),
            Some("${POSTGEN_TEST_UNSET_VAR}")
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = FileConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, PostgenError::Config { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\nmodel = \"gpt-4o\"").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FileConfig::from_file("/nonexistent/postgen.toml").unwrap_err();
        assert!(matches!(err, PostgenError::Io(_)));
    }
}
