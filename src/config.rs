//! Runtime configuration read from the environment (after `.env` is loaded).

use std::path::PathBuf;

pub const DEFAULT_EXEMPTION_FILE: &str = "exemption.json";
pub const DEFAULT_LOG_FILE: &str = "logs/gpa_calculator.log";

/// Paths the binary needs before it starts prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `GPA_EXEMPTION_FILE`
    pub exemption_file: PathBuf,
    /// `LOG_FILE_PATH`
    pub log_file_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            exemption_file: get("GPA_EXEMPTION_FILE", DEFAULT_EXEMPTION_FILE),
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE),
        }
    }

    pub fn with_exemption_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.exemption_file = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.exemption_file, PathBuf::from("exemption.json"));
        assert_eq!(config.log_file_path, PathBuf::from("logs/gpa_calculator.log"));
    }

    #[test]
    fn test_lookup_values_and_blank_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GPA_EXEMPTION_FILE", "/home/me/.gpa/exemption.json"),
            ("LOG_FILE_PATH", "  "),
        ]);
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(
            config.exemption_file,
            PathBuf::from("/home/me/.gpa/exemption.json")
        );
        assert_eq!(config.log_file_path, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_cli_override() {
        let config = AppConfig::from_lookup(|_| None)
            .with_exemption_file(Some(PathBuf::from("custom.json")))
            .with_exemption_file(None);
        assert_eq!(config.exemption_file, PathBuf::from("custom.json"));
    }
}
