use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::edit::normalize_code;

/// Used when no saved list can be read: English preparatory (`TRS`),
/// Vovinam (`VOV`) and military education (`GDQ`) courses.
pub const DEFAULT_EXEMPTIONS: [&str; 3] = ["TRS", "VOV", "GDQ"];

pub fn default_exemptions() -> Vec<String> {
    DEFAULT_EXEMPTIONS.iter().map(|s| s.to_string()).collect()
}

/// On-disk layout:
/// ```json
/// { "exemption_subjects": ["TRS", "VOV", "GDQ"] }
/// ```
#[derive(Serialize, Deserialize)]
struct Preferences {
    exemption_subjects: Vec<String>,
}

/// Reads and writes the exemption list at a fixed path.
#[derive(Debug, Clone)]
pub struct ExemptionStore {
    path: PathBuf,
}

impl ExemptionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved list, falling back to [`DEFAULT_EXEMPTIONS`] when the
    /// file is missing or cannot be parsed.
    ///
    /// Entries are reduced to stored code form; blank and duplicate entries
    /// are dropped.
    pub fn load(&self) -> Vec<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No saved exemptions, using defaults");
                return default_exemptions();
            }
        };

        match serde_json::from_str::<Preferences>(&content) {
            Ok(prefs) => {
                let mut subjects = Vec::with_capacity(prefs.exemption_subjects.len());
                for entry in &prefs.exemption_subjects {
                    match normalize_code(entry) {
                        Ok(code) if !subjects.contains(&code) => subjects.push(code),
                        Ok(_) => {}
                        Err(e) => warn!(entry = %entry, error = %e, "Skipping exemption entry"),
                    }
                }
                debug!(count = subjects.len(), "Loaded exemptions");
                subjects
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed exemption file, using defaults");
                default_exemptions()
            }
        }
    }

    /// Overwrites the file with `subjects`, creating parent directories.
    pub fn save(&self, subjects: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create exemption directory")?;
        }

        let prefs = Preferences {
            exemption_subjects: subjects.to_vec(),
        };
        let json = serde_json::to_string_pretty(&prefs)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!(path = %self.path.display(), count = subjects.len(), "Saved exemptions");
        Ok(())
    }
}
