//! Remembered viewer preferences per data directory.
//!
//! Files are stored under `.cache/` using a hash of the data directory as the
//! directory name to avoid filesystem issues. The format is a tiny TOML file.

use crate::config::ThemeMode;
use crate::language::Language;
use crate::theme::Template;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub theme: ThemeMode,
    pub template: Template,
    pub intro_seen: bool,
}

impl Preferences {
    /// Preferences as they should apply at launch.
    pub fn for_launch(self) -> Self {
        Self {
            template: self.template.restorable(),
            ..self
        }
    }
}

fn hash_dir(root: &Path, data_dir: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(data_dir.as_os_str().to_string_lossy().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    root.join(hash)
}

fn prefs_path(root: &Path, data_dir: &Path) -> PathBuf {
    hash_dir(root, data_dir).join("prefs.toml")
}

/// Load saved preferences, if present and readable.
pub fn load_preferences(data_dir: &Path) -> Option<Preferences> {
    load_preferences_in(Path::new(CACHE_DIR), data_dir)
}

/// Persist preferences. Errors are logged and ignored to keep the UI
/// responsive.
pub fn save_preferences(data_dir: &Path, prefs: &Preferences) {
    save_preferences_in(Path::new(CACHE_DIR), data_dir, prefs)
}

fn load_preferences_in(root: &Path, data_dir: &Path) -> Option<Preferences> {
    let path = prefs_path(root, data_dir);
    let data = fs::read_to_string(&path).ok()?;
    match toml::from_str(&data) {
        Ok(prefs) => Some(prefs),
        Err(err) => {
            warn!(path = %path.display(), "Ignoring unreadable preferences: {err}");
            None
        }
    }
}

fn save_preferences_in(root: &Path, data_dir: &Path, prefs: &Preferences) {
    let path = prefs_path(root, data_dir);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match toml::to_string(prefs) {
        Ok(contents) => match fs::File::create(&path) {
            Ok(mut file) => {
                if let Err(err) = file.write_all(contents.as_bytes()) {
                    warn!(path = %path.display(), "Failed to write preferences: {err}");
                } else {
                    debug!(path = %path.display(), "Saved preferences");
                }
            }
            Err(err) => warn!(path = %path.display(), "Failed to create preferences: {err}"),
        },
        Err(err) => warn!("Failed to serialize preferences: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("holocrawl-cache-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        root
    }

    #[test]
    fn preferences_persist_per_data_dir() {
        let root = scratch_root("persist");
        let prefs = Preferences {
            language: Some(Language::Pt),
            theme: ThemeMode::Day,
            template: Template::AtsFriendly,
            intro_seen: true,
        };
        save_preferences_in(&root, Path::new("data/a"), &prefs);

        assert_eq!(load_preferences_in(&root, Path::new("data/a")), Some(prefs));
        assert_eq!(load_preferences_in(&root, Path::new("data/b")), None);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn saved_crawl_template_starts_standard() {
        let prefs = Preferences {
            template: Template::StarWars,
            intro_seen: true,
            ..Preferences::default()
        };
        let launch = prefs.for_launch();
        assert_eq!(launch.template, Template::Standard);
        assert!(launch.intro_seen);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let prefs: Preferences = toml::from_str("intro_seen = true\n").unwrap();
        assert!(prefs.intro_seen);
        assert_eq!(prefs.language, None);
        assert_eq!(prefs.template, Template::Standard);
    }
}
