use super::model::{CvBundle, CvData, Descriptions};
use crate::language::Language;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CV_DATA_FILE: &str = "cv-data.json";

pub fn descriptions_path(data_dir: &Path, language: Language) -> PathBuf {
    data_dir.join(format!("cv-descriptions-{}.json", language.code()))
}

/// Load the shared data file plus the descriptions for `language`.
pub fn load_cv(data_dir: &Path, language: Language) -> Result<CvBundle> {
    let data_path = data_dir.join(CV_DATA_FILE);
    let data: CvData = read_json(&data_path)?;
    let descriptions: Descriptions = read_json(&descriptions_path(data_dir, language))?;
    info!(
        dir = %data_dir.display(),
        %language,
        jobs = data.work_experience.len(),
        achievements = descriptions.key_achievements.len(),
        "Loaded CV content"
    );
    Ok(CvBundle {
        language,
        data,
        descriptions,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading CV file {}", path.display()))?;
    debug!(path = %path.display(), bytes = raw.len(), "Parsing CV file");
    serde_json::from_str(&raw).with_context(|| format!("Parsing CV file {}", path.display()))
}
