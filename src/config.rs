use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::InternalResult;

/// Engine settings.
///
/// ```
/// # use tripwire::config::EngineConfig;
/// let config = EngineConfig::from_json(r#"{ "specialization": false }"#).unwrap();
/// assert!(!config.specialization);
/// assert_eq!(config.subject_name, "self");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Try the specializing compiler before falling back to parse + evaluate.
    #[serde(default = "default_true")]
    pub specialization: bool,

    /// Identifier bound to the per-call subject.
    #[serde(default = "default_subject_name")]
    pub subject_name: String,

    /// Keep failed parses in the parse cache so malformed text is
    /// tokenized and reported only once.
    #[serde(default = "default_true")]
    pub memoize_parse_failures: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            specialization: default_true(),
            subject_name: default_subject_name(),
            memoize_parse_failures: default_true(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(s: &str) -> InternalResult<Self> {
        from_str(s)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)?;
    Ok(config)
}

// デフォルト値の定義
fn default_true() -> bool {
    true
}

fn default_subject_name() -> String {
    "self".to_string()
}
