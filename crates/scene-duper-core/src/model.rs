use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque scene identifier as issued by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(value: &str) -> Self {
        SceneId(value.to_string())
    }
}

/// A typed content identity value computed over a file's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Fingerprint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
}

/// One physical file attached to a scene.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub fingerprints: Vec<Fingerprint>,
}

impl FileRecord {
    /// First fingerprint of the given type, if any.
    pub fn fingerprint(&self, kind: &str) -> Option<&Fingerprint> {
        self.fingerprints.iter().find(|fp| fp.kind == kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScenePaths {
    #[serde(default)]
    pub screenshot: Option<String>,
}

/// Link to a scene in an external metadata database. Passed through only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExternalId {
    pub endpoint: String,
    pub stash_id: String,
}

/// A catalog entry describing one piece of media.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneRecord {
    pub id: SceneId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
    #[serde(default)]
    pub paths: ScenePaths,
    #[serde(default)]
    pub stash_ids: Vec<ExternalId>,
}

impl SceneRecord {
    /// Title if present and non-empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn primary_file_size(&self) -> Option<u64> {
        self.files.first().map(|f| f.size)
    }
}

// phash values come back as numbers, hashes as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number fingerprint value, got {}",
            other
        ))),
    }
}
