//! History domain types

use serde::{Deserialize, Deserializer, Serialize};

use super::job::JobStatus;

/// One past or current job as listed by `GET /videos/mine`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Opaque identifier; the service may send it as a number or a string
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    /// Display label
    pub topic: String,
    pub status: JobStatus,
    #[serde(default)]
    pub video_url: Option<String>,
}

fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
