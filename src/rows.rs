use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Row types mirror the columns of the export tables verbatim. Every field
/// defaults to an empty string so a missing column degrades to "no data"
/// instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionRow {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub connected_on: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageRow {
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub conversation_title: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reaction_type: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareRow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub share_link: String,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub shared_url: String,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub visibility: String,
}

/// Present in every export but not consumed by any detector yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvitationRow {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub sent_at: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub direction: String,
}

/// All tables of one export, already materialized by the archive extraction
/// step, plus the resolved subject display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialExport {
    #[serde(default)]
    pub connections: Vec<ConnectionRow>,
    #[serde(default)]
    pub messages: Vec<MessageRow>,
    #[serde(default)]
    pub reactions: Vec<ReactionRow>,
    #[serde(default)]
    pub shares: Vec<ShareRow>,
    #[serde(default)]
    pub invitations: Vec<InvitationRow>,
    #[serde(default)]
    pub user_name: String,
}

/// Subject identity is the most frequent sender across the message table.
/// Ties resolve to the lexicographically smaller name; an empty table falls
/// back to `"User"`.
pub fn detect_user_name(messages: &[MessageRow]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for m in messages {
        if !m.from.is_empty() {
            *counts.entry(m.from.as_str()).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "User".to_string())
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),
    #[error("export is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_export(path: &Path) -> Result<SocialExport, ExportError> {
    let text = std::fs::read_to_string(path)?;
    Ok(finish_load(serde_json::from_str(&text)?))
}

pub fn read_export<R: Read>(reader: R) -> Result<SocialExport, ExportError> {
    Ok(finish_load(serde_json::from_reader(reader)?))
}

fn finish_load(mut export: SocialExport) -> SocialExport {
    if export.user_name.is_empty() {
        export.user_name = detect_user_name(&export.messages);
    }
    export
}
