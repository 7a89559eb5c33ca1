use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A document as reported by the knowledge service. The page keeps a
/// read-only copy of the current listing page, replaced wholesale on every
/// successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub doc_name: String,
    /// Free-form label from the backend; TEXT / URL / DOCUMENT in practice.
    pub doc_type: String,
    #[serde(default)]
    pub chunk_size: u64,
    #[serde(default)]
    pub last_sync: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub result: Option<String>,
}

/// Ingestion pipeline state for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Todo,
    Running,
    Finished,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Todo => "TODO",
            DocumentStatus::Running => "RUNNING",
            DocumentStatus::Finished => "FINISHED",
            DocumentStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chip color for a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Neutral,
    Primary,
    Success,
    Danger,
}

impl StatusColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusColor::Neutral => "chip-neutral",
            StatusColor::Primary => "chip-primary",
            StatusColor::Success => "chip-success",
            StatusColor::Danger => "chip-danger",
        }
    }
}

/// Status-to-color mapping for the listing table.
pub fn color_for(status: DocumentStatus) -> StatusColor {
    match status {
        DocumentStatus::Todo => StatusColor::Neutral,
        DocumentStatus::Running => StatusColor::Primary,
        DocumentStatus::Finished => StatusColor::Success,
        DocumentStatus::Failed => StatusColor::Danger,
    }
}

/// Result cell content: nothing while the pipeline has not finished, a
/// hoverable badge carrying the raw result text afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBadge {
    Hidden,
    Success(String),
    Failed(String),
}

pub fn result_badge(status: DocumentStatus, result: Option<&str>) -> ResultBadge {
    let detail = result.unwrap_or("").to_string();
    match status {
        DocumentStatus::Todo | DocumentStatus::Running => ResultBadge::Hidden,
        DocumentStatus::Finished => ResultBadge::Success(detail),
        DocumentStatus::Failed => ResultBadge::Failed(detail),
    }
}

/// Render a backend timestamp as `YYYY-MM-DD HH:MM:SS`. The backend is not
/// consistent about fractional seconds or timezone suffixes, so a few shapes
/// are attempted; anything unparseable renders as received.
pub fn format_last_sync(raw: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(OUT).to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_colors_follow_the_fixed_mapping() {
        assert_eq!(color_for(DocumentStatus::Todo), StatusColor::Neutral);
        assert_eq!(color_for(DocumentStatus::Running), StatusColor::Primary);
        assert_eq!(color_for(DocumentStatus::Finished), StatusColor::Success);
        assert_eq!(color_for(DocumentStatus::Failed), StatusColor::Danger);
    }

    #[test]
    fn result_badge_hidden_while_pending() {
        assert_eq!(
            result_badge(DocumentStatus::Todo, Some("ignored")),
            ResultBadge::Hidden
        );
        assert_eq!(result_badge(DocumentStatus::Running, None), ResultBadge::Hidden);
    }

    #[test]
    fn result_badge_carries_raw_result_text() {
        assert_eq!(
            result_badge(DocumentStatus::Finished, Some("36 chunks indexed")),
            ResultBadge::Success("36 chunks indexed".to_string())
        );
        assert_eq!(
            result_badge(DocumentStatus::Failed, Some("parse error")),
            ResultBadge::Failed("parse error".to_string())
        );
        assert_eq!(
            result_badge(DocumentStatus::Failed, None),
            ResultBadge::Failed(String::new())
        );
    }

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&DocumentStatus::Finished).unwrap();
        assert_eq!(json, "\"FINISHED\"");
        let back: DocumentStatus = serde_json::from_str("\"RUNNING\"").unwrap();
        assert_eq!(back, DocumentStatus::Running);
    }

    #[test]
    fn last_sync_formats_common_backend_shapes() {
        assert_eq!(
            format_last_sync("2026-07-12T10:03:09"),
            "2026-07-12 10:03:09"
        );
        assert_eq!(
            format_last_sync("2026-07-12T10:03:09.123456"),
            "2026-07-12 10:03:09"
        );
        assert_eq!(
            format_last_sync("2026-07-12T10:03:09+00:00"),
            "2026-07-12 10:03:09"
        );
    }

    #[test]
    fn last_sync_falls_back_to_raw_text() {
        assert_eq!(format_last_sync("not a date"), "not a date");
        assert_eq!(format_last_sync(""), "");
    }
}
