//! Document domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Strips anything that could escape the upload directory from a client
/// supplied file name. Path separators and parent references never survive.
pub fn sanitize_file_name(name: &str) -> String {
    // Only the final path component survives.
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(['.', ' ']).to_string();
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed
    }
}

/// Metadata row for an uploaded file. The bytes live on disk under
/// `<uploads_root>/<workspace_id>/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_path: String,
    pub project_id: Option<String>,
    pub uploaded_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for inserting document metadata
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub workspace_id: String,
    pub name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_path: String,
    pub project_id: Option<String>,
    pub uploaded_by: String,
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_name;

    #[test]
    fn strips_path_traversal() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_file_name("/absolute/path.txt"), "path.txt");
        assert_eq!(sanitize_file_name("a/b/../c.txt"), "c.txt");
    }

    #[test]
    fn keeps_ordinary_names() {
        assert_eq!(sanitize_file_name("Q3 report-final_v2.pdf"), "Q3 report-final_v2.pdf");
    }

    #[test]
    fn never_returns_empty() {
        assert_eq!(sanitize_file_name("...."), "file");
        assert_eq!(sanitize_file_name(""), "file");
    }
}
