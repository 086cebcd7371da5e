//! Target domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle state of a target.
///
/// The stored value is a cache: `active`/`completed`/`failed` are derived
/// from the numbers and the deadline on every read, and only `cancelled`
/// is authoritative (manual, never auto-derived).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    #[default]
    Active,
    Completed,
    Failed,
    Cancelled,
}

impl TargetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetStatus::Active => "active",
            TargetStatus::Completed => "completed",
            TargetStatus::Failed => "failed",
            TargetStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<TargetStatus> {
        match s {
            "active" => Ok(TargetStatus::Active),
            "completed" => Ok(TargetStatus::Completed),
            "failed" => Ok(TargetStatus::Failed),
            "cancelled" => Ok(TargetStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown target status '{other}'"
            )))),
        }
    }
}

/// Domain model representing a measurable goal assigned to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: String,
    pub project_id: Option<String>,
    pub created_by: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub deadline: NaiveDateTime,
    pub status: TargetStatus,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new target
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTarget {
    pub id: Option<String>,
    #[serde(default)]
    pub workspace_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: String,
    pub project_id: Option<String>,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    pub unit: String,
    pub deadline: NaiveDateTime,
}

/// Input model for an admin edit of a target. The whole row is replaced;
/// `status` is only honored as a manual override (e.g. cancellation).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TargetUpdate {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: String,
    pub project_id: Option<String>,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub deadline: NaiveDateTime,
    pub status: Option<TargetStatus>,
}
