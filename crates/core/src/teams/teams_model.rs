//! Team domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A named group of workspace members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub lead_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new team
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTeam {
    pub id: Option<String>,
    #[serde(default)]
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub lead_id: Option<String>,
}

/// Input model for updating a team
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub lead_id: Option<String>,
}

/// Membership of a user in a team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub added_at: NaiveDateTime,
}

/// Input model for adding a team member
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    pub team_id: String,
    pub user_id: String,
}
