//! Database models for teams.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::teams::{Team, TeamMember};

/// Database model for teams
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TeamDB {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub lead_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new team
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::teams)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamDB {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub lead_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for team members
#[derive(
    Queryable, Identifiable, Selectable, Associations, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(belongs_to(TeamDB, foreign_key = team_id))]
#[diesel(table_name = crate::schema::team_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDB {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub added_at: NaiveDateTime,
}

/// Database model for adding a team member
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::team_members)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMemberDB {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub added_at: NaiveDateTime,
}

impl From<TeamDB> for Team {
    fn from(db: TeamDB) -> Self {
        Self {
            id: db.id,
            workspace_id: db.workspace_id,
            name: db.name,
            description: db.description,
            lead_id: db.lead_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<TeamMemberDB> for TeamMember {
    fn from(db: TeamMemberDB) -> Self {
        Self {
            id: db.id,
            team_id: db.team_id,
            user_id: db.user_id,
            added_at: db.added_at,
        }
    }
}
