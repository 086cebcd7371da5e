use async_trait::async_trait;

use super::teams_model::{NewTeam, NewTeamMember, Team, TeamMember, TeamUpdate};
use crate::errors::Result;

/// Trait for team repository operations
#[async_trait]
pub trait TeamRepositoryTrait: Send + Sync {
    fn get_by_id(&self, team_id: &str) -> Result<Team>;
    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Team>>;
    async fn insert(&self, new_team: NewTeam) -> Result<Team>;
    async fn update(&self, update: TeamUpdate) -> Result<Team>;
    async fn delete(&self, team_id: &str) -> Result<usize>;

    fn list_members(&self, team_id: &str) -> Result<Vec<TeamMember>>;
    fn get_member(&self, team_id: &str, user_id: &str) -> Result<Option<TeamMember>>;
    async fn insert_member(&self, new_member: NewTeamMember) -> Result<TeamMember>;
    async fn remove_member(&self, team_id: &str, user_id: &str) -> Result<usize>;
}

/// Trait for team service operations
#[async_trait]
pub trait TeamServiceTrait: Send + Sync {
    fn get_team(&self, workspace_id: &str, team_id: &str) -> Result<Team>;
    fn list_teams(&self, workspace_id: &str) -> Result<Vec<Team>>;
    async fn create_team(&self, new_team: NewTeam) -> Result<Team>;
    async fn update_team(&self, workspace_id: &str, update: TeamUpdate) -> Result<Team>;
    async fn delete_team(&self, workspace_id: &str, team_id: &str) -> Result<usize>;

    fn list_team_members(&self, workspace_id: &str, team_id: &str) -> Result<Vec<TeamMember>>;
    async fn add_team_member(
        &self,
        workspace_id: &str,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember>;
    async fn remove_team_member(
        &self,
        workspace_id: &str,
        team_id: &str,
        user_id: &str,
    ) -> Result<usize>;
}
