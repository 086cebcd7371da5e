use log::warn;
use std::sync::Arc;

use super::teams_model::{NewTeam, NewTeamMember, Team, TeamMember, TeamUpdate};
use super::teams_traits::{TeamRepositoryTrait, TeamServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::{NewNotification, NotificationKind, NotificationServiceTrait};
use crate::workspaces::WorkspaceRepositoryTrait;

/// Service for managing teams and team membership.
pub struct TeamService {
    repository: Arc<dyn TeamRepositoryTrait>,
    workspaces: Arc<dyn WorkspaceRepositoryTrait>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl TeamService {
    pub fn new(
        repository: Arc<dyn TeamRepositoryTrait>,
        workspaces: Arc<dyn WorkspaceRepositoryTrait>,
        notifications: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            repository,
            workspaces,
            notifications,
        }
    }

    fn scoped(&self, workspace_id: &str, team_id: &str) -> Result<Team> {
        let team = self.repository.get_by_id(team_id)?;
        if team.workspace_id != workspace_id {
            return Err(Error::NotFound("Team".to_string()));
        }
        Ok(team)
    }
}

#[async_trait::async_trait]
impl TeamServiceTrait for TeamService {
    fn get_team(&self, workspace_id: &str, team_id: &str) -> Result<Team> {
        self.scoped(workspace_id, team_id)
    }

    fn list_teams(&self, workspace_id: &str) -> Result<Vec<Team>> {
        self.repository.list_for_workspace(workspace_id)
    }

    async fn create_team(&self, new_team: NewTeam) -> Result<Team> {
        if new_team.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        self.repository.insert(new_team).await
    }

    async fn update_team(&self, workspace_id: &str, update: TeamUpdate) -> Result<Team> {
        self.scoped(workspace_id, &update.id)?;
        self.repository.update(update).await
    }

    async fn delete_team(&self, workspace_id: &str, team_id: &str) -> Result<usize> {
        self.scoped(workspace_id, team_id)?;
        self.repository.delete(team_id).await
    }

    fn list_team_members(&self, workspace_id: &str, team_id: &str) -> Result<Vec<TeamMember>> {
        self.scoped(workspace_id, team_id)?;
        self.repository.list_members(team_id)
    }

    /// Adds a workspace member to a team. The new member gets an
    /// `AddedToTeam` notification; existing members get a `TeamMemberAdded`
    /// fan-out. Both are best-effort.
    async fn add_team_member(
        &self,
        workspace_id: &str,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember> {
        let team = self.scoped(workspace_id, team_id)?;
        // Team membership implies workspace membership.
        self.workspaces
            .get_member(workspace_id, user_id)
            .map_err(|_| Error::NotFound("Workspace member".to_string()))?;
        if self.repository.get_member(team_id, user_id)?.is_some() {
            return Err(Error::ConstraintViolation(
                "User is already a team member".to_string(),
            ));
        }

        let existing: Vec<String> = self
            .repository
            .list_members(team_id)?
            .into_iter()
            .map(|m| m.user_id)
            .collect();

        let member = self
            .repository
            .insert_member(NewTeamMember {
                team_id: team_id.to_string(),
                user_id: user_id.to_string(),
            })
            .await?;

        if let Err(e) = self
            .notifications
            .notify(NewNotification {
                user_id: user_id.to_string(),
                workspace_id: workspace_id.to_string(),
                kind: NotificationKind::AddedToTeam,
                title: "Added to team".to_string(),
                body: format!("You were added to {}", team.name),
                requires_action: false,
                invite_token: None,
            })
            .await
        {
            warn!("AddedToTeam notification for {user_id} failed: {e}");
        }
        let _ = self
            .notifications
            .notify_many(
                &existing,
                workspace_id,
                NotificationKind::TeamMemberAdded,
                "New team member",
                &format!("A new member joined {}", team.name),
            )
            .await;

        Ok(member)
    }

    async fn remove_team_member(
        &self,
        workspace_id: &str,
        team_id: &str,
        user_id: &str,
    ) -> Result<usize> {
        self.scoped(workspace_id, team_id)?;
        self.repository.remove_member(team_id, user_id).await
    }
}
