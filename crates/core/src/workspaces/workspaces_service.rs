use chrono::{Duration, Utc};
use log::{debug, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;

use super::workspaces_model::{
    InvitationStatus, NewWorkspace, NewWorkspaceInvitation, NewWorkspaceMember, Role, Workspace,
    WorkspaceInvitation, WorkspaceMember, WorkspaceMemberProfile, WorkspaceUpdate,
};
use super::workspaces_traits::{
    InvitationRepositoryTrait, WorkspaceRepositoryTrait, WorkspaceServiceTrait,
};
use crate::constants::INVITATION_TTL_DAYS;
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::{NotificationKind, NotificationServiceTrait};
use crate::users::UserRepositoryTrait;

/// Service for managing workspaces, members, and invitations.
pub struct WorkspaceService {
    repository: Arc<dyn WorkspaceRepositoryTrait>,
    invitations: Arc<dyn InvitationRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl WorkspaceService {
    pub fn new(
        repository: Arc<dyn WorkspaceRepositoryTrait>,
        invitations: Arc<dyn InvitationRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        notifications: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            repository,
            invitations,
            users,
            notifications,
        }
    }

    fn generate_invite_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect()
    }

    /// Notifies workspace admins that someone joined. Best-effort: a failed
    /// insert is logged and does not fail the join.
    async fn notify_admins_of_join(&self, workspace_id: &str, joined_name: &str) {
        let admins = match self.repository.list_members(workspace_id) {
            Ok(members) => members
                .into_iter()
                .filter(|m| m.role.is_admin())
                .map(|m| m.user_id)
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!("Could not list members for join notification: {e}");
                return;
            }
        };
        let _ = self
            .notifications
            .notify_many(
                &admins,
                workspace_id,
                NotificationKind::WorkspaceMemberJoined,
                "New workspace member",
                &format!("{joined_name} joined the workspace"),
            )
            .await;
    }
}

#[async_trait::async_trait]
impl WorkspaceServiceTrait for WorkspaceService {
    fn get_workspace(&self, workspace_id: &str) -> Result<Workspace> {
        self.repository.get_by_id(workspace_id)
    }

    fn list_workspaces_for_user(&self, user_id: &str) -> Result<Vec<Workspace>> {
        self.repository.list_for_user(user_id)
    }

    fn get_membership(&self, workspace_id: &str, user_id: &str) -> Result<WorkspaceMember> {
        self.repository.get_member(workspace_id, user_id)
    }

    /// Creates a workspace; the creator becomes its Owner.
    async fn create_workspace(
        &self,
        new_workspace: NewWorkspace,
        creator_id: &str,
    ) -> Result<Workspace> {
        if new_workspace.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        let workspace = self.repository.create(new_workspace, creator_id).await?;
        self.repository
            .insert_member(NewWorkspaceMember {
                workspace_id: workspace.id.clone(),
                user_id: creator_id.to_string(),
                role: Role::Owner,
            })
            .await?;
        debug!("Created workspace {} for {}", workspace.id, creator_id);
        Ok(workspace)
    }

    async fn update_workspace(&self, update: WorkspaceUpdate) -> Result<Workspace> {
        self.repository.update(update).await
    }

    async fn delete_workspace(&self, workspace_id: &str) -> Result<usize> {
        self.repository.delete(workspace_id).await
    }

    fn list_members(&self, workspace_id: &str) -> Result<Vec<WorkspaceMemberProfile>> {
        self.repository.list_members(workspace_id)
    }

    /// Changes a member's role. The last Owner can never be demoted.
    async fn change_member_role(
        &self,
        workspace_id: &str,
        member_id: &str,
        new_role: Role,
    ) -> Result<WorkspaceMember> {
        let member = self.repository.get_member_by_id(member_id)?;
        if member.workspace_id != workspace_id {
            return Err(Error::NotFound("Workspace member".to_string()));
        }
        if member.role == Role::Owner
            && new_role != Role::Owner
            && self.repository.count_owners(workspace_id)? <= 1
        {
            return Err(Error::Forbidden(
                "A workspace must keep at least one Owner".to_string(),
            ));
        }
        self.repository.update_member_role(member_id, new_role).await
    }

    async fn remove_member(
        &self,
        workspace_id: &str,
        member_id: &str,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<usize> {
        let member = self.repository.get_member_by_id(member_id)?;
        if member.workspace_id != workspace_id {
            return Err(Error::NotFound("Workspace member".to_string()));
        }
        let leaving = member.user_id == actor_id;
        if member.role == Role::Owner {
            // Owners only leave on their own, and never as the last Owner.
            if !leaving {
                return Err(Error::Forbidden("Owners cannot be removed".to_string()));
            }
            if self.repository.count_owners(workspace_id)? <= 1 {
                return Err(Error::Forbidden(
                    "The last Owner cannot leave the workspace".to_string(),
                ));
            }
        } else if !leaving && !actor_role.is_admin() {
            return Err(Error::Forbidden(
                "Only admins remove other members".to_string(),
            ));
        }
        self.repository.remove_member(member_id).await
    }

    /// Invites an email into the workspace. If the invitee already has an
    /// account they get an actionable notification carrying the invite token.
    async fn invite_member(
        &self,
        workspace_id: &str,
        email: &str,
        role: Role,
        invited_by: &str,
    ) -> Result<WorkspaceInvitation> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if let Some(user) = self.users.find_by_email(&email)? {
            if self.repository.get_member(workspace_id, &user.id).is_ok() {
                return Err(Error::ConstraintViolation(
                    "User is already a workspace member".to_string(),
                ));
            }
        }

        let invitation = self
            .invitations
            .insert(NewWorkspaceInvitation {
                workspace_id: workspace_id.to_string(),
                email: email.clone(),
                role,
                token: Self::generate_invite_token(),
                invited_by: invited_by.to_string(),
                expires_at: (Utc::now() + Duration::days(INVITATION_TTL_DAYS)).naive_utc(),
            })
            .await?;

        if let Some(user) = self.users.find_by_email(&email)? {
            let workspace = self.repository.get_by_id(workspace_id)?;
            if let Err(e) = self
                .notifications
                .notify_invitation(&user.id, workspace_id, &workspace.name, &invitation.token)
                .await
            {
                warn!("Invitation notification for {email} failed: {e}");
            }
        }
        Ok(invitation)
    }

    fn list_invitations(&self, workspace_id: &str) -> Result<Vec<WorkspaceInvitation>> {
        self.invitations.list_for_workspace(workspace_id)
    }

    async fn accept_invitation(&self, token: &str, user_id: &str) -> Result<WorkspaceMember> {
        let invitation = self.invitations.get_by_token(token)?;
        if invitation.status != InvitationStatus::Pending {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Invitation is no longer open".to_string(),
            )));
        }
        if invitation.expires_at < Utc::now().naive_utc() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Invitation has expired".to_string(),
            )));
        }
        let user = self.users.get_by_id(user_id)?;
        if user.email != invitation.email {
            return Err(Error::Forbidden(
                "Invitation was issued for a different email".to_string(),
            ));
        }
        if self
            .repository
            .get_member(&invitation.workspace_id, user_id)
            .is_ok()
        {
            return Err(Error::ConstraintViolation(
                "User is already a workspace member".to_string(),
            ));
        }

        let member = self
            .repository
            .insert_member(NewWorkspaceMember {
                workspace_id: invitation.workspace_id.clone(),
                user_id: user_id.to_string(),
                role: invitation.role,
            })
            .await?;
        self.invitations
            .set_status(&invitation.id, InvitationStatus::Accepted)
            .await?;
        self.notify_admins_of_join(&invitation.workspace_id, &user.name)
            .await;
        Ok(member)
    }

    async fn reject_invitation(&self, token: &str) -> Result<()> {
        let invitation = self.invitations.get_by_token(token)?;
        if invitation.status != InvitationStatus::Pending {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Invitation is no longer open".to_string(),
            )));
        }
        self.invitations
            .set_status(&invitation.id, InvitationStatus::Rejected)
            .await?;
        Ok(())
    }

    async fn revoke_invitation(&self, workspace_id: &str, invitation_id: &str) -> Result<()> {
        let invitation = self.invitations.get_by_id(invitation_id)?;
        if invitation.workspace_id != workspace_id {
            return Err(Error::NotFound("Invitation".to_string()));
        }
        self.invitations
            .set_status(invitation_id, InvitationStatus::Revoked)
            .await?;
        Ok(())
    }
}
