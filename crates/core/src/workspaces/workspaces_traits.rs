use async_trait::async_trait;

use super::workspaces_model::{
    InvitationStatus, NewWorkspace, NewWorkspaceInvitation, NewWorkspaceMember, Role, Workspace,
    WorkspaceInvitation, WorkspaceMember, WorkspaceMemberProfile, WorkspaceUpdate,
};
use crate::errors::Result;

/// Trait for workspace and membership repository operations
#[async_trait]
pub trait WorkspaceRepositoryTrait: Send + Sync {
    fn get_by_id(&self, workspace_id: &str) -> Result<Workspace>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Workspace>>;
    async fn create(&self, new_workspace: NewWorkspace, created_by: &str) -> Result<Workspace>;
    async fn update(&self, update: WorkspaceUpdate) -> Result<Workspace>;
    async fn delete(&self, workspace_id: &str) -> Result<usize>;

    fn get_member(&self, workspace_id: &str, user_id: &str) -> Result<WorkspaceMember>;
    fn get_member_by_id(&self, member_id: &str) -> Result<WorkspaceMember>;
    fn list_members(&self, workspace_id: &str) -> Result<Vec<WorkspaceMemberProfile>>;
    fn count_owners(&self, workspace_id: &str) -> Result<i64>;
    async fn insert_member(&self, new_member: NewWorkspaceMember) -> Result<WorkspaceMember>;
    async fn update_member_role(&self, member_id: &str, role: Role) -> Result<WorkspaceMember>;
    async fn remove_member(&self, member_id: &str) -> Result<usize>;
}

/// Trait for workspace invitation repository operations
#[async_trait]
pub trait InvitationRepositoryTrait: Send + Sync {
    fn get_by_id(&self, invitation_id: &str) -> Result<WorkspaceInvitation>;
    fn get_by_token(&self, token: &str) -> Result<WorkspaceInvitation>;
    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<WorkspaceInvitation>>;
    async fn insert(&self, new_invitation: NewWorkspaceInvitation) -> Result<WorkspaceInvitation>;
    async fn set_status(
        &self,
        invitation_id: &str,
        status: InvitationStatus,
    ) -> Result<WorkspaceInvitation>;
}

/// Trait for workspace service operations
#[async_trait]
pub trait WorkspaceServiceTrait: Send + Sync {
    fn get_workspace(&self, workspace_id: &str) -> Result<Workspace>;
    fn list_workspaces_for_user(&self, user_id: &str) -> Result<Vec<Workspace>>;
    fn get_membership(&self, workspace_id: &str, user_id: &str) -> Result<WorkspaceMember>;
    async fn create_workspace(
        &self,
        new_workspace: NewWorkspace,
        creator_id: &str,
    ) -> Result<Workspace>;
    async fn update_workspace(&self, update: WorkspaceUpdate) -> Result<Workspace>;
    async fn delete_workspace(&self, workspace_id: &str) -> Result<usize>;

    fn list_members(&self, workspace_id: &str) -> Result<Vec<WorkspaceMemberProfile>>;
    async fn change_member_role(
        &self,
        workspace_id: &str,
        member_id: &str,
        new_role: Role,
    ) -> Result<WorkspaceMember>;
    async fn remove_member(
        &self,
        workspace_id: &str,
        member_id: &str,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<usize>;

    async fn invite_member(
        &self,
        workspace_id: &str,
        email: &str,
        role: Role,
        invited_by: &str,
    ) -> Result<WorkspaceInvitation>;
    fn list_invitations(&self, workspace_id: &str) -> Result<Vec<WorkspaceInvitation>>;
    async fn accept_invitation(&self, token: &str, user_id: &str) -> Result<WorkspaceMember>;
    async fn reject_invitation(&self, token: &str) -> Result<()>;
    async fn revoke_invitation(&self, workspace_id: &str, invitation_id: &str) -> Result<()>;
}
