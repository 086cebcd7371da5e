use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::workspaces::{
    InvitationRepositoryTrait, InvitationStatus, NewWorkspace, NewWorkspaceInvitation,
    NewWorkspaceMember, Role, Workspace, WorkspaceInvitation, WorkspaceMember,
    WorkspaceMemberProfile, WorkspaceRepositoryTrait, WorkspaceUpdate,
};
use teamline_core::Result;

use super::model::{
    NewWorkspaceDB, NewWorkspaceInvitationDB, NewWorkspaceMemberDB, WorkspaceDB,
    WorkspaceInvitationDB, WorkspaceMemberDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{users, workspace_invitations, workspace_members, workspaces};

pub struct WorkspaceRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl WorkspaceRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        WorkspaceRepository { pool, writer }
    }
}

#[async_trait]
impl WorkspaceRepositoryTrait for WorkspaceRepository {
    fn get_by_id(&self, workspace_id: &str) -> Result<Workspace> {
        let mut conn = get_connection(&self.pool)?;
        let workspace_db = workspaces::table
            .find(workspace_id)
            .first::<WorkspaceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Workspace::from(workspace_db))
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Workspace>> {
        let mut conn = get_connection(&self.pool)?;
        let workspaces_db = workspace_members::table
            .inner_join(workspaces::table)
            .filter(workspace_members::user_id.eq(user_id))
            .select(WorkspaceDB::as_select())
            .order(workspaces::created_at.asc())
            .load::<WorkspaceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(workspaces_db.into_iter().map(Workspace::from).collect())
    }

    async fn create(&self, new_workspace: NewWorkspace, created_by: &str) -> Result<Workspace> {
        let created_by = created_by.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Workspace> {
                let now = Utc::now().naive_utc();
                let new_workspace_db = NewWorkspaceDB {
                    id: new_workspace
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_workspace.name,
                    description: new_workspace.description,
                    created_by,
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(workspaces::table)
                    .values(&new_workspace_db)
                    .returning(WorkspaceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Workspace::from(result_db))
            })
            .await
    }

    async fn update(&self, update: WorkspaceUpdate) -> Result<Workspace> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Workspace> {
                let result_db = diesel::update(workspaces::table.find(update.id.clone()))
                    .set((
                        workspaces::name.eq(update.name.clone()),
                        workspaces::description.eq(update.description.clone()),
                        workspaces::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(WorkspaceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Workspace::from(result_db))
            })
            .await
    }

    async fn delete(&self, workspace_id: &str) -> Result<usize> {
        let workspace_id = workspace_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(workspaces::table.find(workspace_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_member(&self, workspace_id: &str, user_id: &str) -> Result<WorkspaceMember> {
        let mut conn = get_connection(&self.pool)?;
        let member_db = workspace_members::table
            .filter(workspace_members::workspace_id.eq(workspace_id))
            .filter(workspace_members::user_id.eq(user_id))
            .first::<WorkspaceMemberDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(WorkspaceMember::from(member_db))
    }

    fn get_member_by_id(&self, member_id: &str) -> Result<WorkspaceMember> {
        let mut conn = get_connection(&self.pool)?;
        let member_db = workspace_members::table
            .find(member_id)
            .first::<WorkspaceMemberDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(WorkspaceMember::from(member_db))
    }

    fn list_members(&self, workspace_id: &str) -> Result<Vec<WorkspaceMemberProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = workspace_members::table
            .inner_join(users::table)
            .filter(workspace_members::workspace_id.eq(workspace_id))
            .select((
                WorkspaceMemberDB::as_select(),
                users::name,
                users::email,
            ))
            .order(workspace_members::joined_at.asc())
            .load::<(WorkspaceMemberDB, String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(member_db, name, email)| {
                let member = WorkspaceMember::from(member_db);
                WorkspaceMemberProfile {
                    id: member.id,
                    workspace_id: member.workspace_id,
                    user_id: member.user_id,
                    role: member.role,
                    joined_at: member.joined_at,
                    name,
                    email,
                }
            })
            .collect())
    }

    fn count_owners(&self, workspace_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let count = workspace_members::table
            .filter(workspace_members::workspace_id.eq(workspace_id))
            .filter(workspace_members::role.eq(Role::Owner.as_str()))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(count)
    }

    async fn insert_member(&self, new_member: NewWorkspaceMember) -> Result<WorkspaceMember> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<WorkspaceMember> {
                    let new_member_db = NewWorkspaceMemberDB {
                        id: Uuid::new_v4().to_string(),
                        workspace_id: new_member.workspace_id,
                        user_id: new_member.user_id,
                        role: new_member.role.as_str().to_string(),
                        joined_at: Utc::now().naive_utc(),
                    };
                    let result_db = diesel::insert_into(workspace_members::table)
                        .values(&new_member_db)
                        .returning(WorkspaceMemberDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(WorkspaceMember::from(result_db))
                },
            )
            .await
    }

    async fn update_member_role(&self, member_id: &str, role: Role) -> Result<WorkspaceMember> {
        let member_id = member_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<WorkspaceMember> {
                    let result_db = diesel::update(workspace_members::table.find(member_id))
                        .set(workspace_members::role.eq(role.as_str()))
                        .returning(WorkspaceMemberDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(WorkspaceMember::from(result_db))
                },
            )
            .await
    }

    async fn remove_member(&self, member_id: &str) -> Result<usize> {
        let member_id = member_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(workspace_members::table.find(member_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

pub struct InvitationRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl InvitationRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        InvitationRepository { pool, writer }
    }
}

#[async_trait]
impl InvitationRepositoryTrait for InvitationRepository {
    fn get_by_id(&self, invitation_id: &str) -> Result<WorkspaceInvitation> {
        let mut conn = get_connection(&self.pool)?;
        let invitation_db = workspace_invitations::table
            .find(invitation_id)
            .first::<WorkspaceInvitationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(WorkspaceInvitation::from(invitation_db))
    }

    fn get_by_token(&self, token: &str) -> Result<WorkspaceInvitation> {
        let mut conn = get_connection(&self.pool)?;
        let invitation_db = workspace_invitations::table
            .filter(workspace_invitations::token.eq(token))
            .first::<WorkspaceInvitationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(WorkspaceInvitation::from(invitation_db))
    }

    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<WorkspaceInvitation>> {
        let mut conn = get_connection(&self.pool)?;
        let invitations_db = workspace_invitations::table
            .filter(workspace_invitations::workspace_id.eq(workspace_id))
            .order(workspace_invitations::created_at.desc())
            .load::<WorkspaceInvitationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(invitations_db
            .into_iter()
            .map(WorkspaceInvitation::from)
            .collect())
    }

    async fn insert(
        &self,
        new_invitation: NewWorkspaceInvitation,
    ) -> Result<WorkspaceInvitation> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<WorkspaceInvitation> {
                    let now = Utc::now().naive_utc();
                    let new_invitation_db = NewWorkspaceInvitationDB {
                        id: Uuid::new_v4().to_string(),
                        workspace_id: new_invitation.workspace_id,
                        email: new_invitation.email,
                        role: new_invitation.role.as_str().to_string(),
                        token: new_invitation.token,
                        invited_by: new_invitation.invited_by,
                        status: InvitationStatus::Pending.as_str().to_string(),
                        expires_at: new_invitation.expires_at,
                        created_at: now,
                        updated_at: now,
                    };
                    let result_db = diesel::insert_into(workspace_invitations::table)
                        .values(&new_invitation_db)
                        .returning(WorkspaceInvitationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(WorkspaceInvitation::from(result_db))
                },
            )
            .await
    }

    async fn set_status(
        &self,
        invitation_id: &str,
        status: InvitationStatus,
    ) -> Result<WorkspaceInvitation> {
        let invitation_id = invitation_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<WorkspaceInvitation> {
                    let result_db =
                        diesel::update(workspace_invitations::table.find(invitation_id))
                            .set((
                                workspace_invitations::status.eq(status.as_str()),
                                workspace_invitations::updated_at.eq(Utc::now().naive_utc()),
                            ))
                            .returning(WorkspaceInvitationDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                    Ok(WorkspaceInvitation::from(result_db))
                },
            )
            .await
    }
}
