use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::teams::{
    NewTeam, NewTeamMember, Team, TeamMember, TeamRepositoryTrait, TeamUpdate,
};
use teamline_core::Result;

use super::model::{NewTeamDB, NewTeamMemberDB, TeamDB, TeamMemberDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{team_members, teams};

pub struct TeamRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl TeamRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        TeamRepository { pool, writer }
    }
}

#[async_trait]
impl TeamRepositoryTrait for TeamRepository {
    fn get_by_id(&self, team_id: &str) -> Result<Team> {
        let mut conn = get_connection(&self.pool)?;
        let team_db = teams::table
            .find(team_id)
            .first::<TeamDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Team::from(team_db))
    }

    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Team>> {
        let mut conn = get_connection(&self.pool)?;
        let teams_db = teams::table
            .filter(teams::workspace_id.eq(workspace_id))
            .order(teams::created_at.asc())
            .load::<TeamDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(teams_db.into_iter().map(Team::from).collect())
    }

    async fn insert(&self, new_team: NewTeam) -> Result<Team> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Team> {
                let now = Utc::now().naive_utc();
                let new_team_db = NewTeamDB {
                    id: new_team.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    workspace_id: new_team.workspace_id,
                    name: new_team.name,
                    description: new_team.description,
                    lead_id: new_team.lead_id,
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(teams::table)
                    .values(&new_team_db)
                    .returning(TeamDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Team::from(result_db))
            })
            .await
    }

    async fn update(&self, update: TeamUpdate) -> Result<Team> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Team> {
                let result_db = diesel::update(teams::table.find(update.id.clone()))
                    .set((
                        teams::name.eq(update.name.clone()),
                        teams::description.eq(update.description.clone()),
                        teams::lead_id.eq(update.lead_id.clone()),
                        teams::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(TeamDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Team::from(result_db))
            })
            .await
    }

    async fn delete(&self, team_id: &str) -> Result<usize> {
        let team_id = team_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id.clone())))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(diesel::delete(teams::table.find(team_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn list_members(&self, team_id: &str) -> Result<Vec<TeamMember>> {
        let mut conn = get_connection(&self.pool)?;
        let members_db = team_members::table
            .filter(team_members::team_id.eq(team_id))
            .order(team_members::added_at.asc())
            .load::<TeamMemberDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(members_db.into_iter().map(TeamMember::from).collect())
    }

    fn get_member(&self, team_id: &str, user_id: &str) -> Result<Option<TeamMember>> {
        let mut conn = get_connection(&self.pool)?;
        let member_db = team_members::table
            .filter(team_members::team_id.eq(team_id))
            .filter(team_members::user_id.eq(user_id))
            .first::<TeamMemberDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(member_db.map(TeamMember::from))
    }

    async fn insert_member(&self, new_member: NewTeamMember) -> Result<TeamMember> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TeamMember> {
                let new_member_db = NewTeamMemberDB {
                    id: Uuid::new_v4().to_string(),
                    team_id: new_member.team_id,
                    user_id: new_member.user_id,
                    added_at: Utc::now().naive_utc(),
                };
                let result_db = diesel::insert_into(team_members::table)
                    .values(&new_member_db)
                    .returning(TeamMemberDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(TeamMember::from(result_db))
            })
            .await
    }

    async fn remove_member(&self, team_id: &str, user_id: &str) -> Result<usize> {
        let team_id = team_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    team_members::table
                        .filter(team_members::team_id.eq(team_id))
                        .filter(team_members::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
