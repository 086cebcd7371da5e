mod model;
mod repository;

pub use model::{
    NewWorkspaceDB, NewWorkspaceInvitationDB, NewWorkspaceMemberDB, WorkspaceDB,
    WorkspaceInvitationDB, WorkspaceMemberDB,
};
pub use repository::{InvitationRepository, WorkspaceRepository};
