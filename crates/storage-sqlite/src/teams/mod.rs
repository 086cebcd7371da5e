mod model;
mod repository;

pub use model::{NewTeamDB, NewTeamMemberDB, TeamDB, TeamMemberDB};
pub use repository::TeamRepository;
