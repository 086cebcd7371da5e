use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::{Argon2PasswordHasher, SessionManager};
use crate::config::Config;
use teamline_core::{
    attendance::{AttendanceService, AttendanceServiceTrait},
    auth::{VerificationService, VerificationServiceTrait},
    documents::{DocumentService, DocumentServiceTrait},
    export::{ReportService, ReportServiceTrait},
    mailer::{LogMailer, Mailer},
    notifications::{NotificationService, NotificationServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
    targets::{TargetService, TargetServiceTrait},
    tasks::{TaskService, TaskServiceTrait},
    teams::{TeamService, TeamServiceTrait},
    users::{UserRepositoryTrait, UserService, UserServiceTrait},
    workspaces::{WorkspaceService, WorkspaceServiceTrait},
};
use teamline_storage_sqlite::{
    attendance::AttendanceRepository, auth::VerificationCodeRepository, db,
    documents::DocumentRepository, notifications::NotificationRepository,
    projects::ProjectRepository, targets::TargetRepository, tasks::TaskRepository,
    teams::TeamRepository, users::UserRepository,
    workspaces::{InvitationRepository, WorkspaceRepository},
};

/// Shared application state: dependency-injected services constructed once
/// at startup and handed to every handler through `State`.
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub verification_service: Arc<dyn VerificationServiceTrait>,
    pub workspace_service: Arc<dyn WorkspaceServiceTrait>,
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub task_service: Arc<dyn TaskServiceTrait>,
    pub target_service: Arc<dyn TargetServiceTrait>,
    pub document_service: Arc<dyn DocumentServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub attendance_service: Arc<dyn AttendanceServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
    pub session: SessionManager,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("TL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    build_state_with_mailer(config, Arc::new(LogMailer)).await
}

/// Like [`build_state`] but with an injected mailer, so tests can capture
/// outbound verification codes instead of reading the process log.
pub async fn build_state_with_mailer(
    config: &Config,
    mailer: Arc<dyn Mailer>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    // Repositories
    let user_repository: Arc<dyn UserRepositoryTrait> =
        Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let code_repository = Arc::new(VerificationCodeRepository::new(pool.clone(), writer.clone()));
    let workspace_repository = Arc::new(WorkspaceRepository::new(pool.clone(), writer.clone()));
    let invitation_repository = Arc::new(InvitationRepository::new(pool.clone(), writer.clone()));
    let team_repository = Arc::new(TeamRepository::new(pool.clone(), writer.clone()));
    let project_repository = Arc::new(ProjectRepository::new(pool.clone(), writer.clone()));
    let task_repository = Arc::new(TaskRepository::new(pool.clone(), writer.clone()));
    let target_repository = Arc::new(TargetRepository::new(pool.clone(), writer.clone()));
    let document_repository = Arc::new(DocumentRepository::new(pool.clone(), writer.clone()));
    let notification_repository =
        Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));
    let attendance_repository = Arc::new(AttendanceRepository::new(pool.clone(), writer.clone()));

    // Services
    let hasher = Arc::new(Argon2PasswordHasher);

    let notification_service: Arc<dyn NotificationServiceTrait> =
        Arc::new(NotificationService::new(notification_repository));
    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository.clone()));
    let verification_service: Arc<dyn VerificationServiceTrait> =
        Arc::new(VerificationService::new(
            code_repository,
            user_repository.clone(),
            hasher,
            mailer,
        ));
    let workspace_service: Arc<dyn WorkspaceServiceTrait> = Arc::new(WorkspaceService::new(
        workspace_repository.clone(),
        invitation_repository,
        user_repository.clone(),
        notification_service.clone(),
    ));
    let team_service: Arc<dyn TeamServiceTrait> = Arc::new(TeamService::new(
        team_repository,
        workspace_repository,
        notification_service.clone(),
    ));
    let project_service: Arc<dyn ProjectServiceTrait> =
        Arc::new(ProjectService::new(project_repository));
    let task_service: Arc<dyn TaskServiceTrait> = Arc::new(TaskService::new(
        task_repository.clone(),
        notification_service.clone(),
    ));
    let target_service: Arc<dyn TargetServiceTrait> =
        Arc::new(TargetService::new(target_repository));
    let document_service: Arc<dyn DocumentServiceTrait> = Arc::new(DocumentService::new(
        document_repository,
        config.uploads_root.clone(),
    ));
    let attendance_service: Arc<dyn AttendanceServiceTrait> =
        Arc::new(AttendanceService::new(attendance_repository.clone()));
    let report_service: Arc<dyn ReportServiceTrait> = Arc::new(ReportService::new(
        user_repository,
        task_repository,
        target_service.clone(),
        attendance_repository,
    ));

    let session = SessionManager::new(
        &config.session_secret,
        &config.session_cookie,
        config.session_ttl_secs,
    );

    Ok(Arc::new(AppState {
        user_service,
        verification_service,
        workspace_service,
        team_service,
        project_service,
        task_service,
        target_service,
        document_service,
        notification_service,
        attendance_service,
        report_service,
        session,
        db_path,
    }))
}
