//! Notifications module - per-user event records with best-effort fan-out.

mod notifications_model;
mod notifications_service;
mod notifications_traits;

pub use notifications_model::{NewNotification, Notification, NotificationKind};
pub use notifications_service::NotificationService;
pub use notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
