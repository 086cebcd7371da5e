//! Attendance module - clock-in/clock-out time tracking.

mod attendance_model;
mod attendance_service;
mod attendance_traits;

pub use attendance_model::{AttendanceRecord, AttendanceSummary, NewAttendanceRecord};
pub use attendance_service::AttendanceService;
pub use attendance_traits::{AttendanceRepositoryTrait, AttendanceServiceTrait};
