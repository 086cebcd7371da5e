mod model;
mod repository;

pub use model::{AttendanceRecordDB, NewAttendanceRecordDB};
pub use repository::AttendanceRepository;
