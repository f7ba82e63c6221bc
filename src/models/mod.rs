pub mod holiday;
pub mod leave;
pub mod session;
pub mod time_entry;

pub use holiday::HolidayEntry;
pub use leave::{LeaveEntry, LeaveKind, SickEntry, VacationEntry};
pub use session::WorkSession;
pub use time_entry::{EntryType, TimeEntry};
