//! Persistence boundary: one flat store per entry type plus the session file.
//!
//! Core logic only sees the [`EntryStore`] and [`SessionStore`] traits; the
//! CSV/JSON files and their header spellings stay behind this module.

mod csv_store;
mod memory;
mod session_file;

pub use csv_store::CsvStore;
pub use memory::{MemorySessionStore, MemoryStore};
pub use session_file::JsonSessionStore;

use std::path::{Path, PathBuf};

use crate::errors::AppResult;
use crate::models::{HolidayEntry, LeaveEntry, LeaveKind, TimeEntry, WorkSession};

pub const TIME_ENTRIES_FILE: &str = "time_entries.csv";
pub const VACATION_FILE: &str = "vacation.csv";
pub const SICK_FILE: &str = "sick.csv";
pub const HOLIDAYS_FILE: &str = "holidays.csv";
pub const SESSION_FILE: &str = "session.json";

pub trait EntryStore<T> {
    /// All records; empty when the backing store does not exist yet.
    fn load_all(&self) -> AppResult<Vec<T>>;

    /// Add one record without disturbing existing ones.
    fn append(&mut self, entry: T) -> AppResult<()>;

    /// Replace the whole store with `entries`.
    fn rewrite_all(&mut self, entries: &[T]) -> AppResult<()>;
}

pub trait SessionStore {
    fn load(&self) -> AppResult<Option<WorkSession>>;
    fn save(&mut self, session: &WorkSession) -> AppResult<()>;
    fn clear(&mut self) -> AppResult<()>;
}

/// Every store of one data directory.
pub struct Stores {
    pub time: Box<dyn EntryStore<TimeEntry>>,
    pub vacation: Box<dyn EntryStore<LeaveEntry>>,
    pub sick: Box<dyn EntryStore<LeaveEntry>>,
    pub holidays: Box<dyn EntryStore<HolidayEntry>>,
    pub session: Box<dyn SessionStore>,
}

impl Stores {
    /// File-backed stores rooted at `dir`. Nothing is created until written.
    pub fn open(dir: &Path) -> Self {
        tracing::debug!(dir = %dir.display(), "opening data directory");
        Self {
            time: Box::new(CsvStore::<TimeEntry>::new(dir.join(TIME_ENTRIES_FILE))),
            vacation: Box::new(CsvStore::<LeaveEntry>::new(dir.join(VACATION_FILE))),
            sick: Box::new(CsvStore::<LeaveEntry>::new(dir.join(SICK_FILE))),
            holidays: Box::new(CsvStore::<HolidayEntry>::new(dir.join(HOLIDAYS_FILE))),
            session: Box::new(JsonSessionStore::new(dir.join(SESSION_FILE))),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            time: Box::new(MemoryStore::<TimeEntry>::default()),
            vacation: Box::new(MemoryStore::<LeaveEntry>::default()),
            sick: Box::new(MemoryStore::<LeaveEntry>::default()),
            holidays: Box::new(MemoryStore::<HolidayEntry>::default()),
            session: Box::new(MemorySessionStore::default()),
        }
    }

    pub fn leave(&self, kind: LeaveKind) -> &dyn EntryStore<LeaveEntry> {
        match kind {
            LeaveKind::Vacation => self.vacation.as_ref(),
            LeaveKind::Sick => self.sick.as_ref(),
        }
    }

    pub fn leave_mut(&mut self, kind: LeaveKind) -> &mut dyn EntryStore<LeaveEntry> {
        match kind {
            LeaveKind::Vacation => self.vacation.as_mut(),
            LeaveKind::Sick => self.sick.as_mut(),
        }
    }
}

/// Files that make up a data directory, in backup order.
pub fn store_files(dir: &Path) -> Vec<PathBuf> {
    [
        TIME_ENTRIES_FILE,
        VACATION_FILE,
        SICK_FILE,
        HOLIDAYS_FILE,
        SESSION_FILE,
    ]
    .iter()
    .map(|f| dir.join(f))
    .collect()
}
