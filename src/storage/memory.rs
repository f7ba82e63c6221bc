use super::{EntryStore, SessionStore};
use crate::errors::AppResult;
use crate::models::WorkSession;

/// Store kept in memory, for tests and dry runs.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    entries: Vec<T>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> MemoryStore<T> {
    pub fn with(entries: Vec<T>) -> Self {
        Self { entries }
    }
}

impl<T: Clone> EntryStore<T> for MemoryStore<T> {
    fn load_all(&self) -> AppResult<Vec<T>> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, entry: T) -> AppResult<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn rewrite_all(&mut self, entries: &[T]) -> AppResult<()> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Option<WorkSession>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> AppResult<Option<WorkSession>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &WorkSession) -> AppResult<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.session = None;
        Ok(())
    }
}
