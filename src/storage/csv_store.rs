use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::EntryStore;
use crate::errors::AppResult;
use crate::utils::path::temp_sibling;

/// A CSV file holding one record type, with a header row.
///
/// Legacy header spellings are accepted on read (serde aliases on the
/// models) and replaced by the canonical header on the next write.
pub struct CsvStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> CsvStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

fn first_line(path: &Path) -> AppResult<Option<String>> {
    let file = fs::File::open(path)?;
    let mut line = String::new();
    let read = BufReader::new(file).read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn canonical_header<T: Serialize>(entry: &T) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.serialize(entry)?;
    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.lines().next().unwrap_or_default().to_string())
}

impl<T> EntryStore<T> for CsvStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    fn load_all(&self) -> AppResult<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut out = Vec::new();
        for record in rdr.deserialize() {
            out.push(record?);
        }
        tracing::trace!(path = %self.path.display(), count = out.len(), "store loaded");
        Ok(out)
    }

    fn append(&mut self, entry: T) -> AppResult<()> {
        let header = canonical_header(&entry)?;

        match first_line(&self.path).ok().flatten() {
            // Existing store with the canonical header: plain append.
            Some(existing) if existing == header => {
                let file = OpenOptions::new().append(true).open(&self.path)?;
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(file);
                wtr.serialize(&entry)?;
                wtr.flush()?;
            }
            // Legacy header spelling: migrate the whole store.
            Some(_) => {
                let mut all = self.load_all()?;
                all.push(entry);
                self.rewrite_all(&all)?;
            }
            None => self.rewrite_all(std::slice::from_ref(&entry))?,
        }

        tracing::debug!(path = %self.path.display(), "record appended");
        Ok(())
    }

    fn rewrite_all(&mut self, entries: &[T]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = temp_sibling(&self.path);
        {
            let mut wtr = csv::Writer::from_path(&tmp)?;
            for entry in entries {
                wtr.serialize(entry)?;
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "store rewritten");
        Ok(())
    }
}
