use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::storage::store_files;
use crate::ui::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Written { path: PathBuf, files: Vec<String> },
    Cancelled,
}

pub struct BackupLogic;

impl BackupLogic {
    /// Zip every store of the data directory into `dest`.
    ///
    /// Missing stores are skipped; a data directory without any store is an
    /// error. An existing archive is only replaced after confirmation.
    pub fn backup(
        cfg: &Config,
        dest: &Path,
        force: bool,
        prompter: &mut dyn Prompter,
    ) -> AppResult<BackupOutcome> {
        let dir = cfg.data_dir();
        let present: Vec<PathBuf> = store_files(&dir).into_iter().filter(|p| p.exists()).collect();
        if present.is_empty() {
            return Err(AppError::validation(format!(
                "Nothing to back up: no data files in {}",
                dir.display()
            )));
        }

        if dest.exists() && !force {
            let question = format!("The file '{}' already exists. Overwrite?", dest.display());
            if !prompter.confirm(&question, false)? {
                return Ok(BackupOutcome::Cancelled);
            }
        }
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let files = compress_backup(&present, dest)?;
        tracing::info!(dest = %dest.display(), files = files.len(), "backup written");
        Ok(BackupOutcome::Written {
            path: dest.to_path_buf(),
            files,
        })
    }
}

fn compress_backup(sources: &[PathBuf], zip_path: &Path) -> AppResult<Vec<String>> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut names = Vec::new();
    for path in sources {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let mut f = fs::File::open(path)?;
        zip.start_file(name.as_str(), options)?;
        std::io::copy(&mut f, &mut zip)?;
        tracing::debug!(file = %name, "added to archive");
        names.push(name);
    }
    zip.finish()?;

    Ok(names)
}
