use crate::cli::context::{Context, prompter};
use crate::cli::parser::Commands;
use crate::core::backup::{BackupLogic, BackupOutcome};
use crate::core::export::require_absolute;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handle the `backup` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Backup { file, force } = cmd else {
        return Ok(());
    };

    let dest = require_absolute(file)?;
    match BackupLogic::backup(&ctx.cfg, &dest, *force, prompter(false).as_mut())? {
        BackupOutcome::Written { path, files } => {
            messages::success(format!("📦 Backup created: {}", path.display()));
            messages::info(format!("Archived: {}", files.join(", ")));
        }
        BackupOutcome::Cancelled => messages::warning("Backup cancelled by user."),
    }
    Ok(())
}
