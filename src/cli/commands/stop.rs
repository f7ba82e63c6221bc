use crate::cli::context::{Context, prompter};
use crate::cli::parser::Commands;
use crate::core::session::SessionManager;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::formatting::{format_pause, ms2readable};

/// Handle the `stop` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Stop { yes, description } = cmd else {
        return Ok(());
    };

    let mut prompt = prompter(*yes);
    let report = SessionManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref())
        .stop(prompt.as_mut(), description.clone())?;

    let tz = ctx.cfg.tz();
    let entry = &report.entry;
    let start = entry.start_time.with_timezone(&tz).format("%H:%M");
    let end = entry
        .end_time
        .map(|t| t.with_timezone(&tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());

    if report.suggestion_applied {
        messages::info(format!(
            "Pause set to the suggested {} (tracked: {})",
            format_pause(entry.pause_time),
            format_pause(report.tracked_pause_minutes)
        ));
    }
    messages::success(format!(
        "Recorded {}: {} – {}, pause {}, worked {}",
        entry.date,
        start,
        end,
        format_pause(entry.pause_time),
        ms2readable(entry.working_ms())
    ));
    Ok(())
}
