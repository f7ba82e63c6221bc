use crate::cli::context::Context;
use crate::core::session::SessionManager;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::formatting::ms2readable;
use crate::utils::time::elapsed_ms;

/// Handle the `pause` command
pub fn handle(ctx: &mut Context) -> AppResult<()> {
    let now = ctx.clock.now();
    let session = SessionManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref()).pause()?;
    let local = now.with_timezone(&ctx.cfg.tz());
    messages::success(format!(
        "Session paused at {} after {} of work",
        local.format("%H:%M"),
        ms2readable(elapsed_ms(&session, now))
    ));
    Ok(())
}
