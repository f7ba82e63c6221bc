use crate::cli::commands::timer;
use crate::cli::context::Context;
use crate::cli::parser::Commands;
use crate::core::session::SessionManager;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::formatting::ms2readable;

/// Handle the `resume` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Resume { no_timer } = cmd else {
        return Ok(());
    };

    let session = SessionManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref()).resume()?;
    messages::success(format!(
        "Session resumed, {} of pause so far",
        ms2readable(session.paused_time_ms)
    ));

    if !no_timer && ctx.interactive() {
        timer::show(ctx)?;
    }
    Ok(())
}
