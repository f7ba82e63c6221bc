use crate::cli::commands::timer;
use crate::cli::context::Context;
use crate::cli::parser::Commands;
use crate::core::session::SessionManager;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handle the `start` command
pub fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Start { no_timer } = cmd else {
        return Ok(());
    };

    let session = SessionManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref()).start()?;
    let local = session.start_time.with_timezone(&ctx.cfg.tz());
    messages::success(format!(
        "Work session started at {}",
        local.format("%Y-%m-%d %H:%M")
    ));

    if !no_timer && ctx.interactive() {
        timer::show(ctx)?;
    }
    Ok(())
}
