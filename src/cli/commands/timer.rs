use crate::cli::context::Context;
use crate::core::session::SessionManager;
use crate::errors::{AppError, AppResult};
use crate::ui::timer;

/// Handle the `timer` command
///
/// Scripted or piped runs print a single status line instead of the live
/// display.
pub fn handle(ctx: &mut Context) -> AppResult<()> {
    let tz = ctx.cfg.tz();
    let snap = SessionManager::new(&ctx.cfg, &mut ctx.stores, ctx.clock.as_ref())
        .snapshot()?
        .ok_or(AppError::NoSession)?;

    if !ctx.interactive() {
        println!("{}", timer::render_line(&snap, tz));
        return Ok(());
    }
    show(ctx)
}

/// Run the live display until Ctrl-C or until the session ends.
pub fn show(ctx: &mut Context) -> AppResult<()> {
    let tz = ctx.cfg.tz();
    let Context {
        cfg, stores, clock, ..
    } = ctx;
    timer::run(
        || SessionManager::new(cfg, &mut *stores, clock.as_ref()).snapshot(),
        tz,
    )
}
