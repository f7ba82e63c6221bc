//! Live session display, refreshed once per second until Ctrl-C.
//!
//! The display only reads: interrupting it leaves the session running, and
//! it ends by itself once the session is stopped elsewhere.

use chrono_tz::Tz;
use std::io::{self, Write};
use std::time::Duration;

use crate::core::session::TimerSnapshot;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::colors::{GREY, RESET, YELLOW, paint};
use crate::utils::formatting::{format_clock, ms2readable};

/// One status line for `snap`.
pub fn render_line(snap: &TimerSnapshot, tz: Tz) -> String {
    let state = if snap.is_paused {
        paint("⏸ paused ", YELLOW)
    } else {
        "⏱ working".to_string()
    };
    let end = match snap.projected_end {
        Some(at) => at.with_timezone(&tz).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    };
    format!(
        "{state}  {}  {GREY}today{RESET} {}  {GREY}pause{RESET} {}  {GREY}target reached at{RESET} {end}",
        format_clock(snap.elapsed_ms),
        ms2readable(snap.today_worked_ms),
        ms2readable(snap.paused_ms),
    )
}

/// Redraw `tick()` every second on a single-threaded runtime.
///
/// `tick` returning `None` means the session is gone.
pub fn run<F>(mut tick: F, tz: Tz) -> AppResult<()>
where
    F: FnMut() -> AppResult<Option<TimerSnapshot>>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                res = &mut ctrl_c => {
                    res?;
                    println!();
                    messages::info("Timer closed; the session is still running.");
                    break;
                }
                _ = interval.tick() => {
                    match tick()? {
                        Some(snap) => {
                            // Clear to end of line: the paused label is shorter.
                            print!("\r{}\x1b[K", render_line(&snap, tz));
                            io::stdout().flush()?;
                        }
                        None => {
                            println!();
                            messages::info("The session was stopped.");
                            break;
                        }
                    }
                }
            }
        }
        tracing::debug!("timer loop finished");
        Ok::<(), AppError>(())
    })
}
