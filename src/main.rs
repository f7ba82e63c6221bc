//! clockin main entrypoint.

use clockin::run;

fn main() {
    if let Err(e) = run() {
        clockin::ui::messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
