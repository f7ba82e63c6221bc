use crate::cli::context::config_path;
use crate::cli::parser::{Cli, Commands};
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cli: &Cli) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };
    let path = config_path(cli);

    if *print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", ConfigLogic::print(&path)?);
    }

    if *check {
        let report = ConfigLogic::check(&path)?;
        for key in &report.defaulted {
            messages::info(format!("'{key}' not set, using the default"));
        }
        for problem in &report.errors {
            messages::error(problem);
        }
        if report.is_valid() {
            messages::success(format!("Configuration is valid: {}", path.display()));
        } else {
            messages::warning(format!(
                "{} problem(s) found in {}",
                report.errors.len(),
                path.display()
            ));
        }
    }

    if *edit_config {
        let used = ConfigLogic::edit(&path, editor.as_deref())?;
        messages::success(format!("Configuration file edited using '{used}'"));
    }

    if !print_config && !check && !edit_config {
        messages::info("Nothing to do: use --print, --check or --edit.");
    }
    Ok(())
}
