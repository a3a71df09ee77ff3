use ::clap::Parser;
use colored::*;

use std::time::SystemTime;

use crate::{cli::clap::Options, engine::Engine};

pub mod clap;
mod backups;
mod commands;
mod connector;

/// Exit code for a command that ran but reported failure.
const EXIT_FAILURE: i32 = 1;
/// Exit code for an error that stopped the command from running.
const EXIT_ERROR: i32 = 101;

pub fn entrypoint() {
    let now = SystemTime::now();
    let options = Options::parse();
    let json = options.json;

    let result = Engine::locate(options.home.to_owned())
        .and_then(|engine| commands::run(&engine, options));

    let elapsed = now.elapsed().unwrap_or_default();

    match result {
        Ok(response) => {
            eprintln!();
            if response.success {
                eprintln!(
                    "{: ^9} {}",
                    "SUCCESS".bold().black().on_green(),
                    response.msg.bold().dimmed()
                );
            } else {
                eprintln!(
                    "{: ^9} {}",
                    "FAILED".bold().white().on_red(),
                    response.msg.bold().dimmed()
                );
            }
            eprintln!(
                "{: ^9} {}",
                "",
                format!("in {}", indicatif::HumanDuration(elapsed))
                    .dimmed()
                    .italic()
            );

            if json {
                if let Some(data) = response.data {
                    println!("{}", data)
                }
            }

            std::process::exit(if response.success { 0 } else { EXIT_FAILURE });
        }

        Err(e) => {
            eprintln!();
            eprintln!(
                "{: ^9} {}",
                "ERROR".bold().white().on_red(),
                format!("{:#}", e).bold().dimmed()
            );
            eprintln!(
                "{: ^9} {}",
                "",
                format!("in {}", indicatif::HumanDuration(elapsed))
                    .dimmed()
                    .italic()
            );
            std::process::exit(EXIT_ERROR);
        }
    }
}
