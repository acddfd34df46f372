//! Main application entry point (native).

use pagecraft_app::{Args, USAGE, cli};
use pagecraft_core::ShortcutRegistry;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if args.shortcuts {
        ShortcutRegistry::print_all();
        return ExitCode::SUCCESS;
    }

    if args.list {
        return match cli::list_projects(&args) {
            Ok(ids) => {
                ids.iter().for_each(|id| println!("{id}"));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    log::info!("Starting Pagecraft");
    match cli::run(&args) {
        Ok(report) => {
            println!(
                "\n{} commits, {} notifications",
                report.commits,
                report.notifications.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Session failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
