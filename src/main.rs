use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use dotlink::cli::{Cli, Mode, VERSION};
use dotlink::commands;
use dotlink::config::{self, Config, Settings};
use dotlink::error::{DotlinkError, EXIT_USAGE};
use dotlink::logging::{self, Log, Logger};
use dotlink::tasks::Context;

/// Exit code used when the run is interrupted.
const EXIT_INTERRUPTED: i32 = 130;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Flag conflicts are rejected before anything touches the disk.
    let mode = cli.mode();
    let log_path = logging::init_subscriber(
        logging::console_level(cli.verbose, cli.quiet),
        mode.as_ref().ok().map(Mode::command_name),
    );

    match mode.and_then(|mode| run(&cli, mode, log_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.before_command() {
                tracing::error!("{e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli, mode: Mode, log_path: Option<std::path::PathBuf>) -> Result<(), DotlinkError> {
    let home = config::home_dir()?;
    let config_file = config::config_path(&home);
    let config = Config::load(&config_file)?;

    let log = Arc::new(Logger::with_log_file(log_path));
    log.debug(&format!("dotlink {VERSION}"));
    log.debug(&format!("config: {}", config_file.display()));

    if let Err(e) = ctrlc::set_handler(|| {
        tracing::warn!("interrupted; files already processed are left as they are");
        std::process::exit(EXIT_INTERRUPTED);
    }) {
        log.debug(&format!("cannot install interrupt handler: {e}"));
    }

    let settings = Settings::new(config, home, cli.policy(), cli.verbose, cli.online);
    let ctx = Context::new(Arc::new(settings), Arc::clone(&log) as Arc<dyn Log>);

    match mode {
        Mode::Sweep => commands::sweep::run(&ctx, &log),
        Mode::Add { program, files } => commands::add::run(&ctx, &log, &program, files),
        Mode::Unlink { program } => commands::unlink::run(&ctx, &log, &program),
    }
}
