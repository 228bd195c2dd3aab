// Entrypoint for the CLI application.
// - Parses flags, sets up logging, validates settings.
// - Every fatal error comes back here and is turned into its exit code.

use clap::{CommandFactory, Parser};
use mm_channel_setup::api::ApiClient;
use mm_channel_setup::app::{self, Outcome, RunOptions};
use mm_channel_setup::cli::{self, Cli};
use mm_channel_setup::error::SetupError;
use mm_channel_setup::logging;
use mm_channel_setup::prompt::TerminalPrompter;
use std::process::ExitCode;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    if cli.version {
        println!("mm-channel-setup - Version: {}\n", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    logging::init(cli.debug);

    let settings = match cli.into_settings() {
        Ok(settings) => settings,
        Err(problems) => {
            for problem in problems {
                error!("{}", problem);
            }
            eprint!("{}", Cli::command().render_help());
            return ExitCode::from(1);
        }
    };
    debug!("{}", settings.describe());

    let server = settings.connection.server_url();
    debug!("Full target for Mattermost: {}", server);
    let result = ApiClient::new(&server, &settings.connection.token)
        .map_err(SetupError::Client)
        .and_then(|api| {
            let options = RunOptions {
                channel_id: &settings.channel_id,
                no_header: settings.no_header,
            };
            app::run(&api, &mut TerminalPrompter, options, &settings.config_path)
        });

    match result {
        Ok(Outcome::Completed) => {
            info!("Processing complete");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Aborted) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            error!("{:#}", anyhow::Error::from(e));
            ExitCode::from(code)
        }
    }
}
