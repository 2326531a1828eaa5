use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use dhcp_hosts_sync::{
    Cli, CliShellApi, HostsdClient, KeaControl, Result, Settings, SyncOutcome, logging, sync,
};

/// Exit status for a run that raised an error.
const EXIT_FAILURE: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _logging = logging::init();

    let result = run(&cli).await;
    match &result {
        Ok(SyncOutcome::Disabled) => {}
        Ok(SyncOutcome::Updated { hosts, skipped }) => {
            info!("Published {} host(s), skipped {} lease(s)", hosts, skipped);
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
        }
    }

    ExitCode::from(exit_code(&result))
}

async fn run(cli: &Cli) -> Result<SyncOutcome> {
    let settings = Settings::default();
    settings.validate()?;

    let query = CliShellApi::new(&settings.cli_shell_api);
    let kea = KeaControl::new(settings.kea_ctrl_socket.clone());
    let mut hosts = HostsdClient::new(settings.hostsd_endpoint.clone(), settings.hostsd_timeout);

    sync::run(cli.family(), &query, &kea, &mut hosts).await
}

/// Usage errors never get here; clap exits with its own status for those.
fn exit_code(result: &Result<SyncOutcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => EXIT_FAILURE,
    }
}
