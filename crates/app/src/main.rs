//! Dacha Storefront CLI

use std::{io, process};

use tracing::error;

use dacha_app::{cli::Cli, observability};

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(cli.logging()) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for setup errors"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        process::exit(1);
    }

    let mut stdout = io::stdout().lock();

    if let Err(run_error) = cli.run(&mut stdout).await {
        error!("command failed: {run_error:?}");

        #[expect(
            clippy::print_stderr,
            reason = "command errors are shown to the user, not only logged"
        )]
        {
            eprintln!("{run_error}");
        }

        process::exit(1);
    }
}
