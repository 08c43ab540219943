//! Jam3a storefront CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use jam3a::locale::Language;
use jam3a_app::observability;
use tracing::error;

use crate::cli::Cli;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            let _printed = error.print();

            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1));
        }
    };

    if let Err(error) = observability::init(&cli.config.logging) {
        report(&format!("failed to initialise logging: {error}"));
        return ExitCode::FAILURE;
    }

    let language = cli.language_hint();

    match cli.run(&mut io::stdout().lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "command failed");

            report(match language {
                Language::English => "Something went wrong. Please try again.",
                Language::Arabic => "حدث خطأ ما. يرجى المحاولة مرة أخرى.",
            });

            ExitCode::FAILURE
        }
    }
}

fn report(message: &str) {
    let _written = writeln!(io::stderr().lock(), "{message}");
}
