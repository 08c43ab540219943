use std::io;

use clap::Args;
use jam3a::{deals::DealId, locale::Language};
use jiff::Timestamp;

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct ShowDealArgs {
    /// Deal identifier
    id: String,
}

pub(crate) async fn run(
    args: ShowDealArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let deal = shell
        .app
        .deals
        .get_deal(DealId::new(args.id))
        .await
        .map_err(|error| format!("failed to load deal: {}", chain(&error)))?;

    let now = Timestamp::now();

    render::write_deal(out, &deal, now, shell.language).map_err(output_failed)?;

    if deal.status(now).is_joinable() {
        let hint = match shell.language {
            Language::English => "Join with: jam3a deals join",
            Language::Arabic => "للانضمام: jam3a deals join",
        };

        writeln!(out, "{hint} {}", deal.id).map_err(output_failed)?;
    }

    Ok(())
}
