use std::io;

use clap::{Args, Subcommand};

use crate::cli::Shell;

mod join;
mod list;
mod manage;
mod show;
mod start;

#[derive(Debug, Args)]
pub(crate) struct DealsCommand {
    #[command(subcommand)]
    command: DealsSubcommand,
}

#[derive(Debug, Subcommand)]
enum DealsSubcommand {
    /// List deals
    List(list::ListDealsArgs),

    /// Show one deal
    Show(show::ShowDealArgs),

    /// Join a deal
    Join(join::JoinDealArgs),

    /// Deals you have joined
    Mine,

    /// Start a new Jam3a
    Start(start::StartDealArgs),

    /// Change a deal you run
    Update(manage::UpdateDealArgs),

    /// Withdraw a deal you run
    Cancel(manage::CancelDealArgs),
}

pub(crate) async fn run(
    command: DealsCommand,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        DealsSubcommand::List(args) => list::run(args, shell, out).await,
        DealsSubcommand::Show(args) => show::run(args, shell, out).await,
        DealsSubcommand::Join(args) => join::run(args, shell, out).await,
        DealsSubcommand::Mine => list::mine(shell, out).await,
        DealsSubcommand::Start(args) => start::run(args, shell, out).await,
        DealsSubcommand::Update(args) => manage::update(args, shell, out).await,
        DealsSubcommand::Cancel(args) => manage::cancel(args, shell, out).await,
    }
}
