use std::io;

use clap::Args;
use jam3a::{deals::DealId, locale::Language};
use jam3a_app::domain::deals::DealUpdate;
use jiff::Timestamp;
use tracing::info;

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct UpdateDealArgs {
    /// Deal identifier
    id: String,

    /// New English title
    #[arg(long)]
    title: Option<String>,

    /// New Arabic title
    #[arg(long)]
    title_ar: Option<String>,

    /// New deal price in SAR
    #[arg(long)]
    price: Option<f64>,

    /// New number of participants needed
    #[arg(long)]
    required: Option<u32>,

    /// New expiry, RFC 3339
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

#[derive(Debug, Args)]
pub(crate) struct CancelDealArgs {
    /// Deal identifier
    id: String,
}

pub(crate) async fn update(
    args: UpdateDealArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let update = DealUpdate {
        title: args.title,
        title_ar: args.title_ar,
        deal_price: args.price,
        required_participants: args.required,
        expires_at: args.expires_at,
    };

    if update.is_empty() {
        return Err("nothing to update; pass at least one field".to_string());
    }

    let deal = shell
        .app
        .deals
        .update_deal(DealId::new(args.id), update)
        .await
        .map_err(|error| format!("failed to update deal: {}", chain(&error)))?;

    info!(deal = %deal.id, "deal updated");

    render::write_deal(out, &deal, Timestamp::now(), shell.language).map_err(output_failed)
}

pub(crate) async fn cancel(
    args: CancelDealArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let deal = DealId::new(args.id);

    shell
        .app
        .deals
        .delete_deal(deal.clone())
        .await
        .map_err(|error| format!("failed to cancel deal: {}", chain(&error)))?;

    let cancelled = match shell.language {
        Language::English => "Deal withdrawn:",
        Language::Arabic => "تم سحب العرض:",
    };

    writeln!(out, "{cancelled} {deal}").map_err(output_failed)
}
