use std::{io, sync::Arc, time::Instant};

use clap::{Args, ValueEnum};
use jam3a::{
    catalog::{CatalogQuery, SortOrder, categories},
    deals::{Deal, DealStatus},
    locale::Language,
};
use jam3a_app::{domain::deals::DealFilter, sequencing::DealsFeed};
use jiff::Timestamp;
use tracing::info;

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct ListDealsArgs {
    /// Only deals in this category
    #[arg(long)]
    category: Option<String>,

    /// Match titles in either language
    #[arg(long)]
    search: Option<String>,

    /// Only deals in this status
    #[arg(long, value_enum)]
    status: Option<StatusFilter>,

    /// Order: featured, ending-soon, discount, popular or price
    #[arg(long, default_value_t = SortOrder::Featured)]
    sort: SortOrder,

    /// Also show how many deals each category has
    #[arg(long)]
    categories: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusFilter {
    Open,
    Completing,
    Completed,
    Expired,
    Cancelled,
}

impl From<StatusFilter> for DealStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Open => Self::Open,
            StatusFilter::Completing => Self::Completing,
            StatusFilter::Completed => Self::Completed,
            StatusFilter::Expired => Self::Expired,
            StatusFilter::Cancelled => Self::Cancelled,
        }
    }
}

async fn fetch(shell: &Shell, filter: DealFilter) -> Result<Vec<Deal>, String> {
    let feed = DealsFeed::new(Arc::clone(&shell.app.deals));
    let started = Instant::now();

    feed.refresh(filter)
        .await
        .map_err(|error| format!("failed to list deals: {}", chain(&error)))?;

    let deals = feed.snapshot().await;

    info!(
        count = deals.len(),
        elapsed = %render::elapsed(started.elapsed()),
        "fetched deals"
    );

    Ok(deals)
}

pub(crate) async fn run(
    args: ListDealsArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let deals = fetch(
        shell,
        DealFilter {
            category: args.category.clone(),
            joined: false,
        },
    )
    .await?;

    let now = Timestamp::now();
    let query = CatalogQuery {
        category: args.category,
        search: args.search,
        status: args.status.map(DealStatus::from),
        sort: args.sort,
    };

    let selected: Vec<Deal> = query.apply(&deals, now).into_iter().cloned().collect();

    render::write_deals(out, &selected, now, shell.language).map_err(output_failed)?;

    if args.categories {
        render::write_categories(out, &categories(&deals), shell.language)
            .map_err(output_failed)?;
    }

    Ok(())
}

pub(crate) async fn mine(shell: &Shell, out: &mut impl io::Write) -> Result<(), String> {
    let deals = fetch(
        shell,
        DealFilter {
            category: None,
            joined: true,
        },
    )
    .await?;

    if deals.is_empty() {
        let empty = match shell.language {
            Language::English => "You have not joined any deals yet.",
            Language::Arabic => "لم تنضم إلى أي عرض بعد.",
        };

        return writeln!(out, "{empty}").map_err(output_failed);
    }

    render::write_deals(out, &deals, Timestamp::now(), shell.language).map_err(output_failed)
}
