//! Catalog filtering
//!
//! The shop filters and orders the fetched deals client-side; the backend only narrows by
//! category.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::deals::{Deal, DealStatus};

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Backend order.
    #[default]
    Featured,

    /// Nearest expiry first; deals without a known expiry last.
    EndingSoon,

    /// Largest discount percentage first.
    BiggestDiscount,

    /// Most participants first.
    MostJoined,

    /// Cheapest deal price first.
    LowestPrice,
}

impl SortOrder {
    /// Every order, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::EndingSoon,
        Self::BiggestDiscount,
        Self::MostJoined,
        Self::LowestPrice,
    ];

    /// Identifier used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::EndingSoon => "ending-soon",
            Self::BiggestDiscount => "discount",
            Self::MostJoined => "popular",
            Self::LowestPrice => "price",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for unknown sort identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == normalised)
            .ok_or_else(|| UnknownSortOrder(value.to_string()))
    }
}

/// Client-side catalog filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Only deals in this category.
    pub category: Option<String>,

    /// Case-insensitive match against either title language.
    pub search: Option<String>,

    /// Only deals currently in this status.
    pub status: Option<DealStatus>,

    /// Result order.
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Whether `deal` passes every filter at `now`.
    #[must_use]
    pub fn matches(&self, deal: &Deal, now: Timestamp) -> bool {
        let category = self
            .category
            .as_deref()
            .is_none_or(|category| deal.category.eq_ignore_ascii_case(category));

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .is_none_or(|needle| deal.title.contains_ignore_case(needle));

        let status = self.status.is_none_or(|status| deal.status(now) == status);

        category && search && status
    }

    /// Filter and order `deals` at `now`.
    ///
    /// Sorting is stable, so ties keep backend order.
    #[must_use]
    pub fn apply<'a>(&self, deals: &'a [Deal], now: Timestamp) -> Vec<&'a Deal> {
        let mut selected: Vec<&Deal> = deals.iter().filter(|deal| self.matches(deal, now)).collect();

        match self.sort {
            SortOrder::Featured => {}
            SortOrder::EndingSoon => selected.sort_by_key(|deal| {
                let expires_at = deal.window.expires_at();
                (expires_at.is_none(), expires_at)
            }),
            SortOrder::BiggestDiscount => {
                selected.sort_by_key(|deal| std::cmp::Reverse(deal.discount_percentage()));
            }
            SortOrder::MostJoined => {
                selected.sort_by_key(|deal| std::cmp::Reverse(deal.participants.current));
            }
            SortOrder::LowestPrice => selected.sort_by_key(|deal| deal.deal_price.to_minor_units()),
        }

        selected
    }
}

/// A category and how many deals carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category tag.
    pub category: String,

    /// Number of deals.
    pub count: usize,
}

/// Categories present in `deals` with their deal counts, ordered by name.
///
/// Deals without a category are not counted.
#[must_use]
pub fn categories(deals: &[Deal]) -> Vec<CategoryCount> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();

    for deal in deals {
        let category = deal.category.trim();

        if !category.is_empty() {
            *counts.entry(category).or_default() += 1;
        }
    }

    let mut categories: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();

    categories.sort_by(|a, b| a.category.cmp(&b.category));

    categories
}
