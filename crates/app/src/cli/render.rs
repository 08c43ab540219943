//! Terminal output

use std::{io, time::Duration};

use humanize_duration::{Truncate, prelude::DurationExt};
use jam3a::prelude::*;
use jam3a_app::{
    domain::{content::ContentBlock, orders::Order},
    fallback::fallback_banner,
};
use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

const PROGRESS_WIDTH: usize = 10;

/// Column headers for `language`.
fn headers<const N: usize>(
    language: Language,
    english: [&'static str; N],
    arabic: [&'static str; N],
) -> [&'static str; N] {
    match language {
        Language::English => english,
        Language::Arabic => arabic,
    }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    language: Language,
    numeric: Option<Columns<std::ops::Range<usize>>>,
) -> io::Result<()> {
    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);

    if language.direction() == Direction::Rtl {
        table.modify(Columns::new(..), Alignment::right());
    } else if let Some(columns) = numeric {
        table.modify(columns, Alignment::right());
    }

    writeln!(out, "{table}")
}

/// Text bar for a progress percentage.
pub(crate) fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * PROGRESS_WIDTH / 100;

    format!(
        "{}{} {percent}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled)
    )
}

/// Elapsed time as shown after a fetch.
pub(crate) fn elapsed(duration: Duration) -> String {
    if duration < Duration::from_millis(1) {
        return "< 1ms".to_string();
    }

    format!("{}", duration.human(Truncate::Nano))
}

pub(crate) fn write_banner(out: &mut impl io::Write, language: Language) -> io::Result<()> {
    writeln!(out, "⚠ {}", fallback_banner(language))
}

pub(crate) fn write_field_errors(
    out: &mut impl io::Write,
    errors: &ValidationErrors,
    language: Language,
) -> io::Result<()> {
    for error in errors.iter() {
        writeln!(out, "  • {}", error.message(language))?;
    }

    Ok(())
}

pub(crate) fn write_deals(
    out: &mut impl io::Write,
    deals: &[Deal],
    now: Timestamp,
    language: Language,
) -> io::Result<()> {
    if deals.is_empty() {
        let empty = match language {
            Language::English => "No deals match.",
            Language::Arabic => "لا توجد عروض مطابقة.",
        };

        return writeln!(out, "{empty}");
    }

    let mut builder = Builder::default();

    builder.push_record(headers(
        language,
        ["ID", "Deal", "Price", "Was", "Off", "Group", "Progress", "Status", "Time left"],
        ["المعرف", "العرض", "السعر", "بدلاً من", "الخصم", "المجموعة", "التقدم", "الحالة", "الوقت المتبقي"],
    ));

    for deal in deals {
        let view = DealView::new(deal, now, language);

        builder.push_record([
            view.id.to_string(),
            view.title.clone(),
            view.deal_price.clone(),
            view.regular_price.clone(),
            format!("{}%", view.discount),
            view.participants.clone(),
            progress_bar(view.progress_percent()),
            view.status_label.to_string(),
            view.time_left.clone(),
        ]);
    }

    write_table(out, builder, language, Some(Columns::new(2..5)))
}

pub(crate) fn write_deal(
    out: &mut impl io::Write,
    deal: &Deal,
    now: Timestamp,
    language: Language,
) -> io::Result<()> {
    let view = DealView::new(deal, now, language);

    writeln!(out, "{} [{}]", view.title, view.status_label)?;

    let description = deal.description.get(language);
    if !description.is_empty() {
        writeln!(out, "{description}")?;
    }

    let (price, was, group, left, remaining) = match language {
        Language::English => ("Price", "was", "Group", "Time left", "still needed"),
        Language::Arabic => ("السعر", "بدلاً من", "المجموعة", "الوقت المتبقي", "مطلوب"),
    };

    writeln!(
        out,
        "{price}: {} ({was} {}, -{}%)",
        view.deal_price, view.regular_price, view.discount
    )?;
    writeln!(
        out,
        "{group}: {} · {} · {} {remaining}",
        view.participants,
        progress_bar(view.progress_percent()),
        view.remaining
    )?;
    writeln!(out, "{left}: {}", view.time_left)
}

pub(crate) fn write_categories(
    out: &mut impl io::Write,
    categories: &[CategoryCount],
    language: Language,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(headers(language, ["Category", "Deals"], ["الفئة", "العروض"]));

    for category in categories {
        builder.push_record([category.category.clone(), category.count.to_string()]);
    }

    write_table(out, builder, language, Some(Columns::new(1..2)))
}

pub(crate) fn write_products(
    out: &mut impl io::Write,
    products: &[Product],
    language: Language,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(headers(
        language,
        ["ID", "Product", "Category", "Price", "Stock"],
        ["المعرف", "المنتج", "الفئة", "السعر", "المخزون"],
    ));

    for product in products {
        let stock = match (product.stock, language) {
            (Some(0), Language::English) => "sold out".to_string(),
            (Some(0), Language::Arabic) => "نفد".to_string(),
            (Some(stock), _) => stock.to_string(),
            (None, _) => "-".to_string(),
        };

        builder.push_record([
            product.id.clone(),
            product.name.get(language).to_string(),
            product.category.clone(),
            format_amount(&product.price, language),
            stock,
        ]);
    }

    write_table(out, builder, language, Some(Columns::new(3..5)))
}

pub(crate) fn write_cart(
    out: &mut impl io::Write,
    cart: &Cart,
    language: Language,
) -> io::Result<()> {
    if cart.is_empty() {
        let empty = match language {
            Language::English => "Your cart is empty.",
            Language::Arabic => "سلة التسوق فارغة.",
        };

        return writeln!(out, "{empty}");
    }

    let mut builder = Builder::default();

    builder.push_record(headers(
        language,
        ["Item", "Qty", "Total"],
        ["المنتج", "الكمية", "المجموع"],
    ));

    for line in cart.lines() {
        let total = line
            .total()
            .map_or_else(|_unknown| "-".to_string(), |total| format_amount(&total, language));

        builder.push_record([
            line.name.get(language).to_string(),
            line.quantity.to_string(),
            total,
        ]);
    }

    write_table(out, builder, language, Some(Columns::new(1..3)))?;

    let subtotal = cart
        .subtotal()
        .map_or_else(|error| error.to_string(), |total| format_amount(&total, language));

    let (label, items) = match language {
        Language::English => ("Subtotal", "items"),
        Language::Arabic => ("المجموع الفرعي", "منتجات"),
    };

    writeln!(out, "{label}: {subtotal} ({} {items})", cart.item_count())
}

pub(crate) fn write_orders(
    out: &mut impl io::Write,
    orders: &[Order],
    language: Language,
) -> io::Result<()> {
    if orders.is_empty() {
        let empty = match language {
            Language::English => "No orders yet.",
            Language::Arabic => "لا توجد طلبات بعد.",
        };

        return writeln!(out, "{empty}");
    }

    let mut builder = Builder::default();

    builder.push_record(headers(
        language,
        ["Order", "Placed", "Items", "Total", "Status"],
        ["الطلب", "التاريخ", "المنتجات", "المجموع", "الحالة"],
    ));

    for order in orders {
        let placed = order
            .created_at
            .map_or_else(|| "-".to_string(), |at| at.strftime("%Y-%m-%d").to_string());
        let items = order
            .lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity));

        builder.push_record([
            order.id.clone(),
            placed,
            items.to_string(),
            format_amount(&order.total, language),
            order.status.clone(),
        ]);
    }

    write_table(out, builder, language, Some(Columns::new(2..4)))
}

pub(crate) fn write_content(
    out: &mut impl io::Write,
    blocks: &[ContentBlock],
    language: Language,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(headers(language, ["Key", "Text"], ["المفتاح", "النص"]));

    for block in blocks {
        builder.push_record([block.key.clone(), block.text.get(language).to_string()]);
    }

    write_table(out, builder, language, None)
}

#[cfg(test)]
mod tests {
    use jam3a::fixtures::Fixture;
    use testresult::TestResult;

    use super::*;

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Result<String, io::Error> {
        let mut out = Vec::new();
        write(&mut out)?;

        String::from_utf8(out).map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░ 0%");
        assert_eq!(progress_bar(80), "████████░░ 80%");
        assert_eq!(progress_bar(100), "██████████ 100%");
    }

    #[test]
    fn deals_table_shows_derived_values() -> TestResult {
        let now = Timestamp::now();
        let fixture = Fixture::bundled(now)?;

        let text = rendered(|out| write_deals(out, fixture.deals(), now, Language::English))?;

        assert!(text.contains("Philips Air Fryer XL"));
        assert!(text.contains("4/5 joined"));
        assert!(text.contains("████████░░ 80%"));
        assert!(text.contains("Completing"), "coffee machine met its threshold");

        Ok(())
    }

    #[test]
    fn deals_table_speaks_arabic() -> TestResult {
        let now = Timestamp::now();
        let fixture = Fixture::bundled(now)?;

        let text = rendered(|out| write_deals(out, fixture.deals(), now, Language::Arabic))?;

        assert!(text.contains("قلاية هوائية فيليبس XL"));
        assert!(text.contains("العرض"));

        Ok(())
    }

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let text = rendered(|out| write_cart(out, &Cart::new(), Language::English))?;

        assert_eq!(text, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn cart_shows_subtotal_and_count() -> TestResult {
        let fixture = Fixture::bundled(Timestamp::now())?;
        let mut cart = Cart::new();

        for product in fixture.products().iter().take(2) {
            cart.add(product.to_cart_line().with_quantity(2));
        }

        let text = rendered(|out| write_cart(out, &cart, Language::English))?;

        assert!(text.contains("Subtotal:"));
        assert!(text.contains("(4 items)"));

        Ok(())
    }
}
