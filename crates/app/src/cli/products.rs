use std::io;

use clap::{Args, Subcommand};
use jam3a::{locale::Language, money::format_amount};

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products
    List(ListProductsArgs),

    /// Show one product
    Show(ShowProductArgs),
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    /// Only products in this category
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct ShowProductArgs {
    /// Product identifier
    id: String,
}

pub(crate) async fn run(
    command: ProductsCommand,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list(args, shell, out).await,
        ProductsSubcommand::Show(args) => show(args, shell, out).await,
    }
}

async fn list(
    args: ListProductsArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let fetched = shell
        .app
        .products
        .list_products(args.category)
        .await
        .map_err(|error| format!("failed to list products: {}", chain(&error)))?;

    if fetched.is_cached() {
        render::write_banner(out, shell.language).map_err(output_failed)?;
    }

    render::write_products(out, &fetched.value, shell.language).map_err(output_failed)
}

async fn show(
    args: ShowProductArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let language = shell.language;
    let fetched = shell
        .app
        .products
        .get_product(args.id)
        .await
        .map_err(|error| format!("failed to load product: {}", chain(&error)))?;

    if fetched.is_cached() {
        render::write_banner(out, language).map_err(output_failed)?;
    }

    let product = fetched.value;

    writeln!(
        out,
        "{} · {}",
        product.name.get(language),
        format_amount(&product.price, language)
    )
    .map_err(output_failed)?;

    let description = product.description.get(language);
    if !description.is_empty() {
        writeln!(out, "{description}").map_err(output_failed)?;
    }

    let availability = match (product.in_stock(), language) {
        (true, Language::English) => "In stock",
        (true, Language::Arabic) => "متوفر",
        (false, Language::English) => "Sold out",
        (false, Language::Arabic) => "نفد من المخزون",
    };

    writeln!(out, "{availability}").map_err(output_failed)
}
