use std::io;

use clap::{Args, Subcommand};
use jam3a::{cart::CartLine, deals::DealId, locale::Language};

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,

    /// Add a product, or a deal with --deal
    Add(AddArgs),

    /// Change how many units of a product are in the cart
    Set(SetArgs),

    /// Remove a product
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product identifier, or deal identifier with --deal
    id: String,

    /// Units to add
    #[arg(long, short, default_value_t = 1)]
    quantity: u32,

    /// Treat the identifier as a deal and add it at the deal price
    #[arg(long)]
    deal: bool,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Product identifier
    id: String,

    /// New quantity; 0 removes the product
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Product identifier
    id: String,
}

pub(crate) async fn run(
    command: CartCommand,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let mut cart = shell
        .app
        .cart()
        .map_err(|error| format!("failed to load cart: {}", chain(&error)))?;

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => {
            let line = line_for(&args, shell).await?;

            cart.add(line.with_quantity(args.quantity))
                .map_err(|error| format!("failed to add to cart: {}", chain(&error)))?;
        }
        CartSubcommand::Set(args) => {
            cart.set_quantity(&args.id, args.quantity)
                .map_err(|error| format!("failed to update cart: {}", chain(&error)))?;
        }
        CartSubcommand::Remove(args) => {
            cart.remove(&args.id)
                .map_err(|error| format!("failed to remove from cart: {}", chain(&error)))?;
        }
        CartSubcommand::Clear => {
            cart.clear()
                .map_err(|error| format!("failed to clear cart: {}", chain(&error)))?;
        }
    }

    render::write_cart(out, cart.cart(), shell.language).map_err(output_failed)
}

async fn line_for(args: &AddArgs, shell: &Shell) -> Result<CartLine, String> {
    if args.deal {
        let deal = shell
            .app
            .deals
            .get_deal(DealId::new(args.id.clone()))
            .await
            .map_err(|error| format!("failed to load deal: {}", chain(&error)))?;

        let line = CartLine::new(deal.id.to_string(), deal.title.clone(), &deal.deal_price);

        return Ok(line.with_deal(deal.id));
    }

    let product = shell
        .app
        .products
        .get_product(args.id.clone())
        .await
        .map_err(|error| format!("failed to load product: {}", chain(&error)))?
        .value;

    if !product.in_stock() {
        return Err(match shell.language {
            Language::English => format!("{} is sold out", product.name.get(Language::English)),
            Language::Arabic => format!("نفد {} من المخزون", product.name.get(Language::Arabic)),
        });
    }

    Ok(product.to_cart_line())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn add(id: &str, quantity: u32, deal: bool) -> CartCommand {
        CartCommand {
            command: CartSubcommand::Add(AddArgs {
                id: id.to_string(),
                quantity,
                deal,
            }),
        }
    }

    #[tokio::test]
    async fn products_and_deals_land_in_the_stored_cart() -> TestResult {
        let shell = Shell::offline()?;
        let mut out = Vec::new();

        run(add("prod-kettle", 2, false), &shell, &mut out).await?;
        run(add("jam-air-fryer", 1, true), &shell, &mut out).await?;

        let cart = shell.app.cart()?;
        let deal_line = cart.cart().lines().iter().find(|line| line.deal_id.is_some());

        assert_eq!(cart.item_count(), 3);
        assert_eq!(
            deal_line.and_then(|line| line.deal_id.clone()),
            Some(DealId::new("jam-air-fryer"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn sold_out_products_are_refused() -> TestResult {
        let shell = Shell::offline()?;
        let mut out = Vec::new();

        let refused = run(add("prod-power-bank", 1, false), &shell, &mut out).await;

        assert!(
            refused.is_err_and(|message| message.contains("sold out")),
            "expected a sold-out refusal"
        );
        assert!(shell.app.cart()?.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn setting_zero_removes_the_line() -> TestResult {
        let shell = Shell::offline()?;
        let mut out = Vec::new();

        run(add("prod-dates", 1, false), &shell, &mut out).await?;
        run(
            CartCommand {
                command: CartSubcommand::Set(SetArgs {
                    id: "prod-dates".to_string(),
                    quantity: 0,
                }),
            },
            &shell,
            &mut out,
        )
        .await?;

        assert!(shell.app.cart()?.cart().is_empty());

        Ok(())
    }
}
