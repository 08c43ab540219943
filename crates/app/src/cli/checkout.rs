use std::io;

use clap::Args;
use jam3a::{locale::Language, money::format_amount, validation::PaymentMethod};
use jam3a_app::checkout::{CheckoutError, checkout};

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// mada, credit_card, apple_pay or stc_pay
    #[arg(long)]
    payment: Option<PaymentMethod>,
}

pub(crate) async fn run(
    args: CheckoutArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let language = shell.language;
    let mut cart = shell
        .app
        .cart()
        .map_err(|error| format!("failed to load cart: {}", chain(&error)))?;

    let order = match checkout(&mut cart, shell.app.orders.as_ref(), args.payment).await {
        Ok(order) => order,
        Err(CheckoutError::Invalid(errors)) => {
            render::write_field_errors(out, &errors, language).map_err(output_failed)?;
            return Err("checkout form is invalid".to_string());
        }
        Err(error) => return Err(format!("checkout failed: {}", chain(&error))),
    };

    let placed = match language {
        Language::English => "Order placed",
        Language::Arabic => "تم تأكيد الطلب",
    };

    writeln!(
        out,
        "{placed}: {} · {}",
        order.id,
        format_amount(&order.total, language)
    )
    .map_err(output_failed)
}

pub(crate) async fn orders(shell: &Shell, out: &mut impl io::Write) -> Result<(), String> {
    let orders = shell
        .app
        .orders
        .list_orders()
        .await
        .map_err(|error| format!("failed to list orders: {}", chain(&error)))?;

    render::write_orders(out, &orders, shell.language).map_err(output_failed)
}
