use std::{io, sync::Arc};

use clap::Args;
use jam3a::{
    deals::DealId,
    join::{JoinFlowError, JoinState},
    locale::Language,
    validation::PaymentMethod,
};
use jam3a_app::join::{JoinController, JoinError};
use jiff::Timestamp;

use crate::cli::{Shell, chain, output_failed, render};

#[derive(Debug, Args)]
pub(crate) struct JoinDealArgs {
    /// Deal identifier
    id: String,

    /// Your full name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Saudi mobile number, e.g. 05XXXXXXXX
    #[arg(long)]
    phone: String,

    /// mada, credit_card, apple_pay or stc_pay
    #[arg(long)]
    payment: Option<PaymentMethod>,
}

pub(crate) async fn run(
    args: JoinDealArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let language = shell.language;
    let mut controller =
        JoinController::open(Arc::clone(&shell.app.deals), DealId::new(args.id), language).await;

    if let JoinState::Error {
        deal: None,
        failure,
        ..
    } = controller.flow().state()
    {
        writeln!(out, "{}", failure.message(language)).map_err(output_failed)?;
        return Err("deal could not be loaded".to_string());
    }

    let Some(form) = controller.form_mut() else {
        return Err("join form is not available".to_string());
    };

    form.name = args.name;
    form.email = args.email;
    form.phone = args.phone;
    form.payment = args.payment;

    if let Err(error) = controller.submit(Timestamp::now()).await {
        if let JoinState::Error { failure, .. } = controller.flow().state() {
            writeln!(out, "{}", failure.message(language)).map_err(output_failed)?;
        }

        return Err(match error {
            JoinError::Flow(JoinFlowError::Invalid(_)) => "join form is invalid".to_string(),
            other => format!("failed to join deal: {}", chain(&other)),
        });
    }

    let JoinState::Success { deal, invitation } = controller.flow().state() else {
        return Err("join did not complete".to_string());
    };

    let joined = match language {
        Language::English => "You're in!",
        Language::Arabic => "تم انضمامك!",
    };

    writeln!(out, "{joined}").map_err(output_failed)?;
    render::write_deal(out, deal, Timestamp::now(), language).map_err(output_failed)?;
    writeln!(out, "{}", invitation.message(language)).map_err(output_failed)
}
