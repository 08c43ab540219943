use std::io;

use clap::Args;
use jam3a::{
    locale::Language,
    validation::PaymentMethod,
    wizard::{
        Wizard,
        start_jam3a::{DEFAULT_GROUP_SIZE, DealDuration, StartJam3aForm},
    },
};
use jam3a_app::wizards::{WizardSubmitError, start_jam3a};
use jiff::Timestamp;

use crate::cli::{Shell, chain, output_failed, render, steps};

#[derive(Debug, Args)]
pub(crate) struct StartDealArgs {
    /// Product the group buys
    #[arg(long)]
    product: String,

    /// Participants needed, you included
    #[arg(long, default_value_t = DEFAULT_GROUP_SIZE)]
    size: u32,

    /// Deal window: 24h, 48h, 72h or 7d
    #[arg(long)]
    duration: Option<DealDuration>,

    /// Friend to invite by email; repeat for more
    #[arg(long = "invite")]
    invitees: Vec<String>,

    /// mada, credit_card, apple_pay or stc_pay
    #[arg(long)]
    payment: Option<PaymentMethod>,

    /// Accept the group-buying terms
    #[arg(long)]
    accept_terms: bool,
}

pub(crate) async fn run(
    args: StartDealArgs,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let language = shell.language;

    let mut wizard = Wizard::new(StartJam3aForm {
        product_id: Some(args.product),
        group_size: args.size,
        duration: args.duration,
        invitees: args.invitees,
        payment: args.payment,
        accepted_terms: args.accept_terms,
    })
    .map_err(|error| error.to_string())?;

    steps::walk_to_review(&mut wizard, out, language)?;

    let deal = match start_jam3a(&mut wizard, shell.app.deals.as_ref()).await {
        Ok(deal) => deal,
        Err(WizardSubmitError::Wizard(error)) => {
            steps::report_refusal(&error, out, language)?;
            return Err(error.to_string());
        }
        Err(error) => return Err(format!("failed to start a jam3a: {}", chain(&error))),
    };

    let started = match language {
        Language::English => "Your Jam3a is live. Share it to fill the group:",
        Language::Arabic => "أصبحت جمعتك متاحة. شاركها لإكمال المجموعة:",
    };

    writeln!(out, "{started} /jam3a/join/{}", deal.id).map_err(output_failed)?;
    render::write_deal(out, &deal, Timestamp::now(), language).map_err(output_failed)
}
