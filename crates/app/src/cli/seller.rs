use std::io;

use clap::{Args, Subcommand};
use jam3a::{
    locale::Language,
    wizard::{Wizard, seller::SellerForm},
};
use jam3a_app::wizards::{WizardSubmitError, submit_seller_application};

use crate::cli::{Shell, chain, output_failed, steps};

#[derive(Debug, Args)]
pub(crate) struct SellerCommand {
    #[command(subcommand)]
    command: SellerSubcommand,
}

#[derive(Debug, Subcommand)]
enum SellerSubcommand {
    /// Apply to sell on Jam3a
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// Store owner's full name
    #[arg(long)]
    owner_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Saudi mobile number
    #[arg(long)]
    phone: String,

    /// Registered business name
    #[arg(long)]
    business_name: String,

    /// Ten-digit commercial registration number
    #[arg(long = "cr")]
    commercial_registration: String,

    /// City of operation
    #[arg(long)]
    city: String,

    /// Categories the store sells, comma separated
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Store description
    #[arg(long, default_value = "")]
    description: String,

    /// Payout IBAN (SA followed by 22 digits)
    #[arg(long)]
    iban: String,

    /// Accept the seller terms
    #[arg(long)]
    accept_terms: bool,
}

pub(crate) async fn run(
    command: SellerCommand,
    shell: &Shell,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        SellerSubcommand::Apply(args) => apply(args, shell, out).await,
    }
}

async fn apply(args: ApplyArgs, shell: &Shell, out: &mut impl io::Write) -> Result<(), String> {
    let language = shell.language;

    let mut wizard = Wizard::new(SellerForm {
        owner_name: args.owner_name,
        email: args.email,
        phone: args.phone,
        business_name: args.business_name,
        commercial_registration: args.commercial_registration,
        city: args.city,
        categories: args.categories,
        description: args.description,
        iban: args.iban,
        accepted_terms: args.accept_terms,
    })
    .map_err(|error| error.to_string())?;

    steps::walk_to_review(&mut wizard, out, language)?;

    let receipt = match submit_seller_application(&mut wizard, shell.app.auth.as_ref()).await {
        Ok(receipt) => receipt,
        Err(WizardSubmitError::Wizard(error)) => {
            steps::report_refusal(&error, out, language)?;
            return Err(error.to_string());
        }
        Err(error) => {
            return Err(format!(
                "failed to submit seller application: {}",
                chain(&error)
            ));
        }
    };

    let received = match language {
        Language::English => "Application received. Reference:",
        Language::Arabic => "تم استلام طلبك. الرقم المرجعي:",
    };

    writeln!(out, "{received} {}", receipt.reference).map_err(output_failed)?;

    if let Some(status) = receipt.status {
        writeln!(out, "{status}").map_err(output_failed)?;
    }

    Ok(())
}
