use std::{error::Error, io};

use clap::{Parser, Subcommand};
use jam3a::locale::Language;
use jam3a_app::{config::AppConfig, context::AppContext, storage::FileStorage};

mod account;
mod cart;
mod checkout;
mod content;
mod deals;
mod language;
mod products;
mod render;
mod seller;
mod steps;

#[derive(Debug, Parser)]
#[command(name = "jam3a", about = "Jam3a group-buying storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse, join and run group deals
    Deals(deals::DealsCommand),

    /// Browse the product catalog
    Products(products::ProductsCommand),

    /// Manage the shopping cart
    Cart(cart::CartCommand),

    /// Order everything in the cart
    Checkout(checkout::CheckoutArgs),

    /// List your orders
    Orders,

    /// Sign in
    Login(account::LoginArgs),

    /// Create an account
    Register(account::RegisterArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Seller onboarding
    Seller(seller::SellerCommand),

    /// Show or change the display language
    Language(language::LanguageArgs),

    /// Show storefront content blocks
    Content(content::ContentArgs),
}

/// What every command runs against.
pub(crate) struct Shell {
    pub(crate) app: AppContext,
    pub(crate) language: Language,
}

#[cfg(test)]
impl Shell {
    /// English shell over the bundled catalog and in-memory storage.
    pub(crate) fn offline() -> Result<Self, jam3a_app::context::AppInitError> {
        use std::sync::Arc;

        use jam3a_app::{config::client::ClientConfig, storage::MemoryStorage};

        let config = ClientConfig {
            offline: true,
            ..ClientConfig::default()
        };

        Ok(Self {
            app: AppContext::with_storage(&config, Arc::new(MemoryStorage::new()))?,
            language: Language::English,
        })
    }
}

impl Cli {
    /// Parse arguments after loading `.env`.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        let _env = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Language for messages printed before or instead of a command's own output.
    pub(crate) fn language_hint(&self) -> Language {
        let storage = FileStorage::new(self.config.client.storage_dir.clone());

        language::resolve(&storage, self.config.lang)
    }

    pub(crate) async fn run(self, out: &mut impl io::Write) -> Result<(), String> {
        let app = AppContext::from_config(&self.config.client)
            .map_err(|error| format!("failed to start: {}", chain(&error)))?;

        let language = language::resolve(app.storage.as_ref(), self.config.lang);
        let shell = Shell { app, language };

        match self.command {
            Commands::Deals(command) => deals::run(command, &shell, out).await,
            Commands::Products(command) => products::run(command, &shell, out).await,
            Commands::Cart(command) => cart::run(command, &shell, out).await,
            Commands::Checkout(args) => checkout::run(args, &shell, out).await,
            Commands::Orders => checkout::orders(&shell, out).await,
            Commands::Login(args) => account::login(args, &shell, out).await,
            Commands::Register(args) => account::register(args, &shell, out).await,
            Commands::Logout => account::logout(&shell, out).await,
            Commands::Whoami => account::whoami(&shell, out).await,
            Commands::Seller(command) => seller::run(command, &shell, out).await,
            Commands::Language(args) => language::run(args, &shell, out),
            Commands::Content(args) => content::run(args, &shell, out).await,
        }
    }
}

/// `error` and its sources, outermost first.
pub(crate) fn chain(error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

pub(crate) fn output_failed(error: io::Error) -> String {
    format!("failed to write output: {error}")
}

#[cfg(test)]
mod tests {
    use jam3a_app::{api::ApiError, domain::deals::DealsServiceError};

    use super::*;

    #[test]
    fn chain_includes_every_source() {
        let error = DealsServiceError::Api(ApiError::UnexpectedShape("no deals field".to_string()));

        assert_eq!(
            chain(&error),
            "deals request failed: unexpected response shape: no deals field"
        );
    }

    #[test]
    fn parses_global_flags_after_the_subcommand() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["jam3a", "deals", "list", "--offline", "--lang", "ar"])?;

        assert!(cli.config.client.offline);
        assert_eq!(cli.config.lang, Some(Language::Arabic));

        Ok(())
    }
}
