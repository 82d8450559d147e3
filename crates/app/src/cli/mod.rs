//! `dacha` command line.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use thiserror::Error;

use dacha::{
    auth::AuthError, checkout::CheckoutError, items::ItemId, reservation::ReservationError,
};

use crate::{
    api::ApiError,
    config::{AppConfig, LoggingConfig},
    context::{AppContext, AppInitError},
};

mod account;
mod cart;
mod catalog;
mod checkout;
mod render;
mod reserve;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The application could not start.
    #[error(transparent)]
    Init(#[from] AppInitError),

    /// A backend request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Sign-in or registration failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Reservation failed.
    #[error(transparent)]
    Reservation(#[from] ReservationError),

    /// The dish is not on the menu.
    #[error("блюдо {0} не найдено в меню")]
    UnknownItem(ItemId),

    /// The dish is not in the cart.
    #[error("блюда {0} нет в корзине")]
    NotInCart(ItemId),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Dacha restaurant storefront
#[derive(Debug, Parser)]
#[command(name = "dacha", about = "Dacha restaurant storefront", long_about = None)]
pub struct Cli {
    /// Runtime configuration.
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the backend is up
    Status,

    /// Browse the menu
    Menu(catalog::MenuArgs),

    /// Show today's business lunch
    Lunch,

    /// Show banquet menus
    Banquets,

    /// Show or change the cart
    Cart(cart::CartCommand),

    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),

    /// Book a table
    Reserve(reserve::ReserveArgs),

    /// Sign in with phone and password
    Login(account::LoginArgs),

    /// Create an account
    Register(account::RegisterArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show order history and saved addresses
    Profile,
}

impl Cli {
    /// Load `.env`, then parse CLI arguments and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Logging settings.
    pub fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    /// Build the app context and run the command.
    ///
    /// # Errors
    ///
    /// Returns the failure of the command.
    pub async fn run(self, out: &mut impl Write) -> Result<(), CliError> {
        let mut context = AppContext::from_config(&self.config)?;

        let result = self.command.run(&mut context, out).await;

        context.save_session();

        result
    }

    /// Run the command against an existing context.
    ///
    /// # Errors
    ///
    /// Returns the failure of the command.
    pub async fn run_with(
        self,
        context: &mut AppContext,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        self.command.run(context, out).await
    }
}

impl Commands {
    async fn run(self, context: &mut AppContext, out: &mut impl Write) -> Result<(), CliError> {
        match self {
            Commands::Status => catalog::status(context, out).await,
            Commands::Menu(args) => catalog::menu(args, context, out).await,
            Commands::Lunch => catalog::lunch(context, out).await,
            Commands::Banquets => catalog::banquets(context, out).await,
            Commands::Cart(command) => cart::run(command, context, out).await,
            Commands::Checkout(args) => checkout::run(args, context, out).await,
            Commands::Reserve(args) => reserve::run(args, context, out).await,
            Commands::Login(args) => account::login(args, context, out).await,
            Commands::Register(args) => account::register(args, context, out).await,
            Commands::Logout => account::logout(context, out).await,
            Commands::Whoami => account::whoami(context, out).await,
            Commands::Profile => account::profile(context, out).await,
        }
    }
}
