//! CLI interface for Storefront

pub mod commands;
mod output;

pub use output::*;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::auth::DetailsForm;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version)]
#[command(about = "Sign in to the storefront and manage your account", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new storefront.toml configuration file
    Init,

    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        /// Prompted for when not given
        #[arg(short, long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create a new account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Prompted for when not given
        #[arg(short, long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[command(flatten)]
        details: DetailsArgs,
    },

    /// Sign out and forget the cached session
    Logout,

    /// Show the current session
    Status {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// View or edit your profile details
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Fetch your profile from the server
    Show {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Update your contact and shipping details
    Update {
        #[command(flatten)]
        details: DetailsArgs,
    },
}

/// Optional profile fields shared by `register` and `profile update`
#[derive(Args, Debug, Clone, Default)]
pub struct DetailsArgs {
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Numeric postal code
    #[arg(long)]
    pub pincode: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

impl From<DetailsArgs> for DetailsForm {
    fn from(args: DetailsArgs) -> Self {
        Self {
            address: args.address.unwrap_or_default(),
            city: args.city.unwrap_or_default(),
            pincode: args.pincode.unwrap_or_default(),
            country: args.country.unwrap_or_default(),
            phone: args.phone.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
