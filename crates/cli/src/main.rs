//! Clipjoint CLI - command-line frontend for the booking API.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (user info is forwarded to the backend as-is)
//! clipjoint signup --data '{"name":"Ada","email":"ada@example.com","password":"hunter2"}'
//!
//! # Log in / out
//! clipjoint login --email ada@example.com --password hunter2
//! clipjoint logout
//!
//! # Browse
//! clipjoint shop list
//! clipjoint shop get 5c9a1e2f4b
//! clipjoint appointment add --data '{"barbershop":"5c9a1e2f4b","time":"09:30"}'
//! clipjoint available-times 5c9a1e2f4b --date 2024-01-01
//! ```
//!
//! # Environment Variables
//!
//! - `CLIPJOINT_API_URL` - Base URL of the booking API
//! - `CLIPJOINT_SESSION_FILE` - Path of the persisted session marker

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use clipjoint_client::{BookingClient, ClientConfig};

mod commands;
mod nav;

#[derive(Parser)]
#[command(name = "clipjoint")]
#[command(author, version, about = "Clipjoint booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup {
        /// Registration payload, forwarded to the backend as-is
        #[arg(short, long)]
        data: String,
    },
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log out (local state clears immediately)
    Logout,
    /// Show login state and the stored session marker
    Status,
    /// Render the footer navigation for the current login state
    Nav,
    /// Manage barbershops
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Manage appointments
    Appointment {
        #[command(subcommand)]
        action: AppointmentAction,
    },
    /// List available slots for a shop on a date
    AvailableTimes {
        /// Barbershop id
        shop_id: String,

        /// Date of interest (YYYY-MM-DD)
        #[arg(short, long)]
        date: chrono::NaiveDate,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// List all barbershops
    List,
    /// Fetch one barbershop
    Get {
        /// Barbershop id
        id: String,
    },
    /// Create a barbershop
    Add {
        /// Shop payload, forwarded to the backend as-is
        #[arg(short, long)]
        data: String,
    },
}

#[derive(Subcommand)]
enum AppointmentAction {
    /// List all appointments
    List,
    /// Fetch one appointment
    Get {
        /// Appointment id
        id: String,
    },
    /// Create an appointment
    Add {
        /// Appointment payload, forwarded to the backend as-is
        #[arg(short, long)]
        data: String,
    },
    /// Delete an appointment
    Delete {
        /// Appointment id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clipjoint=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = BookingClient::new(&config)?;

    match cli.command {
        Commands::Signup { data } => commands::auth::signup(&client, &data).await?,
        Commands::Login { email, password } => {
            commands::auth::login(&client, &email, password).await?;
        }
        Commands::Logout => commands::auth::logout(&client)?,
        Commands::Status => commands::auth::status(&client)?,
        Commands::Nav => nav::render(&client),
        Commands::Shop { action } => match action {
            ShopAction::List => commands::shops::list(&client).await?,
            ShopAction::Get { id } => commands::shops::get(&client, &id).await?,
            ShopAction::Add { data } => commands::shops::add(&client, &data).await?,
        },
        Commands::Appointment { action } => match action {
            AppointmentAction::List => commands::appointments::list(&client).await?,
            AppointmentAction::Get { id } => commands::appointments::get(&client, &id).await?,
            AppointmentAction::Add { data } => commands::appointments::add(&client, &data).await?,
            AppointmentAction::Delete { id } => {
                commands::appointments::delete(&client, &id).await?;
            }
        },
        Commands::AvailableTimes { shop_id, date } => {
            commands::appointments::available_times(&client, &shop_id, date).await?;
        }
    }
    Ok(())
}
