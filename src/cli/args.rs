//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

use crate::domain::UserRole;

/// Furniture Store API - users, addresses and furniture catalogue
#[derive(Parser, Debug)]
#[command(name = "furniture-store-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage user accounts
    Users(UsersArgs),
}

/// Arguments for the serve command.
///
/// Both default to `SERVER_HOST` / `SERVER_PORT` from the configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the users command
#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// User management actions
#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// Assign a role to an existing account
    Promote {
        /// Email the account was registered with
        email: String,

        /// Role to assign (ADMIN or USER)
        #[arg(short, long, default_value = "ADMIN")]
        role: UserRole,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promote_defaults_to_admin() {
        let cli = Cli::parse_from(["furniture-store-api", "users", "promote", "ops@example.com"]);
        match cli.command {
            Commands::Users(UsersArgs {
                action: UsersAction::Promote { email, role },
            }) => {
                assert_eq!(email, "ops@example.com");
                assert_eq!(role, UserRole::Admin);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = Cli::try_parse_from([
            "furniture-store-api",
            "users",
            "promote",
            "ops@example.com",
            "--role",
            "root",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn serve_accepts_host_and_port() {
        let cli = Cli::parse_from(["furniture-store-api", "serve", "-H", "127.0.0.1", "-p", "8080"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
