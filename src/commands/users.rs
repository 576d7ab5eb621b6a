//! Users command - account administration from the command line.

use crate::cli::args::{UsersAction, UsersArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the users command
pub async fn execute(args: UsersArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection(), config);

    match args.action {
        UsersAction::Promote { email, role } => {
            let user = services.users().assign_role(&email, role).await?;
            println!("{} is now {}", user.email, user.role);
        }
    }

    Ok(())
}
