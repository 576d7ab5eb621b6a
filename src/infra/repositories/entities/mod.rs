//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod address;
pub mod furniture;
pub mod user;
