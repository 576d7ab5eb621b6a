//! Furniture domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ObjectId;
use crate::config::{COST_INTEGER_DIGITS, COST_SCALE};
use crate::errors::{AppError, AppResult};
use crate::types::SortField;

/// Furniture catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Furniture {
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f8")]
    pub id: ObjectId,
    #[schema(example = "Oak dining table")]
    pub name: String,
    #[schema(example = "Seats six")]
    pub description: Option<String>,
    #[schema(example = "tables")]
    pub category: String,
    /// Unit cost, serialized as a decimal string
    #[schema(value_type = String, example = "499.90")]
    pub cost: Decimal,
    #[schema(example = 12)]
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a furniture item being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFurniture {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub cost: Decimal,
    pub stock: i32,
}

impl NewFurniture {
    /// Enforce the cost and stock rules: both non-negative, cost fitting
    /// the stored `NUMERIC(12, 2)` column.
    pub fn validate(&self) -> AppResult<()> {
        check_cost(self.cost)?;
        check_stock(self.stock)
    }
}

/// Partial update of a furniture item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FurnitureChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cost: Option<Decimal>,
    pub stock: Option<i32>,
}

impl FurnitureChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.cost.is_none()
            && self.stock.is_none()
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(cost) = self.cost {
            check_cost(cost)?;
        }
        if let Some(stock) = self.stock {
            check_stock(stock)?;
        }
        Ok(())
    }
}

/// Fields the furniture listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnitureSortField {
    Name,
    Category,
    Cost,
    Stock,
    CreatedAt,
}

impl SortField for FurnitureSortField {
    const NAMES: &'static [&'static str] = &["name", "category", "cost", "stock", "created_at"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "category" => Some(Self::Category),
            "cost" => Some(Self::Cost),
            "stock" => Some(Self::Stock),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

fn check_cost(cost: Decimal) -> AppResult<()> {
    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(AppError::validation("Cost cannot be negative"));
    }
    if cost.normalize().scale() > COST_SCALE {
        return Err(AppError::validation(format!(
            "Cost cannot have more than {} decimal places",
            COST_SCALE
        )));
    }
    if cost >= Decimal::from(10_i64.pow(COST_INTEGER_DIGITS)) {
        return Err(AppError::validation(format!(
            "Cost cannot have more than {} digits before the decimal point",
            COST_INTEGER_DIGITS
        )));
    }
    Ok(())
}

fn check_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::validation("Stock cannot be negative"));
    }
    Ok(())
}
