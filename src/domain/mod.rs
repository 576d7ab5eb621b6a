//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the authorization policy, independent of
//! HTTP and persistence concerns.

pub mod furniture;
pub mod object_id;
pub mod password;
pub mod policy;
pub mod user;

pub use furniture::{Furniture, FurnitureChanges, FurnitureSortField, NewFurniture};
pub use object_id::{InvalidObjectId, ObjectId};
pub use password::Password;
pub use policy::{authorize, Access};
pub use user::{
    Address, AddressChanges, NewAddress, NewUser, User, UserChanges, UserResponse, UserRole,
    UserSortField,
};
