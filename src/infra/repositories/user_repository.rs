//! User repository: users and their addresses.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::address::{self, Entity as AddressEntity};
use super::entities::user::{self, Entity as UserEntity};
use super::{conflict_on_duplicate, sea_order};
use crate::domain::{
    Address, AddressChanges, NewUser, ObjectId, User, UserChanges, UserRole, UserSortField,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Page, PageRequest};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user (with addresses) by ID
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// One page of users
    async fn list(&self, request: PageRequest<UserSortField>) -> AppResult<Page<User>>;

    /// Insert a user and its addresses atomically
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply a partial update
    async fn update(&self, id: ObjectId, changes: UserChanges) -> AppResult<User>;

    /// Change a user's role
    async fn set_role(&self, id: ObjectId, role: UserRole) -> AppResult<User>;

    /// Find a single address by its own ID
    async fn find_address(&self, id: ObjectId) -> AppResult<Option<Address>>;

    /// Apply a partial update to one address
    async fn update_address(&self, id: ObjectId, changes: AddressChanges) -> AppResult<Address>;

    /// Delete a user and all of its addresses
    async fn delete(&self, id: ObjectId) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_addresses<C: ConnectionTrait>(db: &C, model: user::Model) -> AppResult<User> {
        let addresses = model
            .find_related(AddressEntity)
            .order_by_asc(address::Column::Id)
            .all(db)
            .await?;
        model.into_domain(addresses)
    }

    async fn find_model(&self, id: ObjectId) -> AppResult<user::Model> {
        UserEntity::find_by_id(id.to_hex())
            .one(&self.db)
            .await?
            .ok_or_not_found("User", id)
    }
}

fn sort_column(field: UserSortField) -> user::Column {
    match field {
        UserSortField::Name => user::Column::Name,
        UserSortField::Email => user::Column::Email,
        UserSortField::CreatedAt => user::Column::CreatedAt,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        match UserEntity::find_by_id(id.to_hex()).one(&self.db).await? {
            Some(model) => Self::with_addresses(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Self::with_addresses(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list(&self, request: PageRequest<UserSortField>) -> AppResult<Page<User>> {
        let mut query = UserEntity::find();
        if let Some(sort) = request.sort {
            query = query.order_by(sort_column(sort.field), sea_order(sort.order));
        }
        // ObjectIds start with their creation second, so this keeps pages stable
        let query = query.order_by_asc(user::Column::Id);

        let paginator = query.paginate(&self.db, request.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(request.page_index()).await?;
        let addresses = models.load_many(AddressEntity, &self.db).await?;

        let users = models
            .into_iter()
            .zip(addresses)
            .map(|(model, addresses)| model.into_domain(addresses))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(users, &request, total))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let id = ObjectId::new();
        let now = Utc::now();

        // Dropping the transaction without commit rolls it back
        let txn = self.db.begin().await?;

        let model = user::ActiveModel {
            id: Set(id.to_hex()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            phone: Set(new_user.phone),
            role: Set(new_user.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| conflict_on_duplicate(e, "User"))?;

        let mut addresses = Vec::with_capacity(new_user.addresses.len());
        for new_address in new_user.addresses {
            let row = address::ActiveModel {
                id: Set(ObjectId::new().to_hex()),
                user_id: Set(id.to_hex()),
                country: Set(new_address.country),
                state: Set(new_address.state),
                street: Set(new_address.street),
                city: Set(new_address.city),
                room_number: Set(new_address.room_number),
            }
            .insert(&txn)
            .await?;
            addresses.push(row);
        }

        txn.commit().await?;

        model.into_domain(addresses)
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> AppResult<User> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_on_duplicate(e, "Email"))?;
        Self::with_addresses(&self.db, model).await
    }

    async fn set_role(&self, id: ObjectId, role: UserRole) -> AppResult<User> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();
        active.role = Set(role.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Self::with_addresses(&self.db, model).await
    }

    async fn find_address(&self, id: ObjectId) -> AppResult<Option<Address>> {
        AddressEntity::find_by_id(id.to_hex())
            .one(&self.db)
            .await?
            .map(Address::try_from)
            .transpose()
    }

    async fn update_address(&self, id: ObjectId, changes: AddressChanges) -> AppResult<Address> {
        let mut active: address::ActiveModel = AddressEntity::find_by_id(id.to_hex())
            .one(&self.db)
            .await?
            .ok_or_not_found("Address", id)?
            .into();

        if let Some(country) = changes.country {
            active.country = Set(country);
        }
        if let Some(state) = changes.state {
            active.state = Set(state);
        }
        if let Some(street) = changes.street {
            active.street = Set(street);
        }
        if let Some(city) = changes.city {
            active.city = Set(city);
        }
        if let Some(room_number) = changes.room_number {
            active.room_number = Set(room_number);
        }

        Address::try_from(active.update(&self.db).await?)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        let txn = self.db.begin().await?;

        AddressEntity::delete_many()
            .filter(address::Column::UserId.eq(id.to_hex()))
            .exec(&txn)
            .await?;

        let result = UserEntity::delete_by_id(id.to_hex()).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("User", id));
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::Values;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};
    use std::collections::BTreeMap;

    use crate::domain::NewAddress;
    use crate::types::PaginationParams;

    fn user_row(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "hash".to_string(),
            phone: "555-0100".to_string(),
            role: "USER".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn address_row(user_id: &str) -> address::Model {
        address::Model {
            id: ObjectId::new().to_hex(),
            user_id: user_id.to_string(),
            country: "Colombia".to_string(),
            state: "Antioquia".to_string(),
            street: "Calle 10".to_string(),
            city: "Medellin".to_string(),
            room_number: "301".to_string(),
        }
    }

    #[tokio::test]
    async fn find_by_id_loads_addresses() {
        let id = ObjectId::new();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(&id.to_hex())]])
            .append_query_results([vec![address_row(&id.to_hex()), address_row(&id.to_hex())]])
            .into_connection();

        let user = UserStore::new(db).find_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.addresses.len(), 2);
        assert!(user.addresses.iter().all(|a| a.user_id == id));
    }

    #[tokio::test]
    async fn corrupt_stored_id_is_an_internal_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row("not-an-object-id")]])
            .append_query_results([Vec::<address::Model>::new()])
            .into_connection();

        let err = UserStore::new(db)
            .find_by_id(ObjectId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn create_inserts_user_and_addresses() {
        let id = ObjectId::new().to_hex();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_row(&id)]])
            .append_query_results([vec![address_row(&id)]])
            .into_connection();

        let new_user = NewUser {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "hash".to_string(),
            phone: "555-0100".to_string(),
            role: UserRole::User,
            addresses: vec![NewAddress {
                country: "Colombia".to_string(),
                state: "Antioquia".to_string(),
                street: "Calle 10".to_string(),
                city: "Medellin".to_string(),
                room_number: "301".to_string(),
            }],
        };

        let user = UserStore::new(db).create(new_user).await.unwrap();
        assert_eq!(user.addresses.len(), 1);
        assert_eq!(user.addresses[0].user_id, user.id);
    }

    #[tokio::test]
    async fn list_applies_sort_and_loads_addresses() {
        let id = ObjectId::new().to_hex();
        let count = BTreeMap::from([("num_items", Value::BigInt(Some(5)))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count]])
            .append_query_results([vec![user_row(&id)]])
            .append_query_results([vec![address_row(&id)]])
            .into_connection();

        let params = PaginationParams {
            page: 3,
            size: 2,
            sort_by: Some("-created_at".to_string()),
        };
        let request = params.into_request::<UserSortField>().unwrap();
        let page = UserStore::new(db.clone()).list(request).await.unwrap();

        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].addresses.len(), 1);

        let log: Vec<Transaction> = db.into_transaction_log();
        let stmt = log
            .iter()
            .flat_map(|txn| txn.statements())
            .find(|stmt| stmt.sql.contains("LIMIT"))
            .expect("page query was not logged");
        assert!(
            stmt.sql
                .contains(r#"ORDER BY "users"."created_at" DESC, "users"."id" ASC LIMIT $1 OFFSET $2"#),
            "{}",
            stmt.sql
        );
        assert_eq!(
            stmt.values,
            Some(Values(vec![Value::BigUnsigned(Some(2)), Value::BigUnsigned(Some(4))]))
        );
    }

    #[tokio::test]
    async fn deleting_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let id = ObjectId::new();
        let err = UserStore::new(db).delete(id).await.unwrap_err();
        assert!(matches!(err, AppError::IdNotFound { resource: "User", .. }));
    }

    #[tokio::test]
    async fn deleting_user_removes_addresses_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        assert!(UserStore::new(db).delete(ObjectId::new()).await.is_ok());
    }
}
