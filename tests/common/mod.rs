//! Shared harness for router tests.
//!
//! The real services run on top of an in-memory repository, so requests go
//! through extractors, policy checks and services without a database.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::Value;
use tower::ServiceExt;

use furniture_store_api::api::{create_router, AppState};
use furniture_store_api::config::Config;
use furniture_store_api::domain::{
    Address, AddressChanges, Furniture, FurnitureChanges, FurnitureSortField, NewFurniture,
    NewUser, ObjectId, User, UserChanges, UserRole, UserSortField,
};
use furniture_store_api::errors::{AppError, AppResult};
use furniture_store_api::infra::{Database, FurnitureRepository, RepositorySet, UserRepository};
use furniture_store_api::services::{Authenticator, Claims, FurnitureCatalog, UserManager};
use furniture_store_api::types::{Page, PageRequest};

pub const JWT_SECRET: &str = "integration-test-secret-32-chars!!";

#[derive(Default)]
struct Tables {
    users: BTreeMap<ObjectId, User>,
    furniture: BTreeMap<ObjectId, Furniture>,
    store_reads: usize,
}

/// In-memory stand-in for the SeaORM stores.
#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

fn page_of<T: Clone, F>(rows: Vec<T>, request: &PageRequest<F>) -> Page<T> {
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.size as usize)
        .collect();
    Page::new(items, request, total)
}

impl MemoryStore {
    /// Number of single-record lookups served so far
    pub fn store_reads(&self) -> usize {
        self.tables.lock().unwrap().store_reads
    }

    pub fn insert_user(&self, email: &str, role: UserRole) -> User {
        let now = Utc::now();
        let id = ObjectId::new();
        let user = User {
            id,
            name: "Seeded".to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            phone: "555-0100".to_string(),
            role,
            addresses: vec![Address {
                id: ObjectId::new(),
                user_id: id,
                country: "Colombia".to_string(),
                state: "Antioquia".to_string(),
                street: "Calle 10".to_string(),
                city: "Medellin".to_string(),
                room_number: "301".to_string(),
            }],
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().users.insert(id, user.clone());
        user
    }

    pub fn insert_furniture(&self, name: &str) -> Furniture {
        let now = Utc::now();
        let item = Furniture {
            id: ObjectId::new(),
            name: name.to_string(),
            description: None,
            category: "tables".to_string(),
            cost: rust_decimal::Decimal::new(150_00, 2),
            stock: 2,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().furniture.insert(item.id, item.clone());
        item
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        tables.store_reads += 1;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self, request: PageRequest<UserSortField>) -> AppResult<Page<User>> {
        let rows = self.tables.lock().unwrap().users.values().cloned().collect();
        Ok(page_of(rows, &request))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let id = ObjectId::new();
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone: new_user.phone,
            role: new_user.role,
            addresses: new_user
                .addresses
                .into_iter()
                .map(|a| Address {
                    id: ObjectId::new(),
                    user_id: id,
                    country: a.country,
                    state: a.state,
                    street: a.street,
                    city: a.city,
                    room_number: a.room_number,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> AppResult<User> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .get_mut(&id)
            .ok_or(AppError::not_found("User", id))?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(phone) = changes.phone {
            user.phone = phone;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_role(&self, id: ObjectId, role: UserRole) -> AppResult<User> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .get_mut(&id)
            .ok_or(AppError::not_found("User", id))?;
        user.role = role;
        Ok(user.clone())
    }

    async fn find_address(&self, id: ObjectId) -> AppResult<Option<Address>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .values()
            .flat_map(|u| u.addresses.iter())
            .find(|a| a.id == id)
            .cloned())
    }

    async fn update_address(&self, id: ObjectId, changes: AddressChanges) -> AppResult<Address> {
        let mut tables = self.tables.lock().unwrap();
        let address = tables
            .users
            .values_mut()
            .flat_map(|u| u.addresses.iter_mut())
            .find(|a| a.id == id)
            .ok_or(AppError::not_found("Address", id))?;

        if let Some(country) = changes.country {
            address.country = country;
        }
        if let Some(state) = changes.state {
            address.state = state;
        }
        if let Some(street) = changes.street {
            address.street = street;
        }
        if let Some(city) = changes.city {
            address.city = city;
        }
        if let Some(room_number) = changes.room_number {
            address.room_number = room_number;
        }
        Ok(address.clone())
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        self.tables
            .lock()
            .unwrap()
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::not_found("User", id))
    }
}

#[async_trait]
impl FurnitureRepository for MemoryStore {
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Furniture>> {
        let mut tables = self.tables.lock().unwrap();
        tables.store_reads += 1;
        Ok(tables.furniture.get(&id).cloned())
    }

    async fn list(&self, request: PageRequest<FurnitureSortField>) -> AppResult<Page<Furniture>> {
        let rows = self.tables.lock().unwrap().furniture.values().cloned().collect();
        Ok(page_of(rows, &request))
    }

    async fn create(&self, item: NewFurniture) -> AppResult<Furniture> {
        let now = Utc::now();
        let created = Furniture {
            id: ObjectId::new(),
            name: item.name,
            description: item.description,
            category: item.category,
            cost: item.cost,
            stock: item.stock,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .unwrap()
            .furniture
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: ObjectId, changes: FurnitureChanges) -> AppResult<Furniture> {
        let mut tables = self.tables.lock().unwrap();
        let item = tables
            .furniture
            .get_mut(&id)
            .ok_or(AppError::not_found("Furniture", id))?;

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(description) = changes.description {
            item.description = Some(description);
        }
        if let Some(category) = changes.category {
            item.category = category;
        }
        if let Some(cost) = changes.cost {
            item.cost = cost;
        }
        if let Some(stock) = changes.stock {
            item.stock = stock;
        }
        Ok(item.clone())
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        self.tables
            .lock()
            .unwrap()
            .furniture
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::not_found("Furniture", id))
    }
}

/// Router wired with real services over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_database(MockDatabase::new(DatabaseBackend::Postgres))
    }

    /// Build the app with a specific mock database, used by the health check.
    pub fn with_database(mock: MockDatabase) -> Self {
        let store = MemoryStore::default();
        let repos = Arc::new(RepositorySet {
            users: Arc::new(store.clone()),
            furniture: Arc::new(store.clone()),
        });

        let config = Config::builder(JWT_SECRET).build().unwrap();
        let database = Arc::new(Database::from_connection(mock.into_connection()));

        let state = AppState::new(
            Arc::new(Authenticator::new(repos.clone(), config)),
            Arc::new(UserManager::new(repos.clone())),
            Arc::new(FurnitureCatalog::new(repos)),
            database,
        );

        Self {
            router: create_router(state),
            store,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

/// Sign a token for `user` the same way the login endpoint does.
pub fn token_for(user: &User) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}
