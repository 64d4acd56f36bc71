//! In-memory stores used by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::{
    password::hash_password,
    repo::UserStore,
    repo_types::{NewUser, User},
};
use crate::dashboard::repo::SpptStore;
use crate::error::AppError;

pub const SEED_PASSWORD: &str = "password123";

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    /// Inserts a user with `SEED_PASSWORD` and the given active flag.
    pub fn seed(&self, email: &str, is_active: bool) -> User {
        let hash = hash_password(SEED_PASSWORD).expect("hash seed password");
        self.seed_raw(email, &hash, is_active)
    }

    /// Inserts an active user whose stored hash is taken verbatim.
    pub fn seed_with_hash(&self, email: &str, password_hash: &str) -> User {
        self.seed_raw(email, password_hash, true)
    }

    fn seed_raw(&self, email: &str, password_hash: &str, is_active: bool) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            full_name: None,
            is_active,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, new: NewUser) -> Result<User, AppError> {
        // Check and push under one lock, like a unique index.
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new.email) {
            return Err(AppError::AlreadyExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            full_name: new.full_name,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Rows are `(paid, owed)` pairs.
#[derive(Default)]
pub struct InMemorySpptStore {
    rows: Mutex<Vec<(bool, f64)>>,
}

impl InMemorySpptStore {
    pub fn push(&self, paid: bool, owed: f64) {
        self.rows.lock().unwrap().push((paid, owed));
    }
}

#[async_trait]
impl SpptStore for InMemorySpptStore {
    // Empty table reports no value at all, the way a driver may return NULL.
    async fn count_all(&self) -> Result<Option<i64>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok((!rows.is_empty()).then(|| rows.len() as i64))
    }

    async fn count_by_payment_status(&self, paid: bool) -> Result<Option<i64>, AppError> {
        let rows = self.rows.lock().unwrap();
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.iter().filter(|(p, _)| *p == paid).count() as i64))
    }

    async fn sum_owed(&self) -> Result<Option<f64>, AppError> {
        let rows = self.rows.lock().unwrap();
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.iter().map(|(_, owed)| owed).sum()))
    }
}
