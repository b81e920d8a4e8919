//! Accounts domain state and auth backend integration

use crate::UserRepository;
use axum::extract::FromRef;
use sqlx::SqlitePool;
use xsslab_auth::AuthBackend;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub users: UserRepository,
    pub auth: AuthBackend,
}

impl AccountsState {
    pub fn new(pool: SqlitePool, auth: AuthBackend) -> Self {
        Self {
            users: UserRepository::new(pool),
            auth,
        }
    }
}

impl FromRef<AccountsState> for AuthBackend {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}
