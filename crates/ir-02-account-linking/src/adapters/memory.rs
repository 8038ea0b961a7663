//! # In-Memory Stores
//!
//! `HashMap`-backed account and token stores behind `parking_lot` locks.
//! Tests can arm a one-shot write failure to exercise fault paths.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::entities::{Token, Web2Account};
use crate::domain::errors::StoreError;
use crate::ports::outbound::{TokenStore, Web2AccountStore};

/// In-memory web2 account store.
#[derive(Default)]
pub struct InMemoryWeb2AccountStore {
    accounts: RwLock<HashMap<Uuid, Web2Account>>,
    fail_next_write: Mutex<Option<StoreError>>,
}

impl InMemoryWeb2AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account, as onboarding would.
    pub fn insert(&self, account: Web2Account) {
        self.accounts.write().insert(account.id, account);
    }

    /// Make the next `save` fail with `error`.
    pub fn fail_next_write(&self, error: StoreError) {
        *self.fail_next_write.lock() = Some(error);
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[async_trait]
impl Web2AccountStore for InMemoryWeb2AccountStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Web2Account>, StoreError> {
        let id = Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))?;
        Ok(self.accounts.read().get(&id).cloned())
    }

    async fn save(&self, account: &Web2Account) -> Result<(), StoreError> {
        if let Some(error) = self.fail_next_write.lock().take() {
            return Err(error);
        }

        let mut accounts = self.accounts.write();
        match accounts.get_mut(&account.id) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(account.id.to_string())),
        }
    }
}

/// In-memory token store. Tokens are kept in creation order.
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<Vec<Token>>,
    fail_next_write: Mutex<Option<StoreError>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` or `save` fail with `error`.
    pub fn fail_next_write(&self, error: StoreError) {
        *self.fail_next_write.lock() = Some(error);
    }

    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }

    /// Snapshot of all tokens.
    pub fn all(&self) -> Vec<Token> {
        self.tokens.read().clone()
    }

    fn check_write(&self) -> Result<(), StoreError> {
        match self.fail_next_write.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, StoreError> {
        Ok(self.tokens.read().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_decimal_id(&self, decimal_id: &str) -> Result<Option<Token>, StoreError> {
        Ok(self
            .tokens
            .read()
            .iter()
            .rev()
            .find(|t| t.decimal_id == decimal_id)
            .cloned())
    }

    async fn create(&self, token: Token) -> Result<Token, StoreError> {
        self.check_write()?;

        let mut tokens = self.tokens.write();
        if tokens.iter().any(|t| t.id == token.id) {
            return Err(StoreError::Duplicate(token.id.to_string()));
        }
        tokens.push(token.clone());
        Ok(token)
    }

    async fn save(&self, token: &Token) -> Result<(), StoreError> {
        self.check_write()?;

        let mut tokens = self.tokens.write();
        match tokens.iter_mut().find(|t| t.id == token.id) {
            Some(stored) => {
                *stored = token.clone();
                Ok(())
            }
            None => Err(StoreError::Missing(token.id.to_string())),
        }
    }
}
