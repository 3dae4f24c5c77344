//! In-memory account registry
//!
//! Accounts live only as long as the process. Passwords are stored as
//! bcrypt hashes and each email or phone number may back one account.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use oh_core::domain::entities::{AccountId, AccountProfile, AccountRole, Channel};
use oh_core::services::verification::AccountCreatorTrait;
use oh_shared::config::verification::DEFAULT_BCRYPT_COST;

use crate::{InfrastructureError, InfrastructureResult};

/// Account as held by the registry
#[derive(Debug, Clone, Serialize)]
pub struct StoredAccount {
    pub id: AccountId,
    pub role: AccountRole,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Thread-safe in-memory registry of created accounts
#[derive(Clone)]
pub struct InMemoryAccountRegistry {
    accounts: Arc<RwLock<HashMap<AccountId, StoredAccount>>>,
    bcrypt_cost: u32,
}

impl InMemoryAccountRegistry {
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_BCRYPT_COST)
    }

    /// Registry hashing passwords with the given bcrypt cost
    pub fn with_cost(bcrypt_cost: u32) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            bcrypt_cost,
        }
    }

    /// Store a verified profile, rejecting contacts already registered
    pub fn register(&self, profile: &AccountProfile) -> InfrastructureResult<AccountId> {
        let password_hash = bcrypt::hash(&profile.password, self.bcrypt_cost)?;

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| InfrastructureError::Account("Account registry lock poisoned".to_string()))?;

        for channel in Channel::ALL {
            if let Some(contact) = profile.contact(channel) {
                let taken = accounts
                    .values()
                    .any(|account| Self::stored_contact(account, channel) == Some(contact));
                if taken {
                    return Err(InfrastructureError::Account(format!(
                        "An account with this {} already exists",
                        channel
                    )));
                }
            }
        }

        let account = StoredAccount {
            id: Uuid::new_v4(),
            role: profile.role,
            display_name: profile.display_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            password_hash,
            created_at: Utc::now(),
        };
        let id = account.id;
        accounts.insert(id, account);

        tracing::info!(account_id = %id, role = %profile.role, "Account registered");
        Ok(id)
    }

    pub fn get(&self, id: &AccountId) -> Option<StoredAccount> {
        self.accounts.read().ok()?.get(id).cloned()
    }

    /// Account registered under a contact value
    pub fn find_by_contact(&self, channel: Channel, contact: &str) -> Option<StoredAccount> {
        self.accounts
            .read()
            .ok()?
            .values()
            .find(|account| Self::stored_contact(account, channel) == Some(contact))
            .cloned()
    }

    /// Check a password against the stored hash
    pub fn verify_password(&self, id: &AccountId, password: &str) -> InfrastructureResult<bool> {
        match self.get(id) {
            Some(account) => Ok(bcrypt::verify(password, &account.password_hash)?),
            None => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.read().map(|accounts| accounts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stored_contact(account: &StoredAccount, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Email => account.email.as_deref(),
            Channel::Phone => account.phone.as_deref(),
        }
    }
}

impl Default for InMemoryAccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountCreatorTrait for InMemoryAccountRegistry {
    fn create_account(&self, profile: &AccountProfile) -> Result<AccountId, String> {
        self.register(profile).map_err(|e| e.to_string())
    }
}
