//! Contact list and recent-call history
//!
//! Both lists are cached copies of backend data, replaced wholesale on a
//! successful fetch. A failed fetch leaves the cached list as it was.

use crate::domain::call_history::{day_label, group_by_day, CallHistoryEntry};
use crate::domain::contact::{
    filter_contacts, group_by_first_letter, Contact, ContactUpdate, NewContact,
};
use crate::domain::shared::UserId;
use crate::infrastructure::backend::{BackendApi, ClientError, StatusResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

const MUTATION_REJECTED: &str = "something went wrong";

/// What to do when a list fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Log the failure and keep the stale list
    #[default]
    Silent,
    /// Retry transient failures with exponential backoff, then behave like `Silent`
    Retry {
        max_retries: u32,
        initial_backoff_ms: u64,
    },
}

impl FetchPolicy {
    /// Run `op` under this policy
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if let FetchPolicy::Retry {
                max_retries,
                initial_backoff_ms,
            } = *self
            {
                if err.is_retryable() && attempt < max_retries {
                    let backoff_ms = initial_backoff_ms.saturating_mul(2_u64.saturating_pow(attempt));
                    attempt += 1;
                    warn!(
                        "{} fetch failed ({}) - retry {}/{} after {}ms",
                        label, err, attempt, max_retries, backoff_ms
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    continue;
                }
            }

            warn!("{} fetch failed, keeping previous list: {}", label, err);
            return Err(err);
        }
    }
}

fn rejected(message: Option<String>, fallback: &str) -> ClientError {
    ClientError::Rejected(
        message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    )
}

fn ensure_success(response: StatusResponse) -> Result<(), ClientError> {
    if response.success {
        Ok(())
    } else {
        Err(rejected(
            response.failure_message().map(str::to_string),
            MUTATION_REJECTED,
        ))
    }
}

/// Cached contact list with backend-backed mutations
pub struct ContactDirectory {
    backend: Arc<dyn BackendApi>,
    policy: FetchPolicy,
    contacts: RwLock<Vec<Contact>>,
}

impl ContactDirectory {
    pub fn new(backend: Arc<dyn BackendApi>, policy: FetchPolicy) -> Self {
        Self {
            backend,
            policy,
            contacts: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the list; returns how many contacts are now cached
    pub async fn fetch(&self, user_id: UserId, token: &str) -> Result<usize, ClientError> {
        let backend = &self.backend;
        let contacts = self
            .policy
            .run("Contact list", || async move {
                let response = backend.contact_list(user_id, token).await?;
                if response.success {
                    Ok(response.contact_data)
                } else {
                    Err(rejected(response.error_msg, "Failed to load contacts"))
                }
            })
            .await?;

        let count = contacts.len();
        *self.contacts.write().await = contacts;
        info!("Loaded {} contacts for user {}", count, user_id);
        Ok(count)
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.contacts.read().await.clone()
    }

    /// Contact saved under exactly this number
    pub async fn find_by_phone(&self, phone: &str) -> Option<Contact> {
        self.contacts
            .read()
            .await
            .iter()
            .find(|c| c.phone == phone)
            .cloned()
    }

    pub async fn search(&self, query: &str) -> Vec<Contact> {
        let contacts = self.contacts.read().await;
        filter_contacts(&contacts, query).into_iter().cloned().collect()
    }

    /// Matching contacts grouped by the first letter of their name
    pub async fn grouped(&self, query: &str) -> BTreeMap<String, Vec<Contact>> {
        let contacts = self.contacts.read().await;
        group_by_first_letter(filter_contacts(&contacts, query))
            .into_iter()
            .map(|(letter, group)| (letter, group.into_iter().cloned().collect()))
            .collect()
    }

    pub async fn create(
        &self,
        user_id: UserId,
        contact: &NewContact,
        token: &str,
    ) -> Result<(), ClientError> {
        let response = self.backend.create_contact(user_id, contact, token).await?;
        ensure_success(response)?;
        info!("Created contact {}", contact.name);
        self.refresh(user_id, token).await;
        Ok(())
    }

    pub async fn update(
        &self,
        user_id: UserId,
        contact: &ContactUpdate,
        token: &str,
    ) -> Result<(), ClientError> {
        let response = self.backend.update_contact(user_id, contact, token).await?;
        ensure_success(response)?;
        info!("Updated contact {}", contact.id);
        self.refresh(user_id, token).await;
        Ok(())
    }

    pub async fn delete(
        &self,
        user_id: UserId,
        contact_id: i64,
        token: &str,
    ) -> Result<(), ClientError> {
        let response = self.backend.delete_contact(user_id, contact_id, token).await?;
        ensure_success(response)?;
        info!("Deleted contact {}", contact_id);
        self.refresh(user_id, token).await;
        Ok(())
    }

    // The mutation already succeeded; a failed re-fetch only leaves the cache stale.
    async fn refresh(&self, user_id: UserId, token: &str) {
        let _ = self.fetch(user_id, token).await;
    }
}

/// Cached recent-call history
pub struct CallHistory {
    backend: Arc<dyn BackendApi>,
    policy: FetchPolicy,
    entries: RwLock<Vec<CallHistoryEntry>>,
}

impl CallHistory {
    pub fn new(backend: Arc<dyn BackendApi>, policy: FetchPolicy) -> Self {
        Self {
            backend,
            policy,
            entries: RwLock::new(Vec::new()),
        }
    }

    pub async fn fetch(&self, user_id: UserId, token: &str) -> Result<usize, ClientError> {
        let backend = &self.backend;
        let entries = self
            .policy
            .run("Recent calls", || async move {
                let response = backend.recent_calls(user_id, token).await?;
                if response.success {
                    Ok(response.call_data)
                } else {
                    Err(rejected(response.error_msg, "Failed to load recent calls"))
                }
            })
            .await?;

        let count = entries.len();
        *self.entries.write().await = entries;
        info!("Loaded {} recent calls for user {}", count, user_id);
        Ok(count)
    }

    pub async fn entries(&self) -> Vec<CallHistoryEntry> {
        self.entries.read().await.clone()
    }

    /// Put a locally dialed number at the top of the list
    pub async fn record_local(
        &self,
        phone: impl Into<String>,
        name: Option<String>,
    ) -> CallHistoryEntry {
        let mut entry = CallHistoryEntry::outgoing(phone);
        entry.name = name;
        self.entries.write().await.insert(0, entry.clone());
        entry
    }

    /// Day sections, newest first, labelled "Today", "Yesterday" or the date
    pub async fn grouped(&self) -> Vec<(String, Vec<CallHistoryEntry>)> {
        let today = Utc::now().date_naive();
        let entries = self.entries.read().await;
        group_by_day(&entries)
            .into_iter()
            .map(|(day, group)| {
                (
                    day_label(day, today),
                    group.into_iter().cloned().collect(),
                )
            })
            .collect()
    }
}
