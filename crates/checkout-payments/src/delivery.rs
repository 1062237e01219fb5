//! Webhook Delivery Log
//!
//! Chimoney delivers webhooks at least once. The log remembers which
//! `(issueID, eventType)` pairs were already dispatched so a redelivery can be
//! acknowledged without running the handler twice. It lives in process memory
//! and forgets the oldest entries once full.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use crate::error::{PaymentError, Result};

/// Default number of deliveries remembered
pub const DEFAULT_CAPACITY: usize = 1024;

/// Identity of a webhook delivery
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeliveryKey {
    pub issue_id: String,
    pub event_type: String,
}

impl DeliveryKey {
    pub fn new(issue_id: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            issue_id: issue_id.into(),
            event_type: event_type.into(),
        }
    }
}

impl std::fmt::Display for DeliveryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.issue_id, self.event_type)
    }
}

/// Delivery log trait
pub trait DeliveryLog: Send + Sync {
    /// Record a delivery.
    ///
    /// Returns `None` the first time a key is seen, or the time it was first
    /// recorded when it is a redelivery.
    fn record(&self, key: &DeliveryKey) -> Result<Option<DateTime<Utc>>>;

    /// Number of deliveries currently remembered
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

struct Entries {
    first_seen: HashMap<DeliveryKey, DateTime<Utc>>,
    order: VecDeque<DeliveryKey>,
}

/// In-memory delivery log with FIFO eviction
pub struct MemoryDeliveryLog {
    entries: RwLock<Entries>,
    capacity: usize,
}

impl Default for MemoryDeliveryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDeliveryLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a log remembering at most `capacity` deliveries (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(Entries {
                first_seen: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl DeliveryLog for MemoryDeliveryLog {
    fn record(&self, key: &DeliveryKey) -> Result<Option<DateTime<Utc>>> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| PaymentError::Storage(e.to_string()))?;

        if let Some(first_seen) = entries.first_seen.get(key) {
            return Ok(Some(*first_seen));
        }

        if entries.order.len() >= self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.first_seen.remove(&oldest);
            }
        }

        entries.first_seen.insert(key.clone(), Utc::now());
        entries.order.push_back(key.clone());

        Ok(None)
    }

    fn len(&self) -> Result<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PaymentError::Storage(e.to_string()))?;
        Ok(entries.order.len())
    }
}
