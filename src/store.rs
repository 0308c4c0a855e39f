// 🗄️ Receipt Store - Identity for accepted receipts
// The UUID is the receipt's identity; the receipt itself is an immutable value.
// Storage is injected into the server through a trait object, never a global.

use crate::receipt::Receipt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

// ============================================================================
// STORED RECEIPT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReceipt {
    /// Opaque identifier handed back to the caller
    pub id: String,

    pub receipt: Receipt,

    /// When the receipt was accepted
    pub received_at: DateTime<Utc>,
}

impl StoredReceipt {
    /// Wrap a receipt with a fresh UUID
    pub fn new(receipt: Receipt) -> Self {
        StoredReceipt {
            id: Uuid::new_v4().to_string(),
            receipt,
            received_at: Utc::now(),
        }
    }
}

// ============================================================================
// STORE TRAIT
// ============================================================================

pub trait ReceiptStore: Send + Sync {
    /// Store a receipt under a newly generated id
    fn insert(&self, receipt: Receipt) -> StoredReceipt;

    /// Look up a receipt by id
    fn get(&self, id: &str) -> Option<StoredReceipt>;

    /// Number of stored receipts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceiptStore {
    receipts: Arc<RwLock<HashMap<String, StoredReceipt>>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn insert(&self, receipt: Receipt) -> StoredReceipt {
        let stored = StoredReceipt::new(receipt);

        // Entries are plain values, a poisoned lock leaves nothing half-written
        let mut receipts = self.receipts.write().unwrap_or_else(|e| e.into_inner());
        receipts.insert(stored.id.clone(), stored.clone());

        stored
    }

    fn get(&self, id: &str) -> Option<StoredReceipt> {
        let receipts = self.receipts.read().unwrap_or_else(|e| e.into_inner());
        receipts.get(id).cloned()
    }

    fn len(&self) -> usize {
        let receipts = self.receipts.read().unwrap_or_else(|e| e.into_inner());
        receipts.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
