use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sink::{BatchMetadata, DeliveryBatch};

/// JSON body POSTed for one delivery batch.
///
/// `context` carries the run summary for the mode (search query, parent video,
/// or channel) and is repeated on every batch so each one stands alone.
#[derive(Debug, Serialize)]
pub struct DeliveryEnvelope<'a, C, T> {
    pub batch_info: BatchMetadata,
    pub context: &'a C,
    pub items: &'a [T],
    pub fetch_timestamp: DateTime<Utc>,
}

impl<'a, C, T> DeliveryEnvelope<'a, C, T> {
    #[must_use]
    pub fn new(batch: DeliveryBatch<'a, T>, context: &'a C, fetch_timestamp: DateTime<Utc>) -> Self {
        Self {
            batch_info: batch.metadata,
            context,
            items: batch.items,
            fetch_timestamp,
        }
    }
}
