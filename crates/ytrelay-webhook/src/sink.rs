//! Incremental delivery: split a collection into numbered batches and send
//! them one after another.
//!
//! Delivery is best effort. A failed batch is logged and recorded in the
//! [`DeliveryReport`]; later batches are still attempted.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WebhookError;

/// Framing for one batch, sent to the receiver as `batch_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// 1-based.
    pub batch_number: usize,
    /// Items in this batch.
    pub batch_size: usize,
    pub total_batches: usize,
    pub total_items: usize,
    /// True on the last batch only.
    pub is_final_batch: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct DeliveryBatch<'a, T> {
    pub metadata: BatchMetadata,
    pub items: &'a [T],
}

/// Splits `items` into consecutive batches of `batch_size`; the last one
/// holds the remainder. A `batch_size` of 0 is treated as 1.
pub fn batches<T>(items: &[T], batch_size: usize) -> impl Iterator<Item = DeliveryBatch<'_, T>> {
    let batch_size = batch_size.max(1);
    let total_batches = items.len().div_ceil(batch_size);
    let total_items = items.len();
    items
        .chunks(batch_size)
        .enumerate()
        .map(move |(index, chunk)| DeliveryBatch {
            metadata: BatchMetadata {
                batch_number: index + 1,
                batch_size: chunk.len(),
                total_batches,
                total_items,
                is_final_batch: index + 1 == total_batches,
            },
            items: chunk,
        })
}

#[derive(Debug)]
pub struct BatchFailure {
    pub batch_number: usize,
    pub batch_size: usize,
    pub error: WebhookError,
}

#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub total_batches: usize,
    pub delivered_batches: usize,
    pub delivered_items: usize,
    pub failures: Vec<BatchFailure>,
}

impl DeliveryReport {
    /// True only if every batch was accepted. An empty delivery succeeds.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sends `items` in batches through `send`, sleeping `delay` between sends.
///
/// Every batch is attempted in order regardless of earlier failures. Empty
/// input sends nothing and reports success.
pub async fn deliver<'a, T, F, Fut>(
    items: &'a [T],
    batch_size: usize,
    delay: Duration,
    mut send: F,
) -> DeliveryReport
where
    F: FnMut(DeliveryBatch<'a, T>) -> Fut,
    Fut: Future<Output = Result<(), WebhookError>>,
{
    let mut report = DeliveryReport {
        total_batches: items.len().div_ceil(batch_size.max(1)),
        ..DeliveryReport::default()
    };

    for batch in batches(items, batch_size) {
        let BatchMetadata {
            batch_number,
            batch_size,
            total_batches,
            is_final_batch,
            ..
        } = batch.metadata;

        if batch_number > 1 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match send(batch).await {
            Ok(()) => {
                tracing::info!(
                    batch_number,
                    total_batches,
                    batch_size,
                    is_final_batch,
                    "delivered batch"
                );
                report.delivered_batches += 1;
                report.delivered_items += batch_size;
            }
            Err(e) => {
                tracing::warn!(
                    batch_number,
                    total_batches,
                    batch_size,
                    error = %e,
                    "batch delivery failed, continuing with the next batch"
                );
                report.failures.push(BatchFailure {
                    batch_number,
                    batch_size,
                    error: e,
                });
            }
        }
    }

    report
}
