pub mod client;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod sink;

pub use client::WebhookClient;
pub use dispatch::{ClientPayload, DispatchClient, DispatchRequest, DEFAULT_GITHUB_API_URL};
pub use envelope::DeliveryEnvelope;
pub use error::WebhookError;
pub use sink::{batches, deliver, BatchFailure, BatchMetadata, DeliveryBatch, DeliveryReport};
