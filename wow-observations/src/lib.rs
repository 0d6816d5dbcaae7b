//! Client for the Wild Orchid Watch observations API.
//!
//! Fetches the `/wow-observations` listing page by page and prints a few
//! fields of each record, using the private location for obscured records.

pub const DEFAULT_BASE_URL: &str = "https://api-facade.wildorchidwatch.org/wow-observations";

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod pagination;
pub mod render;

pub use client::ObservationsClient;
pub use config::{ApiKey, FetcherConfig};
pub use error::{ObservationsError, Result};
pub use fetcher::{PaginatedFetcher, RunSummary};
pub use models::{ApiResponse, Observation, ObservationFieldValue};
pub use pagination::{PageRequest, Pagination};
