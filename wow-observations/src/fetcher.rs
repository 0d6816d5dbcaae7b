use std::io::Write;

use tracing::info;

use crate::client::ObservationsClient;
use crate::config::FetcherConfig;
use crate::error::Result;
use crate::pagination::Pagination;
use crate::render::{write_observation, write_page_header};

/// What a completed run went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub pages_fetched: u32,
    pub observations_seen: u64,
    /// `total_results` as reported by the last page
    pub total_results: u64,
}

/// Drives the fetch, decode and print loop over consecutive pages
#[derive(Debug)]
pub struct PaginatedFetcher {
    client: ObservationsClient,
    pagination: Pagination,
    max_fields_shown: usize,
}

impl PaginatedFetcher {
    /// Build the client and fetcher from a resolved configuration
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        config.validate()?;
        let client = ObservationsClient::new(config)?;
        Ok(Self::with_client(
            client,
            config.pagination,
            config.max_fields_shown,
        ))
    }

    pub fn with_client(
        client: ObservationsClient,
        pagination: Pagination,
        max_fields_shown: usize,
    ) -> Self {
        Self {
            client,
            pagination,
            max_fields_shown,
        }
    }

    /// Page through the listing, writing every record to `out`.
    ///
    /// Pages are requested one at a time. The first error aborts the run:
    /// no further page is requested after a failed one.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut request = self.pagination.first_page();

        loop {
            write_page_header(out, request.page_number)?;
            let listing = self.client.fetch_page(request).await?;
            summary.pages_fetched += 1;
            summary.total_results = listing.total_results;

            for observation in &listing.results {
                write_observation(out, observation, self.max_fields_shown)?;
                summary.observations_seen += 1;
            }

            if !self
                .pagination
                .should_continue(request.page_number, listing.total_results)
            {
                break;
            }
            request = request.next();
        }

        out.flush()?;
        info!(
            pages = summary.pages_fetched,
            observations = summary.observations_seen,
            total_results = summary.total_results,
            "finished paging observations"
        );
        Ok(summary)
    }
}
