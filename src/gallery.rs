//! Gallery state: current page, batch size and the accumulated image list.
//!
//! Pure bookkeeping with no I/O. Every user action returns the `FetchRequest`
//! the caller should issue, and `complete` folds the answer back in.

use crate::constants::{FIRST_LOAD_MORE_BATCH, INITIAL_BATCH, LATER_LOAD_MORE_BATCH};
use crate::types::{FetchOutcome, FetchRequest, ImageRecord};
use tracing::{debug, error};

#[derive(Debug)]
pub struct Gallery {
    page: u32,
    batch_size: u32,
    images: Vec<ImageRecord>,
    in_flight: usize,
    // Bumped on every navigation; outcomes from older generations are dropped
    generation: u64,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            page: 1,
            batch_size: INITIAL_BATCH,
            images: Vec::new(),
            in_flight: 0,
            generation: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_load_more(&self) -> bool {
        !self.is_loading()
    }

    /// Fetch issued when the window first shows.
    pub fn initial_request(&mut self) -> FetchRequest {
        self.start()
    }

    pub fn next_page(&mut self) -> FetchRequest {
        self.page += 1;
        self.navigated();
        debug!(page = self.page, "Next page");
        self.start()
    }

    /// No-op at page 1.
    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        if !self.can_go_prev() {
            return None;
        }
        self.page -= 1;
        self.navigated();
        debug!(page = self.page, "Previous page");
        Some(self.start())
    }

    /// Widens the batch and fetches it for the current page, keeping what is shown.
    /// Ignored while a request is outstanding.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.can_load_more() {
            debug!("Load more ignored while loading");
            return None;
        }
        self.batch_size = if self.batch_size == INITIAL_BATCH {
            FIRST_LOAD_MORE_BATCH
        } else {
            LATER_LOAD_MORE_BATCH
        };
        debug!(page = self.page, batch = self.batch_size, "Load more");
        Some(self.start())
    }

    pub fn complete(&mut self, outcome: FetchOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let FetchOutcome { request, result } = outcome;
        match result {
            Ok(records) if request.generation == self.generation => {
                debug!(
                    page = request.page,
                    received = records.len(),
                    total = self.images.len() + records.len(),
                    "Batch appended"
                );
                self.images.extend(records);
            }
            Ok(records) => {
                debug!(
                    requested_page = request.page,
                    current_page = self.page,
                    received = records.len(),
                    "Dropping batch requested before the last navigation"
                );
            }
            Err(e) => {
                error!(page = request.page, limit = request.limit, error = %e, "Error fetching images");
            }
        }
    }

    fn navigated(&mut self) {
        self.images.clear();
        self.generation += 1;
    }

    fn start(&mut self) -> FetchRequest {
        self.in_flight += 1;
        FetchRequest {
            page: self.page,
            limit: self.batch_size,
            generation: self.generation,
        }
    }
}
