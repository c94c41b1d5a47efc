//! Offset-based page accumulation.
//!
//! [`PagedLoader`] is the bookkeeping: which offset comes next, whether more
//! pages exist, and whether a request is already in flight. [`BackgroundPager`]
//! runs fetches on a worker thread and reports results through a channel
//! that the UI loop polls.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::source::{PageError, PageSource};
use crate::models::{VerbPage, VerbRecord};

/// How close to the end of the visible cards a prefetch starts.
pub const PREFETCH_DISTANCE: usize = 3;

/// Message shown when a page fails to load.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load the verbs. Press r to try again.";

/// How a page request relates to what is already loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Discard everything and start from offset 0
    Reset,
    /// Continue after the last received record
    Append,
}

/// A request handed out by [`PagedLoader::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Reset or append
    pub mode: LoadMode,
    /// First record to fetch
    pub offset: usize,
    /// Page size
    pub limit: usize,
}

/// Accumulates pages fetched by offset.
#[derive(Debug, Clone)]
pub struct PagedLoader {
    items: Vec<VerbRecord>,
    page_size: usize,
    offset: usize,
    total: usize,
    has_more: bool,
    in_flight: Option<PageRequest>,
    error: Option<String>,
    last_failed: Option<LoadMode>,
}

impl PagedLoader {
    /// Creates an empty loader requesting `page_size` records at a time.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            offset: 0,
            total: 0,
            has_more: true,
            in_flight: None,
            error: None,
            last_failed: None,
        }
    }

    /// Records received so far, in catalog order.
    #[must_use]
    pub fn items(&self) -> &[VerbRecord] {
        &self.items
    }

    /// Offset of the next page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Catalog size reported by the last successful page.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Whether further pages may exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// User-facing message for the last failure, if the last request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a request.
    ///
    /// Returns `None` while another request is in flight, or for an append
    /// once the end of the catalog has been reached.
    pub fn begin(&mut self, mode: LoadMode) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        if mode == LoadMode::Append && !self.has_more {
            return None;
        }

        let offset = match mode {
            LoadMode::Reset => 0,
            LoadMode::Append => self.offset,
        };
        let request = PageRequest {
            mode,
            offset,
            limit: self.page_size,
        };
        self.in_flight = Some(request);
        self.error = None;
        Some(request)
    }

    /// Re-issues the request that failed last (a reset if nothing failed yet).
    pub fn retry(&mut self) -> Option<PageRequest> {
        let mode = self.last_failed.unwrap_or(LoadMode::Reset);
        self.begin(mode)
    }

    /// Applies the outcome of `request`.
    ///
    /// Results for a request that is not the one in flight are dropped.
    pub fn complete(&mut self, request: PageRequest, result: Result<VerbPage, PageError>) {
        if self.in_flight != Some(request) {
            return;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let received = page.verbs.len();
                match request.mode {
                    LoadMode::Reset => self.items = page.verbs,
                    LoadMode::Append => self.items.extend(page.verbs),
                }
                self.offset = request.offset + received;
                self.total = page.total;
                // An empty page before the reported end would otherwise loop forever
                self.has_more = received > 0 && self.offset < self.total;
                self.last_failed = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load verbs at offset {}: {}", request.offset, e);
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                self.last_failed = Some(request.mode);
            }
        }
    }

    /// Whether viewing item `index` of `visible_len` items should trigger
    /// the next page.
    ///
    /// `visible_len` is the number of items the view shows, which is fewer
    /// than [`Self::items`] when a filter hides some of them. Fires when the
    /// index is within [`PREFETCH_DISTANCE`] of the end, including when
    /// nothing is visible at all.
    #[must_use]
    pub fn should_prefetch(&self, index: usize, visible_len: usize) -> bool {
        self.has_more
            && !self.is_loading()
            && self.error.is_none()
            && index.saturating_add(PREFETCH_DISTANCE) >= visible_len
    }
}

type PageResult = (PageRequest, Result<VerbPage, PageError>);

/// [`PagedLoader`] driven by a worker thread per request.
pub struct BackgroundPager {
    loader: PagedLoader,
    source: Arc<dyn PageSource>,
    receiver: Option<Receiver<PageResult>>,
}

impl BackgroundPager {
    /// Creates a pager over `source`.
    pub fn new(source: Arc<dyn PageSource>, page_size: usize) -> Self {
        Self {
            loader: PagedLoader::new(page_size),
            source,
            receiver: None,
        }
    }

    /// Loader state.
    #[must_use]
    pub const fn loader(&self) -> &PagedLoader {
        &self.loader
    }

    /// Requests a page; returns false if the loader refused (duplicate trigger).
    pub fn request(&mut self, mode: LoadMode) -> bool {
        match self.loader.begin(mode) {
            Some(request) => {
                self.spawn(request);
                true
            }
            None => false,
        }
    }

    /// Retries the last failed request.
    pub fn retry(&mut self) -> bool {
        match self.loader.retry() {
            Some(request) => {
                self.spawn(request);
                true
            }
            None => false,
        }
    }

    /// Applies a finished fetch, if any. Returns true when state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        match receiver.try_recv() {
            Ok((request, result)) => {
                self.receiver = None;
                self.loader.complete(request, result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.fail_in_flight("page worker stopped unexpectedly");
                true
            }
        }
    }

    /// Blocks up to `timeout` for the in-flight fetch. Returns true when applied.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        match receiver.recv_timeout(timeout) {
            Ok((request, result)) => {
                self.receiver = None;
                self.loader.complete(request, result);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                self.fail_in_flight("page worker stopped unexpectedly");
                true
            }
        }
    }

    fn spawn(&mut self, request: PageRequest) {
        let (sender, receiver) = channel();
        let source = Arc::clone(&self.source);
        thread::spawn(move || {
            let result = source.fetch_page(request.offset, request.limit);
            // The receiver is gone if the view closed; nothing to report then
            let _ = sender.send((request, result));
        });
        self.receiver = Some(receiver);
    }

    fn fail_in_flight(&mut self, reason: &str) {
        self.receiver = None;
        if let Some(request) = self.loader.in_flight {
            self.loader
                .complete(request, Err(PageError::Transport(reason.to_string())));
        }
    }
}
