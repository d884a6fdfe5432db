//! Cursor-driven page walker.
//!
//! [`walk_pages`] repeatedly asks a page source for the next listing page until
//! the target count is reached or the upstream runs dry. The page source is a
//! plain async closure, so the walker has no idea which endpoint it drives and
//! can be exercised with an in-memory fake.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use ytrelay_core::ShortPagePolicy;

use crate::error::YoutubeError;

/// Maximum number of listing pages one walk may request before giving up.
/// Guards against an upstream that keeps handing back cursors forever.
pub const MAX_PAGES: usize = 200;

/// Anything with a stable upstream identifier.
pub trait Keyed {
    /// The identifier, or `None` when the upstream record carries none.
    fn key(&self) -> Option<&str>;
}

/// One page of a listing call.
#[derive(Debug, Clone)]
pub struct ListingPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> ListingPage<T> {
    #[must_use]
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }
}

/// Unique identifiers in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl IdentifierSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_owned());
        self.order.push(id.to_owned());
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id.as_ref());
        }
        set
    }
}

#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub target_count: usize,
    /// Largest page the endpoint will serve (50 for search, 100 for comments).
    pub page_limit: usize,
    pub short_page: ShortPagePolicy,
    pub inter_page_delay: Duration,
    pub max_pages: usize,
}

impl WalkOptions {
    #[must_use]
    pub fn new(target_count: usize, page_limit: usize) -> Self {
        Self {
            target_count,
            page_limit: page_limit.max(1),
            short_page: ShortPagePolicy::default(),
            inter_page_delay: Duration::ZERO,
            max_pages: MAX_PAGES,
        }
    }

    #[must_use]
    pub fn with_short_page_policy(mut self, policy: ShortPagePolicy) -> Self {
        self.short_page = policy;
        self
    }

    #[must_use]
    pub fn with_inter_page_delay(mut self, delay: Duration) -> Self {
        self.inter_page_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

#[derive(Debug)]
pub struct WalkOutcome<T> {
    /// At most `target_count` items, in upstream order.
    pub items: Vec<T>,
    /// Keys of `items`, same order.
    pub ids: IdentifierSet,
    pub pages_fetched: usize,
    pub duplicates_skipped: usize,
}

/// Accumulator threaded through the walk loop.
struct PageAccumulator<T> {
    items: Vec<T>,
    ids: IdentifierSet,
    duplicates: usize,
    keyless: usize,
    target: usize,
}

impl<T: Keyed> PageAccumulator<T> {
    fn new(target: usize) -> Self {
        Self {
            items: Vec::with_capacity(target.min(1024)),
            ids: IdentifierSet::new(),
            duplicates: 0,
            keyless: 0,
            target,
        }
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.target
    }

    fn remaining(&self) -> usize {
        self.target.saturating_sub(self.items.len())
    }

    /// Appends new items until the target is met; anything past it is dropped.
    fn absorb(&mut self, page: Vec<T>) {
        for item in page {
            if self.is_full() {
                break;
            }
            let Some(key) = item.key().filter(|k| !k.is_empty()) else {
                self.keyless += 1;
                continue;
            };
            if self.ids.insert(key) {
                self.items.push(item);
            } else {
                tracing::debug!(id = key, "skipping duplicate identifier");
                self.duplicates += 1;
            }
        }
    }

    fn finish(self, pages_fetched: usize) -> WalkOutcome<T> {
        if self.keyless > 0 {
            tracing::debug!(dropped = self.keyless, "dropped listing items without an id");
        }
        if self.duplicates > 0 {
            tracing::info!(
                duplicates = self.duplicates,
                "upstream returned duplicate identifiers across pages"
            );
        }
        WalkOutcome {
            items: self.items,
            ids: self.ids,
            pages_fetched,
            duplicates_skipped: self.duplicates,
        }
    }
}

/// Walks a cursor-paged listing until `options.target_count` items are held
/// or the upstream is exhausted.
///
/// `fetch_page(cursor, want)` is called with `cursor = None` for the first
/// page and `want = min(page_limit, still needed)`. The walk stops when the
/// target is met, a page comes back empty, the continuation cursor is absent,
/// or (under [`ShortPagePolicy::Stop`]) a page returns fewer items than asked.
///
/// # Errors
///
/// - [`YoutubeError::Listing`] wrapping the page source's error, tagged with
///   the 1-based page number and the cursor used for it.
/// - [`YoutubeError::PaginationLimit`] if more than `options.max_pages` pages
///   would be needed.
pub async fn walk_pages<T, F, Fut>(
    options: &WalkOptions,
    mut fetch_page: F,
) -> Result<WalkOutcome<T>, YoutubeError>
where
    T: Keyed,
    F: FnMut(Option<String>, usize) -> Fut,
    Fut: Future<Output = Result<ListingPage<T>, YoutubeError>>,
{
    let mut acc = PageAccumulator::new(options.target_count);
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0usize;

    while !acc.is_full() {
        let page = pages_fetched + 1;
        if page > options.max_pages {
            return Err(YoutubeError::PaginationLimit {
                max_pages: options.max_pages,
            });
        }

        if page > 1 && !options.inter_page_delay.is_zero() {
            tokio::time::sleep(options.inter_page_delay).await;
        }

        let want = options.page_limit.min(acc.remaining());
        tracing::debug!(page, want, collected = acc.items.len(), "requesting listing page");

        let ListingPage { items, next_cursor } =
            fetch_page(cursor.clone(), want)
                .await
                .map_err(|e| YoutubeError::Listing {
                    page,
                    cursor: cursor.clone(),
                    source: Box::new(e),
                })?;
        pages_fetched = page;

        let returned = items.len();
        if returned == 0 {
            tracing::debug!(page, "empty listing page, upstream exhausted");
            break;
        }
        acc.absorb(items);

        cursor = next_cursor.filter(|c| !c.is_empty());
        if cursor.is_none() {
            break;
        }
        if returned < want && options.short_page == ShortPagePolicy::Stop {
            tracing::debug!(page, returned, want, "short page, stopping");
            break;
        }
    }

    Ok(acc.finish(pages_fetched))
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
