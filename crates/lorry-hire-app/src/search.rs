//! Debounced consignment search
//!
//! Each call to [`DebouncedSearch::query`] takes a ticket. After the debounce
//! delay, and again after the backend answers, the ticket is compared with the
//! latest one; a newer query wins and the older call resolves to `None`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lorry_hire_domain::model::ConsignmentRecord;
use lorry_hire_domain::repository::ConsignmentSearch;
use lorry_hire_types::{Result, SessionContext};

/// Whether a query is long enough to send to the backend
pub fn meets_threshold(query: &str, min_chars: usize) -> bool {
    let query = query.trim();
    !query.is_empty() && query.chars().count() >= min_chars
}

pub struct DebouncedSearch<S: ?Sized> {
    source: Arc<S>,
    ctx: SessionContext,
    min_chars: usize,
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl<S: ?Sized> Clone for DebouncedSearch<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            ctx: self.ctx,
            min_chars: self.min_chars,
            delay: self.delay,
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<S> DebouncedSearch<S>
where
    S: ConsignmentSearch + ?Sized,
{
    pub fn new(source: Arc<S>, ctx: SessionContext, min_chars: usize, delay: Duration) -> Self {
        Self {
            source,
            ctx,
            min_chars,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// `Ok(None)` when a later query or [`cancel`](Self::cancel) superseded this one
    pub async fn query(&self, text: &str) -> Result<Option<Vec<ConsignmentRecord>>> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !meets_threshold(text, self.min_chars) {
            return Ok(Some(Vec::new()));
        }

        tokio::time::sleep(self.delay).await;
        if self.is_stale(ticket) {
            tracing::trace!(query = text, "search superseded before sending");
            return Ok(None);
        }

        let hits = self.source.search(text.trim(), &self.ctx).await?;
        if self.is_stale(ticket) {
            tracing::trace!(query = text, "search result discarded");
            return Ok(None);
        }
        Ok(Some(hits))
    }

    /// Drop whatever query is pending
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_stale(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!meets_threshold("", 1));
        assert!(!meets_threshold("   ", 1));
        assert!(meets_threshold("C", 1));
        assert!(!meets_threshold("CN", 3));
        assert!(meets_threshold(" CN-1 ", 3));
    }
}
