use serde::{Deserialize, Serialize};

use crate::models::Document;

/// Fixed listing page size; the backend is always asked for this many.
pub const PAGE_SIZE: u64 = 20;

/// Listing state for the documents table. Replaced wholesale by `apply` on a
/// successful fetch; a failed fetch leaves it untouched, so the table keeps
/// showing the last page that loaded.
///
/// Fetches are stamped with a monotonically increasing sequence token issued
/// by `begin_load`. `apply` only accepts the response for the latest issued
/// token, so out-of-order responses from rapid pagination cannot clobber a
/// newer page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageState {
    pub documents: Vec<Document>,
    pub total: u64,
    pub current: u64,
    seq_issued: u64,
    seq_applied: u64,
}

impl PageState {
    /// Register a new in-flight fetch and return its sequence token.
    pub fn begin_load(&mut self) -> u64 {
        self.seq_issued += 1;
        self.seq_issued
    }

    /// Apply a fetched page. Returns false (state untouched) when the token
    /// is not the latest issued.
    pub fn apply(&mut self, token: u64, documents: Vec<Document>, total: u64, page: u64) -> bool {
        if token != self.seq_issued {
            return false;
        }
        self.seq_applied = token;
        self.documents = documents;
        self.total = total;
        self.current = page;
        true
    }

    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }

    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(PAGE_SIZE)
    }

    /// The pagination control only exists when the total spills past one page.
    pub fn needs_pager(&self) -> bool {
        self.total > PAGE_SIZE
    }

    /// Current page for re-fetches; 1 before anything ever loaded.
    pub fn current_or_first(&self) -> u64 {
        if self.current == 0 { 1 } else { self.current }
    }
}
