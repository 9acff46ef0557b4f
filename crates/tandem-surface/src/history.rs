//! Back/forward bookkeeping shared by every surface implementation.

use crate::events::SurfaceEvent;

/// Session history of one surface, fed by the URLs the view commits.
///
/// Every commit goes through [`commit`](NavigationHistory::commit), whether
/// the surface asked for the navigation or the page started it (link click,
/// redirect, script). A traversal started with [`back`](NavigationHistory::back)
/// or [`forward`](NavigationHistory::forward) moves the cursor only once its
/// URL commits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: usize,
    pending: Option<usize>,
}

fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(base, _)| base)
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Start a traversal to the previous entry and return its URL.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.traverse_to(self.index - 1)
    }

    /// Start a traversal to the next entry and return its URL.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.traverse_to(self.index + 1)
    }

    fn traverse_to(&mut self, target: usize) -> Option<&str> {
        self.pending = Some(target);
        self.entries.get(target).map(String::as_str)
    }

    /// Record a URL the view committed and return the event to relay.
    ///
    /// `same_document` marks commits the page reported without a load
    /// (hash change, history state pop); a change of fragment alone is
    /// treated the same way. Re-committing the current URL is a reload: it
    /// reports `DidNavigate` for a load and nothing for a same-document
    /// commit.
    pub fn commit(&mut self, url: &str, same_document: bool) -> Option<SurfaceEvent> {
        let in_page = same_document
            || self
                .current()
                .is_some_and(|cur| cur != url && strip_fragment(cur) == strip_fragment(url));
        let event = if in_page {
            SurfaceEvent::DidNavigateInPage(url.to_string())
        } else {
            SurfaceEvent::DidNavigate(url.to_string())
        };

        let traversal = self
            .pending
            .take()
            .filter(|&t| self.entries.get(t).is_some_and(|e| e == url));
        if let Some(target) = traversal {
            self.index = target;
            return Some(event);
        }

        if self.current() == Some(url) {
            return (!same_document).then_some(event);
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
        Some(event)
    }
}
