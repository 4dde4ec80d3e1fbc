use std::collections::{HashSet, VecDeque};

/// Breadth-first crawl state: a FIFO of pending URLs plus the sets that
/// keep every URL in at most one of pending, checked or failed.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    pending: HashSet<String>,
    checked: HashSet<String>,
    failed: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a URL unless it was already seen. Returns whether it was added.
    pub fn push(&mut self, url: &str) -> bool {
        if self.is_known(url) {
            return false;
        }
        self.pending.insert(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    /// Takes the oldest pending URL
    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.pending.remove(&url);
        Some(url)
    }

    pub fn mark_checked(&mut self, url: &str) {
        self.checked.insert(url.to_string());
    }

    pub fn mark_failed(&mut self, url: &str) {
        self.failed.insert(url.to_string());
    }

    pub fn is_checked(&self, url: &str) -> bool {
        self.checked.contains(url)
    }

    pub fn is_known(&self, url: &str) -> bool {
        self.pending.contains(url) || self.checked.contains(url) || self.failed.contains(url)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        assert!(frontier.push("a"));
        assert!(frontier.push("b"));
        assert!(frontier.push("c"));
        assert_eq!(frontier.pop().as_deref(), Some("a"));
        assert_eq!(frontier.pop().as_deref(), Some("b"));
        assert_eq!(frontier.pop().as_deref(), Some("c"));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_no_duplicates_while_pending() {
        let mut frontier = Frontier::new();
        assert!(frontier.push("a"));
        assert!(!frontier.push("a"));
        assert_eq!(frontier.pending_count(), 1);
    }

    #[test]
    fn test_checked_and_failed_urls_are_not_requeued() {
        let mut frontier = Frontier::new();
        frontier.push("a");
        frontier.push("b");

        let a = frontier.pop().unwrap();
        frontier.mark_checked(&a);
        let b = frontier.pop().unwrap();
        frontier.mark_failed(&b);

        assert!(!frontier.push("a"));
        assert!(!frontier.push("b"));
        assert!(!frontier.has_pending());
        assert_eq!(frontier.checked_count(), 1);
        assert!(frontier.is_checked("a"));
        assert!(!frontier.is_checked("b"));
    }
}
