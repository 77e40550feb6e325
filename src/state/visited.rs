/// Set of normalized URLs recorded by a crawl, in visitation order
///
/// Keys are produced by [`normalize_url`](crate::url::normalize_url); the set
/// itself does no normalization.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    members: std::collections::HashSet<String>,
    order: Vec<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL; returns false if it was already present
    pub fn insert(&mut self, url: &str) -> bool {
        if self.members.contains(url) {
            return false;
        }
        self.members.insert(url.to_string());
        self.order.push(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// URLs in the order they were visited
    pub fn urls(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }
}
