//! Frontier management for the depth-first crawl
//!
//! The frontier is a stack of frames. Each frame holds the not-yet-visited
//! children of one page, in the order they should be tried. Taking the next
//! URL always reads from the topmost frame, and a page's children are pushed
//! as a new frame right after the page is recorded. The result is the same
//! visit order as a recursive depth-first walk, without recursion.

use crate::config::LinkOrder;
use crate::state::VisitedSet;
use crate::url::is_documentation_url;
use std::collections::VecDeque;

/// A URL waiting to be fetched, with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

#[derive(Debug)]
struct Frame {
    pending: VecDeque<String>,
    depth: u32,
}

/// Stack of frames of pending URLs
#[derive(Debug, Default)]
pub struct Frontier {
    frames: Vec<Frame>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the seed URL at depth 0
    pub fn seed(&mut self, url: impl Into<String>) {
        self.push_children(vec![url.into()], 0);
    }

    /// Pushes the children of the page just recorded
    ///
    /// `depth` is the depth of the children, one more than their parent's.
    pub fn push_children(&mut self, urls: Vec<String>, depth: u32) {
        if urls.is_empty() {
            return;
        }
        self.frames.push(Frame {
            pending: urls.into(),
            depth,
        });
    }

    /// Takes the next URL in depth-first order
    pub fn next(&mut self) -> Option<FrontierEntry> {
        while let Some(frame) = self.frames.last_mut() {
            if let Some(url) = frame.pending.pop_front() {
                return Some(FrontierEntry {
                    url,
                    depth: frame.depth,
                });
            }
            self.frames.pop();
        }
        None
    }

    /// Number of pending URLs across all frames
    pub fn len(&self) -> usize {
        self.frames.iter().map(|f| f.pending.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(|f| f.pending.is_empty())
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Orders a page's links for expansion
///
/// Links already visited are dropped. Under [`LinkOrder::DocumentationFirst`]
/// links that look like documentation come first; within each group, page
/// order is kept.
pub fn order_links(links: &[String], order: LinkOrder, visited: &VisitedSet) -> Vec<String> {
    let fresh = links.iter().filter(|link| !visited.contains(link)).cloned();

    match order {
        LinkOrder::Discovery => fresh.collect(),
        LinkOrder::DocumentationFirst => {
            let (mut docs, rest): (Vec<String>, Vec<String>) =
                fresh.partition(|link| is_documentation_url(link));
            docs.extend(rest);
            docs
        }
    }
}
