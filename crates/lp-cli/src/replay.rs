//! In-memory page built from a saved list of listing links.
//!
//! Each link is its own container (ancestor depth 1), so a projection can be
//! replayed without the newsletter markup.

use lp_core::{LinkMatch, ListingsData, ListingsDom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Row(usize),
    Link(usize),
}

#[derive(Debug, Default)]
pub struct LinkList {
    hrefs: Vec<String>,
    visible: Vec<bool>,
}

impl LinkList {
    pub fn from_lines(text: &str) -> Self {
        let hrefs: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        let visible = vec![true; hrefs.len()];
        Self { hrefs, visible }
    }

    pub fn hrefs(&self) -> &[String] {
        &self.hrefs
    }

    pub fn visible(&self) -> impl Iterator<Item = &str> + '_ {
        self.hrefs
            .iter()
            .zip(&self.visible)
            .filter(|(_, visible)| **visible)
            .map(|(href, _)| href.as_str())
    }
}

impl ListingsDom for LinkList {
    type Node = Node;

    fn containers(&self) -> Vec<Node> {
        (0..self.hrefs.len()).map(Node::Row).collect()
    }

    fn anchors(&self) -> Vec<Node> {
        (0..self.hrefs.len()).map(Node::Link).collect()
    }

    fn href(&self, anchor: &Node) -> Option<String> {
        match anchor {
            Node::Link(idx) => self.hrefs.get(*idx).cloned(),
            Node::Row(_) => None,
        }
    }

    fn ancestor(&self, node: &Node, levels: usize) -> Option<Node> {
        match (node, levels) {
            (node, 0) => Some(*node),
            (Node::Link(idx), 1) => Some(Node::Row(*idx)),
            _ => None,
        }
    }

    fn set_visible(&mut self, node: &Node, visible: bool) {
        if let Node::Row(idx) = node {
            if let Some(slot) = self.visible.get_mut(*idx) {
                *slot = visible;
            }
        }
    }
}

/// Identifiers that more than one link would match under `link_match`.
pub fn ambiguous_ids(data: &ListingsData, hrefs: &[String], link_match: LinkMatch) -> Vec<(String, usize)> {
    data.listings
        .iter()
        .filter_map(|listing| {
            let count = hrefs.iter().filter(|href| link_match.matches(href, &listing.id)).count();
            (count > 1).then(|| (listing.id.clone(), count))
        })
        .collect()
}
