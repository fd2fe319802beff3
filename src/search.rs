//! Product search: which cards stay visible for a typed query.

use crate::records::ProductCard;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Case-insensitive substring match; an empty query shows everything.
    pub fn matches(&self, name: &str) -> bool {
        self.query.is_empty() || name.to_lowercase().contains(&self.query)
    }

    pub fn visible<'c>(&self, cards: &'c [ProductCard]) -> Vec<&'c ProductCard> {
        cards.iter().filter(|card| self.matches(&card.name)).collect()
    }
}
