//! Ordered content stacks.
//!
//! A [`ContentStack`] is a plain push/pop container of [`ContentUnit`]s,
//! oldest first. It owns its units and knows nothing about layouts or
//! transitions; the controller guards every pop.

use crate::content::{ContentId, ContentUnit};

/// Back-navigable history for one presentation role.
#[derive(Debug, Default)]
pub struct ContentStack {
    units: Vec<ContentUnit>,
}

impl ContentStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Push a unit on top.
    pub fn push(&mut self, unit: ContentUnit) {
        tracing::trace!(id = %unit.id(), title = unit.title(), "push");
        self.units.push(unit);
    }

    /// Pop the top unit.
    pub fn pop(&mut self) -> Option<ContentUnit> {
        self.units.pop()
    }

    /// The top unit.
    pub fn top(&self) -> Option<&ContentUnit> {
        self.units.last()
    }

    /// The top unit, mutably.
    pub fn top_mut(&mut self) -> Option<&mut ContentUnit> {
        self.units.last_mut()
    }

    /// All units, oldest first.
    pub fn all(&self) -> &[ContentUnit] {
        &self.units
    }

    /// All units, oldest first, mutably.
    pub fn all_mut(&mut self) -> &mut [ContentUnit] {
        &mut self.units
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the stack holds no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether a unit with this identity is on the stack.
    pub fn contains(&self, id: ContentId) -> bool {
        self.position(id).is_some()
    }

    /// Index (from the bottom) of the unit with this identity.
    pub fn position(&self, id: ContentId) -> Option<usize> {
        self.units.iter().position(|unit| unit.id() == id)
    }

    /// The unit with this identity.
    pub fn get(&self, id: ContentId) -> Option<&ContentUnit> {
        self.units.iter().find(|unit| unit.id() == id)
    }

    /// The unit with this identity, mutably.
    pub fn get_mut(&mut self, id: ContentId) -> Option<&mut ContentUnit> {
        self.units.iter_mut().find(|unit| unit.id() == id)
    }

    /// Keep the bottom `len` units and return the removed ones, oldest first.
    pub fn truncate(&mut self, len: usize) -> Vec<ContentUnit> {
        if len >= self.units.len() {
            return Vec::new();
        }
        self.units.split_off(len)
    }

    /// Remove and return every unit from `index` upwards.
    pub fn drain_from(&mut self, index: usize) -> Vec<ContentUnit> {
        self.truncate(index)
    }

    /// Replace the whole contents, returning the previous units.
    pub fn replace(&mut self, units: Vec<ContentUnit>) -> Vec<ContentUnit> {
        std::mem::replace(&mut self.units, units)
    }

    /// Remove every unit.
    pub fn clear(&mut self) -> Vec<ContentUnit> {
        std::mem::take(&mut self.units)
    }

    /// Titles, oldest first.
    pub fn titles(&self) -> Vec<String> {
        self.units.iter().map(|unit| unit.title().to_string()).collect()
    }
}
