use std::collections::BTreeMap;

/// Two-way map between physical and logical column positions.
///
/// Physical positions count header cells left to right, starting at 1
/// after the line prefix. Logical positions index the table's
/// [`ColumnFactory`](super::ColumnFactory).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMapping {
    to_logical: BTreeMap<usize, usize>,
    to_physical: BTreeMap<usize, usize>,
}

impl PositionMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `physical` to `logical`, replacing earlier pairs of either side
    pub fn put(&mut self, physical: usize, logical: usize) {
        if let Some(old) = self.to_logical.insert(physical, logical) {
            self.to_physical.remove(&old);
        }
        if let Some(old) = self.to_physical.insert(logical, physical) {
            if old != physical {
                self.to_logical.remove(&old);
            }
        }
    }

    /// Logical position of a physical one
    pub fn logical(&self, physical: usize) -> Option<usize> {
        self.to_logical.get(&physical).copied()
    }

    /// Physical position of a logical one
    pub fn physical(&self, logical: usize) -> Option<usize> {
        self.to_physical.get(&logical).copied()
    }

    /// Number of mapped columns
    pub fn len(&self) -> usize {
        self.to_logical.len()
    }

    /// True when nothing is mapped
    pub fn is_empty(&self) -> bool {
        self.to_logical.is_empty()
    }

    /// `(physical, logical)` pairs in physical order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.to_logical.iter().map(|(p, l)| (*p, *l))
    }

    /// `(logical, physical)` pairs in logical order
    pub fn iter_logical(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.to_physical.iter().map(|(l, p)| (*l, *p))
    }
}
