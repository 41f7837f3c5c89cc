use crate::model::{
    AbundanceKind, ColumnKind, ColumnType, MzTabColumn, OptionalColumn, Parameter, Section,
    StableColumn,
};

/// Sort key giving the logical column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ColumnKey {
    Stable(usize),
    Abundance(AbundanceKind, u32),
    IdConfidenceMeasure(u32),
    Optional(usize),
}

/// Column definitions of one table in logical order.
///
/// Logical order is: stable columns in enumeration order, abundance
/// columns by kind then id, `id_confidence_measure[n]` columns by id, then
/// optional columns in the order they were added.
#[derive(Debug, Clone)]
pub struct ColumnFactory {
    section: Section,
    columns: Vec<(ColumnKey, MzTabColumn)>,
    next_optional: usize,
}

impl ColumnFactory {
    /// Factory holding the stable columns of `section`
    pub fn new(section: Section) -> Self {
        let columns = StableColumn::for_section(section)
            .into_iter()
            .enumerate()
            .map(|(i, column)| (ColumnKey::Stable(i), MzTabColumn::stable(column)))
            .collect();
        Self {
            section,
            columns,
            next_optional: 0,
        }
    }

    /// Table the columns belong to
    pub fn section(&self) -> Section {
        self.section
    }

    fn insert(&mut self, key: ColumnKey, column: MzTabColumn) -> bool {
        if self.columns.iter().any(|(_, c)| c.header == column.header) {
            return false;
        }
        let index = self.columns.partition_point(|(k, _)| *k < key);
        self.columns.insert(index, (key, column));
        true
    }

    /// Add `<kind>[id]`; false if the column already exists
    pub fn add_abundance_column(&mut self, kind: AbundanceKind, id: u32) -> bool {
        self.insert(
            ColumnKey::Abundance(kind, id),
            MzTabColumn::abundance(kind, id),
        )
    }

    /// Add `id_confidence_measure[id]`; false if the column already exists
    pub fn add_id_confidence_measure_column(&mut self, id: u32) -> bool {
        self.insert(
            ColumnKey::IdConfidenceMeasure(id),
            MzTabColumn::id_confidence_measure(id),
        )
    }

    /// Add an optional column with an explicit value type; false if the
    /// header already exists
    pub fn add_optional_column(&mut self, column: OptionalColumn, column_type: ColumnType) -> bool {
        let key = ColumnKey::Optional(self.next_optional);
        let added = self.insert(key, MzTabColumn::optional(column, column_type));
        if added {
            self.next_optional += 1;
        }
        added
    }

    /// Columns in logical order
    pub fn columns(&self) -> impl Iterator<Item = &MzTabColumn> {
        self.columns.iter().map(|(_, c)| c)
    }

    /// Column at a 1-based logical position
    pub fn column(&self, logical: usize) -> Option<&MzTabColumn> {
        logical
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .map(|(_, c)| c)
    }

    /// 1-based logical position of a header
    pub fn find(&self, header: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|(_, c)| c.header == header)
            .map(|i| i + 1)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the factory holds no column
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Attach a unit to the column with `header`; false if there is none
    pub fn set_unit(&mut self, header: &str, unit: Parameter) -> bool {
        match self.columns.iter_mut().find(|(_, c)| c.header == header) {
            Some((_, column)) => {
                column.unit = Some(unit);
                true
            }
            None => false,
        }
    }

    /// Optional columns in the order they were added
    pub fn optional_columns(&self) -> impl Iterator<Item = &OptionalColumn> {
        self.columns().filter_map(|c| match &c.kind {
            ColumnKind::Optional(column) => Some(column),
            _ => None,
        })
    }
}
