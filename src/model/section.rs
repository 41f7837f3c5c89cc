use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{COMMENT_PREFIX, MTD_PREFIX};

/// Data table kinds of an mzTab-M document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Small Molecule Summary table (`SMH` / `SML`)
    SmallMolecule,
    /// Small Molecule Feature table (`SFH` / `SMF`)
    SmallMoleculeFeature,
    /// Small Molecule Evidence table (`SEH` / `SME`)
    SmallMoleculeEvidence,
}

impl Section {
    /// All table kinds in document order
    pub const ALL: [Section; 3] = [
        Section::SmallMolecule,
        Section::SmallMoleculeFeature,
        Section::SmallMoleculeEvidence,
    ];

    /// Prefix of the table's header line
    pub fn header_prefix(self) -> &'static str {
        match self {
            Section::SmallMolecule => "SMH",
            Section::SmallMoleculeFeature => "SFH",
            Section::SmallMoleculeEvidence => "SEH",
        }
    }

    /// Prefix of the table's data lines
    pub fn row_prefix(self) -> &'static str {
        match self {
            Section::SmallMolecule => "SML",
            Section::SmallMoleculeFeature => "SMF",
            Section::SmallMoleculeEvidence => "SME",
        }
    }

    /// Name used by `colunit-<name>` metadata labels
    pub fn name(self) -> &'static str {
        match self {
            Section::SmallMolecule => "small_molecule",
            Section::SmallMoleculeFeature => "small_molecule_feature",
            Section::SmallMoleculeEvidence => "small_molecule_evidence",
        }
    }

    /// Define-label that carries column units for this table
    pub fn colunit_label(self) -> String {
        format!("colunit-{}", self.name())
    }

    /// Look up a table by its `colunit-` name
    pub fn from_name(name: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a line by its first cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `MTD` metadata line
    Metadata,
    /// `COM` comment line
    Comment,
    /// Header line of a table
    Header(Section),
    /// Data line of a table
    Row(Section),
}

impl LineKind {
    /// Classify a prefix token; unknown prefixes yield `None`
    pub fn from_prefix(prefix: &str) -> Option<LineKind> {
        match prefix {
            MTD_PREFIX => return Some(LineKind::Metadata),
            COMMENT_PREFIX => return Some(LineKind::Comment),
            _ => {}
        }
        Section::ALL.into_iter().find_map(|section| {
            if section.header_prefix() == prefix {
                Some(LineKind::Header(section))
            } else if section.row_prefix() == prefix {
                Some(LineKind::Row(section))
            } else {
                None
            }
        })
    }
}
