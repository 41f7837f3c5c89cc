use std::collections::BTreeSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::context::ParserContext;
use super::factory::ColumnFactory;
use super::position::PositionMapping;
use crate::codec;
use crate::error::{ErrorList, FormatErrorType, LogicalErrorType, MzTabError, ParseError};
use crate::model::constants::OPT_PREFIX;
use crate::model::{AbundanceKind, Metadata, OptScope, OptionalColumn, Section, StableColumn};

static RE_ABUNDANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(abundance_assay|abundance_study_variable|abundance_variation_study_variable)\[(\d+)\]$")
        .expect("valid abundance column regex")
});

static RE_ID_CONFIDENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^id_confidence_measure\[(\d+)\]$").expect("valid confidence column regex")
});

static RE_OPTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^opt_(global|assay\[(\d+)\]|study_variable\[(\d+)\]|ms_run\[(\d+)\])_(.+)$")
        .expect("valid optional column regex")
});

/// Columns of one table and where they sit in its data lines
#[derive(Debug, Clone)]
pub struct TableLayout {
    factory: ColumnFactory,
    mapping: PositionMapping,
}

impl TableLayout {
    /// Layout from already-built parts
    pub fn new(factory: ColumnFactory, mapping: PositionMapping) -> Self {
        Self { factory, mapping }
    }

    /// Table of this layout
    pub fn section(&self) -> Section {
        self.factory.section()
    }

    /// Column definitions in logical order
    pub fn factory(&self) -> &ColumnFactory {
        &self.factory
    }

    /// Physical to logical positions
    pub fn mapping(&self) -> &PositionMapping {
        &self.mapping
    }
}

/// What a header cell refers to, before it is added to the factory
enum HeaderColumn {
    Stable,
    Abundance(AbundanceKind, u32),
    IdConfidenceMeasure(u32),
    Optional(OptionalColumn),
}

/// Parser for `SMH`, `SFH` and `SEH` lines
pub struct HeaderLineParser<'a> {
    context: &'a ParserContext,
    errors: &'a mut ErrorList,
}

impl<'a> HeaderLineParser<'a> {
    /// Create a parser resolving columns against the finished metadata
    pub fn new(context: &'a ParserContext, errors: &'a mut ErrorList) -> Self {
        Self { context, errors }
    }

    /// Parse one raw header line
    pub fn parse(&mut self, line_number: usize, line: &str) -> Result<TableLayout, ParseError> {
        let items = codec::split_line(line);
        self.parse_items(line_number, &items)
    }

    /// Parse a header line already split into cells
    pub fn parse_items(
        &mut self,
        line_number: usize,
        items: &[&str],
    ) -> Result<TableLayout, ParseError> {
        let prefix = items.first().copied().unwrap_or_default();
        let section = Section::ALL
            .into_iter()
            .find(|s| s.header_prefix() == prefix)
            .ok_or_else(|| {
                ParseError::unrecoverable(
                    FormatErrorType::LinePrefix,
                    line_number,
                    [prefix, "expected SMH, SFH or SEH"],
                )
            })?;

        let metadata = self.context.metadata();
        let mut factory = ColumnFactory::new(section);
        let mut seen = BTreeSet::new();
        let mut canonical = Vec::with_capacity(items.len().saturating_sub(1));
        let headers = &items[1..];

        for &header in headers {
            if !seen.insert(header) {
                return Err(ParseError::unrecoverable(
                    FormatErrorType::DuplicationColumn,
                    line_number,
                    [section.name(), header],
                ));
            }
            let (added, name) = match classify(section, metadata, header, line_number)? {
                HeaderColumn::Stable => (true, header.to_string()),
                HeaderColumn::Abundance(kind, id) => (
                    factory.add_abundance_column(kind, id),
                    format!("{}[{}]", kind.header_prefix(), id),
                ),
                HeaderColumn::IdConfidenceMeasure(id) => (
                    factory.add_id_confidence_measure_column(id),
                    format!("id_confidence_measure[{}]", id),
                ),
                HeaderColumn::Optional(column) => {
                    let column_type = column.default_type();
                    let name = column.header();
                    (factory.add_optional_column(column, column_type), name)
                }
            };
            if !added {
                return Err(ParseError::unrecoverable(
                    FormatErrorType::DuplicationColumn,
                    line_number,
                    [section.name(), header],
                ));
            }
            canonical.push(name);
        }

        if let Some(missing) = StableColumn::for_section(section)
            .into_iter()
            .find(|c| !seen.contains(c.name()))
        {
            return Err(ParseError::unrecoverable(
                FormatErrorType::StableColumn,
                line_number,
                [section.name(), missing.name()],
            ));
        }

        let mut mapping = PositionMapping::new();
        // `abundance_assay[01]` is stored as `abundance_assay[1]`
        for (i, header) in canonical.iter().enumerate() {
            if let Some(logical) = factory.find(header) {
                mapping.put(i + 1, logical);
            }
        }

        self.apply_col_units(section, &mut factory, line_number)?;
        debug!(
            "Mapped {} header: {} columns, {} optional",
            section,
            mapping.len(),
            factory.optional_columns().count()
        );
        Ok(TableLayout::new(factory, mapping))
    }

    /// Attach `colunit-<table>` units; each value is `<column>=<parameter>`
    fn apply_col_units(
        &mut self,
        section: Section,
        factory: &mut ColumnFactory,
        line_number: usize,
    ) -> Result<(), ParseError> {
        let label = section.colunit_label();
        for value in self.context.col_units(section) {
            let parsed = value
                .split_once('=')
                .and_then(|(column, unit)| Some((column.trim(), codec::parse_param(unit)?)));
            let Some((column, unit)) = parsed else {
                self.errors.add(MzTabError::new(
                    FormatErrorType::ColUnit,
                    line_number,
                    [label.as_str(), value.as_str()],
                ))?;
                continue;
            };
            if !factory.set_unit(column, unit) {
                self.errors.add(MzTabError::new(
                    LogicalErrorType::ColUnitColumn,
                    line_number,
                    [section.name(), column],
                ))?;
            }
        }
        Ok(())
    }
}

fn classify(
    section: Section,
    metadata: &Metadata,
    header: &str,
    line_number: usize,
) -> Result<HeaderColumn, ParseError> {
    if StableColumn::find(section, header).is_some() {
        return Ok(HeaderColumn::Stable);
    }

    let undeclared = |reference: String| {
        ParseError::unrecoverable(LogicalErrorType::NotDefineInMetadata, line_number, [reference])
    };

    if let Some(caps) = RE_ABUNDANCE.captures(header) {
        let kind = AbundanceKind::for_section(section)
            .iter()
            .copied()
            .find(|k| k.header_prefix() == &caps[1]);
        if let Some(kind) = kind {
            let id: u32 = caps[2].parse().map_err(|_| undeclared(header.to_string()))?;
            let declared = match kind {
                AbundanceKind::Assay => metadata.assays.contains_key(&id),
                _ => metadata.study_variables.contains_key(&id),
            };
            if !declared {
                return Err(undeclared(format!("{}[{}]", kind.element(), id)));
            }
            return Ok(HeaderColumn::Abundance(kind, id));
        }
    }

    if section == Section::SmallMoleculeEvidence {
        if let Some(caps) = RE_ID_CONFIDENCE.captures(header) {
            let id: u32 = caps[1].parse().map_err(|_| undeclared(header.to_string()))?;
            if !metadata.id_confidence_measures.contains_key(&id) {
                return Err(undeclared(format!("id_confidence_measure[{}]", id)));
            }
            return Ok(HeaderColumn::IdConfidenceMeasure(id));
        }
    }

    if header.starts_with(OPT_PREFIX) {
        let column = parse_optional(header).ok_or_else(|| {
            ParseError::unrecoverable(FormatErrorType::OptionalColumn, line_number, [header])
        })?;
        let declared = match column.scope {
            OptScope::Global => true,
            OptScope::Assay(id) => metadata.assays.contains_key(&id),
            OptScope::StudyVariable(id) => metadata.study_variables.contains_key(&id),
            OptScope::MsRun(id) => metadata.ms_runs.contains_key(&id),
        };
        if !declared {
            return Err(undeclared(column.scope.to_string()));
        }
        return Ok(HeaderColumn::Optional(column));
    }

    Err(ParseError::unrecoverable(
        FormatErrorType::ColumnNotValid,
        line_number,
        [section.name(), header],
    ))
}

/// Split `opt_<scope>_<name>` into its scope and name
pub fn parse_optional(header: &str) -> Option<OptionalColumn> {
    let caps = RE_OPTIONAL.captures(header)?;
    let index = |group: usize| caps.get(group).and_then(|m| m.as_str().parse::<u32>().ok());
    let scope = if let Some(id) = index(2) {
        OptScope::Assay(id)
    } else if let Some(id) = index(3) {
        OptScope::StudyVariable(id)
    } else if let Some(id) = index(4) {
        OptScope::MsRun(id)
    } else if &caps[1] == "global" {
        OptScope::Global
    } else {
        return None;
    };
    Some(OptionalColumn::new(scope, &caps[5]))
}
