use std::marker::PhantomData;

use log::warn;

use super::header::TableLayout;
use crate::codec::{self, MzBoolean};
use crate::error::{
    ErrorList, ErrorOverflow, FormatErrorType, LogicalErrorType, MzTabError, MzTabErrorType,
    ParseError,
};
use crate::model::constants::BAR;
use crate::model::{
    AbundanceKind, ColumnKind, ColumnType, Location, Metadata, OptColumnMapping, Parameter,
    Section, SpectraRef, StableColumn,
};

/// Type checks for the cells of one data line.
///
/// Every check takes the column header (for messages) and the cell text.
/// A missing cell (`None`, the line is shorter than its header) reads as
/// absent without an error. An empty cell records a `Null` error. Values
/// that cannot be read record a format error and read as absent.
pub struct CellChecker<'a> {
    line_number: usize,
    metadata: &'a Metadata,
    errors: &'a mut ErrorList,
}

impl<'a> CellChecker<'a> {
    /// Create a checker for `line_number`
    pub fn new(line_number: usize, metadata: &'a Metadata, errors: &'a mut ErrorList) -> Self {
        Self {
            line_number,
            metadata,
            errors,
        }
    }

    fn record<I, S>(
        &mut self,
        error_type: impl Into<MzTabErrorType>,
        context: I,
    ) -> Result<(), ErrorOverflow>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors
            .add(MzTabError::new(error_type, self.line_number, context))?;
        Ok(())
    }

    /// Cell text unless missing, empty or `null`
    fn present<'c>(
        &mut self,
        header: &str,
        cell: Option<&'c str>,
    ) -> Result<Option<&'c str>, ErrorOverflow> {
        match cell {
            None => Ok(None),
            Some("") => {
                self.record(LogicalErrorType::Null, [header])?;
                Ok(None)
            }
            Some(text) if codec::is_null(text) => Ok(None),
            Some(text) => Ok(Some(text)),
        }
    }

    /// Free text
    pub fn check_string(
        &mut self,
        header: &str,
        cell: Option<&str>,
    ) -> Result<Option<String>, ErrorOverflow> {
        Ok(self.present(header, cell)?.map(str::to_string))
    }

    /// Signed integer
    pub fn check_integer(
        &mut self,
        header: &str,
        cell: Option<&str>,
    ) -> Result<Option<i32>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            return Ok(None);
        };
        match codec::parse_integer(text) {
            Ok(value) => Ok(value),
            Err(_) => {
                self.record(FormatErrorType::Integer, [header, text])?;
                Ok(None)
            }
        }
    }

    /// Double, `NaN` or `INF`
    pub fn check_double(
        &mut self,
        header: &str,
        cell: Option<&str>,
    ) -> Result<Option<f64>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            return Ok(None);
        };
        match codec::parse_double(text) {
            Ok(value) => Ok(value),
            Err(_) => {
                self.record(FormatErrorType::Double, [header, text])?;
                Ok(None)
            }
        }
    }

    /// `0` or `1`
    pub fn check_boolean(
        &mut self,
        header: &str,
        cell: Option<&str>,
    ) -> Result<Option<MzBoolean>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            return Ok(None);
        };
        match MzBoolean::parse(text) {
            Ok(value) => Ok(value),
            Err(_) => {
                self.record(FormatErrorType::MzBoolean, [header, text])?;
                Ok(None)
            }
        }
    }

    /// CV parameter; with `allow_null == false` a `null` cell is an error
    pub fn check_parameter(
        &mut self,
        header: &str,
        cell: Option<&str>,
        allow_null: bool,
    ) -> Result<Option<Parameter>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            if !allow_null {
                if let Some(text) = cell.filter(|c| !c.is_empty()) {
                    self.record(FormatErrorType::Param, [header, text])?;
                }
            }
            return Ok(None);
        };
        let parameter = codec::parse_param(text);
        if parameter.is_none() {
            self.record(FormatErrorType::Param, [header, text])?;
        }
        Ok(parameter)
    }

    /// List of strings split on `delimiter`
    pub fn check_string_list(
        &mut self,
        header: &str,
        cell: Option<&str>,
        delimiter: char,
    ) -> Result<Vec<String>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            return Ok(Vec::new());
        };
        let items = codec::parse_string_list(delimiter, text);
        if items.is_empty() {
            self.record(
                FormatErrorType::StringList,
                [header.to_string(), text.to_string(), delimiter.to_string()],
            )?;
        }
        Ok(items)
    }

    /// `|`-separated doubles; one bad item empties the list
    pub fn check_double_list(
        &mut self,
        header: &str,
        cell: Option<&str>,
    ) -> Result<Vec<f64>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            return Ok(Vec::new());
        };
        match codec::parse_double_list(text) {
            Ok(values) => Ok(values),
            Err(_) => {
                self.record(FormatErrorType::DoubleList, [header, text])?;
                Ok(Vec::new())
            }
        }
    }

    /// Absolute or relative URI
    pub fn check_uri(
        &mut self,
        header: &str,
        cell: Option<&str>,
    ) -> Result<Option<String>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            return Ok(None);
        };
        match codec::parse_uri(text) {
            Ok(uri) => Ok(uri),
            Err(_) => {
                self.record(FormatErrorType::Uri, [header, text])?;
                Ok(None)
            }
        }
    }

    /// `ms_run[n]:reference` items resolved against the metadata.
    ///
    /// A reference to a run whose location is unknown is kept and
    /// recorded as a warning.
    pub fn check_spectra_ref(
        &mut self,
        header: &str,
        cell: Option<&str>,
    ) -> Result<Vec<SpectraRef>, ErrorOverflow> {
        let Some(text) = self.present(header, cell)? else {
            return Ok(Vec::new());
        };
        let refs = match codec::parse_spectra_ref_list(text, self.metadata) {
            Ok(refs) => refs,
            Err(_) => {
                self.record(FormatErrorType::SpectraRef, [header, text])?;
                return Ok(Vec::new());
            }
        };
        for spectra_ref in &refs {
            let location = self
                .metadata
                .ms_runs
                .get(&spectra_ref.ms_run)
                .and_then(|run| run.location.as_ref());
            if matches!(location, None | Some(Location::Unknown)) {
                self.record(
                    LogicalErrorType::SpectraRef,
                    [spectra_ref.to_string(), spectra_ref.ms_run.to_string()],
                )?;
            }
        }
        Ok(refs)
    }

    /// Coerce an optional cell to `column_type` and render it back with the
    /// format's tokens
    pub fn check_optional(
        &mut self,
        header: &str,
        cell: Option<&str>,
        column_type: ColumnType,
    ) -> Result<Option<String>, ErrorOverflow> {
        let rendered = match column_type {
            ColumnType::String => self.check_string(header, cell)?,
            ColumnType::Integer => self.check_integer(header, cell)?.map(|v| v.to_string()),
            ColumnType::Double => self
                .check_double(header, cell)?
                .map(|v| codec::print_double(Some(v))),
            ColumnType::Boolean => self.check_boolean(header, cell)?.map(|v| v.to_string()),
            ColumnType::Parameter => self
                .check_parameter(header, cell, true)?
                .map(|p| p.to_string()),
            ColumnType::StringList => {
                non_empty(self.check_string_list(header, cell, BAR)?.join("|"))
            }
            ColumnType::DoubleList => non_empty(
                self.check_double_list(header, cell)?
                    .into_iter()
                    .map(|v| codec::print_double(Some(v)))
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            ColumnType::SpectraRefList => non_empty(
                self.check_spectra_ref(header, cell)?
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            ColumnType::Uri => self.check_uri(header, cell)?,
        };
        Ok(rendered)
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// A typed row of one table, filled cell by cell
pub trait SectionRecord: Default {
    /// Table the row belongs to
    const SECTION: Section;

    /// Check and store the cell of a stable column
    fn set_stable(
        &mut self,
        column: StableColumn,
        cell: Option<&str>,
        checker: &mut CellChecker<'_>,
    ) -> Result<(), ErrorOverflow>;

    /// Append an abundance value; tables without abundance ignore it
    fn push_abundance(&mut self, kind: AbundanceKind, value: Option<f64>) {
        let _ = (kind, value);
    }

    /// Append an `id_confidence_measure[n]` value
    fn push_id_confidence_measure(&mut self, value: Option<f64>) {
        let _ = value;
    }

    /// Optional column values of the row
    fn opt_mut(&mut self) -> &mut Vec<OptColumnMapping>;
}

/// Parser for the data lines of one table.
///
/// Cells are visited in logical column order and written into a fresh
/// `R`. A line whose cell count differs from the header records one
/// `CountMatch` error and is still returned.
pub struct DataLineParser<'a, R> {
    layout: &'a TableLayout,
    metadata: &'a Metadata,
    record: PhantomData<R>,
}

impl<'a, R: SectionRecord> DataLineParser<'a, R> {
    /// Create a parser for rows laid out as `layout`
    pub fn new(layout: &'a TableLayout, metadata: &'a Metadata) -> Self {
        Self {
            layout,
            metadata,
            record: PhantomData,
        }
    }

    /// Parse one raw data line
    pub fn parse(
        &self,
        line_number: usize,
        line: &str,
        errors: &mut ErrorList,
    ) -> Result<R, ParseError> {
        let items = codec::split_line(line);
        self.parse_items(line_number, &items, errors)
    }

    /// Parse a data line already split into cells
    pub fn parse_items(
        &self,
        line_number: usize,
        items: &[&str],
        errors: &mut ErrorList,
    ) -> Result<R, ParseError> {
        let section = self.layout.section();
        let prefix = items.first().copied().unwrap_or_default();
        if section != R::SECTION || prefix != section.row_prefix() {
            return Err(ParseError::unrecoverable(
                FormatErrorType::LinePrefix,
                line_number,
                [prefix.to_string(), format!("expected {}", R::SECTION.row_prefix())],
            ));
        }

        let cells = &items[1..];
        let mapping = self.layout.mapping();
        if cells.len() != mapping.len() {
            warn!(
                "Line {}: {} cells, {} header declares {}",
                line_number,
                cells.len(),
                section,
                mapping.len()
            );
            errors.add(MzTabError::new(
                FormatErrorType::CountMatch,
                line_number,
                [
                    cells.len().to_string(),
                    section.name().to_string(),
                    mapping.len().to_string(),
                ],
            ))?;
        }

        let mut record = R::default();
        let mut checker = CellChecker::new(line_number, self.metadata, errors);
        let factory = self.layout.factory();
        for (logical, physical) in mapping.iter_logical() {
            let Some(column) = factory.column(logical) else {
                continue;
            };
            let cell = cells.get(physical - 1).copied();
            match &column.kind {
                ColumnKind::Stable(stable) => record.set_stable(*stable, cell, &mut checker)?,
                ColumnKind::Abundance { kind, .. } => {
                    let value = checker.check_double(&column.header, cell)?;
                    record.push_abundance(*kind, value);
                }
                ColumnKind::IdConfidenceMeasure { .. } => {
                    let value = checker.check_double(&column.header, cell)?;
                    record.push_id_confidence_measure(value);
                }
                ColumnKind::Optional(optional) => {
                    let value = checker.check_optional(&column.header, cell, column.column_type)?;
                    record.opt_mut().push(OptColumnMapping {
                        identifier: optional.identifier(),
                        value,
                    });
                }
            }
        }
        Ok(record)
    }
}
