use log::{debug, warn};

use super::context::{ContextError, ParserContext};
use super::label::{
    AssayProperty, ContactProperty, CvProperty, DatabaseProperty, InstrumentProperty,
    LabelError, MetadataLabel, MsRunProperty, MzTabProperty, SampleProperty,
    SmallMoleculeFeatureProperty, SmallMoleculeProperty, SoftwareProperty,
    StudyVariableProperty,
};
use crate::codec;
use crate::error::{
    ErrorList, FormatErrorType, LogicalErrorType, MzTabError, MzTabErrorType, ParseError,
};
use crate::model::constants::MTD_PREFIX;
use crate::model::{Location, Metadata, Parameter, Section};

/// Map a failed context operation to the error that aborts the document
fn context_error(line_number: usize, error: ContextError) -> ParseError {
    match error {
        ContextError::Undeclared { element, id } => ParseError::unrecoverable(
            LogicalErrorType::NotDefineInMetadata,
            line_number,
            [format!("{}[{}]", element, id)],
        ),
        ContextError::InvalidId { element } => {
            ParseError::unrecoverable(LogicalErrorType::IdNumber, line_number, [element, "0"])
        }
    }
}

/// Store a single-valued entity property; a later line wins
fn assign<T>(slot: &mut Option<T>, value: Option<T>, label: &str) {
    let Some(value) = value else {
        return;
    };
    if slot.is_some() {
        warn!("{} is defined again, overwriting the previous value", label);
    }
    *slot = Some(value);
}

/// Store a document singleton, rejecting a second definition
fn set_once<T>(
    first: bool,
    slot: &mut Option<T>,
    value: Option<T>,
    line_number: usize,
    label: &str,
) -> Result<(), ParseError> {
    if !first || slot.is_some() {
        return Err(ParseError::unrecoverable(
            LogicalErrorType::DuplicationDefine,
            line_number,
            [label],
        ));
    }
    *slot = value;
    Ok(())
}

/// Parser for `MTD` lines.
///
/// Each line is resolved into a [`MetadataLabel`] and written through the
/// [`ParserContext`]. Recoverable problems go to the [`ErrorList`];
/// anything that makes the header untrustworthy is returned as
/// [`ParseError::Unrecoverable`].
pub struct MtdLineParser<'a> {
    context: &'a mut ParserContext,
    errors: &'a mut ErrorList,
    line_number: usize,
}

impl<'a> MtdLineParser<'a> {
    /// Create a parser writing into `context` and `errors`
    pub fn new(context: &'a mut ParserContext, errors: &'a mut ErrorList) -> Self {
        Self {
            context,
            errors,
            line_number: 0,
        }
    }

    /// Metadata built so far
    pub fn metadata(&self) -> &Metadata {
        self.context.metadata()
    }

    /// Parse one raw metadata line
    pub fn parse(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        let items = codec::split_line(line);
        self.parse_items(line_number, &items)
    }

    /// Parse a metadata line already split into fields
    pub fn parse_items(&mut self, line_number: usize, items: &[&str]) -> Result<(), ParseError> {
        self.line_number = line_number;

        let [prefix, define_label, value] = items else {
            return Err(ParseError::unrecoverable(
                FormatErrorType::MtdLine,
                line_number,
                [items.join("\t")],
            ));
        };
        if *prefix != MTD_PREFIX {
            return Err(ParseError::unrecoverable(
                FormatErrorType::LinePrefix,
                line_number,
                [*prefix, "metadata lines start with MTD"],
            ));
        }

        let label = MetadataLabel::parse(define_label).map_err(|e| match e {
            LabelError::DefineLabel => ParseError::unrecoverable(
                FormatErrorType::MtdDefineLabel,
                line_number,
                [*define_label],
            ),
            LabelError::IdNumber(id) => ParseError::unrecoverable(
                LogicalErrorType::IdNumber,
                line_number,
                [define_label.to_string(), id],
            ),
        })?;

        self.dispatch(label, define_label, value)
    }

    fn dispatch(&mut self, label: MetadataLabel, text: &str, value: &str) -> Result<(), ParseError> {
        let line = self.line_number;
        match label {
            MetadataLabel::MzTab(MzTabProperty::Version) => {
                let version = codec::parse_version(value).ok_or_else(|| {
                    ParseError::unrecoverable(FormatErrorType::MzTabVersion, line, [value])
                })?;
                let first = self.context.declare_singleton(text);
                let metadata = self.context.metadata_mut();
                set_once(first, &mut metadata.mztab_version, Some(version), line, text)
            }
            MetadataLabel::MzTab(MzTabProperty::Id) => {
                let id = self.check_string(text, value)?;
                let first = self.context.declare_singleton(text);
                let metadata = self.context.metadata_mut();
                set_once(first, &mut metadata.mztab_id, id, line, text)
            }
            MetadataLabel::Title => {
                let title = self.check_string(text, value)?;
                let first = self.context.declare_singleton(text);
                let metadata = self.context.metadata_mut();
                set_once(first, &mut metadata.title, title, line, text)
            }
            MetadataLabel::Description => {
                let description = self.check_string(text, value)?;
                let first = self.context.declare_singleton(text);
                let metadata = self.context.metadata_mut();
                set_once(first, &mut metadata.description, description, line, text)
            }
            MetadataLabel::SampleProcessing(id) => {
                let parameters = self.check_parameter_list(text, value)?;
                let entity = self
                    .context
                    .add_sample_processing(id)
                    .map_err(|e| context_error(line, e))?;
                if let Some(parameters) = parameters {
                    entity.parameters = parameters;
                }
                Ok(())
            }
            MetadataLabel::Instrument(id, property) => self.instrument(id, property, text, value),
            MetadataLabel::Software(id, property) => self.software(id, property, text, value),
            MetadataLabel::Publication(id) => {
                let items = match codec::parse_publication_items(value) {
                    Ok(items) => items,
                    Err(_) => {
                        self.record(FormatErrorType::Publication, [text, value])?;
                        Vec::new()
                    }
                };
                let entity = self
                    .context
                    .add_publication(id)
                    .map_err(|e| context_error(line, e))?;
                entity.items = items;
                Ok(())
            }
            MetadataLabel::Contact(id, property) => self.contact(id, property, text, value),
            MetadataLabel::Uri(id) => match self.check_uri(text, value)? {
                Some(uri) => self
                    .context
                    .add_uri(id, uri)
                    .map_err(|e| context_error(line, e)),
                None => Ok(()),
            },
            MetadataLabel::ExternalStudyUri(id) => match self.check_uri(text, value)? {
                Some(uri) => self
                    .context
                    .add_external_study_uri(id, uri)
                    .map_err(|e| context_error(line, e)),
                None => Ok(()),
            },
            MetadataLabel::QuantificationMethod => {
                let parameter = self.check_parameter(text, value)?;
                let first = self.context.declare_singleton(text);
                let metadata = self.context.metadata_mut();
                set_once(first, &mut metadata.quantification_method, parameter, line, text)
            }
            MetadataLabel::SmallMolecule(property) => {
                let parameter = self.check_parameter(text, value)?;
                let first = self.context.declare_singleton(text);
                let metadata = self.context.metadata_mut();
                let slot = match property {
                    SmallMoleculeProperty::QuantificationUnit => {
                        &mut metadata.small_molecule_quantification_unit
                    }
                    SmallMoleculeProperty::IdentificationReliability => {
                        &mut metadata.small_molecule_identification_reliability
                    }
                };
                set_once(first, slot, parameter, line, text)
            }
            MetadataLabel::SmallMoleculeFeature(SmallMoleculeFeatureProperty::QuantificationUnit) => {
                let parameter = self.check_parameter(text, value)?;
                let first = self.context.declare_singleton(text);
                let metadata = self.context.metadata_mut();
                set_once(
                    first,
                    &mut metadata.small_molecule_feature_quantification_unit,
                    parameter,
                    line,
                    text,
                )
            }
            MetadataLabel::MsRun(id, property) => self.ms_run(id, property, text, value),
            MetadataLabel::Custom(id) => match self.check_parameter(text, value)? {
                Some(parameter) => self
                    .context
                    .add_custom(id, parameter)
                    .map_err(|e| context_error(line, e)),
                None => Ok(()),
            },
            MetadataLabel::Sample(id, property) => self.sample(id, property, text, value),
            MetadataLabel::Assay(id, property) => self.assay(id, property, text, value),
            MetadataLabel::StudyVariable(id, property) => {
                self.study_variable(id, property, text, value)
            }
            MetadataLabel::Cv(id, property) => {
                let entity = self.context.add_cv(id).map_err(|e| context_error(line, e))?;
                let value = codec::parse_string(value);
                match property {
                    None => {}
                    Some(CvProperty::Label) => assign(&mut entity.label, value, text),
                    Some(CvProperty::FullName) => assign(&mut entity.full_name, value, text),
                    Some(CvProperty::Version) => assign(&mut entity.version, value, text),
                    Some(CvProperty::Url) => assign(&mut entity.url, value, text),
                }
                Ok(())
            }
            MetadataLabel::Database(id, property) => self.database(id, property, text, value),
            MetadataLabel::ColUnit(target) => match Section::from_name(&target) {
                Some(section) => {
                    self.context.add_col_unit(section.colunit_label(), value);
                    Ok(())
                }
                None => self.record(FormatErrorType::MtdDefineLabel, [text]),
            },
            MetadataLabel::IdConfidenceMeasure(id) => match self.check_parameter(text, value)? {
                Some(parameter) => self
                    .context
                    .add_id_confidence_measure(id, parameter)
                    .map_err(|e| context_error(line, e)),
                None => Ok(()),
            },
        }
    }

    fn instrument(
        &mut self,
        id: u32,
        property: InstrumentProperty,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        let parameter = self.check_parameter(text, value)?;
        let entity = self
            .context
            .add_instrument(id)
            .map_err(|e| context_error(line, e))?;
        match property {
            InstrumentProperty::Name => assign(&mut entity.name, parameter, text),
            InstrumentProperty::Source => assign(&mut entity.source, parameter, text),
            InstrumentProperty::Analyzer => entity.analyzers.extend(parameter),
            InstrumentProperty::Detector => assign(&mut entity.detector, parameter, text),
        }
        Ok(())
    }

    fn software(
        &mut self,
        id: u32,
        property: Option<SoftwareProperty>,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        match property {
            None => {
                let parameter = self.check_parameter(text, value)?;
                if parameter.as_ref().is_some_and(|p| p.value.is_none()) {
                    self.record(LogicalErrorType::SoftwareVersion, [text])?;
                }
                let entity = self
                    .context
                    .add_software(id)
                    .map_err(|e| context_error(line, e))?;
                assign(&mut entity.parameter, parameter, text);
            }
            Some(SoftwareProperty::Setting) => {
                let entity = self
                    .context
                    .add_software(id)
                    .map_err(|e| context_error(line, e))?;
                entity.settings.extend(codec::parse_string(value));
            }
        }
        Ok(())
    }

    fn contact(
        &mut self,
        id: u32,
        property: ContactProperty,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        let parsed = codec::parse_string(value);
        if property == ContactProperty::Email
            && parsed.is_some()
            && codec::parse_email(value).is_none()
        {
            self.record(FormatErrorType::Email, [text, value])?;
        }
        let entity = self
            .context
            .add_contact(id)
            .map_err(|e| context_error(line, e))?;
        match property {
            ContactProperty::Name => assign(&mut entity.name, parsed, text),
            ContactProperty::Affiliation => assign(&mut entity.affiliation, parsed, text),
            ContactProperty::Email => assign(&mut entity.email, parsed, text),
        }
        Ok(())
    }

    fn ms_run(
        &mut self,
        id: u32,
        property: Option<MsRunProperty>,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        match property {
            Some(MsRunProperty::InstrumentRef) => {
                let instrument = self.check_index_ref(text, value, "instrument")?;
                self.context
                    .add_ms_run_instrument_ref(id, instrument)
                    .map_err(|e| context_error(line, e))?;
            }
            Some(MsRunProperty::Location) => {
                let location = self.check_location(text, value)?;
                let entity = self.context.add_ms_run(id).map_err(|e| context_error(line, e))?;
                assign(&mut entity.location, location, text);
            }
            Some(
                property @ (MsRunProperty::Format
                | MsRunProperty::IdFormat
                | MsRunProperty::FragmentationMethod
                | MsRunProperty::HashMethod),
            ) => {
                let parameter = self.check_parameter(text, value)?;
                let entity = self.context.add_ms_run(id).map_err(|e| context_error(line, e))?;
                match property {
                    MsRunProperty::Format => assign(&mut entity.format, parameter, text),
                    MsRunProperty::IdFormat => assign(&mut entity.id_format, parameter, text),
                    MsRunProperty::HashMethod => assign(&mut entity.hash_method, parameter, text),
                    _ => entity.fragmentation_methods.extend(parameter),
                }
            }
            Some(MsRunProperty::Hash) => {
                let entity = self.context.add_ms_run(id).map_err(|e| context_error(line, e))?;
                assign(&mut entity.hash, codec::parse_string(value), text);
            }
            None => {
                let entity = self.context.add_ms_run(id).map_err(|e| context_error(line, e))?;
                assign(&mut entity.name, codec::parse_string(value), text);
            }
        }
        Ok(())
    }

    fn sample(
        &mut self,
        id: u32,
        property: Option<SampleProperty>,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        match property {
            None | Some(SampleProperty::Description) => {
                let entity = self.context.add_sample(id).map_err(|e| context_error(line, e))?;
                let slot = match property {
                    None => &mut entity.name,
                    _ => &mut entity.description,
                };
                assign(slot, codec::parse_string(value), text);
            }
            Some(property) => {
                let parameter = self.check_parameter(text, value)?;
                let entity = self.context.add_sample(id).map_err(|e| context_error(line, e))?;
                let list = match property {
                    SampleProperty::Species => &mut entity.species,
                    SampleProperty::Tissue => &mut entity.tissue,
                    SampleProperty::CellType => &mut entity.cell_type,
                    SampleProperty::Disease => &mut entity.disease,
                    _ => &mut entity.custom,
                };
                list.extend(parameter);
            }
        }
        Ok(())
    }

    fn assay(
        &mut self,
        id: u32,
        property: Option<AssayProperty>,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        match property {
            None => {
                let entity = self.context.add_assay(id).map_err(|e| context_error(line, e))?;
                assign(&mut entity.name, codec::parse_string(value), text);
            }
            Some(AssayProperty::SampleRef) => {
                let sample = self.check_index_ref(text, value, "sample")?;
                self.context
                    .add_assay_sample_ref(id, sample)
                    .map_err(|e| context_error(line, e))?;
            }
            Some(AssayProperty::MsRunRef) => {
                let ms_runs = self.check_ref_list(text, value, "ms_run")?;
                self.context
                    .add_assay_ms_run_refs(id, &ms_runs)
                    .map_err(|e| context_error(line, e))?;
            }
            Some(AssayProperty::Custom) => {
                let parameter = self.check_parameter(text, value)?;
                let entity = self.context.add_assay(id).map_err(|e| context_error(line, e))?;
                entity.custom.extend(parameter);
            }
            Some(AssayProperty::ExternalUri) => {
                let uri = self.check_uri(text, value)?;
                let entity = self.context.add_assay(id).map_err(|e| context_error(line, e))?;
                assign(&mut entity.external_uri, uri, text);
            }
        }
        Ok(())
    }

    fn study_variable(
        &mut self,
        id: u32,
        property: Option<StudyVariableProperty>,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        match property {
            Some(StudyVariableProperty::AssayRefs) => {
                let assays = self.check_ref_list(text, value, "assay")?;
                self.context
                    .add_study_variable_assay_refs(id, &assays)
                    .map_err(|e| context_error(line, e))?;
            }
            Some(StudyVariableProperty::SampleRefs) => {
                let samples = self.check_ref_list(text, value, "sample")?;
                self.context
                    .add_study_variable_sample_refs(id, &samples)
                    .map_err(|e| context_error(line, e))?;
            }
            Some(
                property @ (StudyVariableProperty::AverageFunction
                | StudyVariableProperty::VariationFunction),
            ) => {
                let parameter = self.check_parameter(text, value)?;
                let entity = self
                    .context
                    .add_study_variable(id)
                    .map_err(|e| context_error(line, e))?;
                let slot = match property {
                    StudyVariableProperty::AverageFunction => &mut entity.average_function,
                    _ => &mut entity.variation_function,
                };
                assign(slot, parameter, text);
            }
            None | Some(StudyVariableProperty::Description) => {
                let entity = self
                    .context
                    .add_study_variable(id)
                    .map_err(|e| context_error(line, e))?;
                let slot = match property {
                    None => &mut entity.name,
                    _ => &mut entity.description,
                };
                assign(slot, codec::parse_string(value), text);
            }
        }
        Ok(())
    }

    fn database(
        &mut self,
        id: u32,
        property: Option<DatabaseProperty>,
        text: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_number;
        match property {
            None => {
                let parameter = self.check_parameter(text, value)?;
                let entity = self.context.add_database(id).map_err(|e| context_error(line, e))?;
                assign(&mut entity.parameter, parameter, text);
            }
            Some(DatabaseProperty::Url) => {
                let url = self.check_location(text, value)?;
                let entity = self.context.add_database(id).map_err(|e| context_error(line, e))?;
                assign(&mut entity.url, url, text);
            }
            Some(property) => {
                let entity = self.context.add_database(id).map_err(|e| context_error(line, e))?;
                let slot = match property {
                    DatabaseProperty::Prefix => &mut entity.prefix,
                    _ => &mut entity.version,
                };
                assign(slot, codec::parse_string(value), text);
            }
        }
        Ok(())
    }

    /// Record a recoverable error on the current line
    fn record<I, S>(&mut self, error_type: impl Into<MzTabErrorType>, context: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.errors
            .add(MzTabError::new(error_type, self.line_number, context))?;
        Ok(())
    }

    fn check_string(&mut self, label: &str, value: &str) -> Result<Option<String>, ParseError> {
        let parsed = codec::parse_string(value);
        if parsed.is_none() {
            self.record(LogicalErrorType::NotNull, [label])?;
        }
        Ok(parsed)
    }

    fn check_parameter(&mut self, label: &str, value: &str) -> Result<Option<Parameter>, ParseError> {
        if codec::is_null(value) {
            return Ok(None);
        }
        let parameter = codec::parse_param(value);
        if parameter.is_none() {
            self.record(FormatErrorType::Param, [label, value])?;
        }
        Ok(parameter)
    }

    fn check_parameter_list(
        &mut self,
        label: &str,
        value: &str,
    ) -> Result<Option<Vec<Parameter>>, ParseError> {
        match codec::parse_param_list(value) {
            Ok(list) => Ok(Some(list)),
            Err(_) => {
                self.record(FormatErrorType::ParamList, [label, value])?;
                Ok(None)
            }
        }
    }

    fn check_uri(&mut self, label: &str, value: &str) -> Result<Option<String>, ParseError> {
        match codec::parse_uri(value) {
            Ok(Some(uri)) => Ok(Some(uri)),
            Ok(None) => {
                self.record(LogicalErrorType::NotNull, [label])?;
                Ok(None)
            }
            Err(_) => {
                self.record(FormatErrorType::Uri, [label, value])?;
                Ok(None)
            }
        }
    }

    /// A `null` location is declared but unknown; a malformed one is not declared
    fn check_location(&mut self, label: &str, value: &str) -> Result<Option<Location>, ParseError> {
        match codec::parse_url(value) {
            Ok(Some(url)) => Ok(Some(Location::Url(url))),
            Ok(None) => {
                self.record(LogicalErrorType::NotNull, [label])?;
                Ok(Some(Location::Unknown))
            }
            Err(_) => {
                self.record(FormatErrorType::Url, [label, value])?;
                Ok(None)
            }
        }
    }

    fn check_index_ref(
        &self,
        label: &str,
        value: &str,
        element: &'static str,
    ) -> Result<u32, ParseError> {
        codec::parse_indexed_element(value, element).ok_or_else(|| {
            ParseError::unrecoverable(
                FormatErrorType::IndexedElement,
                self.line_number,
                [label, value, element],
            )
        })
    }

    /// Parse a reference list; each id listed more than once is reported once
    fn check_ref_list(
        &mut self,
        label: &str,
        value: &str,
        element: &'static str,
    ) -> Result<Vec<u32>, ParseError> {
        let ids = match codec::parse_ref_list(value, element) {
            Ok(ids) if !ids.is_empty() => ids,
            _ => {
                return Err(ParseError::unrecoverable(
                    FormatErrorType::IndexedElement,
                    self.line_number,
                    [label, value, element],
                ))
            }
        };

        let mut reported = Vec::new();
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) && !reported.contains(id) {
                reported.push(*id);
                self.record(
                    LogicalErrorType::DuplicationId,
                    [label.to_string(), format!("{}[{}]", element, id)],
                )?;
            }
        }
        Ok(ids)
    }

    /// Check document-wide completeness once the metadata section has ended
    pub fn refine_normal_metadata(&self) -> Result<(), ParseError> {
        refine_normal_metadata(self.context.metadata())
    }
}

/// Completeness checks run after the last metadata line.
///
/// Violations are reported with line number 0.
pub fn refine_normal_metadata(metadata: &Metadata) -> Result<(), ParseError> {
    debug!("Refining metadata section");
    let missing = |path: String| {
        Err(ParseError::unrecoverable(
            LogicalErrorType::NotDefineInMetadata,
            0,
            [path],
        ))
    };

    if metadata.quantification_method.is_none() {
        return missing("quantification_method".to_string());
    }

    for assay in metadata.assays.values() {
        if assay.ms_run_refs.is_empty() {
            return missing(format!("assay[{}]-ms_run_ref", assay.id));
        }
    }

    if !metadata.study_variables.is_empty() && !metadata.assays.is_empty() {
        for study_variable in metadata.study_variables.values() {
            if study_variable.assay_refs.is_empty() {
                return Err(ParseError::unrecoverable(
                    LogicalErrorType::AssayRefs,
                    0,
                    [format!("study_variable[{}]-assay_refs", study_variable.id)],
                ));
            }
        }
    }

    if metadata.description.is_none() {
        return missing("description".to_string());
    }

    for run in metadata.ms_runs.values() {
        if run.location.is_none() {
            return missing(format!("ms_run[{}]-location", run.id));
        }
    }

    Ok(())
}
