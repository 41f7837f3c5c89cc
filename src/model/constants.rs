//! Literal tokens and delimiters of the mzTab-M text format.

/// Token written for an absent value.
pub const NULL: &str = "null";

/// Token for a value that could not be calculated (IEEE NaN).
pub const CALCULATE_ERROR: &str = "NaN";

/// Token for positive infinity. Negative infinity has no token.
pub const INFINITY: &str = "INF";

/// Field separator of every line.
pub const TAB: char = '\t';

/// Separator of most list-valued cells and of parameter lists.
pub const BAR: char = '|';

/// Separator of reference lists such as `assay_refs`.
pub const COMMA: char = ',';

/// Separator between a publication type and its accession.
pub const COLON: char = ':';

/// Prefix of optional column headers.
pub const OPT_PREFIX: &str = "opt_";

/// Scope token of optional columns that apply to the whole row.
pub const OPT_GLOBAL: &str = "global";

/// Infix marking an optional column defined by a CV parameter.
pub const OPT_CV: &str = "cv_";

/// Accession of the decoy flag parameter, whose optional columns are boolean.
pub const DECOY_ACCESSION: &str = "MS:1002217";

/// Prefix of metadata lines.
pub const MTD_PREFIX: &str = "MTD";

/// Prefix of comment lines.
pub const COMMENT_PREFIX: &str = "COM";
