//! Column type classification.
//!
//! Maps the raw type string reported by the backend (e.g. `int(11)`,
//! `enum('aktiv','inaktiv')`, `decimal(6,2)`) to a semantic value domain.
//! Classification is total and deterministic: every input lands in exactly
//! one domain, with free text as the fallback.

use serde::{Deserialize, Serialize};

/// Semantic domain of a column's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDomain {
    /// Whole numbers, step size 1
    Integer,
    /// Fractional numerics (decimal, float, double)
    Decimal,
    /// Closed set of string literals, in declaration order
    Enumerated(Vec<String>),
    /// Calendar date
    Date,
    /// Date with time of day
    DateTime,
    /// Unconstrained text
    FreeText,
}

impl ValueDomain {
    /// Whether values of this domain are filtered by a closed interval.
    pub fn is_ranged(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Decimal | Self::Date | Self::DateTime
        )
    }
}

/// Classify a raw column type string into its value domain.
///
/// Priority order: enum prefix, numeric substrings, datetime/timestamp,
/// date, free text. Substring matching is deliberate — the backend reports
/// composite type strings like `int(11) unsigned` or `decimal(6,2)`.
pub fn classify(raw_type: &str) -> ValueDomain {
    let lower = raw_type.trim().to_lowercase();

    if lower.starts_with("enum(") {
        return ValueDomain::Enumerated(parse_enum_options(raw_type));
    }

    if lower.contains("int") {
        return ValueDomain::Integer;
    }
    if lower.contains("decimal") || lower.contains("float") || lower.contains("double") {
        return ValueDomain::Decimal;
    }

    if lower.contains("datetime") || lower.contains("timestamp") {
        return ValueDomain::DateTime;
    }
    if lower.contains("date") {
        return ValueDomain::Date;
    }

    ValueDomain::FreeText
}

/// Extract the literal list from an `enum('a','b',…)` type string.
///
/// Minimal quoted-literal lexer, not a SQL expression parser. Rules:
/// a single quote opens a literal, the next single quote closes it, and two
/// adjacent quotes outside an open literal delimit two literals (`'a''b'`
/// lexes as `a`, `b`). Escaped quotes inside a literal are unsupported.
/// Literal case is preserved; source order is kept.
pub fn parse_enum_options(raw_type: &str) -> Vec<String> {
    let trimmed = raw_type.trim();
    let Some(open) = trimmed.find('(') else {
        return Vec::new();
    };
    let Some(close) = trimmed.rfind(')') else {
        return Vec::new();
    };
    if close <= open {
        return Vec::new();
    }
    let body = &trimmed[open + 1..close];

    let mut options = Vec::new();
    let mut current = String::new();
    let mut in_literal = false;
    for ch in body.chars() {
        if ch == '\'' {
            if in_literal {
                options.push(std::mem::take(&mut current));
                in_literal = false;
            } else {
                in_literal = true;
            }
        } else if in_literal {
            current.push(ch);
        }
        // Separators and whitespace outside literals are skipped.
    }
    options
}

/// Widget the external UI layer should render for a domain.
///
/// The core never touches presentation; this is the pure classification the
/// UI consumes to build its per-column input fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InputSpec {
    /// Whole-number field, step size 1
    IntegerField,
    /// Fractional-number field
    DecimalField,
    /// Multi-select over a closed option list
    MultiSelect { options: Vec<String> },
    /// Calendar date picker
    DatePicker,
    /// Date-and-time picker
    DateTimePicker,
    /// Plain text field
    TextField,
}

/// Derive the input widget for a value domain.
pub fn input_spec(domain: &ValueDomain) -> InputSpec {
    match domain {
        ValueDomain::Integer => InputSpec::IntegerField,
        ValueDomain::Decimal => InputSpec::DecimalField,
        ValueDomain::Enumerated(options) => InputSpec::MultiSelect {
            options: options.clone(),
        },
        ValueDomain::Date => InputSpec::DatePicker,
        ValueDomain::DateTime => InputSpec::DateTimePicker,
        ValueDomain::FreeText => InputSpec::TextField,
    }
}
