//! Value kinds, converters and typed storage slots.
//!
//! Every bindable field stores one of a closed set of element kinds. A field's
//! accessor hands out a [`Slot`], a typed mutable view of its storage, and the
//! parser writes converted values through it.

use std::fmt;

use chrono::NaiveDate;

/// Date format accepted for date-valued fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Element kinds a field can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free-form text.
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// `true` / `false`, case-insensitive.
    Boolean,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
}

impl ValueKind {
    /// Type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Integer => "Int64",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn convert_text(raw: &str) -> Option<String> {
    Some(raw.to_owned())
}

fn convert_integer(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn convert_boolean(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn convert_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Converts every comma-separated part with `convert`, or reports the first
/// part that failed. Nothing is returned unless all parts convert.
fn convert_all<V>(raw: &str, convert: fn(&str) -> Option<V>) -> Result<Vec<V>, String> {
    raw.split(',')
        .map(str::trim)
        .map(|part| convert(part).ok_or_else(|| part.to_owned()))
        .collect()
}

/// Typed mutable view of a field's storage.
#[derive(Debug)]
pub enum Slot<'a> {
    /// Scalar text.
    Text(&'a mut String),
    /// Scalar integer.
    Integer(&'a mut i64),
    /// Scalar flag.
    Boolean(&'a mut bool),
    /// Scalar date; `None` until assigned.
    Date(&'a mut Option<NaiveDate>),
    /// Sequence of text values.
    TextList(&'a mut Vec<String>),
    /// Sequence of integers.
    IntegerList(&'a mut Vec<i64>),
    /// Sequence of dates.
    DateList(&'a mut Vec<NaiveDate>),
}

impl Slot<'_> {
    /// Element kind stored by this slot.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) | Self::TextList(_) => ValueKind::Text,
            Self::Integer(_) | Self::IntegerList(_) => ValueKind::Integer,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Date(_) | Self::DateList(_) => ValueKind::Date,
        }
    }

    /// Whether the storage is a sequence container.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(
            self,
            Self::TextList(_) | Self::IntegerList(_) | Self::DateList(_)
        )
    }

    /// Current value rendered as text, or `None` when there is nothing to show.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.to_string()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Boolean(_) => None,
            Self::Date(value) => value
                .as_ref()
                .map(|date| date.format(DATE_FORMAT).to_string()),
            Self::TextList(values) => join_nonempty(values.iter().cloned()),
            Self::IntegerList(values) => join_nonempty(values.iter().map(ToString::to_string)),
            Self::DateList(values) => join_nonempty(
                values
                    .iter()
                    .map(|date| date.format(DATE_FORMAT).to_string()),
            ),
        }
    }

    /// Converts `raw` and writes it into the storage.
    ///
    /// Scalars are trimmed and replaced. Sequences are split on `,`, each part
    /// trimmed, and every converted part appended. On failure the offending
    /// text is returned and the storage is left untouched.
    pub fn store(self, raw: &str) -> Result<(), String> {
        let scalar = raw.trim();
        let fail = || scalar.to_owned();
        match self {
            Self::Text(target) => *target = convert_text(scalar).ok_or_else(fail)?,
            Self::Integer(target) => *target = convert_integer(scalar).ok_or_else(fail)?,
            Self::Boolean(target) => *target = convert_boolean(scalar).ok_or_else(fail)?,
            Self::Date(target) => *target = Some(convert_date(scalar).ok_or_else(fail)?),
            Self::TextList(target) => target.extend(convert_all(raw, convert_text)?),
            Self::IntegerList(target) => target.extend(convert_all(raw, convert_integer)?),
            Self::DateList(target) => target.extend(convert_all(raw, convert_date)?),
        }
        Ok(())
    }
}

fn join_nonempty(values: impl Iterator<Item = String>) -> Option<String> {
    let joined = values.collect::<Vec<_>>().join(",");
    if joined.is_empty() { None } else { Some(joined) }
}
