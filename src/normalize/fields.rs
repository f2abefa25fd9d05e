//! Alias resolution and value coercion for profile columns
//!
//! Every logical field is looked up through the alias table in
//! [`crate::constants::field_aliases`], so adding a new spelling of a column
//! is a data change only.

use crate::constants::field_aliases;
use crate::parser::RawRow;

/// Logical fields recognised in profile rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Platform,
    Latitude,
    Longitude,
    Pressure,
    Temperature,
    Salinity,
    DissolvedOxygen,
    Nitrate,
    Ph,
    Organization,
    JulianDay,
    CalendarDate,
    CycleIndex,
}

impl LogicalField {
    /// Accepted column names, highest priority first
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            LogicalField::Platform => field_aliases::PLATFORM,
            LogicalField::Latitude => field_aliases::LATITUDE,
            LogicalField::Longitude => field_aliases::LONGITUDE,
            LogicalField::Pressure => field_aliases::PRESSURE,
            LogicalField::Temperature => field_aliases::TEMPERATURE,
            LogicalField::Salinity => field_aliases::SALINITY,
            LogicalField::DissolvedOxygen => field_aliases::DISSOLVED_OXYGEN,
            LogicalField::Nitrate => field_aliases::NITRATE,
            LogicalField::Ph => field_aliases::PH,
            LogicalField::Organization => field_aliases::ORGANIZATION,
            LogicalField::JulianDay => field_aliases::JULIAN_DAY,
            LogicalField::CalendarDate => field_aliases::CALENDAR_DATE,
            LogicalField::CycleIndex => field_aliases::CYCLE_INDEX,
        }
    }
}

/// Raw value of the first alias present with a non-empty value.
///
/// Aliases are tried in priority order and matched against column names
/// ignoring case. Within one alias, columns are tried in header order.
/// Values are untrimmed, so whitespace counts as a value and wins.
pub fn resolve(row: &RawRow, field: LogicalField) -> Option<&str> {
    field.aliases().iter().find_map(|alias| {
        row.values_ignore_case(alias)
            .find(|value| !value.is_empty())
    })
}

/// Resolved value coerced to a finite float; anything else is absent
pub fn resolve_number(row: &RawRow, field: LogicalField) -> Option<f64> {
    resolve(row, field).and_then(parse_number)
}

/// Resolved value, trimmed
pub fn resolve_string(row: &RawRow, field: LogicalField) -> Option<String> {
    resolve(row, field).map(|value| value.trim().to_string())
}

/// Parse a trimmed string as a finite float
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
