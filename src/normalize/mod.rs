//! Row normalization for float profile files
//!
//! Turns header-keyed [`RawRow`]s with inconsistent column spellings into
//! strongly typed [`Entry`] values tagged with their platform identifier.
//!
//! - [`fields`] - alias table lookups and numeric coercion
//! - [`time_axis`] - julian day / calendar date / cycle index reconstruction

pub mod fields;
pub mod time_axis;

pub use fields::LogicalField;
pub use time_axis::TimeAxis;

use self::fields::{resolve_number, resolve_string};
use crate::models::Entry;
use crate::parser::RawRow;

/// Result of normalizing one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Row carries a platform id and a usable position
    Accepted { platform: String, entry: Entry },
    /// No platform identifier column with a value
    MissingPlatform,
    /// Latitude or longitude absent or not numeric
    InvalidPosition,
}

/// Normalize a raw row into a platform-tagged entry
pub fn normalize_row(row: &RawRow) -> RowOutcome {
    // A whitespace-only identifier names no instrument
    let Some(platform) =
        resolve_string(row, LogicalField::Platform).filter(|id| !id.is_empty())
    else {
        return RowOutcome::MissingPlatform;
    };

    let (Some(latitude), Some(longitude)) = (
        resolve_number(row, LogicalField::Latitude),
        resolve_number(row, LogicalField::Longitude),
    ) else {
        return RowOutcome::InvalidPosition;
    };

    let TimeAxis {
        time_value,
        date_iso,
    } = time_axis::reconstruct(row);

    let entry = Entry {
        latitude,
        longitude,
        pressure: resolve_number(row, LogicalField::Pressure),
        temperature: resolve_number(row, LogicalField::Temperature),
        salinity: resolve_number(row, LogicalField::Salinity),
        dissolved_oxygen: resolve_number(row, LogicalField::DissolvedOxygen),
        nitrate: resolve_number(row, LogicalField::Nitrate),
        ph: resolve_number(row, LogicalField::Ph),
        organization: resolve_string(row, LogicalField::Organization).unwrap_or_default(),
        time_value,
        date_iso,
    };

    RowOutcome::Accepted { platform, entry }
}
