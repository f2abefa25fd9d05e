//! Application constants for the Argo processor
//!
//! This module contains the column alias table, time-axis constants and
//! default values used throughout the ingestion pipeline.

// =============================================================================
// Data Roots and File Patterns
// =============================================================================

/// Default root holding core (physical-only) float profiles
pub const DEFAULT_CORE_ROOT: &str = "data/core";

/// Default root holding biogeochemical float profiles
pub const DEFAULT_BGC_ROOT: &str = "data/bgc";

/// Extension of ingested profile files
pub const PROFILE_FILE_EXTENSION: &str = "csv";

// =============================================================================
// Column Aliases
// =============================================================================

/// Accepted column names per logical field, in priority order.
///
/// Matching against CSV headers is case-insensitive; the first alias with a
/// non-empty value in a row wins. Argo exports are inconsistent between data
/// centres (and between the core and BGC products), so most fields carry
/// both the adjusted and the raw column name.
pub mod field_aliases {
    pub const PLATFORM: &[&str] = &["PLATFORM_NUMBER", "PLATFORM", "FLOAT_ID", "WMO"];

    pub const LATITUDE: &[&str] = &["LATITUDE", "LAT"];

    pub const LONGITUDE: &[&str] = &["LONGITUDE", "LON", "LONG"];

    pub const PRESSURE: &[&str] = &["PRES_ADJUSTED", "PRES", "PRESSURE"];

    pub const TEMPERATURE: &[&str] = &["TEMP_ADJUSTED", "TEMP", "TEMPERATURE"];

    pub const SALINITY: &[&str] = &["PSAL_ADJUSTED", "PSAL", "SALINITY"];

    pub const DISSOLVED_OXYGEN: &[&str] =
        &["DOXY_ADJUSTED", "DOXY", "DISSOLVED_OXYGEN", "OXYGEN"];

    pub const NITRATE: &[&str] = &["NITRATE_ADJUSTED", "NITRATE"];

    pub const PH: &[&str] = &["PH_IN_SITU_TOTAL_ADJUSTED", "PH_IN_SITU_TOTAL", "PH"];

    pub const ORGANIZATION: &[&str] = &["DATA_CENTRE", "DATA_CENTER", "INSTITUTION", "ORGANIZATION"];

    /// Days since 1950-01-01T00:00:00Z
    pub const JULIAN_DAY: &[&str] = &["JULD", "JULD_LOCATION", "JULIAN_DAY"];

    /// Free-form calendar dates such as `2021-03-04 12:30:00` or `20210304123000`
    pub const CALENDAR_DATE: &[&str] = &["DATE", "DATE_TIME", "DATETIME", "TIME"];

    pub const CYCLE_INDEX: &[&str] = &["CYCLE_NUMBER", "CYCLE"];
}

// =============================================================================
// Time Axis
// =============================================================================

/// Epoch of the Argo julian-day axis (1950-01-01T00:00:00Z) in Unix milliseconds
pub const EPOCH_1950_UNIX_MS: i64 = -631_152_000_000;

/// Milliseconds in one julian day
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Minimum digit count of a usable calendar date (`YYYYMMDD`)
pub const MIN_DATE_DIGITS: usize = 8;

// =============================================================================
// Cycle Segmentation
// =============================================================================

/// Time gap (julian days) above which a new cycle starts
pub const DEFAULT_CYCLE_TIME_GAP_DAYS: f64 = 1.0;

/// Pressure drop (dbar) above which a new ascent, and therefore cycle, starts
pub const DEFAULT_CYCLE_PRESSURE_GAP: f64 = 50.0;

// =============================================================================
// Transport View
// =============================================================================

/// Most recent history entries kept in the transport view
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Points kept per cycle in the transport view
pub const DEFAULT_CYCLE_LIMIT: usize = 200;
