//! Application constants for the records service
//!
//! Default connection settings, reserved field names and the wire-level
//! error codes shared by the API and the loader.

// =============================================================================
// Document Store Defaults
// =============================================================================

/// Default MongoDB connection string (the compose service name `mongo`)
pub const DEFAULT_MONGO_URI: &str = "mongodb://mongo:27017/";

/// Default database holding the records collection
pub const DEFAULT_DATABASE: &str = "ESA";

/// Default collection name shared by the loader and the API
pub const DEFAULT_COLLECTION: &str = "results";

/// URI schemes accepted by the MongoDB driver
pub const MONGO_URI_SCHEMES: &[&str] = &["mongodb://", "mongodb+srv://"];

// =============================================================================
// Record Fields
// =============================================================================

/// Mandatory time field every record carries
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Store-assigned unique identifier field
pub const ID_FIELD: &str = "_id";

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Default bind host for the API service
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port for the API service
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// Loader Defaults
// =============================================================================

/// Default Parquet file imported by the loader
pub const DEFAULT_INPUT_FILE: &str = "results.parquet";

// =============================================================================
// Environment Variables
// =============================================================================

pub mod env_vars {
    pub const MONGO_URI: &str = "RECORDS_MONGO_URI";
    pub const DATABASE: &str = "RECORDS_DATABASE";
    pub const COLLECTION: &str = "RECORDS_COLLECTION";
    pub const HOST: &str = "RECORDS_HOST";
    pub const PORT: &str = "RECORDS_PORT";
    pub const INPUT: &str = "RECORDS_INPUT";
}

// =============================================================================
// Wire Error Codes
// =============================================================================

/// Error codes reported in `{"success": false, "error": ...}` bodies
pub mod error_codes {
    /// Either range bound could not be parsed as a timestamp
    pub const DATE_PARSE_ERROR: &str = "date_parse_error";

    /// Both bounds parsed but nothing matched
    pub const NO_DATA_IN_RANGE: &str = "no_data_in_range";
}
