//! Constants shared by the filter engine and the UI.

/// Quiet time after the last discrete edit (text, select, toggle).
pub const DISCRETE_DEBOUNCE_MS: u64 = 300;
/// Quiet time after the last continuous edit (slider drag).
pub const CONTINUOUS_DEBOUNCE_MS: u64 = 800;

pub const YEAR_DISPLAY_MIN: u64 = 1970;
pub const PRICE_DISPLAY_MIN: u64 = 1000;
pub const PRICE_DISPLAY_MAX: u64 = 150_000;
pub const MILEAGE_DISPLAY_MIN: u64 = 0;
pub const MILEAGE_DISPLAY_MAX: u64 = 300_000;

/// Separator used for multi-value query parameters.
pub const MULTI_VALUE_SEPARATOR: char = ';';

/// Body of the backend's error payload when a search matched nothing.
pub const NO_LISTINGS_FOUND: &str = "No listings found";

// Values accepted by the backend for the categorical filters (case sensitive).
pub const SELLER_TYPES: [&str; 2] = ["For Sale By Owner", "Dealership"];
pub const NEW_USED: [&str; 3] = ["Used", "New", "Certified"];
pub const TRANSMISSIONS: [&str; 4] = ["Automatic", "Manual", "CVT", "Automanual"];
pub const FUEL_TYPES: [&str; 6] = [
    "Compressed Natural Gas",
    "Diesel",
    "Electric",
    "Flex Fuel",
    "Gasoline",
    "Hybrid",
];
pub const DRIVE_TYPES: [&str; 5] = ["2-Wheel Drive", "4-Wheel Drive", "AWD", "FWD", "RWD"];
pub const TITLE_TYPES: [&str; 5] = [
    "Clean Title",
    "Dismantled Title",
    "Not Specified",
    "Rebuilt/Reconstructed Title",
    "Salvage Title",
];
