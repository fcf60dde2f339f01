//! Column names of the transaction and store-metadata CSV sources.
//!
//! The headers match the upstream dataset verbatim; derived columns are
//! appended by the loader during cleaning.

/// Store identifier, present in both sources and used as the join key.
pub const STORE: &str = "Store";

// --- transaction source ---

/// Transaction date (parsed to a date dtype by the loader).
pub const DATE: &str = "Date";
/// Daily sales amount.
pub const SALES: &str = "Sales";
/// Daily customer count.
pub const CUSTOMERS: &str = "Customers";
/// 1 when the store was open that day, 0 otherwise.
pub const OPEN: &str = "Open";
/// 1 when a promotion was active that day, 0 otherwise.
pub const PROMO: &str = "Promo";

// --- store metadata source ---

/// Store category (a/b/c/d in the upstream dataset).
pub const STORE_TYPE: &str = "StoreType";
/// Distance to the nearest competitor in meters; may be missing.
pub const COMPETITION_DISTANCE: &str = "CompetitionDistance";

// --- derived during cleaning ---

pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const DAY: &str = "Day";
/// ISO week of year.
pub const WEEK_OF_YEAR: &str = "WeekOfYear";
/// Sales divided by customers, IEEE f64 (inf when customers is zero).
pub const SALE_PER_CUSTOMER: &str = "SalePerCustomer";
