//! Dataset schema shared by the compute pipeline and the service layer:
//! column names of the two CSV sources, the source-location type, and the
//! per-store metadata record.

pub mod columns;
pub mod sources;
pub mod store;

pub use sources::DataSources;
pub use store::StoreMeta;
