//! Campaign input loading for adlens.
//!
//! Resolves column aliases once at the boundary, coerces cells into typed
//! [`adlens_core::CampaignRecord`]s and groups them per campaign, so the
//! engine only ever sees normalized field names.

pub mod error;
pub mod group;
pub mod load;
pub mod parse;
pub mod schema;

pub use error::IngestError;
pub use group::group_by_campaign;
pub use load::{fingerprint, load_dataset, parse_dataset, Dataset, InputFormat};
pub use schema::{ColumnMap, REQUIRED_COLUMNS, REVENUE_ALIASES};
