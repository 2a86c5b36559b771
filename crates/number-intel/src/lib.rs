//! Phone number intelligence.
//!
//! The tracker only ever talks to [`NumberIntelligence`]; the default
//! implementation, [`PhonenumberIntelligence`], answers from libphonenumber
//! metadata (via the `phonenumber` crate) and a bundled region table.

mod backend;
mod error;
mod intelligence;
mod regions;
mod types;

pub use backend::PhonenumberIntelligence;
pub use error::IntelError;
#[cfg(any(test, feature = "mock"))]
pub use intelligence::MockNumberIntelligence;
pub use intelligence::NumberIntelligence;
pub use regions::{regions, RegionInfo, RegionTable, UNKNOWN_TIMEZONE};
pub use types::*;

use tracing::info;

/// Build the process-wide numbering-plan data up front.
///
/// Both the metadata database and the region table are otherwise built on
/// first use, which would put the cost on the first request.
pub fn warm_up() {
    let regions = regions().len();
    let _ = &*phonenumber::metadata::DATABASE;
    info!(regions, "Numbering-plan data loaded");
}
