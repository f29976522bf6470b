//! Location module - candidate locations and the criteria they are judged on.

mod candidate;
mod criteria;

pub use candidate::Location;
pub use criteria::{Criterion, CriterionDirection, CriterionWeights, WEIGHT_SUM_TOLERANCE};
