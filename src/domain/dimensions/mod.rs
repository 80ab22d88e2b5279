//! Dimension Model - the scoring space of an assessment.
//!
//! Six personality axes, twelve motivator categories, and an open-ended
//! interest taxonomy, plus the weight payloads options carry over them.

mod interest;
mod key;
mod motivator;
mod riasec;
mod signals;

pub use interest::InterestKey;
pub use key::DimensionKey;
pub use motivator::Motivator;
pub use riasec::RiasecAxis;
pub use signals::{InterestWeight, SignalSet, WeightMap};
