pub mod eligibility;
pub mod weighting;
pub mod selector;
pub mod topics;
pub mod lifecycle;

pub use lifecycle::{PairingEngine, StartedPairing};
pub use weighting::WeightedCandidate;
