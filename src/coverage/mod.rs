//! Coverage-unit counters.
//!
//! Each metric defines its own atomic "unit of agreement" over one target
//! sequence, and each counter here accumulates covered intervals (minus
//! per-call excluded mismatch positions) and reports how many units are
//! covered so far:
//!
//! - [`PositionMask`](mask::PositionMask): single positions
//! - [`WindowSet`](window::WindowSet): length-k windows, every position covered
//! - [`SpacedPairSet`](spaced::SpacedPairSet): position pairs (i, i+k-1)
//! - [`PairSet`](pairs::PairSet): all ordered position pairs i <= j
//!
//! All four share position-mask semantics underneath: adds are idempotent
//! unions, and a unit is covered exactly when all of its positions are.

pub mod mask;
pub mod pairs;
pub mod spaced;
pub mod window;

pub use mask::PositionMask;
pub use pairs::PairSet;
pub use spaced::SpacedPairSet;
pub use window::WindowSet;
