//! Corporate-actions pre-pass: a pluggable hook run once between ledger
//! freeze and the first FY iteration. See `SPEC_FULL.md` §B.5/§9.
//!
//! The core never calls a network to resolve splits or ticker renames; a
//! caller who needs that wires it up behind this trait.

use crate::models::Trade;

/// Mutates a frozen trade ledger in place, e.g. to apply stock splits
/// (scale `quantity`) or ticker renames (rewrite `symbol`).
pub trait CorporateActionAdjuster {
    fn adjust(&self, trades: &mut [Trade]);
}

/// The default adjuster: does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdjuster;

impl CorporateActionAdjuster for NoopAdjuster {
    fn adjust(&self, _trades: &mut [Trade]) {}
}
