use thiserror::Error;

/// The rule engine never raises (§4.8, §7): missing inputs produce a
/// non-triggering rule with explanatory details instead. This type has
/// no inhabitants; it exists so the crate's public functions keep a
/// `Result`-shaped signature consistent with its siblings.
#[derive(Debug, Error)]
pub enum RuleError {}

pub type Result<T> = std::result::Result<T, RuleError>;
