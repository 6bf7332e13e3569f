//! CLI command implementations

mod check;
mod outline;
mod render;

pub use check::{check, CheckArgs};
pub use outline::outline;
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use folio_core::Variant;

/// Parse a `--variant` value
fn parse_variant(value: &str) -> Result<Variant> {
    value
        .parse::<Variant>()
        .with_context(|| format!("Invalid --variant '{}', expected basic or extended", value))
}
