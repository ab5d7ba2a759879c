//! Quickfort - layered CSV blueprint parser
//!
//! Turns textual blueprints (a header line followed by CSV grids separated by
//! `#>` / `#<` layer shifts) into ordered layers of sparse cell commands.

pub mod blueprints;
pub mod core;

pub use crate::blueprints::{BlueprintKind, BlueprintParser, Command, Dig, Header, Layer, Row};
pub use crate::core::config::{ParserConfig, StartBlockMode};
pub use crate::core::error::{QuickfortError, Result};
