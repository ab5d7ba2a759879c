//! Blueprint parsing
//!
//! This module turns blueprint text into layered cell commands. The pipeline
//! is: header line -> data lines -> layer groups -> reordered groups -> sparse
//! rows -> expanded areas.

pub mod cells;
pub mod command;
pub mod fields;
pub mod header;
pub mod kind;
pub mod layers;
pub mod parser;

pub use cells::{Layer, Row};
pub use command::{Command, Expansion};
pub use header::{Header, HeaderError, StartPosition};
pub use kind::{BlueprintKind, Dig};
pub use parser::BlueprintParser;
