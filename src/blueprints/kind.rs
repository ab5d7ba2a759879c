//! Blueprint kinds.
//!
//! A kind only gates on the header keyword; the layer output is the same
//! generic cell-command structure for every kind.

use std::ops::{Deref, DerefMut};

use crate::core::config::ParserConfig;
use crate::core::error::Result;

use super::header::Header;
use super::parser::BlueprintParser;

/// A parser specialised to one header keyword
pub trait BlueprintKind {
    /// Keyword the header must carry, lowercase
    const KEYWORD: &'static str;

    fn header(&self) -> &Header;

    /// Whether the parsed header names this kind
    fn check_header(&self) -> bool {
        self.header().command.as_deref() == Some(Self::KEYWORD)
    }
}

/// `#dig` blueprints
#[derive(Debug, Clone, Default)]
pub struct Dig {
    parser: BlueprintParser,
}

impl Dig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: BlueprintParser::with_config(config),
        }
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self {
            parser: BlueprintParser::from_text(text)?,
        })
    }

    pub fn into_parser(self) -> BlueprintParser {
        self.parser
    }
}

impl From<BlueprintParser> for Dig {
    fn from(parser: BlueprintParser) -> Self {
        Self { parser }
    }
}

impl BlueprintKind for Dig {
    const KEYWORD: &'static str = "dig";

    fn header(&self) -> &Header {
        self.parser.header()
    }
}

impl Deref for Dig {
    type Target = BlueprintParser;

    fn deref(&self) -> &Self::Target {
        &self.parser
    }
}

impl DerefMut for Dig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.parser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_header() {
        let headers = [
            "#dig\n",
            "#dig",
            "# dig\n",
            "# dig \n",
            "# dig, \n",
            "#DIG,,,",
            "#dig the same area with d(3x3) specified in row 1, col 1\n",
            "#dig Stairs leading down to a small room below\n",
            "#dig start(3; 3; Center tile of a 5-tile square) Regular blueprint comment\n",
        ];

        let mut parser = Dig::new();
        for header in headers {
            parser.set_blueprint(header).unwrap();
            assert!(parser.check_header(), "{:?}", header);
        }

        parser.set_blueprint("#build").unwrap();
        assert!(!parser.check_header());
    }

    #[test]
    fn test_check_header_missing_keyword() {
        let mut parser = Dig::new();
        assert!(!parser.check_header());

        parser.set_blueprint("d,d,d").unwrap();
        assert!(!parser.check_header());

        parser.set_blueprint("#digging").unwrap();
        assert!(!parser.check_header());
    }

    #[test]
    fn test_from_parser() {
        let parser = BlueprintParser::from_text("#dig\nd").unwrap();
        let dig = Dig::from(parser);
        assert!(dig.check_header());
        assert_eq!(dig.layers().len(), 1);
    }
}
