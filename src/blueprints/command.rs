//! Single-cell blueprint commands.
//!
//! A cell holds either a bare symbol (`d`) or a symbol with an area
//! expansion (`d(3x3)`). Classification is a set of independent predicates
//! rather than one tag, since the marker sets are not disjoint by
//! construction.

use std::fmt;
use std::num::IntErrorKind;

use nom::bytes::complete::take_till;
use nom::character::complete::{char, digit1, space0};
use nom::combinator::{map_res, opt};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

/// Shifts subsequent lines one layer up
pub const LAYER_UP: &str = "#<";
/// Shifts subsequent lines one layer down
pub const LAYER_DOWN: &str = "#>";
/// Comment cell
pub const COMMENT: &str = "#";
/// Symbols that designate something
pub const ALLOWED_COMMANDS: [&str; 7] = ["d", "j", "u", "i", "h", "r", "x"];
/// Symbols that do nothing
pub const NO_OPS: [&str; 3] = ["#", "~", "`"];

/// Rectangular repeat factor of a command, in columns (`x`) and rows (`y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    pub x: u32,
    pub y: u32,
}

impl Expansion {
    pub const NONE: Expansion = Expansion { x: 1, y: 1 };

    pub fn new(x: u32, y: u32) -> Self {
        Self {
            x: x.max(1),
            y: y.max(1),
        }
    }

    pub fn is_area(&self) -> bool {
        self.x > 1 || self.y > 1
    }

    /// Clamp both dimensions to `max`
    pub fn clamped(self, max: u32) -> Self {
        Self::new(self.x.min(max), self.y.min(max))
    }
}

impl Default for Expansion {
    fn default() -> Self {
        Self::NONE
    }
}

/// A normalized cell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    symbol: String,
    expansion: Expansion,
}

impl Command {
    /// Parse raw cell text.
    ///
    /// Never fails: text that does not look like a command simply becomes a
    /// symbol that none of the predicates accept.
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();

        match cell(&normalized) {
            Ok((_, (symbol, expansion))) => Self {
                symbol: symbol.to_string(),
                expansion: expansion.unwrap_or_default(),
            },
            // Neither half of the cell grammar can hard-fail; keep the text as-is
            Err(_) => Self {
                symbol: normalized,
                expansion: Expansion::NONE,
            },
        }
    }

    pub fn is_layer_up(&self) -> bool {
        self.symbol == LAYER_UP
    }

    pub fn is_layer_down(&self) -> bool {
        self.symbol == LAYER_DOWN
    }

    pub fn is_layer_shift(&self) -> bool {
        self.is_layer_up() || self.is_layer_down()
    }

    pub fn is_allowed_command(&self) -> bool {
        ALLOWED_COMMANDS.contains(&self.symbol.as_str())
    }

    pub fn is_no_op(&self) -> bool {
        NO_OPS.contains(&self.symbol.as_str())
    }

    pub fn is_comment(&self) -> bool {
        self.symbol == COMMENT
    }

    pub fn has_expansion(&self) -> bool {
        self.expansion.is_area()
    }

    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    /// The symbol without expansion information
    pub fn command(&self) -> &str {
        &self.symbol
    }

    /// Canonical cell text: `d`, or `d(3x3)` when the command covers an area
    pub fn formatted(&self) -> String {
        if !self.has_expansion() {
            return self.symbol.clone();
        }

        format!("{}({}x{})", self.symbol, self.expansion.x, self.expansion.y)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

fn cell(input: &str) -> IResult<&str, (&str, Option<Expansion>)> {
    (take_till(|c: char| c == '('), opt(expansion)).parse(input)
}

/// `(WxH)` with the closing paren optional; unreadable dimensions become 1
fn expansion(input: &str) -> IResult<&str, Expansion> {
    let (rest, body) = preceded(char('('), take_till(|c: char| c == ')')).parse(input)?;
    let (rest, _) = opt(char(')')).parse(rest)?;

    let mut dims = body.splitn(2, 'x').map(|part| {
        dimension(part)
            .map(|(_, value)| value)
            .unwrap_or(1)
    });
    let x = dims.next().unwrap_or(1);
    let y = dims.next().unwrap_or(1);

    Ok((rest, Expansion::new(x, y)))
}

/// Oversized factors saturate so that clamping still applies to them
fn dimension(input: &str) -> IResult<&str, u32> {
    map_res(delimited(space0, digit1, space0), |digits: &str| {
        digits
            .parse::<u64>()
            .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
            .or_else(|e| match e.kind() {
                IntErrorKind::PosOverflow => Ok(u32::MAX),
                _ => Err(e),
            })
    })
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_layer_up() {
        let command = Command::parse("#<");
        assert!(command.is_layer_up());
        assert!(!command.is_layer_down());
    }

    #[test]
    fn test_is_layer_down() {
        let command = Command::parse("#>");
        assert!(command.is_layer_down());
        assert!(!command.is_layer_up());
    }

    #[test]
    fn test_is_allowed_command() {
        for symbol in ALLOWED_COMMANDS {
            assert!(Command::parse(symbol).is_allowed_command(), "{}", symbol);
        }
        assert!(Command::parse(" D ").is_allowed_command());
        assert!(!Command::parse("m").is_allowed_command());
        assert!(!Command::parse("#").is_allowed_command());
        assert!(!Command::parse("").is_allowed_command());
    }

    #[test]
    fn test_is_no_op() {
        for letter in 'a'..='z' {
            assert!(!Command::parse(&letter.to_string()).is_no_op());
        }
        for symbol in NO_OPS {
            assert!(Command::parse(symbol).is_no_op(), "{}", symbol);
        }
    }

    #[test]
    fn test_unknown_symbol_fails_every_predicate() {
        let command = Command::parse("zz");
        assert!(!command.is_allowed_command());
        assert!(!command.is_no_op());
        assert!(!command.is_comment());
        assert!(!command.is_layer_shift());
    }

    #[test]
    fn test_comment_is_also_no_op() {
        let command = Command::parse("#");
        assert!(command.is_comment());
        assert!(command.is_no_op());
        assert!(!Command::parse("d").is_comment());
    }

    #[test]
    fn test_formatted() {
        assert_eq!(Command::parse("d(3x3").formatted(), "d(3x3)");
        assert_eq!(Command::parse("d").formatted(), "d");
        assert_eq!(Command::parse("D(2X4)").formatted(), "d(2x4)");
        assert_eq!(Command::parse("d(1x1)").formatted(), "d");
    }

    #[test]
    fn test_has_expansion() {
        assert!(Command::parse("d(3x3").has_expansion());
        assert!(Command::parse("d(1x3)").has_expansion());
        assert!(!Command::parse("d").has_expansion());
    }

    #[test]
    fn test_expansion() {
        assert_eq!(Command::parse("d").expansion(), Expansion { x: 1, y: 1 });
        assert_eq!(Command::parse("d(3x3)").expansion(), Expansion { x: 3, y: 3 });
        assert_eq!(Command::parse("d(1x3)").expansion(), Expansion { x: 1, y: 3 });
        assert_eq!(Command::parse("d( 4 x 2 )").expansion(), Expansion { x: 4, y: 2 });
    }

    #[test]
    fn test_malformed_expansion_defaults_to_one() {
        assert_eq!(Command::parse("d(3)").expansion(), Expansion { x: 3, y: 1 });
        assert_eq!(Command::parse("d(ax2)").expansion(), Expansion { x: 1, y: 2 });
        assert_eq!(Command::parse("d(0x0)").expansion(), Expansion::NONE);
        assert_eq!(Command::parse("d()").command(), "d");
    }

    #[test]
    fn test_command_strips_expansion() {
        assert_eq!(Command::parse("d").command(), "d");
        assert_eq!(Command::parse("d(3x3)").command(), "d");
    }

    #[test]
    fn test_display_is_symbol() {
        assert_eq!(Command::parse("d").to_string(), "d");
        assert_eq!(Command::parse("d(3x3)").to_string(), "d");
    }

    #[test]
    fn test_oversized_expansion_saturates() {
        assert_eq!(
            Command::parse("d(5000000000x1)").expansion(),
            Expansion { x: u32::MAX, y: 1 }
        );
        assert_eq!(
            Command::parse("d(2x99999999999999999999999)").expansion(),
            Expansion { x: 2, y: u32::MAX }
        );
    }

    #[test]
    fn test_space_before_paren_is_not_a_command() {
        let command = Command::parse("d (2x2)");
        assert_eq!(command.command(), "d ");
        assert!(!command.is_allowed_command());
    }

    #[test]
    fn test_expansion_clamped() {
        assert_eq!(Expansion::new(500, 2).clamped(100), Expansion { x: 100, y: 2 });
    }
}
