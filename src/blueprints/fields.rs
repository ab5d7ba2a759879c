//! Comma-separated field splitting for blueprint lines.
//!
//! Only the subset of CSV that blueprints use: plain fields, and
//! double-quoted fields where `""` is a literal quote.

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_till};
use nom::character::complete::char;
use nom::combinator::{map, value};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::{IResult, Parser};

/// Split a line into its fields. An empty line yields a single empty field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut input = line;

    loop {
        let (rest, field) = match field(input) {
            Ok(parsed) => parsed,
            // Unterminated quote: keep the remainder verbatim
            Err(_) => ("", input.to_string()),
        };
        fields.push(field);

        match rest.strip_prefix(',') {
            Some(next) => input = next,
            None => break,
        }
    }

    fields
}

/// First field of a line, as used for layer-shift detection
pub fn first_field(line: &str) -> String {
    match field(line) {
        Ok((_, field)) => field,
        Err(_) => line.to_string(),
    }
}

fn field(input: &str) -> IResult<&str, String> {
    if input.starts_with('"') {
        let (rest, inner) = quoted(input)?;
        let (rest, tail) = plain(rest)?;
        return Ok((rest, format!("{}{}", inner, tail)));
    }

    let (rest, text) = plain(input)?;
    Ok((rest, text.to_string()))
}

fn plain(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == ',').parse(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('"'),
            many0(alt((is_not("\""), value("\"", tag("\"\""))))),
            char('"'),
        ),
        |parts: Vec<&str>| parts.concat(),
    )
    .parse(input)
}
