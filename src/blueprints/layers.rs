//! Layer grouping and ordering.
//!
//! A line whose first cell is `#>` or `#<` opens a new layer group. Groups
//! opened with `#<` describe the layer above the one placed just before
//! them, so they are spliced in ahead of it instead of appended.

use super::command::Command;
use super::fields::first_field;

/// Lines belonging to one layer, in text order
pub type LineGroup<'a> = Vec<&'a str>;

fn leading_command(line: &str) -> Command {
    Command::parse(&first_field(line))
}

/// Split data lines into groups at every layer shift.
///
/// The shift line itself opens its new group. The first group always
/// exists, even when it ends up empty because line one is a shift.
pub fn group_lines_by_layer<'a, S: AsRef<str>>(lines: &'a [S]) -> Vec<LineGroup<'a>> {
    let mut groups: Vec<LineGroup<'a>> = vec![Vec::new()];

    for line in lines {
        let line = line.as_ref();
        if leading_command(line).is_layer_shift() {
            groups.push(Vec::new());
        }

        // a group was pushed above if needed, so there is always a last one
        if let Some(group) = groups.last_mut() {
            group.push(line);
        }
    }

    groups
}

/// Order groups by their layer shifts.
///
/// A `#<` group is inserted before the most recently placed group; every
/// other group (including a `#<` group with nothing placed yet) is appended.
pub fn adjust_layer_order(groups: Vec<LineGroup<'_>>) -> Vec<LineGroup<'_>> {
    let mut adjusted: Vec<LineGroup<'_>> = Vec::with_capacity(groups.len());

    for group in groups {
        let shifts_up = group
            .first()
            .is_some_and(|line| leading_command(line).is_layer_up());

        if shifts_up && !adjusted.is_empty() {
            let position = adjusted.len() - 1;
            tracing::trace!(position, "splicing layer-up group before last placed group");
            adjusted.insert(position, group);
        } else {
            adjusted.push(group);
        }
    }

    adjusted
}
