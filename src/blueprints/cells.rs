//! Line-to-cell processing and area expansion.
//!
//! Rows are sparse: a filtered-out cell leaves a gap at its column rather
//! than shifting later cells left, so column indices stay aligned with the
//! source grid.

use std::collections::BTreeMap;

use super::command::Command;
use super::fields::split_fields;

/// Column index -> command text
pub type Row = BTreeMap<usize, String>;

/// Rows of one map layer, top to bottom
pub type Layer = Vec<Row>;

/// Parse one line, keeping only allowed commands at their original columns
pub fn parse_line(line: &str) -> Row {
    split_fields(line.trim())
        .iter()
        .enumerate()
        .filter_map(|(column, field)| {
            let command = Command::parse(field);
            command
                .is_allowed_command()
                .then(|| (column, command.formatted()))
        })
        .collect()
}

/// Parse every line of a group into a layer
pub fn process_layer_lines<S: AsRef<str>>(lines: &[S]) -> Layer {
    lines.iter().map(|line| parse_line(line.as_ref())).collect()
}

/// Replace area commands such as `d(2x2)` with the cells they cover.
///
/// Cells are visited in row-major order over the layer as it was before any
/// writes, and every visited cell rewrites its whole rectangle with its bare
/// symbol. Overlapping rectangles therefore resolve to whichever cell was
/// visited last. `max_expansion` caps each dimension.
pub fn expand_areas(layer: &mut Layer, max_expansion: u32) {
    let snapshot = layer.clone();

    for (row_idx, row) in snapshot.iter().enumerate() {
        for (&col_idx, cell) in row {
            let command = Command::parse(cell);
            let requested = command.expansion();
            let expansion = requested.clamped(max_expansion);
            if expansion != requested {
                tracing::warn!(
                    cell = %cell,
                    row = row_idx,
                    column = col_idx,
                    max_expansion,
                    "clamping area expansion"
                );
            }

            let rows = expansion.y as usize;
            let columns = expansion.x as usize;
            if layer.len() < row_idx + rows {
                layer.resize_with(row_idx + rows, Row::new);
            }

            for target in &mut layer[row_idx..row_idx + rows] {
                for column in col_idx..col_idx + columns {
                    target.insert(column, command.command().to_string());
                }
            }
        }
    }
}
