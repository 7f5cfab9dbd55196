//! Plain-text board rendering.

use std::io::{self, Write};

use connectk_engine::{Cell, GridState};

/// Writes the grid top row first, followed by the column numbers.
///
/// ```text
/// . . . . . . .
/// . . . X . . .
/// . . O X . . .
/// 1 2 3 4 5 6 7
/// ```
pub fn render<W>(out: &mut W, state: &GridState) -> io::Result<()>
where
    W: Write,
{
    let cell_width = state.width().to_string().len();
    for y in (0..state.height()).rev() {
        let cells = (0..state.width()).map(|x| match state.cell(x, y) {
            Cell::Empty => ".".to_owned(),
            Cell::Piece(player) => player.to_string(),
        });
        write_row(out, cells, cell_width)?;
    }
    write_row(out, (1..=state.width()).map(|n| n.to_string()), cell_width)?;
    Ok(())
}

fn write_row<W, I>(out: &mut W, items: I, cell_width: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    let row = items
        .into_iter()
        .map(|item| format!("{item:>cell_width$}"))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{row}")
}
