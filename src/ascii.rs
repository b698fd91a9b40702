use std::fmt::Write;

use strata_edit::{ColumnRect, Highlight};
use strata_session::Session;
use strata_view::{LayerFrame, VisibleCell, VisibleRole};

fn glyph(cell: Option<&VisibleCell>) -> char {
    match cell {
        None => '.',
        Some(c) => match c.role {
            VisibleRole::Floor => '#',
            VisibleRole::Wall => 'H',
            VisibleRole::Fluid => '~',
            VisibleRole::Below if c.intensity >= 0.6 => '=',
            VisibleRole::Below if c.intensity > 0.0 => '-',
            VisibleRole::Below => ',',
        },
    }
}

/// Text rendering of one frame: a stats header, then one line per row.
///
/// `@` marks the cursor; selected columns show `o` (active) or `x` (stale layer).
pub fn render(frame: &LayerFrame, cursor: (i32, i32), selection: Option<(ColumnRect, Highlight)>) -> String {
    let st = frame.stats();
    let mut out = String::with_capacity((frame.width + 1) * (frame.height + 1) + 64);
    let _ = writeln!(
        out,
        "camera_z={} floor={} wall={} fluid={} below={} empty={}",
        frame.camera_z, st.floor, st.wall, st.fluid, st.below, st.empty
    );
    for (y, row) in frame.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let (x, y) = (x as i32, y as i32);
            let ch = if (x, y) == cursor {
                '@'
            } else {
                match selection {
                    Some((rect, Highlight::Active)) if rect.contains(x, y) => 'o',
                    Some((rect, Highlight::Stale)) if rect.contains(x, y) => 'x',
                    _ => glyph(cell.as_ref()),
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

pub fn render_session(session: &Session) -> String {
    let selection = session.selection_rect().zip(session.highlight());
    render(&session.frame(), session.cursor().position(), selection)
}
