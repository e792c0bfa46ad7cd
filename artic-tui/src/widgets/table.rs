//! Artwork table: checkbox, ID, Title and Artist columns.

use artic_lib::model::Artwork;
use crossterm::style::Color;

use crate::render::{Buffer, Style, truncate_to_width};

const CHECKBOX_WIDTH: u16 = 3;
const ID_WIDTH: u16 = 8;
const GAP: u16 = 2;

/// Checked state of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCheck {
    None,
    Some,
    All,
}

impl PageCheck {
    pub fn of(rows: usize, checked: usize) -> Self {
        match checked {
            0 => Self::None,
            n if n >= rows => Self::All,
            _ => Self::Some,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::None => "[ ]",
            Self::Some => "[-]",
            Self::All => "[x]",
        }
    }
}

/// Column x-offsets and widths for a given table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    id_x: u16,
    title_x: u16,
    title_width: u16,
    artist_x: u16,
    artist_width: u16,
}

impl Columns {
    fn layout(width: u16) -> Self {
        let id_x = CHECKBOX_WIDTH + GAP;
        let title_x = id_x + ID_WIDTH + GAP;
        let rest = width.saturating_sub(title_x + GAP);
        let title_width = rest / 2;
        let artist_x = title_x + title_width + GAP;
        Self {
            id_x,
            title_x,
            title_width,
            artist_x,
            artist_width: width.saturating_sub(artist_x),
        }
    }
}

/// One frame of the table.
pub struct ArtworkTable<'a> {
    pub rows: &'a [Artwork],
    pub checked: &'a dyn Fn(u64) -> bool,
    /// Index into `rows` of the highlighted row.
    pub cursor: Option<usize>,
    /// Index of the first row drawn under the header.
    pub scroll: usize,
}

impl ArtworkTable<'_> {
    /// Draws the header at `y` and up to `height - 1` rows below it, starting
    /// at row `scroll`. The header checkbox always reflects the whole page.
    pub fn render(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, height: u16) {
        if height == 0 || width == 0 {
            return;
        }
        let cols = Columns::layout(width);

        let checked_rows = self.rows.iter().filter(|r| (self.checked)(r.id)).count();
        let header = Style::new().bold();
        let page_check = if self.rows.is_empty() {
            PageCheck::None
        } else {
            PageCheck::of(self.rows.len(), checked_rows)
        };
        buf.put_str(x, y, page_check.glyph(), CHECKBOX_WIDTH, header);
        buf.put_str(x + cols.id_x, y, "ID", ID_WIDTH, header);
        buf.put_str(x + cols.title_x, y, "Title", cols.title_width, header);
        buf.put_str(x + cols.artist_x, y, "Artist", cols.artist_width, header);

        if self.rows.is_empty() {
            if height > 1 {
                buf.put_str(x, y + 1, "No records found", width, Style::new().dim());
            }
            return;
        }

        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(height as usize - 1);
        for (line, (i, row)) in visible.enumerate() {
            let row_y = y + 1 + line as u16;
            let is_checked = (self.checked)(row.id);
            let style = if is_checked {
                Style::new().fg(Color::Cyan)
            } else {
                Style::new()
            };

            let checkbox = if is_checked { "[x]" } else { "[ ]" };
            buf.put_str(x, row_y, checkbox, CHECKBOX_WIDTH, style);
            buf.put_str(x + cols.id_x, row_y, &row.id.to_string(), ID_WIDTH, style);
            buf.put_str(
                x + cols.title_x,
                row_y,
                &truncate_to_width(&row.title, cols.title_width as usize),
                cols.title_width,
                style,
            );
            buf.put_str(
                x + cols.artist_x,
                row_y,
                &truncate_to_width(first_line(row.artist()), cols.artist_width as usize),
                cols.artist_width,
                style.dim(),
            );

            if self.cursor == Some(i) {
                buf.fill_style(x, row_y, width, style.reverse());
            }
        }
    }
}

/// Artist labels carry nationality and dates on following lines.
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
