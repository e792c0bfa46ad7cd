use crossterm::style::Color;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Foreground, background and attributes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            bold: false,
            dim: false,
            reverse: false,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub style: Style,
    /// Right half of a wide character drawn in the cell to the left.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            style: Style::default(),
            wide_continuation: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Writes `text` starting at (x, y), clipped to `max_width` columns and
    /// the buffer edge. Returns the number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
        let limit = max_width.min(self.width.saturating_sub(x));
        let mut col = 0u16;

        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col + w > limit {
                break;
            }
            self.set(
                x + col,
                y,
                Cell {
                    char: ch,
                    style,
                    wide_continuation: false,
                },
            );
            if w == 2 {
                self.set(
                    x + col + 1,
                    y,
                    Cell {
                        char: ' ',
                        style,
                        wide_continuation: true,
                    },
                );
            }
            col += w;
        }

        col
    }

    /// Paints `width` cells of row `y` with `style`, keeping their characters.
    pub fn fill_style(&mut self, x: u16, y: u16, width: u16, style: Style) {
        for dx in 0..width {
            if x + dx >= self.width || y >= self.height {
                break;
            }
            let idx = self.index(x + dx, y);
            self.cells[idx].style = style;
        }
    }

    /// Text of row `y`, with wide-character continuations skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|c| !c.wide_continuation)
            .map(|c| c.char)
            .collect()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }
}

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Shortens `s` to `max_width` columns, ending with an ellipsis when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips_to_width() {
        let mut buf = Buffer::new(10, 1);
        let written = buf.put_str(2, 0, "Nighthawks", 5, Style::new());
        assert_eq!(written, 5);
        assert_eq!(buf.row_text(0), "  Night   ");
    }

    #[test]
    fn test_wide_chars_take_two_cells() {
        let mut buf = Buffer::new(6, 1);
        let written = buf.put_str(0, 0, "北斎x", 6, Style::new());
        assert_eq!(written, 5);
        assert!(buf.get(1, 0).unwrap().wide_continuation);
        assert_eq!(buf.row_text(0), "北斎x ");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("The Bedroom", 20), "The Bedroom");
        assert_eq!(truncate_to_width("The Bedroom", 6), "The B…");
        assert_eq!(truncate_to_width("The Bedroom", 0), "");
    }

    #[test]
    fn test_diff_reports_changed_cells() {
        let a = Buffer::new(3, 2);
        let mut b = a.clone();
        b.put_str(1, 1, "x", 1, Style::new());
        let changed: Vec<_> = b.diff(&a).map(|(x, y, c)| (x, y, c.char)).collect();
        assert_eq!(changed, vec![(1, 1, 'x')]);
    }
}
