//! Whole-screen layout and the checkbox interaction of the table.

use artic_lib::TableController;
use artic_lib::model::ArtworkId;

use crate::render::{Buffer, Style};
use crate::widgets::paginator::Paginator;
use crate::widgets::spinner::Spinner;
use crate::widgets::table::ArtworkTable;
use crate::widgets::tags;

const TITLE: &str = "Server Pagination Table";
const HELP: &str = "space toggle · a page · ←/→ page · home/end · +/- rows · r reload · q quit";
const TAGS_HEIGHT: u16 = 4;
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 10;

/// Presentation state that is not part of the table itself.
#[derive(Debug, Default)]
pub struct TableView {
    cursor: usize,
    /// First row drawn; follows the cursor when the page is taller than the screen.
    scroll: usize,
    spinner: Spinner,
    tick: usize,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, rows: usize) {
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Keeps the cursor on a row after the page shrank.
    pub fn clamp_cursor(&mut self, rows: usize) {
        self.cursor = self.cursor.min(rows.saturating_sub(1));
        self.scroll = self.scroll.min(self.cursor);
    }

    /// Moves the scroll offset so the cursor is within `visible_rows` rows.
    fn scroll_to_cursor(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + visible_rows {
            self.scroll = self.cursor + 1 - visible_rows;
        }
    }

    pub fn advance_spinner(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Rows that should be checked on this page after toggling the cursor row.
    ///
    /// Returns `None` when the page has no rows.
    pub fn toggle_row(&self, table: &TableController) -> Option<Vec<ArtworkId>> {
        let row = table.records().get(self.cursor)?;
        let mut checked = table.visible_selection();
        if table.is_checked(row.id) {
            checked.retain(|id| *id != row.id);
        } else {
            checked.push(row.id);
        }
        Some(checked)
    }

    /// Rows that should be checked after the "all on page" toggle: every row,
    /// or none when every row is already checked.
    pub fn toggle_page(&self, table: &TableController) -> Vec<ArtworkId> {
        let ids = table.result().ids();
        if !ids.is_empty() && table.visible_selection().len() == ids.len() {
            Vec::new()
        } else {
            ids
        }
    }

    pub fn draw(&mut self, table: &TableController, buf: &mut Buffer) {
        let (width, height) = (buf.width(), buf.height());
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            buf.put_str(0, 0, "Terminal too small", width, Style::new().dim());
            return;
        }

        let x = 1;
        let inner = width - 2;

        buf.put_str(x, 0, TITLE, inner, Style::new().bold());
        if table.is_loading() {
            let title_width = crate::render::display_width(TITLE) as u16;
            self.spinner.render(buf, x + title_width + 2, 0, self.tick);
        }

        let help_y = height - 1;
        let tags_y = help_y - TAGS_HEIGHT;
        let paginator_y = tags_y - 2;
        let table_y = 2;
        let table_height = paginator_y - 1 - table_y;
        self.scroll_to_cursor((table_height as usize).saturating_sub(1));

        let checked = |id: ArtworkId| table.is_checked(id);
        ArtworkTable {
            rows: table.records(),
            checked: &checked,
            cursor: (!table.records().is_empty()).then_some(self.cursor),
            scroll: self.scroll,
        }
        .render(buf, x, table_y, inner, table_height);

        Paginator::new(table.window(), table.total_records()).render(buf, paginator_y, width);

        tags::render(buf, table.selection().iter(), x, tags_y, inner, TAGS_HEIGHT);

        buf.put_str(x, help_y, HELP, inner, Style::new().dim());
    }
}
