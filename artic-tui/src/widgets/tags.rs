//! Selected-id tag strip.

use crossterm::style::Color;

use crate::render::{Buffer, Style};

/// Lays ids out as tags, wrapping at `width`. Returns one string per line.
pub fn wrap_tags(ids: impl IntoIterator<Item = u64>, width: u16) -> Vec<Vec<String>> {
    let width = width as usize;
    let mut lines: Vec<Vec<String>> = Vec::new();
    let mut line: Vec<String> = Vec::new();
    let mut used = 0;

    for id in ids {
        let tag = format!(" {} ", id);
        let needed = if line.is_empty() { tag.len() } else { tag.len() + 1 };
        if !line.is_empty() && used + needed > width {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        used += if line.is_empty() { tag.len() } else { tag.len() + 1 };
        line.push(tag);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Draws the heading and tags from `y`, using at most `height` rows.
pub fn render(buf: &mut Buffer, ids: impl IntoIterator<Item = u64>, x: u16, y: u16, width: u16, height: u16) {
    if height == 0 {
        return;
    }
    buf.put_str(x, y, "Selected Row IDs:", width, Style::new().bold());

    let tag_style = Style::new().fg(Color::DarkBlue).bg(Color::Rgb {
        r: 191,
        g: 219,
        b: 254,
    });
    let lines = wrap_tags(ids, width);
    let shown = (height as usize - 1).min(lines.len());

    for (row, line) in lines.iter().take(shown).enumerate() {
        let row_y = y + 1 + row as u16;
        let mut col = x;
        for tag in line {
            col += buf.put_str(col, row_y, tag, width.saturating_sub(col - x), tag_style);
            col += 1;
        }
    }

    if lines.len() > shown && shown > 0 {
        let hidden: usize = lines[shown..].iter().map(Vec::len).sum();
        let note = format!("+{} more", hidden);
        let note_x = x + width.saturating_sub(note.len() as u16);
        buf.put_str(note_x, y + shown as u16, &note, width, Style::new().dim());
    }
}
