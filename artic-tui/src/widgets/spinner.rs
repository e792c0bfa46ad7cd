//! Spinner widget for loading states.
//!
//! Based on the snake spinner pattern - a bouncing gradient bar.

use crossterm::style::Color;

use crate::render::{Buffer, Style};

/// Accent the snake is drawn in; the tail fades toward black.
const ACCENT: (u8, u8, u8) = (96, 165, 250);

/// One cell of a frame: `None` is empty track, `Some(t)` a snake segment
/// with brightness `t` (tail 0.0, head 1.0).
type Segment = Option<f32>;

/// Configuration and precomputed frames for the spinner.
#[derive(Clone, Debug)]
pub struct Spinner {
    /// Width of the track in characters.
    track_width: u16,
    /// Length of the snake/bar.
    snake_len: u16,
    /// Pause frames at right end.
    right_pause: usize,
    /// Pause frames at left end.
    left_pause: usize,
    frames: Vec<Vec<Segment>>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(8, 6, 1, 20)
    }
}

impl Spinner {
    pub fn new(track_width: u16, snake_len: u16, right_pause: usize, left_pause: usize) -> Self {
        let mut spinner = Self {
            track_width: track_width.max(1),
            snake_len: snake_len.clamp(1, track_width.max(1)),
            right_pause,
            left_pause,
            frames: Vec::new(),
        };
        spinner.frames = spinner.generate_frames();
        spinner
    }

    pub fn width(&self) -> u16 {
        self.track_width
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Draws frame `tick` (wrapping) at (x, y).
    pub fn render(&self, buf: &mut Buffer, x: u16, y: u16, tick: usize) {
        let frame = &self.frames[tick % self.frames.len()];
        for (i, segment) in frame.iter().enumerate() {
            let (ch, style) = match segment {
                Some(t) => ("■", Style::new().fg(shade(0.4 * (1.0 - t)))),
                None => ("⬝", Style::new().fg(shade(0.5))),
            };
            buf.put_str(x + i as u16, y, ch, 1, style);
        }
    }

    fn generate_frames(&self) -> Vec<Vec<Segment>> {
        let mut frames = Vec::new();
        let track_width = self.track_width as i32;
        let snake_len = self.snake_len as i32;

        // Right pass: snake enters from left, travels across, exits right
        for head_pos in 0..=(track_width + snake_len - 2) {
            frames.push(self.make_snake_frame(head_pos, true));
        }

        for _ in 0..self.right_pause {
            frames.push(self.make_empty_frame());
        }

        // Left pass: snake enters from right, travels across, exits left
        for head_pos in (0..=(track_width + snake_len - 2)).rev() {
            frames.push(self.make_snake_frame(head_pos, false));
        }

        for _ in 0..self.left_pause {
            frames.push(self.make_empty_frame());
        }

        frames
    }

    fn make_empty_frame(&self) -> Vec<Segment> {
        vec![None; self.track_width as usize]
    }

    fn make_snake_frame(&self, head_pos: i32, moving_right: bool) -> Vec<Segment> {
        let snake_len = self.snake_len as i32;
        let snake_start = head_pos - snake_len + 1;

        (0..self.track_width as i32)
            .map(|i| {
                if i < snake_start || i > head_pos {
                    return None;
                }
                let progress = if snake_len > 1 {
                    (i - snake_start) as f32 / (snake_len - 1) as f32
                } else {
                    1.0
                };
                Some(if moving_right { progress } else { 1.0 - progress })
            })
            .collect()
    }
}

/// The accent darkened by `amount` (0.0 = full accent).
fn shade(amount: f32) -> Color {
    let k = (1.0 - amount).clamp(0.0, 1.0);
    let (r, g, b) = ACCENT;
    Color::Rgb {
        r: (r as f32 * k) as u8,
        g: (g as f32 * k) as u8,
        b: (b as f32 * k) as u8,
    }
}
