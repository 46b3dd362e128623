//! Spinner widget for busy states.
//!
//! A bouncing bar: the snake enters from the left, crosses the track, pauses,
//! then comes back. Frames are indexed by a tick counter the host advances,
//! so the same frame number always renders the same element.

use tuidom::{Color, Element, Size, Style};

#[derive(Clone, Debug)]
pub struct Spinner {
    id: Option<String>,
    /// Width of the track in characters.
    track_width: u16,
    /// Length of the snake/bar.
    snake_len: u16,
    /// Pause frames at right end.
    right_pause: usize,
    /// Pause frames at left end.
    left_pause: usize,
    frame: usize,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            id: None,
            track_width: 4,
            snake_len: 3,
            right_pause: 1,
            left_pause: 4,
            frame: 0,
        }
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn track_width(mut self, width: u16) -> Self {
        self.track_width = width.max(1);
        self
    }

    pub fn snake_len(mut self, len: u16) -> Self {
        self.snake_len = len.max(1);
        self
    }

    /// Animation tick; wraps around the cycle.
    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }

    /// Number of frames in one full cycle.
    pub fn cycle_len(&self) -> usize {
        let pass = (self.track_width + self.snake_len - 1) as usize;
        2 * pass + self.right_pause + self.left_pause
    }

    pub fn build(self) -> Element {
        let pass = (self.track_width + self.snake_len - 1) as usize;
        let tick = self.frame % self.cycle_len();

        // Right pass, right pause, left pass, left pause
        let head = if tick < pass {
            Some((tick as i32, true))
        } else if tick < pass + self.right_pause {
            None
        } else if tick < 2 * pass + self.right_pause {
            let back = tick - pass - self.right_pause;
            Some(((pass - 1 - back) as i32, false))
        } else {
            None
        };

        let mut row = Element::row()
            .width(Size::Fixed(self.track_width))
            .height(Size::Fixed(1))
            .data("spinner", "true");
        if let Some(id) = &self.id {
            row = row.id(id);
        }

        for i in 0..self.track_width as i32 {
            row = row.child(self.cell(i, head));
        }
        row
    }

    fn cell(&self, i: i32, head: Option<(i32, bool)>) -> Element {
        let track = Element::text("⬝")
            .width(Size::Fixed(1))
            .style(Style::new().foreground(Color::var("spinner").darken(0.5)));

        let Some((head_pos, moving_right)) = head else {
            return track;
        };
        let snake_len = self.snake_len as i32;
        let snake_start = head_pos - snake_len + 1;
        if i < snake_start || i > head_pos {
            return track;
        }

        // Tail is dim, head is bright
        let snake_idx = i - snake_start;
        let t = if snake_len == 1 {
            1.0
        } else if moving_right {
            snake_idx as f32 / (snake_len - 1) as f32
        } else {
            1.0 - snake_idx as f32 / (snake_len - 1) as f32
        };
        Element::text("■")
            .width(Size::Fixed(1))
            .style(Style::new().foreground(Color::var("spinner").darken(0.4 * (1.0 - t))))
    }
}
