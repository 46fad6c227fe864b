//! The frame around pulse, with the name of the current view set into its top edge.

use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    style::{Print, Stylize as _},
    terminal::{Clear, ClearType},
};

use crate::ui::{self, components};

/// Lines are separated like this since the terminal is in raw mode.
const NEWLINE: &str = "\r\n";

/// Draws a list of lines inside of a border.
///
/// Every line given to the window must already be exactly `width` wide,
/// since styled text can't be measured here.
pub struct Window {
    /// The inner width, not counting the border & its padding.
    width: usize,

    /// Whether to leave the border out, keeping only the spacing.
    borderless: bool,
}

impl Window {
    pub const fn new(width: usize, borderless: bool) -> Self {
        Self { width, borderless }
    }

    /// The top edge, like `┌─ home ──────┐`.
    ///
    /// The title is cut short if it doesn't fit.
    pub fn top(&self, title: &str) -> String {
        let title = components::fit(title, self.width.saturating_sub(2));
        let rest = self.width.saturating_sub(2 + components::width(&title));

        if self.borderless {
            format!("   {title} {}  ", " ".repeat(rest))
        } else {
            format!("┌─ {title} {}─┐", "─".repeat(rest))
        }
    }

    /// The bottom edge, which is blank without borders.
    pub fn bottom(&self) -> String {
        if self.borderless {
            String::new()
        } else {
            format!("└{}┘", "─".repeat(self.width + 2))
        }
    }

    /// The rule between the view and the player bar.
    pub fn separator(&self) -> String {
        "─".repeat(self.width)
    }

    /// Puts together the whole frame without drawing it, along with how
    /// many lines the cursor has to move up afterwards to draw over it.
    pub(crate) fn render(&self, title: &str, lines: Vec<String>) -> ui::Result<(String, u16)> {
        let side = if self.borderless { " " } else { "│" };

        let mut frame = Vec::with_capacity(lines.len() + 2);
        frame.push(self.top(title));
        frame.extend(
            lines
                .into_iter()
                .map(|line| format!("{side} {} {side}", line.reset())),
        );
        frame.push(self.bottom());

        // Windows can't redraw the final line of the terminal in place,
        // so the frame ends with an extra newline there.
        let mut rendered = frame.join(NEWLINE);
        if cfg!(windows) {
            rendered.push_str(NEWLINE);
        }

        let height = u16::try_from(frame.len() - usize::from(!cfg!(windows)))?;
        Ok((rendered, height))
    }

    /// Draws over whatever the last frame was.
    pub fn draw(
        &self,
        mut writer: impl std::io::Write,
        title: &str,
        lines: Vec<String>,
    ) -> ui::Result<()> {
        let (rendered, height) = self.render(title, lines)?;

        crossterm::execute!(
            writer,
            Clear(ClearType::FromCursorDown),
            MoveToColumn(0),
            Print(rendered),
            MoveToColumn(0),
            MoveUp(height),
        )?;

        Ok(())
    }
}
