//! The terminal frontend: a window holding the current view, with the
//! player bar underneath it.

use std::{env, io::stdout, time::Duration};

use tokio::time::{interval, Interval};

use crate::{
    ui::{self, components, view, State},
    Args,
};

pub mod window;
pub use window::Window;

/// How long a notice replaces the controls for.
const NOTICE: Duration = Duration::from_secs(3);

/// How long the volume bar replaces the progress bar for.
const VOLUME: Duration = Duration::from_secs(1);

/// Options for the look of the interface, taken from the command line.
#[derive(Copy, Clone, Debug)]
pub struct Params {
    pub borderless: bool,

    /// Leaves out the controls line.
    pub minimalist: bool,

    /// False when running headless, which needs MPRIS.
    pub enabled: bool,

    /// Inner width of the window.
    pub(crate) width: usize,

    /// Rows given to the current view, not counting its hint line.
    pub(crate) rows: usize,

    /// Time between frames.
    pub delta: Duration,
}

impl TryFrom<&Args> for Params {
    type Error = ui::Error;

    fn try_from(args: &Args) -> ui::Result<Self> {
        let headless = env::var("PULSE_DISABLE_UI").is_ok_and(|x| x == "1");
        if headless && !cfg!(feature = "mpris") {
            return Err(ui::Error::RejectedDisable);
        }

        Ok(Self {
            borderless: args.borderless,
            minimalist: args.minimalist,
            enabled: !headless,
            width: 21 + 2 * args.width.min(32),
            rows: args.rows.max(3),
            delta: Duration::from_secs_f32(1.0 / f32::from(args.fps.max(1))),
        })
    }
}

/// Draws frames of [`State`] at a steady rate.
pub struct Interface {
    pub(crate) window: Window,
    frames: Interval,
    params: Params,
}

impl Interface {
    pub fn new(params: Params) -> Self {
        Self {
            window: Window::new(params.width, params.borderless),
            frames: interval(params.delta),
            params,
        }
    }

    /// The bar under the view: the action, a progress or volume bar,
    /// then the controls or a notice.
    fn player_bar(&self, state: &mut State) -> Vec<String> {
        let width = self.params.width;
        let mut lines = vec![components::action(state, width)];

        state.volume_timer = state.volume_timer.filter(|x| x.elapsed() <= VOLUME);
        lines.push(if state.volume_timer.is_some() {
            let volume = state.sink.volume();
            let percentage = format!("{}%", (volume * 100.0).round().abs());
            components::audio_bar(width.saturating_sub(17), volume, &percentage)
        } else {
            components::progress_bar(state, width)
        });

        state.notice = state.notice.take().filter(|(_, x)| x.elapsed() <= NOTICE);
        if let Some((notice, _)) = &state.notice {
            lines.push(components::pad(notice, width));
        } else if !self.params.minimalist {
            lines.push(components::controls(width));
        }

        lines
    }

    /// Every line inside the window, from the top of the view down.
    pub(crate) fn menu(&self, state: &mut State) -> Vec<String> {
        let mut lines = view::render(state, self.params.rows, self.params.width);
        lines.push(self.window.separator());
        lines.extend(self.player_bar(state));

        lines
    }

    /// Draws a frame, then waits until the next one is due.
    pub async fn draw(&mut self, state: &mut State) -> ui::Result<()> {
        let title = state.browser.title(&state.collections);
        let menu = self.menu(state);
        self.window.draw(stdout().lock(), &title, menu)?;
        self.frames.tick().await;

        Ok(())
    }
}
