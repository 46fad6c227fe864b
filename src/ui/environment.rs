//! Taking over the terminal, and giving it back afterwards.

use std::{
    io::{stdout, Write},
    panic,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

/// What was changed about the terminal, so exactly that can be undone.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    /// Set when pulse drew on the alternate screen.
    alternate: bool,

    /// Set when the terminal could tell `esc` apart from escape sequences.
    disambiguated: bool,
}

impl Environment {
    /// Puts the terminal in raw mode with the cursor hidden.
    ///
    /// A panic hook is also installed, since a panic would otherwise
    /// leave the terminal unusable.
    pub fn ready(alternate: bool) -> super::Result<Self> {
        terminal::enable_raw_mode()?;
        let disambiguated = terminal::supports_keyboard_enhancement().unwrap_or(false);

        let mut out = stdout().lock();
        queue!(out, Hide)?;
        if alternate {
            queue!(out, EnterAlternateScreen, MoveTo(0, 0))?;
        }
        if disambiguated {
            queue!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }
        out.flush()?;

        let environment = Self {
            alternate,
            disambiguated,
        };

        panic::set_hook(Box::new(move |info| {
            let _ = environment.cleanup(false);
            tracing::error!(%info, "panicked");
            eprintln!("pulse panicked: {info}");
        }));

        Ok(environment)
    }

    /// Restores the terminal. `farewell` prints a goodbye on a clean exit.
    pub fn cleanup(&self, farewell: bool) -> super::Result<()> {
        let mut out = stdout().lock();
        if self.disambiguated {
            queue!(out, PopKeyboardEnhancementFlags)?;
        }
        if self.alternate {
            queue!(out, LeaveAlternateScreen)?;
        }
        queue!(out, Clear(ClearType::FromCursorDown), Show)?;
        out.flush()?;

        terminal::disable_raw_mode()?;
        if farewell {
            eprintln!("bye!");
        }

        Ok(())
    }
}
