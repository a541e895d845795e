use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Rows moved by PageUp / PageDown
const PAGE_ROWS: usize = 10;

/// Handle a single key input event.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // ── Quit ──
        KeyCode::F(10) | KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // ── Pause / resume sampling ──
        KeyCode::Char('p') | KeyCode::Char('Z') => app.paused = !app.paused,

        // ── Process list scrolling ──
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE_ROWS),
        KeyCode::PageDown => app.scroll_down(PAGE_ROWS),
        KeyCode::Home => app.scroll_offset = 0,
        KeyCode::End => app.scroll_down(usize::MAX / 2),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FreqtopConfig;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_input(app, KeyEvent::new(code, modifiers));
    }

    #[test]
    fn test_quit_keys() {
        for (code, mods) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::F(10), KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(&FreqtopConfig::default());
            press(&mut app, code, mods);
            assert!(app.should_quit, "{:?} should quit", code);
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = App::new(&FreqtopConfig::default());
        press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_pause_toggles() {
        let mut app = App::new(&FreqtopConfig::default());
        press(&mut app, KeyCode::Char('p'), KeyModifiers::NONE);
        assert!(app.paused);
        press(&mut app, KeyCode::Char('p'), KeyModifiers::NONE);
        assert!(!app.paused);
    }
}
