//! Event handler for the TUI
//!
//! Routes keyboard events to application actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::App;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        // Resizes trigger a redraw on the next loop iteration
        Event::Resize(_, _) | Event::Tick => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::config::settings::Settings;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();

        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = App::new(&storage, &settings);
            handle_key_event(&mut app, key(code));
            assert!(app.should_quit);
        }

        let mut app = App::new(&storage, &settings);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_refresh_key() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        handle_event(&mut app, Event::Key(key(KeyCode::Char('r'))));
        assert!(app.summary.is_some());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_other_keys_ignored() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        handle_event(&mut app, Event::Key(key(KeyCode::Char('x'))));
        handle_event(&mut app, Event::Tick);
        assert!(!app.should_quit);
        assert!(app.summary.is_none());
    }
}
