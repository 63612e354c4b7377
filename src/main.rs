//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Parley library and the Zellij plugin
//! system: it maps Zellij events onto [`parley::Event`]s, stamps them with the
//! plugin clock, and turns returned [`Action`]s into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`, subscribe
//!    to `Key`, `Mouse`, and `Timer`
//! 2. **Update**: Map the event, call `handle_event`, execute actions
//! 3. **Render**: Record the pane size and print the rendered frame
//!
//! # Event Mapping
//!
//! - `Mouse(LeftClick)` → `PointerDown`, `Mouse(Hold)` → `PointerMove`,
//!   `Mouse(Release)` → `PointerUp`
//! - `Timer` → `Tick`
//! - Keys depend on the input mode (see below)
//!
//! # Keybindings
//!
//! Normal mode:
//! - `Tab`: Toggle drawer
//! - `i`: Focus composer
//! - `Enter`: Send composer (or open the selected session while the drawer is open)
//! - `Esc`: Clear filter / close drawer
//! - `q`: Hide plugin
//! - Drawer open: `j`/`k` move, `n` new, `d` delete, `r` rename, `/` filter
//!
//! Composing: printable keys type, `Enter` sends, `Esc` hides the keyboard,
//! `Tab` toggles the drawer.
//!
//! Renaming: printable keys edit the title, `Enter` saves, `Esc` cancels.
//!
//! Filtering: printable keys edit the query, `Up`/`Down` move, `Enter` opens,
//! `Esc` clears.
//!
//! Voice chat open: `Esc` or `Enter` ends the call.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use zellij_tile::prelude::*;

use parley::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: parley::AppState,

    /// Plugin clock origin; events carry the time elapsed since it.
    started: Instant,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: parley::initialize(&Config::default()),
            started: Instant::now(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        parley::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = parley::initialize(&config);
        self.started = Instant::now();

        subscribe(&[EventType::Key, EventType::Mouse, EventType::Timer]);
        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::Tick,
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event, self.now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        print!("{}", parley::ui::render(&self.app));
    }
}

impl State {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if self.app.overlay.is_some() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter => Some(Event::CloseModal),
                _ => None,
            };
        }

        let drawer_open = self.app.drawer.is_open();
        Some(match (self.app.input_mode, key.bare_key) {
            (_, BareKey::Backspace) => Event::Backspace,

            (InputMode::Renaming, BareKey::Enter) => Event::Submit,
            (InputMode::Renaming, BareKey::Esc) => Event::Escape,

            (InputMode::Filtering, BareKey::Enter) => Event::ActivateSelected,
            (InputMode::Filtering, BareKey::Esc) => Event::Escape,
            (InputMode::Filtering, BareKey::Down) => Event::DrawerDown,
            (InputMode::Filtering, BareKey::Up) => Event::DrawerUp,

            (InputMode::Composing, BareKey::Enter) => Event::Submit,
            (InputMode::Composing, BareKey::Esc) => Event::DismissKeyboard,
            (InputMode::Composing, BareKey::Tab) => Event::ToggleDrawer,

            (InputMode::Normal, BareKey::Tab) => Event::ToggleDrawer,
            (InputMode::Normal, BareKey::Esc) => Event::Escape,
            (InputMode::Normal, BareKey::Char('q')) => Event::CloseFocus,
            (InputMode::Normal, BareKey::Char('i')) => Event::FocusComposer,
            (InputMode::Normal, BareKey::Enter) if drawer_open => Event::ActivateSelected,
            (InputMode::Normal, BareKey::Enter) => Event::Submit,
            (InputMode::Normal, BareKey::Down | BareKey::Char('j')) if drawer_open => Event::DrawerDown,
            (InputMode::Normal, BareKey::Up | BareKey::Char('k')) if drawer_open => Event::DrawerUp,
            (InputMode::Normal, BareKey::Char('n')) if drawer_open => Event::NewChat,
            (InputMode::Normal, BareKey::Char('d')) if drawer_open => Event::DeleteSelected,
            (InputMode::Normal, BareKey::Char('r')) if drawer_open => Event::RenameSelected,
            (InputMode::Normal, BareKey::Char('/')) if drawer_open => Event::StartFilter,
            (InputMode::Normal, _) => return None,

            (_, BareKey::Char(c)) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        let cell = |line: isize, col: usize| usize::try_from(line).ok().map(|row| (row, col));
        match mouse {
            Mouse::LeftClick(line, col) => cell(line, col).map(|(row, col)| Event::PointerDown { row, col }),
            Mouse::Hold(line, col) => cell(line, col).map(|(row, col)| Event::PointerMove { row, col }),
            Mouse::Release(line, col) => cell(line, col).map(|(row, col)| Event::PointerUp { row, col }),
            _ => None,
        }
    }

    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ScheduleTick { after } => {
                tracing::trace!(after_ms = after.as_millis(), "scheduling tick");
                set_timeout(after.as_secs_f64());
            }
        }
    }
}
