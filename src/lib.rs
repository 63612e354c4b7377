//! Parley: a chat-UI mock running as a Zellij plugin.
//!
//! Parley simulates a conversational assistant in a terminal pane:
//! - Multiple chat sessions with create, rename, switch, and delete
//! - A canned-reply pipeline with a synthetic "typing" window
//! - Drag and swipe gestures driving a session drawer
//! - Spring/ease-out drawer animation sampled on timer ticks
//!
//! Nothing is persisted and no real assistant is called.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs, feature "plugin")     │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, gesture routing, tick scheduling │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!      │              │               │             │
//! ┌──────────┐ ┌────────────┐ ┌─────────────┐ ┌──────────┐
//! │ store/   │ │ pipeline/  │ │ gesture/    │ │ drawer/  │
//! │ sessions │ │ replies    │ │ recognizers │ │ animation│
//! └──────────┘ └────────────┘ └─────────────┘ └──────────┘
//!      │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): Session, Message, errors         │
//! └─────────────────────────────────────────────────────┘
//!
//!  ui/: view model → ANSI frame, hit-testing
//!  observability/: OpenTelemetry spans to a rotating OTLP JSON file
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Sessions, messages, and errors
//! - [`store`]: The session store
//! - [`pipeline`]: Message send and canned-reply delivery
//! - [`gesture`]: Pointer gesture recognizers
//! - [`drawer`]: Drawer animation controller
//! - [`ui`]: Terminal rendering, theming, hit-testing
//! - [`infrastructure`]: Sandbox paths
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/parley.wasm" {
//!         typing_delay_ms "1200"
//!         drawer_width "0.75"
//!         theme "midnight"
//!         responses_file "~/.config/parley/responses.toml"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use parley::{handle_event, initialize, Config, Event};
//! use std::time::Duration;
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::FocusComposer, Duration::ZERO)?;
//! for c in "Hello".chars() {
//!     handle_event(&mut state, &Event::Char(c), Duration::ZERO)?;
//! }
//! handle_event(&mut state, &Event::Submit, Duration::ZERO)?;
//! assert!(state.is_typing());
//!
//! handle_event(&mut state, &Event::Tick, Duration::from_secs(2))?;
//! assert_eq!(state.store.active().messages().len(), 2);
//! # Ok::<(), parley::ParleyError>(())
//! ```

pub mod app;
pub mod domain;
pub mod drawer;
pub mod gesture;
pub mod infrastructure;
pub mod pipeline;
pub mod store;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Overlay};
pub use domain::{Message, ParleyError, Result, Session, SessionId};
pub use ui::Theme;

use drawer::DrawerController;
use infrastructure::expand_tilde;
use pipeline::{MessagePipeline, ResponsePool};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Synthetic typing window before a reply lands. Default: 1200
    pub typing_delay_ms: u64,
    /// Spring open duration. Default: 300
    pub drawer_open_ms: u64,
    /// Ease-out close duration. Default: 250
    pub drawer_close_ms: u64,
    /// Drawer width as a fraction of the pane, in `(0, 1]`. Default: 0.75
    pub drawer_width: f32,
    /// Gesture units per terminal column. Default: 8
    pub cell_width: f32,
    /// Gesture units per terminal row. Default: 16
    pub cell_height: f32,

    /// TOML file with `welcome` and `responses`; built-in pool when unset.
    pub responses_file: Option<String>,

    /// Built-in theme name: `midnight` or `daylight`.
    ///
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typing_delay_ms: 1200,
            drawer_open_ms: 300,
            drawer_close_ms: 250,
            drawer_width: 0.75,
            cell_width: 8.0,
            cell_height: 16.0,
            responses_file: None,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. Values that fail to parse, and out-of-range
    /// sizes, keep their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use parley::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("typing_delay_ms".to_string(), "500".to_string());
    /// map.insert("drawer_width".to_string(), "wide".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.typing_delay_ms, 500);
    /// assert!((config.drawer_width - 0.75).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            typing_delay_ms: parse_or(config, "typing_delay_ms", defaults.typing_delay_ms, |_| true),
            drawer_open_ms: parse_or(config, "drawer_open_ms", defaults.drawer_open_ms, |_| true),
            drawer_close_ms: parse_or(config, "drawer_close_ms", defaults.drawer_close_ms, |_| true),
            drawer_width: parse_or(config, "drawer_width", defaults.drawer_width, |w| {
                *w > 0.0 && *w <= 1.0
            }),
            cell_width: parse_or(config, "cell_width", defaults.cell_width, |w| *w > 0.0),
            cell_height: parse_or(config, "cell_height", defaults.cell_height, |h| *h > 0.0),
            responses_file: text("responses_file"),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }
}

/// Reads `key` as a `T` accepted by `valid`.
///
/// Returns `Ok(None)` when the key is absent.
fn parse_key<T: FromStr>(
    config: &BTreeMap<String, String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> domain::Result<Option<T>> {
    let Some(raw) = config.get(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    raw.parse()
        .ok()
        .filter(|value| valid(value))
        .map(Some)
        .ok_or_else(|| ParleyError::Config(format!("invalid value {raw:?} for `{key}`")))
}

fn parse_or<T: FromStr>(
    config: &BTreeMap<String, String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    match parse_key(config, key, valid) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring configuration value, using default");
            default
        }
    }
}

/// Builds the application state from configuration.
///
/// Theme and response-pool files are loaded here; a missing or malformed file
/// logs at debug level and falls back to the built-in default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing parley plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let pool = config.responses_file.as_ref().map_or_else(ResponsePool::default, |file| {
        ResponsePool::from_file(expand_tilde(file)).unwrap_or_else(|e| {
            tracing::debug!(responses_file = %file, error = %e, "failed to load responses, using built-in pool");
            ResponsePool::default()
        })
    });

    let pipeline = MessagePipeline::from_pool(Duration::from_millis(config.typing_delay_ms), pool);
    let drawer = DrawerController::new(
        Duration::from_millis(config.drawer_open_ms),
        Duration::from_millis(config.drawer_close_ms),
        config.drawer_width,
    );

    let mut state = AppState::new(pipeline, drawer, theme);
    state.set_cell_size(config.cell_width, config.cell_height);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn test_parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("typing_delay_ms", "800"),
            ("drawer_open_ms", "400"),
            ("drawer_close_ms", " 200 "),
            ("drawer_width", "0.5"),
            ("cell_width", "10"),
            ("cell_height", "20"),
            ("responses_file", "~/replies.toml"),
            ("theme", "daylight"),
            ("theme_file", ""),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.typing_delay_ms, 800);
        assert_eq!(config.drawer_open_ms, 400);
        assert_eq!(config.drawer_close_ms, 200);
        assert!((config.drawer_width - 0.5).abs() < f32::EPSILON);
        assert!((config.cell_width - 10.0).abs() < f32::EPSILON);
        assert!((config.cell_height - 20.0).abs() < f32::EPSILON);
        assert_eq!(config.responses_file.as_deref(), Some("~/replies.toml"));
        assert_eq!(config.theme_name.as_deref(), Some("daylight"));
        assert_eq!(config.theme_file, None);
        assert_eq!(config.trace_level, "debug");
    }

    #[test]
    fn test_out_of_range_sizes_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("drawer_width", "1.5"),
            ("cell_width", "0"),
            ("typing_delay_ms", "-5"),
        ]));
        assert!((config.drawer_width - 0.75).abs() < f32::EPSILON);
        assert!((config.cell_width - 8.0).abs() < f32::EPSILON);
        assert_eq!(config.typing_delay_ms, 1200);
    }

    #[test]
    fn test_rejected_value_is_a_config_error() {
        let config = map(&[("drawer_width", "1.5"), ("cell_width", "wide")]);
        let in_range = |w: &f32| *w > 0.0 && *w <= 1.0;

        let err = parse_key(&config, "drawer_width", in_range).unwrap_err();
        assert!(matches!(err, ParleyError::Config(_)));
        assert!(err.to_string().contains("drawer_width"));

        assert!(matches!(
            parse_key::<f32>(&config, "cell_width", |_| true),
            Err(ParleyError::Config(_))
        ));
        assert!(matches!(parse_key::<f32>(&config, "cell_height", |_| true), Ok(None)));
    }

    #[test]
    fn test_initialize_applies_config() {
        let config = Config {
            typing_delay_ms: 500,
            drawer_width: 0.5,
            theme_name: Some("daylight".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.pipeline.typing_delay(), Duration::from_millis(500));
        assert_eq!(state.theme.name, "daylight");
        assert_eq!(state.drawer_cols(), 40);
    }

    #[test]
    fn test_initialize_loads_responses_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "welcome = \"Ahoy!\"\nresponses = [\"Aye.\"]").unwrap();

        let config = Config {
            responses_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        let mut state = initialize(&config);
        handle_event(&mut state, &Event::FocusComposer, Duration::ZERO).unwrap();
        handle_event(&mut state, &Event::Char('x'), Duration::ZERO).unwrap();
        handle_event(&mut state, &Event::Submit, Duration::ZERO).unwrap();
        handle_event(&mut state, &Event::Tick, Duration::from_secs(1)).unwrap();

        assert_eq!(state.store.active().messages()[1].text(), "Ahoy!");
    }

    #[test]
    fn test_initialize_falls_back_on_bad_files() {
        let config = Config {
            responses_file: Some("/nonexistent/replies.toml".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, Theme::default().name);
    }
}
