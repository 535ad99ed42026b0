//! Theme preference: a single persisted string, `dark` unless the user picked otherwise.

pub mod handlers;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "careerTheme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon for the toggle control: it shows the theme you would switch to.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "fa-sun",
            Theme::Light => "fa-moon",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Last selected theme. Missing, unknown or unreadable values fall back to dark.
    pub fn current(&self) -> Theme {
        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {e}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Theme read failed, using default: {e}");
                Theme::default()
            }
        }
    }

    pub fn set(&self, theme: Theme) -> Theme {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.persist(theme);
        theme
    }

    pub fn toggle(&self) -> Theme {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = self.current().toggled();
        self.persist(next);
        next
    }

    fn persist(&self, theme: Theme) {
        match self.storage.set(THEME_KEY, theme.as_str()) {
            Ok(()) => info!("Theme set to {theme}"),
            Err(e) => warn!("Theme write failed, {theme} applies for this session only: {e}"),
        }
    }
}
