//! Settings for a highlighting run.
//!
//! [`HighlightSettings`] holds the persistent, per-project values read from
//! `clang-highlight.toml`; each category lives in its own file with a
//! `*Patch` type so a partial file only overrides the keys it names.
//! [`RunConfig`] is the explicit per-run value built from the settings and
//! the command line.

pub(crate) mod frontend;
pub(crate) mod html;
pub(crate) mod links;
pub(crate) mod logging;
mod run;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::HighlightError;

pub use frontend::{DEFAULT_COMPILER, FrontendSettings};
use frontend::FrontendSettingsPatch;
pub use html::HtmlSettings;
use html::HtmlSettingsPatch;
pub use links::LinkSettings;
use links::LinkSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
pub use run::{OutputTarget, RunConfig};

pub const SETTINGS_FILENAME: &str = "clang-highlight.toml";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HighlightSettings {
    pub frontend: FrontendSettings,
    pub links: LinkSettings,
    pub html: HtmlSettings,
    pub logging: LoggingSettings,
}

impl HighlightSettings {
    /// Parse a settings document. Missing keys keep their defaults; unknown
    /// keys are ignored.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let patch: HighlightSettingsPatch = toml::from_str(content)?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    fn apply_patch(
        &mut self,
        patch: HighlightSettingsPatch,
    ) {
        if let Some(p) = patch.frontend {
            self.frontend.apply_patch(p);
        }
        if let Some(p) = patch.links {
            self.links.apply_patch(p);
        }
        if let Some(p) = patch.html {
            self.html.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.frontend.normalize();
        self.html.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct HighlightSettingsPatch {
    frontend: Option<FrontendSettingsPatch>,
    links: Option<LinkSettingsPatch>,
    html: Option<HtmlSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, toml::Value>,
}

/// Walks parent directories from `start` looking for `clang-highlight.toml`.
pub fn find_settings_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(SETTINGS_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Load settings for `input`: the explicit file if one is given, else the
/// nearest `clang-highlight.toml` above the input, else the defaults.
/// A file that exists but cannot be read or parsed is an error.
pub fn load_settings(
    explicit: Option<&Path>,
    input: &Path,
) -> Result<(HighlightSettings, Option<PathBuf>), HighlightError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match std::path::absolute(input).ok().as_deref().and_then(find_settings_file) {
            Some(path) => path,
            None => return Ok((HighlightSettings::default(), None)),
        },
    };
    let content = std::fs::read_to_string(&path).map_err(|source| HighlightError::io(&path, source))?;
    let settings = HighlightSettings::from_toml_str(&content).map_err(|error| HighlightError::Config {
        path: path.clone(),
        reason: error.message().to_string(),
    })?;
    Ok((settings, Some(path)))
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
