use std::collections::HashMap;

use serde::Deserialize;

use crate::render::DEFAULT_STYLESHEETS;

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlSettings {
    pub stylesheets: Vec<String>,
    /// Emit only the `<pre>` block.
    pub fragment: bool,
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            stylesheets: DEFAULT_STYLESHEETS.iter().map(|s| s.to_string()).collect(),
            fragment: false,
        }
    }
}

impl HtmlSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: HtmlSettingsPatch,
    ) {
        if let Some(v) = patch.stylesheets {
            self.stylesheets = v;
        }
        if let Some(v) = patch.fragment {
            self.fragment = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.stylesheets =
            self.stylesheets.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct HtmlSettingsPatch {
    pub(crate) stylesheets: Option<Vec<String>>,
    pub(crate) fragment: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
