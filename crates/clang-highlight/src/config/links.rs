use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkSettings {
    /// Keep links whose target lies in the highlighted file itself.
    pub same_file: bool,
}

impl LinkSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: LinkSettingsPatch,
    ) {
        if let Some(v) = patch.same_file {
            self.same_file = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LinkSettingsPatch {
    #[serde(alias = "same_file")]
    pub(crate) same_file: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
