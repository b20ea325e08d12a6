use std::collections::HashMap;

use serde::Deserialize;

pub const DEFAULT_COMPILER: &str = "clang++";

#[derive(Debug, Clone, PartialEq)]
pub struct FrontendSettings {
    /// Executable that produces the JSON AST dump.
    pub compiler: String,
    pub extra_flags: Vec<String>,
    pub include_paths: Vec<String>,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            extra_flags: Vec::new(),
            include_paths: Vec::new(),
        }
    }
}

impl FrontendSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: FrontendSettingsPatch,
    ) {
        if let Some(v) = patch.compiler {
            self.compiler = v;
        }
        if let Some(v) = patch.extra_flags {
            self.extra_flags = v;
        }
        if let Some(v) = patch.include_paths {
            self.include_paths = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.compiler = self.compiler.trim().to_string();
        if self.compiler.is_empty() {
            self.compiler = DEFAULT_COMPILER.to_string();
        }
        self.include_paths =
            self.include_paths.iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect();
        self.extra_flags = self.extra_flags.iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FrontendSettingsPatch {
    pub(crate) compiler: Option<String>,
    #[serde(alias = "extra_flags")]
    pub(crate) extra_flags: Option<Vec<String>>,
    #[serde(alias = "include_paths")]
    pub(crate) include_paths: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
