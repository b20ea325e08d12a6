use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use super::{FrontendSettings, HighlightSettings};
use crate::{
    error::HighlightError,
    render::{HtmlOptions, HtmlStyle, PunctuationMode},
};

/// Where a renderer writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn open(&self) -> Result<Box<dyn Write>, HighlightError> {
        match self {
            OutputTarget::Stdout => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|source| HighlightError::io(path, source))?;
                Ok(Box::new(BufWriter::new(file)))
            },
        }
    }

    /// Name used in diagnostics.
    pub fn describe(&self) -> PathBuf {
        match self {
            OutputTarget::Stdout => PathBuf::from("<stdout>"),
            OutputTarget::File(path) => path.clone(),
        }
    }
}

/// Everything one run needs, passed explicitly to the pipeline and the
/// renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub html_out: Option<OutputTarget>,
    pub json_out: Option<OutputTarget>,
    pub punctuation: PunctuationMode,
    pub html: HtmlOptions,
    pub same_file_links: bool,
    /// Read this pre-dumped AST instead of running the compiler.
    pub ast_json: Option<PathBuf>,
    pub frontend: FrontendSettings,
    /// Extra compiler arguments given after `--` on the command line.
    pub compiler_args: Vec<String>,
}

impl RunConfig {
    /// A run over `input` with persistent settings applied and no outputs.
    pub fn new(
        input: impl Into<PathBuf>,
        settings: &HighlightSettings,
    ) -> Self {
        Self {
            input: input.into(),
            html_out: None,
            json_out: None,
            punctuation: PunctuationMode::default(),
            html: HtmlOptions {
                style: if settings.html.fragment {
                    HtmlStyle::Fragment
                } else {
                    HtmlStyle::Document
                },
                stylesheets: settings.html.stylesheets.clone(),
            },
            same_file_links: settings.links.same_file,
            ast_json: None,
            frontend: settings.frontend.clone(),
            compiler_args: Vec::new(),
        }
    }

    pub fn wants_output(&self) -> bool {
        self.html_out.is_some() || self.json_out.is_some()
    }

    /// Full argument list for the compiler, input file excluded.
    pub fn compiler_flags(&self) -> Vec<String> {
        let mut flags = self.frontend.extra_flags.clone();
        flags.extend(self.frontend.include_paths.iter().map(|path| format!("-I{path}")));
        flags.extend(self.compiler_args.iter().cloned());
        flags
    }
}
