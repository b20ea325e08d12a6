use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use clang_highlight::{
    HighlightError, HighlightSettings, OutputTarget, PunctuationMode, RunConfig,
    config::{LogLevel, load_settings},
    frontend::collect_facts,
    pipeline::{annotate, write_outputs},
    render::HtmlStyle,
};

#[derive(Parser, Debug)]
#[command(name = "clang-highlight", version, about)]
struct Args {
    /// Source file to highlight.
    file: PathBuf,

    /// Write markup to PATH, or to stdout when no value is given.
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    html_out: Option<Option<PathBuf>>,

    /// Write the structured token list to PATH, or to stdout when no value is given.
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    json_out: Option<Option<PathBuf>>,

    /// Which punctuation tokens the structured output keeps.
    #[arg(long, value_enum, default_value_t = PunctuationMode::Keep)]
    punctuation: PunctuationMode,

    /// Emit only the `<pre>` block.
    #[arg(long)]
    html_fragment: bool,

    /// Read a pre-dumped JSON AST instead of running the compiler.
    #[arg(long, value_name = "PATH")]
    ast_json: Option<PathBuf>,

    /// Settings file (default: nearest clang-highlight.toml above FILE).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep links whose target is declared in FILE itself.
    #[arg(long)]
    link_same_file: bool,

    #[arg(long, short)]
    verbose: bool,

    /// Additionally log to PATH.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Arguments passed to the compiler.
    #[arg(last = true, value_name = "COMPILER ARGS")]
    compiler_args: Vec<String>,
}

/// `--flag` alone selects stdout; `--flag=PATH` always names a file.
fn output_target(value: Option<Option<PathBuf>>) -> Option<OutputTarget> {
    value.map(|path| path.map_or(OutputTarget::Stdout, OutputTarget::File))
}

fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

fn init_logging(
    level: LogLevel,
    verbose: bool,
    log_file: Option<&Path>,
) {
    let directive = if verbose {
        LogLevel::Debug.directive()
    } else {
        level.directive()
    };

    let file_layer = log_file.map(|path| {
        let appender = tracing_appender::rolling::never(
            path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new(".")),
            path.file_name().unwrap_or(OsStr::new("clang-highlight.log")),
        );
        fmt::layer().with_writer(appender).with_ansi(false).with_target(false).with_filter(filter(directive))
    });

    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(filter(directive));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
}

fn run(
    args: Args,
    settings: HighlightSettings,
) -> Result<(), HighlightError> {
    let mut config = RunConfig::new(&args.file, &settings);
    config.html_out = output_target(args.html_out);
    config.json_out = output_target(args.json_out);
    config.punctuation = args.punctuation;
    if args.html_fragment {
        config.html.style = HtmlStyle::Fragment;
    }
    config.same_file_links |= args.link_same_file;
    config.ast_json = args.ast_json;
    config.compiler_args = args.compiler_args;

    if !config.wants_output() {
        warn!("No output requested; pass --html-out and/or --json-out");
    }

    let facts = collect_facts(&config)?;
    let tokens = annotate(&facts, &config)?;
    write_outputs(&facts, &tokens, &config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let loaded = load_settings(args.config.as_deref(), &args.file);
    let level = loaded.as_ref().map(|(settings, _)| settings.logging.level).unwrap_or_default();
    init_logging(level, args.verbose, args.log_file.as_deref());

    let settings = match loaded {
        Ok((settings, path)) => {
            if let Some(path) = path {
                info!("Using settings from {}", path.display());
            }
            settings
        },
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        },
    };

    match run(args, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
#[path = "../tests/src/main_tests.rs"]
mod tests;
