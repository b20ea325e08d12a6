use std::{path::Path, process::Command};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::HighlightError;

static DIAGNOSTIC_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(.*?):(\d+):(\d+):\s*(fatal error|error|warning):\s*(.*)$").ok());

/// Argument list for a JSON AST dump of `input`.
pub fn ast_dump_args(
    flags: &[String],
    input: &Path,
) -> Vec<String> {
    let mut args = flags.to_vec();
    args.extend(
        ["-Xclang", "-ast-dump=json", "-fsyntax-only", "-fno-color-diagnostics"].iter().map(|arg| arg.to_string()),
    );
    args.push(input.display().to_string());
    args
}

/// Run the compiler's AST dump and return the raw JSON.
///
/// A non-zero exit is tolerated as long as the compiler still produced an
/// AST; its errors are logged. No AST at all is a front-end failure.
pub fn run_ast_dump(
    compiler: &str,
    flags: &[String],
    input: &Path,
) -> Result<String, HighlightError> {
    let args = ast_dump_args(flags, input);
    let command = format!("{compiler} {}", args.join(" "));
    debug!("AST dump: {command}");

    let output = Command::new(compiler).args(&args).output().map_err(|e| HighlightError::FrontEnd {
        command: command.clone(),
        reason: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            if let Some(diagnostic) = parse_diagnostic(line)
                && diagnostic.severity != "warning"
            {
                warn!("[ast-dump] {}:{}:{}: {}", diagnostic.file, diagnostic.line, diagnostic.column, diagnostic.message);
            }
        }
        debug!("[ast-dump] exited with {} (partial AST may still be usable)", output.status);
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| HighlightError::FrontEnd {
        command: command.clone(),
        reason: "AST dump is not valid UTF-8".to_string(),
    })?;
    if !stdout.trim_start().starts_with('{') {
        return Err(HighlightError::FrontEnd {
            command,
            reason: format!("produced no AST ({})", output.status),
        });
    }

    debug!("[ast-dump] produced {} bytes of JSON", stdout.len());
    Ok(stdout)
}

/// One `file:line:col: severity: message` line of compiler output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
    pub severity: &'a str,
    pub message: &'a str,
}

pub fn parse_diagnostic(line: &str) -> Option<Diagnostic<'_>> {
    let captures = DIAGNOSTIC_RE.as_ref()?.captures(line)?;
    Some(Diagnostic {
        file: captures.get(1)?.as_str(),
        line: captures.get(2)?.as_str().parse().ok()?,
        column: captures.get(3)?.as_str().parse().ok()?,
        severity: captures.get(4)?.as_str(),
        message: captures.get(5)?.as_str(),
    })
}

#[cfg(test)]
#[path = "../../tests/src/frontend/compiler_tests.rs"]
mod tests;
