use std::path::Path;

use super::*;

#[test]
fn parses_error_lines() {
    let diagnostic = parse_diagnostic("src/main.cpp:12:5: error: use of undeclared identifier 'x'").unwrap();
    assert_eq!(diagnostic, Diagnostic {
        file: "src/main.cpp",
        line: 12,
        column: 5,
        severity: "error",
        message: "use of undeclared identifier 'x'",
    });
}

#[test]
fn parses_fatal_errors_and_warnings() {
    let fatal = parse_diagnostic("a.cpp:1:10: fatal error: 'missing.h' file not found").unwrap();
    assert_eq!(fatal.severity, "fatal error");
    assert_eq!(fatal.message, "'missing.h' file not found");

    let warning = parse_diagnostic("/abs/b.h:3:1: warning: unused variable 'y' [-Wunused-variable]").unwrap();
    assert_eq!((warning.file, warning.line, warning.column), ("/abs/b.h", 3, 1));
    assert_eq!(warning.severity, "warning");
}

#[test]
fn ignores_non_diagnostic_lines() {
    assert_eq!(parse_diagnostic("1 error generated."), None);
    assert_eq!(parse_diagnostic("    int x = ;"), None);
    assert_eq!(parse_diagnostic("a.cpp:1:2: note: previous definition is here"), None);
}

#[test]
fn ast_dump_arguments_follow_flags() {
    let flags = vec!["-std=c++17".to_string(), "-Iinclude".to_string()];
    assert_eq!(ast_dump_args(&flags, Path::new("src/a.cpp")), vec![
        "-std=c++17",
        "-Iinclude",
        "-Xclang",
        "-ast-dump=json",
        "-fsyntax-only",
        "-fno-color-diagnostics",
        "src/a.cpp",
    ]);
}

#[test]
fn missing_compiler_is_a_front_end_error() {
    let error = run_ast_dump("clang-highlight-no-such-compiler", &[], Path::new("a.cpp")).unwrap_err();
    assert!(matches!(error, HighlightError::FrontEnd { .. }), "{error:?}");
}
