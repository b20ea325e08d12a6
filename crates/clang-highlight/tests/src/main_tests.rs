use super::*;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("clang-highlight").chain(args.iter().copied())).expect("valid arguments")
}

#[test]
fn bare_output_flags_select_stdout() {
    let args = parse(&["main.cpp", "--html-out", "--json-out"]);
    assert_eq!(output_target(args.html_out), Some(OutputTarget::Stdout));
    assert_eq!(output_target(args.json_out), Some(OutputTarget::Stdout));
}

#[test]
fn output_paths_are_taken_literally() {
    let args = parse(&["main.cpp", "--html-out=-", "--json-out=out/tokens.json"]);
    assert_eq!(output_target(args.html_out), Some(OutputTarget::File(PathBuf::from("-"))));
    assert_eq!(output_target(args.json_out), Some(OutputTarget::File(PathBuf::from("out/tokens.json"))));
}

#[test]
fn outputs_default_to_none() {
    let args = parse(&["main.cpp", "--", "-std=c++20"]);
    assert_eq!(output_target(args.html_out), None);
    assert_eq!(args.compiler_args, vec!["-std=c++20"]);
}
