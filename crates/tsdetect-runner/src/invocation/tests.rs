//! Unit tests for detector command construction.

use std::ffi::OsString;
use std::path::Path;

use rstest::rstest;

use super::*;

#[test]
fn java_runtime_launches_jars() {
    let runtime = ToolRuntime::java();
    assert_eq!(runtime.program(), "java");
    assert_eq!(runtime.leading_args(), [OsString::from("-jar")]);
    assert_eq!(runtime, ToolRuntime::default());
}

#[test]
fn tool_precedes_manifest() {
    let invocation = Invocation::new(
        &ToolRuntime::java(),
        Path::new("/tmp/TestSmellDetector_toolA.jar"),
        Path::new("/work/test-list.csv"),
    );
    assert_eq!(invocation.program(), "java");
    assert_eq!(
        invocation.args(),
        [
            OsString::from("-jar"),
            OsString::from("/tmp/TestSmellDetector_toolA.jar"),
            OsString::from("/work/test-list.csv"),
        ]
    );
}

#[rstest]
#[case::bare(ToolRuntime::new("sh"), "sh /tmp/tool /tmp/list.csv")]
#[case::with_flags(
    ToolRuntime::new("java").arg("-Xmx512m").arg("-jar"),
    "java -Xmx512m -jar /tmp/tool /tmp/list.csv"
)]
fn display_joins_program_and_arguments(#[case] runtime: ToolRuntime, #[case] expected: &str) {
    let invocation = Invocation::new(&runtime, Path::new("/tmp/tool"), Path::new("/tmp/list.csv"));
    assert_eq!(invocation.to_string(), expected);
}

#[test]
fn command_carries_program_and_arguments() {
    let invocation = Invocation::new(
        &ToolRuntime::java(),
        Path::new("/tmp/tool.jar"),
        Path::new("/tmp/list.csv"),
    );
    let command = invocation.command();
    assert_eq!(command.get_program(), "java");
    let args: Vec<_> = command.get_args().collect();
    assert_eq!(args, ["-jar", "/tmp/tool.jar", "/tmp/list.csv"]);
}
