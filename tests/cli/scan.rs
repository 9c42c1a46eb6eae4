use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const NET: &str = r#"package app.net;

/**
 * Network settings.
 *
 * @param port the port to listen on
 */
@ConfigData("net")
public record Net(int port, @ConfigProperty(defaultValue = "0.0.0.0") String host) {}
"#;

const DB: &str = r#"package app.db;

@ConfigData("db")
public class Db {
    /** Connection pool size. */
    @ConfigProperty
    private int pool = 10;

    @ConfigProperty
    private long timeout = computeTimeout();
}
"#;

fn scan_json(test: &CliTest) -> Result<(Option<i32>, Value)> {
    let output = test.scan_command().args(["--format", "json"]).output()?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    Ok((output.status.code(), value))
}

fn keys(value: &Value) -> Vec<String> {
    value["properties"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["key"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_scan_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("No properties found"));
    assert!(out.contains("Scanned 0 source files, 0 properties - no issues found"));

    Ok(())
}

#[test]
fn test_scan_text_output() -> Result<()> {
    let test = CliTest::with_file("src/app/net/Net.java", NET)?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "KEY       TYPE    DEFAULT  ORIGIN");
    assert!(lines[1].starts_with("net.port  int              ./src/app/net/Net.java:9:23"));
    assert!(lines[2].starts_with("net.host  String  0.0.0.0  ./src/app/net/Net.java:9:78"));
    assert!(out.contains("Scanned 1 source file, 2 properties - no issues found"));

    Ok(())
}

#[test]
fn test_scan_json_catalog() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app/net/Net.java", NET)?;
    test.write_file("src/app/db/Db.java", DB)?;

    let (code, value) = scan_json(&test)?;
    assert_eq!(code, Some(0));
    // Files are processed in sorted path order: db before net.
    assert_eq!(keys(&value), vec!["db.pool", "db.timeout", "net.port", "net.host"]);

    let properties = &value["properties"];
    assert_eq!(properties[0]["defaultValue"], "10");
    assert_eq!(properties[0]["documentation"], "/** Connection pool size. */");
    assert_eq!(properties[1]["defaultValue"], "computeTimeout()");
    assert_eq!(properties[1]["nonLiteral"], true);
    assert_eq!(properties[2]["documentation"], "the port to listen on");
    assert_eq!(properties[2]["origin"]["group"], "app.net.Net");
    assert_eq!(properties[3]["defaultValue"], "0.0.0.0");

    let diagnostics = value["diagnostics"].as_array().cloned().unwrap_or_default();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["rule"], "unsupported-expression");
    assert_eq!(diagnostics[0]["severity"], "warning");

    Ok(())
}

#[test]
fn test_scan_is_deterministic() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app/net/Net.java", NET)?;
    test.write_file("src/app/db/Db.java", DB)?;

    let first = test.scan_command().args(["--format", "json"]).output()?;
    let second = test.scan_command().args(["--format", "json"]).output()?;
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn test_scan_duplicate_key_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a/First.java", "@ConfigData(\"foo\") record First(int bar) {}")?;
    test.write_file("b/Second.java", "@ConfigData(\"foo\") record Second(int bar) {}")?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: duplicate property key \"foo.bar\"  duplicate-key"));
    assert!(out.contains("--> ./b/Second.java:1:38"));
    assert!(out.contains("= note: first declared at ./a/First.java:1:37"));
    assert!(out.contains("1 problem (1 error, 0 warnings)"));

    let (_, value) = scan_json(&test)?;
    assert_eq!(keys(&value), vec!["foo.bar"]);
    assert_eq!(value["properties"][0]["origin"]["file"], "./a/First.java");

    Ok(())
}

#[test]
fn test_scan_parse_failure_keeps_other_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("A.java", "@ConfigData(\"a\") record A(int x) {}")?;
    test.write_file("B.java", "@ConfigData(\"b\") record B(int x {}")?;

    let (code, value) = scan_json(&test)?;
    assert_eq!(code, Some(1));
    assert_eq!(keys(&value), vec!["a.x"]);
    let diagnostics = value["diagnostics"].as_array().cloned().unwrap_or_default();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["rule"], "parse-failure");
    assert_eq!(diagnostics[0]["file"], "./B.java");

    Ok(())
}

#[test]
fn test_scan_respects_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".propcatrc.json",
        r#"{
  "includes": ["src"],
  "ignores": ["**/legacy/**"],
  "recognition": {
    "groupMarkerAnnotation": "Settings",
    "implicitMembersMode": false
  }
}"#,
    )?;
    test.write_file(
        "src/S.java",
        "@Settings(\"s\") class S { @ConfigProperty int a = 1; int b = 2; }",
    )?;
    test.write_file("src/legacy/L.java", "@Settings(\"l\") record L(int x) {}")?;
    test.write_file("other/O.java", "@Settings(\"o\") record O(int y) {}")?;

    let (code, value) = scan_json(&test)?;
    assert_eq!(code, Some(0));
    assert_eq!(keys(&value), vec!["s.a"]);

    Ok(())
}

#[test]
fn test_scan_invalid_recognition_is_error() -> Result<()> {
    let test = CliTest::with_file(
        ".propcatrc.json",
        r#"{ "recognition": { "groupMarkerAnnotation": "" } }"#,
    )?;
    test.write_file("A.java", "@ConfigData record A(int a) {}")?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.starts_with("Error: "));
    assert!(err.contains("groupMarkerAnnotation"));

    Ok(())
}

#[test]
fn test_scan_source_root_flag() -> Result<()> {
    let test = CliTest::with_file("service/Svc.java", "@ConfigData(\"svc\") record Svc(int n) {}")?;

    let output = test
        .scan_command()
        .args(["--source-root", "service", "--format", "json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(keys(&value), vec!["svc.n"]);
    assert_eq!(value["properties"][0]["origin"]["file"], "service/Svc.java");

    let output = test.scan_command().args(["--source-root", "missing"]).output()?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
