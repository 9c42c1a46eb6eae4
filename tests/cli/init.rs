use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["extensions"], serde_json::json!(["java"]));
    assert!(
        parsed.get("ignores").is_some(),
        "Config should have 'ignores' field"
    );
    assert_eq!(parsed["recognition"]["groupMarkerAnnotation"], "ConfigData");
    assert_eq!(parsed["recognition"]["propertyMarkerAnnotation"], "ConfigProperty");
    assert_eq!(parsed["recognition"]["implicitMembersMode"], true);

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    insta::assert_snapshot!(stdout(&output), @"✓ Created .propcatrc.json");

    assert!(test.root().join(".propcatrc.json").exists());
    let content = test.read_file(".propcatrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".propcatrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    insta::assert_snapshot!(stderr(&output), @"Error: .propcatrc.json already exists");
    assert_eq!(test.read_file(".propcatrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/main/java/app/Server.java",
        "package app;\n\n@ConfigData(\"server\")\npublic record Server(int port) {}\n",
    )?;

    let output = test.scan_command().output()?;
    assert!(
        output.status.success(),
        "Scan should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("server.port"));

    Ok(())
}
