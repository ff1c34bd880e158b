use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["includes"], serde_json::json!(["src"]));
    assert_eq!(parsed["componentExtension"], ".vue");
    assert_eq!(parsed["vueTemplates"], true);
    assert!(
        parsed["calleeNames"]["npgettext"].is_array(),
        "Config should list npgettext callee names"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "✓ Created .gettextrc.json\n");

    assert!(test.root().join(".gettextrc.json").exists());
    let content = test.read_file(".gettextrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".gettextrc.json", "{}")?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(output.code, Some(1));
    assert_eq!(output.stderr, "✘ .gettextrc.json already exists\n");
    assert_eq!(test.read_file(".gettextrc.json")?, "{}");

    Ok(())
}
