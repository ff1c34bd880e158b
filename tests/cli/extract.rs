use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_extract_text_output() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        "gettext('Hello');\nngettext('cat', 'cats', n);\npgettext('menu', 'Open');\n",
    )?;

    let output = run(test.extract_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("src/app.js"));
    assert!(output.stdout.contains("1 | \"Hello\"\n"));
    assert!(output.stdout.contains("2 | \"cat\" / \"cats\"\n"));
    assert!(output.stdout.contains("3 | \"Open\"  context: \"menu\"\n"));
    assert!(
        output
            .stdout
            .ends_with("✓ Found 3 messages in 1 file (1 checked)\n")
    );
    assert_eq!(output.stderr, "");

    Ok(())
}

#[test]
fn test_extract_json_output() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.vue",
        "<template>\n  <p>{{ gettext('Hello') }}</p>\n</template>\n",
    )?;

    let mut cmd = test.extract_command();
    cmd.args(["--format", "json"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));

    let parsed: Value = serde_json::from_str(&output.stdout)?;
    let messages = parsed.as_array().expect("JSON output should be an array");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["text"], "Hello");
    assert_eq!(messages[0]["line"], 2);
    assert!(
        messages[0]["fileName"]
            .as_str()
            .is_some_and(|name| name.ends_with("src/App.vue"))
    );

    Ok(())
}

#[test]
fn test_extract_reports_parse_failures() -> Result<()> {
    let test = CliTest::with_file("src/ok.js", "gettext('Fine');")?;
    test.write_file("src/broken.js", "gettext('x'")?;

    let output = run(test.extract_command())?;
    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .ends_with("✓ Found 1 message in 1 file (1 checked)\n")
    );
    assert_eq!(
        output.stderr,
        "warning: 1 file could not be parsed (use -v for details)\n"
    );

    let mut cmd = test.extract_command();
    cmd.arg("-v");
    let output = run(cmd)?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("broken.js"));

    Ok(())
}

#[test]
fn test_extract_respects_config_callee_names() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "__('Hello');\ngettext('Ignored');\n")?;
    test.write_file(
        ".gettextrc.json",
        r#"{ "calleeNames": { "gettext": ["__"] } }"#,
    )?;

    let output = run(test.extract_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("\"Hello\""));
    assert!(!output.stdout.contains("Ignored"));

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "gettext('Hello');")?;
    test.write_file(".gettextrc.json", r#"{ "componentExtension": "vue" }"#)?;

    let output = run(test.extract_command())?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.starts_with("Error:"));

    Ok(())
}
