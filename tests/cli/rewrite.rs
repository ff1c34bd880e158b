use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const CATALOG: &str = r#"{
  "items": [
    { "msgid": "Hello", "msgstr": "Bonjour" },
    { "msgid": "cat", "msgid_plural": "cats", "msgstr": ["chat", "chats"] }
  ]
}"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "src/app.js",
        "const a = gettext('Hello');\nconst b = ngettext('cat', 'cats', n);\n",
    )?;
    test.write_file(
        "src/App.vue",
        "<template>\n  <p>{{ gettext(\"Hello\") }}</p>\n</template>\n",
    )?;
    test.write_file("catalog.json", CATALOG)?;
    Ok(test)
}

#[test]
fn test_rewrite_dry_run_leaves_files() -> Result<()> {
    let test = project()?;

    let mut cmd = test.rewrite_command();
    cmd.args(["--catalog", "catalog.json"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("  - gettext('Hello')\n  + gettext('Bonjour')\n"));
    assert!(
        output
            .stdout
            .contains("  - ngettext('cat', 'cats', n)\n  + ngettext('chat','chats',n)\n")
    );
    assert!(output.stdout.ends_with(
        "Would rewrite 3 calls in 2 files (run with --apply to write changes)\n"
    ));

    assert_eq!(
        test.read_file("src/app.js")?,
        "const a = gettext('Hello');\nconst b = ngettext('cat', 'cats', n);\n"
    );

    Ok(())
}

#[test]
fn test_rewrite_apply_writes_files() -> Result<()> {
    let test = project()?;

    let mut cmd = test.rewrite_command();
    cmd.args(["--catalog", "catalog.json", "--apply"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.ends_with("✓ Rewrote 3 calls in 2 files\n"));

    assert_eq!(
        test.read_file("src/app.js")?,
        "const a = gettext('Bonjour');\nconst b = ngettext('chat','chats',n);\n"
    );
    assert_eq!(
        test.read_file("src/App.vue")?,
        "<template>\n  <p>{{ gettext(\"Bonjour\") }}</p>\n</template>\n"
    );

    // A second run has nothing left to change.
    let mut cmd = test.rewrite_command();
    cmd.args(["--catalog", "catalog.json", "--apply"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .starts_with("✓ Nothing to rewrite (3 calls in 2 files checked)")
    );

    Ok(())
}

#[test]
fn test_rewrite_missing_catalog() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "gettext('Hello');")?;

    let mut cmd = test.rewrite_command();
    cmd.args(["--catalog", "missing.json"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read catalog: missing.json"));
    assert_eq!(test.read_file("src/app.js")?, "gettext('Hello');");

    Ok(())
}

#[test]
fn test_rewrite_requires_catalog_flag() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.rewrite_command())?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("--catalog"));

    Ok(())
}
