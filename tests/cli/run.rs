use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const MESSAGES: &str = r#"{
  "button": { "click": "Click me", "submit": "Submit" },
  "greeting": { "hello": "Hello World" },
  "duplicate": "Submit"
}"#;

fn setup(test: &CliTest) -> Result<()> {
    test.write_file("messages/en.json", MESSAGES)
}

#[test]
fn test_run_rewrites_file_from_report() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file(
        "src/components/Greeting.tsx",
        r#"export function Greeting() {
  return (
    <section>
      <div>Hello World</div>
      <Button label="Click me" />
    </section>
  );
}
"#,
    )?;
    test.write_file(
        "lint.txt",
        r#"src/components/Greeting.tsx
  4: Hardcoded string: "Hello World"
  5: Hardcoded string: "Click me"
"#,
    )?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_snapshot!(stdout(&output).trim_end(), @"Replaced 2 string(s) in 1 file(s).");

    assert_eq!(
        test.read_file("src/components/Greeting.tsx")?,
        r#"import { useTranslation } from "react-i18next";
export function Greeting() {
  const { t } = useTranslation();

  return (
    <section>
      <div>{t("greeting.hello")}</div>
      <Button label={t("button.click")} />
    </section>
  );
}
"#
    );
    Ok(())
}

#[test]
fn test_run_keeps_existing_wiring() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    let source = r#""use client";
import { useTranslation } from "react-i18next";

export const Form = () => {
  const { t } = useTranslation();

  return <button>Submit</button>;
};
"#;
    test.write_file("src/Form.tsx", source)?;
    test.write_file(
        "lint.txt",
        "src/Form.tsx\n  7: Hardcoded string: 'Submit'\n",
    )?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt"])
        .output()?;
    assert!(output.status.success());

    // First declared key for a shared value wins.
    assert_eq!(
        test.read_file("src/Form.tsx")?,
        source.replace("<button>Submit</button>", r#"<button>{t("button.submit")}</button>"#)
    );
    Ok(())
}

#[test]
fn test_run_inserts_import_after_directive() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file(
        "src/Page.tsx",
        "'use client';\n\nexport default function Page() {\n  return <h1>Hello World</h1>;\n}\n",
    )?;
    test.write_file(
        "lint.txt",
        "src/Page.tsx\n  4: Hardcoded string: \"Hello World\"\n",
    )?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt"])
        .output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("src/Page.tsx")?,
        "'use client';\n\
         import { useTranslation } from \"react-i18next\";\n\
         \n\
         export default function Page() {\n  \
         const { t } = useTranslation();\n\
         \n  \
         return <h1>{t(\"greeting.hello\")}</h1>;\n}\n"
    );
    Ok(())
}

#[test]
fn test_run_skips_unknown_string() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    let source = "export function A() {\n  return <p>Not translated yet</p>;\n}\n";
    test.write_file("src/A.tsx", source)?;
    test.write_file(
        "lint.txt",
        "src/A.tsx\n  2: Hardcoded string: \"Not translated yet\"\n",
    )?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt", "-v"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("src/A.tsx")?, source);

    let out = stdout(&output);
    assert!(out.contains("skipped: \"Not translated yet\""), "{}", out);
    assert!(out.contains("--> src/A.tsx:2"), "{}", out);
    assert!(out.contains("no translation key for this text"), "{}", out);
    Ok(())
}

#[test]
fn test_run_check_fails_on_skipped() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file("lint.txt", "src/Missing.tsx\n  1: Hardcoded string: \"Submit\"\n")?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt", "--check"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_run_dry_run_previews_without_writing() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    let source = "<div>Hello World</div>\n";
    test.write_file("src/A.tsx", source)?;
    test.write_file(
        "lint.txt",
        "src/A.tsx\n  1: Hardcoded string: \"Hello World\"\n",
    )?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt", "--dry-run"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("src/A.tsx")?, source);

    let out = stdout(&output);
    assert!(out.contains("- | <div>Hello World</div>"), "{}", out);
    assert!(out.contains("+ | <div>{t(\"greeting.hello\")}</div>"), "{}", out);
    assert!(out.contains("Would replace 1 string(s) in 1 file(s)."), "{}", out);
    Ok(())
}

#[test]
fn test_run_json_summary() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file("src/A.tsx", "<div>Hello World</div>\n<p>Other</p>\n")?;
    test.write_file(
        "lint.txt",
        "src/A.tsx\n  1: Hardcoded string: \"Hello World\"\n  2: Hardcoded string: \"Other\"\n",
    )?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt", "--json"])
        .output()?;
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        summary,
        serde_json::json!({
            "filesModified": 1,
            "stringsReplaced": 1,
            "stringsSkipped": 1
        })
    );
    Ok(())
}

#[test]
fn test_run_missing_dictionary_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lint.txt", "")?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read messages file"));
    Ok(())
}

#[test]
fn test_run_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".autotranslaterc.json",
        r#"{
            "messagesRoot": "./locales",
            "primaryLocale": "fr",
            "sourceRoot": "app",
            "issueMarker": "Texte en dur:",
            "hookName": "useTranslations",
            "hookModule": "next-intl"
        }"#,
    )?;
    test.write_file("locales/fr.json", r#"{ "home": { "title": "Bonjour" } }"#)?;
    test.write_file(
        "app/page.tsx",
        "export default function Home() {\n  return <h1>Bonjour</h1>;\n}\n",
    )?;
    test.write_file("lint.txt", "app/page.tsx\n  2: Texte en dur: \"Bonjour\"\n")?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = test.read_file("app/page.tsx")?;
    assert!(content.starts_with("import { useTranslations } from \"next-intl\";\n"));
    assert!(content.contains("  const { t } = useTranslations();\n"));
    assert!(content.contains("<h1>{t(\"home.title\")}</h1>"));
    Ok(())
}

#[test]
fn test_run_primary_locale_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file("messages/de.json", r#"{ "hallo": "Hallo" }"#)?;
    test.write_file("src/A.tsx", "<p>Hallo</p>\n")?;
    test.write_file("lint.txt", "src/A.tsx\n  1: Hardcoded string: \"Hallo\"\n")?;

    let output = test
        .run_command()
        .args(["--report", "lint.txt", "--primary-locale", "de"])
        .output()?;
    assert!(output.status.success());

    assert!(test.read_file("src/A.tsx")?.contains("<p>{t(\"hallo\")}</p>"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_invokes_failing_linter() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file(
        ".autotranslaterc.json",
        r#"{ "lintCommand": ["sh", "lint.sh"] }"#,
    )?;
    test.write_file(
        "lint.sh",
        "echo 'src/A.tsx'\necho '  1: Hardcoded string: \"Hello World\"'\nexit 1\n",
    )?;
    test.write_file("src/A.tsx", "<div>Hello World</div>\n")?;

    let output = test.run_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        test.read_file("src/A.tsx")?
            .contains("<div>{t(\"greeting.hello\")}</div>")
    );
    Ok(())
}

#[test]
fn test_run_linter_not_found_warns() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file(
        ".autotranslaterc.json",
        r#"{ "lintCommand": ["autotranslate-missing-linter"] }"#,
    )?;

    let output = test.run_command().output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: Failed to run autotranslate-missing-linter"));
    assert_snapshot!(stdout(&output).trim_end(), @"✓ No hardcoded strings to replace");
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
    assert!(test.root().join(".git").exists());
    Ok(())
}
