use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, GENS_FR, stderr, stdout};

const CLEAN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="fr">
<context>
    <name>GensQt4::AboutDialog</name>
    <message>
        <source>Compiled using Qt %1.</source>
        <translation>Compilé avec Qt %1.</translation>
    </message>
    <message>
        <source>C&amp;redits</source>
        <translation>&amp;Générique</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_clean_catalog() -> Result<()> {
    let test = CliTest::with_file("translations/app_fr.ts", CLEAN)?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 catalog file - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_unfinished_only() -> Result<()> {
    let test = CliTest::with_file("translations/gens-qt4_fr.ts", GENS_FR)?;

    let output = test
        .check_command()
        .args(["--rule", "unfinished"])
        .output()?;
    let out = stdout(&output);

    // Warnings alone do not fail the run.
    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("warning: \"[Paused]\"  unfinished"));
    assert!(out.contains("--> ./translations/gens-qt4_fr.ts:"));
    assert!(out.ends_with("29 problems (0 errors, 29 warnings)\n"));
    assert!(!out.contains("untranslated"));

    Ok(())
}

#[test]
fn test_untranslated_message() -> Result<()> {
    let test = CliTest::with_file("translations/gens-qt4_fr.ts", GENS_FR)?;

    let output = test.check_command().args(["-r", "untranslated"]).output()?;
    let out = stdout(&output);

    assert!(out.contains("warning: \"Start\"  untranslated"));
    assert!(out.contains("(controllers/3BTN): translation is identical to the source"));
    assert!(out.contains("hint: add the text to 'ignoreTexts' if it needs no translation"));
    // The MOUS variant has an empty translation, which is not "identical".
    assert!(!out.contains("(controllers/MOUS): translation is identical"));

    Ok(())
}

#[test]
fn test_config_ignore_texts() -> Result<()> {
    let test = CliTest::with_file("translations/gens-qt4_fr.ts", GENS_FR)?;
    test.write_file(".tscatrc.json", r#"{ "ignoreTexts": ["Start"] }"#)?;

    let output = test.check_command().args(["-r", "untranslated"]).output()?;

    assert!(!stdout(&output).contains("\"Start\""));

    Ok(())
}

#[test]
fn test_placeholder_mismatch_fails() -> Result<()> {
    let test = CliTest::with_file(
        "translations/app_fr.ts",
        r#"<TS language="fr">
<context>
    <name>GensQt4::CtrlConfigWindow</name>
    <message>
        <source>Team Player %1, Port %2</source>
        <translation>Team Player %1</translation>
    </message>
</context>
</TS>
"#,
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"Team Player %1, Port %2\"  placeholder"));
    assert!(out.contains("expected %1, %2, found %1"));
    assert!(out.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_parse_error() -> Result<()> {
    let test = CliTest::with_file("translations/app_fr.ts", CLEAN)?;
    test.write_file(
        "translations/broken_de.ts",
        "<TS language=\"de\">\n<context>\n    <name>Broken</name>\n",
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("parse-error"));
    assert!(out.contains("--> ./translations/broken_de.ts\n"));

    Ok(())
}

#[test]
fn test_explicit_files() -> Result<()> {
    let test = CliTest::with_file("translations/app_fr.ts", CLEAN)?;
    test.write_file("other/gens-qt4_fr.ts", GENS_FR)?;

    let output = test
        .check_command()
        .args(["-r", "unfinished", "translations/app_fr.ts"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 1 catalog file - no issues found"));

    Ok(())
}

#[test]
fn test_translations_root_flag() -> Result<()> {
    let test = CliTest::with_file("i18n/app_fr.ts", CLEAN)?;

    let output = test
        .check_command()
        .args(["--translations-root", "i18n"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_missing_translations_dir() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Translations directory not found"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let out = stdout(&output);

    assert!(output.status.success());
    for command in ["check", "lookup", "merge", "stats", "init"] {
        assert!(out.contains(command), "help should list `{command}`");
    }

    Ok(())
}
