use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const BASE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="fr">
<context>
    <name>GensQt4::GensWindow</name>
    <message>
        <source>[Paused]</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>[NO-EMU]</source>
        <translation>[PAS D'ÉMU]</translation>
    </message>
</context>
</TS>
"#;

const UPDATE: &str = r#"<TS version="2.0" language="FR">
<context>
    <name>GensQt4::GensWindow</name>
    <message>
        <source>[Paused]</source>
        <translation>[En pause]</translation>
    </message>
</context>
<context>
    <name>GensQt4::VBackend</name>
    <message>
        <source>None</source>
        <comment>osd-stretch</comment>
        <translation>aucun</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_merge_into_output() -> Result<()> {
    let test = CliTest::with_file("app_fr.ts", BASE)?;
    test.write_file("update_fr.ts", UPDATE)?;

    let output = test
        .command()
        .args(["merge", "app_fr.ts", "update_fr.ts", "-o", "out/merged_fr.ts"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Merged 1 catalog into out/merged_fr.ts: 1 added, 1 replaced\n"
    );

    // BASE is untouched when an output path is given.
    assert_eq!(test.read_file("app_fr.ts")?, BASE);

    let lookup = test
        .command()
        .args(["lookup", "out/merged_fr.ts", "GensQt4::GensWindow", "[Paused]"])
        .output()?;
    assert_eq!(stdout(&lookup), "[En pause]\n");

    let merged = test.read_file("out/merged_fr.ts")?;
    assert!(merged.contains(r#"<TS version="2.0" language="fr">"#));
    assert!(merged.contains("<name>GensQt4::VBackend</name>"));

    Ok(())
}

#[test]
fn test_merge_later_catalog_wins() -> Result<()> {
    let test = CliTest::with_file("app_fr.ts", BASE)?;
    test.write_file("update_fr.ts", UPDATE)?;
    test.write_file(
        "late_fr.ts",
        r#"<TS language="fr">
<context>
    <name>GensQt4::GensWindow</name>
    <message>
        <source>[Paused]</source>
        <translation>[Suspendu]</translation>
    </message>
</context>
</TS>
"#,
    )?;

    let output = test
        .command()
        .args(["merge", "app_fr.ts", "update_fr.ts", "late_fr.ts"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Merged 2 catalogs into app_fr.ts: 1 added, 2 replaced"));

    let lookup = test
        .command()
        .args(["lookup", "app_fr.ts", "GensQt4::GensWindow", "[Paused]"])
        .output()?;
    assert_eq!(stdout(&lookup), "[Suspendu]\n");

    Ok(())
}

#[test]
fn test_merge_creates_missing_base() -> Result<()> {
    let test = CliTest::with_file("update_fr.ts", UPDATE)?;

    let output = test
        .command()
        .args(["merge", "new/app_fr.ts", "update_fr.ts"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(test.root().join("new/app_fr.ts").exists());
    assert!(test.read_file("new/app_fr.ts")?.contains(r#"language="FR""#));

    Ok(())
}

#[test]
fn test_merge_language_mismatch() -> Result<()> {
    let test = CliTest::with_file("app_fr.ts", BASE)?;
    test.write_file("app_de.ts", r#"<TS language="de"></TS>"#)?;

    let output = test
        .command()
        .args(["merge", "app_fr.ts", "app_de.ts"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("cannot merge a 'de' catalog into a 'fr' catalog"));
    assert_eq!(test.read_file("app_fr.ts")?, BASE);

    Ok(())
}

#[test]
fn test_merge_rejects_plural_forms_of_other_language() -> Result<()> {
    let base = r#"<TS version="2.0" language="ru">
<context>
    <name>FileDialog</name>
    <message>
        <source>Open</source>
        <translation>Открыть</translation>
    </message>
</context>
</TS>
"#;
    let test = CliTest::with_file("app_ru.ts", base)?;
    test.write_file(
        "update.ts",
        r#"<TS version="2.0">
<context>
    <name>FileDialog</name>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n file</numerusform>
            <numerusform>%n files</numerusform>
        </translation>
    </message>
</context>
</TS>
"#,
    )?;

    let output = test
        .command()
        .args(["merge", "app_ru.ts", "update.ts"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("has 2 form(s) but language 'ru' requires 3"));
    assert_eq!(test.read_file("app_ru.ts")?, base);

    Ok(())
}

#[test]
fn test_merge_output_reloads() -> Result<()> {
    let test = CliTest::with_file("app_fr.ts", BASE)?;
    test.write_file(
        "plural.ts",
        r#"<TS>
<context>
    <name>GensQt4::GensWindow</name>
    <message numerus="yes">
        <source>SRAM loaded. (%n byte(s))</source>
        <translation>
            <numerusform>SRAM chargée. (%n byte)</numerusform>
            <numerusform>SRAM chargée. (%n bytes)</numerusform>
        </translation>
    </message>
</context>
</TS>
"#,
    )?;

    let output = test
        .command()
        .args(["merge", "app_fr.ts", "plural.ts"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let lookup = test
        .command()
        .args([
            "lookup",
            "app_fr.ts",
            "GensQt4::GensWindow",
            "SRAM loaded. (%n byte(s))",
            "-n",
            "3",
        ])
        .output()?;
    assert_eq!(lookup.status.code(), Some(0), "{}", stderr(&lookup));
    assert_eq!(stdout(&lookup), "SRAM chargée. (3 bytes)\n");

    Ok(())
}
