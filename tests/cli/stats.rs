use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, GENS_FR, stdout};

const PARTIAL_DE: &str = r#"<TS version="2.0" language="de">
<context>
    <name>GensQt4::GensWindow</name>
    <message>
        <source>[Paused]</source>
        <translation>[Pausiert]</translation>
    </message>
    <message>
        <source>[NO-EMU]</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Old text</source>
        <translation type="vanished">Alter Text</translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_stats_per_catalog() -> Result<()> {
    let test = CliTest::with_file("translations/gens-qt4_fr.ts", GENS_FR)?;
    test.write_file("translations/gens-qt4_de.ts", PARTIAL_DE)?;

    let output = test.command().arg("stats").output()?;
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        lines,
        vec![
            "./translations/gens-qt4_de.ts  de      50.0%  1/2 finished, 1 unfinished",
            "./translations/gens-qt4_fr.ts  fr      93.0%  384/413 finished, 29 unfinished",
        ]
    );

    Ok(())
}

#[test]
fn test_stats_verbose() -> Result<()> {
    let test = CliTest::with_file("translations/gens-qt4_de.ts", PARTIAL_DE)?;

    let output = test.command().args(["stats", "-v"]).output()?;

    assert!(stdout(&output).contains("1/2 finished, 1 unfinished, 1 retired, 1 contexts"));

    Ok(())
}

#[test]
fn test_stats_empty_directory() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir_all(test.root().join("translations"))?;

    let output = test.command().arg("stats").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "No catalog files found\n");

    Ok(())
}
