use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, GENS_FR, stderr, stdout};

const FILE: &str = "gens-qt4_fr.ts";

fn lookup(test: &CliTest, args: &[&str]) -> Result<String> {
    let output = test.command().arg("lookup").arg(FILE).args(args).output()?;
    assert_eq!(
        output.status.code(),
        Some(0),
        "lookup failed: {}",
        stderr(&output)
    );
    Ok(stdout(&output))
}

#[test]
fn test_lookup_translation() -> Result<()> {
    let test = CliTest::with_file(FILE, GENS_FR)?;

    assert_eq!(
        lookup(&test, &["GensQt4::AboutWindow", "C&redits"])?,
        "&Générique\n"
    );
    assert_eq!(
        lookup(&test, &["GensQt4::GensMenuBar", "&File"])?,
        "&Fichier\n"
    );

    Ok(())
}

#[test]
fn test_lookup_plural_forms() -> Result<()> {
    let test = CliTest::with_file(FILE, GENS_FR)?;
    let base = [
        "GensQt4::GensWindow",
        "SRAM loaded. (%n byte(s))",
        "--comment",
        "Onscreen Display",
    ];

    let with_count = |n: &str| -> Result<String> {
        let mut args = base.to_vec();
        args.extend(["-n", n]);
        lookup(&test, &args)
    };

    assert_eq!(with_count("1")?, "SRAM chargée. (1 byte)\n");
    assert_eq!(with_count("2")?, "SRAM chargée. (2 bytes)\n");
    // French here uses the one/other rule, so zero takes the plural form.
    assert_eq!(with_count("0")?, "SRAM chargée. (0 bytes)\n");

    Ok(())
}

#[test]
fn test_lookup_falls_back_to_source() -> Result<()> {
    let test = CliTest::with_file(FILE, GENS_FR)?;

    // Unfinished translation.
    assert_eq!(lookup(&test, &["GensQt4::GensWindow", "[Paused]"])?, "[Paused]\n");
    // Unknown message.
    assert_eq!(
        lookup(&test, &["GensQt4::GensWindow", "Not in the catalog"])?,
        "Not in the catalog\n"
    );

    Ok(())
}

#[test]
fn test_lookup_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["lookup", "missing_fr.ts", "Context", "Text"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load catalog: missing_fr.ts"));

    Ok(())
}
