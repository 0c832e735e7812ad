// crates/addrfmt-core/tests/testcases.rs
//
// Runs every document of `tests/testcases/*.yaml` through fix + format with
// the bundled catalog and compares the postal-format output.

use addrfmt_core::{fix, format, Catalog, ComponentMap, Options, OutputFormat, UnknownComponents};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct TestCase {
    description: String,
    components: ComponentMap,
    expected: String,
}

fn catalog() -> Catalog {
    let options = Options {
        output_format: OutputFormat::PostalFormat,
        unknown_components: UnknownComponents::Attention,
        ..Default::default()
    };
    Catalog::load_from_dir(Catalog::default_data_dir(), options).expect("bundled catalog loads")
}

fn load_cases() -> Vec<(String, TestCase)> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("testcases");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .expect("testcases dir")
        .map(|e| e.expect("dir entry").path())
        .filter(|p| p.extension().is_some_and(|e| e == "yaml"))
        .collect();
    files.sort();

    let mut cases = Vec::new();
    for file in files {
        let text = std::fs::read_to_string(&file).expect("readable testcase file");
        let name = file.file_name().unwrap().to_string_lossy().into_owned();
        for document in serde_yaml::Deserializer::from_str(&text) {
            let case = TestCase::deserialize(document).expect("well-formed testcase");
            cases.push((name.clone(), case));
        }
    }
    cases
}

#[test]
fn bundled_catalog_formats_every_testcase() {
    let catalog = catalog();
    let cases = load_cases();
    assert!(cases.len() >= 15, "only {} testcases found", cases.len());

    for (file, case) in cases {
        let address = fix(&case.components, &catalog)
            .unwrap_or_else(|e| panic!("{file}: {}: fix failed: {e}", case.description));
        let formatted = format(&address, &catalog)
            .unwrap_or_else(|e| panic!("{file}: {}: format failed: {e}", case.description));
        assert_eq!(
            formatted.to_string(),
            case.expected,
            "{file}: {}",
            case.description
        );
    }
}
