//! File and archive loading tests.

use std::path::{Path, PathBuf};

use crate::helpers::fixtures::*;
use crate::helpers::graph_helpers::*;
use tempfile::TempDir;
use umlxmi::{Loader, ParseOptions, XmiError};

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// PLAIN DOCUMENTS
// =============================================================================

#[test]
fn test_load_plain_document() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "shop.xmi", SHOP_1_1.as_bytes());

    let loaded = Loader::new().load(&path).unwrap();
    assert!(loaded.profiles.is_empty());

    let graph = loaded.parse(ParseOptions::default()).unwrap();
    assert_eq!(graph_signature(&graph), graph_signature(&parse_fixture(SHOP_1_1)));
}

#[test]
fn test_extension_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "SHOP.XMI", SHOP_1_0.as_bytes());

    let graph = Loader::new().load(&path).unwrap().parse(ParseOptions::default()).unwrap();
    assert_eq!(graph.model().name().to_string(), "shop");
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "shop.mdl", SHOP_1_1.as_bytes());

    let err = Loader::new().load(&path).unwrap_err();
    assert!(matches!(err, XmiError::Unsupported(_)));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Loader::new().load(&dir.path().join("absent.xmi")).unwrap_err();
    assert!(matches!(err, XmiError::Io(_)));
}

#[test]
fn test_malformed_document() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "broken.xmi", b"<XMI><XMI.content></XMI>");

    let err = Loader::new().load(&path).unwrap_err();
    assert!(matches!(err, XmiError::Xml(_)));
}

// =============================================================================
// ARCHIVES (requires archive feature)
// =============================================================================

#[cfg(feature = "archive")]
mod archives {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_load_archive_with_profile() {
        let dir = TempDir::new().unwrap();
        let profiles = dir.path().join("profiles");
        std::fs::create_dir(&profiles).unwrap();
        write_file(&profiles, PROFILE_KEY, PROFILE_1_2.as_bytes());
        let archive = zip_bytes(&[
            ("crm.xmi", PROFILED_1_2),
            ("crm.profile", PROFILE_LISTING),
            ("crm.pgml", "<pgml/>"),
        ]);
        let path = write_file(dir.path(), "crm.zargo", &archive);

        let loaded = Loader::new().with_profile_dir(&profiles).load(&path).unwrap();
        assert_eq!(loaded.profiles.keys().collect::<Vec<_>>(), vec![PROFILE_KEY]);

        let graph = loaded.parse(ParseOptions::default()).unwrap();
        let customer = class(&graph, "c1");
        assert_eq!(names(&customer.gen_parents(false)), vec!["Base"]);
    }

    #[test]
    fn test_archive_without_profile_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "shop.zuml", &zip_bytes(&[("shop.xmi", SHOP_1_1)]));

        let loaded = Loader::new().load(&path).unwrap();
        assert!(loaded.profiles.is_empty());
        assert_eq!(
            names(&loaded.parse(ParseOptions::default()).unwrap().model().classes(true)),
            vec!["Order", "Line", "Item"]
        );
    }

    #[test]
    fn test_profile_not_in_any_directory() {
        let dir = TempDir::new().unwrap();
        let archive = zip_bytes(&[("crm.xmi", PROFILED_1_2), ("crm.profile", PROFILE_LISTING)]);
        let path = write_file(dir.path(), "crm.zargo", &archive);

        let err = Loader::new().with_profile_dir(dir.path()).load(&path).unwrap_err();
        match err {
            XmiError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected a missing profile, got {other}"),
        }
    }

    #[test]
    fn test_archive_with_two_documents() {
        let dir = TempDir::new().unwrap();
        let archive = zip_bytes(&[("a.xmi", SHOP_1_1), ("b.xmi", SHOP_1_0)]);
        let path = write_file(dir.path(), "shop.zip", &archive);

        let err = Loader::new().load(&path).unwrap_err();
        assert!(matches!(err, XmiError::Archive(_)));
    }
}
