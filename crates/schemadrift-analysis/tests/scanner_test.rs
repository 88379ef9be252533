//! Scanner tests: pruning, filtering, read failures, determinism.

use std::fs;
use std::path::Path;

use schemadrift_analysis::scanner::{related_to, AssociationRule, Scanner};
use schemadrift_analysis::naming::EntityVariants;
use schemadrift_core::config::ScanConfig;
use tempfile::TempDir;

// ---- Helpers ----

fn write(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, content).expect("write file");
}

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let root = dir.path();
    write(root, "src/users.ts", "export const users = [];\n");
    write(root, "src/components/UserCard.tsx", "export function UserCard() {}\n");
    write(root, "db/schema.sql", "CREATE TABLE users (id int);\n");
    write(root, "README.md", "# not scanned\n");
    write(root, "node_modules/lib/index.js", "module.exports = {};\n");
    write(root, "dist/bundle.js", "var a;\n");
    write(root, ".cache/tmp.ts", "const hidden = 1;\n");
    dir
}

fn relatives(output: &schemadrift_analysis::ScanOutput) -> Vec<&str> {
    output.files.iter().map(|f| f.relative.as_str()).collect()
}

// ---- Walk ----

#[test]
fn prunes_excluded_and_hidden_dirs() {
    let dir = fixture();
    let output = Scanner::new(&ScanConfig::default()).scan(dir.path());
    assert_eq!(
        relatives(&output),
        vec!["db/schema.sql", "src/components/UserCard.tsx", "src/users.ts"]
    );
    assert_eq!(output.stats.dirs_pruned, 3);
    assert_eq!(output.stats.files_filtered, 1);
    assert!(output.failures.is_empty());
}

#[test]
fn custom_extensions_and_exclusions() {
    let dir = fixture();
    let config = ScanConfig {
        include_extensions: vec![".JS".to_string()],
        exclude_dirs: vec!["dist".to_string()],
        ..Default::default()
    };
    let output = Scanner::new(&config).scan(dir.path());
    assert_eq!(relatives(&output), vec!["node_modules/lib/index.js"]);
}

#[test]
fn lines_are_one_indexed() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.ts", "first\nsecond\n");
    let output = Scanner::new(&ScanConfig::default()).scan(dir.path());
    let file = output.find("a.ts").unwrap();
    assert_eq!(file.line(1), Some("first"));
    assert_eq!(file.line(2), Some("second"));
    assert_eq!(file.line(0), None);
}

// ---- Failures ----

#[test]
fn unreadable_files_are_recorded_and_scan_continues() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.ts", "const ok = 1;\n");
    write(dir.path(), "bad.ts", [0xff, 0xfe, 0x00, 0xc3]);
    let output = Scanner::new(&ScanConfig::default()).scan(dir.path());
    assert_eq!(relatives(&output), vec!["good.ts"]);
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].path, "bad.ts");
    assert_eq!(output.failures[0].code, "INVALID_ENCODING");
    assert_eq!(output.stats.files_failed, 1);
}

#[test]
fn oversized_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "big.ts", "x".repeat(64));
    let config = ScanConfig {
        max_file_size: Some(16),
        ..Default::default()
    };
    let output = Scanner::new(&config).scan(dir.path());
    assert!(output.files.is_empty());
    assert_eq!(output.failures[0].code, "FILE_TOO_LARGE");
}

// ---- Multiple roots ----

#[test]
fn scan_roots_reads_extra_files_once() {
    let dir = fixture();
    write(dir.path(), "contracts/contracts.yaml", "contracts: {}\n");
    let root = dir.path();
    let output = Scanner::new(&ScanConfig::default()).scan_roots(
        root,
        &[root.join("src"), root.join("src"), root.join("missing")],
        &[root.join("contracts/contracts.yaml"), root.join("src/users.ts")],
    );
    assert_eq!(
        relatives(&output),
        vec![
            "contracts/contracts.yaml",
            "src/components/UserCard.tsx",
            "src/users.ts"
        ]
    );
}

#[test]
fn parallel_scan_is_deterministic() {
    let dir = TempDir::new().unwrap();
    for i in 0..40 {
        write(dir.path(), &format!("src/m{}/f{i}.ts", i % 7), format!("const v{i} = {i};\n"));
    }
    let config = ScanConfig {
        threads: Some(4),
        ..Default::default()
    };
    let a = Scanner::new(&config).scan(dir.path());
    let b = Scanner::new(&config).scan(dir.path());
    assert_eq!(relatives(&a), relatives(&b));
    assert_eq!(a.files.len(), 40);
}

// ---- Association ----

#[test]
fn association_reports_first_rule() {
    let dir = fixture();
    let output = Scanner::new(&ScanConfig::default()).scan(dir.path());
    let user = EntityVariants::new("User");
    let rules: Vec<Option<AssociationRule>> = output
        .files
        .iter()
        .map(|f| {
            related_to(
                &f.file_name_lower(),
                &f.content,
                &f.content.to_lowercase(),
                &user,
            )
        })
        .collect();
    assert_eq!(
        rules,
        vec![
            Some(AssociationRule::ContentToken),
            Some(AssociationRule::FilenameVariant),
            Some(AssociationRule::FilenameVariant),
        ]
    );
}
