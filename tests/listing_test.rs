use std::io::Write;

use git_dash::config::ListingConfig;
use git_dash::listing::{
    load_snapshot, parse_gitmodules, parse_name_status_listing, parse_status_listing,
    spawn_loader, ListingError, LoaderCommand, LoaderMessage,
};
use tempfile::NamedTempFile;

fn temp_listing(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_parse_status_listing() {
    let input = " M src/main.rs\nA  src/new.rs\nR  old.rs -> new.rs\n?? \"with space.txt\"\nUU conflict.rs\n";

    let files = parse_status_listing(input).unwrap();

    assert_eq!(files.len(), 5);
    assert_eq!(files[0].name, "src/main.rs");
    assert!(files[0].has_unstaged_changes);
    assert!(!files[0].has_staged_changes);

    assert_eq!(files[1].short_status, "A ");
    assert!(files[1].has_staged_changes);
    assert!(!files[1].tracked);

    assert_eq!(files[2].name, "new.rs");
    assert_eq!(files[2].previous_name.as_deref(), Some("old.rs"));
    assert!(files[2].is_rename());

    assert_eq!(files[3].name, "with space.txt");
    assert!(!files[3].tracked);

    assert!(files[4].has_merge_conflicts);
    assert!(files[4].has_inline_merge_conflicts);
}

#[test]
fn test_status_listing_skips_blank_lines() {
    let files = parse_status_listing("\n M a.rs\n\n").unwrap();
    assert_eq!(files.len(), 1);
}

#[test]
fn test_malformed_status_line() {
    let err = parse_status_listing(" M ok.rs\nX\n").unwrap_err();

    match err {
        ListingError::Malformed { line_no, line } => {
            assert_eq!(line_no, 2);
            assert_eq!(line, "X");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_arrow_only_splits_renames() {
    let input = "?? \"notes -> todo.txt\"\n?? plain -> name.txt\nR  \"old name.txt\" -> \"new name.txt\"\n";

    let files = parse_status_listing(input).unwrap();

    assert_eq!(files[0].name, "notes -> todo.txt");
    assert_eq!(files[0].previous_name, None);
    assert!(!files[0].is_rename());

    assert_eq!(files[1].name, "plain -> name.txt");
    assert!(!files[1].is_rename());

    assert_eq!(files[2].name, "new name.txt");
    assert_eq!(files[2].previous_name.as_deref(), Some("old name.txt"));
}

#[test]
fn test_quoted_paths_are_unescaped() {
    let input = "?? \"caf\\303\\251.txt\"\n M \"say \\\"hi\\\".txt\"\n?? \"back\\\\slash\"\n";

    let files = parse_status_listing(input).unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["café.txt", "say \"hi\".txt", "back\\slash"]);
}

#[test]
fn test_broken_quoting_is_malformed() {
    for line in [
        "?? \"open.txt",
        "?? \"bad\\qescape\"",
        "?? \"short\\30\"",
        "?? \"done\" trailing",
        "R  no-arrow.txt",
        "R  old.txt -> ",
    ] {
        let err = parse_status_listing(line).unwrap_err();
        assert!(
            matches!(err, ListingError::Malformed { line_no: 1, .. }),
            "accepted {line:?}"
        );
    }
}

#[test]
fn test_parse_name_status_listing() {
    let input = "M\tsrc/lib.rs\nR100\told.rs\tnew.rs\nA\tREADME.md\n";

    let files = parse_name_status_listing(input).unwrap();

    let summary: Vec<(&str, &str)> = files
        .iter()
        .map(|f| (f.change_status.as_str(), f.name.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("M", "src/lib.rs"), ("R", "new.rs"), ("A", "README.md")]
    );
}

#[test]
fn test_name_status_requires_path() {
    let err = parse_name_status_listing("M\n").unwrap_err();
    assert!(matches!(err, ListingError::Malformed { line_no: 1, .. }));
}

#[test]
fn test_name_status_quoted_paths() {
    let input = "M\t\"tab\\there.txt\"\nR087\t\"a b\"\t\"caf\\303\\251\"\n";

    let files = parse_name_status_listing(input).unwrap();

    assert_eq!(files[0].name, "tab\there.txt");
    assert_eq!(files[1].name, "café");
    assert_eq!(files[1].change_status, "R");
}

#[test]
fn test_name_status_rejects_unterminated_quote() {
    let err = parse_name_status_listing("A\tok.rs\nM\t\"open\n").unwrap_err();
    assert!(matches!(err, ListingError::Malformed { line_no: 2, .. }));
}

#[test]
fn test_parse_gitmodules() {
    let input = r#"
# vendored code
[submodule "vendor/lib"]
	path = vendor/lib
	url = https://example.com/lib.git
[core]
	path = ignored
[submodule "no-path"]
	url = https://example.com/none.git
[submodule "docs"]
	path = docs/site
"#;

    let modules = parse_gitmodules(input);

    let summary: Vec<(&str, &str, &str)> = modules
        .iter()
        .map(|m| (m.name.as_str(), m.path.as_str(), m.url.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("vendor/lib", "vendor/lib", "https://example.com/lib.git"),
            ("docs", "docs/site", ""),
        ]
    );
}

#[test]
fn test_load_snapshot_reads_submodules() {
    let gitmodules = temp_listing("[submodule \"lib\"]\n\tpath = lib\n\turl = ../lib.git\n");
    let config = ListingConfig {
        submodules: Some(gitmodules.path().to_path_buf()),
        ..ListingConfig::default()
    };

    let snapshot = load_snapshot(&config, 1).unwrap();

    assert_eq!(snapshot.submodules.len(), 1);
    assert_eq!(snapshot.submodules[0].path, "lib");
    assert!(snapshot.files.is_empty());
}

#[test]
fn test_load_snapshot_from_files() {
    let status = temp_listing(" M a.rs\n?? b.rs\n");
    let commit = temp_listing("D\tc.rs\n");
    let config = ListingConfig {
        files: Some(status.path().to_path_buf()),
        commit_files: Some(commit.path().to_path_buf()),
        ..ListingConfig::default()
    };

    let snapshot = load_snapshot(&config, 7).unwrap();

    assert_eq!(snapshot.version, 7);
    assert_eq!(snapshot.files.len(), 2);
    assert_eq!(snapshot.commit_files.len(), 1);
    assert_eq!(snapshot.commit_files[0].change_status, "D");
}

#[test]
fn test_load_snapshot_without_sources() {
    let snapshot = load_snapshot(&ListingConfig::default(), 1).unwrap();

    assert!(snapshot.files.is_empty());
    assert!(snapshot.commit_files.is_empty());
    assert!(snapshot.submodules.is_empty());
}

#[test]
fn test_load_snapshot_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("status.txt");
    let config = ListingConfig {
        files: Some(missing.clone()),
        ..ListingConfig::default()
    };

    match load_snapshot(&config, 1).unwrap_err() {
        ListingError::Read { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_loader_publishes_versioned_snapshots() {
    let status = temp_listing(" M a.rs\n");
    let config = ListingConfig {
        files: Some(status.path().to_path_buf()),
        ..ListingConfig::default()
    };

    let (tx, mut rx) = spawn_loader(config);

    tx.send(LoaderCommand::Refresh).await.unwrap();
    match rx.recv().await {
        Some(LoaderMessage::Loaded(snapshot)) => {
            assert_eq!(snapshot.version, 1);
            assert_eq!(snapshot.files.len(), 1);
        }
        other => panic!("unexpected message: {other:?}"),
    }

    tx.send(LoaderCommand::Refresh).await.unwrap();
    match rx.recv().await {
        Some(LoaderMessage::Loaded(snapshot)) => assert_eq!(snapshot.version, 2),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[tokio::test]
async fn test_loader_reports_errors() {
    let status = temp_listing("garbage\n");
    let config = ListingConfig {
        files: Some(status.path().to_path_buf()),
        ..ListingConfig::default()
    };

    let (tx, mut rx) = spawn_loader(config);
    tx.send(LoaderCommand::Refresh).await.unwrap();

    match rx.recv().await {
        Some(LoaderMessage::Error(message)) => assert!(message.contains("malformed")),
        other => panic!("unexpected message: {other:?}"),
    }
}
