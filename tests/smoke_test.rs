use mdappend::{ApplyError, ApplyOptions, Config, FileError, Outcome, apply, apply_to, apply_with};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MARKER: &str = "UNIQUE_TOKEN";
const BLOCK: &str = "\n\n## UNIQUE_TOKEN\nExtra content";

/// Creates a Config for testing with a small marker/block and one excluded name.
fn test_config(root: &Path) -> Config {
    Config {
        marker: MARKER.to_string(),
        block: BLOCK.to_string(),
        excluded: BTreeSet::from(["keep-agent.md".to_string()]),
        ..Config::with_defaults(root)
    }
}

fn write(root: &Path, name: &str, contents: &str) {
    fs::write(root.join(name), contents).unwrap();
}

fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).unwrap()
}

#[test]
fn it_appends_block_once() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "ops-agent.md", "Title\n\nBody text\n");

    let summary = apply(&test_config(root))?;

    assert_eq!(summary.updated(), 1);
    assert_eq!(
        read(root, "ops-agent.md"),
        "Title\n\nBody text\n\n## UNIQUE_TOKEN\nExtra content"
    );
    Ok(())
}

#[test]
fn it_is_idempotent() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "a-agent.md", "alpha\n");
    write(root, "b-agent.md", "beta\n\n\n");
    write(root, "c-agent.md", "gamma");
    let config = test_config(root);

    let first = apply(&config)?;
    assert_eq!(first.updated(), 3);
    let after_first: Vec<String> = ["a-agent.md", "b-agent.md", "c-agent.md"]
        .iter()
        .map(|n| read(root, n))
        .collect();

    let second = apply(&config)?;
    assert_eq!(second.updated(), 0);
    assert_eq!(second.skipped_marked(), 3);

    let after_second: Vec<String> = ["a-agent.md", "b-agent.md", "c-agent.md"]
        .iter()
        .map(|n| read(root, n))
        .collect();
    assert_eq!(after_first, after_second);
    Ok(())
}

#[test]
fn it_never_touches_excluded_files() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "keep-agent.md", "leave me alone\n   ");
    write(root, "ops-agent.md", "patch me\n");

    let summary = apply(&test_config(root))?;

    assert_eq!(read(root, "keep-agent.md"), "leave me alone\n   ");
    assert!(matches!(
        summary.outcome(&root.join("keep-agent.md")),
        Some(Outcome::SkippedExcluded)
    ));
    assert_eq!(summary.skipped_excluded(), 1);
    assert_eq!(summary.updated(), 1);
    Ok(())
}

#[test]
fn it_matches_excluded_names_exactly() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "KEEP-AGENT.md", "different case\n");
    write(root, "keep-agent.md.md", "different name\n");

    let summary = apply(&Config {
        pattern: "*.md".to_string(),
        ..test_config(root)
    })?;

    assert_eq!(summary.skipped_excluded(), 0);
    assert_eq!(summary.updated(), 2);
    Ok(())
}

#[test]
fn it_isolates_per_file_failures() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "a-agent.md", "alpha\n");
    fs::write(root.join("b-agent.md"), [0xffu8, 0xfe, 0x00, 0x41])?;
    write(root, "c-agent.md", "gamma\nUNIQUE_TOKEN already here\n");
    write(root, "d-agent.md", "delta\n");

    let summary = apply(&test_config(root))?;

    assert_eq!(summary.total(), 4);
    assert_eq!(summary.errored(), 1);
    assert_eq!(summary.updated(), 2);
    assert_eq!(summary.skipped_marked(), 1);
    assert!(matches!(
        summary.outcome(&root.join("b-agent.md")),
        Some(Outcome::Errored(_))
    ));
    assert!(read(root, "d-agent.md").ends_with(BLOCK));
    assert_eq!(fs::read(root.join("b-agent.md"))?, [0xffu8, 0xfe, 0x00, 0x41]);
    Ok(())
}

#[test]
fn it_reports_files_in_path_order() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    for name in ["c-agent.md", "a-agent.md", "b-agent.md"] {
        write(root, name, "x\n");
    }

    let summary = apply(&test_config(root))?;

    let order: Vec<_> = summary
        .files
        .iter()
        .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(order, ["a-agent.md", "b-agent.md", "c-agent.md"]);
    Ok(())
}

#[test]
fn it_accepts_zero_matches() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "README.md", "not an agent\n");

    let summary = apply(&test_config(root))?;

    assert_eq!(summary.total(), 0);
    assert_eq!(summary.updated(), 0);
    assert_eq!(summary.skipped_marked(), 0);
    assert_eq!(summary.skipped_excluded(), 0);
    assert_eq!(summary.errored(), 0);
    assert_eq!(read(root, "README.md"), "not an agent\n");
    Ok(())
}

#[test]
fn it_writes_nothing_on_dry_run() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "ops-agent.md", "untouched\n");

    let summary = apply(&Config {
        dry_run: true,
        ..test_config(root)
    })?;

    assert_eq!(summary.updated(), 1);
    assert_eq!(read(root, "ops-agent.md"), "untouched\n");
    assert_eq!(fs::read_dir(root)?.count(), 1);
    Ok(())
}

#[test]
fn it_walks_subdirectories_only_when_recursive() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    fs::create_dir(root.join("team"))?;
    write(root, "team/nested-agent.md", "nested\n");

    let flat = apply_to(
        root,
        "*agent*.md",
        &BTreeSet::new(),
        MARKER,
        BLOCK,
        ApplyOptions::default(),
    )?;
    assert_eq!(flat.total(), 0);
    assert_eq!(read(root, "team/nested-agent.md"), "nested\n");

    let deep = apply_to(
        root,
        "*agent*.md",
        &BTreeSet::new(),
        MARKER,
        BLOCK,
        ApplyOptions {
            recursive: true,
            ..ApplyOptions::default()
        },
    )?;
    assert_eq!(deep.updated(), 1);
    assert!(read(root, "team/nested-agent.md").ends_with(BLOCK));
    Ok(())
}

#[test]
fn it_rejects_missing_directory_before_touching_anything() {
    let temp_dir = tempdir().unwrap();
    let err = apply(&test_config(&temp_dir.path().join("absent"))).unwrap_err();
    assert!(matches!(err, ApplyError::DirectoryNotFound(_)));
}

#[test]
fn it_rejects_block_without_marker() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write(root, "ops-agent.md", "body\n");

    let err = apply(&Config {
        block: "\n\nno token here".to_string(),
        ..test_config(root)
    })
    .unwrap_err();

    assert!(matches!(err, ApplyError::BlockMissingMarker(_)));
    assert_eq!(read(root, "ops-agent.md"), "body\n");
}

#[test]
fn it_rejects_empty_marker() {
    let temp_dir = tempdir().unwrap();
    let err = apply(&Config {
        marker: String::new(),
        ..test_config(temp_dir.path())
    })
    .unwrap_err();
    assert!(matches!(err, ApplyError::EmptyMarker));
}

#[test]
fn it_uses_stock_defaults() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "build-agent.md", "# Build agent\n");
    write(root, "auth-agent.md", "# Auth agent\n");

    let summary = apply(&Config::with_defaults(root))?;

    assert_eq!(summary.updated(), 1);
    assert_eq!(summary.skipped_excluded(), 1);
    let patched = read(root, "build-agent.md");
    assert!(patched.starts_with("# Build agent\n---\n\n## "));
    assert!(patched.contains("MANDATORY ACF REQUIREMENTS"));
    assert_eq!(read(root, "auth-agent.md"), "# Auth agent\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn it_refuses_read_only_files_and_carries_on() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "a-agent.md", "locked\n");
    fs::set_permissions(root.join("a-agent.md"), fs::Permissions::from_mode(0o444))?;
    write(root, "b-agent.md", "open\n");

    let summary = apply(&test_config(root))?;

    assert_eq!(summary.errored(), 1);
    assert!(matches!(
        summary.outcome(&root.join("a-agent.md")),
        Some(Outcome::Errored(FileError::ReadOnly))
    ));
    assert!(matches!(
        summary.outcome(&root.join("b-agent.md")),
        Some(Outcome::Updated)
    ));
    assert_eq!(fs::read(root.join("a-agent.md"))?, b"locked\n");
    assert!(read(root, "b-agent.md").ends_with(BLOCK));

    let leftovers: Vec<_> = fs::read_dir(root)?
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    Ok(())
}

#[cfg(unix)]
#[test]
fn it_patches_through_symlinks_and_reports_dangling_ones() -> anyhow::Result<()> {
    use std::os::unix::fs::symlink;

    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "real.txt", "linked body\n");
    symlink(root.join("real.txt"), root.join("link-agent.md"))?;
    symlink(root.join("missing.txt"), root.join("broken-agent.md"))?;

    let summary = apply(&test_config(root))?;

    assert_eq!(summary.total(), 2);
    assert!(matches!(
        summary.outcome(&root.join("link-agent.md")),
        Some(Outcome::Updated)
    ));
    assert!(matches!(
        summary.outcome(&root.join("broken-agent.md")),
        Some(Outcome::Errored(FileError::Read(_)))
    ));
    assert!(fs::symlink_metadata(root.join("link-agent.md"))?.file_type().is_symlink());
    assert_eq!(read(root, "real.txt"), format!("linked body{BLOCK}"));
    Ok(())
}

#[test]
fn it_reports_each_file_as_it_goes() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write(root, "a-agent.md", "alpha\n");
    write(root, "b-agent.md", "UNIQUE_TOKEN\n");
    write(root, "keep-agent.md", "kept\n");

    let mut lines = Vec::new();
    let summary = apply_with(&test_config(root), |line| lines.push(line.to_string()))?;

    assert_eq!(
        lines,
        [
            "a-agent.md: updated",
            "b-agent.md: skipped (already marked)",
            "keep-agent.md: skipped (excluded)",
        ]
    );
    assert_eq!(lines.len(), summary.total());
    Ok(())
}
