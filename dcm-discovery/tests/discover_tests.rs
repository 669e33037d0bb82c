//! Filesystem discovery tests for `dcm-discovery`.
//!
//! Each test builds an isolated `TempDir` tree: no shared state.

use dcm_core::types::ComposeFile;
use dcm_discovery::{discover, DiscoveryError};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn make_dir() -> TempDir {
    TempDir::new().expect("tempdir")
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, "services: {}\n").expect("write fixture");
}

fn names(root: &Path) -> Vec<String> {
    discover(root)
        .expect("discover")
        .into_iter()
        .map(|p| p.name.0)
        .collect()
}

// ---------------------------------------------------------------------------
// Pruning and matching
// ---------------------------------------------------------------------------

#[test]
fn hidden_directories_are_never_descended() {
    let dir = make_dir();
    touch(dir.path(), "app1/docker-compose.yml");
    touch(dir.path(), ".hidden/app2/docker-compose.yml");
    touch(dir.path(), "app3/docker-compose.yaml");

    let projects = discover(dir.path()).expect("discover");
    let got: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(got, ["app1", "app3"]);
    assert_eq!(projects[0].file, ComposeFile::Yml);
    assert_eq!(projects[1].file, ComposeFile::Yaml);
    assert_eq!(projects[1].path, dir.path().join("app3"));
}

#[rstest]
#[case(".git/sub/docker-compose.yml")]
#[case("#scratch/docker-compose.yml")]
#[case("ok/.cache/deep/docker-compose.yaml")]
#[case("ok/#tmp/docker-compose.yml")]
fn pruned_prefixes(#[case] rel: &str) {
    let dir = make_dir();
    touch(dir.path(), rel);
    assert!(names(dir.path()).is_empty(), "{rel} must be pruned");
}

#[rstest]
#[case("svc/compose.yml")]
#[case("svc/docker-compose.yml.bak")]
#[case("svc/Docker-Compose.yml")]
#[case("svc/docker-compose.override.yml")]
fn other_file_names_are_ignored(#[case] rel: &str) {
    let dir = make_dir();
    touch(dir.path(), rel);
    assert!(names(dir.path()).is_empty(), "{rel} is not a project marker");
}

#[test]
fn hidden_files_do_not_prune_siblings() {
    let dir = make_dir();
    touch(dir.path(), "svc/.env");
    touch(dir.path(), "svc/docker-compose.yml");
    assert_eq!(names(dir.path()), ["svc"]);
}

#[test]
fn directory_named_like_compose_file_is_not_a_project() {
    let dir = make_dir();
    fs::create_dir_all(dir.path().join("weird/docker-compose.yml")).expect("mkdir");
    assert!(names(dir.path()).is_empty());
}

#[test]
fn both_variants_yield_two_projects() {
    let dir = make_dir();
    touch(dir.path(), "dup/docker-compose.yml");
    touch(dir.path(), "dup/docker-compose.yaml");

    let projects = discover(dir.path()).expect("discover");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].path, projects[1].path);
    assert_eq!(projects[0].name, projects[1].name);
    assert_ne!(projects[0].file, projects[1].file);
}

#[test]
fn nested_projects_are_reported_in_preorder() {
    let dir = make_dir();
    touch(dir.path(), "b/docker-compose.yml");
    touch(dir.path(), "a/inner/docker-compose.yml");
    touch(dir.path(), "a/docker-compose.yml");

    assert_eq!(names(dir.path()), ["a", "inner", "b"]);
}

#[test]
fn discovery_is_deterministic() {
    let dir = make_dir();
    for name in ["zeta", "alpha", "mid"] {
        touch(dir.path(), &format!("{name}/docker-compose.yml"));
    }
    assert_eq!(names(dir.path()), names(dir.path()));
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[test]
fn missing_root_is_fatal() {
    let dir = make_dir();
    let err = discover(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, DiscoveryError::Root { .. }), "got: {err}");
}

#[test]
fn file_root_is_rejected() {
    let dir = make_dir();
    touch(dir.path(), "docker-compose.yml");
    let err = discover(&dir.path().join("docker-compose.yml")).unwrap_err();
    assert!(matches!(err, DiscoveryError::NotADirectory { .. }), "got: {err}");
}

#[test]
fn empty_root_yields_nothing() {
    let dir = make_dir();
    assert!(names(dir.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn broken_symlink_is_skipped() {
    let dir = make_dir();
    fs::create_dir_all(dir.path().join("ghost")).expect("mkdir");
    std::os::unix::fs::symlink(
        dir.path().join("missing.yml"),
        dir.path().join("ghost/docker-compose.yml"),
    )
    .expect("symlink");
    touch(dir.path(), "real/docker-compose.yml");

    assert_eq!(names(dir.path()), ["real"]);
}

#[cfg(unix)]
#[test]
fn symlink_to_regular_file_counts() {
    let dir = make_dir();
    touch(dir.path(), "shared/base.yml");
    fs::create_dir_all(dir.path().join("linked")).expect("mkdir");
    std::os::unix::fs::symlink(
        dir.path().join("shared/base.yml"),
        dir.path().join("linked/docker-compose.yml"),
    )
    .expect("symlink");

    assert_eq!(names(dir.path()), ["linked"]);
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_does_not_abort_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = make_dir();
    touch(dir.path(), "locked/inner/docker-compose.yml");
    touch(dir.path(), "open/docker-compose.yml");
    let locked = dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

    let result = discover(dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");

    let got: Vec<String> = result.expect("discover").into_iter().map(|p| p.name.0).collect();
    // Root may read through 0o000 dirs; either way the open sibling is found.
    assert!(got.contains(&"open".to_string()), "got: {got:?}");
}
