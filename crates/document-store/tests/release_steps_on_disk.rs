//! Verify and prepare against real files in a temporary working directory.

use std::fs;
use std::path::Path;

use document_store::FsDocumentStore;
use plugin::{
    DocumentVersionSync, ErrorCode, PluginConfig, PluginError, ReleaseContext, Verifier, Writer,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn sync() -> DocumentVersionSync<FsDocumentStore> {
    DocumentVersionSync::new(FsDocumentStore::new())
}

fn config() -> PluginConfig {
    PluginConfig::for_location("./openrpc.json")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn verify_fails_without_document() {
    let dir = tempfile::tempdir().unwrap();

    let err = sync()
        .verify_conditions(&config(), &ReleaseContext::in_directory(dir.path()))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::MissingDocument));
    assert!(err.to_string().contains("Missing `openrpc.json` document file"));
}

#[tokio::test]
async fn verify_treats_file_named_like_fallback_directory_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("src"), "not a directory").unwrap();

    let err = sync()
        .verify_conditions(&config(), &ReleaseContext::in_directory(dir.path()))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::MissingDocument));
    assert!(err.to_string().contains("Missing `openrpc.json` document file"));
}

#[tokio::test]
async fn verify_passes_for_touched_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openrpc.json");
    fs::File::create(&path).unwrap();

    let valid = sync()
        .verify_conditions(&config(), &ReleaseContext::in_directory(dir.path()))
        .await
        .unwrap();

    assert!(valid);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[cfg(unix)]
#[tokio::test]
async fn verify_reports_permission_denied_as_unreadable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openrpc.json");
    fs::write(&path, "{}").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::File::open(&path).is_ok() {
        // Privileged users bypass file modes; nothing to observe.
        return;
    }

    let err = sync()
        .verify_conditions(&config(), &ReleaseContext::in_directory(dir.path()))
        .await
        .unwrap_err();

    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
    assert_eq!(err.code(), Some(ErrorCode::UnreadableDocument));
}

#[tokio::test]
async fn prepare_without_version_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openrpc.json");
    fs::File::create(&path).unwrap();

    let err = sync()
        .prepare(&config(), &ReleaseContext::in_directory(dir.path()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("No nextRelease version"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[tokio::test]
async fn prepare_sets_the_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openrpc.json");
    fs::write(
        &path,
        "{\n    \"info\": {\n        \"version\": \"0.0.0-development\"\n    }\n}",
    )
    .unwrap();

    let prepared = sync()
        .prepare(
            &config(),
            &ReleaseContext::in_directory(dir.path()).with_next_version("1.0.0"),
        )
        .await
        .unwrap();

    assert!(prepared);
    assert_eq!(read_json(&path), json!({"info": {"version": "1.0.0"}}));
}

#[tokio::test]
async fn prepare_updates_document_under_src_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();
    let under_src = dir.path().join("src/openrpc.json");
    let elsewhere = dir.path().join("docs/openrpc.json");
    let original = r#"{"info":{"version":"0.0.0-development"}}"#;
    fs::write(&under_src, original).unwrap();
    fs::write(&elsewhere, original).unwrap();

    sync()
        .prepare(
            &PluginConfig::for_location("src/openrpc.json"),
            &ReleaseContext::in_directory(dir.path()).with_next_version("1.0.0"),
        )
        .await
        .unwrap();

    assert_eq!(read_json(&under_src)["info"]["version"], json!("1.0.0"));
    assert_eq!(fs::read_to_string(&elsewhere).unwrap(), original);
}

#[tokio::test]
async fn prepare_falls_back_to_src_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    let under_src = dir.path().join("src/openrpc.json");
    fs::write(&under_src, r#"{"info":{"version":"0.0.0"}}"#).unwrap();

    sync()
        .prepare(
            &config(),
            &ReleaseContext::in_directory(dir.path()).with_next_version("0.2.0"),
        )
        .await
        .unwrap();

    assert_eq!(read_json(&under_src)["info"]["version"], json!("0.2.0"));
    assert!(!dir.path().join("openrpc.json").exists());
}

#[tokio::test]
async fn prepare_twice_produces_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openrpc.json");
    fs::write(
        &path,
        r#"{"openrpc":"1.2.6","info":{"title":"demo","version":"0.0.0"},"methods":[]}"#,
    )
    .unwrap();
    let context = ReleaseContext::in_directory(dir.path()).with_next_version("1.0.0");

    sync().prepare(&config(), &context).await.unwrap();
    let first = fs::read(&path).unwrap();
    sync().prepare(&config(), &context).await.unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        read_json(&path),
        json!({"openrpc": "1.2.6", "info": {"title": "demo", "version": "1.0.0"}, "methods": []})
    );
}

#[tokio::test]
async fn prepare_surfaces_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openrpc.json");
    fs::write(&path, "{ not json").unwrap();

    let err = sync()
        .prepare(
            &config(),
            &ReleaseContext::in_directory(dir.path()).with_next_version("1.0.0"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PluginError::Parse { .. }), "{err:?}");
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}
