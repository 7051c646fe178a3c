// ABOUTME: Integration tests for profile reads, updates, and avatar uploads
// ABOUTME: SQLite profile rows plus a temporary avatar directory

mod common;

use chrono::NaiveDate;
use common::signed_in;
use daybook_auth::AuthContext;
use daybook_core::ProfileUpdate;
use daybook_storage::{LocalAvatarStore, SqliteStore};
use daybook_tasks::{ProfileService, TaskError};
use std::sync::Arc;

async fn service(dir: &tempfile::TempDir) -> ProfileService {
    let store = Arc::new(SqliteStore::in_memory().await.unwrap());
    let avatars = Arc::new(LocalAvatarStore::new(dir.path().join("avatars")));
    ProfileService::new(store, avatars)
}

#[tokio::test]
async fn test_update_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir).await;
    let ctx = signed_in("u1");

    assert!(service.get(&ctx).await.unwrap().is_none());

    let saved = service
        .update(
            &ctx,
            ProfileUpdate {
                full_name: Some("Grace Hopper".to_string()),
                date_of_birth: NaiveDate::from_ymd_opt(1906, 12, 9),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(saved.id, "u1");
    assert!(saved.updated_at.is_some());
    assert_eq!(service.get(&ctx).await.unwrap(), Some(saved));
}

#[tokio::test]
async fn test_avatar_upload_is_recorded_on_profile() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir).await;
    let ctx = signed_in("u1");

    service
        .update(
            &ctx,
            ProfileUpdate {
                full_name: Some("Grace Hopper".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let url = service
        .upload_avatar(&ctx, "portrait.JPG", vec![0xff, 0xd8, 0xff])
        .await
        .unwrap();

    assert!(url.starts_with("file://"));
    assert!(url.contains("/u1/"));
    assert!(url.ends_with(".jpg"));

    let profile = service.get(&ctx).await.unwrap().unwrap();
    assert_eq!(profile.avatar_url.as_deref(), Some(url.as_str()));
    assert_eq!(profile.full_name.as_deref(), Some("Grace Hopper"));
}

#[tokio::test]
async fn test_avatar_without_extension_defaults_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir).await;

    let url = service
        .upload_avatar(&signed_in("u1"), "avatar", vec![1])
        .await
        .unwrap();
    assert!(url.ends_with(".png"));
}

#[tokio::test]
async fn test_requires_session() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir).await;

    let result = service.get(&AuthContext::anonymous()).await;
    assert!(matches!(result, Err(TaskError::AuthenticationRequired)));
}
