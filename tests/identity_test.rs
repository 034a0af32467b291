//! Identity resolution across sessions

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use serde_json::json;
use serial_test::serial;
use wiremock::matchers::body_partial_json;

use groupchat::models::{GroupId, IdentityChoice};
use groupchat::services::{NoKeyboard, SendOutcome};
use groupchat::state::{IdentityResolution, IDENTITY_KEY};
use groupchat::ChatError;
use helpers::*;

#[tokio::test]
async fn test_first_run_requires_prompt() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.resolver().resolve().await, IdentityResolution::PromptRequired);
}

#[tokio::test]
#[serial]
async fn test_anonymous_choice_survives_restart_and_authors_messages() {
    let ctx = TestContext::new().await;
    ConvexMockServer::function("mutation", "messages:sendMessage")
        .and(body_partial_json(json!({ "args": { "user": "Anônimo", "content": "Oi" } })))
        .respond_with(ConvexMockServer::success(json!(null)))
        .expect(1)
        .mount(&ctx.convex.server)
        .await;

    let identity = ctx.resolver().choose(IdentityChoice::Anonymous).await.unwrap();
    assert_eq!(identity.as_str(), "Anônimo");

    // Next launch reads the same storage file
    let restored = match ctx.resolver().resolve().await {
        IdentityResolution::Resolved(identity) => identity,
        IdentityResolution::PromptRequired => panic!("identity should be stored"),
    };
    assert_eq!(restored, identity);

    let session = ctx.session(restored.as_str()).await;
    let composer = session.open_thread(GroupId::new(GROUP_ID), Arc::new(NoKeyboard));
    composer.set_text("Oi");
    assert_eq!(composer.send().await.unwrap(), SendOutcome::Sent);
}

#[tokio::test]
async fn test_named_choice_is_trimmed_and_persisted() {
    let ctx = TestContext::new().await;

    let identity = ctx.resolver().choose(IdentityChoice::Named("  Ana  ".to_string())).await.unwrap();

    assert_eq!(identity.as_str(), "Ana");
    assert_eq!(ctx.storage().get_item(IDENTITY_KEY).await.unwrap().as_deref(), Some("Ana"));
}

#[tokio::test]
async fn test_blank_name_is_rejected_and_nothing_is_stored() {
    let ctx = TestContext::new().await;

    let result = ctx.resolver().choose(IdentityChoice::Named("   ".to_string())).await;

    assert_matches!(result, Err(ChatError::InvalidInput(_)));
    assert_eq!(ctx.resolver().resolve().await, IdentityResolution::PromptRequired);
}

#[tokio::test]
async fn test_stored_empty_string_counts_as_unset() {
    let ctx = TestContext::new().await;
    ctx.storage().set_item(IDENTITY_KEY, "").await.unwrap();

    assert_eq!(ctx.resolver().resolve().await, IdentityResolution::PromptRequired);
}

#[tokio::test]
async fn test_unreadable_storage_prompts_again() {
    let ctx = TestContext::new().await;
    std::fs::write(&ctx.settings.storage.path, "{ not json").unwrap();

    assert_eq!(ctx.resolver().resolve().await, IdentityResolution::PromptRequired);
}
