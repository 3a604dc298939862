mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::json;

#[tokio::test]
async fn tweet_lifecycle_with_two_users() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let alice = server.signup("alice").await?;
    let bob = server.signup("bob").await?;

    // Create
    let (status, body) = common::envelope(
        server
            .post("/tweets")
            .header(header::AUTHORIZATION, alice.bearer())
            .json(&json!({ "content": "hello" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["message"], "Tweet created successfully.");
    assert_eq!(body["data"]["content"], "hello");
    assert_eq!(body["data"]["owner"], alice.user_id.as_str());
    let tweet_id = body["data"]["_id"].as_str().unwrap_or_default().to_string();
    assert_eq!(tweet_id.len(), 24);
    let path = format!("/tweets/{}", tweet_id);

    // Someone else may not edit it
    let (status, body) = common::envelope(
        server
            .patch(&path)
            .header(header::AUTHORIZATION, bob.bearer())
            .json(&json!({ "content": "hijacked" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You don't have the permission to update this tweet.");

    // Blank content
    let (status, body) = common::envelope(
        server
            .patch(&path)
            .header(header::AUTHORIZATION, alice.bearer())
            .json(&json!({ "content": "   " }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "tweet is required.");

    // Owner edit
    let (status, body) = common::envelope(
        server
            .patch(&path)
            .header(header::AUTHORIZATION, alice.bearer())
            .json(&json!({ "content": "hello, edited" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tweet updated successfully.");
    assert_eq!(body["data"]["content"], "hello, edited");
    assert_eq!(body["data"]["_id"], tweet_id.as_str());

    let (status, body) = common::envelope(
        server.get(&format!("/tweets/user/{}", alice.user_id)).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tweet for the user fetched successfully!");
    assert_eq!(body["data"], json!([{ "tweets": ["hello, edited"] }]));

    // Someone else may not delete it
    let (status, body) = common::envelope(
        server
            .delete(&path)
            .header(header::AUTHORIZATION, bob.bearer())
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You don't have the permission to delete this tweet.");

    let (status, body) = common::envelope(
        server
            .delete(&path)
            .header(header::AUTHORIZATION, alice.bearer())
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tweet deleted successfully.");
    assert_eq!(body["data"], json!({}));

    let (status, body) = common::envelope(
        server.get(&format!("/tweets/user/{}", alice.user_id)).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User have no tweets");
    assert_eq!(body["data"], json!([]));

    // Gone for good
    let (status, body) = common::envelope(
        server
            .delete(&path)
            .header(header::AUTHORIZATION, alice.bearer())
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tweet not found.");
    Ok(())
}

#[tokio::test]
async fn listing_preserves_creation_order() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let carol = server.signup("carol").await?;
    let dave = server.signup("dave").await?;

    for (session, content) in [(&carol, "first"), (&dave, "noise"), (&carol, "second")] {
        let res = server
            .post("/tweets")
            .header(header::AUTHORIZATION, session.bearer())
            .json(&json!({ "content": content }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let (_, body) = common::envelope(
        server.get(&format!("/tweets/user/{}", carol.user_id)).send().await?,
    )
    .await?;
    assert_eq!(body["data"], json!([{ "tweets": ["first", "second"] }]));
    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_rejected() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let erin = server.signup("erin").await?;

    let (status, body) =
        common::envelope(server.get("/tweets/user/not-an-id").send().await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid user id.");

    let (status, body) = common::envelope(
        server
            .patch("/tweets/xyz")
            .header(header::AUTHORIZATION, erin.bearer())
            .json(&json!({ "content": "x" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid tweet id.");

    let (status, _) = common::envelope(
        server
            .delete("/tweets/xyz")
            .header(header::AUTHORIZATION, erin.bearer())
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_requires_session_and_content() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let frank = server.signup("frank").await?;

    let (status, body) = common::envelope(
        server.post("/tweets").json(&json!({ "content": "hi" })).send().await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, body) = common::envelope(
        server
            .post("/tweets")
            .header(header::AUTHORIZATION, frank.bearer())
            .json(&json!({}))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "tweet is required.");
    Ok(())
}
