mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = common::envelope(server.get("/health").send().await?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = common::envelope(server.get("/").send().await?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Tweet API");
    assert!(body["data"]["endpoints"]["tweets"].is_string());
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let res = server.get("/nope").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
