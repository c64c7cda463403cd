mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = server.get("/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Learning Trails API");

    Ok(())
}

#[tokio::test]
async fn health_reports_store_status() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = server.get("/health").await?;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");

    Ok(())
}
