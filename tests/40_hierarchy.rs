mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use common::TestServer;

async fn subject(server: &TestServer) -> Result<String> {
    server
        .create_with_token("/subjects", json!({ "name": "Math", "description": "d" }))
        .await
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| items.iter().filter_map(|v| v["_id"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn children_are_ordered_after_their_siblings() -> Result<()> {
    let server = TestServer::spawn().await?;
    let subject = subject(&server).await?;

    let first = server.create("/journeys", json!({ "title": "Fractions", "subjectId": subject })).await?;
    let second = server.create("/journeys", json!({ "title": "Decimals", "subjectId": subject })).await?;

    let (_, body) = server.get(&format!("/journeys/{}", first)).await?;
    assert_eq!(body["data"]["order"], 1);
    assert_eq!(body["data"]["parent"], json!({ "kind": "subject", "id": subject }));
    let (_, body) = server.get(&format!("/journeys/{}", second)).await?;
    assert_eq!(body["data"]["order"], 2);

    let (_, body) = server.get(&format!("/subjects/{}/journeys", subject)).await?;
    assert_eq!(body["data"]["subject"]["journeys"], json!([first, second]));
    assert_eq!(ids(&body["data"]["journeys"]), vec![first.clone(), second.clone()]);

    let (_, body) = server.get(&format!("/journeys/subject/{}", subject)).await?;
    assert_eq!(ids(&body["data"]).len(), 2);

    let trail = server.create("/trails", json!({ "name": "Basics", "journeyId": first })).await?;
    let a = server.create("/contents", json!({ "title": "A", "content": "a", "trailId": trail })).await?;
    let b = server.create("/contents", json!({ "title": "B", "content": "b", "trailId": trail })).await?;

    let (_, body) = server.get(&format!("/trails/{}/contents", trail)).await?;
    assert_eq!(body["data"]["trail"]["contents"], json!([a, b]));
    let orders: Vec<i64> = body["data"]["contents"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["order"].as_i64())
        .collect();
    assert_eq!(orders, vec![1, 2]);

    Ok(())
}

#[tokio::test]
async fn journeys_need_exactly_one_parent() -> Result<()> {
    let server = TestServer::spawn().await?;
    let subject = subject(&server).await?;

    let (status, _) = server.send(Method::POST, "/journeys", json!({ "title": "Loose" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .send(Method::POST, "/journeys", json!({ "title": "Both", "subjectId": subject, "pointId": subject }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .send(Method::POST, "/journeys", json!({ "title": "Lost", "subjectId": "0b7e9b57-3f7e-4f55-8a7c-6c8f5a3b2d10" }))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{}", body);

    Ok(())
}

#[tokio::test]
async fn start_points_hold_journeys() -> Result<()> {
    let server = TestServer::spawn().await?;
    let point = server
        .create_with_token("/points", json!({ "name": "Beginner", "description": "first steps" }))
        .await?;
    assert!(server.notifications.lock().unwrap().is_empty());

    let journey = server.create("/journeys", json!({ "title": "Warmup", "pointId": point })).await?;

    let (status, body) = server
        .send(Method::PATCH, &format!("/points/{}/add-journey", point), json!({ "journeyId": journey }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["journeys"], json!([journey]));

    let (_, body) = server.get(&format!("/points/{}/journeys", point)).await?;
    assert_eq!(ids(&body["data"]["journeys"]), vec![journey.clone()]);

    let (_, body) = server.get(&format!("/points/user/{}", common::USER_ID)).await?;
    assert_eq!(ids(&body["data"]), vec![point]);

    Ok(())
}

#[tokio::test]
async fn trail_content_links() -> Result<()> {
    let server = TestServer::spawn().await?;
    let subject = subject(&server).await?;
    let journey = server.create("/journeys", json!({ "title": "Fractions", "subjectId": subject })).await?;
    let from = server.create("/trails", json!({ "name": "From", "journeyId": journey })).await?;
    let to = server.create("/trails", json!({ "name": "To", "journeyId": journey })).await?;
    let content = server.create("/contents", json!({ "title": "A", "content": "a", "trailId": from })).await?;

    // Moving a content relinks both trails.
    let (status, body) = server
        .send(Method::PATCH, &format!("/contents/{}", content), json!({ "trailId": to }))
        .await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["trail"], json!(to));
    let (_, body) = server.get(&format!("/trails/{}", from)).await?;
    assert_eq!(body["data"]["contents"], json!([]));
    let (_, body) = server.get(&format!("/contents/trail/{}", to)).await?;
    assert_eq!(ids(&body["data"]), vec![content.clone()]);

    let (_, body) = server
        .send(Method::PUT, &format!("/trails/{}/removeContent", to), json!({ "contentId": content }))
        .await?;
    assert_eq!(body["data"]["contents"], json!([]));

    let (_, body) = server
        .send(Method::PUT, &format!("/trails/{}/addContent", to), json!({ "contentId": content }))
        .await?;
    assert_eq!(body["data"]["contents"], json!([content]));

    let (status, body) = server.send(Method::DELETE, &format!("/trails/{}", from), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Trail deleted successfully");

    Ok(())
}

#[tokio::test]
async fn reconcile_repairs_detached_children() -> Result<()> {
    let server = TestServer::spawn().await?;
    let subject = subject(&server).await?;
    let journey = server.create("/journeys", json!({ "title": "Fractions", "subjectId": subject })).await?;
    let trail = server.create("/trails", json!({ "name": "Basics", "journeyId": journey })).await?;
    let content = server.create("/contents", json!({ "title": "A", "content": "a", "trailId": trail })).await?;

    server
        .send(Method::PUT, &format!("/trails/{}/removeContent", trail), json!({ "contentId": content }))
        .await?;

    let (status, body) = server.send(Method::PUT, &format!("/trails/{}/reconcile", trail), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["contents"], json!([content]));

    let (_, body) = server.send(Method::PUT, &format!("/journeys/{}/reconcile", journey), json!({})).await?;
    assert_eq!(body["data"]["trails"], json!([trail]));

    let (_, body) = server.send(Method::PUT, &format!("/subjects/{}/reconcile", subject), json!({})).await?;
    assert_eq!(body["data"]["journeys"], json!([journey]));

    Ok(())
}
