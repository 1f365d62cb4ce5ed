use salvo::Service;
use salvo::test::{ResponseExt, TestClient};

use sundial_core::constants::{API_ROUTE_PREFIX, NEXT_DATE_ROUTE_COMPONENT};

use super::routes;

fn preview_url(query: &str) -> String {
    format!("http://127.0.0.1:7540{API_ROUTE_PREFIX}/{NEXT_DATE_ROUTE_COMPONENT}?{query}")
}

#[test_log::test(tokio::test)]
async fn preview_computes_next_date() {
    let service = Service::new(routes());

    let content = TestClient::get(preview_url("now=20240115&date=20240113&repeat=d%207"))
        .send(&service)
        .await
        .take_string()
        .await
        .unwrap();

    assert_eq!(content, "20240120");
}

#[test_log::test(tokio::test)]
async fn preview_rejects_bad_rule() {
    let service = Service::new(routes());

    let content = TestClient::get(preview_url("now=20240115&date=20240113&repeat=d%20401"))
        .send(&service)
        .await
        .take_string()
        .await
        .unwrap();

    assert!(content.contains("error"), "expected error payload: {content}");
}

#[test_log::test(tokio::test)]
async fn preview_rejects_bad_now() {
    let service = Service::new(routes());

    let content = TestClient::get(preview_url("now=bogus&date=20240113&repeat=y"))
        .send(&service)
        .await
        .take_string()
        .await
        .unwrap();

    assert!(content.contains("incorrect now"), "got: {content}");
}
