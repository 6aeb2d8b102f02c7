// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use feria_api::Client;
use feria_app::{CollectionKind, RecordId};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};

fn json_response(body: &str, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_status_code(status)
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .expect("valid content type header"),
        )
}

#[test]
fn fetch_error_contains_actionable_remediation() {
    let client = Client::new("http://127.0.0.1:1", "token", Duration::from_millis(50))
        .expect("client should initialize");

    let error = client
        .fetch_collection(CollectionKind::News)
        .expect_err("fetch should fail for unreachable endpoint");
    assert!(error.to_string().contains("backend.base_url"));
}

#[test]
fn fetch_collection_sends_bearer_token_and_decodes_envelope() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/panel-fetch-news-list");
        let auth = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Authorization"))
            .map(|header| header.value.as_str().to_owned());
        assert_eq!(auth.as_deref(), Some("Bearer secret-token"));

        let body = r#"{"news":[{"id":1,"news_heading":"Fair dates"},{"id":2,"news_heading":"Stalls"}]}"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, "secret-token", Duration::from_secs(1))?;
    let records = client.fetch_collection(CollectionKind::News)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), &RecordId::Int(1));
    assert_eq!(records[1].field_text("news_heading"), "Stalls");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn fetch_record_uses_the_by_id_path() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/api/panel-fetch-participant-by-id/9");
        let body = r#"{"participant":{"id":9,"name_of_firm":"Shree Textiles"}}"#;
        request
            .respond(json_response(body, 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, "secret-token", Duration::from_secs(1))?;
    let record = client.fetch_record(CollectionKind::Participants, &RecordId::Int(9))?;
    assert_eq!(record.field_text("name_of_firm"), "Shree Textiles");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn delete_issues_delete_against_the_record_path() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Delete);
        assert_eq!(request.url(), "/api/panel-delete-news/4");
        request
            .respond(json_response("{}", 200))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, "secret-token", Duration::from_secs(1))?;
    client.delete_record(CollectionKind::News, &RecordId::Int(4))?;

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn delete_failure_surfaces_the_server_message() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(json_response(
                r#"{"message":"This action is unauthorized."}"#,
                403,
            ))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, "secret-token", Duration::from_secs(1))?;
    let error = client
        .delete_record(CollectionKind::News, &RecordId::Int(4))
        .expect_err("403 should fail");
    assert_eq!(
        error.to_string(),
        "server error (403): This action is unauthorized."
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn delete_is_refused_for_collections_without_a_delete_endpoint() {
    let client = Client::new("http://127.0.0.1:1", "token", Duration::from_millis(50))
        .expect("client should initialize");

    let error = client
        .delete_record(CollectionKind::JobRequirements, &RecordId::Int(1))
        .expect_err("job require rows have no delete endpoint");
    assert!(error.to_string().contains("cannot be deleted"));
}
