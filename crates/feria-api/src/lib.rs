// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use feria_app::{CollectionKind, Record, RecordId};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Blocking client for the panel backend. Every request carries the session
/// bearer token; callers above this layer never see HTTP.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    token: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("backend.base_url must not be empty");
        }
        Url::parse(&base_url)
            .with_context(|| format!("backend.base_url {base_url:?} is not a valid URL"))?;
        if token.trim().is_empty() {
            bail!("session token must not be empty; set [session].token or the token env var");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            token: token.to_owned(),
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetch_collection(&self, kind: CollectionKind) -> Result<Vec<Record>> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, kind.fetch_path()))
            .bearer_auth(&self.token)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let envelope: Value = response
            .json()
            .with_context(|| format!("decode {} list response", kind.label()))?;
        decode_collection(&envelope, kind)
    }

    pub fn fetch_record(&self, kind: CollectionKind, id: &RecordId) -> Result<Record> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, kind.fetch_by_id_path(id)))
            .bearer_auth(&self.token)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let envelope: Value = response
            .json()
            .with_context(|| format!("decode {} record response", kind.label()))?;
        decode_record(&envelope, kind)
    }

    /// Issues the panel delete for `id`. Success is any 2xx status; the
    /// response body is ignored.
    pub fn delete_record(&self, kind: CollectionKind, id: &RecordId) -> Result<()> {
        let Some(path) = kind.delete_path(id) else {
            bail!("{} records cannot be deleted from the panel", kind.label());
        };

        let response = self
            .http
            .delete(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }
        Ok(())
    }
}

fn decode_collection(envelope: &Value, kind: CollectionKind) -> Result<Vec<Record>> {
    let rows = envelope
        .get(kind.envelope_key())
        .and_then(Value::as_array)
        .ok_or_else(|| {
            anyhow!(
                "response is missing the {:?} collection array",
                kind.envelope_key()
            )
        })?;

    rows.iter()
        .map(|row| {
            Record::from_value(row.clone())
                .ok_or_else(|| anyhow!("{} record is missing a usable id", kind.label()))
        })
        .collect()
}

fn decode_record(envelope: &Value, kind: CollectionKind) -> Result<Record> {
    let value = envelope.get(kind.envelope_key()).ok_or_else(|| {
        anyhow!(
            "response is missing the {:?} record object",
            kind.envelope_key()
        )
    })?;
    Record::from_value(value.clone())
        .ok_or_else(|| anyhow!("{} record is missing a usable id", kind.label()))
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- verify backend.base_url and that the panel API is up ({} )",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<PanelErrorEnvelope>(body) {
        if let Some(message) = parsed.message.filter(|message| !message.is_empty()) {
            return anyhow!("server error ({}): {}", status.as_u16(), message);
        }
        if let Some(error) = parsed.error.filter(|error| !error.is_empty()) {
            return anyhow!("server error ({}): {}", status.as_u16(), error);
        }
    }

    if body.len() < 100 && !body.contains('{') && !body.trim().is_empty() {
        return anyhow!("server error ({}): {}", status.as_u16(), body.trim());
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct PanelErrorEnvelope {
    message: Option<String>,
    error: Option<String>,
}
