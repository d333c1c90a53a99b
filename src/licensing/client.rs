// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::types::{EditKeyParams, GenerateKeysParams, GeneratedKey, LicenseKey, UserProfile};
use chrono::{Days, SecondsFormat, Utc};
use miette::Diagnostic;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Upper bound on any single call to the licensing API.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Error data for licensing API calls. `Api` carries the message the remote
/// service reported for a request it rejected; `Transport` covers everything
/// below that (connect, timeout, body decode).
#[derive(Debug, Diagnostic)]
pub enum LicensingError {
	Api { message: String },
	Transport(reqwest::Error),
}

impl LicensingError {
	pub fn api(message: impl Into<String>) -> Self {
		Self::Api {
			message: message.into(),
		}
	}
}

impl From<reqwest::Error> for LicensingError {
	fn from(error: reqwest::Error) -> Self {
		Self::Transport(error)
	}
}

impl std::error::Error for LicensingError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Api { .. } => None,
			Self::Transport(error) => Some(error),
		}
	}
}

impl fmt::Display for LicensingError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Api { message } => write!(f, "{}", message),
			Self::Transport(error) => write!(f, "{}", error),
		}
	}
}

/// Typed client for the remote licensing API; one method per endpoint.
pub struct LicensingClient {
	http: reqwest::Client,
	base_url: String,
	api_key: String,
}

impl LicensingClient {
	pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LicensingError> {
		let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
		let mut base_url = base_url.into();
		while base_url.ends_with('/') {
			base_url.pop();
		}
		Ok(Self {
			http,
			base_url,
			api_key: api_key.into(),
		})
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	pub async fn generate_keys(&self, params: &GenerateKeysParams) -> Result<Vec<GeneratedKey>, LicensingError> {
		let request = self.generation_request(params)?;
		let response = self
			.http
			.get(self.endpoint("/generate-key/get"))
			.query(&request)
			.send()
			.await?;
		let body: GenerateKeysResponse = read_body(response).await?;
		Ok(body.generated_keys)
	}

	pub async fn generate_keys_post(&self, params: &GenerateKeysParams) -> Result<Vec<GeneratedKey>, LicensingError> {
		let request = self.generation_request(params)?;
		let response = self
			.http
			.post(self.endpoint("/generate-key/post"))
			.json(&request)
			.send()
			.await?;
		let body: GenerateKeysResponse = read_body(response).await?;
		Ok(body.generated_keys)
	}

	pub async fn fetch_key(&self, key: &str) -> Result<LicenseKey, LicensingError> {
		let request = FetchKeyRequest {
			api_key: &self.api_key,
			fetch: key,
		};
		let response = self.http.get(self.endpoint("/fetch/key")).query(&request).send().await?;
		let body: KeyEnvelope = read_body(response).await?;
		Ok(body.key)
	}

	pub async fn edit_key(&self, params: &EditKeyParams) -> Result<LicenseKey, LicensingError> {
		let request = self.edit_request(params);
		let response = self.http.post(self.endpoint("/key/edit")).json(&request).send().await?;
		let body: KeyEnvelope = read_body(response).await?;
		Ok(body.key)
	}

	pub async fn edit_generated_key(&self, params: &EditKeyParams) -> Result<LicenseKey, LicensingError> {
		let request = self.edit_request(params);
		let response = self
			.http
			.post(self.endpoint("/generated-key/edit"))
			.json(&request)
			.send()
			.await?;
		let body: GeneratedKeyEnvelope = read_body(response).await?;
		Ok(body.generated_key)
	}

	pub async fn delete_key(&self, key: &str) -> Result<String, LicensingError> {
		let request = KeyDeleteRequest {
			api_key: &self.api_key,
			key_value: key,
		};
		let response = self.http.post(self.endpoint("/key/delete")).json(&request).send().await?;
		let body: MessageResponse = read_body(response).await?;
		Ok(body.message)
	}

	pub async fn delete_generated_key(&self, key: &str) -> Result<String, LicensingError> {
		let request = KeyDeleteRequest {
			api_key: &self.api_key,
			key_value: key,
		};
		let response = self
			.http
			.post(self.endpoint("/generated-key/delete"))
			.json(&request)
			.send()
			.await?;
		let body: MessageResponse = read_body(response).await?;
		Ok(body.message)
	}

	/// Resets the HWID binding for a key. This endpoint authenticates by
	/// service and key value rather than by API key.
	pub async fn reset_hwid(&self, service: &str, key: &str) -> Result<String, LicensingError> {
		let request = ResetHwidRequest { service, key };
		let response = self.http.get(self.endpoint("/reset-hwid")).query(&request).send().await?;
		let body: MessageResponse = read_body(response).await?;
		Ok(body.message)
	}

	pub async fn fetch_execution_count(&self) -> Result<u64, LicensingError> {
		let request = ApiKeyRequest { api_key: &self.api_key };
		let response = self
			.http
			.get(self.endpoint("/execution/fetch"))
			.query(&request)
			.send()
			.await?;
		let body: ExecutionCountResponse = read_body(response).await?;
		Ok(body.execution_count)
	}

	pub async fn push_execution(&self) -> Result<String, LicensingError> {
		let request = ApiKeyRequest { api_key: &self.api_key };
		let response = self
			.http
			.post(self.endpoint("/execution/push"))
			.json(&request)
			.send()
			.await?;
		let body: MessageResponse = read_body(response).await?;
		Ok(body.message)
	}

	pub async fn fetch_user(&self) -> Result<UserProfile, LicensingError> {
		let request = ApiKeyRequest { api_key: &self.api_key };
		let response = self.http.get(self.endpoint("/user")).query(&request).send().await?;
		read_body(response).await
	}

	pub async fn fetch_revenue_mode(&self, service: &str) -> Result<String, LicensingError> {
		let request = RevenueModeRequest {
			api_key: &self.api_key,
			service,
		};
		let response = self.http.get(self.endpoint("/revenue-mode")).query(&request).send().await?;
		let body: RevenueModeResponse = read_body(response).await?;
		Ok(body.revenue_mode)
	}

	pub async fn check_identifier(&self, identifier: &str) -> Result<String, LicensingError> {
		let request = IdentifierCheckRequest {
			api_key: &self.api_key,
			identifier,
		};
		let response = self
			.http
			.get(self.endpoint("/identifier-check"))
			.query(&request)
			.send()
			.await?;
		let body: MessageResponse = read_body(response).await?;
		Ok(body.message)
	}

	fn generation_request<'a>(&'a self, params: &'a GenerateKeysParams) -> Result<KeyGenerationRequest<'a>, LicensingError> {
		Ok(KeyGenerationRequest {
			api_key: &self.api_key,
			count: params.count,
			is_premium: params.is_premium,
			note: &params.note,
			expire: expiry_timestamp(params.days)?,
			expires_by_days_key: true,
			days_key: params.days,
			no_hwid_validation: false,
		})
	}

	fn edit_request<'a>(&'a self, params: &'a EditKeyParams) -> KeyEditRequest<'a> {
		KeyEditRequest {
			api_key: &self.api_key,
			key_value: &params.key_value,
			note: &params.note,
			is_premium: params.is_premium,
			expires_by_days_key: true,
			days_key: params.days,
			no_hwid_validation: false,
		}
	}
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, LicensingError> {
	let status = response.status();
	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		return Err(LicensingError::api(failure_message(status, &body)));
	}
	Ok(response.json().await?)
}

/// Extracts the most specific failure message available from a rejected
/// response: the API's `message` field, then its `error` field, then a
/// status-line summary for bodies with neither.
fn failure_message(status: StatusCode, body: &str) -> String {
	if let Ok(value) = serde_json::from_str::<Value>(body) {
		if let Some(message) = value.get("message").and_then(Value::as_str) {
			return message.to_string();
		}
		if let Some(error) = value.get("error").and_then(Value::as_str) {
			return error.to_string();
		}
	}
	format!("Request failed with status code {}", status.as_u16())
}

fn expiry_timestamp(days: u32) -> Result<String, LicensingError> {
	let expires_at = Utc::now()
		.checked_add_days(Days::new(u64::from(days)))
		.ok_or_else(|| LicensingError::api("Key expiry is out of range"))?;
	Ok(expires_at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyGenerationRequest<'a> {
	api_key: &'a str,
	count: u32,
	is_premium: bool,
	note: &'a str,
	expire: String,
	expires_by_days_key: bool,
	days_key: u32,
	no_hwid_validation: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchKeyRequest<'a> {
	api_key: &'a str,
	fetch: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyEditRequest<'a> {
	api_key: &'a str,
	key_value: &'a str,
	note: &'a str,
	is_premium: bool,
	expires_by_days_key: bool,
	days_key: u32,
	no_hwid_validation: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyDeleteRequest<'a> {
	api_key: &'a str,
	key_value: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetHwidRequest<'a> {
	service: &'a str,
	key: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiKeyRequest<'a> {
	api_key: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RevenueModeRequest<'a> {
	api_key: &'a str,
	service: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifierCheckRequest<'a> {
	api_key: &'a str,
	identifier: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateKeysResponse {
	generated_keys: Vec<GeneratedKey>,
}

#[derive(Debug, Deserialize)]
struct KeyEnvelope {
	key: LicenseKey,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedKeyEnvelope {
	generated_key: LicenseKey,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
	message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionCountResponse {
	execution_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RevenueModeResponse {
	revenue_mode: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failure_message_prefers_structured_message() {
		let body = r#"{"message": "Key not found", "error": "ignored"}"#;
		assert_eq!(failure_message(StatusCode::NOT_FOUND, body), "Key not found");
	}

	#[test]
	fn failure_message_falls_back_to_error_field() {
		let body = r#"{"error": "Invalid API key"}"#;
		assert_eq!(failure_message(StatusCode::UNAUTHORIZED, body), "Invalid API key");
	}

	#[test]
	fn failure_message_reports_status_for_unusable_bodies() {
		assert_eq!(
			failure_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
			"Request failed with status code 500"
		);
		assert_eq!(
			failure_message(StatusCode::BAD_GATEWAY, r#"{"detail": "nope"}"#),
			"Request failed with status code 502"
		);
	}
}
