// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Parameters for a key generation request. The expiry sent to the API is
/// derived from `days` at request time.
#[derive(Debug, Clone)]
pub struct GenerateKeysParams {
	pub count: u32,
	pub is_premium: bool,
	pub note: String,
	pub days: u32,
}

/// Parameters for editing an existing key or generated key.
#[derive(Debug, Clone)]
pub struct EditKeyParams {
	pub key_value: String,
	pub note: String,
	pub is_premium: bool,
	pub days: u32,
}

/// A single key minted by a generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedKey {
	pub value: String,
}

/// A license key record as returned by the fetch and edit endpoints. The API
/// omits fields it has no value for, so everything optional defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseKey {
	pub value: Option<String>,
	pub id: Option<String>,
	pub is_premium: bool,
	pub note: Option<String>,
	pub expires_at: Option<DateTime<Utc>>,
	pub hwid: Option<String>,
	pub days_key: Option<u32>,
	pub no_hwid_validation: bool,
}

impl LicenseKey {
	pub fn value_display(&self) -> &str {
		self.value.as_deref().unwrap_or("N/A")
	}

	pub fn id_display(&self) -> &str {
		self.id.as_deref().unwrap_or("N/A")
	}

	pub fn note_display(&self) -> &str {
		self.note.as_deref().unwrap_or("None")
	}

	pub fn hwid_display(&self) -> &str {
		self.hwid.as_deref().unwrap_or("Not set")
	}

	pub fn premium_display(&self) -> &'static str {
		if self.is_premium { "Yes" } else { "No" }
	}

	pub fn expires_display(&self) -> String {
		match self.expires_at {
			Some(expires_at) => expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
			None => String::from("Never"),
		}
	}

	pub fn days_display(&self) -> String {
		match self.days_key {
			Some(days) => days.to_string(),
			None => String::from("N/A"),
		}
	}

	pub fn hwid_validation_display(&self) -> &'static str {
		if self.no_hwid_validation { "Disabled" } else { "Enabled" }
	}
}

/// The account record behind the configured API key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserProfile {
	pub id: Option<String>,
	pub username: Option<String>,
	pub service: Option<UserService>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserService {
	pub id: Option<String>,
	pub identifier: Option<String>,
}
