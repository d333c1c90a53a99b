// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{parse_days, report_api_error};
use crate::discord::utils::responses::{reply, success_response};
use crate::licensing::{EditKeyParams, LicensingClient};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

pub async fn handle_fetch(
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let Some(key_value) = args.first() else {
		return reply(http_client, message, "❌ Please provide a key. Usage: `!fetchkey <key>`").await;
	};

	let key = match licensing_client.fetch_key(key_value).await {
		Ok(key) => key,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	let content = format!(
		"Key: {}\nID: {}\nPremium: {}\nNote: {}\nExpires: {}\nHWID: {}\nHWID Validation: {}",
		key.value_display(),
		key.id_display(),
		key.premium_display(),
		key.note_display(),
		key.expires_display(),
		key.hwid_display(),
		key.hwid_validation_display()
	);
	reply(http_client, message, &success_response("Key Information", content)).await
}

/// Handles `editkey` and `editgenkey`; the command name picks the endpoint
/// and the reply template.
pub async fn handle_edit(
	command: &str,
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let generated = command == "editgenkey";
	let Some(key_value) = args.first() else {
		let usage = format!("❌ Please provide a key. Usage: `!{} <key> [note] [isPremium] [days]`", command);
		return reply(http_client, message, &usage).await;
	};

	let note = args.get(1).map(|note| String::from(*note));
	let params = EditKeyParams {
		key_value: String::from(*key_value),
		note: note.unwrap_or_else(|| String::from("Edited via Discord Bot")),
		is_premium: args.get(2).map(|arg| *arg == "true").unwrap_or(true),
		days: parse_days(args.get(3)),
	};
	let edit_result = if generated {
		licensing_client.edit_generated_key(&params).await
	} else {
		licensing_client.edit_key(&params).await
	};
	let key = match edit_result {
		Ok(key) => key,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	let label = if generated { "Generated Key" } else { "Key" };
	let content = format!(
		"{}: {}\nNote: {}\nPremium: {}\nExpires: {}\nDays: {}\nHWID Validation: {}",
		label,
		key.value_display(),
		key.note_display(),
		key.premium_display(),
		key.expires_display(),
		key.days_display(),
		key.hwid_validation_display()
	);
	let title = if generated {
		"Generated Key Edit Success"
	} else {
		"Key Edit Success"
	};
	reply(http_client, message, &success_response(title, content)).await
}

/// Handles `deletekey` and `deletegenkey`.
pub async fn handle_delete(
	command: &str,
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let generated = command == "deletegenkey";
	let Some(key_value) = args.first() else {
		let usage = format!("❌ Please provide a key. Usage: `!{} <key>`", command);
		return reply(http_client, message, &usage).await;
	};

	let delete_result = if generated {
		licensing_client.delete_generated_key(key_value).await
	} else {
		licensing_client.delete_key(key_value).await
	};
	let confirmation = match delete_result {
		Ok(confirmation) => confirmation,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	let title = if generated { "Generated Key Deletion" } else { "Key Deletion" };
	reply(http_client, message, &success_response(title, confirmation)).await
}
