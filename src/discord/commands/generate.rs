// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{parse_days, report_api_error};
use crate::discord::utils::responses::{reply, success_response};
use crate::licensing::{GenerateKeysParams, LicensingClient};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

/// Most keys a single generation command may mint.
const MAX_KEYS_PER_GENERATION: u32 = 100;

/// Handles all four generation commands. The command name selects premium
/// versus normal keys and the GET versus POST endpoint; everything else is
/// shared.
pub async fn handle_generation(
	command: &str,
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let is_premium = matches!(command, "genkey" | "genkeypost");
	let use_post = matches!(command, "genkeypost" | "gennormalkeypost");

	let Some(count) = args.first().and_then(|arg| arg.parse::<u32>().ok()) else {
		let usage = format!("❌ Please provide key count. Usage: `!{} <count> [note] [days]`", command);
		return reply(http_client, message, &usage).await;
	};
	if count > MAX_KEYS_PER_GENERATION {
		return reply(http_client, message, "❌ Maximum 100 keys can be generated at once.").await;
	}
	let note = match args.get(1) {
		Some(note) => String::from(*note),
		None => format!("Discord-{}", message.author.id),
	};
	let days = parse_days(args.get(2));

	let params = GenerateKeysParams {
		count,
		is_premium,
		note: note.clone(),
		days,
	};
	let generation_result = if use_post {
		licensing_client.generate_keys_post(&params).await
	} else {
		licensing_client.generate_keys(&params).await
	};
	let keys = match generation_result {
		Ok(keys) => keys,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	let mut key_list = String::new();
	for (index, key) in keys.iter().enumerate() {
		key_list.push_str(&format!("{}. {}\n", index + 1, key.value));
	}

	let kind = if is_premium { "" } else { "normal " };
	let content = format!(
		"Generated {} {}key(s):\n{}\nNote: {}\nExpires: {} days from creation\nPremium: {}\nHWID Validation: Enabled",
		count,
		kind,
		key_list,
		note,
		days,
		if is_premium { "Yes" } else { "No" }
	);
	let title = match (is_premium, use_post) {
		(true, false) => "Key Generation (GET)",
		(true, true) => "Key Generation (POST)",
		(false, false) => "Normal Key Generation (GET)",
		(false, true) => "Normal Key Generation (POST)",
	};
	reply(http_client, message, &success_response(title, content)).await
}
