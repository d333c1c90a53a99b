// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{parse_days, report_api_error};
use crate::discord::utils::responses::{error_response, reply, success_response};
use crate::discord::utils::users::send_direct_message;
use crate::licensing::{GenerateKeysParams, LicensingClient};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

/// Stand-in for a key that never expires; the API has no real lifetime flag.
const LIFETIME_DAYS: u32 = 36500;

/// Generates one premium key for the mentioned user and delivers it by DM.
/// A key that is minted but undeliverable is echoed back to the invoker so
/// it can be shared manually instead of being lost.
pub async fn handle_whitelist(
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let Some(target) = message.mentions.first() else {
		return reply(
			http_client,
			message,
			"❌ Please mention a user. Usage: `!whitelist @user [days|lifetime]`",
		)
		.await;
	};

	let lifetime = args
		.get(1)
		.is_some_and(|arg| arg.eq_ignore_ascii_case("lifetime"));
	let days = if lifetime { LIFETIME_DAYS } else { parse_days(args.get(1)) };
	let note = if lifetime {
		format!("{} premium whitelist", target.id)
	} else {
		format!("Discord-{}", target.id)
	};

	let params = GenerateKeysParams {
		count: 1,
		is_premium: true,
		note,
		days,
	};
	let keys = match licensing_client.generate_keys(&params).await {
		Ok(keys) => keys,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};
	let Some(key) = keys.first() else {
		return report_api_error(
			&crate::licensing::LicensingError::api("The API returned no generated key"),
			message,
			http_client,
		)
		.await;
	};

	let validity = if lifetime {
		String::from("♾️ Lifetime access")
	} else {
		format!("⏰ Valid for {} days", days)
	};
	let direct_message = format!(
		"🎉 You have been whitelisted!\n\n🔑 **Your Key:** {}\n\n{}\n\nEnjoy!",
		key.value, validity
	);

	match send_direct_message(http_client, target.id, &direct_message).await {
		Ok(()) => {
			let content = format!("User: {}\nKey sent via DM\n{}", target.name, validity);
			reply(http_client, message, &success_response("Whitelist Success", content)).await
		}
		Err(error) => {
			tracing::warn!(source = ?error, user = target.id.get(), "Could not DM a whitelist key");
			let content = format!(
				"Key generated but couldn't DM user.\nKey: {}\nPlease share manually.",
				key.value
			);
			reply(http_client, message, &error_response("Whitelist - DM Failed", content)).await
		}
	}
}
