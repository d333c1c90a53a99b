// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::responses::{error_response, reply};
use crate::giveaway::GiveawayEngine;
use crate::licensing::{LicensingClient, LicensingError};
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

mod account;
mod execution;
mod generate;
mod giveaway;
mod help;
mod hwid;
mod keys;
mod whitelist;

pub async fn route_command(
	command: &str,
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
	giveaway_engine: &Arc<GiveawayEngine>,
) -> miette::Result<()> {
	match command {
		"giveaway" => giveaway::handle_giveaway(args, message, http_client, giveaway_engine).await,
		"end" => giveaway::handle_end(args, message, http_client, giveaway_engine).await,
		"genkey" | "genkeypost" | "gennormalkey" | "gennormalkeypost" => {
			generate::handle_generation(command, args, message, http_client, licensing_client).await
		}
		"fetchkey" => keys::handle_fetch(args, message, http_client, licensing_client).await,
		"editkey" | "editgenkey" => keys::handle_edit(command, args, message, http_client, licensing_client).await,
		"deletekey" | "deletegenkey" => keys::handle_delete(command, args, message, http_client, licensing_client).await,
		"resethwid" => hwid::handle_reset(args, message, http_client, licensing_client).await,
		"whitelist" => whitelist::handle_whitelist(args, message, http_client, licensing_client).await,
		"executioncount" => execution::handle_fetch_count(message, http_client, licensing_client).await,
		"pushexecution" => execution::handle_push(message, http_client, licensing_client).await,
		"userdata" => account::handle_user_data(message, http_client, licensing_client).await,
		"revenuemode" => account::handle_revenue_mode(args, message, http_client, licensing_client).await,
		"checkidentifier" => account::handle_check_identifier(args, message, http_client, licensing_client).await,
		"help" => help::handle_help(message, http_client).await,
		"manualsys" => help::handle_manual_system(message, http_client).await,
		_ => {
			let unknown_reply = format!(
				"❌ Unknown command: `!{}`\nUse `!help` to see available commands.",
				command
			);
			reply(http_client, message, &unknown_reply).await
		}
	}
}

/// Expiry applied when a command doesn't say how long its keys should last.
const DEFAULT_KEY_DAYS: u32 = 30;

/// Reads an optional day-count argument. Zero and unparsable values fall
/// back to the default the same way the missing argument does.
fn parse_days(arg: Option<&&str>) -> u32 {
	arg.and_then(|arg| arg.parse::<u32>().ok())
		.filter(|days| *days > 0)
		.unwrap_or(DEFAULT_KEY_DAYS)
}

/// Reports a failed licensing API call to the invoking user with the
/// normalized upstream message and logs the full error for operators.
async fn report_api_error(
	error: &LicensingError,
	message: &Message,
	http_client: &Client,
) -> miette::Result<()> {
	tracing::error!(source = ?error, "A licensing API call failed");
	reply(http_client, message, &error_response("Error", error)).await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn day_arguments_fall_back_to_the_default() {
		assert_eq!(7, parse_days(Some(&"7")));
		assert_eq!(DEFAULT_KEY_DAYS, parse_days(None));
		assert_eq!(DEFAULT_KEY_DAYS, parse_days(Some(&"0")));
		assert_eq!(DEFAULT_KEY_DAYS, parse_days(Some(&"soon")));
	}
}
