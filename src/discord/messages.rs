// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::commands::route_command;
use super::utils::responses::{GENERIC_ERROR_REPLY, reply};
use crate::config::ConfigData;
use crate::giveaway::GiveawayEngine;
use crate::licensing::LicensingClient;
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;
use twilight_model::id::Id;
use twilight_model::id::marker::RoleMarker;

pub const COMMAND_PREFIX: char = '!';

const DM_REJECTION: &str = "❌ This bot can only be used in servers, not in DMs.";
const MISSING_ROLE_REPLY: &str = "You do not have access to generate keys!";

/// The access gate and dispatch boundary for incoming messages. Anything a
/// command handler fails with is logged here and reported generically; the
/// gateway loop never sees it.
pub async fn handle_message(
	message: &Message,
	http_client: &Arc<Client>,
	config: &ConfigData,
	licensing_client: &Arc<LicensingClient>,
	giveaway_engine: &Arc<GiveawayEngine>,
) -> miette::Result<()> {
	if message.author.bot {
		return Ok(());
	}
	let Some((command, args)) = parse_command(&message.content) else {
		return Ok(());
	};

	if message.guild_id.is_none() {
		return reply(http_client, message, DM_REJECTION).await;
	}
	let command_role: Id<RoleMarker> = Id::new(config.discord.command_role);
	let has_command_role = message
		.member
		.as_ref()
		.is_some_and(|member| member.roles.contains(&command_role));
	if !has_command_role {
		tracing::info!(user = message.author.id.get(), command = %command, "Denied command access");
		return reply(http_client, message, MISSING_ROLE_REPLY).await;
	}

	tracing::info!(user = message.author.id.get(), command = %command, "Received command");

	let command_result = route_command(&command, &args, message, http_client, licensing_client, giveaway_engine).await;
	if let Err(error) = command_result {
		tracing::error!(source = ?error, command = %command, "An error occurred handling a command");
		reply(http_client, message, GENERIC_ERROR_REPLY).await?;
	}

	Ok(())
}

/// Splits a prefixed message into the lowercased command name and its
/// arguments. Messages without the prefix aren't commands at all.
fn parse_command(content: &str) -> Option<(String, Vec<&str>)> {
	let content = content.strip_prefix(COMMAND_PREFIX)?;
	let mut parts = content.split_whitespace();
	let command = parts.next()?.to_lowercase();
	Some((command, parts.collect()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordinary_messages_are_not_commands() {
		assert!(parse_command("hello there").is_none());
		assert!(parse_command("").is_none());
		assert!(parse_command("!").is_none());
	}

	#[test]
	fn command_name_is_lowercased() {
		let (command, args) = parse_command("!GenKey 5").expect("parses as a command");
		assert_eq!("genkey", command);
		assert_eq!(vec!["5"], args);
	}

	#[test]
	fn arguments_keep_their_order() {
		let (command, args) = parse_command("!giveaway 5 1 MyItem <@1234>").expect("parses as a command");
		assert_eq!("giveaway", command);
		assert_eq!(vec!["5", "1", "MyItem", "<@1234>"], args);
	}

	#[test]
	fn repeated_whitespace_is_collapsed() {
		let (command, args) = parse_command("!fetchkey   SOME-KEY").expect("parses as a command");
		assert_eq!("fetchkey", command);
		assert_eq!(vec!["SOME-KEY"], args);
	}
}
