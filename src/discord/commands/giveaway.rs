// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::utils::responses::{error_response, reply};
use crate::giveaway::{GiveawayEngine, GiveawayError, GiveawayParams, ManualEndOutcome};
use std::sync::Arc;
use std::time::Duration;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;
use twilight_model::id::Id;
use twilight_model::id::marker::MessageMarker;

const GIVEAWAY_USAGE: &str = "❌ Usage: `!giveaway <minutes> <keyCount> <itemName> [@riggedUser]`\n\nExample normal: `!giveaway 5 1 MyItem`\nExample rigged: `!giveaway 5 1 MyItem @User`";

pub async fn handle_giveaway(
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	giveaway_engine: &Arc<GiveawayEngine>,
) -> miette::Result<()> {
	let (Some(minutes_arg), Some(slots_arg), Some(item_name)) = (args.first(), args.get(1), args.get(2)) else {
		return reply(http_client, message, GIVEAWAY_USAGE).await;
	};
	let Some(minutes) = minutes_arg.parse::<u64>().ok().filter(|minutes| *minutes > 0) else {
		return reply(http_client, message, "❌ Duration must be a valid positive number.").await;
	};
	let Ok(winner_slots) = slots_arg.parse::<usize>() else {
		return reply(http_client, message, "❌ Key count must be between **1-10**.").await;
	};
	let rigged_winner = message.mentions.first().map(|mention| mention.id);

	let params = GiveawayParams {
		channel: message.channel_id,
		host: message.author.id,
		duration: Duration::from_secs(minutes * 60),
		winner_slots,
		item_name: String::from(*item_name),
		rigged_winner,
	};
	match giveaway_engine.create(params).await {
		Ok(_) => Ok(()),
		Err(GiveawayError::Validation(validation_message)) => {
			let validation_reply = format!("❌ {}", validation_message);
			reply(http_client, message, &validation_reply).await
		}
		Err(error) => {
			tracing::error!(source = ?error, "Could not start a giveaway");
			reply(http_client, message, &error_response("Error", error)).await
		}
	}
}

pub async fn handle_end(
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	giveaway_engine: &Arc<GiveawayEngine>,
) -> miette::Result<()> {
	let Some(id_arg) = args.first() else {
		return reply(http_client, message, "❌ Usage: `!end <messageId>`").await;
	};
	let announcement_id: Option<Id<MessageMarker>> = id_arg.parse::<u64>().ok().and_then(Id::new_checked);
	let Some(announcement_id) = announcement_id else {
		return reply(http_client, message, "❌ That doesn't look like a message ID.").await;
	};

	let end_reply = match giveaway_engine.manual_end(announcement_id, message.author.id).await {
		ManualEndOutcome::Ended => "✅ Giveaway ended manually.",
		ManualEndOutcome::AlreadyDrawing => "❌ That giveaway is already being drawn.",
		ManualEndOutcome::NotFound => "❌ No active giveaway was found for that message ID.",
	};
	reply(http_client, message, end_reply).await
}
