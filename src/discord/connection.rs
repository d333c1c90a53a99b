// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::messages::handle_message;
use crate::config::ConfigData;
use crate::giveaway::GiveawayEngine;
use crate::licensing::LicensingClient;
use miette::IntoDiagnostic;
use std::sync::Arc;
use twilight_gateway::{ConfigBuilder, EventTypeFlags, Intents, Shard, ShardId, StreamExt};
use twilight_http::client::Client;
use twilight_model::gateway::event::Event;
use twilight_model::gateway::payload::outgoing::update_presence::UpdatePresencePayload;
use twilight_model::gateway::presence::{ActivityType, MinimalActivity, Status};

pub fn set_up_client(config: &ConfigData) -> Arc<Client> {
	Arc::new(Client::new(config.discord.bot_token.clone()))
}

pub async fn run_bot(
	config: Arc<ConfigData>,
	http_client: Arc<Client>,
	licensing_client: Arc<LicensingClient>,
	giveaway_engine: Arc<GiveawayEngine>,
) -> miette::Result<()> {
	let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

	let watching_activity = MinimalActivity {
		kind: ActivityType::Watching,
		name: String::from("Comphub"),
		url: None,
	};
	let presence =
		UpdatePresencePayload::new(vec![watching_activity.into()], false, None, Status::Online).into_diagnostic()?;

	let shard_config = ConfigBuilder::new(config.discord.bot_token.clone(), intents)
		.presence(presence)
		.build();
	let mut shard = Shard::with_config(ShardId::ONE, shard_config);

	while let Some(event) = shard.next_event(EventTypeFlags::all()).await {
		let event = match event {
			Ok(event) => event,
			Err(error) => {
				tracing::warn!(source = ?error, "error receiving event");
				continue;
			}
		};

		tokio::spawn(handle_event(
			event,
			Arc::clone(&http_client),
			Arc::clone(&config),
			Arc::clone(&licensing_client),
			Arc::clone(&giveaway_engine),
		));
	}

	Ok(())
}

async fn handle_event(
	event: Event,
	http_client: Arc<Client>,
	config: Arc<ConfigData>,
	licensing_client: Arc<LicensingClient>,
	giveaway_engine: Arc<GiveawayEngine>,
) {
	let event_result = handle_event_route(event, &http_client, &config, &licensing_client, &giveaway_engine).await;
	if let Err(error) = event_result {
		tracing::error!(source = ?error, "An error occurred handling a gateway event");
	}
}

async fn handle_event_route(
	event: Event,
	http_client: &Arc<Client>,
	config: &ConfigData,
	licensing_client: &Arc<LicensingClient>,
	giveaway_engine: &Arc<GiveawayEngine>,
) -> miette::Result<()> {
	match event {
		Event::MessageCreate(message) => {
			handle_message(&message.0, http_client, config, licensing_client, giveaway_engine).await?
		}
		Event::Ready(_) => {
			tracing::info!("Discord gateway is ready");
		}
		_ => (),
	}
	Ok(())
}
