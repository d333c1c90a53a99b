// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::{DiscordChatConnector, run_bot, set_up_client};
use crate::giveaway::{ChatConnector, GiveawayEngine};
use crate::licensing::LicensingClient;
use std::sync::Arc;

mod config;
mod discord;
mod giveaway;
mod licensing;
mod web;

#[tokio::main]
async fn main() -> miette::Result<()> {
	tracing_subscriber::fmt().init();

	let config = Arc::new(config::parse_config("config.kdl").await?);

	let licensing_client = Arc::new(LicensingClient::new(
		config.licensing.base_url.clone(),
		config.licensing.api_key.clone(),
	)?);
	let http_client = set_up_client(&config);
	let connector: Arc<dyn ChatConnector> = Arc::new(DiscordChatConnector::new(Arc::clone(&http_client)));
	let giveaway_engine = Arc::new(GiveawayEngine::new(connector, Arc::clone(&licensing_client)));

	tokio::spawn(web::run_server_task(Arc::clone(&config)));

	run_bot(config, http_client, licensing_client, giveaway_engine).await
}
