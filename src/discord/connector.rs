// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::giveaway::{ChatConnector, ConnectorError, Entrant};
use async_trait::async_trait;
use std::fmt::Display;
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_http::request::channel::reaction::RequestReactionType;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

/// Largest page Discord serves for a reaction's user list.
const REACTION_PAGE_LIMIT: u16 = 100;

/// The giveaway engine's view of Discord, implemented over the HTTP client.
pub struct DiscordChatConnector {
	http_client: Arc<Client>,
}

impl DiscordChatConnector {
	pub fn new(http_client: Arc<Client>) -> Self {
		Self { http_client }
	}
}

#[async_trait]
impl ChatConnector for DiscordChatConnector {
	async fn send_message(
		&self,
		channel: Id<ChannelMarker>,
		content: &str,
	) -> Result<Id<MessageMarker>, ConnectorError> {
		let response = self
			.http_client
			.create_message(channel)
			.content(content)
			.await
			.map_err(connector_error)?;
		let message = response.model().await.map_err(connector_error)?;
		Ok(message.id)
	}

	async fn add_reaction(
		&self,
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		emoji: &str,
	) -> Result<(), ConnectorError> {
		let emoji = RequestReactionType::Unicode { name: emoji };
		self.http_client
			.create_reaction(channel, message, &emoji)
			.await
			.map_err(connector_error)?;
		Ok(())
	}

	async fn reaction_users(
		&self,
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		emoji: &str,
	) -> Result<Vec<Entrant>, ConnectorError> {
		let emoji = RequestReactionType::Unicode { name: emoji };
		let mut entrants = Vec::new();
		let mut after: Option<Id<UserMarker>> = None;
		loop {
			let mut request = self
				.http_client
				.reactions(channel, message, &emoji)
				.limit(REACTION_PAGE_LIMIT);
			if let Some(after_user) = after {
				request = request.after(after_user);
			}
			let users = request
				.await
				.map_err(connector_error)?
				.models()
				.await
				.map_err(connector_error)?;
			let page_size = users.len();
			after = users.last().map(|user| user.id);
			entrants.extend(users.into_iter().map(|user| Entrant {
				user_id: user.id,
				is_bot: user.bot,
			}));
			if page_size < usize::from(REACTION_PAGE_LIMIT) {
				break;
			}
		}
		Ok(entrants)
	}

	async fn edit_message(
		&self,
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		content: &str,
	) -> Result<(), ConnectorError> {
		self.http_client
			.update_message(channel, message)
			.content(Some(content))
			.await
			.map_err(connector_error)?;
		Ok(())
	}
}

fn connector_error(error: impl Display) -> ConnectorError {
	ConnectorError::new(error.to_string())
}
