// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use miette::Diagnostic;
use std::fmt;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

/// A user pulled from the announcement's entry reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrant {
	pub user_id: Id<UserMarker>,
	pub is_bot: bool,
}

/// Error data for chat operations. Implementations reduce their platform
/// error to a message so the engine stays platform-independent.
#[derive(Debug, Diagnostic)]
pub struct ConnectorError {
	message: String,
}

impl ConnectorError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

impl std::error::Error for ConnectorError {}

impl fmt::Display for ConnectorError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.message)
	}
}

/// The chat operations the giveaway engine consumes: announce, mark the
/// announcement for entry, read back the entrants, and amend the
/// announcement. Everything else the bot does with chat happens in the
/// platform layer directly.
#[async_trait]
pub trait ChatConnector: Send + Sync {
	async fn send_message(&self, channel: Id<ChannelMarker>, content: &str)
	-> Result<Id<MessageMarker>, ConnectorError>;

	async fn add_reaction(
		&self,
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		emoji: &str,
	) -> Result<(), ConnectorError>;

	async fn reaction_users(
		&self,
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		emoji: &str,
	) -> Result<Vec<Entrant>, ConnectorError>;

	async fn edit_message(
		&self,
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		content: &str,
	) -> Result<(), ConnectorError>;
}
