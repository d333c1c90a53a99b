// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use std::fmt;
use twilight_http::client::Client;
use twilight_http::error::Error;
use twilight_http::response::DeserializeBodyError;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;

/// Error data for direct-messaging a user. Covers both opening the private
/// channel and delivering the message; users with DMs closed surface here as
/// an HTTP error.
#[derive(Debug, Diagnostic)]
pub enum DirectMessageError {
	Http(Error),
	Deserialize(DeserializeBodyError),
}

impl From<Error> for DirectMessageError {
	fn from(error: Error) -> Self {
		Self::Http(error)
	}
}

impl From<DeserializeBodyError> for DirectMessageError {
	fn from(error: DeserializeBodyError) -> Self {
		Self::Deserialize(error)
	}
}

impl std::error::Error for DirectMessageError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Http(error) => Some(error),
			Self::Deserialize(error) => Some(error),
		}
	}
}

impl fmt::Display for DirectMessageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http(error) => write!(f, "HTTP error: {}", error),
			Self::Deserialize(error) => write!(f, "deserialization error: {}", error),
		}
	}
}

/// Sends a direct message to a single user.
pub async fn send_direct_message(
	http_client: &Client,
	user_id: Id<UserMarker>,
	content: &str,
) -> Result<(), DirectMessageError> {
	let channel_response = http_client.create_private_channel(user_id).await?;
	let channel = channel_response.model().await?;
	http_client.create_message(channel.id).content(content).await?;
	Ok(())
}
