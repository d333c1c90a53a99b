// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::IntoDiagnostic;
use std::fmt::Display;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

pub const GENERIC_ERROR_REPLY: &str = "❌ An unexpected error occurred while processing your command.";

/// A titled success block with the formatted fields in a code fence.
pub fn success_response(title: impl Display, content: impl Display) -> String {
	format!("✅ **{}**\n```\n{}\n```", title, content)
}

/// Same block shape as a success, flagged as a failure.
pub fn error_response(title: impl Display, content: impl Display) -> String {
	format!("❌ **{}**\n```\n{}\n```", title, content)
}

/// Replies to the invoking message in its channel.
pub async fn reply(http_client: &Client, message: &Message, content: &str) -> miette::Result<()> {
	http_client
		.create_message(message.channel_id)
		.reply(message.id)
		.content(content)
		.await
		.into_diagnostic()?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn success_response_wraps_content_in_a_code_fence() {
		let response = success_response("Key Information", "Key: ABC-123\nPremium: Yes");
		assert_eq!("✅ **Key Information**\n```\nKey: ABC-123\nPremium: Yes\n```", response);
	}

	#[test]
	fn error_response_uses_the_failure_marker() {
		let response = error_response("Error", "Key not found");
		assert_eq!("❌ **Error**\n```\nKey not found\n```", response);
	}
}
