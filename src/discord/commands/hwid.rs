// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::report_api_error;
use crate::discord::utils::responses::{reply, success_response};
use crate::licensing::LicensingClient;
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

pub async fn handle_reset(
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let (Some(service), Some(key)) = (args.first(), args.get(1)) else {
		return reply(
			http_client,
			message,
			"❌ Please provide service and key. Usage: `!resethwid <service> <key>`",
		)
		.await;
	};

	let confirmation = match licensing_client.reset_hwid(service, key).await {
		Ok(confirmation) => confirmation,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	reply(http_client, message, &success_response("HWID Reset", confirmation)).await
}
