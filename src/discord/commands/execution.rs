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

pub async fn handle_fetch_count(
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let count = match licensing_client.fetch_execution_count().await {
		Ok(count) => count,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	let content = format!("Current Execution Count: {}", count);
	reply(http_client, message, &success_response("Execution Count", content)).await
}

pub async fn handle_push(
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let confirmation = match licensing_client.push_execution().await {
		Ok(confirmation) => confirmation,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	reply(http_client, message, &success_response("Execution Push", confirmation)).await
}
