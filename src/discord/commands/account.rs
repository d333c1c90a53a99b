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

pub async fn handle_user_data(
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let user = match licensing_client.fetch_user().await {
		Ok(user) => user,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	let service = user.service.unwrap_or_default();
	let content = format!(
		"ID: {}\nUsername: {}\nService ID: {}\nService Identifier: {}",
		user.id.as_deref().unwrap_or("N/A"),
		user.username.as_deref().unwrap_or("N/A"),
		service.id.as_deref().unwrap_or("N/A"),
		service.identifier.as_deref().unwrap_or("N/A")
	);
	reply(http_client, message, &success_response("User Information", content)).await
}

pub async fn handle_revenue_mode(
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let Some(service) = args.first() else {
		return reply(
			http_client,
			message,
			"❌ Please provide a service identifier. Usage: `!revenuemode <service>`",
		)
		.await;
	};

	let revenue_mode = match licensing_client.fetch_revenue_mode(service).await {
		Ok(revenue_mode) => revenue_mode,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	let content = format!("Service: {}\nRevenue Mode: {}", service, revenue_mode);
	reply(http_client, message, &success_response("Revenue Mode", content)).await
}

pub async fn handle_check_identifier(
	args: &[&str],
	message: &Message,
	http_client: &Arc<Client>,
	licensing_client: &Arc<LicensingClient>,
) -> miette::Result<()> {
	let Some(identifier) = args.first() else {
		return reply(
			http_client,
			message,
			"❌ Please provide an identifier. Usage: `!checkidentifier <identifier>`",
		)
		.await;
	};

	let check_message = match licensing_client.check_identifier(identifier).await {
		Ok(check_message) => check_message,
		Err(error) => return report_api_error(&error, message, http_client).await,
	};

	reply(http_client, message, &success_response("Identifier Check", check_message)).await
}
