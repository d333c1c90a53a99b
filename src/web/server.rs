// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use axum::Router;
use axum::routing::get;
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Runs the keep-alive status server. Its failure is logged but never takes
/// the bot down with it.
pub async fn run_server_task(config: Arc<ConfigData>) {
	let task_result = run_server(config).await;
	if let Err(error) = task_result {
		tracing::error!(source = ?error, "Web server failed to run");
	}
}

async fn run_server(config: Arc<ConfigData>) -> miette::Result<()> {
	let app = Router::new().route("/", get(status_page));

	tracing::info!("Listening on http://{}", &config.web.bind_addr);
	let listener = TcpListener::bind(&config.web.bind_addr).await.into_diagnostic()?;
	axum::serve(listener, app.into_make_service()).await.into_diagnostic()?;

	Ok(())
}

async fn status_page() -> &'static str {
	"Bot is running!"
}
