// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use knus::Decode;
use miette::{IntoDiagnostic, Result};
use tokio::fs::read_to_string;

pub async fn parse_config(config_path: &str) -> Result<ConfigData> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let config = knus::parse(config_path, &config_file_contents)?;
	Ok(config)
}

#[derive(Debug, Decode)]
pub struct ConfigData {
	#[knus(child)]
	pub discord: DiscordConfig,
	#[knus(child)]
	pub licensing: LicensingConfig,
	#[knus(child)]
	pub web: WebConfig,
}

#[derive(Debug, Decode)]
pub struct DiscordConfig {
	#[knus(child, unwrap(argument))]
	pub bot_token: String,
	/// Role whose members are allowed to run commands.
	#[knus(child, unwrap(argument))]
	pub command_role: u64,
}

#[derive(Debug, Decode)]
pub struct LicensingConfig {
	#[knus(child, unwrap(argument))]
	pub base_url: String,
	#[knus(child, unwrap(argument))]
	pub api_key: String,
}

#[derive(Debug, Decode)]
pub struct WebConfig {
	#[knus(child, unwrap(argument))]
	pub bind_addr: String,
}
