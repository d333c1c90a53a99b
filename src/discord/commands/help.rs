// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::utils::responses::reply;
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::channel::message::Message;

const HELP_TEXT: &str = "**🤖 License Management Bot Commands**

**User & Service Management:**
`!userdata` - Get current user information
`!revenuemode <service>` - Check revenue mode for a service
`!checkidentifier <identifier>` - Validate an identifier

**Key Management:**
`!whitelist @user [days|lifetime]` - Generate key and DM to user
`!genkey <count> [note] [days]` - Generate premium license key(s)
`!genkeypost <count> [note] [days]` - Generate premium keys via POST
`!gennormalkey <count> [note] [days]` - Generate normal license key(s)
`!gennormalkeypost <count> [note] [days]` - Generate normal keys via POST
`!fetchkey <key>` - Look up a key
`!editkey <key> [note] [isPremium] [days]` - Edit a key
`!editgenkey <key> [note] [isPremium] [days]` - Edit a generated key
`!deletekey <key>` - Delete a key
`!deletegenkey <key>` - Delete a generated key

**HWID & Execution:**
`!resethwid <service> <key>` - Reset HWID
`!executioncount` - Fetch execution count
`!pushexecution` - Push execution count

**Giveaways:**
`!giveaway <minutes> <keyCount> <itemName> [@riggedUser]` - Start a key giveaway
`!end <messageId>` - End a giveaway early

**Other:**
`!manualsys` - Manual system instructions
`!help` - Show this help message";

const MANUAL_SYSTEM_TEXT: &str = "Hello, please complete the manual key system with the link below and join the server it leads to, then show proof of completion and click on the checkpoint 2 channel and complete the second checkpoint:\nhttps://rinku.pro/manual1";

pub async fn handle_help(message: &Message, http_client: &Arc<Client>) -> miette::Result<()> {
	reply(http_client, message, HELP_TEXT).await
}

pub async fn handle_manual_system(message: &Message, http_client: &Arc<Client>) -> miette::Result<()> {
	reply(http_client, message, MANUAL_SYSTEM_TEXT).await
}
