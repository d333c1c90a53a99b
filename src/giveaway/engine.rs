// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::connector::{ChatConnector, ConnectorError};
use super::draw::draw_winners;
use crate::licensing::{GenerateKeysParams, LicensingClient, LicensingError};
use miette::Diagnostic;
use rand::thread_rng;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use twilight_mention::fmt::Mention;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

/// Reaction users add to the announcement to enter the draw.
pub const ENTRY_EMOJI: &str = "🎁";
/// Most winner slots a single giveaway can have.
pub const MAX_WINNER_SLOTS: usize = 10;
/// Validity of the prize keys minted at creation.
const PRIZE_KEY_DAYS: u32 = 30;

/// What a giveaway needs to get started.
#[derive(Debug)]
pub struct GiveawayParams {
	pub channel: Id<ChannelMarker>,
	pub host: Id<UserMarker>,
	pub duration: Duration,
	pub winner_slots: usize,
	pub item_name: String,
	pub rigged_winner: Option<Id<UserMarker>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GiveawayPhase {
	Open,
	Drawing,
}

/// One live giveaway. An instance leaves the registry when it ends, whether
/// by draw, by empty entry pool, or by manual end.
#[derive(Debug, Clone)]
struct GiveawayInstance {
	channel: Id<ChannelMarker>,
	winner_slots: usize,
	item_name: String,
	rigged_winner: Option<Id<UserMarker>>,
	prize_keys: Vec<String>,
	phase: GiveawayPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualEndOutcome {
	Ended,
	AlreadyDrawing,
	NotFound,
}

/// Error data for giveaway creation and completion.
#[derive(Debug, Diagnostic)]
pub enum GiveawayError {
	Validation(String),
	Licensing(LicensingError),
	Connector(ConnectorError),
}

impl From<LicensingError> for GiveawayError {
	fn from(error: LicensingError) -> Self {
		Self::Licensing(error)
	}
}

impl From<ConnectorError> for GiveawayError {
	fn from(error: ConnectorError) -> Self {
		Self::Connector(error)
	}
}

impl std::error::Error for GiveawayError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Validation(_) => None,
			Self::Licensing(error) => Some(error),
			Self::Connector(error) => Some(error),
		}
	}
}

impl fmt::Display for GiveawayError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Validation(message) => write!(f, "{}", message),
			Self::Licensing(error) => write!(f, "{}", error),
			Self::Connector(error) => write!(f, "{}", error),
		}
	}
}

/// Runs every live giveaway: generates the prize keys up front, announces,
/// collects entrants over the reaction, and draws the winners when the
/// window closes or a manual end arrives first.
pub struct GiveawayEngine {
	connector: Arc<dyn ChatConnector>,
	licensing_client: Arc<LicensingClient>,
	live: RwLock<HashMap<Id<MessageMarker>, GiveawayInstance>>,
}

impl GiveawayEngine {
	pub fn new(connector: Arc<dyn ChatConnector>, licensing_client: Arc<LicensingClient>) -> Self {
		Self {
			connector,
			licensing_client,
			live: RwLock::new(HashMap::new()),
		}
	}

	/// Starts a giveaway: validates the parameters, mints one prize key per
	/// winner slot, posts the announcement with the entry reaction, and arms
	/// the draw timer. No announcement is ever posted without the prize keys
	/// already in hand.
	pub async fn create(self: &Arc<Self>, params: GiveawayParams) -> Result<Id<MessageMarker>, GiveawayError> {
		if params.duration.is_zero() {
			return Err(GiveawayError::Validation(String::from(
				"Duration must be a valid positive number.",
			)));
		}
		if params.winner_slots == 0 || params.winner_slots > MAX_WINNER_SLOTS {
			return Err(GiveawayError::Validation(String::from(
				"Key count must be between **1-10**.",
			)));
		}
		if params.item_name.is_empty() {
			return Err(GiveawayError::Validation(String::from("An item name is required.")));
		}

		let key_request = GenerateKeysParams {
			count: params.winner_slots as u32,
			is_premium: true,
			note: format!("Giveaway-{}", params.host),
			days: PRIZE_KEY_DAYS,
		};
		let keys = self.licensing_client.generate_keys(&key_request).await?;
		if keys.len() != params.winner_slots {
			return Err(LicensingError::api(format!(
				"Expected {} generated keys but received {}",
				params.winner_slots,
				keys.len()
			))
			.into());
		}
		let prize_keys: Vec<String> = keys.into_iter().map(|key| key.value).collect();

		let announcement_id = self
			.connector
			.send_message(params.channel, &announcement_text(&params))
			.await?;
		self.connector
			.add_reaction(params.channel, announcement_id, ENTRY_EMOJI)
			.await?;

		let instance = GiveawayInstance {
			channel: params.channel,
			winner_slots: params.winner_slots,
			item_name: params.item_name,
			rigged_winner: params.rigged_winner,
			prize_keys,
			phase: GiveawayPhase::Open,
		};
		self.live.write().await.insert(announcement_id, instance);

		tracing::info!(
			announcement = announcement_id.get(),
			winner_slots = params.winner_slots,
			rigged = params.rigged_winner.is_some(),
			"Started giveaway"
		);

		let engine = Arc::clone(self);
		let duration = params.duration;
		tokio::spawn(async move {
			sleep(duration).await;
			engine.run_draw(announcement_id).await;
		});

		Ok(announcement_id)
	}

	/// Ends a giveaway before its timer fires. The removal under the
	/// registry lock is what suppresses the timer; when it fires later, its
	/// claim finds nothing.
	pub async fn manual_end(&self, announcement_id: Id<MessageMarker>, requester: Id<UserMarker>) -> ManualEndOutcome {
		let instance = {
			let mut live = self.live.write().await;
			match live.entry(announcement_id) {
				Entry::Occupied(entry) => match entry.get().phase {
					GiveawayPhase::Open => entry.remove(),
					GiveawayPhase::Drawing => return ManualEndOutcome::AlreadyDrawing,
				},
				Entry::Vacant(_) => return ManualEndOutcome::NotFound,
			}
		};

		let notice = format!(
			"🎉 **GIVEAWAY ENDED!** 🎉\n\nThe giveaway for **{}** was ended manually by {}. No winners were drawn.",
			instance.item_name,
			requester.mention()
		);
		if let Err(error) = self
			.connector
			.edit_message(instance.channel, announcement_id, &notice)
			.await
		{
			tracing::warn!(source = ?error, "Could not edit the announcement of a manually ended giveaway");
		}
		ManualEndOutcome::Ended
	}

	async fn run_draw(&self, announcement_id: Id<MessageMarker>) {
		if let Err(error) = self.finish_giveaway(announcement_id).await {
			tracing::error!(source = ?error, "An error occurred completing a giveaway");
		}
	}

	async fn finish_giveaway(&self, announcement_id: Id<MessageMarker>) -> Result<(), GiveawayError> {
		let Some(instance) = self.begin_draw(announcement_id).await else {
			return Ok(());
		};

		let entrants = match self
			.connector
			.reaction_users(instance.channel, announcement_id, ENTRY_EMOJI)
			.await
		{
			Ok(entrants) => entrants,
			Err(error) => {
				self.remove(announcement_id).await;
				let notice = format!("❌ Could not fetch giveaway entries: {}", error);
				let _ = self.connector.send_message(instance.channel, &notice).await;
				return Err(error.into());
			}
		};

		let entrant_ids: Vec<Id<UserMarker>> = entrants
			.iter()
			.filter(|entrant| !entrant.is_bot)
			.map(|entrant| entrant.user_id)
			.collect();

		if entrant_ids.is_empty() {
			self.remove(announcement_id).await;
			self.connector
				.send_message(instance.channel, "❌ No one entered the giveaway.")
				.await?;
			return Ok(());
		}

		let winners = draw_winners(
			&entrant_ids,
			instance.winner_slots,
			instance.rigged_winner,
			&mut thread_rng(),
		);
		let summary = result_text(&winners, &instance);
		self.remove(announcement_id).await;
		self.connector.send_message(instance.channel, &summary).await?;
		Ok(())
	}

	/// Claims the giveaway for the draw. Returns a snapshot only on the
	/// OPEN to DRAWING transition; any later claim for the same giveaway
	/// gets nothing.
	async fn begin_draw(&self, announcement_id: Id<MessageMarker>) -> Option<GiveawayInstance> {
		let mut live = self.live.write().await;
		let instance = live.get_mut(&announcement_id)?;
		if instance.phase != GiveawayPhase::Open {
			return None;
		}
		instance.phase = GiveawayPhase::Drawing;
		Some(instance.clone())
	}

	async fn remove(&self, announcement_id: Id<MessageMarker>) {
		self.live.write().await.remove(&announcement_id);
	}
}

fn announcement_text(params: &GiveawayParams) -> String {
	let minutes = params.duration.as_secs() / 60;
	let mut text = format!(
		"🎉 **GIVEAWAY STARTED!** 🎉\n\nReact with {} to enter!\n\n**Duration:** {} minutes\n**Winners:** {} + **Item:** {}\n\nHosted by: {}",
		ENTRY_EMOJI,
		minutes,
		params.winner_slots,
		params.item_name,
		params.host.mention()
	);
	if let Some(rigged) = params.rigged_winner {
		text.push_str(&format!(
			"\n\n⚠️ **This giveaway has a rigged winner:** {}",
			rigged.mention()
		));
	}
	text
}

fn result_text(winners: &[Id<UserMarker>], instance: &GiveawayInstance) -> String {
	let Some(item_winner) = winners.first() else {
		return String::from("❌ No one entered the giveaway.");
	};
	let mut winner_lines = String::new();
	for (index, (winner, key)) in winners.iter().zip(instance.prize_keys.iter()).enumerate() {
		winner_lines.push_str(&format!(
			"🎉 **Winner {}:** {}\n🔑 Key: `{}`\n\n",
			index + 1,
			winner.mention(),
			key
		));
	}
	format!(
		"🎉 **GIVEAWAY ENDED!** 🎉\n\n🧸 **Item Winner:** {}\n🏆 **Item:** {}\n\n{}Congrats to all winners!",
		item_winner.mention(),
		instance.item_name,
		winner_lines
	)
}
