// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
	ChatConnector, ConnectorError, Entrant, GiveawayEngine, GiveawayError, GiveawayParams, ManualEndOutcome,
};
use crate::licensing::LicensingClient;
use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::time::sleep;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, MessageMarker, UserMarker};

#[derive(Debug, Clone)]
struct SentMessage {
	channel: Id<ChannelMarker>,
	id: Id<MessageMarker>,
	content: String,
}

struct FakeConnector {
	entrants: Mutex<Vec<Entrant>>,
	sent: Mutex<Vec<SentMessage>>,
	edited: Mutex<Vec<SentMessage>>,
	reactions: Mutex<Vec<String>>,
	next_message_id: AtomicU64,
	fail_reaction_users: AtomicBool,
}

impl FakeConnector {
	fn new() -> Self {
		Self {
			entrants: Mutex::new(Vec::new()),
			sent: Mutex::new(Vec::new()),
			edited: Mutex::new(Vec::new()),
			reactions: Mutex::new(Vec::new()),
			next_message_id: AtomicU64::new(100),
			fail_reaction_users: AtomicBool::new(false),
		}
	}

	fn set_entrants(&self, entrants: Vec<Entrant>) {
		*self.entrants.lock().expect("entrants lock") = entrants;
	}

	fn fail_reaction_fetch(&self) {
		self.fail_reaction_users.store(true, Ordering::SeqCst);
	}

	fn sent_messages(&self) -> Vec<SentMessage> {
		self.sent.lock().expect("sent lock").clone()
	}

	fn edited_messages(&self) -> Vec<SentMessage> {
		self.edited.lock().expect("edited lock").clone()
	}

	fn reaction_emojis(&self) -> Vec<String> {
		self.reactions.lock().expect("reactions lock").clone()
	}
}

#[async_trait]
impl ChatConnector for FakeConnector {
	async fn send_message(
		&self,
		channel: Id<ChannelMarker>,
		content: &str,
	) -> Result<Id<MessageMarker>, ConnectorError> {
		let id = Id::new(self.next_message_id.fetch_add(1, Ordering::SeqCst));
		self.sent.lock().expect("sent lock").push(SentMessage {
			channel,
			id,
			content: String::from(content),
		});
		Ok(id)
	}

	async fn add_reaction(
		&self,
		_channel: Id<ChannelMarker>,
		_message: Id<MessageMarker>,
		emoji: &str,
	) -> Result<(), ConnectorError> {
		self.reactions.lock().expect("reactions lock").push(String::from(emoji));
		Ok(())
	}

	async fn reaction_users(
		&self,
		_channel: Id<ChannelMarker>,
		_message: Id<MessageMarker>,
		_emoji: &str,
	) -> Result<Vec<Entrant>, ConnectorError> {
		if self.fail_reaction_users.load(Ordering::SeqCst) {
			return Err(ConnectorError::new("The chat service rejected the request"));
		}
		Ok(self.entrants.lock().expect("entrants lock").clone())
	}

	async fn edit_message(
		&self,
		channel: Id<ChannelMarker>,
		message: Id<MessageMarker>,
		content: &str,
	) -> Result<(), ConnectorError> {
		self.edited.lock().expect("edited lock").push(SentMessage {
			channel,
			id: message,
			content: String::from(content),
		});
		Ok(())
	}
}

#[derive(Clone, Default)]
struct KeyServiceState {
	requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
	fail: Arc<AtomicBool>,
}

impl KeyServiceState {
	fn recorded(&self) -> Vec<HashMap<String, String>> {
		self.requests.lock().expect("requests lock").clone()
	}

	fn fail_requests(&self) {
		self.fail.store(true, Ordering::SeqCst);
	}
}

async fn serve_keys(
	State(state): State<KeyServiceState>,
	Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
	let count: usize = query.get("count").and_then(|count| count.parse().ok()).unwrap_or(0);
	state.requests.lock().expect("requests lock").push(query);
	if state.fail.load(Ordering::SeqCst) {
		return (
			StatusCode::INTERNAL_SERVER_ERROR,
			Json(json!({ "message": "Key generation is unavailable" })),
		);
	}
	let keys: Vec<Value> = (1..=count)
		.map(|index| json!({ "value": format!("PRIZE-{}", index) }))
		.collect();
	(StatusCode::OK, Json(json!({ "generatedKeys": keys })))
}

async fn start_engine() -> (Arc<GiveawayEngine>, Arc<FakeConnector>, KeyServiceState) {
	let state = KeyServiceState::default();
	let app = Router::new()
		.route("/generate-key/get", get(serve_keys))
		.with_state(state.clone());
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
	let addr = listener.local_addr().expect("stub listener address");
	tokio::spawn(async move {
		let _ = axum::serve(listener, app.into_make_service()).await;
	});
	let licensing_client =
		LicensingClient::new(format!("http://{}", addr), "test-api-key").expect("build licensing client");

	let connector = Arc::new(FakeConnector::new());
	let engine = Arc::new(GiveawayEngine::new(
		Arc::clone(&connector) as Arc<dyn ChatConnector>,
		Arc::new(licensing_client),
	));
	(engine, connector, state)
}

fn params(duration: Duration, winner_slots: usize, item_name: &str) -> GiveawayParams {
	GiveawayParams {
		channel: Id::new(10),
		host: Id::new(77),
		duration,
		winner_slots,
		item_name: String::from(item_name),
		rigged_winner: None,
	}
}

fn human(id: u64) -> Entrant {
	Entrant {
		user_id: Id::new(id),
		is_bot: false,
	}
}

fn bot(id: u64) -> Entrant {
	Entrant {
		user_id: Id::new(id),
		is_bot: true,
	}
}

async fn wait_for_sent_count(connector: &FakeConnector, count: usize) -> Vec<SentMessage> {
	let deadline = Instant::now() + Duration::from_secs(2);
	loop {
		let sent = connector.sent_messages();
		if sent.len() >= count {
			return sent;
		}
		if Instant::now() >= deadline {
			panic!("expected {} sent messages, have {}", count, sent.len());
		}
		sleep(Duration::from_millis(25)).await;
	}
}

fn mention_in(text: &str, marker: &str) -> u64 {
	text.split(marker)
		.nth(1)
		.and_then(|rest| rest.split('>').next())
		.and_then(|id| id.parse().ok())
		.unwrap_or_else(|| panic!("no user mention follows {:?}", marker))
}

#[tokio::test]
async fn create_rejects_out_of_range_winner_slots() {
	let (engine, connector, keys) = start_engine().await;
	for winner_slots in [0, 11] {
		let result = engine
			.create(params(Duration::from_secs(60), winner_slots, "Nitro"))
			.await;
		assert!(matches!(result, Err(GiveawayError::Validation(_))));
	}
	assert!(keys.recorded().is_empty());
	assert!(connector.sent_messages().is_empty());
}

#[tokio::test]
async fn create_rejects_zero_duration() {
	let (engine, connector, keys) = start_engine().await;
	let result = engine.create(params(Duration::ZERO, 2, "Nitro")).await;
	assert!(matches!(result, Err(GiveawayError::Validation(_))));
	assert!(keys.recorded().is_empty());
	assert!(connector.sent_messages().is_empty());
}

#[tokio::test]
async fn create_generates_prize_keys_before_announcing() {
	let (engine, connector, keys) = start_engine().await;
	let announcement = engine
		.create(params(Duration::from_secs(600), 3, "Nitro Classic"))
		.await
		.expect("create giveaway");

	let requests = keys.recorded();
	assert_eq!(1, requests.len());
	assert_eq!(Some(&String::from("3")), requests[0].get("count"));
	assert_eq!(Some(&String::from("true")), requests[0].get("isPremium"));
	assert_eq!(Some(&String::from("Giveaway-77")), requests[0].get("note"));
	assert_eq!(Some(&String::from("30")), requests[0].get("daysKey"));

	let sent = connector.sent_messages();
	assert_eq!(1, sent.len());
	assert_eq!(announcement, sent[0].id);
	assert_eq!(Id::new(10), sent[0].channel);
	assert!(sent[0].content.contains("GIVEAWAY STARTED"));
	assert!(sent[0].content.contains("**Duration:** 10 minutes"));
	assert!(sent[0].content.contains("**Winners:** 3"));
	assert!(sent[0].content.contains("Hosted by: <@77>"));
	assert!(!sent[0].content.contains("rigged"));
	assert_eq!(vec![String::from("🎁")], connector.reaction_emojis());
}

#[tokio::test]
async fn create_aborts_when_key_generation_fails() {
	let (engine, connector, keys) = start_engine().await;
	keys.fail_requests();
	let result = engine.create(params(Duration::from_secs(60), 2, "Nitro")).await;
	let Err(GiveawayError::Licensing(error)) = result else {
		panic!("expected a licensing error");
	};
	assert_eq!("Key generation is unavailable", error.to_string());
	assert!(connector.sent_messages().is_empty());
	assert!(connector.reaction_emojis().is_empty());
}

#[tokio::test]
async fn draw_reports_no_entrants() {
	let (engine, connector, _keys) = start_engine().await;
	let announcement = engine
		.create(params(Duration::from_millis(100), 2, "Nitro"))
		.await
		.expect("create giveaway");

	let sent = wait_for_sent_count(&connector, 2).await;
	assert_eq!("❌ No one entered the giveaway.", sent[1].content);
	assert_eq!(ManualEndOutcome::NotFound, engine.manual_end(announcement, Id::new(2)).await);
}

#[tokio::test]
async fn draw_picks_distinct_winners_and_pairs_keys() {
	let (engine, connector, _keys) = start_engine().await;
	connector.set_entrants(vec![human(111), human(222), human(333), bot(444)]);
	engine
		.create(params(Duration::from_millis(100), 2, "Beta access"))
		.await
		.expect("create giveaway");

	let sent = wait_for_sent_count(&connector, 2).await;
	let summary = &sent[1].content;
	assert!(summary.contains("GIVEAWAY ENDED"));
	assert!(summary.contains("**Item:** Beta access"));
	assert!(summary.contains("`PRIZE-1`"));
	assert!(summary.contains("`PRIZE-2`"));
	assert!(summary.contains("Congrats to all winners!"));
	assert!(!summary.contains("<@444>"));

	let drawn_entrants = [111u64, 222, 333]
		.iter()
		.filter(|id| summary.contains(&format!("<@{}>", id)))
		.count();
	assert_eq!(2, drawn_entrants);

	let first_winner = mention_in(summary, "Winner 1:** <@");
	let second_winner = mention_in(summary, "Winner 2:** <@");
	let item_winner = mention_in(summary, "Item Winner:** <@");
	assert_ne!(first_winner, second_winner);
	assert_eq!(first_winner, item_winner);
}

#[tokio::test]
async fn rigged_user_wins_first_slot_even_if_absent() {
	let (engine, connector, _keys) = start_engine().await;
	connector.set_entrants(vec![human(111), human(222)]);
	let mut giveaway = params(Duration::from_millis(100), 2, "Nitro");
	giveaway.rigged_winner = Some(Id::new(999));
	engine.create(giveaway).await.expect("create giveaway");

	let sent = wait_for_sent_count(&connector, 2).await;
	assert!(sent[0].content.contains("rigged winner:** <@999>"));

	let summary = &sent[1].content;
	assert_eq!(999, mention_in(summary, "Winner 1:** <@"));
	assert_eq!(999, mention_in(summary, "Item Winner:** <@"));
	let second_winner = mention_in(summary, "Winner 2:** <@");
	assert!(second_winner == 111 || second_winner == 222);
}

#[tokio::test]
async fn rigged_user_never_wins_twice() {
	let (engine, connector, _keys) = start_engine().await;
	connector.set_entrants(vec![human(500), human(600)]);
	let mut giveaway = params(Duration::from_millis(100), 2, "Nitro");
	giveaway.rigged_winner = Some(Id::new(500));
	engine.create(giveaway).await.expect("create giveaway");

	let sent = wait_for_sent_count(&connector, 2).await;
	let summary = &sent[1].content;
	assert_eq!(500, mention_in(summary, "Winner 1:** <@"));
	assert_eq!(600, mention_in(summary, "Winner 2:** <@"));
}

#[tokio::test]
async fn slots_exceeding_entrants_draw_everyone() {
	let (engine, connector, _keys) = start_engine().await;
	connector.set_entrants(vec![human(321)]);
	engine
		.create(params(Duration::from_millis(100), 3, "Nitro"))
		.await
		.expect("create giveaway");

	let sent = wait_for_sent_count(&connector, 2).await;
	let summary = &sent[1].content;
	assert_eq!(321, mention_in(summary, "Winner 1:** <@"));
	assert!(summary.contains("`PRIZE-1`"));
	assert!(!summary.contains("**Winner 2:**"));
	assert!(!summary.contains("`PRIZE-2`"));
}

#[tokio::test]
async fn manual_end_suppresses_timer() {
	let (engine, connector, _keys) = start_engine().await;
	connector.set_entrants(vec![human(111)]);
	let announcement = engine
		.create(params(Duration::from_millis(150), 1, "Nitro"))
		.await
		.expect("create giveaway");

	assert_eq!(ManualEndOutcome::Ended, engine.manual_end(announcement, Id::new(55)).await);

	let edited = connector.edited_messages();
	assert_eq!(1, edited.len());
	assert_eq!(announcement, edited[0].id);
	assert!(edited[0].content.contains("ended manually by <@55>"));
	assert!(edited[0].content.contains("No winners were drawn."));

	sleep(Duration::from_millis(500)).await;
	assert_eq!(1, connector.sent_messages().len());
}

#[tokio::test]
async fn manual_end_twice_reports_not_found() {
	let (engine, connector, _keys) = start_engine().await;
	let announcement = engine
		.create(params(Duration::from_secs(60), 1, "Nitro"))
		.await
		.expect("create giveaway");

	assert_eq!(ManualEndOutcome::Ended, engine.manual_end(announcement, Id::new(55)).await);
	assert_eq!(
		ManualEndOutcome::NotFound,
		engine.manual_end(announcement, Id::new(55)).await
	);
	assert_eq!(1, connector.edited_messages().len());
}

#[tokio::test]
async fn manual_end_after_draw_reports_not_found() {
	let (engine, connector, _keys) = start_engine().await;
	connector.set_entrants(vec![human(111)]);
	let announcement = engine
		.create(params(Duration::from_millis(100), 1, "Nitro"))
		.await
		.expect("create giveaway");

	wait_for_sent_count(&connector, 2).await;
	assert_eq!(
		ManualEndOutcome::NotFound,
		engine.manual_end(announcement, Id::new(55)).await
	);
	assert!(connector.edited_messages().is_empty());
}

#[tokio::test]
async fn reaction_fetch_failure_reports_and_removes() {
	let (engine, connector, _keys) = start_engine().await;
	connector.fail_reaction_fetch();
	let announcement = engine
		.create(params(Duration::from_millis(100), 1, "Nitro"))
		.await
		.expect("create giveaway");

	let sent = wait_for_sent_count(&connector, 2).await;
	assert!(sent[1].content.starts_with("❌ Could not fetch giveaway entries:"));
	assert!(sent[1].content.contains("The chat service rejected the request"));
	assert_eq!(
		ManualEndOutcome::NotFound,
		engine.manual_end(announcement, Id::new(55)).await
	);
}
