// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::Rng;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;

/// Draws `count` items from `pool` uniformly at random without replacement,
/// removing each selected item from the pool. If the pool runs out first,
/// the selection is everything that was left.
pub fn sample_without_replacement<T, R: Rng>(pool: &mut Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
	let mut selected = Vec::with_capacity(count.min(pool.len()));
	while selected.len() < count && !pool.is_empty() {
		let index = rng.gen_range(0..pool.len());
		selected.push(pool.swap_remove(index));
	}
	selected
}

/// Builds the winner list for a draw. A rigged winner always takes the first
/// slot, entered or not, and is excluded from the sampling pool so they
/// cannot take a second one.
pub fn draw_winners<R: Rng>(
	entrants: &[Id<UserMarker>],
	winner_slots: usize,
	rigged_winner: Option<Id<UserMarker>>,
	rng: &mut R,
) -> Vec<Id<UserMarker>> {
	match rigged_winner {
		Some(rigged) => {
			let mut pool: Vec<Id<UserMarker>> = entrants.iter().copied().filter(|id| *id != rigged).collect();
			let mut winners = Vec::with_capacity(winner_slots);
			winners.push(rigged);
			winners.append(&mut sample_without_replacement(
				&mut pool,
				winner_slots.saturating_sub(1),
				rng,
			));
			winners
		}
		None => {
			let mut pool = entrants.to_vec();
			sample_without_replacement(&mut pool, winner_slots, rng)
		}
	}
}
