// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod connector;
mod draw;
mod engine;
#[cfg(test)]
mod engine_tests;

pub use connector::{ChatConnector, ConnectorError, Entrant};
pub use engine::{GiveawayEngine, GiveawayError, GiveawayParams, ManualEndOutcome};
