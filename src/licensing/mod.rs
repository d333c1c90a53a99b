// © 2025-2026 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod client;
mod types;


pub use client::{LicensingClient, LicensingError};
pub use types::{EditKeyParams, GenerateKeysParams, GeneratedKey, LicenseKey, UserProfile, UserService};
