//! Intent/state view-models for the two screens.
//!
//! Each view-model owns a `tokio::sync::watch` channel holding an immutable
//! view-state snapshot. Screens subscribe to the channel, render whatever
//! snapshot they observe and forward user actions back as intents. Snapshots
//! are replaced wholesale, never partially mutated.

pub mod home;
pub mod settings;

pub use home::{HomeScreenIntent, HomeScreenViewState, HomeViewModel};
pub use settings::{SettingsScreenIntent, SettingsScreenViewState, SettingsViewModel};
