//! Typed adapter over the action gateway used to reach the ads platform and
//! the spreadsheet store.
//!
//! The gateway itself is a generic call-by-name executor; this crate exposes
//! one typed method per action through the [`AdsSource`] and [`SheetSink`]
//! traits so each operation's input and output shape is checked at compile
//! time.

pub mod ads;
pub mod client;
pub mod error;
pub mod sheets;
pub mod types;

pub use ads::AdsSource;
pub use client::ComposioClient;
pub use error::ActionError;
pub use sheets::SheetSink;
pub use types::{CampaignFilter, InsightsQuery, SheetRange};
