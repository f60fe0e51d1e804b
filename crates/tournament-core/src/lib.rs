//! Match lifecycle and derived-view computation for the tournament tracker.
//!
//! Everything here is a pure function of its arguments. The current time is
//! always passed in by the caller.

pub mod clock;
pub mod error;
pub mod lineup;
pub mod model;
pub mod standings;
pub mod view;

pub use clock::{countdown_remaining, reveal_countdown, ui_category, Countdown, UiCategory};
pub use error::ParseError;
pub use lineup::{resolve_lineup, should_reveal_lineup};
pub use model::*;
pub use standings::{mark_live, rank};
pub use view::{derive_match_card, derive_match_view, MatchCard, MatchView};
