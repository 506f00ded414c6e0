// Game rules plus the terminal front end pieces, exposed for the binary and
// for headless integration tests.
pub mod achievements;
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod celebration;
pub mod config;
pub mod cue;
pub mod dice;
pub mod game;
pub mod runtime;
pub mod session;
pub mod skin;
pub mod store;
pub mod tiers;
pub mod ui;

pub use game::Game;
pub use session::{GameSession, Phase};
