mod demo;
mod root;
mod settings;

pub use demo::{tour, DemoCommand, TourSummary};
pub use root::{Cli, Commands};
pub use settings::SettingsCommand;
