mod config_cmd;
pub mod meal;
mod prompt;

pub use config_cmd::ConfigCommand;
pub use meal::{run_interactive, EditCommand, HistoryCommand, LogCommand, MealContext};
