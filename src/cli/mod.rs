pub mod console;
pub mod display;
pub mod handlers;
pub mod menu;
pub mod state;

pub use console::Console;
pub use menu::run;
pub use state::AppState;
