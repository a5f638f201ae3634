pub mod generate;
pub mod health_checks;
pub mod history;

pub use generate::generate_handler;
pub use health_checks::*;
pub use history::history_handler;
