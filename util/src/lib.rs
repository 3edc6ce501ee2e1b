pub mod config;
pub mod question_bank;
pub mod state;
