// CLI module for musictag
//
// Command-line front end over the musictag library. Only compiled into the
// binary.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::run;
pub use config::Config;
