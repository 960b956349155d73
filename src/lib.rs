pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::FetchError;
pub use pipeline::{run, RunMode, RunSummary};
