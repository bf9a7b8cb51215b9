pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod lookup;
pub mod outputs;
pub mod ui;

pub use error::{DockerTagsError, Result};
