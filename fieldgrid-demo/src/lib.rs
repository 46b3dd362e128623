//! Story gallery and search demo for the fieldgrid widgets.

pub mod app;
pub mod cli;
pub mod data;
pub mod error;
pub mod paths;
pub mod settings;
pub mod stories;

pub use error::DemoError;
