use thiserror::Error;

use crate::data::DataError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
