//! Contract module containing trait definitions for forecast operations

mod forecaster;
mod regressor;

pub use forecaster::Forecaster;
pub use regressor::Regressor;
