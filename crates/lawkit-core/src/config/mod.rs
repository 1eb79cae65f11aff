pub mod consts;
mod model;

pub use model::{BridgeConfig, LocatorConfig, LocatorMode};
