#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod assets;
pub mod config;
pub mod error;
pub mod host;
pub mod manager;
pub mod telemetry;
pub mod toast;
pub mod types;
mod util;

pub use manager::{ToastEvent, ToastHandle, ToastId, ToastManager, ToastState};
pub use toast::{ToastConfig, ToastOptions};

pub type Result<T> = std::result::Result<T, error::Error>;
