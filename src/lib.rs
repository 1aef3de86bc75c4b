//! Typed bindings for the RetroAchievements JSON web API.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! let client = retroachievements::RetroClient::new("MyUser", "my-api-key");
//! let consoles = client.consoles().await?;
//! for console in consoles.consoles() {
//!     println!("{:?}: {:?}", console.id, console.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod console;
pub mod game;
pub mod top_ten;
pub mod user;

mod util;

#[cfg(feature = "client")]
mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod error;
#[cfg(feature = "client")]
pub mod params;
#[cfg(feature = "client")]
pub mod transport;

#[cfg(feature = "client")]
pub use crate::{
    client::{DEFAULT_RANGE_DAYS, DEFAULT_RESULTS, RetroClient},
    config::{API_URL, ClientConfig},
    error::RetroError,
    params::QueryParams,
    transport::{HttpTransport, RawResponse, Transport},
};
