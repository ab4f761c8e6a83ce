//! Request/response orchestration core for the COVID-19 death-prediction client.
//!
//! Two leaf controllers own all client-side state: the prediction form and the
//! chart browser. Both are plain state machines driven by intents; network
//! work is described by dispatch values and executed by a [`Session`].

pub mod config;
pub mod controller;
pub mod domain;
pub mod prelude;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use prelude::{ClientError, ClientResult};
pub use session::{Intent, Session, SessionEvent};
