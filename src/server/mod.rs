//! WebSocket netplay relay server implementation.

mod error;
mod frame;
mod handler;
mod registry;
mod runner;
mod session;
mod signal;
mod state;

pub use error::ServerError;
pub use frame::{Frame, Inbound};
pub use registry::{FrameSender, RoomRegistry};
pub use runner::{run_server, serve};
pub use session::Session;
pub use state::AppState;
