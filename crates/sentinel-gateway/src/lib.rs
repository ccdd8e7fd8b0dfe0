//! # sentinel-gateway
//!
//! HTTP front door. `POST /webhook` enqueues a scan and acknowledges at once;
//! `POST /regression` relays a rendered report to the outbound endpoint.
//! Every route except `/healthz` requires the shared `x-auth-token`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod relay;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use relay::{HttpRelay, Relay};
pub use router::{build_router, serve};
pub use state::{AppState, JobSink};
