//! Client core for the Puppy Bowl roster.
//!
//! # Overview
//! Lists, shows, adds and removes players of one cohort's roster and
//! reflects the results into a virtual page. The core never touches the
//! network or a browser: requests go through a host-provided [`Transport`],
//! and the host mirrors the [`Page`] mounts into real containers.
//!
//! # Design
//! - `PlayerClient` is stateless; each operation is a `build_*` /
//!   `parse_*` pair, so the I/O boundary is explicit.
//! - `PlayerApi` runs those pairs through a transport and logs failures.
//! - Renderers write into explicit [`Mount`] handles; `RosterApp` sequences
//!   one request and one render per user action.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod dom;
pub mod error;
pub mod http;
pub mod render;
pub mod types;

pub use api::{Operation, PlayerApi, Transport};
pub use app::{Action, RosterApp};
pub use client::PlayerClient;
pub use config::ClientConfig;
pub use dom::{Element, Mount, Node, Page};
pub use error::{ApiError, AppError, RenderError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::FormFields;
pub use types::{Player, PlayerDraft, PlayerId, RosterPayload};
