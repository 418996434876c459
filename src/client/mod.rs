//! Client side of the admin panels: a cached, searchable list per collection
//! and the transports it talks through.

pub mod api;
pub mod error;
pub mod http;
pub mod manager;
pub mod notice;
pub mod router;
pub mod search;

pub use api::{Endpoints, ResourceApi};
pub use error::{ClientError, Result};
pub use http::HttpApi;
pub use manager::{ListManager, ReconcilePolicy, Session};
pub use notice::{Notice, NoticeLevel};
pub use router::RouterApi;
