//! `rp-route` — connectivity and shortest-path queries.
//!
//! # Crate layout
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`connectivity`] | road adjacency + iterative DFS reachability          |
//! | [`router`]       | `Router` trait, `Route`, `DijkstraRouter`, snapping  |
//! | `graph`          | ephemeral per-query cost graph (crate-internal)      |
//! | [`error`]        | `RouteError`, `RouteResult<T>`                       |
//!
//! # Query isolation
//!
//! Every query runs against a private copy of the committed road list.
//! Query points are spliced into that copy (splitting the roads they land
//! on) and discarded with it — the persistent network is never touched,
//! so read-only callers may route against a snapshot freely.

pub mod connectivity;
pub mod error;
pub mod router;

mod graph;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use router::{snap_to_network, DijkstraRouter, Route, Router};
