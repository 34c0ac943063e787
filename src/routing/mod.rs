//! Routing module
//!
//! Defines the immutable route table consulted on every request.

mod table;

pub use table::{Route, RouteTable};
