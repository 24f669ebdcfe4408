//! Command and query handlers, one module per aggregate.

pub mod decision;
