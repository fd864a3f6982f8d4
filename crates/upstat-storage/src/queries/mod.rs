//! Raw SQL, one module per table.

pub mod results;
