//! Attack scenarios against ownership and storage atomicity.

pub mod ownership;
