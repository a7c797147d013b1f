//! Plain-text presentation of the observed view states.

pub mod text;
