//! View state management module.
//!
//! This module contains the state primitives shared by every screen-scoped
//! entity:
//! - `ViewState` and the sparse `ViewStatePatch` applied to it
//! - `DataState`, the elements emitted by use cases
//! - `StateStore`, the observable holder of a `ViewState`

mod store;
mod view_state;

pub use store::StateStore;
pub use view_state::{DataState, RequestProgress, ViewState, ViewStatePatch};
