//! Page state for the landmark finder.
//!
//! `state` holds the pure reducer; `controller` drives it from uploads,
//! the default landing image and analyzer calls.

pub mod controller;
pub mod state;

pub use controller::AnalysisController;
pub use state::{Action, PageState, PageView};
