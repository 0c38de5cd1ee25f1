//! Reactive controller of the dashboard.
//!
//! Control values live in a [`Selection`]. Each [`ReactiveEdge`] declares the
//! controls it depends on, and the [`Dashboard`] dispatcher recomputes the
//! edges whose dependencies changed, one control event at a time.

pub mod control;
pub mod dispatcher;
pub mod edges;
pub mod view;

pub use control::{Control, ControlEvent, Selection};
pub use dispatcher::{Dashboard, DashboardOutputs};
pub use edges::{ChartEdge, DateBoundsEdge, EdgeOutput, EdgeState, ReactiveEdge};
