//! Modal command dispatch.
//!
//! [`ModalEditor`] owns the viewport and routes each tick's key events by
//! mode. In the navigation modes keys accumulate into a pending command
//! that is matched against an ordered [`CommandRules`] table; insert and
//! command-bar keys are handled directly.

pub mod dispatcher;
pub mod io_ops;
pub mod observer;
pub mod rules;
pub mod session;

pub use dispatcher::{DispatchResult, ModalEditor, PanelRequest};
pub use observer::ChangeObserver;
pub use rules::{CommandRules, RuleError};
pub use session::Session;
