//! Viewport model: maps the visible cell grid onto the active buffer and owns
//! the set of open buffers, the cursor and navigation history.

pub mod screen;
pub mod viewport;

pub use screen::ScreenSnapshot;
pub use viewport::Viewport;
