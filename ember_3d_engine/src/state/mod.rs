//! GPU state tracking
//!
//! [`RenderState`] is a full snapshot of the mutable pipeline state the
//! engine touches; [`StateManager`] keeps the current snapshot, a
//! push/pop stack for scoped overrides, and a binding cache that elides
//! redundant texture/UBO/VAO binds.

pub mod render_state;
pub mod state_manager;

pub use render_state::RenderState;
pub use state_manager::StateManager;
