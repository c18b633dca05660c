//! Zone edit flow
//!
//! An edit goes through these states:
//!
//! ```text
//! Presented -> ContextResolved -> VariationsAssigned -> ActionPending -> Resolved
//!                                                                    \-> Failed
//! ```
//!
//! [`ZoneEditor::open`] normalizes the input (a zone or an update action),
//! builds the variation context from the edit options and the zone's type,
//! and resolves one variation per allowed component type. Changes are
//! queued on the session's [`UpdateAction`] and applied by
//! [`ZoneEditSession::submit`].

mod action;
mod editor;
mod error;
mod session;

pub use action::{UpdateAction, ZoneChange};
pub use editor::{hydrate_zone, EditInput, ZoneEditOptions, ZoneEditor};
pub use error::EditError;
pub use session::{ComponentSlot, EditState, PaletteEntry, ZoneEditSession, ZoneView};
