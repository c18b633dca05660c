//! Theme domain model
//!
//! Themes contain template types, template types contain zone types, zone
//! types whitelist component types. A [`Zone`] is a concrete instance of a
//! [`ZoneType`] holding an ordered sequence of [`Component`]s.

mod component;
mod ids;
mod zone;

pub use component::{Component, ComponentType};
pub use ids::{ComponentId, ComponentTypeId, ContentTypeId, TemplateTypeId, ThemeId, ZoneTypeId};
pub use zone::{Zone, ZoneError, ZoneType};
