//! Variation system: context-dependent rendering configuration
//!
//! A variation binds a rendering configuration to a partial context. Given a
//! full [`VariationContext`] (theme, content type, template type, zone type
//! and optionally component type), the [`VariationResolver`] picks the most
//! specific registered definition whose pinned axes all match.
//!
//! # Example
//!
//! ```rust
//! use zonekit::variation::{
//!     Axis, Pins, VariationContext, VariationDefinition, VariationPayload, VariationRegistry,
//!     VariationResolver,
//! };
//!
//! let mut registry = VariationRegistry::new();
//! registry.register(VariationDefinition::new(
//!     Pins::any().pin(Axis::ZoneType, "sidebar"),
//!     VariationPayload::with_template("sidebar.html"),
//! ));
//! registry.register(VariationDefinition::new(
//!     Pins::any(),
//!     VariationPayload::with_template("default.html"),
//! ));
//!
//! let resolver = VariationResolver::new(registry);
//! let context = VariationContext::new("dark", "article", "full", "sidebar");
//! let variation = resolver.resolve(&context).unwrap();
//! assert_eq!(variation.template(), Some("sidebar.html"));
//! ```

mod context;
mod definition;
mod error;
mod registry;
mod resolver;

pub use context::{Axis, VariationContext};
pub use definition::{Pins, Specificity, Variation, VariationDefinition, VariationPayload};
pub use error::VariationError;
pub use registry::VariationRegistry;
pub use resolver::{ResolverConfig, TieBreak, VariationResolver};
