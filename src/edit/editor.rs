//! Zone editor: normalizes edit input and opens edit sessions

use std::sync::Arc;

use tracing::debug;

use crate::loader::ComponentLoader;
use crate::model::{ComponentId, ContentTypeId, TemplateTypeId, ThemeId, Zone, ZoneType, ZoneTypeId};
use crate::variation::{Axis, VariationResolver};

use super::action::UpdateAction;
use super::error::EditError;
use super::session::{ZoneEditSession, ZoneView};

/// What the page being edited is: every field is required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneEditOptions {
    pub theme: ThemeId,
    pub content_type: ContentTypeId,
    pub template_type: TemplateTypeId,
}

impl ZoneEditOptions {
    pub fn new(
        theme: impl Into<ThemeId>,
        content_type: impl Into<ContentTypeId>,
        template_type: impl Into<TemplateTypeId>,
    ) -> Self {
        Self {
            theme: theme.into(),
            content_type: content_type.into(),
            template_type: template_type.into(),
        }
    }

    /// Raw context parameters for a zone of the given type
    pub fn context_mapping(&self, zone_type: &ZoneTypeId) -> toml::Table {
        let mut mapping = toml::Table::new();
        for (axis, value) in [
            (Axis::Theme, self.theme.as_str()),
            (Axis::ContentType, self.content_type.as_str()),
            (Axis::TemplateType, self.template_type.as_str()),
            (Axis::ZoneType, zone_type.as_str()),
        ] {
            mapping.insert(axis.key().to_string(), toml::Value::String(value.to_string()));
        }
        mapping
    }
}

/// Edit payload handed to the editor
#[derive(Debug, Clone, PartialEq)]
pub enum EditInput {
    /// Changes already in progress
    Action(UpdateAction),
    /// A zone to start editing
    Zone(Zone),
    /// Anything else, carrying its type name for diagnostics
    Unsupported { type_name: String },
}

impl EditInput {
    /// Wrap a value the editor cannot handle
    pub fn unsupported<T: ?Sized>(_value: &T) -> Self {
        Self::Unsupported {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }
}

impl From<UpdateAction> for EditInput {
    fn from(action: UpdateAction) -> Self {
        Self::Action(action)
    }
}

impl From<Zone> for EditInput {
    fn from(zone: Zone) -> Self {
        Self::Zone(zone)
    }
}

/// Entry point of the zone edit flow
#[derive(Debug, Clone)]
pub struct ZoneEditor {
    resolver: VariationResolver,
}

impl ZoneEditor {
    pub fn new(resolver: VariationResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &VariationResolver {
        &self.resolver
    }

    /// Normalize edit input to an update action
    pub fn transform(&self, input: EditInput) -> Result<UpdateAction, EditError> {
        match input {
            EditInput::Action(action) => Ok(action),
            EditInput::Zone(zone) => Ok(UpdateAction::new(zone)),
            EditInput::Unsupported { type_name } => Err(EditError::unsupported(type_name)),
        }
    }

    /// Apply an action and return the resulting zone
    pub fn reverse_transform(&self, mut action: UpdateAction) -> Result<Zone, EditError> {
        action.resolve()?;
        Ok(action.into_zone())
    }

    /// View data for a zone, independent of any pending change
    pub fn view(&self, zone: &Zone) -> ZoneView {
        ZoneView::from_zone(zone)
    }

    /// Open an edit session: normalize the input, build the variation
    /// context for the zone's type, then assign variations.
    pub fn open(
        &self,
        input: EditInput,
        options: &ZoneEditOptions,
    ) -> Result<ZoneEditSession, EditError> {
        let action = self.transform(input)?;
        debug!(
            theme = %options.theme,
            content_type = %options.content_type,
            template_type = %options.template_type,
            zone_type = %action.zone().zone_type().id,
            "opening zone edit"
        );
        ZoneEditSession::present(action, options)?.assign_variations(&self.resolver)
    }
}

/// Build a zone from component ids through a loader
///
/// Every component must exist and be allowed by `zone_type`.
pub fn hydrate_zone<L: ComponentLoader + ?Sized>(
    loader: &L,
    zone_type: Arc<ZoneType>,
    ids: &[ComponentId],
) -> Result<Zone, EditError> {
    let mut zone = Zone::new(zone_type);
    for id in ids {
        zone.add_component(loader.retrieve(id)?)?;
    }
    debug!(zone_type = %zone.zone_type().id, count = zone.len(), "zone hydrated");
    Ok(zone)
}
