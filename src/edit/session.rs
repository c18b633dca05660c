//! Zone edit session: context resolution, variation assignment, submission

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::model::{Component, ComponentId, ComponentType, ComponentTypeId, Zone, ZoneTypeId};
use crate::variation::{Variation, VariationContext, VariationError, VariationResolver};

use super::action::UpdateAction;
use super::editor::ZoneEditOptions;
use super::error::EditError;

/// Progress of a zone edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Zone and components loaded for editing
    Presented,
    /// Variation context built from theme, content type, template type and zone type
    ContextResolved,
    /// Every allowed component type has been given its variation
    VariationsAssigned,
    /// Changes are queued on the update action
    ActionPending,
    /// Action applied, updated zone available
    Resolved,
    /// Applying the action failed
    Failed,
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditState::Presented => "presented",
            EditState::ContextResolved => "context-resolved",
            EditState::VariationsAssigned => "variations-assigned",
            EditState::ActionPending => "action-pending",
            EditState::Resolved => "resolved",
            EditState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A component type that can be added to the zone, with its variation
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub component_type: ComponentType,
    pub variation: Variation,
}

/// Editing unit for one component already in the zone
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSlot {
    pub component_id: ComponentId,
    pub component_type: ComponentTypeId,
    /// `None` renders as an empty state: no variation matched this type
    pub variation: Option<Variation>,
}

/// View-facing projection of a zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneView {
    /// Allowed component types, id to name
    pub component_types: BTreeMap<ComponentTypeId, String>,
    pub zone_type_id: ZoneTypeId,
    pub zone_name: String,
}

impl ZoneView {
    pub fn from_zone(zone: &Zone) -> Self {
        let zone_type = zone.zone_type();
        Self {
            component_types: zone_type
                .allowed_component_types()
                .iter()
                .map(|ct| (ct.id.clone(), ct.name.clone()))
                .collect(),
            zone_type_id: zone_type.id.clone(),
            zone_name: zone_type.name.clone(),
        }
    }
}

/// An in-progress edit of a single zone
///
/// Built by [`ZoneEditor::open`](super::ZoneEditor::open). The session
/// assumes it is the only in-flight mutation of its zone.
#[derive(Debug, Clone)]
pub struct ZoneEditSession {
    state: EditState,
    context: VariationContext,
    action: UpdateAction,
    palette: Vec<PaletteEntry>,
    slots: Vec<ComponentSlot>,
    view: ZoneView,
    failure: Option<EditError>,
}

impl ZoneEditSession {
    /// Start a session on a loaded zone and build its variation context
    pub(crate) fn present(action: UpdateAction, options: &ZoneEditOptions) -> Result<Self, EditError> {
        let view = ZoneView::from_zone(action.zone());
        debug!(zone_type = %view.zone_type_id, state = %EditState::Presented, "zone edit");

        let context = VariationContext::denormalize(&options.context_mapping(&view.zone_type_id))?;
        let session = Self {
            state: EditState::ContextResolved,
            context,
            action,
            palette: Vec::new(),
            slots: Vec::new(),
            view,
            failure: None,
        };
        session.log_state();
        Ok(session)
    }

    /// Resolve one variation per allowed component type and hand them to
    /// the palette and to the slots of existing components.
    ///
    /// Types without a matching variation are left out of the palette;
    /// any other resolution failure aborts the session.
    pub(crate) fn assign_variations(
        mut self,
        resolver: &VariationResolver,
    ) -> Result<Self, EditError> {
        let zone_type = self.action.zone().zone_type_arc();

        for component_type in zone_type.allowed_component_types() {
            let context = self
                .context
                .clone()
                .with_component_type(component_type.id.clone());
            match resolver.resolve(&context) {
                Ok(variation) => self.palette.push(PaletteEntry {
                    component_type: component_type.clone(),
                    variation,
                }),
                Err(err @ VariationError::NoMatchingVariation { .. }) => {
                    warn!(
                        zone_type = %zone_type.id,
                        component_type = %component_type.id,
                        "{}, component type left out of palette",
                        err
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        self.refresh_slots();

        Ok(self
            .advance(EditState::VariationsAssigned)
            .advance(EditState::ActionPending))
    }

    fn refresh_slots(&mut self) {
        self.slots = self
            .action
            .zone()
            .components()
            .iter()
            .map(|component| ComponentSlot {
                component_id: component.id.clone(),
                component_type: component.component_type.clone(),
                variation: lookup(&self.palette, &component.component_type).cloned(),
            })
            .collect();
    }

    fn advance(mut self, state: EditState) -> Self {
        self.state = state;
        self.log_state();
        self
    }

    fn log_state(&self) {
        debug!(zone_type = %self.view.zone_type_id, state = %self.state, "zone edit");
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn context(&self) -> &VariationContext {
        &self.context
    }

    pub fn action(&self) -> &UpdateAction {
        &self.action
    }

    pub fn palette(&self) -> &[PaletteEntry] {
        &self.palette
    }

    /// One slot per component of the zone as opened or last submitted.
    ///
    /// Queued changes are reflected after the next successful [`submit`](Self::submit).
    pub fn slots(&self) -> &[ComponentSlot] {
        &self.slots
    }

    pub fn view(&self) -> &ZoneView {
        &self.view
    }

    /// Error recorded by the last failed submission
    pub fn failure(&self) -> Option<&EditError> {
        self.failure.as_ref()
    }

    /// False when no allowed component type has a variation (empty palette)
    pub fn can_add_components(&self) -> bool {
        !self.palette.is_empty()
    }

    /// Variation assigned to a component type in this session
    pub fn variation_for(&self, component_type: &ComponentTypeId) -> Option<&Variation> {
        lookup(&self.palette, component_type)
    }

    /// Queue a new component at the end of the zone
    pub fn add_component(&mut self, component: Component) -> Result<(), EditError> {
        self.check_addable(&component)?;
        self.action.add(component);
        self.pending();
        Ok(())
    }

    /// Queue a new component at a position
    pub fn insert_component(&mut self, position: usize, component: Component) -> Result<(), EditError> {
        self.check_addable(&component)?;
        self.action.insert(position, component);
        self.pending();
        Ok(())
    }

    /// A new component needs an allowed type that has a variation in this
    /// session's palette.
    fn check_addable(&self, component: &Component) -> Result<(), EditError> {
        self.action
            .zone()
            .zone_type()
            .check_allowed(&component.component_type)?;
        if lookup(&self.palette, &component.component_type).is_none() {
            let context = self
                .context
                .clone()
                .with_component_type(component.component_type.clone());
            return Err(VariationError::no_match(&context).into());
        }
        Ok(())
    }

    /// Queue edited content for an existing component
    pub fn update_component(&mut self, component: Component) {
        self.action.update(component);
        self.pending();
    }

    pub fn remove_component(&mut self, id: impl Into<ComponentId>) {
        self.action.remove(id);
        self.pending();
    }

    pub fn move_component(&mut self, id: impl Into<ComponentId>, position: usize) {
        self.action.move_to(id, position);
        self.pending();
    }

    fn pending(&mut self) {
        self.failure = None;
        if self.state != EditState::ActionPending {
            self.state = EditState::ActionPending;
            self.log_state();
        }
    }

    /// Apply the pending action and return the updated zone.
    ///
    /// Every component in the result carries the variation payload of its
    /// component type, or none when the type has no variation here.
    /// Submitting twice without queuing changes returns the same zone.
    pub fn submit(&mut self) -> Result<Zone, EditError> {
        if let Err(err) = self.action.resolve() {
            let err = EditError::from(err);
            warn!(zone_type = %self.view.zone_type_id, error = %err, "zone update rejected");
            self.failure = Some(err.clone());
            self.state = EditState::Failed;
            self.log_state();
            return Err(err);
        }

        let palette = &self.palette;
        if let Some(zone) = self.action.zone_mut() {
            zone.apply_variations(|component_type| {
                lookup(palette, component_type).map(|variation| variation.payload.clone())
            });
        }
        self.refresh_slots();

        self.state = EditState::Resolved;
        self.log_state();
        Ok(self.action.zone().clone())
    }

    /// Consume the session, returning its action
    pub fn into_action(self) -> UpdateAction {
        self.action
    }
}

fn lookup<'a>(palette: &'a [PaletteEntry], component_type: &ComponentTypeId) -> Option<&'a Variation> {
    palette
        .iter()
        .find(|entry| &entry.component_type.id == component_type)
        .map(|entry| &entry.variation)
}
