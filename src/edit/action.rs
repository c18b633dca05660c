//! Update actions: pending changes to a zone's contents

use crate::model::{Component, ComponentId, Zone, ZoneError};

/// A single proposed change to a zone
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneChange {
    /// Append a component
    Add(Component),
    /// Insert a component at a position
    Insert { position: usize, component: Component },
    /// Replace the component with the same id (edited content)
    Update(Component),
    /// Remove a component
    Remove(ComponentId),
    /// Move a component to a new position
    Move { id: ComponentId, position: usize },
}

/// Carrier for proposed zone changes
///
/// Changes are queued against a base zone and only applied by
/// [`resolve`](Self::resolve), which always starts again from the base, so
/// resolving twice without queuing anything in between yields the same zone.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAction {
    base: Zone,
    changes: Vec<ZoneChange>,
    resolved: Option<Zone>,
}

impl UpdateAction {
    pub fn new(zone: Zone) -> Self {
        Self {
            base: zone,
            changes: Vec::new(),
            resolved: None,
        }
    }

    /// Queue a change, discarding any previous resolution
    pub fn push(&mut self, change: ZoneChange) -> &mut Self {
        self.changes.push(change);
        self.resolved = None;
        self
    }

    pub fn add(&mut self, component: Component) -> &mut Self {
        self.push(ZoneChange::Add(component))
    }

    pub fn insert(&mut self, position: usize, component: Component) -> &mut Self {
        self.push(ZoneChange::Insert {
            position,
            component,
        })
    }

    pub fn update(&mut self, component: Component) -> &mut Self {
        self.push(ZoneChange::Update(component))
    }

    pub fn remove(&mut self, id: impl Into<ComponentId>) -> &mut Self {
        self.push(ZoneChange::Remove(id.into()))
    }

    pub fn move_to(&mut self, id: impl Into<ComponentId>, position: usize) -> &mut Self {
        self.push(ZoneChange::Move {
            id: id.into(),
            position,
        })
    }

    pub fn changes(&self) -> &[ZoneChange] {
        &self.changes
    }

    pub fn base(&self) -> &Zone {
        &self.base
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Apply every queued change to a copy of the base zone.
    ///
    /// On failure nothing is stored and the action stays unresolved.
    pub fn resolve(&mut self) -> Result<&Zone, ZoneError> {
        let mut zone = self.base.clone();
        for change in &self.changes {
            apply(&mut zone, change)?;
        }
        let zone = self.resolved.insert(zone);
        Ok(&*zone)
    }

    /// The resolved zone, or the base zone when nothing was resolved yet
    pub fn zone(&self) -> &Zone {
        self.resolved.as_ref().unwrap_or(&self.base)
    }

    pub(crate) fn zone_mut(&mut self) -> Option<&mut Zone> {
        self.resolved.as_mut()
    }

    pub fn into_zone(self) -> Zone {
        self.resolved.unwrap_or(self.base)
    }
}

fn apply(zone: &mut Zone, change: &ZoneChange) -> Result<(), ZoneError> {
    match change {
        ZoneChange::Add(component) => zone.add_component(component.clone()),
        ZoneChange::Insert {
            position,
            component,
        } => zone.insert_component(*position, component.clone()),
        ZoneChange::Update(component) => {
            zone.zone_type().check_allowed(&component.component_type)?;
            let position = zone
                .components()
                .iter()
                .position(|c| c.id == component.id)
                .ok_or_else(|| ZoneError::ComponentNotFound {
                    id: component.id.clone(),
                })?;
            zone.remove_component(&component.id)?;
            zone.insert_component(position, component.clone())
        }
        ZoneChange::Remove(id) => zone.remove_component(id).map(|_| ()),
        ZoneChange::Move { id, position } => zone.move_component(id, *position),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{ComponentType, ZoneType};

    fn zone() -> Zone {
        let zone_type = Arc::new(
            ZoneType::new("sidebar", "Sidebar")
                .allow(ComponentType::new("banner", "Banner"))
                .allow(ComponentType::new("text", "Text")),
        );
        Zone::with_components(
            zone_type,
            vec![Component::new("a", "banner"), Component::new("b", "text")],
        )
        .unwrap()
    }

    fn ids(zone: &Zone) -> Vec<String> {
        zone.components().iter().map(|c| c.id.0.clone()).collect()
    }

    #[test]
    fn test_resolve_applies_changes_in_order() {
        let mut action = UpdateAction::new(zone());
        action
            .add(Component::new("c", "text"))
            .move_to("c", 0)
            .remove("a");

        let resolved = action.resolve().expect("Should resolve");
        assert_eq!(ids(resolved), vec!["c", "b"]);
        assert_eq!(ids(action.base()), vec!["a", "b"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut action = UpdateAction::new(zone());
        action.add(Component::new("c", "text"));

        let first = action.resolve().unwrap().clone();
        let second = action.resolve().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(ids(&second), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut action = UpdateAction::new(zone());
        action.update(Component::new("a", "banner").with_data("title", "New"));

        let resolved = action.resolve().unwrap();
        assert_eq!(ids(resolved), vec!["a", "b"]);
        assert_eq!(
            resolved.components()[0].data.get("title"),
            Some(&toml::Value::String("New".into()))
        );
    }

    #[test]
    fn test_failed_resolve_keeps_action_unresolved() {
        let mut action = UpdateAction::new(zone());
        action.add(Component::new("c", "video"));

        let err = action.resolve().unwrap_err();
        assert!(matches!(err, ZoneError::DisallowedComponentType { .. }));
        assert!(!action.is_resolved());
        assert_eq!(ids(action.zone()), vec!["a", "b"]);
    }

    #[test]
    fn test_queuing_invalidates_resolution() {
        let mut action = UpdateAction::new(zone());
        action.resolve().unwrap();
        assert!(action.is_resolved());

        action.remove("a");
        assert!(!action.is_resolved());
        assert_eq!(ids(&action.into_zone()), vec!["a", "b"]);
    }
}
