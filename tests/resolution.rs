//! Integration tests for variation resolution and zone contents

use std::sync::Arc;

use zonekit::edit::{EditInput, ZoneEditOptions, ZoneEditor};
use zonekit::model::{Component, ComponentType, Zone, ZoneError, ZoneType};
use zonekit::variation::{
    Axis, Pins, TieBreak, VariationContext, VariationDefinition, VariationError,
    VariationPayload, VariationRegistry, VariationResolver,
};
use zonekit::EditError;

fn sidebar_context() -> VariationContext {
    VariationContext::new("dark", "article", "full", "sidebar")
}

fn resolver(definitions: Vec<VariationDefinition>) -> VariationResolver {
    VariationResolver::new(definitions.into_iter().collect::<VariationRegistry>())
}

fn template(name: &str) -> VariationPayload {
    VariationPayload::with_template(name)
}

#[test]
fn test_more_specific_variation_wins() {
    let resolver = resolver(vec![
        VariationDefinition::new(Pins::any().pin(Axis::ZoneType, "sidebar"), template("v1")),
        VariationDefinition::new(Pins::any(), template("v2")),
    ]);

    let variation = resolver.resolve(&sidebar_context()).expect("Should resolve");
    assert_eq!(variation.template(), Some("v1"));
    assert_eq!(variation.index, 0);
    assert_eq!(variation.specificity.exact, 1);
}

#[test]
fn test_registration_order_does_not_beat_specificity() {
    let resolver = resolver(vec![
        VariationDefinition::new(Pins::any(), template("v2")),
        VariationDefinition::new(Pins::any().pin(Axis::ZoneType, "sidebar"), template("v1")),
    ]);

    assert_eq!(
        resolver.resolve(&sidebar_context()).unwrap().template(),
        Some("v1")
    );
}

#[test]
fn test_mismatched_pin_fails() {
    let resolver = resolver(vec![VariationDefinition::new(
        Pins::any().pin(Axis::ZoneType, "header"),
        template("v3"),
    )]);

    let err = resolver.resolve(&sidebar_context()).unwrap_err();
    assert_eq!(
        err,
        VariationError::NoMatchingVariation {
            context: sidebar_context()
        }
    );
    assert!(err.is_recoverable());
}

#[test]
fn test_excluded_even_when_more_specific() {
    let resolver = resolver(vec![
        VariationDefinition::new(
            Pins::any()
                .pin(Axis::Theme, "dark")
                .pin(Axis::ContentType, "article")
                .pin(Axis::TemplateType, "full")
                .pin(Axis::ZoneType, "header"),
            template("header"),
        ),
        VariationDefinition::new(Pins::any().pin(Axis::Theme, "dark"), template("theme")),
    ]);

    assert_eq!(
        resolver.resolve(&sidebar_context()).unwrap().template(),
        Some("theme")
    );
}

#[test]
fn test_theme_pin_preferred_over_wildcard() {
    let resolver = resolver(vec![
        VariationDefinition::new(Pins::any().pin(Axis::ZoneType, "sidebar"), template("b")),
        VariationDefinition::new(
            Pins::any()
                .pin(Axis::Theme, "dark")
                .pin(Axis::ZoneType, "sidebar"),
            template("a"),
        ),
    ]);

    assert_eq!(
        resolver.resolve(&sidebar_context()).unwrap().template(),
        Some("a")
    );
}

#[test]
fn test_tie_break_policies() {
    let definitions = vec![
        VariationDefinition::new(Pins::any().pin(Axis::Theme, "dark"), template("first")),
        VariationDefinition::new(Pins::any().pin(Axis::ZoneType, "sidebar"), template("second")),
    ];
    let registry: VariationRegistry = definitions.into_iter().collect();

    let first = VariationResolver::new(registry.clone());
    assert_eq!(
        first.resolve(&sidebar_context()).unwrap().template(),
        Some("first")
    );

    let last = VariationResolver::with_config(
        registry,
        zonekit::variation::ResolverConfig::new().with_tie_break(TieBreak::LastRegistered),
    );
    assert_eq!(
        last.resolve(&sidebar_context()).unwrap().template(),
        Some("second")
    );
}

#[test]
fn test_component_type_pin_needs_component_type_in_context() {
    let resolver = resolver(vec![VariationDefinition::new(
        Pins::any().pin(Axis::ComponentType, "banner"),
        template("banner"),
    )]);

    assert!(resolver.resolve(&sidebar_context()).is_err());
    assert_eq!(
        resolver
            .resolve(&sidebar_context().with_component_type("banner"))
            .unwrap()
            .template(),
        Some("banner")
    );
}

#[test]
fn test_candidates_best_first() {
    let resolver = resolver(vec![
        VariationDefinition::new(Pins::any(), template("fallback")),
        VariationDefinition::new(Pins::any().pin(Axis::ZoneType, "header"), template("header")),
        VariationDefinition::new(
            Pins::any()
                .pin(Axis::Theme, "dark")
                .pin(Axis::ZoneType, "sidebar"),
            template("sidebar"),
        ),
    ]);

    let templates: Vec<_> = resolver
        .candidates(&sidebar_context())
        .into_iter()
        .map(|v| v.payload.template)
        .collect();
    assert_eq!(
        templates,
        vec![Some("sidebar".to_string()), Some("fallback".to_string())]
    );
}

#[test]
fn test_disallowed_component_leaves_zone_unchanged() {
    let zone_type = Arc::new(
        ZoneType::new("sidebar", "Sidebar").allow(ComponentType::new("banner", "Banner")),
    );
    let mut zone = Zone::new(zone_type);
    zone.add_component(Component::new("c1", "banner")).unwrap();

    let err = zone
        .add_component(Component::new("c2", "video"))
        .unwrap_err();
    assert!(matches!(err, ZoneError::DisallowedComponentType { .. }));
    assert_eq!(zone.len(), 1);
    assert_eq!(zone.components()[0].id.as_str(), "c1");
}

#[test]
fn test_transform_rejects_other_inputs() {
    let editor = ZoneEditor::new(VariationResolver::default());
    let value = String::from("not a zone");

    let err = editor
        .open(
            EditInput::unsupported(&value),
            &ZoneEditOptions::new("dark", "article", "full"),
        )
        .unwrap_err();
    match &err {
        EditError::UnsupportedInputType { type_name } => {
            assert!(type_name.contains("String"));
        }
        other => panic!("Expected UnsupportedInputType, got {:?}", other),
    }
    assert!(err.to_string().contains("String"));
    assert!(!err.is_recoverable());
}
