//! Built-in demonstration catalog. A real component library plugs in
//! its own resolver; this one exists so the binary is usable out of
//! the box.

use serde_json::json;
use showroom_catalog::ComponentKey;
use showroom_catalog::ConfigDescriptor;
use showroom_catalog::ControlKind;
use showroom_catalog::DeclaredProperty;
use showroom_catalog::DeclaredType;
use showroom_catalog::ExampleGroup;
use showroom_catalog::PropertySpec;
use showroom_catalog::StaticResolver;
use showroom_catalog::Unit;
use std::collections::BTreeMap;

pub fn resolver() -> StaticResolver {
    let mut resolver = StaticResolver::new();
    register_atoms(&mut resolver);
    register_molecules(&mut resolver);
    register_organisms(&mut resolver);
    resolver
}

fn register_atoms(resolver: &mut StaticResolver) {
    resolver.register(
        ComponentKey::new("atoms", "button"),
        Unit::new(
            "atoms/button",
            vec![
                DeclaredProperty::new("label", DeclaredType::Text, json!("Click me")),
                DeclaredProperty::new("variant", DeclaredType::Text, json!("primary")),
                DeclaredProperty::new("size", DeclaredType::Text, json!("medium")),
                DeclaredProperty::new("loading", DeclaredType::Bool, json!(false)),
            ],
        ),
    );
    resolver.register(
        ComponentKey::new("atoms", "input"),
        Unit::new(
            "atoms/input",
            vec![
                DeclaredProperty::new("placeholder", DeclaredType::Text, json!("Type here...")),
                DeclaredProperty::new("value", DeclaredType::Text, json!("")),
                DeclaredProperty::new("max_length", DeclaredType::Number, json!(120)),
            ],
        ),
    );
    resolver.register(
        ComponentKey::new("atoms", "switch"),
        Unit::new(
            "atoms/switch",
            vec![
                DeclaredProperty::new("checked", DeclaredType::Bool, json!(false)),
                DeclaredProperty::new("label", DeclaredType::Text, json!("Enabled")),
            ],
        ),
    );
    resolver.register(
        ComponentKey::new("atoms", "badge"),
        Unit::new(
            "atoms/badge",
            vec![
                DeclaredProperty::new("text", DeclaredType::Text, json!("New")),
                DeclaredProperty::new("variant", DeclaredType::Text, json!("info")),
            ],
        ),
    );
    resolver.register(
        ComponentKey::new("atoms", "avatar"),
        Unit::new(
            "atoms/avatar",
            vec![
                DeclaredProperty::new("initials", DeclaredType::Text, json!("AB")),
                DeclaredProperty::new("size", DeclaredType::Text, json!("medium")),
            ],
        ),
    );
}

fn register_molecules(resolver: &mut StaticResolver) {
    // Card carries a hand-authored descriptor, exercising the
    // authored-wins path over synthesis.
    let mut schema = BTreeMap::new();
    schema.insert(
        "title".to_string(),
        PropertySpec {
            control: ControlKind::Text,
            options: Vec::new(),
            default: json!("Card title"),
            description: Some("Heading shown at the top of the card".to_string()),
        },
    );
    schema.insert(
        "elevation".to_string(),
        PropertySpec {
            control: ControlKind::Range,
            options: Vec::new(),
            default: json!(1),
            description: Some("Shadow depth, 0 to 4".to_string()),
        },
    );
    schema.insert(
        "variant".to_string(),
        PropertySpec::select(
            vec!["outlined".to_string(), "filled".to_string()],
            json!("outlined"),
        ),
    );
    let authored = ConfigDescriptor {
        unit_id: "molecules/card".to_string(),
        title: "Card".to_string(),
        description: "Content container with optional elevation".to_string(),
        property_schema: schema,
        examples: vec![ExampleGroup {
            title: "Flat".to_string(),
            props: BTreeMap::from([("elevation".to_string(), json!(0))]),
        }],
        error: false,
    };
    let mut card = Unit::new("molecules/card", Vec::new());
    card.authored = Some(authored);
    resolver.register(ComponentKey::new("molecules", "card"), card);

    resolver.register(
        ComponentKey::new("molecules", "modal"),
        Unit::new(
            "molecules/modal",
            vec![
                DeclaredProperty::new("title", DeclaredType::Text, json!("Dialog")),
                DeclaredProperty::new("open", DeclaredType::Bool, json!(false)),
                DeclaredProperty::new("width", DeclaredType::Number, json!(480)),
            ],
        ),
    );
}

fn register_organisms(resolver: &mut StaticResolver) {
    resolver.register(
        ComponentKey::new("organisms", "header"),
        Unit::new(
            "organisms/header",
            vec![
                DeclaredProperty::new("title", DeclaredType::Text, json!("Showroom")),
                DeclaredProperty::new("sticky", DeclaredType::Bool, json!(true)),
            ],
        ),
    );
    resolver.register(
        ComponentKey::new("organisms", "data-table"),
        Unit::new(
            "organisms/data-table",
            vec![
                DeclaredProperty::new("rows", DeclaredType::Number, json!(10)),
                DeclaredProperty::new("striped", DeclaredType::Bool, json!(true)),
            ],
        ),
    );
}
