//! Component proxies against the memory host

mod common;

use nebula_core::sdk::{BodyType, Color, KeyCode, LogLevel, MouseCode, Vector2, Vector3};
use nebula_core::{
    AssetKind, BoxCollider2DComponent, CircleCollider2DComponent, CircleRendererComponent, Font,
    LayerMask, Rigidbody2DComponent, ScriptComponent, StringRendererComponent, TransformComponent,
};

#[test]
fn test_transform_hierarchy_and_world_space() {
    let (host, bridge) = common::setup();
    let ship = bridge.scene().create_entity("Ship").unwrap();
    let turret = bridge.scene().create_entity("Turret").unwrap();
    host.set_parent(turret.handle(), Some(ship.handle())).unwrap();

    ship.set_translation(Vector3::new(10.0, 0.0, 0.0)).unwrap();
    ship.set_scale(Vector3::splat(2.0)).unwrap();
    turret.set_translation(Vector3::new(1.0, 0.5, 0.0)).unwrap();

    let transform = turret.require_component::<TransformComponent>().unwrap();
    assert_eq!(
        transform.world_translation().unwrap(),
        Vector3::new(12.0, 1.0, 0.0)
    );
    assert_eq!(transform.world_scale().unwrap(), Vector3::splat(2.0));
    assert_eq!(transform.translation().unwrap(), Vector3::new(1.0, 0.5, 0.0));

    assert_eq!(turret.parent().unwrap(), Some(ship.clone()));
    assert_eq!(ship.child_count().unwrap(), 1);
    assert_eq!(ship.children().unwrap(), vec![turret.clone()]);
    assert_eq!(ship.find_child_by_name("Turret").unwrap(), Some(turret));
    assert!(ship.find_child_by_name("Engine").unwrap().is_none());
}

#[test]
fn test_destroy_cascades_to_children() {
    let (host, bridge) = common::setup();
    let parent = bridge.scene().create_entity("Parent").unwrap();
    let child = bridge.scene().create_entity("Child").unwrap();
    host.set_parent(child.handle(), Some(parent.handle())).unwrap();

    parent.destroy().unwrap();
    assert!(!child.is_valid());
    assert_eq!(host.entity_count(), 0);
}

#[test]
fn test_entity_identity_properties() {
    let (_host, bridge) = common::setup();
    let e = bridge.scene().create_entity("Enemy").unwrap();

    e.set_name("Boss").unwrap();
    e.set_layer(0b100).unwrap();
    assert_eq!(e.name().unwrap(), "Boss");
    assert_eq!(e.layer().unwrap(), 0b100);
    assert_eq!(bridge.scene().find_entity_by_name("Boss"), Some(e.clone()));
    assert!(bridge.scene().find_entity_by_name("Enemy").is_none());
    assert_eq!(e.to_string(), format!("Entity({})", e.handle()));
}

#[test]
fn test_script_component_class_name() {
    let (_host, bridge) = common::setup();
    let e = bridge.scene().create_entity("Scripted").unwrap();
    let script = e.add_component::<ScriptComponent>().unwrap();

    assert_eq!(script.class_name().unwrap(), "");
    script.set_class_name("Game.Player").unwrap();
    assert_eq!(script.class_name().unwrap(), "Game.Player");
}

#[test]
fn test_circle_renderer_properties() {
    let (_host, bridge) = common::setup();
    let e = bridge.scene().create_entity("Ring").unwrap();
    let circle = e.add_component::<CircleRendererComponent>().unwrap();

    circle.set_radius(2.5).unwrap();
    circle.set_thickness(0.25).unwrap();
    circle.set_fade(0.0).unwrap();
    circle.set_colour(Color::rgb(0.0, 1.0, 0.0)).unwrap();

    assert_eq!(circle.radius().unwrap(), 2.5);
    assert_eq!(circle.thickness().unwrap(), 0.25);
    assert_eq!(circle.fade().unwrap(), 0.0);
    assert_eq!(circle.colour().unwrap(), Color::rgb(0.0, 1.0, 0.0));
}

#[test]
fn test_string_renderer_text_and_font() {
    let (_host, bridge) = common::setup();
    let e = bridge.scene().create_entity("Label").unwrap();
    let label = e.add_component::<StringRendererComponent>().unwrap();

    label.set_text("Score: 42").unwrap();
    label.set_bold(true).unwrap();
    label.set_kerning(0.1).unwrap();
    label.set_line_spacing(1.5).unwrap();
    assert_eq!(label.text().unwrap(), "Score: 42");
    assert!(label.bold().unwrap());
    assert!(!label.italic().unwrap());
    assert_eq!(label.kerning().unwrap(), 0.1);
    assert_eq!(label.line_spacing().unwrap(), 1.5);

    assert!(label.font().unwrap().is_none());
    let font = Font::load(&bridge, "fonts/mono.ttf").unwrap();
    label.set_font(Some(&font)).unwrap();
    assert_eq!(label.font().unwrap(), Some(font));
    label.set_font(None).unwrap();
    assert!(label.font().unwrap().is_none());
}

#[test]
fn test_rigidbody_impulses_move_the_body() {
    let (host, bridge) = common::setup();
    let ball = bridge.scene().create_entity("Ball").unwrap();
    let body = ball.add_component::<Rigidbody2DComponent>().unwrap();

    assert_eq!(body.body_type().unwrap(), BodyType::Static);
    body.set_body_type(BodyType::Dynamic).unwrap();
    body.set_fixed_rotation(true).unwrap();
    assert!(body.fixed_rotation().unwrap());

    body.apply_linear_impulse_to_center(Vector2::new(4.0, 0.0), true)
        .unwrap();
    body.apply_linear_impulse(Vector2::new(0.0, 2.0), Vector2::new(1.0, 1.0), true)
        .unwrap();
    assert_eq!(body.linear_velocity().unwrap(), Vector2::new(4.0, 2.0));

    host.step(0.5);
    assert_eq!(ball.translation().unwrap(), Vector3::new(2.0, 1.0, 0.0));

    body.apply_force_to_center(Vector2::new(0.0, -2.0), true).unwrap();
    body.apply_force(Vector2::new(-2.0, 0.0), Vector2::ZERO, true)
        .unwrap();
    host.step(1.0);
    assert_eq!(body.linear_velocity().unwrap(), Vector2::new(2.0, 0.0));
}

#[test]
fn test_colliders_and_layer_masks() {
    let (_host, bridge) = common::setup();
    let wall = bridge.scene().create_entity("Wall").unwrap();
    let boxed = wall.add_component::<BoxCollider2DComponent>().unwrap();

    assert_eq!(boxed.mask().unwrap(), LayerMask::ALL);
    let mask = LayerMask::PLAYER | LayerMask::PROJECTILE;
    boxed.set_mask(mask).unwrap();
    assert_eq!(boxed.mask().unwrap(), mask);

    boxed.set_size(Vector2::new(4.0, 0.5)).unwrap();
    boxed.set_offset(Vector2::new(0.0, -1.0)).unwrap();
    boxed.set_friction(0.9).unwrap();
    boxed.set_restitution(0.2).unwrap();
    boxed.set_threshold(1.0).unwrap();
    boxed.set_density(3.0).unwrap();
    assert_eq!(boxed.size().unwrap(), Vector2::new(4.0, 0.5));
    assert_eq!(boxed.offset().unwrap(), Vector2::new(0.0, -1.0));
    assert_eq!(boxed.friction().unwrap(), 0.9);
    assert_eq!(boxed.restitution().unwrap(), 0.2);
    assert_eq!(boxed.threshold().unwrap(), 1.0);
    assert_eq!(boxed.density().unwrap(), 3.0);

    let coin = bridge.scene().create_entity("Coin").unwrap();
    let circle = coin.add_component::<CircleCollider2DComponent>().unwrap();
    circle.set_radius(0.25).unwrap();
    circle.set_mask(LayerMask::TRIGGER).unwrap();
    assert_eq!(circle.radius().unwrap(), 0.25);
    assert_eq!(circle.mask().unwrap(), LayerMask::TRIGGER);

    // Components are per-entity
    assert!(!coin.has_component::<BoxCollider2DComponent>().unwrap());
}

#[test]
fn test_missing_component_surfaces_as_host_error() {
    let (_host, bridge) = common::setup();
    let a = bridge.scene().create_entity("A").unwrap();
    let b = bridge.scene().create_entity("B").unwrap();

    // A proxy built on one entity is not valid for another
    let circle = a.add_component::<CircleRendererComponent>().unwrap();
    assert!(circle.radius().is_ok());
    assert!(!b.has_component::<CircleRendererComponent>().unwrap());
    assert!(b.require_component::<CircleRendererComponent>().is_err());
}

#[test]
fn test_input_application_and_time() {
    let (host, bridge) = common::setup();

    host.set_key_down(KeyCode::W, true);
    host.set_mouse_button_down(MouseCode::LEFT, true);
    host.set_mouse_position(Vector2::new(320.0, 200.0));
    host.set_window_size(Vector2::new(1920.0, 1080.0));
    host.step(1.0 / 60.0);

    let input = bridge.input();
    assert!(input.is_key_down(KeyCode::W));
    assert!(!input.is_key_down(KeyCode::S));
    assert!(input.is_mouse_button_down(MouseCode::LEFT));
    assert_eq!(input.mouse_position(), Vector2::new(320.0, 200.0));
    assert_eq!(bridge.application().window_size(), Vector2::new(1920.0, 1080.0));
    assert_eq!(bridge.time().delta_time(), 1.0 / 60.0);

    assert!(bridge.application().hovered_entity().is_none());
    let e = bridge.scene().create_entity("Hovered").unwrap();
    host.set_hovered_entity(e.handle());
    assert_eq!(bridge.application().hovered_entity(), Some(e));
}

#[test]
fn test_script_log_lines_reach_the_host() {
    let (host, bridge) = common::setup();
    let debug = bridge.debug();
    debug.log("ready");
    debug.warn("low ammo");
    debug.error("out of bounds");

    assert_eq!(
        host.take_logs(),
        vec![
            (LogLevel::Info, "ready".to_owned()),
            (LogLevel::Warn, "low ammo".to_owned()),
            (LogLevel::Error, "out of bounds".to_owned()),
        ]
    );
}
