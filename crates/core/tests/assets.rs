//! Asset proxies, typed casts and prefabs

mod common;

use nebula_core::engine::HostError;
use nebula_core::sdk::{Color, Vector3};
use nebula_core::{Asset, AssetKind, BridgeError, Font, Material, Prefab, Texture};
use nebula_host::AssetType;

#[test]
fn test_find_does_not_intern() {
    let (host, bridge) = common::setup();

    assert!(Asset::find(&bridge, "textures/crate.png").is_none());
    assert_eq!(host.asset_count(), 0);

    let loaded = Asset::load(&bridge, "textures/crate.png").unwrap();
    assert_eq!(Asset::find(&bridge, "textures/crate.png"), Some(loaded));
    assert_eq!(host.asset_count(), 1);
}

#[test]
fn test_type_follows_the_extension() {
    let (host, bridge) = common::setup();

    let texture = Asset::load(&bridge, "sprites/hero.PNG").unwrap();
    assert_eq!(
        texture.type_token().unwrap(),
        host.asset_token(AssetType::Texture)
    );
    assert!(texture.is::<Texture>().unwrap());
    assert!(!texture.is::<Font>().unwrap());
    assert!(texture.cast::<Font>().unwrap().is_none());
    assert_eq!(
        texture.cast::<Texture>().unwrap().map(|t| t.handle()),
        Some(texture.handle())
    );

    let blob = Asset::load(&bridge, "data/levels.bin").unwrap();
    assert_eq!(blob.type_token().unwrap(), host.asset_token(AssetType::Memory));
}

#[test]
fn test_typed_load_rejects_other_kinds() {
    let (_host, bridge) = common::setup();

    let err = Texture::load(&bridge, "fonts/mono.ttf").unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Host(HostError::WrongAssetType {
            expected: "Texture",
            ..
        })
    ));

    // The path was still interned, as a font
    let font = Font::load(&bridge, "fonts/mono.ttf").unwrap();
    assert_eq!(font.path().unwrap(), "fonts/mono.ttf");
}

#[test]
fn test_material_properties() {
    let (_host, bridge) = common::setup();
    let material = Material::load(&bridge, "materials/brick.nmat").unwrap();

    assert_eq!(material.colour().unwrap(), Color::WHITE);
    assert_eq!(material.tiling().unwrap(), 1.0);
    assert!(material.texture().unwrap().is_none());

    let brick = Texture::load(&bridge, "textures/brick.png").unwrap();
    material.set_texture(Some(&brick)).unwrap();
    material.set_colour(Color::rgb(0.8, 0.3, 0.2)).unwrap();
    material.set_tiling(4.0).unwrap();

    assert_eq!(material.texture().unwrap(), Some(brick));
    assert_eq!(material.colour().unwrap(), Color::rgb(0.8, 0.3, 0.2));
    assert_eq!(material.tiling().unwrap(), 4.0);

    material.set_texture(None).unwrap();
    assert!(material.texture().unwrap().is_none());
}

#[test]
fn test_material_refuses_a_non_texture() {
    let (_host, bridge) = common::setup();
    let material = Material::load(&bridge, "materials/brick.nmat").unwrap();
    let font = Font::load(&bridge, "fonts/mono.ttf").unwrap();

    // Cast through the untyped proxy to sneak a font in
    let sneaky = Texture::from_handle(&bridge, font.handle()).unwrap();
    assert!(sneaky.is_none());

    let err = material
        .asset()
        .invoke("set_texture", |host, a| host.set_material_texture(a, font.handle()))
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Host(HostError::WrongAssetType { .. })
    ));
}

#[test]
fn test_font_variants() {
    let (host, bridge) = common::setup();
    let regular = Font::load(&bridge, "fonts/sans.ttf").unwrap();
    let bold = Font::load(&bridge, "fonts/sans-bold.ttf").unwrap();
    let italic = Font::load(&bridge, "fonts/sans-italic.otf").unwrap();

    assert!(regular.bold().unwrap().is_none());
    assert!(regular.italic().unwrap().is_none());

    host.set_font_variants(regular.handle(), bold.handle(), italic.handle())
        .unwrap();
    assert_eq!(regular.bold().unwrap(), Some(bold));
    assert_eq!(regular.italic().unwrap(), Some(italic));
}

#[test]
fn test_prefab_instantiates_a_copy_of_its_tree() {
    let (host, bridge) = common::setup();
    let root = bridge.scene().create_entity("Enemy").unwrap();
    let gun = bridge.scene().create_entity("Gun").unwrap();
    host.set_parent(gun.handle(), Some(root.handle())).unwrap();
    root.set_translation(Vector3::new(3.0, 0.0, 0.0)).unwrap();

    let handle = host.define_prefab("prefabs/enemy.prefab", root.handle()).unwrap();
    let prefab = Prefab::load(&bridge, "prefabs/enemy.prefab").unwrap();
    assert_eq!(prefab.handle(), handle);

    let spawned = bridge.scene().instantiate(&prefab).unwrap().unwrap();
    assert_ne!(spawned, root);
    assert_eq!(spawned.name().unwrap(), "Enemy");
    assert_eq!(spawned.translation().unwrap(), Vector3::new(3.0, 0.0, 0.0));
    assert!(spawned.parent().unwrap().is_none());

    let spawned_gun = spawned.find_child_by_name("Gun").unwrap().unwrap();
    assert_ne!(spawned_gun, gun);
    assert_eq!(host.entity_count(), 4);

    // The prefab body is a snapshot: later edits to the source do not leak in
    root.set_name("Renamed").unwrap();
    let again = prefab.instantiate().unwrap().unwrap();
    assert_eq!(again.name().unwrap(), "Enemy");
}

#[test]
fn test_empty_prefab_spawns_nothing() {
    let (host, bridge) = common::setup();
    let prefab = Prefab::load(&bridge, "prefabs/empty.prefab").unwrap();

    assert!(prefab.instantiate().unwrap().is_none());
    assert_eq!(host.entity_count(), 0);
}

#[test]
fn test_invalid_paths_are_refused() {
    let (_host, bridge) = common::setup();

    assert!(matches!(
        Asset::load(&bridge, ""),
        Err(BridgeError::Host(HostError::InvalidPath(_)))
    ));
    assert!(matches!(
        Asset::load(&bridge, "bad\0path.png"),
        Err(BridgeError::Host(HostError::InvalidPath(_)))
    ));
}
