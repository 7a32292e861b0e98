#![deny(warnings)]

//! Content for the short-order kitchen: the literal catalogs and the
//! assemblers that turn them into one validated configuration tree.

use kitchen_core::{validate_config, Config, ConfigError};
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::info;

mod game;
mod ui;

pub use game::gen_game_config;
pub use ui::gen_ui_config;

/// Generation options. Currently carries nothing; reserved so callers do not
/// break when parameters are added.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct GenArgs {}

/// Assemble `{ui, game}` without running validation.
pub fn gen_config_unchecked(args: &GenArgs) -> Config {
    Config {
        ui: gen_ui_config(args),
        game: gen_game_config(args),
    }
}

/// Assemble the full tree and check cross-section integrity.
pub fn gen_config(args: &GenArgs) -> Result<Config, ConfigError> {
    let config = gen_config_unchecked(args);
    validate_config(&config)?;
    info!(
        images = config.ui.images.images.len(),
        orders = config.ui.order_bar.orders.len(),
        "built kitchen config"
    );
    Ok(config)
}

static DEFAULT_CONFIG: Lazy<Result<Config, ConfigError>> =
    Lazy::new(|| gen_config(&GenArgs::default()));

/// The default tree, built and validated on first use and shared afterwards.
/// A validation failure is cached and returned on every call.
pub fn default_config() -> Result<&'static Config, &'static ConfigError> {
    DEFAULT_CONFIG.as_ref()
}

/// Asset files the asset pipeline has to provide for a tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResourceManifest {
    pub images: Vec<String>,
    pub sounds: Vec<String>,
}

pub fn resource_names(config: &Config) -> ResourceManifest {
    ResourceManifest {
        images: config
            .ui
            .images
            .images
            .iter()
            .map(|img| img.image_name.clone())
            .collect(),
        sounds: config
            .ui
            .sounds
            .sounds
            .iter()
            .flat_map(|snd| snd.sound_names.iter().cloned())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::{OverrideError, ValidationError};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn default_tree_is_valid() {
        validate_config(default_config().unwrap()).unwrap();
    }

    #[test]
    fn repeated_builds_are_deep_equal() {
        let a = gen_config(&GenArgs::default()).unwrap();
        let b = gen_config(&GenArgs::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a, default_config().unwrap());
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn bounds_hold_across_the_tree() {
        let config = default_config().unwrap();
        for order in &config.ui.order_bar.orders {
            assert!(order.weight > 0.0);
            for ing in &order.ings {
                assert!((0.0..=1.0).contains(&ing.chance));
            }
        }
        // every *_alpha field, wherever it sits
        fn walk(v: &serde_json::Value, out: &mut Vec<f64>) {
            match v {
                serde_json::Value::Object(map) => {
                    for (k, child) in map {
                        if k == "alpha" || k.ends_with("_alpha") {
                            out.extend(child.as_f64());
                        }
                        walk(child, out);
                    }
                }
                serde_json::Value::Array(items) => items.iter().for_each(|i| walk(i, out)),
                _ => {}
            }
        }
        let mut alphas = Vec::new();
        walk(&serde_json::to_value(config).unwrap(), &mut alphas);
        assert!(alphas.len() > 20);
        assert!(alphas.iter().all(|a| (0.0..=1.0).contains(a)));
    }

    #[test]
    fn order_ingredients_are_obtainable() {
        let config = default_config().unwrap();
        let obtainable = kitchen_core::obtainable_ingredients(config);
        for ing in config.ui.order_bar.orders.iter().flat_map(|o| &o.ings) {
            assert!(obtainable.contains(&ing.ing), "{} unobtainable", ing.ing);
        }
    }

    #[test]
    fn manifest_lists_every_variant() {
        let manifest = resource_names(default_config().unwrap());
        assert_eq!(manifest.images.len(), 23);
        assert_eq!(manifest.images[0], "bacon_cooked.png");
        assert_eq!(
            manifest.sounds,
            ["coins_1.mp3", "coins_2.mp3", "coins_3.mp3", "frying_1.mp3", "done_1.mp3"]
        );
    }

    #[test]
    fn overlay_replaces_a_leaf() {
        let merged = default_config().unwrap()
            .with_overlay(json!({"ui": {"state": {"bg": {"border_alpha": 0.3}}}}))
            .unwrap();
        assert_eq!(merged.ui.state.bg.border_alpha, 0.3);
        assert_eq!(merged.ui.state.bg.bg_alpha, default_config().unwrap().ui.state.bg.bg_alpha);
        assert_eq!(merged.game, default_config().unwrap().game);
    }

    #[test]
    fn overlay_with_misspelled_key_is_rejected() {
        let err = default_config().unwrap()
            .with_overlay(json!({"ui": {"state": {"bg": {"birder_alpha": 0.3}}}}))
            .unwrap_err();
        match err {
            ConfigError::Override(OverrideError::UnknownKey { path, key }) => {
                assert_eq!(path, "ui.state.bg");
                assert_eq!(key, "birder_alpha");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn overlay_dropping_starting_ingredients_reports_every_order() {
        let err = default_config().unwrap()
            .with_overlay(json!({"game": {"ingredient_area": {"ingredients": ["Flour"]}}}))
            .unwrap_err();
        let ConfigError::Validation(report) = err else {
            panic!("expected a validation report");
        };
        // lettuce and tomato have no store unlock
        let unobtainable: Vec<&str> = report
            .issues()
            .iter()
            .filter_map(|i| match i {
                ValidationError::UnobtainableIngredient { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert!(unobtainable.len() >= 4);
        assert!(unobtainable.iter().all(|id| *id == "LettuceLeaf" || *id == "TomatoSlice"));
    }

    #[test]
    fn overlay_with_dangling_sound_is_rejected() {
        let err = default_config().unwrap()
            .with_overlay(json!({"ui": {"order_bar": {"money_sound": {"sound": "Kaching"}}}}))
            .unwrap_err();
        let ConfigError::Validation(report) = err else {
            panic!("expected a validation report");
        };
        assert_eq!(
            report.issues(),
            [ValidationError::UnknownSound {
                path: "ui.order_bar.money_sound.sound".into(),
                id: "Kaching".into(),
            }]
        );
    }

    #[test]
    fn default_config_is_validated_once_and_shared() {
        let first = default_config().unwrap();
        let second = default_config().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &gen_config_unchecked(&GenArgs::default()));
    }

    fn fresh() -> Config {
        default_config().unwrap().clone()
    }

    fn issues(config: &Config) -> Vec<ValidationError> {
        validate_config(config).unwrap_err().0
    }

    fn unobtainable(path: &str, id: &str) -> ValidationError {
        ValidationError::UnobtainableIngredient {
            path: path.into(),
            id: id.into(),
        }
    }

    const PAN_TRACK: usize = 8;

    fn pan_dishes_unobtainable() -> Vec<ValidationError> {
        vec![
            unobtainable("ui.order_bar.orders[0].ings[1].ing", "CookedPatty"),
            unobtainable("ui.order_bar.orders[3].ings[1].ing", "EggsFried"),
            unobtainable("ui.order_bar.orders[3].ings[2].ing", "BaconCooked"),
            unobtainable("ui.order_bar.orders[4].ings[1].ing", "BaconCooked"),
        ]
    }

    #[test]
    fn cooker_without_unlock_route_cooks_nothing() {
        let mut config = fresh();
        config.ui.store.upgrades.remove(PAN_TRACK);
        config.game.unlock_all = true;
        assert_eq!(issues(&config), pan_dishes_unobtainable());
    }

    #[test]
    fn cooker_without_slots_cooks_nothing() {
        let mut config = fresh();
        config.ui.preparation_area.cookers[0].instances.clear();
        assert_eq!(issues(&config), pan_dishes_unobtainable());
    }

    #[test]
    fn cooker_unlocked_from_the_start_needs_no_track() {
        let mut config = fresh();
        config.ui.store.upgrades.remove(PAN_TRACK);
        config.ui.preparation_area.cookers[0].num_unlocked = 1;
        validate_config(&config).unwrap();
    }

    #[test]
    fn unknown_cooker_image_is_reported() {
        let mut config = fresh();
        let pan = &mut config.ui.preparation_area.cookers[0];
        pan.base_image = "Wok".into();
        // keep its recipes reachable without the Pan track
        pan.num_unlocked = 1;
        assert_eq!(
            issues(&config),
            [ValidationError::UnknownImage {
                path: "ui.preparation_area.cookers[0].base_image".into(),
                id: "Wok".into(),
            }]
        );
    }

    #[test]
    fn unknown_upgrade_overlay_is_reported() {
        let mut config = fresh();
        config.ui.store.upgrades[0][0].overlay = "OverlayStar".into();
        assert_eq!(
            issues(&config),
            [ValidationError::UnknownImage {
                path: "ui.store.upgrades[0][0].overlay".into(),
                id: "OverlayStar".into(),
            }]
        );
    }

    #[test]
    fn chance_above_one_is_reported() {
        let mut config = fresh();
        config.ui.order_bar.orders[1].ings[0].chance = 1.5;
        assert_eq!(
            issues(&config),
            [ValidationError::ChanceOutOfRange {
                path: "ui.order_bar.orders[1].ings[0].chance".into(),
                value: 1.5,
            }]
        );
    }

    #[test]
    fn zero_weight_is_reported() {
        let mut config = fresh();
        config.ui.order_bar.orders[2].weight = 0.0;
        assert_eq!(
            issues(&config),
            [ValidationError::NonPositiveWeight {
                path: "ui.order_bar.orders[2].weight".into(),
                value: 0.0,
            }]
        );
    }

    #[test]
    fn duplicate_catalog_entries_are_reported() {
        let mut config = fresh();
        let bacon = config.ui.images.images[0].clone();
        config.ui.images.images.push(bacon);
        let coins = config.ui.sounds.sounds[0].clone();
        config.ui.sounds.sounds.push(coins);
        assert_eq!(
            issues(&config),
            [
                ValidationError::DuplicateImage {
                    path: "ui.images.images[23]".into(),
                    id: "BaconCooked".into(),
                },
                ValidationError::DuplicateSound {
                    path: "ui.sounds.sounds[3]".into(),
                    id: "Coins".into(),
                },
            ]
        );
    }

    #[test]
    fn empty_track_is_reported() {
        let mut config = fresh();
        config.ui.store.upgrades.push(Vec::new());
        assert_eq!(
            issues(&config),
            [ValidationError::EmptyUpgradeTrack {
                path: "ui.store.upgrades[11]".into(),
            }]
        );
    }

    #[test]
    fn sound_without_variants_is_reported() {
        let mut config = fresh();
        config.ui.sounds.sounds[1].sound_names.clear();
        assert_eq!(
            issues(&config),
            [ValidationError::EmptySoundVariants {
                path: "ui.sounds.sounds[1]".into(),
            }]
        );
    }

    #[test]
    fn every_defect_is_reported_not_just_the_first() {
        let mut config = fresh();
        config.ui.order_bar.orders[1].ings[0].chance = 1.5;
        config.ui.order_bar.orders[2].weight = 0.0;
        assert_eq!(
            issues(&config),
            [
                ValidationError::ChanceOutOfRange {
                    path: "ui.order_bar.orders[1].ings[0].chance".into(),
                    value: 1.5,
                },
                ValidationError::NonPositiveWeight {
                    path: "ui.order_bar.orders[2].weight".into(),
                    value: 0.0,
                },
            ]
        );
    }

    #[test]
    fn overlay_type_error_names_the_field() {
        let err = default_config()
            .unwrap()
            .with_overlay(json!({"ui": {"money": {"text": {"alpha": "opaque"}}}}))
            .unwrap_err();
        let ConfigError::Override(OverrideError::InvalidValue { path, .. }) = err else {
            panic!("expected an invalid value");
        };
        assert_eq!(path, "ui.money.text.alpha");
    }

    #[test]
    fn overlay_type_error_inside_replaced_array_names_the_array() {
        let err = default_config()
            .unwrap()
            .with_overlay(json!({"game": {"ingredient_area": {"ingredients": [5]}}}))
            .unwrap_err();
        let ConfigError::Override(OverrideError::InvalidValue { path, .. }) = err else {
            panic!("expected an invalid value");
        };
        assert!(path.starts_with("game.ingredient_area.ingredients"), "{path}");
    }

    proptest! {
        #[test]
        fn any_unit_alpha_overlay_is_accepted(a in 0.0f64..=1.0) {
            let merged = default_config().unwrap()
                .with_overlay(json!({"ui": {"money": {"text": {"alpha": a}}}}))
                .unwrap();
            prop_assert_eq!(merged.ui.money.text.alpha, a);
        }

        #[test]
        fn alpha_above_one_is_reported(a in 1.001f64..100.0) {
            let err = default_config().unwrap()
                .with_overlay(json!({"ui": {"fps": {"alpha": a}}}))
                .unwrap_err();
            let is_alpha_issue = matches!(
                err,
                ConfigError::Validation(ref r)
                    if matches!(r.issues(), [ValidationError::AlphaOutOfRange { path, .. }] if path == "ui.fps.alpha")
            );
            prop_assert!(is_alpha_issue);
        }
    }
}
