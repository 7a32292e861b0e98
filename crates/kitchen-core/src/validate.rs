//! Post-assembly checks: identifier integrity across sections and numeric
//! bounds. All issues are collected before failing.

use std::collections::BTreeSet;

use tracing::warn;

use crate::{
    Config, Cooker, ImageId, PanelConfig, PlaybackConfig, ProgressConfig, Recipe, SoundId, TextConfig,
    UpgradeAction, ValidationError, ValidationReport,
};

/// Grow `available` with the outputs of every recipe whose inputs are all
/// available, until nothing changes.
pub fn close_over_recipes(available: &mut BTreeSet<ImageId>, recipes: &[&Recipe]) {
    loop {
        let mut grew = false;
        for recipe in recipes {
            if recipe.inputs.iter().all(|i| available.contains(i)) {
                for out in &recipe.outputs {
                    grew |= available.insert(out.clone());
                }
            }
        }
        if !grew {
            break;
        }
    }
}

/// Whether some instance of `cooker` can ever be used: it needs a slot, and
/// either starts unlocked or has a store track that unlocks it.
fn cooker_reachable(config: &Config, cooker: &Cooker) -> bool {
    if cooker.instances.is_empty() {
        return false;
    }
    cooker.num_unlocked > 0
        || config
            .ui
            .store
            .upgrades
            .iter()
            .flatten()
            .any(|u| u.action == UpgradeAction::UnlockCooker && u.img == cooker.base_image)
}

/// Every ingredient a session could ever hold: starting ingredients, store
/// ingredient unlocks, and anything cookable from those on a cooker that can
/// be unlocked.
pub fn obtainable_ingredients(config: &Config) -> BTreeSet<ImageId> {
    let mut available: BTreeSet<ImageId> =
        config.game.ingredient_area.ingredients.iter().cloned().collect();
    available.extend(
        config
            .ui
            .store
            .upgrades
            .iter()
            .flatten()
            .filter(|u| u.action == UpgradeAction::UnlockIngredient)
            .map(|u| u.img.clone()),
    );
    let recipes: Vec<&Recipe> = config
        .ui
        .preparation_area
        .cookers
        .iter()
        .filter(|c| cooker_reachable(config, c))
        .flat_map(|c| c.recipes.iter())
        .collect();
    close_over_recipes(&mut available, &recipes);
    available
}

struct Checker {
    images: BTreeSet<ImageId>,
    sounds: BTreeSet<SoundId>,
    issues: Vec<ValidationError>,
}

impl Checker {
    fn image(&mut self, path: String, id: &ImageId) {
        if !self.images.contains(id) {
            self.issues.push(ValidationError::UnknownImage {
                path,
                id: id.clone(),
            });
        }
    }

    fn playback(&mut self, path: String, cfg: &PlaybackConfig) {
        if !self.sounds.contains(&cfg.sound) {
            self.issues.push(ValidationError::UnknownSound {
                path: format!("{path}.sound"),
                id: cfg.sound.clone(),
            });
        }
    }

    fn alpha(&mut self, path: String, value: f64) {
        if !(0.0..=1.0).contains(&value) {
            self.issues
                .push(ValidationError::AlphaOutOfRange { path, value });
        }
    }

    fn panel(&mut self, path: &str, cfg: &PanelConfig) {
        self.alpha(format!("{path}.border_alpha"), cfg.border_alpha);
        self.alpha(format!("{path}.bg_alpha"), cfg.bg_alpha);
    }

    fn text(&mut self, path: &str, cfg: &TextConfig) {
        self.alpha(format!("{path}.alpha"), cfg.alpha);
    }

    fn progress(&mut self, path: &str, cfg: &ProgressConfig) {
        self.alpha(format!("{path}.done_alpha"), cfg.done_alpha);
        self.panel(&format!("{path}.bg"), &cfg.bg);
    }
}

/// Validate the whole tree, returning every issue found.
pub fn validate_config(config: &Config) -> Result<(), ValidationReport> {
    let ui = &config.ui;
    let mut c = Checker {
        images: BTreeSet::new(),
        sounds: BTreeSet::new(),
        issues: Vec::new(),
    };

    for (i, img) in ui.images.images.iter().enumerate() {
        if !c.images.insert(img.image.clone()) {
            c.issues.push(ValidationError::DuplicateImage {
                path: format!("ui.images.images[{i}]"),
                id: img.image.clone(),
            });
        }
    }
    for (i, snd) in ui.sounds.sounds.iter().enumerate() {
        if !c.sounds.insert(snd.sound.clone()) {
            c.issues.push(ValidationError::DuplicateSound {
                path: format!("ui.sounds.sounds[{i}]"),
                id: snd.sound.clone(),
            });
        }
        if snd.sound_names.is_empty() {
            c.issues.push(ValidationError::EmptySoundVariants {
                path: format!("ui.sounds.sounds[{i}]"),
            });
        }
    }

    // Order bar
    c.panel("ui.order_bar.bg", &ui.order_bar.bg);
    c.text("ui.order_bar.text_price", &ui.order_bar.text_price);
    c.text("ui.order_bar.text_keyword", &ui.order_bar.text_keyword);
    c.text("ui.order_bar.text_remaining", &ui.order_bar.text_remaining);
    c.progress("ui.order_bar.progress_bar", &ui.order_bar.progress_bar);
    c.playback("ui.order_bar.money_sound".into(), &ui.order_bar.money_sound);
    let obtainable = obtainable_ingredients(config);
    for (i, order) in ui.order_bar.orders.iter().enumerate() {
        let base = format!("ui.order_bar.orders[{i}]");
        if order.weight.is_nan() || order.weight <= 0.0 {
            c.issues.push(ValidationError::NonPositiveWeight {
                path: format!("{base}.weight"),
                value: order.weight,
            });
        }
        for (j, ing) in order.ings.iter().enumerate() {
            let path = format!("{base}.ings[{j}]");
            if !(0.0..=1.0).contains(&ing.chance) {
                c.issues.push(ValidationError::ChanceOutOfRange {
                    path: format!("{path}.chance"),
                    value: ing.chance,
                });
            }
            c.image(format!("{path}.ing"), &ing.ing);
            if !obtainable.contains(&ing.ing) {
                c.issues.push(ValidationError::UnobtainableIngredient {
                    path: format!("{path}.ing"),
                    id: ing.ing.clone(),
                });
            }
        }
    }

    // Ingredient area
    c.panel("ui.ingredient_area.bg", &ui.ingredient_area.bg);
    c.text("ui.ingredient_area.text", &ui.ingredient_area.text);
    for (i, ing) in config.game.ingredient_area.ingredients.iter().enumerate() {
        c.image(format!("game.ingredient_area.ingredients[{i}]"), ing);
    }

    // Preparation area
    let prep = &ui.preparation_area;
    c.panel("ui.preparation_area.bg", &prep.bg);
    c.text("ui.preparation_area.text", &prep.text);
    c.progress("ui.preparation_area.progress", &prep.progress);
    for (i, cooker) in prep.cookers.iter().enumerate() {
        let base = format!("ui.preparation_area.cookers[{i}]");
        c.image(format!("{base}.base_image"), &cooker.base_image);
        c.playback(format!("{base}.cooking_sound"), &cooker.cooking_sound);
        c.playback(format!("{base}.done_cooking_sound"), &cooker.done_cooking_sound);
        for (j, recipe) in cooker.recipes.iter().enumerate() {
            for (k, id) in recipe.inputs.iter().enumerate() {
                c.image(format!("{base}.recipes[{j}].inputs[{k}]"), id);
            }
            for (k, id) in recipe.outputs.iter().enumerate() {
                c.image(format!("{base}.recipes[{j}].outputs[{k}]"), id);
            }
        }
    }

    // Store
    c.panel("ui.store.bg", &ui.store.bg);
    c.text("ui.store.text_keyword", &ui.store.text_keyword);
    c.text("ui.store.text_price", &ui.store.text_price);
    for (i, track) in ui.store.upgrades.iter().enumerate() {
        if track.is_empty() {
            c.issues.push(ValidationError::EmptyUpgradeTrack {
                path: format!("ui.store.upgrades[{i}]"),
            });
        }
        for (j, upgrade) in track.iter().enumerate() {
            c.image(format!("ui.store.upgrades[{i}][{j}].img"), &upgrade.img);
            c.image(format!("ui.store.upgrades[{i}][{j}].overlay"), &upgrade.overlay);
        }
    }

    c.panel("ui.keyword_entry.bg", &ui.keyword_entry.bg);
    c.text("ui.keyword_entry.text", &ui.keyword_entry.text);
    c.panel("ui.state.bg", &ui.state.bg);
    c.text("ui.state.text", &ui.state.text);
    c.progress("ui.state.progress", &ui.state.progress);
    c.panel("ui.money.bg", &ui.money.bg);
    c.text("ui.money.text", &ui.money.text);
    c.text("ui.fps", &ui.fps);

    if c.issues.is_empty() {
        return Ok(());
    }
    for issue in &c.issues {
        warn!(%issue, "config validation issue");
    }
    Err(ValidationReport(c.issues))
}
