//! Presentation-layer content: asset catalogs, widget placement, and the
//! order, recipe and upgrade tables the widgets display.

use kitchen_core::{
    bg_cfg, playback_cfg, pos, progress_cfg, text_cfg, Cooker, ImageEntry, ImageId,
    ImagesConfig, IngredientAreaUiConfig, KeywordEntryUiConfig, MoneyUiConfig, Order,
    OrderBarUiConfig, OrderIngredient, PanelOverrides, PlaybackConfig, PlaybackOverrides,
    Position, PreparationAreaConfig, Recipe, SoundEntry, SoundId, SoundsConfig, StateUiConfig,
    StoreConfig, StoreUpgrade, TextOverrides, UiConfig, UpgradeAction,
};
use tracing::debug;

use crate::GenArgs;

/// Image catalog: (id, asset file, width, height).
static IMAGES: &[(&str, &str, f64, f64)] = &[
    ("BaconCooked", "bacon_cooked.png", 100.0, 70.0),
    ("BaconRaw", "bacon_raw.png", 100.0, 60.0),
    ("BurgerBottom", "burger_bottom.png", 100.0, 30.0),
    ("BurgerTop", "burger_top.png", 100.0, 30.0),
    ("ClosedSign", "closed_sign.png", 300.0, 200.0),
    ("CookedPatty", "cooked_patty.png", 100.0, 30.0),
    ("Curry", "curry.png", 100.0, 140.0),
    ("CurryCrab", "curry_crab.png", 150.0, 100.0),
    ("Dumplings", "dumplings.png", 100.0, 60.0),
    ("EggsFried", "eggs_fried.png", 100.0, 70.0),
    ("EggsRaw", "eggs_raw.png", 100.0, 60.0),
    ("Flour", "flour.png", 100.0, 100.0),
    ("LettuceLeaf", "lettuce_leaf.png", 100.0, 30.0),
    ("MoneyBag", "money_bag.png", 100.0, 120.0),
    ("OpenSign", "open_sign.png", 300.0, 200.0),
    ("OverlayArrowUp", "overlay_arrow_up.png", 40.0, 40.0),
    ("OverlayPlus", "overlay_plus.png", 40.0, 40.0),
    ("Pan", "pan.png", 200.0, 30.0),
    ("Plate", "plate.png", 100.0, 30.0),
    ("RawCrab", "raw_crab.png", 100.0, 60.0),
    ("RawPatty", "raw_patty.png", 100.0, 30.0),
    ("TomatoSlice", "tomato_slice.png", 100.0, 30.0),
    ("TriniPot", "trini_pot.png", 180.0, 100.0),
];

/// Sound catalog: (id, variant files).
static SOUNDS: &[(&str, &[&str])] = &[
    ("Coins", &["coins_1.mp3", "coins_2.mp3", "coins_3.mp3"]),
    ("Frying", &["frying_1.mp3"]),
    ("Done", &["done_1.mp3"]),
];

type OrderRow = (f64, f64, &'static [(&'static str, f64, i32)]);

/// Orders: (weight, depreciation seconds, [(ingredient, chance, price)]).
static ORDERS: &[OrderRow] = &[
    // Burger
    (
        1.0,
        5.0,
        &[
            ("BurgerBottom", 1.0, 3),
            ("CookedPatty", 1.0, 8),
            ("LettuceLeaf", 0.7, 4),
            ("TomatoSlice", 0.6, 5),
            ("BurgerTop", 1.0, 3),
        ],
    ),
    // Salad
    (0.5, 5.0, &[("LettuceLeaf", 1.0, 8), ("TomatoSlice", 1.0, 10)]),
    // Curry crab
    (0.5, 8.0, &[("CurryCrab", 1.0, 30), ("Dumplings", 1.0, 10)]),
    // Egg sandwich
    (
        1.0,
        8.0,
        &[
            ("BurgerBottom", 1.0, 5),
            ("EggsFried", 1.0, 7),
            ("BaconCooked", 0.3, 8),
            ("BurgerTop", 1.0, 5),
        ],
    ),
    // Bacon sandwich
    (
        1.0,
        8.0,
        &[
            ("BurgerBottom", 1.0, 5),
            ("BaconCooked", 1.0, 8),
            ("LettuceLeaf", 0.8, 3),
            ("TomatoSlice", 0.7, 4),
            ("BurgerTop", 1.0, 5),
        ],
    ),
];

/// Upgrade tracks: (action, image, tier costs in purchase order).
static UPGRADE_TRACKS: &[(UpgradeAction, &str, &[i32])] = &[
    (UpgradeAction::UnlockIngredient, "BurgerBottom", &[10]),
    (UpgradeAction::UnlockIngredient, "BurgerTop", &[10]),
    (UpgradeAction::UnlockIngredient, "RawPatty", &[40]),
    (UpgradeAction::UnlockIngredient, "BaconRaw", &[30]),
    (UpgradeAction::UnlockIngredient, "EggsRaw", &[30]),
    (UpgradeAction::UnlockIngredient, "Flour", &[20]),
    (UpgradeAction::UnlockIngredient, "Curry", &[20]),
    (UpgradeAction::UnlockIngredient, "RawCrab", &[100]),
    (UpgradeAction::UnlockCooker, "Pan", &[50, 200, 300]),
    (UpgradeAction::UnlockCooker, "TriniPot", &[200, 300, 400]),
    (UpgradeAction::IncreaseLimit, "MoneyBag", &[80, 180, 380]),
];

fn img(image: &str, image_name: &str, width: f64, height: f64) -> ImageEntry {
    ImageEntry {
        image: ImageId::new(image),
        image_name: image_name.to_string(),
        width,
        height,
    }
}

fn snd(sound: &str, sound_names: &[&str]) -> SoundEntry {
    SoundEntry {
        sound: SoundId::new(sound),
        sound_names: sound_names.iter().map(|s| s.to_string()).collect(),
    }
}

fn ord_ing(ing: &str, chance: f64, price: i32) -> OrderIngredient {
    OrderIngredient {
        ing: ImageId::new(ing),
        chance,
        price,
    }
}

fn order_cfg(weight: f64, depreciation_seconds: f64, ings: Vec<OrderIngredient>) -> Order {
    Order {
        weight,
        depreciation_seconds,
        ings,
    }
}

fn recipe(inputs: &[&str], outputs: &[&str], cook_time: f64) -> Recipe {
    Recipe {
        inputs: inputs.iter().map(|s| ImageId::new(*s)).collect(),
        outputs: outputs.iter().map(|s| ImageId::new(*s)).collect(),
        cook_time,
    }
}

fn cooker_cfg(
    base_image: &str,
    base_offset: Position,
    cooking_sound: PlaybackConfig,
    done_cooking_sound: PlaybackConfig,
    recipes: Vec<Recipe>,
    instances: Vec<Position>,
) -> Cooker {
    Cooker {
        base_image: ImageId::new(base_image),
        base_offset,
        cooking_sound,
        done_cooking_sound,
        recipes,
        instances,
        num_unlocked: 0,
    }
}

fn command_text() -> TextOverrides {
    TextOverrides::default().center_and_fit(true).is_command(true)
}

pub(crate) fn images() -> ImagesConfig {
    ImagesConfig {
        scale: 1.0,
        images: IMAGES
            .iter()
            .map(|&(id, file, w, h)| img(id, file, w, h))
            .collect(),
    }
}

pub(crate) fn sounds() -> SoundsConfig {
    SoundsConfig {
        sounds: SOUNDS.iter().map(|&(id, files)| snd(id, files)).collect(),
    }
}

pub(crate) fn orders() -> Vec<Order> {
    ORDERS
        .iter()
        .map(|&(weight, depreciation, ings)| {
            order_cfg(
                weight,
                depreciation,
                ings.iter()
                    .map(|&(ing, chance, price)| ord_ing(ing, chance, price))
                    .collect(),
            )
        })
        .collect()
}

pub(crate) fn upgrade_tracks() -> Vec<Vec<StoreUpgrade>> {
    UPGRADE_TRACKS
        .iter()
        .map(|&(action, image, costs)| {
            costs
                .iter()
                .map(|&cost| StoreUpgrade::new(action, image, cost))
                .collect()
        })
        .collect()
}

fn order_bar() -> OrderBarUiConfig {
    OrderBarUiConfig {
        pos: pos(1200, 400),
        order_margin: 20.0,
        bg: bg_cfg(-50, -300, 1340, 500, "black", "pink", PanelOverrides::default()),
        text_price: text_cfg(0, 40, 48, TextOverrides::default().center_and_fit(true)),
        text_keyword: text_cfg(0, 100, 48, command_text()),
        text_remaining: text_cfg(10, -270, 48, TextOverrides::default().style("white")),
        progress_bar: progress_cfg(0, 30, 100, 5),
        money_sound: playback_cfg("Coins", PlaybackOverrides::default()),
        orders: orders(),
    }
}

fn ingredient_area() -> IngredientAreaUiConfig {
    IngredientAreaUiConfig {
        pos: pos(80, 800),
        grid_width: 5,
        grid_item_width: 170.0,
        grid_item_height: 200.0,
        bg: bg_cfg(
            -50,
            -150,
            900,
            500,
            "black",
            "orange",
            PanelOverrides::default().border_alpha(0.3).border_width(5),
        ),
        text: text_cfg(0, 0, 48, command_text()),
    }
}

fn preparation_area() -> PreparationAreaConfig {
    let frying = || playback_cfg("Frying", PlaybackOverrides::default().random_start(true));
    let done = || playback_cfg("Done", PlaybackOverrides::default());

    PreparationAreaConfig {
        pos: pos(1200, 800),
        bg: bg_cfg(
            -50,
            -70,
            1300,
            700,
            "black",
            "orange",
            PanelOverrides::default().border_alpha(0.3),
        ),
        text: text_cfg(0, 0, 48, command_text()),
        progress: progress_cfg(0, 30, 100, 5),
        cookers: vec![
            cooker_cfg(
                "Pan",
                pos(-10, 10),
                frying(),
                done(),
                vec![
                    recipe(&["RawPatty"], &["CookedPatty"], 10.0),
                    recipe(&["EggsRaw"], &["EggsFried"], 6.0),
                    recipe(&["BaconRaw"], &["BaconCooked"], 8.0),
                ],
                vec![pos(0, 100), pos(300, 100), pos(600, 100)],
            ),
            cooker_cfg(
                "TriniPot",
                pos(0, 10),
                frying(),
                done(),
                vec![
                    recipe(&["RawCrab", "Curry"], &["CurryCrab"], 15.0),
                    recipe(&["Flour"], &["Dumplings"], 5.0),
                ],
                vec![pos(0, 550), pos(300, 550), pos(600, 550)],
            ),
        ],
    }
}

fn store() -> StoreConfig {
    StoreConfig {
        pos: pos(40, 600),
        bg: bg_cfg(
            -20,
            -180,
            2000,
            500,
            "black",
            "gold",
            PanelOverrides::default().border_alpha(0.3),
        ),
        text_keyword: text_cfg(0, 0, 48, command_text()),
        text_price: text_cfg(
            0,
            40,
            48,
            TextOverrides::default().style("gold").center_and_fit(true),
        ),
        upgrades: upgrade_tracks(),
    }
}

fn keyword_entry() -> KeywordEntryUiConfig {
    KeywordEntryUiConfig {
        pos: pos(20, 1300),
        caret_speed: 3.0,
        bg: bg_cfg(
            -10,
            -25,
            1000,
            100,
            "black",
            "white",
            PanelOverrides::default()
                .border_alpha(0.3)
                .border_width(5)
                .bg_alpha(0.8),
        ),
        text: text_cfg(0, 0, 48, TextOverrides::default().style("black").alpha(1)),
    }
}

fn state() -> StateUiConfig {
    StateUiConfig {
        pos: pos(650, 250),
        // border_alpha stays at the default here
        bg: bg_cfg(-50, -70, 500, 500, "black", "orange", PanelOverrides::default()),
        clock_r1: 150.0,
        clock_r2: 50.0,
        text: text_cfg(0, 0, 48, command_text()),
        progress: progress_cfg(0, 0, 200, 5),
    }
}

fn money() -> MoneyUiConfig {
    MoneyUiConfig {
        pos: pos(50, 50),
        bg: bg_cfg(
            0,
            -20,
            400,
            250,
            "black",
            "green",
            PanelOverrides::default().border_alpha(0.3),
        ),
        text: text_cfg(
            40,
            40,
            128,
            TextOverrides::default()
                .style("black")
                .filled_style("gold")
                .stroke(true)
                .alpha(1),
        ),
    }
}

/// Build every presentation section. `args` is reserved for future use.
pub fn gen_ui_config(_args: &GenArgs) -> UiConfig {
    let ui = UiConfig {
        images: images(),
        sounds: sounds(),
        order_bar: order_bar(),
        ingredient_area: ingredient_area(),
        preparation_area: preparation_area(),
        store: store(),
        keyword_entry: keyword_entry(),
        state: state(),
        money: money(),
        fps: text_cfg(0, 0, 30, TextOverrides::default().style("black").alpha(0.7)),
    };
    debug!(
        images = ui.images.images.len(),
        sounds = ui.sounds.sounds.len(),
        orders = ui.order_bar.orders.len(),
        cookers = ui.preparation_area.cookers.len(),
        upgrade_tracks = ui.store.upgrades.len(),
        "assembled ui config"
    );
    ui
}
