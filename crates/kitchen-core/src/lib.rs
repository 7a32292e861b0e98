#![deny(warnings)]

//! Core data model for the kitchen configuration tree.
//!
//! This crate defines the serializable records consumed by the renderer and
//! the game logic, the primitive builders that fill them with documented
//! defaults, and the checks that keep identifiers consistent across sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod builders;
pub mod overlay;
pub mod validate;

pub use builders::{
    bg_cfg, playback_cfg, pos, progress_cfg, text_cfg, Overrides, PanelOverrides,
    PlaybackOverrides, TextOverrides,
};
pub use validate::{close_over_recipes, obtainable_ingredients, validate_config};

/// Symbolic image identifier, e.g. "BurgerTop". Ingredients are images too.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Symbolic sound identifier, e.g. "Coins".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(pub String);

impl SoundId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SoundId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 2D offset in screen units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A rectangular styled panel drawn behind a widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    /// Offset from the owning widget position.
    pub offset: Position,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub border_style: String,
    /// Border opacity in [0,1].
    pub border_alpha: f64,
    pub border_width: f64,
    pub bg_style: String,
    /// Fill opacity in [0,1].
    pub bg_alpha: f64,
}

/// Text rendering parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextConfig {
    pub offset: Position,
    pub font: String,
    pub style: String,
    pub stroke: bool,
    pub size: u32,
    pub center_and_fit: bool,
    /// Opacity in [0,1].
    pub alpha: f64,
    /// Content is a keyword the player types rather than a static label.
    pub is_command: bool,
    /// Fill colour used for stroked text; `style` is then the outline.
    #[serde(default)]
    pub filled_style: Option<String>,
}

/// Progress bar drawn on top of a panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressConfig {
    pub done_alpha: f64,
    pub done_style: String,
    pub bg: PanelConfig,
}

/// How a named sound is triggered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    pub sound: SoundId,
    /// Seconds to play before stopping; `None` plays the whole clip.
    pub play_length: Option<f64>,
    /// Start at a random point of the clip.
    pub random_start: bool,
}

/// Catalog entry binding an image id to its asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageEntry {
    pub image: ImageId,
    pub image_name: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    pub scale: f64,
    pub images: Vec<ImageEntry>,
}

/// Catalog entry binding a sound id to one or more randomizable variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundEntry {
    pub sound: SoundId,
    pub sound_names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundsConfig {
    pub sounds: Vec<SoundEntry>,
}

/// One ingredient slot of an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderIngredient {
    pub ing: ImageId,
    /// Probability in [0,1] that the ingredient is part of a given order.
    pub chance: f64,
    /// Payout contribution when included.
    pub price: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Order {
    /// Relative selection probability among orders (> 0).
    pub weight: f64,
    /// Seconds until the order price drops by one.
    pub depreciation_seconds: f64,
    pub ings: Vec<OrderIngredient>,
}

impl Order {
    /// Average payout of this order across its optional ingredients.
    pub fn expected_price(&self) -> f64 {
        self.ings
            .iter()
            .map(|ing| ing.chance * f64::from(ing.price))
            .sum()
    }

    /// Ingredients that are always part of the order.
    pub fn mandatory_ings(&self) -> impl Iterator<Item = &ImageId> {
        self.ings
            .iter()
            .filter(|ing| ing.chance >= 1.0)
            .map(|ing| &ing.ing)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderBarUiConfig {
    pub pos: Position,
    pub order_margin: f64,
    pub bg: PanelConfig,
    pub text_price: TextConfig,
    pub text_keyword: TextConfig,
    pub text_remaining: TextConfig,
    pub progress_bar: ProgressConfig,
    pub money_sound: PlaybackConfig,
    pub orders: Vec<Order>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngredientAreaUiConfig {
    pub pos: Position,
    pub grid_width: u32,
    pub grid_item_width: f64,
    pub grid_item_height: f64,
    pub bg: PanelConfig,
    pub text: TextConfig,
}

/// Transforms a multiset of input ingredients into outputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    pub inputs: Vec<ImageId>,
    pub outputs: Vec<ImageId>,
    /// Seconds.
    pub cook_time: f64,
}

/// A cooking station and its placement slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cooker {
    pub base_image: ImageId,
    pub base_offset: Position,
    pub cooking_sound: PlaybackConfig,
    pub done_cooking_sound: PlaybackConfig,
    pub recipes: Vec<Recipe>,
    pub instances: Vec<Position>,
    /// Initial unlocked instance count. Session progress is tracked outside
    /// the tree and only seeded from this value.
    pub num_unlocked: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreparationAreaConfig {
    pub pos: Position,
    pub bg: PanelConfig,
    pub text: TextConfig,
    pub progress: ProgressConfig,
    pub cookers: Vec<Cooker>,
}

/// Runtime effect of a purchased upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeAction {
    UnlockIngredient,
    UnlockCooker,
    IncreaseLimit,
}

impl UpgradeAction {
    /// Image drawn over the upgrade icon in the store.
    pub fn overlay(self) -> ImageId {
        match self {
            UpgradeAction::UnlockIngredient | UpgradeAction::UnlockCooker => {
                ImageId::new("OverlayPlus")
            }
            UpgradeAction::IncreaseLimit => ImageId::new("OverlayArrowUp"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreUpgrade {
    pub img: ImageId,
    pub cost: i32,
    pub overlay: ImageId,
    pub action: UpgradeAction,
}

impl StoreUpgrade {
    /// Build an upgrade, stamping the overlay that belongs to `action`.
    pub fn new(action: UpgradeAction, img: impl Into<ImageId>, cost: i32) -> Self {
        Self {
            img: img.into(),
            cost,
            overlay: action.overlay(),
            action,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub pos: Position,
    pub bg: PanelConfig,
    pub text_keyword: TextConfig,
    pub text_price: TextConfig,
    /// Upgrade tracks; each track lists its tiers in purchase order.
    pub upgrades: Vec<Vec<StoreUpgrade>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordEntryUiConfig {
    pub pos: Position,
    pub caret_speed: f64,
    pub bg: PanelConfig,
    pub text: TextConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateUiConfig {
    pub pos: Position,
    pub bg: PanelConfig,
    /// Clock outer radius.
    pub clock_r1: f64,
    /// Clock inner radius.
    pub clock_r2: f64,
    pub text: TextConfig,
    pub progress: ProgressConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoneyUiConfig {
    pub pos: Position,
    pub bg: PanelConfig,
    pub text: TextConfig,
}

/// Presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub images: ImagesConfig,
    pub sounds: SoundsConfig,
    pub order_bar: OrderBarUiConfig,
    pub ingredient_area: IngredientAreaUiConfig,
    pub preparation_area: PreparationAreaConfig,
    pub store: StoreConfig,
    pub keyword_entry: KeywordEntryUiConfig,
    pub state: StateUiConfig,
    pub money: MoneyUiConfig,
    pub fps: TextConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngredientAreaGameConfig {
    /// Ingredients available from the start of a session.
    pub ingredients: Vec<ImageId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderBarGameConfig {
    /// Seconds between new orders.
    pub order_period: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateGameConfig {
    /// Seconds in a working day.
    pub day_length: f64,
    pub money_down_sec: f64,
    pub money_down_amt: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoneyGameConfig {
    pub starting_money: i32,
    /// Money cap before any limit upgrade.
    pub max_money: i32,
}

/// Gameplay layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub word_level: u32,
    pub unlock_all: bool,
    pub ingredient_area: IngredientAreaGameConfig,
    pub order_bar: OrderBarGameConfig,
    pub state: StateGameConfig,
    pub money: MoneyGameConfig,
}

/// The complete configuration tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub ui: UiConfig,
    pub game: GameConfig,
}

impl Config {
    /// Look up an image catalog entry.
    pub fn image(&self, id: &ImageId) -> Option<&ImageEntry> {
        self.ui.images.images.iter().find(|img| &img.image == id)
    }

    /// Look up a sound catalog entry.
    pub fn sound(&self, id: &SoundId) -> Option<&SoundEntry> {
        self.ui.sounds.sounds.iter().find(|snd| &snd.sound == id)
    }

    /// Deep-merge a JSON overlay onto this tree and validate the result.
    ///
    /// Objects merge by key, arrays and scalars replace. Keys unknown to the
    /// schema are rejected with their full path.
    pub fn with_overlay(&self, overlay: serde_json::Value) -> Result<Config, ConfigError> {
        let merged = overlay::apply_overlay(self, overlay)?;
        validate_config(&merged)?;
        Ok(merged)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

/// Schema violations in caller-supplied overrides.
#[derive(Debug, Error, PartialEq)]
pub enum OverrideError {
    /// Key not present in the target schema.
    #[error("unknown key `{key}` under `{}`", display_path(.path))]
    UnknownKey { path: String, key: String },
    /// Value does not fit the field type.
    #[error("invalid value under `{}`: {reason}", display_path(.path))]
    InvalidValue { path: String, reason: String },
    /// Override for a record was not an object.
    #[error("override under `{}` must be an object", display_path(.path))]
    NotAnObject { path: String },
}

/// One integrity or bounds issue found in an assembled tree.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{path}: unknown image `{id}`")]
    UnknownImage { path: String, id: ImageId },
    #[error("{path}: unknown sound `{id}`")]
    UnknownSound { path: String, id: SoundId },
    #[error("{path}: ingredient `{id}` can never be obtained")]
    UnobtainableIngredient { path: String, id: ImageId },
    #[error("{path}: duplicate image id `{id}`")]
    DuplicateImage { path: String, id: ImageId },
    #[error("{path}: duplicate sound id `{id}`")]
    DuplicateSound { path: String, id: SoundId },
    #[error("{path}: alpha {value} is outside [0,1]")]
    AlphaOutOfRange { path: String, value: f64 },
    #[error("{path}: chance {value} is outside [0,1]")]
    ChanceOutOfRange { path: String, value: f64 },
    #[error("{path}: order weight must be > 0, got {value}")]
    NonPositiveWeight { path: String, value: f64 },
    #[error("{path}: upgrade track has no tiers")]
    EmptyUpgradeTrack { path: String },
    #[error("{path}: sound has no variants")]
    EmptySoundVariants { path: String },
}

/// Every issue found by [`validate_config`], in discovery order.
#[derive(Debug, PartialEq)]
pub struct ValidationReport(pub Vec<ValidationError>);

impl ValidationReport {
    pub fn issues(&self) -> &[ValidationError] {
        &self.0
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issue(s)", self.0.len())?;
        for issue in &self.0 {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Failure to produce a configuration tree.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid override: {0}")]
    Override(#[from] OverrideError),
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationReport),
}
