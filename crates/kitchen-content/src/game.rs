//! Gameplay-layer content.

use kitchen_core::{
    GameConfig, ImageId, IngredientAreaGameConfig, MoneyGameConfig, OrderBarGameConfig,
    StateGameConfig,
};
use tracing::debug;

use crate::GenArgs;

/// Ingredients on the counter before any store purchase.
static STARTING_INGREDIENTS: &[&str] = &["LettuceLeaf", "TomatoSlice"];

/// Build every gameplay section. `args` is reserved for future use.
pub fn gen_game_config(_args: &GenArgs) -> GameConfig {
    let game = GameConfig {
        word_level: 0,
        unlock_all: false,
        ingredient_area: IngredientAreaGameConfig {
            ingredients: STARTING_INGREDIENTS
                .iter()
                .map(|s| ImageId::new(*s))
                .collect(),
        },
        order_bar: OrderBarGameConfig { order_period: 6.0 },
        state: StateGameConfig {
            day_length: 90.0,
            money_down_sec: 3.0,
            money_down_amt: -1,
        },
        money: MoneyGameConfig {
            starting_money: 0,
            max_money: 100,
        },
    };
    debug!(
        starting_ingredients = game.ingredient_area.ingredients.len(),
        "assembled game config"
    );
    game
}
