#![deny(warnings)]

//! Per-session progression state: which ingredients and cooker instances
//! are unlocked, how far each store track has been bought, and the money
//! balance. The configuration tree stays read-only; this state is seeded
//! from it and consulted alongside it.

use std::collections::BTreeSet;

use kitchen_core::{close_over_recipes, Config, ImageId, Recipe, StoreUpgrade, UpgradeAction};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("no upgrade track {track} (store has {tracks})")]
    UnknownTrack { track: usize, tracks: usize },
    #[error("upgrade track {track} is fully purchased")]
    TrackExhausted { track: usize },
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i32, available: i32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnlockState {
    ingredients: BTreeSet<ImageId>,
    /// Unlocked instance count per cooker, indexed like `preparation_area.cookers`.
    cookers: Vec<u32>,
    /// Next tier to buy per store track.
    tiers: Vec<usize>,
    limit_level: u32,
    money: i32,
    base_max_money: i32,
}

impl UnlockState {
    /// Seed a fresh session. Applies every upgrade for free when
    /// `game.unlock_all` is set.
    pub fn new(config: &Config) -> Self {
        let mut state = Self {
            ingredients: config.game.ingredient_area.ingredients.iter().cloned().collect(),
            cookers: config
                .ui
                .preparation_area
                .cookers
                .iter()
                .map(|c| c.num_unlocked.min(instance_count(c.instances.len())))
                .collect(),
            tiers: vec![0; config.ui.store.upgrades.len()],
            limit_level: 0,
            money: config.game.money.starting_money,
            base_max_money: config.game.money.max_money,
        };
        if config.game.unlock_all {
            state.unlock_all(config);
        }
        state
    }

    pub fn money(&self) -> i32 {
        self.money
    }

    pub fn limit_level(&self) -> u32 {
        self.limit_level
    }

    /// Money cap, doubled per purchased limit tier.
    pub fn max_money(&self) -> i32 {
        self.base_max_money
            .saturating_mul(2i32.saturating_pow(self.limit_level))
    }

    pub fn is_unlocked(&self, ingredient: &ImageId) -> bool {
        self.ingredients.contains(ingredient)
    }

    pub fn unlocked_ingredients(&self) -> &BTreeSet<ImageId> {
        &self.ingredients
    }

    /// Unlocked instances of cooker `index`; 0 for unknown indices.
    pub fn cooker_unlocked(&self, index: usize) -> u32 {
        self.cookers.get(index).copied().unwrap_or(0)
    }

    /// Tiers already bought on `track`.
    pub fn tier(&self, track: usize) -> usize {
        self.tiers.get(track).copied().unwrap_or(0)
    }

    /// Change the balance by `delta`, clamped to `[0, max_money]`. Returns
    /// the new balance.
    pub fn add_money(&mut self, delta: i32) -> i32 {
        self.money = self.money.saturating_add(delta).min(self.max_money()).max(0);
        self.money
    }

    /// The tier a purchase on `track` would buy, if any.
    pub fn next_upgrade<'a>(&self, config: &'a Config, track: usize) -> Option<&'a StoreUpgrade> {
        config.ui.store.upgrades.get(track)?.get(self.tier(track))
    }

    /// Buy the next tier of `track`, paying its cost.
    pub fn purchase<'a>(
        &mut self,
        config: &'a Config,
        track: usize,
    ) -> Result<&'a StoreUpgrade, RuntimeError> {
        let tracks = &config.ui.store.upgrades;
        let tiers = tracks.get(track).ok_or(RuntimeError::UnknownTrack {
            track,
            tracks: tracks.len(),
        })?;
        let upgrade = tiers
            .get(self.tier(track))
            .ok_or(RuntimeError::TrackExhausted { track })?;
        if self.money < upgrade.cost {
            return Err(RuntimeError::InsufficientFunds {
                needed: upgrade.cost,
                available: self.money,
            });
        }
        self.money -= upgrade.cost;
        self.apply(config, track, upgrade);
        info!(
            track,
            action = ?upgrade.action,
            img = %upgrade.img,
            cost = upgrade.cost,
            money = self.money,
            "purchased upgrade"
        );
        Ok(upgrade)
    }

    /// Apply every remaining tier of every track without charging.
    pub fn unlock_all(&mut self, config: &Config) {
        for (track, tiers) in config.ui.store.upgrades.iter().enumerate() {
            for upgrade in tiers.iter().skip(self.tier(track)) {
                self.apply(config, track, upgrade);
            }
        }
        debug!(
            ingredients = self.ingredients.len(),
            limit_level = self.limit_level,
            "unlocked every upgrade"
        );
    }

    fn apply(&mut self, config: &Config, track: usize, upgrade: &StoreUpgrade) {
        if let Some(tier) = self.tiers.get_mut(track) {
            *tier += 1;
        }
        match upgrade.action {
            UpgradeAction::UnlockIngredient => {
                self.ingredients.insert(upgrade.img.clone());
            }
            UpgradeAction::UnlockCooker => {
                let cookers = &config.ui.preparation_area.cookers;
                for (count, cooker) in self.cookers.iter_mut().zip(cookers) {
                    if cooker.base_image == upgrade.img {
                        *count = (*count + 1).min(instance_count(cooker.instances.len()));
                    }
                }
            }
            UpgradeAction::IncreaseLimit => self.limit_level += 1,
        }
    }

    /// Ingredients the player can currently produce: unlocked ones plus
    /// anything cookable on a cooker with at least one unlocked instance.
    pub fn available_ingredients(&self, config: &Config) -> BTreeSet<ImageId> {
        let recipes: Vec<&Recipe> = config
            .ui
            .preparation_area
            .cookers
            .iter()
            .zip(&self.cookers)
            .filter(|(_, count)| **count > 0)
            .flat_map(|(cooker, _)| cooker.recipes.iter())
            .collect();
        let mut available = self.ingredients.clone();
        close_over_recipes(&mut available, &recipes);
        available
    }

    /// Indices of orders whose mandatory ingredients are all available.
    pub fn eligible_orders(&self, config: &Config) -> Vec<usize> {
        let available = self.available_ingredients(config);
        config
            .ui
            .order_bar
            .orders
            .iter()
            .enumerate()
            .filter(|(_, order)| order.mandatory_ings().all(|ing| available.contains(ing)))
            .map(|(i, _)| i)
            .collect()
    }
}

fn instance_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
