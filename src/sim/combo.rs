//! Combo streaks and score multipliers

use super::entity::{ComboAction, Player};
use crate::consts::COMBO_TIMEOUT_MS;

/// Multiplier by combo count (index = combo - 1), clamped at the last entry
pub const COMBO_MULTIPLIERS: [f32; 7] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0];

/// Combo label tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComboTier {
    None,
    Combo,
    Great,
    Amazing,
    Legendary,
}

impl ComboTier {
    /// Tier thresholds: 0, <3, <5, <7, >=7
    pub fn for_combo(combo: u32) -> Self {
        match combo {
            0 => ComboTier::None,
            1..=2 => ComboTier::Combo,
            3..=4 => ComboTier::Great,
            5..=6 => ComboTier::Amazing,
            _ => ComboTier::Legendary,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComboTier::None => "",
            ComboTier::Combo => "COMBO!",
            ComboTier::Great => "GREAT!",
            ComboTier::Amazing => "AMAZING!",
            ComboTier::Legendary => "LEGENDARY!",
        }
    }
}

/// Clear the streak
pub fn reset_combo(player: &mut Player) {
    player.combo = 0;
    player.combo_timer = 0.0;
    player.last_combo_action = None;
}

/// Count an action; switching action type restarts the streak
pub fn add_combo(player: &mut Player, action: ComboAction) {
    if player.last_combo_action.is_some_and(|last| last != action) {
        reset_combo(player);
    }
    player.combo += 1;
    player.combo_timer = COMBO_TIMEOUT_MS;
    player.last_combo_action = Some(action);
}

/// Run the combo timeout down by `dt_ms`
pub fn update_combo_timer(player: &mut Player, dt_ms: f32) {
    if player.combo_timer > 0.0 {
        player.combo_timer -= dt_ms;
        if player.combo_timer <= 0.0 {
            reset_combo(player);
        }
    }
}

pub fn get_combo_multiplier(combo: u32) -> f32 {
    if combo == 0 {
        return 1.0;
    }
    let index = (combo as usize - 1).min(COMBO_MULTIPLIERS.len() - 1);
    COMBO_MULTIPLIERS[index]
}

/// `floor(base * multiplier)`
pub fn calculate_combo_bonus(base: u64, combo: u32) -> u64 {
    (base as f64 * get_combo_multiplier(combo) as f64).floor() as u64
}

/// Display text such as "4x GREAT!" (empty for no combo)
pub fn get_combo_text(combo: u32) -> String {
    match ComboTier::for_combo(combo) {
        ComboTier::None => String::new(),
        tier => format!("{}x {}", combo, tier.label()),
    }
}
