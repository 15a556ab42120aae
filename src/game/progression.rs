//! Quests and Leveling
//!
//! Coin-threshold quests pay out coins and experience; experience converts
//! into levels one step at a time.

use serde::{Deserialize, Serialize};

use crate::game::events::GameEventData;
use crate::game::player::Player;

/// Coins needed to finish the starting quest.
pub const QUEST_COIN_TARGET: u32 = 5;

/// Coin reward of the starting quest.
pub const QUEST_COIN_REWARD: u32 = 50;

/// Experience granted for any completed quest.
pub const QUEST_EXPERIENCE: u32 = 50;

/// Experience per level: level N needs N * LEVEL_STEP to advance.
pub const LEVEL_STEP: u32 = 100;

/// What a quest waits for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestGoal {
    /// Hold at least this many coins
    CollectCoins(u32),
}

impl Default for QuestGoal {
    fn default() -> Self {
        QuestGoal::CollectCoins(QUEST_COIN_TARGET)
    }
}

impl QuestGoal {
    fn is_met(self, player: &Player) -> bool {
        match self {
            QuestGoal::CollectCoins(target) => player.coins >= target,
        }
    }
}

/// A quest. `completed` only ever goes from false to true.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Player-facing description
    pub description: String,
    /// Coins paid on completion
    pub reward: u32,
    /// Completion flag
    pub completed: bool,
    /// Completion condition (not replicated)
    #[serde(skip)]
    pub goal: QuestGoal,
}

impl Quest {
    /// The starting quest every player receives.
    pub fn collect_coins() -> Self {
        Self {
            description: format!("Collect {} coins", QUEST_COIN_TARGET),
            reward: QUEST_COIN_REWARD,
            completed: false,
            goal: QuestGoal::CollectCoins(QUEST_COIN_TARGET),
        }
    }
}

/// Experience needed to advance from `level`.
#[inline]
pub fn required_experience(level: u32) -> u32 {
    level.saturating_mul(LEVEL_STEP)
}

/// Complete every quest whose goal now holds.
///
/// Each completion pays its reward, grants quest experience and runs one
/// level-up check.
pub fn check_quests(player: &mut Player, events: &mut Vec<GameEventData>) {
    for i in 0..player.quests.len() {
        let quest = &player.quests[i];
        if quest.completed || !quest.goal.is_met(player) {
            continue;
        }

        let quest = &mut player.quests[i];
        quest.completed = true;
        let reward = quest.reward;
        let description = quest.description.clone();

        player.coins = player.coins.saturating_add(reward);
        player.experience = player.experience.saturating_add(QUEST_EXPERIENCE);
        events.push(GameEventData::QuestCompleted {
            player: player.name.clone(),
            description,
            reward,
        });

        check_level_up(player, events);
    }
}

/// Advance at most one level if enough experience has accumulated.
///
/// Leftover experience carries over; crossing several thresholds at once
/// still advances a single level per call.
pub fn check_level_up(player: &mut Player, events: &mut Vec<GameEventData>) -> bool {
    let required = required_experience(player.level);
    if player.experience < required {
        return false;
    }

    player.level += 1;
    player.experience -= required;
    player.health = Player::MAX_HEALTH;
    events.push(GameEventData::LevelUp {
        player: player.name.clone(),
        level: player.level,
    });
    true
}
