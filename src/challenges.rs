//! Daily challenges
//!
//! Three objectives are drawn per day from a fixed template list. Progress is
//! checked against a summary of the finished attempt.

use serde::{Deserialize, Serialize};

use crate::sim::random::RandomSource;
use crate::sim::state::GameStateData;

/// Challenges offered per day
pub const DAILY_CHALLENGE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeObjective {
    /// Finish a level without picking anything up
    NoPowerUps,
    /// Finish a level in under `target_value` ms
    SpeedRun,
    /// Finish a level with exactly `target_value` lives
    NoDamage,
    /// Collect at least `target_value` power-ups
    CollectAll,
}

struct Template {
    key: &'static str,
    title: &'static str,
    description: &'static str,
    objective: ChallengeObjective,
    target_value: u64,
    reward: u64,
}

static TEMPLATES: [Template; 4] = [
    Template {
        key: "no_powerups",
        title: "Pure Skill",
        description: "Complete Level 1 without collecting any power-ups",
        objective: ChallengeObjective::NoPowerUps,
        target_value: 1,
        reward: 500,
    },
    Template {
        key: "speed_run",
        title: "Speed Demon",
        description: "Complete Level 1 in under 60 seconds",
        objective: ChallengeObjective::SpeedRun,
        target_value: 60_000,
        reward: 750,
    },
    Template {
        key: "no_damage",
        title: "Untouchable",
        description: "Complete Level 1 without losing any lives",
        objective: ChallengeObjective::NoDamage,
        target_value: 3,
        reward: 600,
    },
    Template {
        key: "collect_all",
        title: "Collector",
        description: "Collect 5 power-ups in a single game",
        objective: ChallengeObjective::CollectAll,
        target_value: 5,
        reward: 400,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    /// `<template>_<date>`, unique within a day
    pub id: String,
    pub title: String,
    pub description: String,
    pub objective: ChallengeObjective,
    pub target_value: u64,
    pub reward: u64,
    pub completed: bool,
    pub date: String,
}

/// What a finished attempt achieved
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChallengeProgress {
    /// 1-based level reached
    pub level: u32,
    pub power_ups_collected: u32,
    pub lives_remaining: u32,
    pub time_elapsed_ms: f64,
}

impl ChallengeProgress {
    pub fn from_state(state: &GameStateData) -> Self {
        Self {
            level: state.level_number(),
            power_ups_collected: state.stats.power_ups_collected,
            lives_remaining: state.player.lives,
            time_elapsed_ms: state.elapsed_ms,
        }
    }
}

/// Draw today's challenges
pub fn generate_daily<R: RandomSource + ?Sized>(rng: &mut R, date: &str) -> Vec<DailyChallenge> {
    let mut order: Vec<usize> = (0..TEMPLATES.len()).collect();
    // Fisher-Yates
    for i in (1..order.len()).rev() {
        let j = rng.index(i + 1);
        order.swap(i, j);
    }
    order
        .into_iter()
        .take(DAILY_CHALLENGE_COUNT)
        .map(|i| {
            let t = &TEMPLATES[i];
            DailyChallenge {
                id: format!("{}_{}", t.key, date),
                title: t.title.to_string(),
                description: t.description.to_string(),
                objective: t.objective,
                target_value: t.target_value,
                reward: t.reward,
                completed: false,
                date: date.to_string(),
            }
        })
        .collect()
}

/// Whether `progress` satisfies an open challenge
pub fn check_progress(challenge: &DailyChallenge, progress: &ChallengeProgress) -> bool {
    if challenge.completed {
        return false;
    }
    match challenge.objective {
        ChallengeObjective::NoPowerUps => progress.level >= 1 && progress.power_ups_collected == 0,
        ChallengeObjective::SpeedRun => {
            progress.level >= 1 && progress.time_elapsed_ms < challenge.target_value as f64
        }
        ChallengeObjective::NoDamage => {
            progress.level >= 1 && progress.lives_remaining as u64 == challenge.target_value
        }
        ChallengeObjective::CollectAll => {
            progress.power_ups_collected as u64 >= challenge.target_value
        }
    }
}

/// Mark a challenge done, returning its reward the first time only
pub fn complete(challenges: &mut [DailyChallenge], id: &str) -> u64 {
    match challenges.iter_mut().find(|c| c.id == id) {
        Some(challenge) if !challenge.completed => {
            challenge.completed = true;
            log::info!("Challenge {} complete (+{})", challenge.id, challenge.reward);
            challenge.reward
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::level::LevelCatalog;
    use crate::sim::random::SequenceRandom;
    use crate::sim::state::create_initial_state;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn challenge(objective: ChallengeObjective) -> DailyChallenge {
        let mut rng = SequenceRandom::constant(0.0);
        let mut all = generate_daily(&mut rng, "d");
        all.extend(generate_daily(&mut SequenceRandom::constant(0.99), "d"));
        all.into_iter()
            .find(|c| c.objective == objective)
            .unwrap()
    }

    #[test]
    fn test_generate_three_distinct() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let challenges = generate_daily(&mut rng, "Wed Oct 14 2026");
            assert_eq!(challenges.len(), DAILY_CHALLENGE_COUNT);
            let mut objectives: Vec<_> = challenges.iter().map(|c| c.objective as u8).collect();
            objectives.sort();
            objectives.dedup();
            assert_eq!(objectives.len(), DAILY_CHALLENGE_COUNT);
            assert!(challenges.iter().all(|c| !c.completed && c.date == "Wed Oct 14 2026"));
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate_daily(&mut Pcg32::seed_from_u64(3), "d");
        let b = generate_daily(&mut Pcg32::seed_from_u64(3), "d");
        assert_eq!(a, b);
    }

    #[test]
    fn test_progress_rules() {
        let finished = ChallengeProgress {
            level: 1,
            power_ups_collected: 0,
            lives_remaining: 3,
            time_elapsed_ms: 45_000.0,
        };
        assert!(check_progress(&challenge(ChallengeObjective::NoPowerUps), &finished));
        assert!(check_progress(&challenge(ChallengeObjective::SpeedRun), &finished));
        assert!(check_progress(&challenge(ChallengeObjective::NoDamage), &finished));
        assert!(!check_progress(&challenge(ChallengeObjective::CollectAll), &finished));

        let slow_collector = ChallengeProgress {
            power_ups_collected: 5,
            lives_remaining: 2,
            time_elapsed_ms: 60_000.0,
            ..finished
        };
        assert!(!check_progress(&challenge(ChallengeObjective::NoPowerUps), &slow_collector));
        assert!(!check_progress(&challenge(ChallengeObjective::SpeedRun), &slow_collector));
        assert!(!check_progress(&challenge(ChallengeObjective::NoDamage), &slow_collector));
        assert!(check_progress(&challenge(ChallengeObjective::CollectAll), &slow_collector));
    }

    #[test]
    fn test_complete_rewards_once() {
        let mut challenges = generate_daily(&mut SequenceRandom::constant(0.5), "d");
        let id = challenges[0].id.clone();
        let reward = challenges[0].reward;
        assert_eq!(complete(&mut challenges, &id), reward);
        assert!(challenges[0].completed);
        assert_eq!(complete(&mut challenges, &id), 0);
        assert_eq!(complete(&mut challenges, "missing"), 0);

        // Completed challenges never re-trigger
        let progress = ChallengeProgress {
            level: 1,
            power_ups_collected: 10,
            lives_remaining: 3,
            time_elapsed_ms: 1.0,
        };
        assert!(!check_progress(&challenges[0], &progress));
    }

    #[test]
    fn test_progress_from_state() {
        let mut state = create_initial_state(&LevelCatalog::standard(), 1, Settings::default());
        state.stats.power_ups_collected = 2;
        state.player.lives = 1;
        state.elapsed_ms = 1234.0;
        let progress = ChallengeProgress::from_state(&state);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.power_ups_collected, 2);
        assert_eq!(progress.lives_remaining, 1);
        assert_eq!(progress.time_elapsed_ms, 1234.0);
    }
}
