//! Level catalog
//!
//! Levels are immutable and indexed from 0.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Ladder, Platform};

/// A single level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based display number
    pub id: u32,
    /// Ordered; platform collision takes the first match
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    /// Milliseconds between barrel spawns
    pub barrel_spawn_rate: f64,
    pub goal_position: Vec2,
}

/// Ordered list of levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelCatalog {
    /// Catalog from custom levels (falls back to the standard set if empty)
    pub fn new(levels: Vec<Level>) -> Self {
        if levels.is_empty() {
            log::warn!("Empty level list, using standard catalog");
            return Self::standard();
        }
        Self { levels }
    }

    /// The three built-in levels
    pub fn standard() -> Self {
        Self {
            levels: vec![level_one(), level_two(), level_three()],
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Resolve an index, falling back to level 0 when out of range
    pub fn resolve(&self, index: usize) -> (usize, &Level) {
        match self.levels.get(index) {
            Some(level) => (index, level),
            None => {
                log::warn!("Level index {} out of range, falling back to 0", index);
                (0, &self.levels[0])
            }
        }
    }

    pub fn has_next(&self, index: usize) -> bool {
        index + 1 < self.levels.len()
    }
}

fn level_one() -> Level {
    Level {
        id: 1,
        platforms: vec![
            // Ground
            Platform::new(1, 0.0, 600.0, 375.0, 20.0),
            Platform::new(2, 50.0, 500.0, 150.0, 15.0),
            Platform::new(3, 225.0, 500.0, 150.0, 15.0),
            Platform::new(4, 0.0, 400.0, 150.0, 15.0),
            Platform::new(5, 225.0, 400.0, 150.0, 15.0),
            Platform::new(6, 50.0, 300.0, 150.0, 15.0),
            Platform::new(7, 225.0, 300.0, 150.0, 15.0),
            Platform::new(8, 0.0, 200.0, 150.0, 15.0),
            Platform::new(9, 225.0, 200.0, 150.0, 15.0),
            // Goal ledge
            Platform::new(10, 125.0, 100.0, 125.0, 15.0),
        ],
        ladders: vec![
            Ladder::new(1, 180.0, 500.0, 30.0, 100.0),
            Ladder::new(2, 30.0, 400.0, 30.0, 100.0),
            Ladder::new(3, 320.0, 400.0, 30.0, 100.0),
            Ladder::new(4, 180.0, 300.0, 30.0, 100.0),
            Ladder::new(5, 30.0, 200.0, 30.0, 100.0),
            Ladder::new(6, 320.0, 200.0, 30.0, 100.0),
            Ladder::new(7, 180.0, 100.0, 30.0, 100.0),
        ],
        barrel_spawn_rate: 2000.0,
        goal_position: Vec2::new(187.0, 80.0),
    }
}

fn level_two() -> Level {
    Level {
        id: 2,
        platforms: vec![
            Platform::new(1, 0.0, 600.0, 375.0, 20.0),
            // Zigzag
            Platform::new(2, 0.0, 520.0, 180.0, 15.0),
            Platform::new(3, 195.0, 460.0, 180.0, 15.0),
            Platform::new(4, 0.0, 400.0, 180.0, 15.0),
            Platform::new(5, 195.0, 340.0, 180.0, 15.0),
            Platform::new(6, 0.0, 280.0, 180.0, 15.0),
            Platform::new(7, 195.0, 220.0, 180.0, 15.0),
            Platform::new(8, 0.0, 160.0, 180.0, 15.0),
            Platform::new(9, 125.0, 80.0, 125.0, 15.0),
        ],
        ladders: vec![
            Ladder::new(1, 150.0, 520.0, 30.0, 80.0),
            Ladder::new(2, 195.0, 400.0, 30.0, 60.0),
            Ladder::new(3, 150.0, 340.0, 30.0, 60.0),
            Ladder::new(4, 195.0, 220.0, 30.0, 60.0),
            Ladder::new(5, 150.0, 160.0, 30.0, 60.0),
            Ladder::new(6, 180.0, 80.0, 30.0, 80.0),
        ],
        barrel_spawn_rate: 1500.0,
        goal_position: Vec2::new(187.0, 60.0),
    }
}

fn level_three() -> Level {
    Level {
        id: 3,
        platforms: vec![
            Platform::new(1, 0.0, 600.0, 375.0, 20.0),
            // Narrow ledges
            Platform::new(2, 20.0, 530.0, 100.0, 15.0),
            Platform::new(3, 255.0, 530.0, 100.0, 15.0),
            Platform::new(4, 137.0, 460.0, 100.0, 15.0),
            Platform::new(5, 20.0, 390.0, 100.0, 15.0),
            Platform::new(6, 255.0, 390.0, 100.0, 15.0),
            Platform::new(7, 137.0, 320.0, 100.0, 15.0),
            Platform::new(8, 20.0, 250.0, 100.0, 15.0),
            Platform::new(9, 255.0, 250.0, 100.0, 15.0),
            Platform::new(10, 137.0, 180.0, 100.0, 15.0),
            Platform::new(11, 125.0, 80.0, 125.0, 15.0),
        ],
        ladders: vec![
            Ladder::new(1, 100.0, 530.0, 25.0, 70.0),
            Ladder::new(2, 255.0, 460.0, 25.0, 70.0),
            Ladder::new(3, 100.0, 390.0, 25.0, 70.0),
            Ladder::new(4, 255.0, 320.0, 25.0, 70.0),
            Ladder::new(5, 100.0, 250.0, 25.0, 70.0),
            Ladder::new(6, 255.0, 180.0, 25.0, 70.0),
            Ladder::new(7, 180.0, 80.0, 25.0, 100.0),
        ],
        barrel_spawn_rate: 1000.0,
        goal_position: Vec2::new(187.0, 60.0),
    }
}
