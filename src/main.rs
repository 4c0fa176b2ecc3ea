//! Horizon Climb entry point
//!
//! Native builds run a headless demo: a seeded session plays itself in idle
//! mode and the final score goes into the local high score table.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use horizon_climb::persistence::{FileStore, KeyValueStore, MemoryStore};
    use horizon_climb::sim::{GameEvent, GamePhase, Session, TickInput};
    use horizon_climb::{GameConfig, HighScores, Settings};

    const USAGE: &str = "usage: horizon-climb [--seed N] [--level N] [--ticks N] \
                         [--config FILE] [--data-dir DIR] [--name NAME]";

    /// Command line options
    pub struct Args {
        pub seed: u64,
        /// 1-based starting level
        pub level: usize,
        /// Tick budget for the whole run
        pub ticks: u32,
        pub config: Option<PathBuf>,
        pub data_dir: Option<PathBuf>,
        pub name: String,
    }

    impl Default for Args {
        fn default() -> Self {
            Self {
                seed: 1,
                level: 1,
                ticks: 60 * 60 * 5,
                config: None,
                data_dir: None,
                name: "DEMO".to_string(),
            }
        }
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Self::default();
            while let Some(flag) = args.next() {
                let mut value = || args.next().ok_or_else(|| format!("missing value for {}", flag));
                match flag.as_str() {
                    "--seed" => parsed.seed = parse_number(&value()?)?,
                    "--level" => parsed.level = parse_number(&value()?)?,
                    "--ticks" => parsed.ticks = parse_number(&value()?)?,
                    "--config" => parsed.config = Some(PathBuf::from(value()?)),
                    "--data-dir" => parsed.data_dir = Some(PathBuf::from(value()?)),
                    "--name" => parsed.name = value()?,
                    "-h" | "--help" => return Err(USAGE.to_string()),
                    other => return Err(format!("unknown argument {}\n{}", other, USAGE)),
                }
            }
            Ok(parsed)
        }
    }

    fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
        s.parse().map_err(|_| format!("invalid number: {}", s))
    }

    fn load_config(args: &Args) -> Result<GameConfig, String> {
        let Some(path) = &args.config else {
            return Ok(GameConfig::default());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        GameConfig::from_json(&json).map_err(|e| format!("invalid config {}: {}", path.display(), e))
    }

    pub fn run() -> Result<(), String> {
        let args = Args::parse(std::env::args().skip(1))?;
        let config = load_config(&args)?;
        let summary = match &args.data_dir {
            Some(dir) => match FileStore::open(dir) {
                Ok(mut store) => {
                    log::info!("Results stored under {}", store.dir().display());
                    play(&args, config, &mut store)
                }
                Err(e) => {
                    log::warn!("Data dir unusable, results will not be kept: {}", e);
                    play(&args, config, &mut MemoryStore::new())
                }
            },
            None => play(&args, config, &mut MemoryStore::new()),
        };
        log::info!(
            "Run over after {} ticks: level {}, score {}, rank {:?}",
            summary.ticks,
            summary.level,
            summary.score,
            summary.rank
        );
        Ok(())
    }

    /// Outcome of a demo run
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Summary {
        pub score: u64,
        pub level: u32,
        pub ticks: u32,
        /// High-score rank, if the run made the table
        pub rank: Option<usize>,
    }

    fn play<S: KeyValueStore>(args: &Args, config: GameConfig, store: &mut S) -> Summary {
        let settings = Settings::load(store);
        let mut session = Session::new(config, settings, args.seed);
        session.start(args.level.saturating_sub(1));

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let dt = config.frame_ms();
        let mut ticks = 0;
        'run: while ticks < args.ticks {
            ticks += 1;
            for event in session.tick(&input, dt) {
                match event {
                    GameEvent::PlayerHit { lives } => log::info!("Hit! {} lives left", lives),
                    GameEvent::PowerUpCollected { kind, points } => {
                        log::info!("Picked up {:?} (+{})", kind, points)
                    }
                    GameEvent::BarrelDodged { combo, points } => {
                        log::debug!("Dodge x{} (+{})", combo, points)
                    }
                    GameEvent::LevelComplete { .. } => {
                        if !session.next_level().is_empty() {
                            break 'run;
                        }
                    }
                    GameEvent::GameOver { .. } | GameEvent::AllLevelsCleared { .. } => break 'run,
                }
            }
        }

        let state = session.state();
        if state.phase == GamePhase::Playing {
            log::info!("Tick budget of {} used up", args.ticks);
        }
        let score = state.player.score;
        let level = state.level_number();
        println!("score {} level {} ticks {}", score, level, ticks);

        let rank = record(store, &args.name, score, level);
        Summary {
            score,
            level,
            ticks,
            rank,
        }
    }

    /// Enter a result into the stored high score table; returns its rank
    fn record<S: KeyValueStore>(store: &mut S, name: &str, score: u64, level: u32) -> Option<usize> {
        let mut scores = HighScores::load(store);
        let rank = scores.add_score(name.to_string(), score, level, today());
        match rank {
            Some(rank) => {
                println!("new high score, rank {}", rank);
                if let Err(e) = scores.save(store) {
                    log::warn!("Could not save high scores: {}", e);
                }
            }
            None => log::info!("Score did not make the table"),
        }
        rank
    }

    /// Days since the Unix epoch, as a sortable display string
    fn today() -> String {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!("day {}", secs / 86_400)
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Horizon Climb (headless) starting...");
    if let Err(message) = native::run() {
        eprintln!("{}", message);
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Session` directly; nothing to run here
}
