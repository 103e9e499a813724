use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::Rng;

use super::apple;
use super::config::GameConfig;
use super::direction::{Direction, DirectionArbiter};
use super::grid::{Cell, Grid};
use super::snake::Snake;
use crate::highscore::HighscoreStore;

/// Lifecycle of one round of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Paused,
    GameOver,
    /// The snake covers the whole board: nothing left to eat
    Won,
}

/// One round of snake: owns the board, the rules and the scoring
///
/// The host loop calls `run` every frame; state only mutates once per fixed
/// 80ms timestep. Checks run after the move so that apple overlap sees the
/// new head position.
pub struct PlaySession {
    grid: Grid,
    snake: Snake,
    apple: Option<Cell>,
    score: u32,
    highscore: u32,
    extend: u32,
    arbiter: DirectionArbiter,
    last_update: Instant,
    state: SessionState,
    godmode: bool,
    godmode_default: bool,
    tick: Duration,
    apple_score: u32,
    apple_extension: u32,
    rng: StdRng,
    store: HighscoreStore,
}

impl PlaySession {
    /// Start a fresh session, loading the persisted highscore
    ///
    /// A missing highscore file means 0; any other load failure propagates.
    pub fn new(config: &GameConfig, mut rng: StdRng) -> Result<Self> {
        let grid = Grid::from_pixels(config.width_px, config.height_px, config.tile_size);
        let snake = Snake::new(random_cell(grid, &mut rng));
        let apple = apple::place(grid, &snake, &mut rng);

        let store = HighscoreStore::new(config.highscore_path.clone());
        let highscore = store.load().context("failed to load highscore")?;

        Ok(Self {
            grid,
            snake,
            apple,
            score: 0,
            highscore,
            extend: 0,
            arbiter: DirectionArbiter::new(config.direction_queue_capacity),
            last_update: Instant::now(),
            state: if apple.is_some() {
                SessionState::Active
            } else {
                SessionState::Won
            },
            godmode: config.godmode,
            godmode_default: config.godmode,
            tick: config.tick(),
            apple_score: config.apple_score,
            apple_extension: config.apple_extension,
            rng,
            store,
        })
    }

    /// Per-frame entry point
    ///
    /// Returns true when a simulation tick actually ran. Paused and
    /// terminal states never mutate; the host still draws every frame.
    pub fn run(&mut self, now: Instant) -> bool {
        if self.state != SessionState::Active {
            return false;
        }
        if now.duration_since(self.last_update) < self.tick {
            return false;
        }

        if let Some(dir) = self.arbiter.next() {
            let (dx, dy) = dir.delta();
            let head = self.snake.head();
            let new_head = self.grid.wrap(head.x + dx, head.y + dy);

            let grow = self.extend > 0;
            if grow {
                self.extend -= 1;
            }
            self.snake.advance(new_head, grow);
        }
        self.last_update = now;

        self.check_collisions();
        true
    }

    /// Post-move checks: self-collision and apple overlap
    fn check_collisions(&mut self) {
        if !self.godmode && self.snake.self_collision() {
            self.state = SessionState::GameOver;
            self.save_highscore();
        }

        if self.apple == Some(self.snake.head()) {
            self.score += self.apple_score;
            self.extend = self.apple_extension;
            self.apple = apple::place(self.grid, &self.snake, &mut self.rng);
            if self.apple.is_none() {
                self.state = SessionState::Won;
                self.save_highscore();
            }
        }
    }

    /// Feed a directional key press to the arbiter
    pub fn steer(&mut self, dir: Direction) {
        self.arbiter.on_key(dir, self.snake.len());
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Active => SessionState::Paused,
            SessionState::Paused => SessionState::Active,
            other => other,
        };
    }

    pub fn toggle_godmode(&mut self) {
        self.godmode = !self.godmode;
    }

    /// Full reset after game over or a won board
    ///
    /// Fresh snake and apple, score and growth cleared, buffered input
    /// dropped, godmode back to its configured default. The in-memory
    /// highscore keeps the best result so far.
    pub fn restart(&mut self) {
        if !matches!(self.state, SessionState::GameOver | SessionState::Won) {
            return;
        }

        self.highscore = self.highscore.max(self.score);
        self.score = 0;
        self.extend = 0;
        self.godmode = self.godmode_default;
        self.arbiter.reset();
        self.snake = Snake::new(random_cell(self.grid, &mut self.rng));
        self.apple = apple::place(self.grid, &self.snake, &mut self.rng);
        self.state = if self.apple.is_some() {
            SessionState::Active
        } else {
            SessionState::Won
        };
        self.last_update = Instant::now();
    }

    /// Persist the score if it beats the stored highscore
    ///
    /// Best effort: a failed write is logged and the session carries on.
    pub fn save_highscore(&mut self) {
        if self.score > self.highscore {
            if let Err(err) = self.store.save(self.score) {
                log::warn!("failed to save highscore: {err:#}");
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn is_new_highscore(&self) -> bool {
        self.score > self.highscore
    }

    pub fn godmode(&self) -> bool {
        self.godmode
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Option<Cell> {
        self.apple
    }
}

fn random_cell(grid: Grid, rng: &mut StdRng) -> Cell {
    Cell::new(
        rng.gen_range(0..grid.width()),
        rng.gen_range(0..grid.height()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::fs;
    use tempfile::TempDir;

    const TICK: Duration = Duration::from_millis(80);

    fn session() -> (PlaySession, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut config = GameConfig::small();
        config.highscore_path = dir.path().join("highscore");
        let session = PlaySession::new(&config, StdRng::seed_from_u64(1)).unwrap();
        (session, dir)
    }

    /// Pin the board layout so movement is predictable
    fn place(session: &mut PlaySession, head: Cell, apple: Cell) {
        session.snake = Snake::new(head);
        session.apple = Some(apple);
    }

    fn tick_at(session: &mut PlaySession, base: Instant, n: u32) -> bool {
        session.run(base + TICK * n)
    }

    /// Five-cell hook with the apple parked away: steering up runs the
    /// head into the body on the next tick
    fn collision_course(session: &mut PlaySession) {
        let mut snake = Snake::new(Cell::new(2, 2));
        for cell in [
            Cell::new(3, 2),
            Cell::new(4, 2),
            Cell::new(4, 3),
            Cell::new(3, 3),
        ] {
            snake.advance(cell, true);
        }
        session.snake = snake;
        session.apple = Some(Cell::new(0, 0));
    }

    #[test]
    fn test_fresh_session() {
        let (session, _dir) = session();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.highscore(), 0);
        assert_eq!(session.snake().len(), 1);
        let apple = session.apple().unwrap();
        assert!(!session.snake().contains(apple));
    }

    #[test]
    fn test_tick_gating() {
        let (mut session, _dir) = session();
        let base = session.last_update;

        assert!(!session.run(base + Duration::from_millis(40)));
        assert!(session.run(base + TICK));
        // Same instant again: gate already consumed
        assert!(!session.run(base + TICK));
    }

    #[test]
    fn test_no_movement_before_first_key() {
        let (mut session, _dir) = session();
        let base = session.last_update;
        let head = session.snake().head();

        assert!(tick_at(&mut session, base, 1));
        assert_eq!(session.snake().head(), head);
    }

    #[test]
    fn test_movement_wraps_around_the_torus() {
        let (mut session, _dir) = session();
        place(&mut session, Cell::new(7, 3), Cell::new(0, 0));
        let base = session.last_update;

        session.steer(Direction::Right);
        tick_at(&mut session, base, 1);
        assert_eq!(session.snake().head(), Cell::new(0, 3));
    }

    #[test]
    fn test_eating_scores_and_extends() {
        let (mut session, _dir) = session();
        place(&mut session, Cell::new(4, 4), Cell::new(5, 4));
        let base = session.last_update;

        session.steer(Direction::Right);
        tick_at(&mut session, base, 1);

        assert_eq!(session.score(), 10);
        assert_eq!(session.extend, 3);
        let apple = session.apple().unwrap();
        assert!(!session.snake().contains(apple));

        // Park the apple away from the snake's path for the growth phase
        session.apple = Some(Cell::new(0, 0));

        // Exactly three growth ticks, then steady state again
        for n in 2..=4 {
            tick_at(&mut session, base, n);
            assert_eq!(session.snake().len(), n as usize);
        }
        tick_at(&mut session, base, 5);
        assert_eq!(session.snake().len(), 4);
        assert_eq!(session.extend, 0);
    }

    #[test]
    fn test_self_collision_ends_the_game() {
        let (mut session, _dir) = session();
        collision_course(&mut session);
        let base = session.last_update;

        session.steer(Direction::Up);
        tick_at(&mut session, base, 1);

        assert_eq!(session.state(), SessionState::GameOver);
        assert!(!session.run(base + TICK * 2));
    }

    #[test]
    fn test_godmode_suppresses_collision() {
        let (mut session, _dir) = session();
        collision_course(&mut session);
        session.toggle_godmode();
        let base = session.last_update;

        session.steer(Direction::Up);
        tick_at(&mut session, base, 1);

        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let (mut session, _dir) = session();
        place(&mut session, Cell::new(2, 2), Cell::new(5, 5));
        let base = session.last_update;

        session.steer(Direction::Right);
        session.toggle_pause();
        assert!(!tick_at(&mut session, base, 1));
        assert_eq!(session.snake().head(), Cell::new(2, 2));

        session.toggle_pause();
        assert!(tick_at(&mut session, base, 2));
        assert_eq!(session.snake().head(), Cell::new(3, 2));
    }

    #[test]
    fn test_full_board_wins() {
        let dir = TempDir::new().unwrap();
        let mut config = GameConfig::small();
        // 2x1 board
        config.width_px = 20;
        config.height_px = 10;
        config.highscore_path = dir.path().join("highscore");
        let mut session = PlaySession::new(&config, StdRng::seed_from_u64(1)).unwrap();

        place(&mut session, Cell::new(0, 0), Cell::new(1, 0));
        session.extend = 1;
        let base = session.last_update;

        session.steer(Direction::Right);
        tick_at(&mut session, base, 1);

        assert_eq!(session.snake().len(), 2);
        assert_eq!(session.apple(), None);
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn test_restart_resets_round_and_keeps_best_score() {
        let (mut session, _dir) = session();
        place(&mut session, Cell::new(4, 4), Cell::new(5, 4));
        let base = session.last_update;

        session.steer(Direction::Right);
        tick_at(&mut session, base, 1);
        assert_eq!(session.score(), 10);

        session.state = SessionState::GameOver;
        session.restart();

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.extend, 0);
        assert_eq!(session.snake().len(), 1);
        assert_eq!(session.highscore(), 10);
        assert!(!session.snake().contains(session.apple().unwrap()));
    }

    #[test]
    fn test_restart_ignored_while_active() {
        let (mut session, _dir) = session();
        place(&mut session, Cell::new(4, 4), Cell::new(5, 4));
        let base = session.last_update;

        session.steer(Direction::Right);
        tick_at(&mut session, base, 1);
        session.restart();
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_game_over_persists_highscore() {
        let (mut session, dir) = session();
        session.score = 40;
        collision_course(&mut session);
        let base = session.last_update;

        session.steer(Direction::Up);
        tick_at(&mut session, base, 1);

        assert_eq!(session.state(), SessionState::GameOver);
        assert!(session.is_new_highscore());
        let saved = fs::read(dir.path().join("highscore")).unwrap();
        assert_eq!(saved, hex::encode("40").into_bytes());
    }

    #[test]
    fn test_failed_highscore_save_is_nonfatal() {
        let (mut session, dir) = session();
        // A directory at the store path makes every write fail
        session.store = HighscoreStore::new(dir.path());
        session.score = 40;
        collision_course(&mut session);
        let base = session.last_update;

        session.steer(Direction::Up);
        tick_at(&mut session, base, 1);

        // The write failed, but the round still ended normally
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(session.is_new_highscore());

        // And the session stays usable: restart keeps the best score
        session.restart();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.highscore(), 40);
    }

    #[test]
    fn test_restart_resets_godmode_toggle() {
        let (mut session, _dir) = session();
        session.toggle_godmode();
        assert!(session.godmode());

        session.state = SessionState::GameOver;
        session.restart();
        assert!(!session.godmode());
    }

    #[test]
    fn test_restart_keeps_configured_godmode() {
        let dir = TempDir::new().unwrap();
        let mut config = GameConfig::small();
        config.highscore_path = dir.path().join("highscore");
        config.godmode = true;
        let mut session = PlaySession::new(&config, StdRng::seed_from_u64(1)).unwrap();

        session.toggle_godmode();
        assert!(!session.godmode());

        session.state = SessionState::GameOver;
        session.restart();
        assert!(session.godmode());
    }

    #[test]
    fn test_save_is_skipped_when_not_a_record() {
        let (mut session, dir) = session();
        session.highscore = 100;
        session.score = 40;
        session.save_highscore();
        assert!(!dir.path().join("highscore").exists());
    }

    #[test]
    fn test_end_to_end_apple_run() {
        let (mut session, _dir) = session();
        place(&mut session, Cell::new(2, 2), Cell::new(5, 5));
        let base = session.last_update;

        session.steer(Direction::Right);
        for (n, expected) in [(1, Cell::new(3, 2)), (2, Cell::new(4, 2)), (3, Cell::new(5, 2))] {
            tick_at(&mut session, base, n);
            assert_eq!(session.snake().head(), expected);
        }

        session.steer(Direction::Down);
        for (n, expected) in [(4, Cell::new(5, 3)), (5, Cell::new(5, 4)), (6, Cell::new(5, 5))] {
            tick_at(&mut session, base, n);
            assert_eq!(session.snake().head(), expected);
        }

        assert_eq!(session.score(), 10);
        assert_eq!(session.extend, 3);
        let apple = session.apple().unwrap();
        assert!(!session.snake().contains(apple));

        session.apple = Some(Cell::new(0, 0));
        for n in 7..=9 {
            tick_at(&mut session, base, n);
        }
        assert_eq!(session.snake().len(), 4);
        assert_eq!(session.state(), SessionState::Active);
    }
}
