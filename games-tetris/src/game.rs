//! Tetris simulation and its `Game` implementation

use engine_core::typed::{ActionSpace, Capabilities, DecodeError, EncodeError, Encoding, EngineId, Game};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use std::time::Duration;
use tracing::{debug, trace};

use crate::board::{self, Grid, LockedPositions, COLS, ROWS};
use crate::config::{ConfigError, TetrisConfig};
use crate::piece::Piece;
use crate::shapes::{Rgb, ShapeKind, EMPTY};

/// Discrete agent actions, encoded 0..=4 in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Noop,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::SoftDrop,
        Action::Rotate,
        Action::Noop,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Action {
    type Error = DecodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(DecodeError::ActionOutOfRange {
            value,
            n: Self::ALL.len() as u32,
        })
    }
}

/// Episode state
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    locked: LockedPositions,
    grid: Grid,
    current: Piece,
    next: Piece,
    fall_time: Duration,
    level_time: Duration,
    fall_speed: Duration,
    score: u64,
    lines_cleared: u64,
    steps: u64,
}

impl State {
    fn new<R: Rng + ?Sized>(config: &TetrisConfig, rng: &mut R) -> Self {
        let locked = LockedPositions::new();
        let grid = locked.to_grid();
        let current = Piece::random(rng);
        let next = Piece::random(rng);
        Self {
            locked,
            grid,
            current,
            next,
            fall_time: Duration::ZERO,
            level_time: Duration::ZERO,
            fall_speed: config.fall_speed(),
            score: 0,
            lines_cleared: 0,
            steps: 0,
        }
    }

    pub fn locked(&self) -> &LockedPositions {
        &self.locked
    }

    #[cfg(test)]
    pub(crate) fn locked_mut(&mut self) -> &mut LockedPositions {
        &mut self.locked
    }

    /// Grid as composed by the last reset or step
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines_cleared(&self) -> u64 {
        self.lines_cleared
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Gravity threshold currently in effect
    pub fn fall_speed(&self) -> Duration {
        self.fall_speed
    }

    pub fn is_over(&self) -> bool {
        self.locked.reaches_top()
    }

    fn observation(&self) -> Observation {
        Observation {
            grid: self.grid,
            next: self.next,
            score: self.score,
        }
    }

    /// Apply `mutate` to the current piece, undoing it if the result collides
    fn try_move(&mut self, mutate: impl Fn(&mut Piece)) {
        let before = self.current;
        mutate(&mut self.current);
        if !board::is_valid(&self.current, &self.grid) {
            self.current = before;
        }
    }
}

/// What the agent sees after a reset or step
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub grid: Grid,
    pub next: Piece,
    pub score: u64,
}

/// Length of an encoded observation: grid cells, next piece, score
pub const OBS_LEN: usize = ROWS * COLS + 1 + 8;

/// Palette index of a color: 0 for empty, catalog index + 1 otherwise
pub fn palette_index(color: Rgb) -> Option<u8> {
    if color == EMPTY {
        return Some(0);
    }
    ShapeKind::from_color(color).map(|kind| kind.index() as u8 + 1)
}

/// Tetris game
#[derive(Debug, Clone, Default)]
pub struct Tetris {
    config: TetrisConfig,
}

impl Tetris {
    /// Create a game from a validated copy of `config`
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` when `config` fails `TetrisConfig::validate`.
    pub fn new(config: TetrisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TetrisConfig {
        &self.config
    }

    /// Advance one tick with an explicit elapsed time
    ///
    /// `Game::step` calls this with the configured fixed tick interval. Callers
    /// driven by a real clock pass the time since their previous tick.
    pub fn advance(
        &self,
        state: &mut State,
        action: Action,
        elapsed: Duration,
        rng: &mut ChaCha20Rng,
    ) -> (Observation, i64, bool) {
        state.steps += 1;
        state.grid = state.locked.to_grid();

        state.fall_time += elapsed;
        state.level_time += elapsed;
        self.apply_speed_up(state);

        if state.fall_time > state.fall_speed {
            state.fall_time = Duration::ZERO;
            state.current.y += 1;
            trace!(y = state.current.y, "gravity");
        }

        let mut lock_in = false;
        if !board::is_valid(&state.current, &state.grid) && state.current.y > 0 {
            state.current.y -= 1;
            lock_in = true;
        }

        match action {
            Action::MoveLeft => state.try_move(|piece| piece.x -= 1),
            Action::MoveRight => state.try_move(|piece| piece.x += 1),
            Action::SoftDrop => state.try_move(|piece| piece.y += 1),
            Action::Rotate => state.try_move(|piece| piece.rotation += 1),
            Action::Noop => {}
        }

        board::overlay(&mut state.grid, &state.current);

        let mut reward = 0;
        if lock_in {
            state.locked.lock(&state.current);
            let locked_kind = state.current.kind;
            state.current = state.next;
            state.next = Piece::random(rng);

            let cleared = state.locked.clear_rows(&state.grid) as u64;
            let gained = cleared.saturating_mul(self.config.score_per_line);
            state.lines_cleared += cleared;
            state.score = state.score.saturating_add(gained);
            reward = i64::try_from(gained).unwrap_or(i64::MAX);

            debug!(
                kind = ?locked_kind,
                cleared,
                score = state.score,
                next = ?state.next.kind,
                "piece locked"
            );
        }

        (state.observation(), reward, state.is_over())
    }

    fn apply_speed_up(&self, state: &mut State) {
        let Some(speed_up) = &self.config.speed_up else {
            return;
        };

        if state.level_time.as_secs_f64() > speed_up.interval_secs {
            state.level_time = Duration::ZERO;
            let min = Duration::from_secs_f64(speed_up.min_fall_speed_secs);
            if state.fall_speed > min {
                let faster = state.fall_speed.saturating_sub(Duration::from_secs_f64(speed_up.step_secs));
                state.fall_speed = faster.max(min);
                debug!(fall_speed = ?state.fall_speed, "speed up");
            }
        }
    }
}

impl Game for Tetris {
    type State = State;
    type Action = Action;
    type Obs = Observation;

    fn engine_id(&self) -> EngineId {
        EngineId {
            env_id: "tetris".to_string(),
            build_id: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            id: self.engine_id(),
            encoding: Encoding {
                action: "discrete_tetris_action:v1".to_string(),
                obs: "u8x200_palette+u8_next+u64le_score:v1".to_string(),
                schema_version: 1,
            },
            action_space: ActionSpace::Discrete(Action::ALL.len() as u32),
        }
    }

    fn reset(&mut self, rng: &mut ChaCha20Rng) -> (Self::State, Self::Obs) {
        let state = State::new(&self.config, rng);
        debug!(current = ?state.current.kind, next = ?state.next.kind, "tetris reset");
        let obs = state.observation();
        (state, obs)
    }

    fn step(&mut self, state: &mut Self::State, action: Self::Action, rng: &mut ChaCha20Rng) -> (Self::Obs, i64, bool) {
        self.advance(state, action, self.config.tick_interval(), rng)
    }

    fn decode_action(raw: u32) -> Result<Self::Action, DecodeError> {
        Action::try_from(raw)
    }

    fn encode_obs(obs: &Self::Obs, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.reserve(OBS_LEN);
        for (row, cells) in obs.grid.iter().enumerate() {
            for (col, &color) in cells.iter().enumerate() {
                let index = palette_index(color).ok_or_else(|| {
                    EncodeError::InvalidData(format!("Unknown color {:?} at row {} column {}", color, row, col))
                })?;
                out.push(index);
            }
        }
        out.push(obs.next.kind.index() as u8 + 1);
        out.extend_from_slice(&obs.score.to_le_bytes());
        Ok(())
    }
}
