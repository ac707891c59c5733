use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Session lifecycle.
///
/// - Ready -> Running on the first press
/// - Running -> Won when every cell is revealed or correctly flagged
/// - Running -> Lost on a mine or a wrong flag found by a chord
/// - any state -> Ready on reset
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Ready,
    Running,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// Reveal a hidden cell.
    Primary,
    /// Toggle a question mark.
    Middle,
    /// Toggle a flag, or chord on a revealed number.
    Secondary,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Detonated(Coord2),
    BadFlag(Coord2),
}

impl LossCause {
    pub const fn coords(self) -> Coord2 {
        match self {
            Self::Detonated(coords) | Self::BadFlag(coords) => coords,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PressOutcome {
    NoChange,
    Revealed,
    Marked,
    /// First press of the session landed on a mine, which got flagged instead.
    FreeFlag,
    Won,
    Lost,
}

impl PressOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Owns one session: the grid, score, clock and end-of-game state.
///
/// All side effects towards the outside (repaints, sounds, timers) go through the [`Host`] handed to each event.
#[derive(Clone, Debug)]
pub struct GameController {
    config: GameConfig,
    grid: Grid,
    scores: ScoreBoard,
    state: GameState,
    first_press_taken: bool,
    elapsed_secs: u32,
    loss: Option<LossCause>,
    rating: Option<WinRating>,
    explosion: ExplosionAnimator,
    rng: SmallRng,
}

impl GameController {
    /// New session with a random board, `seed` drives this and every later board.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Grid::new(config.side_length, config.density, rng.random())?;
        Ok(Self::assemble(config, grid, rng))
    }

    pub fn from_provider(provider: &impl ConfigurationProvider, seed: u64) -> Result<Self> {
        Self::new(provider.game_config(), seed)
    }

    /// New session on a prepared board, the side length of `config` is replaced by the board's.
    pub fn with_grid(config: GameConfig, grid: Grid, seed: u64) -> Result<Self> {
        let config = config.with_side_length(grid.side_length())?;
        Ok(Self::assemble(config, grid, SmallRng::seed_from_u64(seed)))
    }

    fn assemble(config: GameConfig, grid: Grid, rng: SmallRng) -> Self {
        let scores = ScoreBoard::new(grid.density(), grid.total_cells());
        Self {
            config,
            grid,
            scores,
            state: GameState::Ready,
            first_press_taken: false,
            elapsed_secs: 0,
            loss: None,
            rating: None,
            explosion: ExplosionAnimator::default(),
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        self.grid.cell(coords)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn score(&self) -> Score {
        self.scores.score()
    }

    pub fn score_multiplier(&self) -> Score {
        self.scores.multiplier()
    }

    pub fn max_score(&self) -> Score {
        self.scores.max_score()
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.total_mines()
    }

    pub fn hidden_mines(&self) -> isize {
        self.grid.hidden_mines()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn first_press_taken(&self) -> bool {
        self.first_press_taken
    }

    pub fn loss(&self) -> Option<LossCause> {
        self.loss
    }

    pub fn rating(&self) -> Option<WinRating> {
        self.rating
    }

    /// Mines are drawn everywhere once the game is lost.
    pub fn shows_mines(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub fn explosion_frame(&self) -> u8 {
        self.explosion.index()
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.is_active()
    }

    /// Handles a button press on a cell.
    ///
    /// Out of range coordinates are an error, presses after the game ended are ignored.
    pub fn press(
        &mut self,
        coords: Coord2,
        button: Button,
        host: &mut impl Host,
    ) -> Result<PressOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(PressOutcome::NoChange);
        }

        self.mark_started(host);
        let free_click = !self.first_press_taken;
        self.first_press_taken = true;

        let outcome = match (button, self.grid[coords].is_revealed()) {
            (Button::Primary, false) => self.reveal(coords, free_click, host)?,
            (Button::Secondary, false) => self.toggle_flag(coords, host)?,
            (Button::Middle, false) => self.toggle_question(coords, host)?,
            (Button::Secondary, true) => self.chord(coords, host)?,
            (Button::Primary | Button::Middle, true) => PressOutcome::NoChange,
        };

        log::debug!(
            "{:?} press at {:?}: {:?}, score {}, hidden mines {}",
            button,
            coords,
            outcome,
            self.scores.score(),
            self.grid.hidden_mines()
        );
        Ok(outcome)
    }

    pub fn press_at_pixel(
        &mut self,
        px: u32,
        py: u32,
        button: Button,
        host: &mut impl Host,
    ) -> Result<PressOutcome> {
        self.press(self.config.cell_at_pixel(px, py), button, host)
    }

    /// One second of the game clock, returns the elapsed time.
    pub fn on_clock_tick(&mut self) -> u32 {
        if matches!(self.state, GameState::Running) {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.elapsed_secs
    }

    /// One frame of the explosion clock.
    pub fn on_explosion_tick(&mut self, host: &mut impl Host) -> AnimationStep {
        let Some(LossCause::Detonated(coords)) = self.loss else {
            host.stop(Clock::Explosion);
            return AnimationStep::Finished;
        };

        let step = self.explosion.tick();
        host.request_repaint(Repaint::Region(Region::cell(coords)));
        if step == AnimationStep::Finished {
            host.stop(Clock::Explosion);
        }
        step
    }

    /// Starts a new session with the current configuration.
    pub fn reset(&mut self, host: &mut impl Host) -> Result<()> {
        if host.is_running(Clock::Explosion) {
            host.stop(Clock::Explosion);
        }
        host.stop(Clock::Game);

        let seed = self.rng.random();
        self.grid
            .reset(self.config.side_length, self.config.density, seed)?;
        self.scores = ScoreBoard::new(self.grid.density(), self.grid.total_cells());
        self.state = GameState::Ready;
        self.first_press_taken = false;
        self.elapsed_secs = 0;
        self.loss = None;
        self.rating = None;
        self.explosion = ExplosionAnimator::default();

        log::info!(
            "New game, {0}x{0} field with {1} mines",
            self.grid.side_length(),
            self.grid.total_mines()
        );
        host.play(Sound::ResetGame);
        host.request_repaint(Repaint::All);
        Ok(())
    }

    /// Replaces the settings and starts a new session from them.
    pub fn apply_config(&mut self, config: GameConfig, host: &mut impl Host) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reset(host)
    }

    /// Turning question marks off wipes the ones already on the board.
    pub fn set_question_marks(&mut self, enabled: bool, host: &mut impl Host) {
        self.config.question_marks = enabled;
        if !enabled && self.grid.clear_questions().has_update() {
            host.request_repaint(Repaint::All);
        }
    }

    fn reveal(
        &mut self,
        coords: Coord2,
        free_click: bool,
        host: &mut impl Host,
    ) -> Result<PressOutcome> {
        let cell = self.grid[coords];
        if cell.is_flagged() || cell.is_questioned() {
            return Ok(PressOutcome::NoChange);
        }

        if cell.has_mine() {
            if !free_click {
                self.lose(LossCause::Detonated(coords), host);
                return Ok(PressOutcome::Lost);
            }
            log::info!("First press hit a mine at {:?}, flagging it", coords);
            self.grid.toggle_flag(coords)?;
            host.play(Sound::Flag);
            self.scores.award(1);
            return Ok(self.conclude(
                Region::cell(coords),
                PressOutcome::FreeFlag,
                host,
            ));
        }

        let mut engine = RevealEngine::new(&mut self.grid, coords)?;
        if cell.is_blank() {
            engine.flood_fill(coords)?;
        } else {
            engine.reveal_single(coords)?;
        }
        let report = engine.finish();
        Ok(self.settle(report, host))
    }

    fn toggle_flag(&mut self, coords: Coord2, host: &mut impl Host) -> Result<PressOutcome> {
        Ok(match self.grid.toggle_flag(coords)? {
            FlagChange::Placed => {
                host.play(Sound::Flag);
                self.scores.award(1);
                self.conclude(Region::cell(coords), PressOutcome::Marked, host)
            }
            FlagChange::Removed => {
                self.scores.deduct(1);
                host.request_repaint(Repaint::Region(Region::cell(coords)));
                PressOutcome::Marked
            }
            FlagChange::NoChange => PressOutcome::NoChange,
        })
    }

    fn toggle_question(&mut self, coords: Coord2, host: &mut impl Host) -> Result<PressOutcome> {
        let cell = self.grid[coords];
        if cell.is_flagged() || (!cell.is_questioned() && !self.config.question_marks) {
            return Ok(PressOutcome::NoChange);
        }

        Ok(match self.grid.toggle_question(coords)? {
            MarkOutcome::Changed => {
                host.request_repaint(Repaint::Region(Region::cell(coords)));
                PressOutcome::Marked
            }
            MarkOutcome::NoChange => PressOutcome::NoChange,
        })
    }

    fn chord(&mut self, coords: Coord2, host: &mut impl Host) -> Result<PressOutcome> {
        if self.grid[coords].is_blank() {
            return Ok(PressOutcome::NoChange);
        }

        let mut engine = RevealEngine::new(&mut self.grid, coords)?;
        let chord = engine.chord_clear(coords)?;
        let report = engine.finish();

        Ok(match chord {
            ChordOutcome::BadFlag(flag) => {
                host.play(Sound::BadChord);
                self.lose(LossCause::BadFlag(flag), host);
                PressOutcome::Lost
            }
            ChordOutcome::Cleared => {
                host.play(Sound::Reveal);
                self.settle(report, host)
            }
            ChordOutcome::NoChange => PressOutcome::NoChange,
        })
    }

    /// Scores a finished reveal and checks for the win.
    fn settle(&mut self, report: RevealReport, host: &mut impl Host) -> PressOutcome {
        let revealed: CellCount = report.revealed.len().try_into().unwrap_or(CellCount::MAX);
        self.scores.award(revealed);
        self.scores.deduct(report.dropped_flags);

        let outcome = if revealed > 0 {
            PressOutcome::Revealed
        } else {
            PressOutcome::NoChange
        };
        self.conclude(report.dirty, outcome, host)
    }

    fn conclude(
        &mut self,
        dirty: Region,
        outcome: PressOutcome,
        host: &mut impl Host,
    ) -> PressOutcome {
        host.request_repaint(Repaint::Region(dirty));
        if self.scores.is_complete(self.grid.hidden_mines()) {
            self.win(host);
            PressOutcome::Won
        } else {
            outcome
        }
    }

    fn mark_started(&mut self, host: &mut impl Host) {
        if self.state.is_ready() {
            self.state = GameState::Running;
            self.elapsed_secs = 0;
            host.start(Clock::Game);
            log::info!("Game started");
        }
    }

    fn win(&mut self, host: &mut impl Host) {
        self.state = GameState::Won;
        host.stop(Clock::Game);

        let rating = self
            .scores
            .settle_win(self.grid.density(), self.elapsed_secs);
        self.rating = Some(rating);
        if let Some(sound) = rating.sound() {
            host.play(sound);
        }
        log::info!(
            "Game won in {}s, score {}, rated {:?}",
            self.elapsed_secs,
            self.scores.score(),
            rating
        );
    }

    fn lose(&mut self, cause: LossCause, host: &mut impl Host) {
        self.state = GameState::Lost;
        self.loss = Some(cause);
        host.stop(Clock::Game);

        if let LossCause::Detonated(_) = cause {
            host.play(Sound::Explode);
            self.explosion.start();
            host.start(Clock::Explosion);
        }
        host.request_repaint(Repaint::All);
        log::info!(
            "Game lost after {}s: {:?}, score {}",
            self.elapsed_secs,
            cause,
            self.scores.score()
        );
    }
}
