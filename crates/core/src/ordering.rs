//! Number-ordering mini-game
//!
//! Each round shows a handful of distinct numbers. The player picks them one
//! by one; the round is correct when the picks are in ascending order. After
//! a round is checked the game advances, and after the last round it ends
//! with the accumulated score.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::OrderingError;
use crate::rng::SimpleRng;
use crate::scoring::calculate_round_score;
use crate::snapshot::OrderingSnapshot;
use crate::types::{
    SessionState, ORDERING_MAX_NUMBERS, ORDERING_MAX_VALUE, ORDERING_NUMBERS_PER_ROUND,
    ORDERING_POINTS_PER_ROUND, ORDERING_ROUNDS,
};

/// Tunables for the ordering game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub rounds: u32,
    /// Numbers shown per round (2..=9)
    pub numbers_per_round: u8,
    /// Numbers are drawn from 1..=max_value
    pub max_value: u32,
    pub points_per_round: u32,
    pub seed: u32,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            rounds: ORDERING_ROUNDS,
            numbers_per_round: ORDERING_NUMBERS_PER_ROUND,
            max_value: ORDERING_MAX_VALUE,
            points_per_round: ORDERING_POINTS_PER_ROUND,
            seed: 1,
        }
    }
}

/// Result of [`OrderingGame::pick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOutcome {
    pub number: u32,
    pub picked: usize,
    /// Every number of the round has been picked
    pub complete: bool,
}

/// Result of [`OrderingGame::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub correct: bool,
    pub points: u32,
    /// The numbers in ascending order
    pub expected: ArrayVec<u32, ORDERING_MAX_NUMBERS>,
}

/// One play-through of the ordering game
#[derive(Debug, Clone)]
pub struct OrderingGame {
    config: OrderingConfig,
    rng: SimpleRng,
    state: SessionState,
    /// 1-based round number
    round: u32,
    numbers: ArrayVec<u32, ORDERING_MAX_NUMBERS>,
    picks: ArrayVec<u32, ORDERING_MAX_NUMBERS>,
    /// Some(correct) once the current round was checked
    verdict: Option<bool>,
    score: u32,
    correct_rounds: u32,
}

impl OrderingGame {
    pub fn new(config: OrderingConfig) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self {
            config,
            rng,
            state: SessionState::NotStarted,
            round: 0,
            numbers: ArrayVec::new(),
            picks: ArrayVec::new(),
            verdict: None,
            score: 0,
            correct_rounds: 0,
        }
    }

    /// Begin round 1. No-op once started.
    pub fn start(&mut self) {
        if self.state != SessionState::NotStarted {
            return;
        }
        self.score = 0;
        self.correct_rounds = 0;
        self.round = 0;
        if self.config.rounds == 0 {
            self.state = SessionState::Ended;
            return;
        }
        self.state = SessionState::Playing;
        self.begin_round(1);
        info!(rounds = self.config.rounds, "ordering game started");
    }

    /// Start over with fresh numbers
    pub fn restart(&mut self) {
        self.state = SessionState::NotStarted;
        self.start();
    }

    fn begin_round(&mut self, round: u32) {
        self.round = round;
        self.numbers = self.draw_numbers();
        self.picks.clear();
        self.verdict = None;
        debug!(round, numbers = ?self.numbers.as_slice(), "ordering round");
    }

    /// Distinct values in 1..=max_value
    fn draw_numbers(&mut self) -> ArrayVec<u32, ORDERING_MAX_NUMBERS> {
        let max_value = self.config.max_value.max(1);
        let count = (self.config.numbers_per_round as usize)
            .min(ORDERING_MAX_NUMBERS)
            .min(max_value as usize);

        let mut out = ArrayVec::new();
        while out.len() < count {
            let n = self.rng.next_range(max_value) + 1;
            if !out.contains(&n) {
                out.push(n);
            }
        }
        out
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rounds(&self) -> u32 {
        self.config.rounds
    }

    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn picks(&self) -> &[u32] {
        &self.picks
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_rounds(&self) -> u32 {
        self.correct_rounds
    }

    /// Verdict of the current round once checked
    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    /// Rounds that have been checked so far
    pub fn checked_rounds(&self) -> u32 {
        match self.verdict {
            Some(_) => self.round,
            None => self.round.saturating_sub(1),
        }
    }

    fn ensure_open_round(&self) -> Result<(), OrderingError> {
        if self.state != SessionState::Playing {
            return Err(OrderingError::NotPlaying);
        }
        if self.verdict.is_some() {
            return Err(OrderingError::RoundChecked);
        }
        Ok(())
    }

    /// Pick the number shown at `slot` (0-based) as the next in order
    pub fn pick(&mut self, slot: u8) -> Result<PickOutcome, OrderingError> {
        self.ensure_open_round()?;
        let number = *self
            .numbers
            .get(slot as usize)
            .ok_or(OrderingError::NoSuchSlot(slot))?;
        if self.picks.contains(&number) {
            return Err(OrderingError::AlreadyPicked(number));
        }
        self.picks.push(number);
        Ok(PickOutcome {
            number,
            picked: self.picks.len(),
            complete: self.picks.len() == self.numbers.len(),
        })
    }

    /// Forget the picks of the current round
    pub fn reset_round(&mut self) -> Result<(), OrderingError> {
        self.ensure_open_round()?;
        self.picks.clear();
        Ok(())
    }

    /// Judge the picks. Every number must have been picked.
    pub fn check(&mut self) -> Result<RoundResult, OrderingError> {
        self.ensure_open_round()?;
        if self.picks.len() != self.numbers.len() {
            return Err(OrderingError::IncompletePick {
                picked: self.picks.len(),
                needed: self.numbers.len(),
            });
        }

        let mut expected = self.numbers.clone();
        expected.sort_unstable();
        let correct = self.picks == expected;
        let points = calculate_round_score(correct, self.config.points_per_round);

        self.score = self.score.saturating_add(points);
        if correct {
            self.correct_rounds += 1;
        }
        self.verdict = Some(correct);
        debug!(round = self.round, correct, score = self.score, "ordering round checked");

        Ok(RoundResult {
            correct,
            points,
            expected,
        })
    }

    /// Move on after a checked round; ends the game after the last one
    pub fn next_round(&mut self) -> Result<SessionState, OrderingError> {
        if self.state != SessionState::Playing {
            return Err(OrderingError::NotPlaying);
        }
        if self.verdict.is_none() {
            return Err(OrderingError::RoundNotChecked);
        }
        if self.round >= self.config.rounds {
            self.state = SessionState::Ended;
            info!(score = self.score, correct = self.correct_rounds, "ordering game ended");
        } else {
            self.begin_round(self.round + 1);
        }
        Ok(self.state)
    }

    pub fn snapshot_into(&self, out: &mut OrderingSnapshot) {
        out.clear();
        out.numbers[..self.numbers.len()].copy_from_slice(&self.numbers);
        out.count = self.numbers.len() as u8;
        out.picks[..self.picks.len()].copy_from_slice(&self.picks);
        out.picked = self.picks.len() as u8;
        out.round = self.round;
        out.rounds = self.config.rounds;
        out.score = self.score;
        out.state = self.state;
        out.verdict = self.verdict;
    }

    pub fn snapshot(&self) -> OrderingSnapshot {
        let mut s = OrderingSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
