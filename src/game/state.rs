use std::fmt;

/// Points needed to win a single game
pub const MAX_SCORE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Ai => "AI",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Match length chosen before play starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestOf {
    Three,
    Five,
    Seven,
}

impl BestOf {
    pub fn from_rounds(rounds: u8) -> Option<Self> {
        match rounds {
            3 => Some(BestOf::Three),
            5 => Some(BestOf::Five),
            7 => Some(BestOf::Seven),
            _ => None,
        }
    }

    pub fn rounds(self) -> u8 {
        match self {
            BestOf::Three => 3,
            BestOf::Five => 5,
            BestOf::Seven => 7,
        }
    }

    /// Game wins needed to take the match: a strict majority of the rounds
    pub fn wins_required(self) -> u8 {
        self.rounds() / 2 + 1
    }
}

/// Match phase. `best_of` only exists once it has been chosen, and a
/// winner only once the match is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectingBestOf,
    Playing { best_of: BestOf },
    GameOver { best_of: BestOf, winner: Side },
}

/// A pair of counters, one per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub player: u8,
    pub ai: u8,
}

impl Tally {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    /// Bump one side's counter and return the new value
    pub fn increment(&mut self, side: Side) -> u8 {
        let counter = match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        };
        *counter = counter.saturating_add(1);
        *counter
    }
}

/// What a single point did to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    Point,
    GameWon(Side),
    MatchWon(Side),
}

/// Scores and phase of one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// Points in the current game
    pub score: Tally,
    /// Games won in the current match
    pub match_wins: Tally,
    pub phase: Phase,
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            score: Tally::default(),
            match_wins: Tally::default(),
            phase: Phase::SelectingBestOf,
        }
    }

    pub fn best_of_rounds(&self) -> Option<u8> {
        match self.phase {
            Phase::SelectingBestOf => None,
            Phase::Playing { best_of } | Phase::GameOver { best_of, .. } => Some(best_of.rounds()),
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::GameOver { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing { .. })
    }

    /// Start the match. Only valid while selecting; returns whether the
    /// selection was taken.
    pub fn select_best_of(&mut self, best_of: BestOf) -> bool {
        if self.phase != Phase::SelectingBestOf {
            return false;
        }
        self.phase = Phase::Playing { best_of };
        true
    }

    /// Award a point to `side`. Reaching `MAX_SCORE` wins the game, clears
    /// both game scores and may end the match.
    pub fn record_point(&mut self, side: Side) -> PointOutcome {
        if self.score.increment(side) < MAX_SCORE {
            return PointOutcome::Point;
        }

        self.match_wins.increment(side);
        self.score = Tally::default();

        let Phase::Playing { best_of } = self.phase else {
            return PointOutcome::GameWon(side);
        };

        if self.match_wins.get(side) >= best_of.wins_required() {
            self.phase = Phase::GameOver {
                best_of,
                winner: side,
            };
            PointOutcome::MatchWon(side)
        } else {
            PointOutcome::GameWon(side)
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
