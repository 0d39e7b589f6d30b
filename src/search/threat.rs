//! Threat-space search for forced wins
//!
//! A gain square is an empty cell whose occupation by the attacker completes
//! one of the catalogue shapes. For every gain square the search assumes the
//! defender answers on all of the shape's cost squares (its blank cells),
//! then looks for a follow-up gain square close to the one just played. A
//! branch ending in five-in-a-row is a forced win under those replies.
//!
//! - [`ThreatSearcher::find_threats`]: every gain square on the board
//! - [`ThreatSearcher::find_threats_near`]: only squares on the eight rays
//!   around an anchor, the cheap continuation used below the first ply
//!
//! All speculative stones are placed through [`Hypothetical`] scopes, so the
//! caller's board is untouched however the recursion unwinds.
//!
//! [`Hypothetical`]: crate::board::Hypothetical

use std::cmp::Ordering;

use tracing::trace;

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::eval::{match_levels, LevelRange, LineMatch, ThreatLevel};

/// Cells walked along each ray by the near search, anchor included
pub const NEAR_RANGE: i32 = 6;

/// Gain squares accepted per ray by the near search
pub const MAX_GAINS_PER_RAY: usize = 2;

/// A gain square and the forced continuations found from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threat {
    /// The gain square
    pub pos: Pos,
    /// Strongest shape completed through `pos`
    pub level: ThreatLevel,
    /// Attacker plies before this one (0 for a root threat)
    pub depth: u32,
    /// Playing `pos` makes five at once
    pub immediate_win: bool,
    /// `immediate_win`, or some child is winning
    pub winning: bool,
    /// Shallowest depth at which a five is reached below this threat
    pub min_winning_depth: Option<u32>,
    /// Defender stones assumed on the board when this threat was found
    pub forced_replies: Vec<Pos>,
    /// Follow-up threats, in discovery order
    pub children: Vec<Threat>,
}

impl Threat {
    fn new(pos: Pos, level: ThreatLevel, depth: u32, forced_replies: Vec<Pos>) -> Self {
        Self {
            pos,
            level,
            depth,
            immediate_win: false,
            winning: false,
            min_winning_depth: None,
            forced_replies,
            children: Vec::new(),
        }
    }

    fn mark_immediate_win(&mut self) {
        self.immediate_win = true;
        self.winning = true;
        self.min_winning_depth = min_depth(self.min_winning_depth, Some(self.depth));
    }

    fn absorb(&mut self, outcome: Outcome) {
        if outcome.winning {
            self.winning = true;
            self.min_winning_depth = min_depth(self.min_winning_depth, outcome.min_depth);
        }
    }

    /// Shallowest forced line starting here, ending with the threat that
    /// completes five. `None` if this threat is not winning.
    pub fn forced_line(&self) -> Option<Vec<&Threat>> {
        if self.immediate_win {
            return Some(vec![self]);
        }
        let next = self
            .children
            .iter()
            .filter(|c| c.winning)
            .min_by_key(|c| c.min_winning_depth)?;
        let mut line = vec![self];
        line.extend(next.forced_line()?);
        Some(line)
    }

    /// Ordering used to rank threats: winning ones first, then shallower
    /// wins first. Everything else compares equal, so a stable sort keeps
    /// discovery order among ties.
    pub fn priority_cmp(&self, other: &Threat) -> Ordering {
        other.winning.cmp(&self.winning).then_with(|| {
            match (self.min_winning_depth, other.min_winning_depth) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    }
}

/// Stable sort by [`Threat::priority_cmp`]
pub fn sort_threats(threats: &mut [Threat]) {
    threats.sort_by(Threat::priority_cmp);
}

/// Threats found by one search call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreatScan {
    pub threats: Vec<Threat>,
    /// At least one threat is winning
    pub winning: bool,
    /// Shallowest winning depth over all threats
    pub min_depth: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Outcome {
    winning: bool,
    min_depth: Option<u32>,
}

impl Outcome {
    fn absorb(&mut self, threat: &Threat) {
        if threat.winning {
            self.winning = true;
            self.min_depth = min_depth(self.min_depth, threat.min_winning_depth);
        }
    }
}

fn min_depth(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Threat-space searcher
#[derive(Debug, Default)]
pub struct ThreatSearcher {
    /// Gain squares examined since the last reset
    nodes: u64,
}

impl ThreatSearcher {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Gain squares examined since creation or the last reset
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    /// Find every gain square for `attacker` at a level in `levels`.
    ///
    /// Each threat's children are explored with the near search up to
    /// `max_depth` attacker plies in total; `max_depth == 1` reports only
    /// the root squares.
    ///
    /// # Panics
    /// Panics if `levels` includes [`ThreatLevel::One`].
    ///
    /// # Example
    ///
    /// ```
    /// use gomoku::{Board, Stone};
    /// use gomoku::eval::{LevelRange, ThreatLevel};
    /// use gomoku::search::ThreatSearcher;
    ///
    /// let board = Board::from_rows(&[".oooo.", "......"]).unwrap();
    /// let mut searcher = ThreatSearcher::new();
    /// let scan = searcher.find_threats(&board, Stone::Black, LevelRange::only(ThreatLevel::Five), 1);
    /// assert!(scan.winning);
    /// assert_eq!(scan.threats.len(), 2);
    /// ```
    pub fn find_threats(
        &mut self,
        board: &Board,
        attacker: Stone,
        levels: LevelRange,
        max_depth: u32,
    ) -> ThreatScan {
        assert_searchable(levels);
        let mut work = board.clone();
        let mut scan = ThreatScan::default();
        let mut outcome = Outcome::default();

        if max_depth > 0 {
            let cells: Vec<Pos> = work.empty_cells().collect();
            for pos in cells {
                if let Some(threat) =
                    self.evaluate_square(&mut work, attacker, pos, levels, 0, max_depth, &[])
                {
                    outcome.absorb(&threat);
                    scan.threats.push(threat);
                }
            }
        }

        debug_assert_eq!(&work, board, "threat search left stones behind");
        scan.winning = outcome.winning;
        scan.min_depth = outcome.min_depth;
        scan
    }

    /// Look for gain squares on the eight rays around `anchor`.
    ///
    /// Each ray starts at the anchor itself, runs at most [`NEAR_RANGE`]
    /// cells, stops at the edge or at a defender stone, and yields at most
    /// [`MAX_GAINS_PER_RAY`] threats. Only shapes along the ray's own line
    /// count.
    ///
    /// # Panics
    /// Panics if `levels` includes [`ThreatLevel::One`].
    pub fn find_threats_near(
        &mut self,
        board: &Board,
        attacker: Stone,
        anchor: Pos,
        levels: LevelRange,
        max_depth: u32,
    ) -> ThreatScan {
        assert_searchable(levels);
        let mut work = board.clone();
        let mut threats = Vec::new();
        let outcome =
            self.search_near(&mut work, attacker, anchor, levels, 0, max_depth, &[], &mut threats);
        debug_assert_eq!(&work, board, "threat search left stones behind");
        ThreatScan {
            threats,
            winning: outcome.winning,
            min_depth: outcome.min_depth,
        }
    }

    /// Evaluate one square the way the full-board scan does.
    ///
    /// Returns `None` if `pos` is occupied or completes no shape in `levels`.
    pub fn threat_at(
        &mut self,
        board: &Board,
        attacker: Stone,
        pos: Pos,
        levels: LevelRange,
        max_depth: u32,
    ) -> Option<Threat> {
        assert_searchable(levels);
        if max_depth == 0 || !board.is_empty(pos) {
            return None;
        }
        let mut work = board.clone();
        self.evaluate_square(&mut work, attacker, pos, levels, 0, max_depth, &[])
    }

    #[allow(clippy::too_many_arguments)]
    fn evaluate_square(
        &mut self,
        board: &mut Board,
        attacker: Stone,
        pos: Pos,
        levels: LevelRange,
        depth: u32,
        max_depth: u32,
        forced: &[Pos],
    ) -> Option<Threat> {
        self.nodes += 1;
        let mut scope = board.hypothetical();
        scope.place(pos, attacker);

        let mut threat: Option<Threat> = None;
        for &dir in &DIRECTIONS {
            let Some(m) = match_levels(&scope, pos, dir, levels, attacker) else {
                continue;
            };
            let t = threat.get_or_insert_with(|| Threat::new(pos, m.level(), depth, forced.to_vec()));
            t.level = t.level.max(m.level());
            self.follow_match(&mut scope, attacker, &m, levels, depth, max_depth, t);
        }
        threat
    }

    /// Record a five, or assume the defender's replies and search deeper.
    #[allow(clippy::too_many_arguments)]
    fn follow_match(
        &mut self,
        board: &mut Board,
        attacker: Stone,
        m: &LineMatch,
        levels: LevelRange,
        depth: u32,
        max_depth: u32,
        threat: &mut Threat,
    ) {
        if m.pattern.is_five() {
            trace!(pos = %m.anchor, depth, "five reached");
            threat.mark_immediate_win();
            return;
        }

        let costs: Vec<Pos> = m.cost_squares().collect();
        let mut scope = board.hypothetical();
        for &cost in &costs {
            scope.place(cost, attacker.opponent());
        }
        let outcome = self.search_near(
            &mut scope,
            attacker,
            m.anchor,
            levels,
            depth + 1,
            max_depth,
            &costs,
            &mut threat.children,
        );
        threat.absorb(outcome);
    }

    #[allow(clippy::too_many_arguments)]
    fn search_near(
        &mut self,
        board: &mut Board,
        attacker: Stone,
        anchor: Pos,
        levels: LevelRange,
        depth: u32,
        max_depth: u32,
        forced: &[Pos],
        out: &mut Vec<Threat>,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        if depth >= max_depth {
            return outcome;
        }
        let defender = attacker.opponent();

        for ray in 0..DIRECTIONS.len() * 2 {
            let axis = DIRECTIONS[ray % DIRECTIONS.len()];
            let sign = if ray < DIRECTIONS.len() { 1 } else { -1 };
            let step = (axis.0 * sign, axis.1 * sign);
            let mut gains = 0;

            for k in 0..NEAR_RANGE {
                let (r, c) = anchor.step(step, k);
                let Some(pos) = board.pos_at(r, c) else {
                    break;
                };
                let stone = board.get(pos);
                if stone == defender {
                    break;
                }
                if stone != Stone::Empty {
                    continue;
                }
                // The forward ray on this axis already tried the anchor
                if k == 0 && sign < 0 {
                    continue;
                }

                self.nodes += 1;
                let mut scope = board.hypothetical();
                scope.place(pos, attacker);
                let Some(m) = match_levels(&scope, pos, axis, levels, attacker) else {
                    continue;
                };

                let mut threat = Threat::new(pos, m.level(), depth, forced.to_vec());
                self.follow_match(&mut scope, attacker, &m, levels, depth, max_depth, &mut threat);
                drop(scope);

                outcome.absorb(&threat);
                out.push(threat);
                gains += 1;
                if gains >= MAX_GAINS_PER_RAY {
                    break;
                }
            }
        }
        outcome
    }
}

fn assert_searchable(levels: LevelRange) {
    assert!(
        !levels.contains(ThreatLevel::One),
        "threat search over {levels} includes single stones"
    );
}
