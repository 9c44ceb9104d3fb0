//! Structural statistics of an ADTerm.
//!
//! Players come from the symbol subscripts: `p` (proponent) counts as an
//! attack node, `o` (opponent) as a defense node. Unsubscripted symbols and
//! labels inherit the player of their position. The second and later
//! children of a counter-measure belong to the opposite player. Terms
//! without subscripts report zero attack and defense nodes.
//!
//! A gate counts as an AND/OR refinement only when it has more than one
//! child. A gate wrapped as the first child of a counter-measure also owns
//! the countering children, as in the tree the term was generated from.

use serde::Serialize;

use super::error::TermResult;
use super::{AND, TokenKind, tokenize};

/// Node counts and nesting depth of a term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TermStats {
    /// Gates and labels played by the proponent.
    pub attack_nodes: usize,
    /// Gates and labels played by the opponent.
    pub defense_nodes: usize,
    /// Quoted leaf labels.
    pub leaves: usize,
    /// Conjunctive (`∧`) refinements with more than one child.
    pub and_gates: usize,
    /// Disjunctive (`∨`) refinements with more than one child.
    pub or_gates: usize,
    /// Counter-measure markers (`c`).
    pub counter_measures: usize,
    /// Deepest bracket nesting.
    pub max_depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    Attack,
    Defense,
}

impl Player {
    fn from_subscript(subscript: &str) -> Option<Self> {
        match subscript {
            "p" => Some(Self::Attack),
            "o" => Some(Self::Defense),
            _ => None,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Attack => Self::Defense,
            Self::Defense => Self::Attack,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct GateNode {
    conjunctive: bool,
    children: usize,
}

/// The symbol seen just before an opening bracket.
#[derive(Debug, Clone, Copy)]
struct Owner {
    player: Option<Player>,
    counter: bool,
    gate: Option<usize>,
}

/// One open bracket.
#[derive(Debug, Clone, Copy)]
struct Frame {
    owner: Owner,
    children: usize,
    first_child_gate: Option<usize>,
}

impl Frame {
    fn child_player(&self) -> Option<Player> {
        if self.owner.counter && self.children > 0 {
            self.owner.player.map(Player::opposite)
        } else {
            self.owner.player
        }
    }
}

impl TermStats {
    /// Count the nodes of `term`.
    pub fn from_term(term: &str) -> TermResult<Self> {
        let mut stats = Self::default();
        let mut frames: Vec<Frame> = Vec::new();
        let mut gates: Vec<GateNode> = Vec::new();
        let mut pending: Option<Owner> = None;

        for tok in tokenize(term)? {
            let position = frames.last().and_then(Frame::child_player);
            match tok.kind {
                TokenKind::Open => {
                    let owner = pending.take().unwrap_or(Owner {
                        player: position,
                        counter: false,
                        gate: None,
                    });
                    frames.push(Frame {
                        owner,
                        children: 0,
                        first_child_gate: None,
                    });
                    stats.max_depth = stats.max_depth.max(frames.len());
                }
                TokenKind::Close => {
                    let Some(frame) = frames.pop() else { continue };
                    if let Some(i) = frame.owner.gate {
                        gates[i].children += frame.children;
                    }
                    if let (true, Some(i)) = (frame.owner.counter, frame.first_child_gate) {
                        gates[i].children += frame.children.saturating_sub(1);
                    }
                }
                TokenKind::Label => {
                    stats.leaves += 1;
                    stats.count_player(position);
                    if let Some(frame) = frames.last_mut() {
                        frame.children += 1;
                    }
                }
                TokenKind::Gate | TokenKind::Counter => {
                    let text = tok.text(term);
                    let mut chars = text.chars();
                    let glyph = chars.next();
                    let player = Player::from_subscript(chars.as_str()).or(position);
                    let counter = tok.kind == TokenKind::Counter;

                    let gate = if counter {
                        stats.counter_measures += 1;
                        None
                    } else {
                        stats.count_player(player);
                        gates.push(GateNode {
                            conjunctive: glyph == Some(AND),
                            children: 0,
                        });
                        Some(gates.len() - 1)
                    };

                    if let Some(frame) = frames.last_mut() {
                        if frame.owner.counter && frame.children == 0 {
                            frame.first_child_gate = gate;
                        }
                        frame.children += 1;
                    }
                    pending = Some(Owner {
                        player,
                        counter,
                        gate,
                    });
                }
                TokenKind::Comma | TokenKind::Space => {}
            }
        }

        for gate in gates.iter().filter(|g| g.children > 1) {
            if gate.conjunctive {
                stats.and_gates += 1;
            } else {
                stats.or_gates += 1;
            }
        }

        Ok(stats)
    }

    fn count_player(&mut self, player: Option<Player>) {
        match player {
            Some(Player::Attack) => self.attack_nodes += 1,
            Some(Player::Defense) => self.defense_nodes += 1,
            None => {}
        }
    }
}

impl std::fmt::Display for TermStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Attack nodes:     {}", self.attack_nodes)?;
        writeln!(f, "Defense nodes:    {}", self.defense_nodes)?;
        writeln!(f, "Leaves:           {}", self.leaves)?;
        writeln!(f, "AND refinements:  {}", self.and_gates)?;
        writeln!(f, "OR refinements:   {}", self.or_gates)?;
        writeln!(f, "Counter-measures: {}", self.counter_measures)?;
        write!(f, "Max depth:        {}", self.max_depth)
    }
}
