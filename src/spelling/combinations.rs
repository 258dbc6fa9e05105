//! Budgeted enumeration of per-token option combinations.
//!
//! A phrase with `n` tokens and `k` options per token has `k^n` candidate
//! corrections. [`CombinationIter`] walks that product lazily and stops after
//! a fixed number of combinations, so the cost of a correction is bounded no
//! matter how ambiguous the input is.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// One choice for a token position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOption {
    /// Replacement token (the original token for the first option).
    pub token: String,
    /// Edit distance from the original token.
    pub distance: usize,
}

impl TokenOption {
    /// Create an option.
    pub fn new<S: Into<String>>(token: S, distance: usize) -> Self {
        TokenOption {
            token: token.into(),
            distance,
        }
    }
}

/// Order in which combinations are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumerationOrder {
    /// Depth-first over positions, options in insertion order; the last
    /// position varies fastest.
    #[default]
    DepthFirst,
    /// Ascending total edit distance; ties in depth-first order.
    BestFirst,
}

enum Frontier {
    DepthFirst {
        next: Option<Vec<usize>>,
    },
    BestFirst {
        /// Per position, option indices sorted by distance
        order: Vec<Vec<usize>>,
        heap: BinaryHeap<Reverse<(usize, Vec<usize>)>>,
        queued: AHashSet<Vec<usize>>,
    },
}

/// Lazy iterator over option-index vectors, capped at `max_combinations`.
pub struct CombinationIter<'a> {
    options: &'a [Vec<TokenOption>],
    max_combinations: usize,
    attempted: usize,
    frontier: Frontier,
}

impl<'a> CombinationIter<'a> {
    /// Start enumerating the product of `options`.
    pub fn new(
        options: &'a [Vec<TokenOption>],
        max_combinations: usize,
        order: EnumerationOrder,
    ) -> Self {
        let empty = options.is_empty() || options.iter().any(Vec::is_empty);
        let start = vec![0; options.len()];

        let frontier = match order {
            EnumerationOrder::DepthFirst => Frontier::DepthFirst {
                next: (!empty).then_some(start),
            },
            EnumerationOrder::BestFirst => {
                let order: Vec<Vec<usize>> = options
                    .iter()
                    .map(|choices| {
                        let mut indices: Vec<usize> = (0..choices.len()).collect();
                        indices.sort_by_key(|&i| choices[i].distance);
                        indices
                    })
                    .collect();
                let mut heap = BinaryHeap::new();
                let mut queued = AHashSet::new();
                if !empty {
                    let cost = ranked_cost(options, &order, &start);
                    queued.insert(start.clone());
                    heap.push(Reverse((cost, start)));
                }
                Frontier::BestFirst {
                    order,
                    heap,
                    queued,
                }
            }
        };

        CombinationIter {
            options,
            max_combinations,
            attempted: 0,
            frontier,
        }
    }

    /// Number of combinations handed out so far.
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Whether the cap stopped the walk before the product was exhausted.
    pub fn budget_exhausted(&self) -> bool {
        self.attempted >= self.max_combinations && self.has_pending()
    }

    fn has_pending(&self) -> bool {
        match &self.frontier {
            Frontier::DepthFirst { next } => next.is_some(),
            Frontier::BestFirst { heap, .. } => !heap.is_empty(),
        }
    }
}

impl Iterator for CombinationIter<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.attempted >= self.max_combinations {
            return None;
        }

        let options = self.options;
        let combination = match &mut self.frontier {
            Frontier::DepthFirst { next } => {
                let current = next.take()?;
                *next = advance(options, &current);
                current
            }
            Frontier::BestFirst {
                order,
                heap,
                queued,
            } => {
                let Reverse((_, ranked)) = heap.pop()?;
                for position in 0..ranked.len() {
                    if ranked[position] + 1 < order[position].len() {
                        let mut neighbour = ranked.clone();
                        neighbour[position] += 1;
                        if queued.insert(neighbour.clone()) {
                            let cost = ranked_cost(options, order, &neighbour);
                            heap.push(Reverse((cost, neighbour)));
                        }
                    }
                }
                ranked
                    .iter()
                    .enumerate()
                    .map(|(position, &rank)| order[position][rank])
                    .collect()
            }
        };

        self.attempted += 1;
        Some(combination)
    }
}

/// Odometer step: the last position varies fastest.
fn advance(options: &[Vec<TokenOption>], current: &[usize]) -> Option<Vec<usize>> {
    let mut next = current.to_vec();
    for position in (0..next.len()).rev() {
        next[position] += 1;
        if next[position] < options[position].len() {
            return Some(next);
        }
        next[position] = 0;
    }
    None
}

fn ranked_cost(options: &[Vec<TokenOption>], order: &[Vec<usize>], ranked: &[usize]) -> usize {
    ranked
        .iter()
        .enumerate()
        .map(|(position, &rank)| options[position][order[position][rank]].distance)
        .sum()
}
