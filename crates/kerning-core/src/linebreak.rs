//! Knuth-Plass optimal line breaking.
//!
//! [`break_paragraph`] chooses the breakpoints of a paragraph that minimize
//! the total demerits of all its lines. Feasible breaks are kept as active
//! nodes, one per (breakpoint, fitness class, line number while the line
//! widths still vary); a node is deactivated as soon as the material after
//! it can no longer fit on a line.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::TypesetError;
use crate::token::{FORBIDDEN_BREAK, FORCED_BREAK, Paragraph, Token};

/// Badness assigned to lines that cannot be set within their glue.
pub const MAX_BADNESS: f64 = 10_000.0;

/// Target widths of the lines of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum LineWidths {
    /// Every line has the same width.
    Uniform(f64),
    /// Per-line widths; the last entry repeats for all further lines.
    PerLine(Vec<f64>),
}

impl LineWidths {
    /// Width of line `line` (0-based).
    pub fn width(&self, line: usize) -> f64 {
        match self {
            LineWidths::Uniform(width) => *width,
            LineWidths::PerLine(widths) => widths
                .get(line)
                .or_else(|| widths.last())
                .copied()
                .unwrap_or(0.0),
        }
    }

    /// Distinguishes line numbers whose following widths differ. Once every
    /// remaining line has the same width the line number no longer matters.
    fn class(&self, line: usize) -> Option<usize> {
        match self {
            LineWidths::PerLine(widths) if line + 1 < widths.len() => Some(line),
            _ => None,
        }
    }
}

/// Tuning of the demerits computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BreakOptions {
    /// Largest acceptable adjustment ratio on the first pass (default: 1.0).
    pub tolerance: f64,
    /// Largest acceptable adjustment ratio on the retry (default: 4.0).
    pub relaxed_tolerance: f64,
    /// Added to the badness of every line (default: 10).
    pub line_penalty: f64,
    /// Cost of breaking at a hyphen (default: 50).
    pub hyphen_penalty: f64,
    /// Extra demerits for two consecutive hyphenated lines (default: 3000).
    pub flagged_demerits: f64,
    /// Extra demerits for adjacent lines of incompatible fitness (default: 100).
    pub fitness_demerits: f64,
    /// After both passes fail, accept underfull lines at maximal badness
    /// instead of failing the paragraph (default: true).
    pub emergency_pass: bool,
}

impl Default for BreakOptions {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            relaxed_tolerance: 4.0,
            line_penalty: 10.0,
            hyphen_penalty: 50.0,
            flagged_demerits: 3000.0,
            fitness_demerits: 100.0,
            emergency_pass: true,
        }
    }
}

/// How much a line had to be stretched or shrunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fitness {
    /// Ratio below -0.5.
    Tight,
    /// Ratio in [-0.5, 0.5].
    Normal,
    /// Ratio in (0.5, 1].
    Loose,
    /// Ratio above 1.
    VeryLoose,
}

impl Fitness {
    /// Classify an adjustment ratio.
    pub fn of(ratio: f64) -> Self {
        if ratio < -0.5 {
            Fitness::Tight
        } else if ratio <= 0.5 {
            Fitness::Normal
        } else if ratio <= 1.0 {
            Fitness::Loose
        } else {
            Fitness::VeryLoose
        }
    }

    fn distance(self, other: Fitness) -> usize {
        (self as usize).abs_diff(other as usize)
    }
}

/// A chosen breakpoint, ending one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    /// Token index of the break.
    pub position: usize,
    /// Line ended by this break (0-based).
    pub line: usize,
    /// Adjustment ratio of that line.
    pub ratio: f64,
    pub fitness: Fitness,
    /// Whether the line ends at a discretionary hyphen.
    pub flagged: bool,
    /// Whether the line could not be set within its shrink.
    pub overfull: bool,
    /// Total demerits up to and including this line.
    pub demerits: f64,
}

/// Break a paragraph, retrying once with the relaxed tolerance and, when
/// enabled, once more accepting any underfull line.
pub fn break_paragraph(
    paragraph: &Paragraph,
    widths: &LineWidths,
    options: &BreakOptions,
) -> Result<Vec<Break>, TypesetError> {
    if let Some(breaks) = find_breaks(paragraph.tokens(), widths, options, options.tolerance) {
        return Ok(breaks);
    }
    debug!(
        paragraph = paragraph.index(),
        tolerance = options.relaxed_tolerance,
        "no feasible breaks, retrying with relaxed tolerance"
    );
    if let Some(breaks) =
        find_breaks(paragraph.tokens(), widths, options, options.relaxed_tolerance)
    {
        return Ok(breaks);
    }
    let emergency = if options.emergency_pass {
        debug!(paragraph = paragraph.index(), "emergency pass, underfull lines allowed");
        find_breaks(paragraph.tokens(), widths, options, f64::INFINITY)
    } else {
        None
    };
    emergency.ok_or(TypesetError::NoFeasibleBreak {
        paragraph: paragraph.index(),
    })
}

/// Running totals of width, stretch and shrink.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    width: f64,
    stretch: f64,
    shrink: f64,
}

#[derive(Debug, Clone)]
struct Node {
    position: usize,
    line: usize,
    fitness: Fitness,
    total_demerits: f64,
    ratio: f64,
    flagged: bool,
    overfull: bool,
    /// Totals at the first token of the next line.
    after: Totals,
    previous: Option<usize>,
}

struct Candidate {
    from: usize,
    total_demerits: f64,
    ratio: f64,
    overfull: bool,
}

/// One pass of the algorithm at a fixed tolerance.
///
/// An infinite `tolerance` accepts every line that is not overfull,
/// including lines without glue to stretch; those get [`MAX_BADNESS`].
/// Returns `None` when no sequence of feasible lines reaches the end.
pub fn find_breaks(
    tokens: &[Token],
    widths: &LineWidths,
    options: &BreakOptions,
    tolerance: f64,
) -> Option<Vec<Break>> {
    let sums = prefix_totals(tokens);
    let mut nodes = vec![Node {
        position: 0,
        line: 0,
        fitness: Fitness::Normal,
        total_demerits: 0.0,
        ratio: 0.0,
        flagged: false,
        overfull: false,
        after: Totals::default(),
        previous: None,
    }];
    let mut active: Vec<usize> = vec![0];
    let mut previous_break = 0;
    let mut finals: Vec<usize> = Vec::new();

    for b in 0..tokens.len() {
        let Some((cost, flagged, break_width)) = breakpoint(tokens, b) else {
            continue;
        };
        let forced = cost <= FORCED_BREAK;

        let mut candidates: BTreeMap<(Option<usize>, Fitness), Candidate> = BTreeMap::new();
        let mut rescue: Option<usize> = None;
        let mut still_active = Vec::with_capacity(active.len());

        for &a in &active {
            let node = &nodes[a];
            let line_width = widths.width(node.line);
            let natural = sums[b].width - node.after.width + break_width;
            let ratio = adjustment_ratio(
                line_width - natural,
                sums[b].stretch - node.after.stretch,
                sums[b].shrink - node.after.shrink,
            );

            if ratio < -1.0 {
                if node.position == previous_break
                    && rescue.is_none_or(|r| node.total_demerits < nodes[r].total_demerits)
                {
                    rescue = Some(a);
                }
            } else if !forced {
                still_active.push(a);
            }

            if (-1.0..=tolerance).contains(&ratio) {
                let demerits = line_demerits(ratio, cost, flagged, node, options);
                let key = (widths.class(node.line + 1), Fitness::of(ratio));
                let total = node.total_demerits + demerits;
                if candidates.get(&key).is_none_or(|c| total < c.total_demerits) {
                    candidates.insert(
                        key,
                        Candidate {
                            from: a,
                            total_demerits: total,
                            ratio,
                            overfull: false,
                        },
                    );
                }
            }
        }

        // A word wider than the line, alone after the previous breakpoint:
        // keep it as an overfull line rather than losing every path.
        if still_active.is_empty() && candidates.is_empty() {
            if let Some(a) = rescue {
                let node = &nodes[a];
                let ratio = -1.0;
                let demerits = (options.line_penalty + MAX_BADNESS).powi(2);
                candidates.insert(
                    (widths.class(node.line + 1), Fitness::Tight),
                    Candidate {
                        from: a,
                        total_demerits: node.total_demerits + demerits,
                        ratio,
                        overfull: true,
                    },
                );
            }
        }

        let after = sums[line_start(tokens, Some(b))];
        for ((_, fitness), candidate) in candidates {
            let from = &nodes[candidate.from];
            let node = Node {
                position: b,
                line: from.line + 1,
                fitness,
                total_demerits: candidate.total_demerits,
                ratio: candidate.ratio,
                flagged,
                overfull: candidate.overfull,
                after,
                previous: Some(candidate.from),
            };
            nodes.push(node);
            still_active.push(nodes.len() - 1);
            if forced && b + 1 == tokens.len() {
                finals.push(nodes.len() - 1);
            }
        }

        if still_active.is_empty() {
            return None;
        }
        active = still_active;
        previous_break = b;
    }

    let best = finals.into_iter().reduce(|best, n| {
        if nodes[n].total_demerits < nodes[best].total_demerits {
            n
        } else {
            best
        }
    })?;

    let mut breaks = Vec::new();
    let mut cursor = Some(best);
    while let Some(n) = cursor {
        let node = &nodes[n];
        if node.previous.is_none() {
            break;
        }
        breaks.push(Break {
            position: node.position,
            line: node.line - 1,
            ratio: node.ratio,
            fitness: node.fitness,
            flagged: node.flagged,
            overfull: node.overfull,
            demerits: node.total_demerits,
        });
        cursor = node.previous;
    }
    breaks.reverse();
    Some(breaks)
}

/// Cost, flag and added width of breaking at token `b`, or `None` when `b`
/// is not a legal breakpoint.
fn breakpoint(tokens: &[Token], b: usize) -> Option<(f64, bool, f64)> {
    match &tokens[b] {
        Token::Space { .. } if b > 0 && tokens[b - 1].is_word() => Some((0.0, false, 0.0)),
        Token::Penalty {
            cost,
            flagged,
            width,
            ..
        } if *cost < FORBIDDEN_BREAK => Some((*cost, *flagged, *width)),
        _ => None,
    }
}

/// Totals over `tokens[..i]` for every `i`. Penalties add nothing unless
/// chosen as a break.
fn prefix_totals(tokens: &[Token]) -> Vec<Totals> {
    let mut sums = Vec::with_capacity(tokens.len() + 1);
    let mut running = Totals::default();
    sums.push(running);
    for token in tokens {
        match token {
            Token::Word { width, .. } => running.width += width,
            Token::Space {
                width,
                stretch,
                shrink,
            } => {
                running.width += width;
                running.stretch += stretch;
                running.shrink += shrink;
            }
            Token::Penalty { .. } => {}
        }
        sums.push(running);
    }
    sums
}

/// Index of the first token set on a line that starts after a break at
/// `previous` (or at the start of the paragraph). Glue and penalties after
/// a break are discarded.
pub(crate) fn line_start(tokens: &[Token], previous: Option<usize>) -> usize {
    match previous {
        None => 0,
        Some(b) => {
            let mut i = b + 1;
            while i < tokens.len() && !tokens[i].is_word() && !tokens[i].is_forced_break() {
                i += 1;
            }
            i
        }
    }
}

/// Adjustment ratio of a line that is `excess` points short (positive) or
/// long (negative).
pub fn adjustment_ratio(excess: f64, stretch: f64, shrink: f64) -> f64 {
    if excess > 0.0 {
        if stretch > 0.0 {
            excess / stretch
        } else {
            f64::INFINITY
        }
    } else if excess < 0.0 {
        if shrink > 0.0 {
            excess / shrink
        } else {
            f64::NEG_INFINITY
        }
    } else {
        0.0
    }
}

/// Badness of a line with the given adjustment ratio.
pub fn badness(ratio: f64) -> f64 {
    if ratio < -1.0 {
        MAX_BADNESS
    } else {
        (100.0 * ratio.abs().powi(3)).min(MAX_BADNESS)
    }
}

fn line_demerits(ratio: f64, cost: f64, flagged: bool, from: &Node, options: &BreakOptions) -> f64 {
    let base = (options.line_penalty + badness(ratio)).powi(2);
    let mut demerits = if cost >= 0.0 {
        base + cost * cost
    } else if cost > FORCED_BREAK {
        base - cost * cost
    } else {
        base
    };
    if flagged && from.flagged {
        demerits += options.flagged_demerits;
    }
    if from.previous.is_some() && Fitness::of(ratio).distance(from.fitness) > 1 {
        demerits += options.fitness_demerits;
    }
    demerits
}
