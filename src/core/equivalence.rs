//! Sources for the 7462 five card equivalence classes.
//!
//! The lookup tables are built from a list of classes ordered strongest
//! first. That list traditionally comes from a CSV file where every line
//! looks like
//!
//! ```text
//! 1,A,K,Q,J,T,SF,Royal Flush
//! ```
//!
//! with an index field (ignored), five rank symbols, a short category code
//! and a display name. [`CsvEquivalenceSource`] reads that layout and
//! [`GeneratedEquivalenceSource`] produces the same classes without a file.
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::{DataSourceError, HandCategory, Value};

/// One of the 7462 distinct five card hand strengths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquivalenceClass {
    /// 1 is the strongest class, 7462 the weakest.
    pub rank: u16,
    /// The five values of the hand, significant positions first.
    pub pattern: [Value; 5],
    /// Short category code (`SF`, `F`, `S`, `HC`, ...).
    pub code: String,
    pub category: HandCategory,
    pub name: String,
}

impl EquivalenceClass {
    pub fn new(
        rank: u16,
        pattern: [Value; 5],
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            rank,
            pattern,
            code: code.into(),
            category: HandCategory::of_rank(rank),
            name: name.into(),
        }
    }
}

/// Anything that can hand over the full, ordered list of equivalence classes.
pub trait EquivalenceSource {
    fn classes(&self) -> Result<Vec<EquivalenceClass>, DataSourceError>;
}

impl EquivalenceSource for [EquivalenceClass] {
    fn classes(&self) -> Result<Vec<EquivalenceClass>, DataSourceError> {
        Ok(self.to_vec())
    }
}

impl EquivalenceSource for Vec<EquivalenceClass> {
    fn classes(&self) -> Result<Vec<EquivalenceClass>, DataSourceError> {
        Ok(self.clone())
    }
}

/// Reads the classes from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvEquivalenceSource {
    path: PathBuf,
}

impl CsvEquivalenceSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse classes from any buffered reader.
    ///
    /// Rows are ranked in the order they appear; blank lines are skipped.
    /// The display name is everything after the seventh comma.
    pub fn parse<R: BufRead>(reader: R) -> Result<Vec<EquivalenceClass>, DataSourceError> {
        let mut classes = Vec::with_capacity(super::NUM_EQUIVALENCE_CLASSES);
        let mut surplus = 0;
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            if classes.len() == super::NUM_EQUIVALENCE_CLASSES {
                surplus += 1;
                continue;
            }
            let line_no = line_idx + 1;

            let fields: Vec<&str> = line.splitn(8, ',').collect();
            if fields.len() != 8 {
                return Err(DataSourceError::FieldCount {
                    line: line_no,
                    found: fields.len(),
                });
            }

            let mut pattern = [Value::Two; 5];
            for (slot, field) in pattern.iter_mut().zip(&fields[1..6]) {
                *slot = parse_rank_symbol(field).ok_or_else(|| {
                    DataSourceError::UnexpectedRankChar {
                        line: line_no,
                        found: field.to_string(),
                    }
                })?;
            }

            let rank = classes.len() as u16 + 1;
            classes.push(EquivalenceClass::new(
                rank,
                pattern,
                fields[6].trim(),
                fields[7].trim(),
            ));
        }
        if surplus > 0 {
            return Err(DataSourceError::RowCount {
                found: classes.len() + surplus,
            });
        }
        Ok(classes)
    }
}

impl EquivalenceSource for CsvEquivalenceSource {
    fn classes(&self) -> Result<Vec<EquivalenceClass>, DataSourceError> {
        let file = File::open(&self.path)?;
        Self::parse(BufReader::new(file))
    }
}

fn parse_rank_symbol(field: &str) -> Option<Value> {
    let mut chars = field.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Value::from_char(c),
        _ => None,
    }
}

/// Write classes in the CSV layout [`CsvEquivalenceSource`] reads.
pub fn write_csv<W: Write>(classes: &[EquivalenceClass], mut out: W) -> std::io::Result<()> {
    for class in classes {
        write!(out, "{}", class.rank)?;
        for v in class.pattern {
            write!(out, ",{}", v.to_char())?;
        }
        writeln!(out, ",{},{}", class.code, class.name)?;
    }
    out.flush()
}

/// Enumerates every equivalence class from the rules of poker.
///
/// Categories come strongest first and within a category hands are ordered
/// by their values, highest first, exactly the order the lookup tables
/// expect.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedEquivalenceSource;

impl EquivalenceSource for GeneratedEquivalenceSource {
    fn classes(&self) -> Result<Vec<EquivalenceClass>, DataSourceError> {
        Ok(generate_classes())
    }
}

/// The wheel, A-2-3-4-5.
const WHEEL_BITS: u16 = 0b1_0000_0000_1111;

fn is_straight(bits: u16) -> bool {
    bits == WHEEL_BITS || (0..=8).any(|low| bits == 0x1F << low)
}

fn v(idx: usize) -> Value {
    Value::from_index(idx as u8)
}

/// Straights from ace high down to the wheel, as value patterns.
fn straights() -> Vec<[Value; 5]> {
    (3..=12usize)
        .rev()
        .map(|high| {
            if high == 3 {
                [Value::Five, Value::Four, Value::Three, Value::Two, Value::Ace]
            } else {
                [v(high), v(high - 1), v(high - 2), v(high - 3), v(high - 4)]
            }
        })
        .collect()
}

/// Five distinct values that don't form a straight, highest first.
fn no_pair_patterns() -> Vec<[Value; 5]> {
    let mut out = Vec::with_capacity(1277);
    for a in (4..13).rev() {
        for b in (3..a).rev() {
            for c in (2..b).rev() {
                for d in (1..c).rev() {
                    for e in (0..d).rev() {
                        let bits = [a, b, c, d, e].iter().fold(0u16, |acc, i| acc | (1u16 << *i));
                        if !is_straight(bits) {
                            out.push([v(a), v(b), v(c), v(d), v(e)]);
                        }
                    }
                }
            }
        }
    }
    out
}

/// Values highest first, skipping the ones in `exclude`.
fn descending_except(exclude: &[usize]) -> Vec<usize> {
    (0..13).rev().filter(|i| !exclude.contains(i)).collect()
}

fn values_string(pattern: &[Value; 5]) -> String {
    pattern
        .iter()
        .map(|v| v.to_char().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_classes() -> Vec<EquivalenceClass> {
    let mut classes: Vec<EquivalenceClass> = Vec::with_capacity(super::NUM_EQUIVALENCE_CLASSES);
    let mut push = |pattern: [Value; 5], category: HandCategory, name: String| {
        let rank = classes.len() as u16 + 1;
        classes.push(EquivalenceClass::new(rank, pattern, category.code(), name));
    };

    for pattern in straights() {
        let name = if pattern[0] == Value::Ace {
            "Royal Flush".to_string()
        } else {
            format!("{}-High Straight Flush", pattern[0].name())
        };
        push(pattern, HandCategory::StraightFlush, name);
    }

    for quad in descending_except(&[]) {
        for kicker in descending_except(&[quad]) {
            let (q, k) = (v(quad), v(kicker));
            push(
                [q, q, q, q, k],
                HandCategory::FourOfAKind,
                format!("Four {}, {} Kicker", q.plural(), k.name()),
            );
        }
    }

    for trips in descending_except(&[]) {
        for pair in descending_except(&[trips]) {
            let (t, p) = (v(trips), v(pair));
            push(
                [t, t, t, p, p],
                HandCategory::FullHouse,
                format!("{} Full over {}", t.plural(), p.plural()),
            );
        }
    }

    let no_pairs = no_pair_patterns();
    for pattern in &no_pairs {
        push(
            *pattern,
            HandCategory::Flush,
            format!("{}-High Flush ({})", pattern[0].name(), values_string(pattern)),
        );
    }

    for pattern in straights() {
        push(
            pattern,
            HandCategory::Straight,
            format!("{}-High Straight", pattern[0].name()),
        );
    }

    for trips in descending_except(&[]) {
        let kickers = descending_except(&[trips]);
        for (i, high) in kickers.iter().enumerate() {
            for low in &kickers[i + 1..] {
                let (t, h, l) = (v(trips), v(*high), v(*low));
                push(
                    [t, t, t, h, l],
                    HandCategory::ThreeOfAKind,
                    format!("Three {}, {}-{}", t.plural(), h.name(), l.name()),
                );
            }
        }
    }

    for high in (1..13).rev() {
        for low in (0..high).rev() {
            for kicker in descending_except(&[high, low]) {
                let (h, l, k) = (v(high), v(low), v(kicker));
                push(
                    [h, h, l, l, k],
                    HandCategory::TwoPair,
                    format!("{} and {}, {} Kicker", h.plural(), l.plural(), k.name()),
                );
            }
        }
    }

    for pair in descending_except(&[]) {
        let kickers = descending_except(&[pair]);
        for (i, a) in kickers.iter().enumerate() {
            for (j, b) in kickers.iter().enumerate().skip(i + 1) {
                for c in &kickers[j + 1..] {
                    let p = v(pair);
                    let pattern = [p, p, v(*a), v(*b), v(*c)];
                    push(
                        pattern,
                        HandCategory::OnePair,
                        format!("Pair of {} ({})", p.plural(), values_string(&pattern)),
                    );
                }
            }
        }
    }

    for pattern in &no_pairs {
        push(
            *pattern,
            HandCategory::HighCard,
            format!("{}-High ({})", pattern[0].name(), values_string(pattern)),
        );
    }

    classes
}
