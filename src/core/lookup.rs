use std::fmt;

use tracing::{Level, event, instrument};

use super::{DataSourceError, EquivalenceClass, EquivalenceSource, NUM_EQUIVALENCE_CLASSES};

/// One past the largest five value rank mask, `AKQJT` (0x1F00).
const RANK_MASK_TABLE_SIZE: usize = 0x1F00 + 1;
/// Classes with five different values: 1287 flushes and 1287 non-flushes.
const FIVE_VALUE_CLASSES: usize = 1287;
/// Classes with at least one repeated value.
const PRIME_PRODUCT_CLASSES: usize = 4888;

const STRAIGHT_FLUSH: &str = "SF";
const FLUSH: &str = "F";
const STRAIGHT: &str = "S";
const HIGH_CARD: &str = "HC";

/// Where a class lands in the lookup tables, decided by its code.
enum Route {
    Flush,
    Unique,
    PrimeProduct,
}

fn route(code: &str) -> Route {
    match code {
        STRAIGHT_FLUSH | FLUSH => Route::Flush,
        STRAIGHT | HIGH_CARD => Route::Unique,
        // Anything else has a repeated value.
        _ => Route::PrimeProduct,
    }
}

/// The immutable tables the evaluator scores hands with.
///
/// - `flushes`: rank mask of a suited hand to its equivalence rank.
/// - `unique5`: rank mask of an unsuited hand with five different values.
/// - `prime_products`/`prime_scores`: sorted products of the value primes
///   for every hand with a repeated value, and the rank at the same index.
/// - `names`: display name of rank `r` at `r - 1`.
///
/// A zero in either mask table means no class maps there.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupTables {
    flushes: Box<[u16]>,
    unique5: Box<[u16]>,
    prime_products: Box<[u32]>,
    prime_scores: Box<[u16]>,
    names: Box<[String]>,
}

impl LookupTables {
    /// Read every class from `source` and build the tables.
    #[instrument(level = "debug", skip(source))]
    pub fn build<S: EquivalenceSource + ?Sized>(source: &S) -> Result<Self, DataSourceError> {
        let classes = source.classes()?;
        Self::from_classes(&classes)
    }

    /// Build the tables from an already loaded class list, strongest first.
    ///
    /// The rank of each class is its position in the list plus one.
    pub fn from_classes(classes: &[EquivalenceClass]) -> Result<Self, DataSourceError> {
        if classes.len() != NUM_EQUIVALENCE_CLASSES {
            return Err(DataSourceError::RowCount {
                found: classes.len(),
            });
        }

        let mut flushes = vec![0u16; RANK_MASK_TABLE_SIZE].into_boxed_slice();
        let mut unique5 = vec![0u16; RANK_MASK_TABLE_SIZE].into_boxed_slice();
        let mut products: Vec<(u32, u16)> = Vec::with_capacity(PRIME_PRODUCT_CLASSES);
        let mut num_flushes = 0;
        let mut num_unique = 0;

        for (idx, class) in classes.iter().enumerate() {
            let row = idx + 1;
            let rank = row as u16;
            match route(&class.code) {
                Route::Flush => {
                    insert_rank_mask(&mut flushes, class, row)?;
                    num_flushes += 1;
                }
                Route::Unique => {
                    insert_rank_mask(&mut unique5, class, row)?;
                    num_unique += 1;
                }
                Route::PrimeProduct => {
                    let product: u32 = class.pattern.iter().map(|v| v.prime()).product();
                    products.push((product, rank));
                }
            }
        }

        check_size("flush", FIVE_VALUE_CLASSES, num_flushes)?;
        check_size("unique five", FIVE_VALUE_CLASSES, num_unique)?;
        check_size("prime product", PRIME_PRODUCT_CLASSES, products.len())?;

        // Sort the pairs so each product keeps its rank.
        products.sort_unstable_by_key(|(product, _)| *product);
        if let Some(dup) = products.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(DataSourceError::DuplicateKey {
                row: dup[1].1.max(dup[0].1) as usize,
            });
        }
        let (prime_products, prime_scores): (Vec<u32>, Vec<u16>) = products.into_iter().unzip();

        let names = classes.iter().map(|c| c.name.clone()).collect();

        event!(
            Level::INFO,
            flushes = num_flushes,
            unique = num_unique,
            paired = prime_products.len(),
            "Built hand lookup tables"
        );

        Ok(Self {
            flushes,
            unique5,
            prime_products: prime_products.into_boxed_slice(),
            prime_scores: prime_scores.into_boxed_slice(),
            names,
        })
    }

    /// Rank of a five card flush with the given rank mask, 0 if none.
    #[inline]
    pub fn flush(&self, rank_bits: u16) -> u16 {
        self.flushes
            .get(rank_bits as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Rank of an unsuited hand with five different values, 0 if none.
    #[inline]
    pub fn unique5(&self, rank_bits: u16) -> u16 {
        self.unique5
            .get(rank_bits as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Binary search the product of the five value primes.
    #[inline]
    pub fn prime_product(&self, product: u32) -> Option<u16> {
        self.prime_products
            .binary_search(&product)
            .ok()
            .map(|idx| self.prime_scores[idx])
    }

    /// The sorted product table, mostly useful for checking invariants.
    pub fn prime_products(&self) -> &[u32] {
        &self.prime_products
    }

    /// Display name for an equivalence rank.
    pub fn name(&self, rank: u16) -> Option<&str> {
        let idx = (rank as usize).checked_sub(1)?;
        self.names.get(idx).map(String::as_str)
    }
}

fn check_size(table: &'static str, expected: usize, found: usize) -> Result<(), DataSourceError> {
    if expected == found {
        Ok(())
    } else {
        Err(DataSourceError::TableSize {
            table,
            expected,
            found,
        })
    }
}

fn insert_rank_mask(
    table: &mut [u16],
    class: &EquivalenceClass,
    row: usize,
) -> Result<(), DataSourceError> {
    let bits = class
        .pattern
        .iter()
        .fold(0u16, |acc, v| acc | v.rank_bit());
    if bits.count_ones() != 5 {
        return Err(DataSourceError::InvalidPattern { row });
    }
    let slot = &mut table[bits as usize];
    if *slot != 0 {
        return Err(DataSourceError::DuplicateKey { row });
    }
    *slot = row as u16;
    Ok(())
}

impl fmt::Debug for LookupTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupTables")
            .field("flushes", &self.flushes.iter().filter(|r| **r != 0).count())
            .field("unique5", &self.unique5.iter().filter(|r| **r != 0).count())
            .field("prime_products", &self.prime_products.len())
            .field("names", &self.names.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeneratedEquivalenceSource, Value};

    fn classes() -> Vec<EquivalenceClass> {
        GeneratedEquivalenceSource.classes().unwrap()
    }

    #[test_log::test]
    fn test_build_from_generated() {
        let tables = LookupTables::build(&GeneratedEquivalenceSource).unwrap();
        assert_eq!(PRIME_PRODUCT_CLASSES, tables.prime_products().len());
        // Royal flush
        assert_eq!(1, tables.flush(0x1F00));
        // Ace high straight, unsuited.
        assert_eq!(1600, tables.unique5(0x1F00));
        // Seven high is the worst hand there is.
        assert_eq!(7462, tables.unique5(0b10_1111));
        assert_eq!(Some("Royal Flush"), tables.name(1));
        assert_eq!(None, tables.name(0));
        assert_eq!(None, tables.name(7463));
    }

    #[test]
    fn test_prime_products_sorted_and_distinct() {
        let tables = LookupTables::build(&GeneratedEquivalenceSource).unwrap();
        assert!(tables.prime_products().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_prime_product_lookup() {
        let tables = LookupTables::build(&GeneratedEquivalenceSource).unwrap();
        // Four aces with a king.
        let quads = 41u32.pow(4) * 37;
        assert_eq!(Some(11), tables.prime_product(quads));
        // 2-2-3-4-5 is the weakest pair of deuces.
        assert_eq!(Some(6185), tables.prime_product(2 * 2 * 3 * 5 * 7));
        // Five distinct values are never in the prime product table.
        assert_eq!(None, tables.prime_product(2 * 3 * 5 * 7 * 13));
    }

    #[test]
    fn test_build_is_idempotent() {
        let a = LookupTables::build(&GeneratedEquivalenceSource).unwrap();
        let b = LookupTables::build(&GeneratedEquivalenceSource).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_count() {
        let mut short = classes();
        short.pop();
        assert!(matches!(
            LookupTables::from_classes(&short),
            Err(DataSourceError::RowCount { found: 7461 })
        ));
    }

    #[test]
    fn test_duplicate_flush_key() {
        let mut bad = classes();
        // Make the second straight flush look like a royal flush.
        bad[1].pattern = bad[0].pattern;
        assert!(matches!(
            LookupTables::from_classes(&bad),
            Err(DataSourceError::DuplicateKey { row: 2 })
        ));
    }

    #[test]
    fn test_pattern_with_pair_in_flush_table() {
        let mut bad = classes();
        bad[0].pattern = [Value::Ace; 5];
        assert!(matches!(
            LookupTables::from_classes(&bad),
            Err(DataSourceError::InvalidPattern { row: 1 })
        ));
    }

    #[test]
    fn test_wrong_code_breaks_sizes() {
        let mut bad = classes();
        // A flush relabelled as a pair lands in the wrong table.
        bad[400].code = "1P".to_string();
        assert!(matches!(
            LookupTables::from_classes(&bad),
            Err(DataSourceError::TableSize { table: "flush", .. })
        ));
    }
}
