use super::{
    Card, DataSourceError, Deck, EncodedCard, EquivalenceSource, EvaluationError, FIVE_OF_SEVEN,
    HandRank, LookupTables,
};

/// Scores five card hands in constant time.
///
/// Holds the lookup tables and the encoded deck. Nothing in here changes
/// after construction, so one evaluator can be shared by reference across
/// every simulation thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandEvaluator {
    tables: LookupTables,
    deck: Deck,
}

impl HandEvaluator {
    pub fn new(tables: LookupTables) -> Self {
        Self {
            tables,
            deck: Deck::new(),
        }
    }

    /// Load the equivalence classes and build the evaluator.
    pub fn build<S: EquivalenceSource + ?Sized>(source: &S) -> Result<Self, DataSourceError> {
        Ok(Self::new(LookupTables::build(source)?))
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    /// Equivalence rank of five distinct encoded cards.
    ///
    /// Flushes are keyed on the union of the rank bits, as are hands with
    /// five different values. Everything else has a repeated value and is
    /// found by binary searching the product of the value primes.
    #[inline]
    pub fn score(&self, cards: &[EncodedCard; 5]) -> Result<HandRank, EvaluationError> {
        let [a, b, c, d, e] = cards.map(EncodedCard::raw);

        let rank_bits = ((a | b | c | d | e) >> 16) as u16;
        if a & b & c & d & e & 0xF000 != 0 {
            return lookup_mask(self.tables.flush(rank_bits), rank_bits);
        }
        if rank_bits.count_ones() == 5 {
            return lookup_mask(self.tables.unique5(rank_bits), rank_bits);
        }

        let product: u32 = cards.iter().map(|c| c.prime()).product();
        self.tables
            .prime_product(product)
            .map(HandRank::new_unchecked)
            .ok_or(EvaluationError::UnknownPrimeProduct(product))
    }

    /// Best rank out of all 21 five card subsets of a seven card hand.
    #[inline]
    pub fn best_of_seven(&self, cards: &[EncodedCard; 7]) -> Result<HandRank, EvaluationError> {
        let mut best = HandRank::WORST;
        for combo in FIVE_OF_SEVEN.iter() {
            let five = combo.map(|idx| cards[idx]);
            let rank = self.score(&five)?;
            if rank > best {
                best = rank;
            }
        }
        Ok(best)
    }

    /// Rank a hand of five or seven plain cards.
    ///
    /// Returns `None` for any other hand size.
    ///
    /// ```
    /// use holdem_odds::core::{Card, GeneratedEquivalenceSource, HandCategory, HandEvaluator};
    ///
    /// let evaluator = HandEvaluator::build(&GeneratedEquivalenceSource).unwrap();
    /// let cards: Vec<Card> = ["AS", "AD", "KC", "KH", "2S"]
    ///     .iter()
    ///     .map(|s| s.parse().unwrap())
    ///     .collect();
    /// let rank = evaluator.rank_cards(&cards).unwrap().unwrap();
    /// assert_eq!(HandCategory::TwoPair, rank.category());
    /// ```
    pub fn rank_cards(&self, cards: &[Card]) -> Option<Result<HandRank, EvaluationError>> {
        let encoded: Vec<EncodedCard> = cards.iter().map(|c| self.deck.encode(*c)).collect();
        if let Ok(five) = <[EncodedCard; 5]>::try_from(encoded.as_slice()) {
            Some(self.score(&five))
        } else if let Ok(seven) = <[EncodedCard; 7]>::try_from(encoded.as_slice()) {
            Some(self.best_of_seven(&seven))
        } else {
            None
        }
    }

    /// Display name of the class, e.g. `"Royal Flush"`.
    pub fn hand_name(&self, rank: HandRank) -> &str {
        self.tables.name(rank.raw()).unwrap_or_default()
    }
}

#[inline]
fn lookup_mask(rank: u16, rank_bits: u16) -> Result<HandRank, EvaluationError> {
    if rank == 0 {
        Err(EvaluationError::UnknownRankMask(rank_bits))
    } else {
        Ok(HandRank::new_unchecked(rank))
    }
}
