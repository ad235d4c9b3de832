use std::iter::Peekable;
use std::str::Chars;

use crate::core::{Card, CardParseError, Suit, Value};

/// Parse a list of two character card tokens, e.g. `["AH", "JS"]`.
///
/// ```
/// use holdem_odds::holdem::parse_cards;
///
/// let cards = parse_cards(&["AH", "JS", "2C"]).unwrap();
/// assert_eq!(3, cards.len());
/// assert!(parse_cards(&["AH", "J"]).is_err());
/// ```
pub fn parse_cards<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Card>, CardParseError> {
    tokens.iter().map(|t| t.as_ref().parse()).collect()
}

/// Parse cards written back to back, optionally separated by whitespace
/// or commas: `"AHJS"`, `"AH JS"` and `"AH,JS"` are all the same two cards.
///
/// ```
/// use holdem_odds::holdem::{parse_card_string, parse_cards};
///
/// assert_eq!(
///     parse_cards(&["QH", "2D", "KD"]).unwrap(),
///     parse_card_string("QH2D, KD").unwrap()
/// );
/// ```
pub fn parse_card_string(cards: &str) -> Result<Vec<Card>, CardParseError> {
    let mut iter = cards.chars().peekable();
    let mut out = Vec::new();
    loop {
        skip_separators(&mut iter);
        if iter.peek().is_none() {
            return Ok(out);
        }
        out.push(create_card(&mut iter)?);
    }
}

fn skip_separators(peekable: &mut Peekable<Chars>) {
    while peekable
        .peek()
        .is_some_and(|c| c.is_whitespace() || *c == ',')
    {
        peekable.next();
    }
}

/// Take a value char then a suit char off the front of the iterator.
fn create_card(peekable: &mut Peekable<Chars>) -> Result<Card, CardParseError> {
    let cv = peekable.next().ok_or(CardParseError::WrongLength(String::new()))?;
    let value = Value::from_char(cv).ok_or(CardParseError::UnexpectedValueChar(cv))?;
    let cs = peekable
        .next()
        .ok_or_else(|| CardParseError::WrongLength(cv.to_string()))?;
    let suit = Suit::from_char(cs).ok_or(CardParseError::UnexpectedSuitChar(cs))?;
    Ok(Card::new(value, suit))
}
