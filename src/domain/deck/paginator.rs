// src/domain/deck/paginator.rs

use crate::domain::resolution::ResolvedCard;
use crate::error::{AppError, AppResult};

/// One printed strip of cards; never longer than the configured row size
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cards: Vec<ResolvedCard>,
}

impl Row {
    pub fn cards(&self) -> &[ResolvedCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// All rows of one run, in print order
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    rows: Vec<Row>,
    row_size: usize,
}

impl Deck {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    pub fn card_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Greedy fixed-size chunking.
///
/// A row is flushed as soon as it holds `row_size` cards; a shorter
/// remainder becomes the last row. No padding.
pub fn paginate(cards: Vec<ResolvedCard>, row_size: usize) -> AppResult<Deck> {
    if row_size == 0 {
        return Err(AppError::Config("row size must be at least 1".to_string()));
    }

    let mut rows = Vec::with_capacity(cards.len().div_ceil(row_size));
    let mut buffer = Vec::with_capacity(row_size);

    for card in cards {
        buffer.push(card);
        if buffer.len() == row_size {
            rows.push(Row {
                cards: std::mem::replace(&mut buffer, Vec::with_capacity(row_size)),
            });
        }
    }

    if !buffer.is_empty() {
        rows.push(Row { cards: buffer });
    }

    Ok(Deck { rows, row_size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::ReferenceKind;

    fn cards(count: usize) -> Vec<ResolvedCard> {
        (0..count)
            .map(|i| {
                ResolvedCard::new(
                    format!("Title {}", i),
                    String::new(),
                    format!("/music/{}", i),
                    ReferenceKind::LocalPath,
                )
            })
            .collect()
    }

    #[test]
    fn test_fourteen_cards_in_rows_of_six() {
        let deck = paginate(cards(14), 6).unwrap();

        let sizes: Vec<usize> = deck.rows().iter().map(Row::len).collect();
        assert_eq!(sizes, vec![6, 6, 2]);
        assert_eq!(deck.card_count(), 14);

        // Order preserved, nothing duplicated or dropped
        let titles: Vec<&str> = deck
            .rows()
            .iter()
            .flat_map(|row| row.cards().iter().map(|c| c.title.as_str()))
            .collect();
        let expected: Vec<String> = (0..14).map(|i| format!("Title {}", i)).collect();
        assert_eq!(titles, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_row() {
        let deck = paginate(cards(12), 6).unwrap();
        assert_eq!(deck.rows().len(), 2);
        assert!(deck.rows().iter().all(|row| row.len() == 6));
    }

    #[test]
    fn test_empty_input() {
        let deck = paginate(Vec::new(), 6).unwrap();
        assert!(deck.is_empty());
        assert_eq!(deck.card_count(), 0);
    }

    #[test]
    fn test_row_size_one() {
        let deck = paginate(cards(3), 1).unwrap();
        assert_eq!(deck.rows().len(), 3);
    }

    #[test]
    fn test_zero_row_size_rejected() {
        assert!(matches!(paginate(cards(3), 0), Err(AppError::Config(_))));
    }
}
