//! Synthetic order book assembled by the liquidity models.
//!
//! A book is a flat list of price levels in the order they were added.
//! Each level carries a `sequence_id` starting at 1 and increasing by one per
//! level; the matching engine uses it to break ties between levels at the
//! same price. Levels are never sorted, merged, or clamped after insertion.

use serde::Serialize;
use tracing::trace;

use crate::error::BookError;
use crate::types::{BookSide, BookType, InstrumentId, Price, Quantity};

/// One (side, price, size) entry in a synthetic book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookLevel {
    pub side: BookSide,
    pub price: Price,
    pub size: Quantity,
    pub sequence_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticOrderBook {
    instrument_id: InstrumentId,
    book_type: BookType,
    levels: Vec<BookLevel>,
}

impl SyntheticOrderBook {
    /// Create an empty book.
    pub fn new(instrument_id: InstrumentId, book_type: BookType) -> Self {
        Self {
            instrument_id,
            book_type,
            levels: Vec::new(),
        }
    }

    pub fn instrument_id(&self) -> &InstrumentId {
        &self.instrument_id
    }

    pub fn book_type(&self) -> BookType {
        self.book_type
    }

    /// Sequence id the next level must carry.
    pub fn next_sequence_id(&self) -> u64 {
        self.levels.last().map_or(1, |l| l.sequence_id + 1)
    }

    /// Append a level after validating it against the levels already present.
    ///
    /// Rejects zero sizes, bids that are not strictly below the previous bid,
    /// asks that are not strictly above the previous ask, and sequence ids
    /// other than [`Self::next_sequence_id`]. The book is unchanged on error.
    pub fn add_level(
        &mut self,
        side: BookSide,
        price: Price,
        size: Quantity,
        sequence_id: u64,
    ) -> Result<(), BookError> {
        if size.is_zero() {
            return Err(BookError::ZeroSize { side, price });
        }

        if let Some(previous) = self.last_on_side(side).map(|l| l.price) {
            let moves_away = match side {
                BookSide::Bid => price < previous,
                BookSide::Ask => price > previous,
            };
            if !moves_away {
                return Err(BookError::NonMonotonicPrice {
                    side,
                    price,
                    previous,
                });
            }
        }

        let expected = self.next_sequence_id();
        if sequence_id != expected {
            return Err(BookError::SequenceOutOfOrder {
                expected,
                got: sequence_id,
            });
        }

        trace!(
            instrument = %self.instrument_id,
            %side,
            %price,
            %size,
            sequence_id,
            "synthetic level"
        );
        self.levels.push(BookLevel {
            side,
            price,
            size,
            sequence_id,
        });
        Ok(())
    }

    /// Append a level with the next sequence id. Returns the id assigned.
    pub fn push_level(
        &mut self,
        side: BookSide,
        price: Price,
        size: Quantity,
    ) -> Result<u64, BookError> {
        let sequence_id = self.next_sequence_id();
        self.add_level(side, price, size, sequence_id)?;
        Ok(sequence_id)
    }

    /// All levels in insertion (sequence id) order.
    pub fn levels(&self) -> &[BookLevel] {
        &self.levels
    }

    /// Bid levels, nearest to the spread first.
    pub fn bids(&self) -> impl Iterator<Item = &BookLevel> {
        self.side_levels(BookSide::Bid)
    }

    /// Ask levels, nearest to the spread first.
    pub fn asks(&self) -> impl Iterator<Item = &BookLevel> {
        self.side_levels(BookSide::Ask)
    }

    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids().next()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks().next()
    }

    /// Total size resting on one side.
    pub fn depth(&self, side: BookSide) -> Option<Quantity> {
        self.side_levels(side)
            .map(|l| l.size)
            .reduce(|acc, size| acc + size)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn side_levels(&self, side: BookSide) -> impl Iterator<Item = &BookLevel> {
        self.levels.iter().filter(move |l| l.side == side)
    }

    fn last_on_side(&self, side: BookSide) -> Option<&BookLevel> {
        self.levels.iter().rev().find(|l| l.side == side)
    }
}
