use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::book::SyntheticOrderBook;
use crate::types::BookSide;

/// One printable/exportable row per synthetic level.
#[derive(Debug, Clone, Serialize)]
pub struct LevelRow {
    pub sequence_id: u64,
    pub side: BookSide,
    pub price: String,
    pub size: String,
}

/// Summary of a synthesized book, for the CLI and CSV export.
#[derive(Debug, Clone)]
pub struct BookReport {
    pub model_name: String,
    pub instrument_id: String,
    pub rows: Vec<LevelRow>,

    // Depth per side
    pub bid_levels: usize,
    pub ask_levels: usize,
    pub bid_depth: String,
    pub ask_depth: String,
}

impl BookReport {
    /// Build a report from a synthesized book.
    pub fn from_book(book: &SyntheticOrderBook, model_name: &str) -> Self {
        let rows = book
            .levels()
            .iter()
            .map(|l| LevelRow {
                sequence_id: l.sequence_id,
                side: l.side,
                price: l.price.to_string(),
                size: l.size.to_string(),
            })
            .collect();

        let depth = |side: BookSide| {
            book.depth(side)
                .map_or_else(|| "-".to_string(), |q| q.to_string())
        };

        Self {
            model_name: model_name.to_string(),
            instrument_id: book.instrument_id().to_string(),
            rows,
            bid_levels: book.bids().count(),
            ask_levels: book.asks().count(),
            bid_depth: depth(BookSide::Bid),
            ask_depth: depth(BookSide::Ask),
        }
    }

    /// Print a formatted text table to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", "=".repeat(55));
        println!(
            "  Synthetic book: {} on {}",
            self.model_name, self.instrument_id
        );
        println!("{}", "=".repeat(55));
        println!();
        println!("  {:>4}  {:<4}  {:>16}  {:>20}", "seq", "side", "price", "size");
        println!("  {}", "-".repeat(50));
        for row in &self.rows {
            println!(
                "  {:>4}  {:<4}  {:>16}  {:>20}",
                row.sequence_id,
                row.side.label(),
                row.price,
                row.size
            );
        }
        println!();
        println!(
            "  Bids: {} levels, depth {}",
            self.bid_levels, self.bid_depth
        );
        println!(
            "  Asks: {} levels, depth {}",
            self.ask_levels, self.ask_depth
        );
        println!();
        println!("{}", "=".repeat(55));
        println!();
    }

    /// Export one CSV row per level.
    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("failed to create CSV at {}", path.display()))?;

        for row in &self.rows {
            wtr.serialize(row)
                .with_context(|| format!("failed to write CSV row {}", row.sequence_id))?;
        }

        wtr.flush().context("failed to flush CSV")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BookType, InstrumentId, Price, Quantity};

    fn make_book() -> SyntheticOrderBook {
        let mut book = SyntheticOrderBook::new(InstrumentId::new("BTCUSDT.SIM"), BookType::L2Mbp);
        book.push_level(BookSide::Bid, Price::new(100.0, 1), Quantity::new(1.5, 2))
            .unwrap();
        book.push_level(BookSide::Ask, Price::new(100.5, 1), Quantity::new(1.5, 2))
            .unwrap();
        book.push_level(BookSide::Bid, Price::new(99.5, 1), Quantity::new(2.0, 2))
            .unwrap();
        book
    }

    #[test]
    fn test_report_counts() {
        let report = BookReport::from_book(&make_book(), "two_tier");
        assert_eq!(report.model_name, "two_tier");
        assert_eq!(report.instrument_id, "BTCUSDT.SIM");
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.bid_levels, 2);
        assert_eq!(report.ask_levels, 1);
        assert_eq!(report.bid_depth, "3.50");
        assert_eq!(report.ask_depth, "1.50");
        assert_eq!(report.rows[2].price, "99.5");
    }

    #[test]
    fn test_empty_side_depth() {
        let book = SyntheticOrderBook::new(InstrumentId::new("X"), BookType::L2Mbp);
        let report = BookReport::from_book(&book, "default");
        assert_eq!(report.bid_depth, "-");
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_export_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.csv");

        BookReport::from_book(&make_book(), "two_tier")
            .export_csv(&path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // Header + 3 levels
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "sequence_id,side,price,size");
        assert_eq!(lines[1], "1,bid,100.0,1.50");
        assert_eq!(lines[3], "3,bid,99.5,2.00");
    }

    #[test]
    fn test_print_does_not_panic() {
        BookReport::from_book(&make_book(), "two_tier").print();
    }
}
