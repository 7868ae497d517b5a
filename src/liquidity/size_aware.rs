use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// Orders at or below this many units count as small.
const SMALL_ORDER_THRESHOLD: u64 = 10;
/// Size offered at best to small orders.
const SMALL_ORDER_SIZE: u64 = 50;

/// Small orders fill at best; larger orders get the threshold at best and
/// the remainder one tick away.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeAware;

impl LiquidityModel for SizeAware {
    fn name(&self) -> &str {
        "size_aware"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        let threshold = ctx.units(SMALL_ORDER_THRESHOLD);
        let quantity = ctx.order.quantity;

        let tiers = if quantity <= threshold {
            vec![Tier::both(0, ctx.units(SMALL_ORDER_SIZE))]
        } else {
            // quantity > threshold, so the remainder is never zero
            vec![
                Tier::both(0, threshold),
                Tier::both(1, quantity - threshold),
            ]
        };
        ctx.build(&tiers).map(Some)
    }
}
