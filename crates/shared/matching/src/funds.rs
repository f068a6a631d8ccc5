use hexdex_core::{AssetKey, Balance, Price, Quantity, Side, notional};

/// Balance a trader must hold for a limit order to be accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundsRequirement {
    pub asset: AssetKey,
    pub amount: Balance,
}

/// Funds pre-check for a new limit order.
///
/// A BUY needs the full notional in the base asset, a SELL needs the
/// quantity in the traded asset. Funds are checked, not reserved.
pub fn limit_order_requirement(
    side: Side,
    asset: &AssetKey,
    amount: Quantity,
    price: Price,
) -> FundsRequirement {
    match side {
        Side::Buy => FundsRequirement {
            asset: AssetKey::Base,
            amount: notional(amount, price),
        },
        Side::Sell => FundsRequirement {
            asset: asset.clone(),
            amount: Balance::from(amount),
        },
    }
}
