//! Factory content for a freshly provisioned machine.

use crate::domain::coin::{Coin, CoinValue};
use crate::domain::product::Product;

/// Denominations the machine is stocked with, in cents.
pub const DENOMINATIONS: [i64; 6] = [5, 10, 20, 50, 100, 200];

/// Coins loaded into the depot at provisioning time: three of each
/// denomination, 1155 cents in total.
pub fn initial_depot() -> Vec<Coin> {
    DENOMINATIONS
        .into_iter()
        .map(|value| {
            let value = CoinValue::new(value).expect("seed denominations are positive");
            Coin::new(value, 3)
        })
        .collect()
}

/// The fixed drink menu, sorted by name.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new(1, "Cappuccino", 65),
        Product::new(2, "Doppio", 80),
        Product::new(3, "Espresso", 50),
        Product::new(4, "Latte", 50),
        Product::new(5, "Lungo", 55),
        Product::new(6, "Machiato", 75),
        Product::new(7, "Melange", 70),
        Product::new(8, "Mokka", 60),
        Product::new(9, "Ristretto", 45),
    ]
}
