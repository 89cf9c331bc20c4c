//! Demo catalog inserted by `seed_products` into an empty store.

use crate::model::ProductCreate;
use rust_decimal::Decimal;

const ELECTRONICS: &str = "Electronics";
const HOME_AND_KITCHEN: &str = "Home & Kitchen";
const SPORTS: &str = "Sports";

/// Outcome of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog already had products; nothing was inserted.
    AlreadySeeded,
    /// The demo products were inserted.
    Seeded { count: usize },
}

impl SeedOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SeedOutcome::AlreadySeeded => "Products already exist",
            SeedOutcome::Seeded { .. } => "Demo products created successfully",
        }
    }
}

impl std::fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

fn demo(name: &str, description: &str, cents: i64, category: &str, stock: u32) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        category: category.to_string(),
        image_url: None,
        stock,
    }
}

/// The eight demo products, in insertion order.
pub fn demo_products() -> Vec<ProductCreate> {
    vec![
        demo(
            "Wireless Headphones",
            "High-quality wireless headphones with noise cancellation",
            19999,
            ELECTRONICS,
            50,
        ),
        demo(
            "Coffee Mug",
            "Ceramic coffee mug with ergonomic handle",
            1299,
            HOME_AND_KITCHEN,
            100,
        ),
        demo(
            "Running Shoes",
            "Comfortable running shoes for daily exercise",
            8999,
            SPORTS,
            30,
        ),
        demo(
            "Smartphone",
            "Latest smartphone with advanced camera features",
            69999,
            ELECTRONICS,
            25,
        ),
        demo(
            "Yoga Mat",
            "Non-slip yoga mat for home workouts",
            2999,
            SPORTS,
            75,
        ),
        demo(
            "Desk Lamp",
            "LED desk lamp with adjustable brightness",
            4599,
            HOME_AND_KITCHEN,
            40,
        ),
        demo(
            "Bluetooth Speaker",
            "Portable Bluetooth speaker with rich sound",
            7999,
            ELECTRONICS,
            60,
        ),
        demo(
            "Water Bottle",
            "Insulated water bottle keeps drinks cold for 24 hours",
            2499,
            SPORTS,
            80,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_has_eight_priced_products_in_three_categories() {
        let products = demo_products();
        assert_eq!(products.len(), 8);
        assert_eq!(products[0].name, "Wireless Headphones");
        assert_eq!(products[0].price, Decimal::new(19999, 2));

        let mut categories: Vec<_> = products.iter().map(|p| p.category.as_str()).collect();
        categories.sort();
        categories.dedup();
        assert_eq!(categories, vec![ELECTRONICS, HOME_AND_KITCHEN, SPORTS]);
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(SeedOutcome::AlreadySeeded.to_string(), "Products already exist");
        assert_eq!(
            SeedOutcome::Seeded { count: 8 }.message(),
            "Demo products created successfully"
        );
    }
}
