//! Read models returned by the cart: joined lines and the running summary.

use crate::model::{CartItem, Product};
use rust_decimal::Decimal;
use serde::Serialize;

/// A cart item joined to the product it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.item.quantity)
    }
}

/// Totals over a user's cart lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_items: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
}

impl CartSummary {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        lines.iter().fold(Self::default(), |acc, line| Self {
            total_items: acc.total_items + u64::from(line.item.quantity),
            total_price: acc.total_price + line.subtotal(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItemId, ProductCreate, ProductId, UserId};

    fn line(price: Decimal, quantity: u32) -> CartLine {
        let product_id = ProductId(1);
        CartLine {
            item: CartItem {
                id: CartItemId(1),
                user_id: UserId::new("alice"),
                product_id,
                quantity,
            },
            product: Product::new(
                product_id,
                ProductCreate {
                    name: "Mug".into(),
                    description: String::new(),
                    price,
                    category: "Home".into(),
                    image_url: None,
                    stock: 10,
                },
            ),
        }
    }

    #[test]
    fn summary_sums_quantities_and_subtotals() {
        let lines = vec![
            line(Decimal::new(1299, 2), 2),
            line(Decimal::new(2499, 2), 1),
        ];
        let summary = CartSummary::from_lines(&lines);

        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_price, Decimal::new(5097, 2));
    }

    #[test]
    fn empty_cart_sums_to_zero() {
        assert_eq!(CartSummary::from_lines(&[]), CartSummary::default());
        assert_eq!(CartSummary::default().total_price, Decimal::ZERO);
    }

    #[test]
    fn cart_line_flattens_item_next_to_product() {
        let json = serde_json::to_value(line(Decimal::new(1299, 2), 2)).unwrap();

        assert_eq!(json["id"], "cart_item_1");
        assert_eq!(json["userId"], "alice");
        assert_eq!(json["productId"], "product_1");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["product"]["price"], "12.99");
    }
}
