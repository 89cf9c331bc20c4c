use crate::model::{ProductId, UserId};
use serde::{Deserialize, Serialize};

super::prefixed_id!(
    /// Type-safe identifier for CartItems.
    CartItemId,
    "cart_item"
);

/// One product line in a user's cart.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](actor_framework::ResourceActor). A cart item is only ever
/// stored with a positive `quantity`; an update that brings it to zero removes it (see
/// [`impl ActorEntity for CartItem`](#impl-ActorEntity-for-CartItem)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for creating a new cart item.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemCreate {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Quantity changes applied to an existing cart item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CartItemUpdate {
    /// Adds to the current quantity (repeat add-to-cart).
    Increment(u32),
    /// Replaces the quantity. Zero removes the item.
    Set(u32),
}

/// Index entries a cart item is reachable under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartKey {
    /// All items of one user.
    User(UserId),
    /// The single item of one user for one product.
    UserProduct(UserId, ProductId),
}
