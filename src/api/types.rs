use serde::{Deserialize, Deserializer};
use crate::models::{PairSnapshot, OrderStatus};

/// The wrapping key must be present; an explicit `null` reads as empty.
/// Error bodies such as `{"error":"Not Found"}` therefore fail to parse.
fn required_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The token-pairs endpoint has answered both as a bare list and as an
/// object wrapping one; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PairsResponse {
    List(Vec<PairSnapshot>),
    Wrapped {
        #[serde(deserialize_with = "required_list")]
        pairs: Vec<PairSnapshot>,
    },
}

impl PairsResponse {
    pub fn into_pairs(self) -> Vec<PairSnapshot> {
        match self {
            PairsResponse::List(pairs) => pairs,
            PairsResponse::Wrapped { pairs } => pairs,
        }
    }
}

/// Orders come back as a bare list, or wrapped under `orders` on newer
/// deployments of the endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrdersResponse {
    List(Vec<OrderStatus>),
    Wrapped {
        #[serde(deserialize_with = "required_list")]
        orders: Vec<OrderStatus>,
    },
}

impl OrdersResponse {
    pub fn into_orders(self) -> Vec<OrderStatus> {
        match self {
            OrdersResponse::List(orders) => orders,
            OrdersResponse::Wrapped { orders } => orders,
        }
    }
}
