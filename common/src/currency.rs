use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit a catalog price is quoted per.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    #[default]
    Kg,
    Liter,
    Piece,
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceUnit::Kg => write!(f, "kg"),
            PriceUnit::Liter => write!(f, "liter"),
            PriceUnit::Piece => write!(f, "piece"),
        }
    }
}

/// Group digits the Indian way: the last three, then pairs (`2,45,000`).
fn group_indian(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Format a whole-rupee amount for display, e.g. `₹1,650`.
pub fn format_rupees(amount: u64) -> String {
    format!("₹{}", group_indian(amount))
}

/// Format a unit price, e.g. `₹45/kg`.
pub fn format_unit_price(amount: u64, unit: PriceUnit) -> String {
    format!("{}/{unit}", format_rupees(amount))
}
