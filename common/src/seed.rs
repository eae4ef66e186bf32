//! Demo records rendered by the catalog, order and directory pages.

use chrono::NaiveDate;

use crate::assistant::{IngredientCost, MenuItem};
use crate::currency::PriceUnit;
use crate::directory::{ContactDetails, SupplierEntry, SupplierId};
use crate::order::{Order, OrderId, OrderItem, OrderStatus};
use crate::product::{Product, ProductCategory, ProductId, ProductStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn item(name: &str, quantity: &str, price: u64) -> OrderItem {
    OrderItem {
        name: name.to_string(),
        quantity: quantity.to_string(),
        price,
    }
}

#[allow(clippy::too_many_arguments)]
fn supplier(
    n: u8,
    name: &str,
    rating: f32,
    reviews: u32,
    distance_km: f32,
    specialties: &[&str],
    delivery_time: &str,
    min_order: u64,
    trust_score: u8,
    product_count: u32,
    joined: u16,
    contact: (&str, &str, &str, &str, &str),
) -> SupplierEntry {
    let (person, phone, email, address, business_hours) = contact;
    SupplierEntry {
        id: SupplierId(format!("supplier-{n}")),
        name: name.to_string(),
        location: "Mumbai, Maharashtra".to_string(),
        distance_km,
        rating,
        reviews,
        verified: true,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        delivery_time: delivery_time.to_string(),
        min_order,
        trust_score,
        product_count,
        joined,
        contact: ContactDetails {
            person: person.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            business_hours: business_hours.to_string(),
        },
    }
}

pub fn suppliers() -> Vec<SupplierEntry> {
    vec![
        supplier(1, "FreshFarm Supplies", 4.8, 127, 2.5, &["Vegetables", "Fruits", "Herbs"], "Same day", 500, 95, 45, 2022,
            ("Rajesh Kumar", "+91 98765 43210", "contact@freshfarm.com", "123 Farm Road, Mumbai Central, Maharashtra 400008", "6:00 AM - 8:00 PM")),
        supplier(2, "Green Valley Farms", 4.6, 89, 1.8, &["Organic Vegetables", "Grains"], "Next day", 300, 92, 32, 2021,
            ("Priya Sharma", "+91 98765 43211", "info@greenvalley.com", "456 Valley Street, Andheri West, Mumbai 400058", "7:00 AM - 7:00 PM")),
        supplier(3, "Pure Oil Co.", 4.9, 203, 3.2, &["Cooking Oils", "Ghee", "Butter"], "Same day", 1000, 98, 28, 2020,
            ("Amit Patel", "+91 98765 43212", "sales@pureoil.com", "789 Oil Lane, Bandra East, Mumbai 400051", "8:00 AM - 6:00 PM")),
        supplier(4, "Spice Garden", 4.7, 156, 4.1, &["Spices", "Herbs", "Seasonings"], "Next day", 400, 94, 67, 2021,
            ("Meera Singh", "+91 98765 43213", "hello@spicegarden.com", "321 Spice Road, Dadar West, Mumbai 400028", "6:30 AM - 8:30 PM")),
        supplier(5, "Rice Paradise", 4.5, 98, 5.5, &["Rice", "Pulses", "Grains"], "Same day", 600, 90, 23, 2022,
            ("Vikram Mehta", "+91 98765 43214", "contact@riceparadise.com", "654 Rice Street, Kurla West, Mumbai 400070", "7:30 AM - 7:30 PM")),
        supplier(6, "Herb Haven", 4.4, 67, 2.1, &["Fresh Herbs", "Microgreens"], "Same day", 200, 88, 18, 2023,
            ("Neha Gupta", "+91 98765 43215", "info@herbhaven.com", "987 Herb Lane, Santacruz West, Mumbai 400054", "6:00 AM - 9:00 PM")),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    n: u8,
    name: &str,
    category: ProductCategory,
    supplier_n: u8,
    supplier_name: &str,
    price: u64,
    unit: PriceUnit,
    inventory: u32,
    quality: &str,
    bulk_pricing: &str,
    rating: f32,
    reviews: u32,
    description: &str,
) -> Product {
    Product {
        id: ProductId(format!("prod-{n}")),
        name: name.to_string(),
        description: description.to_string(),
        category,
        supplier_id: SupplierId(format!("supplier-{supplier_n}")),
        supplier_name: supplier_name.to_string(),
        price,
        unit,
        inventory,
        status: ProductStatus::Active,
        quality: quality.to_string(),
        bulk_pricing: Some(bulk_pricing.to_string()),
        rating,
        reviews,
        verified: true,
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product(1, "Fresh Tomatoes (Grade A)", ProductCategory::Vegetables, 1, "FreshFarm Supplies", 45, PriceUnit::Kg, 250,
            "Premium", "10% off on 50kg+", 4.8, 127,
            "Premium Grade A tomatoes, freshly harvested and carefully selected for consistent quality."),
        product(2, "Organic Onions", ProductCategory::Vegetables, 2, "Green Valley Farms", 35, PriceUnit::Kg, 400,
            "Organic", "₹32/kg (100kg+)", 4.6, 89,
            "Certified organic red onions with a long shelf life."),
        product(3, "Premium Cooking Oil", ProductCategory::Oils, 3, "Pure Oil Co.", 120, PriceUnit::Liter, 150,
            "Premium", "₹110/liter (20L+)", 4.9, 203,
            "Refined groundnut oil suited to deep frying."),
        product(4, "Fresh Ginger", ProductCategory::Spices, 4, "Spice Garden", 180, PriceUnit::Kg, 80,
            "Standard", "₹165/kg (10kg+)", 4.7, 156,
            "Aromatic ginger root, cleaned and sorted."),
        product(5, "Quality Rice (Basmati)", ProductCategory::Grains, 5, "Rice Paradise", 85, PriceUnit::Kg, 1000,
            "Premium", "₹78/kg (50kg+)", 4.5, 98,
            "Long-grain aged basmati for biryani and pulao."),
        product(6, "Fresh Coriander", ProductCategory::Herbs, 6, "Herb Haven", 60, PriceUnit::Kg, 60,
            "Fresh", "₹55/kg (5kg+)", 4.4, 67,
            "Morning-harvested coriander bunches."),
    ]
}

/// Purchase orders as a vendor sees them.
pub fn vendor_orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId("#1234".into()),
            counterparty: "FreshFarm Supplies".into(),
            items: vec![item("Fresh Tomatoes (Grade A)", "25kg", 1_125), item("Organic Onions", "15kg", 525)],
            status: OrderStatus::Delivered,
            order_date: date(2024, 1, 15),
            delivery_date: date(2024, 1, 16),
            location: None,
            rating: Some(5),
            review: Some("Excellent quality tomatoes, very fresh!".into()),
            tracking: None,
            reason: None,
        },
        Order {
            id: OrderId("#1235".into()),
            counterparty: "Pure Oil Co.".into(),
            items: vec![item("Premium Cooking Oil", "10L", 1_200)],
            status: OrderStatus::InTransit,
            order_date: date(2024, 1, 17),
            delivery_date: date(2024, 1, 18),
            location: None,
            rating: None,
            review: None,
            tracking: Some("Expected delivery by 2 PM today".into()),
            reason: None,
        },
        Order {
            id: OrderId("#1236".into()),
            counterparty: "Spice Garden".into(),
            items: vec![item("Fresh Ginger", "5kg", 900), item("Coriander Seeds", "2kg", 300)],
            status: OrderStatus::Pending,
            order_date: date(2024, 1, 18),
            delivery_date: date(2024, 1, 19),
            location: None,
            rating: None,
            review: None,
            tracking: None,
            reason: None,
        },
        Order {
            id: OrderId("#1237".into()),
            counterparty: "Rice Paradise".into(),
            items: vec![item("Quality Rice (Basmati)", "50kg", 3_750)],
            status: OrderStatus::Cancelled,
            order_date: date(2024, 1, 14),
            delivery_date: date(2024, 1, 15),
            location: None,
            rating: None,
            review: None,
            tracking: None,
            reason: Some("Supplier out of stock".into()),
        },
        Order {
            id: OrderId("#1238".into()),
            counterparty: "Green Valley Farms".into(),
            items: vec![item("Organic Carrots", "20kg", 800), item("Fresh Spinach", "10kg", 400)],
            status: OrderStatus::Delivered,
            order_date: date(2024, 1, 13),
            delivery_date: date(2024, 1, 14),
            location: None,
            rating: Some(4),
            review: Some("Good quality, but delivery was slightly delayed".into()),
            tracking: None,
            reason: None,
        },
    ]
}

/// Incoming orders as a supplier sees them.
pub fn supplier_orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId("#S1234".into()),
            counterparty: "Street Food Corner".into(),
            items: vec![item("Fresh Tomatoes (Grade A)", "25kg", 1_125), item("Organic Onions", "15kg", 525)],
            status: OrderStatus::Pending,
            order_date: date(2024, 1, 18),
            delivery_date: date(2024, 1, 19),
            location: Some("Mumbai Central".into()),
            rating: None,
            review: None,
            tracking: None,
            reason: None,
        },
        Order {
            id: OrderId("#S1235".into()),
            counterparty: "Tasty Bites".into(),
            items: vec![item("Premium Cooking Oil", "20L", 2_400)],
            status: OrderStatus::Approved,
            order_date: date(2024, 1, 17),
            delivery_date: date(2024, 1, 18),
            location: Some("Andheri West".into()),
            rating: None,
            review: None,
            tracking: None,
            reason: None,
        },
        Order {
            id: OrderId("#S1236".into()),
            counterparty: "Spice Route".into(),
            items: vec![item("Fresh Ginger", "10kg", 1_800), item("Coriander Seeds", "5kg", 750)],
            status: OrderStatus::Rejected,
            order_date: date(2024, 1, 16),
            delivery_date: date(2024, 1, 17),
            location: Some("Bandra East".into()),
            rating: None,
            review: None,
            tracking: None,
            reason: Some("Insufficient inventory".into()),
        },
    ]
}

/// A vendor's current ingredient prices, used for cost optimization.
pub fn ingredient_costs() -> Vec<IngredientCost> {
    [
        ("Tomatoes", 60, "kg"),
        ("Onions", 40, "kg"),
        ("Rice", 80, "kg"),
        ("Cooking Oil", 120, "liter"),
        ("Spices", 200, "500g"),
    ]
    .into_iter()
    .map(|(name, cost, quantity)| IngredientCost {
        name: name.into(),
        cost,
        quantity: quantity.into(),
    })
    .collect()
}

pub fn menu_items() -> Vec<MenuItem> {
    let item = |name: &str, ingredients: &[&str]| MenuItem {
        name: name.into(),
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
    };
    vec![
        item("Pav Bhaji", &["Tomatoes", "Onions", "Spices", "Butter"]),
        item("Vada Pav", &["Potatoes", "Spices", "Cooking Oil"]),
        item("Biryani", &["Rice", "Spices", "Vegetables", "Cooking Oil"]),
    ]
}

/// Categories a supplier's market insights cover.
pub fn insight_categories() -> Vec<String> {
    ["Vegetables", "Grains", "Spices", "Oils"].map(String::from).to_vec()
}
