//! Keyword-routed assistant.
//!
//! A prompt is classified into a [`Capability`], turned into an
//! [`AssistantRequest`] by the templates in [`crate::prompts`] and handed to a
//! [`Responder`]. A failing responder never surfaces an error to the caller;
//! the capability's fixed fallback text is returned instead.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::UserRole;
use crate::order::Order;
use crate::prompts;

pub const DEFAULT_LOCATION: &str = "Mumbai, Maharashtra";

pub const WELCOME_MESSAGE: &str = "Hello! I'm your SupplyLink AI Assistant. I can help you with inventory \
     management, supplier recommendations, market insights, and more. How can I assist you today?";

pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    ProductRecommendation,
    OrderAnalysis,
    RejectionAnalysis,
    DeliveryOptimization,
    General,
    /// Vendor insight: where ingredient spend can be cut.
    CostOptimization,
    /// Supplier insight: demand and pricing outlook for their categories.
    MarketInsights,
}

/// Keyword groups; every group must have at least one hit. First rule wins.
const RULES: &[(Capability, &[&[&str]])] = &[
    (Capability::ProductRecommendation, &[&["recommend"], &["product"]]),
    (Capability::OrderAnalysis, &[&["order"], &["pattern", "analysis", "analyze"]]),
    (Capability::RejectionAnalysis, &[&["reject", "cancel"]]),
    (Capability::DeliveryOptimization, &[&["delivery"], &["optim"]]),
];

impl Capability {
    pub fn classify(prompt: &str) -> Self {
        let prompt = prompt.to_lowercase();
        RULES
            .iter()
            .find(|(_, groups)| {
                groups
                    .iter()
                    .all(|alternatives| alternatives.iter().any(|kw| prompt.contains(kw)))
            })
            .map(|(capability, _)| *capability)
            .unwrap_or(Capability::General)
    }

    /// The insight a role is offered: cost savings for vendors, market
    /// outlook for suppliers. Never picked by [`Capability::classify`].
    pub fn insight_for(role: UserRole) -> Self {
        match role {
            UserRole::Vendor => Capability::CostOptimization,
            UserRole::Supplier => Capability::MarketInsights,
        }
    }

    /// Reply used when the responder fails for this capability.
    pub fn fallback(self) -> &'static str {
        match self {
            Capability::ProductRecommendation => {
                "Unable to generate product recommendations at this time. Please try again later."
            }
            Capability::OrderAnalysis => {
                "Unable to analyze order patterns at this time. Please try again later."
            }
            Capability::RejectionAnalysis => {
                "Unable to analyze rejection reasons at this time. Please try again later."
            }
            Capability::DeliveryOptimization => {
                "Unable to optimize delivery routes at this time. Please try again later."
            }
            Capability::General => {
                "I'm sorry, I encountered an error processing your request. Please try again later."
            }
            Capability::CostOptimization => {
                "Unable to generate cost optimization suggestions at this time. Please try again later."
            }
            Capability::MarketInsights => {
                "Unable to generate market insights at this time. Please try again later."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    pub date: NaiveDate,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionRecord {
    pub order_id: String,
    pub date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    pub name: String,
    pub quantity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f32>,
}

impl DeliveryItem {
    /// Parse a free-form quantity such as `25kg`, `2.5kg` or `10L`. Only
    /// kilograms carry a weight; anything without a leading number counts
    /// as one.
    pub fn from_quantity(name: &str, quantity: &str) -> Self {
        let quantity = quantity.trim();
        let end = quantity
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(quantity.len());
        let (number, unit) = quantity.split_at(end);
        let count = number.parse::<f32>().unwrap_or(1.0);
        Self {
            name: name.to_string(),
            quantity: count,
            weight_kg: unit.trim().eq_ignore_ascii_case("kg").then_some(count),
        }
    }
}

/// What a vendor pays for one ingredient, e.g. ₹60 per kg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCost {
    pub name: String,
    pub cost: u64,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub order_id: String,
    pub delivery_date: NaiveDate,
    pub location: String,
    pub items: Vec<DeliveryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Data the templates draw on. Every field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssistantContext {
    pub role: UserRole,
    pub ingredients: Vec<String>,
    pub location: String,
    pub budget: Budget,
    pub orders: Vec<OrderRecord>,
    pub rejections: Vec<RejectionRecord>,
    pub deliveries: Vec<DeliveryRecord>,
    pub history: Vec<ChatTurn>,
    pub ingredient_costs: Vec<IngredientCost>,
    pub menu_items: Vec<MenuItem>,
    pub categories: Vec<String>,
}

impl Default for AssistantContext {
    fn default() -> Self {
        Self {
            role: UserRole::Vendor,
            ingredients: Vec::new(),
            location: DEFAULT_LOCATION.to_string(),
            budget: Budget::default(),
            orders: Vec::new(),
            rejections: Vec::new(),
            deliveries: Vec::new(),
            history: Vec::new(),
            ingredient_costs: Vec::new(),
            menu_items: Vec::new(),
            categories: Vec::new(),
        }
    }
}

impl AssistantContext {
    /// Context built from the caller's order list. Cancelled or rejected
    /// orders with a reason become rejection records; the rest become
    /// delivery records.
    pub fn from_orders(role: UserRole, orders: &[Order]) -> Self {
        let records = orders
            .iter()
            .map(|o| OrderRecord {
                id: o.id.0.clone(),
                date: o.order_date,
                status: o.status.to_string(),
                product: o.items.first().map(|i| i.name.clone()),
                quantity: o.items.first().map(|i| i.quantity.clone()),
            })
            .collect();
        let rejections = orders
            .iter()
            .filter(|o| o.status.is_rejection())
            .filter_map(|o| {
                o.reason.as_ref().map(|reason| RejectionRecord {
                    order_id: o.id.0.clone(),
                    date: o.order_date,
                    reason: reason.clone(),
                })
            })
            .collect();
        let deliveries = orders
            .iter()
            .filter(|o| !o.status.is_rejection())
            .map(|o| DeliveryRecord {
                order_id: o.id.0.clone(),
                delivery_date: o.delivery_date,
                location: o.location.clone().unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                items: o.items.iter().map(|i| DeliveryItem::from_quantity(&i.name, &i.quantity)).collect(),
            })
            .collect();
        let mut ingredients: Vec<String> = Vec::new();
        for item in orders.iter().flat_map(|o| &o.items) {
            let name = item.name.to_lowercase();
            if !ingredients.contains(&name) {
                ingredients.push(name);
            }
        }
        Self {
            role,
            ingredients,
            orders: records,
            rejections,
            deliveries,
            ..Self::default()
        }
    }

    /// Fills in whatever the caller left empty from `base`.
    pub fn or_else(mut self, base: AssistantContext) -> Self {
        if self.orders.is_empty() {
            self.orders = base.orders;
        }
        if self.rejections.is_empty() {
            self.rejections = base.rejections;
        }
        if self.deliveries.is_empty() {
            self.deliveries = base.deliveries;
        }
        if self.ingredients.is_empty() {
            self.ingredients = base.ingredients;
        }
        if self.location.trim().is_empty() {
            self.location = base.location;
        }
        if self.ingredient_costs.is_empty() {
            self.ingredient_costs = base.ingredient_costs;
        }
        if self.menu_items.is_empty() {
            self.menu_items = base.menu_items;
        }
        if self.categories.is_empty() {
            self.categories = base.categories;
        }
        self
    }
}

/// A fully templated request, ready for a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantRequest {
    pub capability: Capability,
    pub system: String,
    pub prompt: String,
}

impl AssistantRequest {
    pub fn build(prompt: &str, ctx: &AssistantContext) -> Self {
        let capability = Capability::classify(prompt);
        let body = match capability {
            Capability::ProductRecommendation => prompts::product_recommendation(ctx),
            Capability::OrderAnalysis => prompts::order_analysis(ctx),
            Capability::RejectionAnalysis => prompts::rejection_analysis(ctx),
            Capability::DeliveryOptimization => prompts::delivery_optimization(ctx),
            Capability::General => prompts::general(prompt, ctx),
            Capability::CostOptimization => prompts::cost_optimization(ctx),
            Capability::MarketInsights => prompts::market_insights(ctx),
        };
        Self::with_body(capability, ctx, body)
    }

    /// The insight request for the context's role.
    pub fn insights(ctx: &AssistantContext) -> Self {
        let body = match ctx.role {
            UserRole::Vendor => prompts::cost_optimization(ctx),
            UserRole::Supplier => prompts::market_insights(ctx),
        };
        Self::with_body(Capability::insight_for(ctx.role), ctx, body)
    }

    fn with_body(capability: Capability, ctx: &AssistantContext, prompt: String) -> Self {
        Self {
            capability,
            system: prompts::system_instruction(capability, ctx.role),
            prompt,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant backend unavailable: {0}")]
    Unavailable(String),
    #[error("assistant backend returned an invalid reply: {0}")]
    InvalidReply(String),
}

/// Something that can answer a templated request.
pub trait Responder: Send + Sync {
    fn complete(&self, request: &AssistantRequest) -> Result<String, AssistantError>;
}

impl<R: Responder + ?Sized> Responder for Box<R> {
    fn complete(&self, request: &AssistantRequest) -> Result<String, AssistantError> {
        (**self).complete(request)
    }
}

/// Offline responder with one fixed reply per capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedResponder;

const RECOMMENDATIONS: &str = "Here are some product recommendations based on your requirements:

1. **Fresh Tomatoes (Grade A)** from FreshFarm Supplies
   - Price: ₹45/kg (bulk: 10% off on 50kg+)
   - In season now, look for firm, bright red fruit
   - Store at room temperature away from direct sunlight

2. **Organic Onions** from Green Valley Farms
   - Price: ₹35/kg (₹32/kg for 100kg+)
   - Available year-round, choose dry, papery skins
   - Keep in a cool, ventilated place

3. **Premium Cooking Oil** from Pure Oil Co.
   - Price: ₹120/liter (₹110/liter for 20L+)
   - Check the seal and manufacturing date
   - Store away from heat to avoid rancidity";

const ORDER_ANALYSIS: &str = "Based on your order history, here are some insights:

1. **Ordering Patterns**
   - You order vegetables most frequently, typically every 2-3 days
   - Oil and grain orders follow a weekly cycle

2. **Most Ordered Items**
   - Tomatoes, onions and cooking oil make up most of your spend

3. **Recommendations**
   - Consolidate vegetable orders to reach bulk pricing tiers
   - Place weekly staple orders on the same day to cut delivery fees
   - Keep a small buffer stock of oil and rice to avoid emergency purchases";

const REJECTION_ANALYSIS: &str = "Analysis of rejected and cancelled orders:

1. **Common Rejection Reasons**
   - Insufficient inventory at the supplier
   - Supplier out of stock for seasonal items
   - Late changes to delivery schedules

2. **Underlying Issues**
   - Inventory levels are not updated in real time
   - Orders are placed without checking availability

3. **Recommendations**
   - Suppliers should keep inventory counts current on their listings
   - Vendors should confirm availability via chat for large orders
   - Offer substitutes when an item is out of stock";

const DELIVERY_OPTIMIZATION: &str = "Delivery Optimization Recommendations for Mumbai:

1. **Route Grouping**
   - Group deliveries by area: Andheri and Bandra, then Dadar and Mumbai Central
   - Schedule nearby drops in a single run

2. **Scheduling**
   - Deliver perishables before 10 AM to avoid peak traffic
   - Move bulk staples to afternoon slots

3. **Inventory Staging**
   - Stage fast-moving vegetables at a central hub
   - Pre-pack recurring orders the evening before";

const COST_OPTIMIZATION: &str = "Cost optimization suggestions for your menu:

1. **Bulk Purchasing** (estimated savings: 10-15%)
   - Buy onions and rice in 50kg lots to reach bulk price tiers
   - Share bulk orders with nearby vendors when storage is tight

2. **Seasonal Adjustments** (estimated savings: 5-8%)
   - Use more seasonal vegetables in Pav Bhaji when tomato prices spike
   - Switch to locally grown produce during peak harvest

3. **Ingredient Alternatives** (estimated savings: 5-10%)
   - Blend whole spices in house instead of buying ready mixes
   - Use rice bran oil for deep frying Vada Pav

4. **Waste Reduction** (estimated savings: 8-12%)
   - Prep Biryani vegetables in smaller batches through the day
   - Repurpose leftover onions and tomatoes into chutneys";

const MARKET_INSIGHTS: &str = "Market insights for your categories in Mumbai, Maharashtra:

1. **Demand Trends**
   - Vegetable demand from street food vendors peaks in the evening rush
   - Rice and oil see steady weekly reorders

2. **Pricing Strategy**
   - Offer tiered bulk pricing to win repeat vendors
   - Keep staple prices close to wholesale market rates

3. **Opportunities**
   - Pre-mixed spice packs for popular street food dishes
   - Next-morning delivery for small vendors

4. **Seasonal Fluctuations**
   - Tomato and onion prices swing sharply before and after the monsoon
   - Plan spice stock ahead of the festival season

5. **Distribution**
   - Cluster deliveries by neighbourhood to cut per-drop cost
   - Use early morning slots for perishables";

const GREETING: &str = "I'm your SupplyLink AI Assistant. I can help with inventory management, supplier \
     recommendations, market insights, and more. How can I assist you today?";

impl Responder for CannedResponder {
    fn complete(&self, request: &AssistantRequest) -> Result<String, AssistantError> {
        let reply = match request.capability {
            Capability::ProductRecommendation => RECOMMENDATIONS,
            Capability::OrderAnalysis => ORDER_ANALYSIS,
            Capability::RejectionAnalysis => REJECTION_ANALYSIS,
            Capability::DeliveryOptimization => DELIVERY_OPTIMIZATION,
            Capability::General => GREETING,
            Capability::CostOptimization => COST_OPTIMIZATION,
            Capability::MarketInsights => MARKET_INSIGHTS,
        };
        Ok(reply.to_string())
    }
}

/// Routes prompts to a responder and applies fallbacks.
#[derive(Debug, Clone, Default)]
pub struct Assistant<R = CannedResponder> {
    responder: R,
}

impl<R: Responder> Assistant<R> {
    pub fn new(responder: R) -> Self {
        Self { responder }
    }

    pub fn respond(&self, prompt: &str, ctx: &AssistantContext) -> String {
        self.answer(&AssistantRequest::build(prompt, ctx))
    }

    /// The role's insight: cost savings for vendors, market outlook for
    /// suppliers.
    pub fn insights(&self, ctx: &AssistantContext) -> (Capability, String) {
        let request = AssistantRequest::insights(ctx);
        (request.capability, self.answer(&request))
    }

    fn answer(&self, request: &AssistantRequest) -> String {
        match self.responder.complete(request) {
            Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(capability = ?request.capability, "assistant responder failed: {e}");
                request.capability.fallback().to_string()
            }
        }
    }
}

/// Answer `prompt` with the offline responder.
pub fn respond(prompt: &str, ctx: &AssistantContext) -> String {
    Assistant::<CannedResponder>::default().respond(prompt, ctx)
}

/// A starter prompt offered on the assistant page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub title: &'static str,
    pub prompt: &'static str,
}

const VENDOR_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        title: "Inventory Optimization",
        prompt: "How can I optimize my inventory to reduce waste and save costs?",
    },
    Suggestion {
        title: "Seasonal Ingredients",
        prompt: "What seasonal ingredients should I stock up on for the next month?",
    },
    Suggestion {
        title: "Supplier Recommendations",
        prompt: "Can you recommend reliable suppliers for fresh vegetables in Mumbai?",
    },
    Suggestion {
        title: "Cost Reduction",
        prompt: "How can I reduce my ingredient costs without compromising quality?",
    },
    Suggestion {
        title: "Order Analysis",
        prompt: "Analyze my recent orders and suggest improvements",
    },
];

const SUPPLIER_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        title: "Market Trends",
        prompt: "What are the current market trends for street food ingredients in India?",
    },
    Suggestion {
        title: "Pricing Strategy",
        prompt: "How should I price my products to be competitive but profitable?",
    },
    Suggestion {
        title: "Vendor Acquisition",
        prompt: "What strategies can I use to attract more street food vendors to my platform?",
    },
    Suggestion {
        title: "Delivery Optimization",
        prompt: "How can I optimize my delivery routes to serve multiple vendors efficiently?",
    },
    Suggestion {
        title: "Rejection Analysis",
        prompt: "Analyze the reasons for order rejections and suggest improvements",
    },
];

pub fn suggestions(role: UserRole) -> &'static [Suggestion] {
    match role {
        UserRole::Vendor => VENDOR_SUGGESTIONS,
        UserRole::Supplier => SUPPLIER_SUGGESTIONS,
    }
}
