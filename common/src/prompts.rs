//! Prompt templates the assistant fills in before handing a request to its backend.

use serde::Serialize;

use crate::assistant::{AssistantContext, Capability, DeliveryRecord};
use crate::identity::UserRole;

pub const PLATFORM_INTRO: &str =
    "You are an AI assistant for SupplyLink, a platform connecting street food vendors with suppliers in India.";

pub fn system_instruction(capability: Capability, role: UserRole) -> String {
    let focus = match capability {
        Capability::ProductRecommendation => {
            "Provide helpful, accurate recommendations based on local market knowledge."
        }
        Capability::OrderAnalysis => {
            "Provide data-driven analysis and actionable recommendations based on order history."
        }
        Capability::RejectionAnalysis => {
            "Provide helpful analysis of order rejections and cancellations to improve the platform experience."
        }
        Capability::DeliveryOptimization => {
            "Provide practical, data-driven delivery optimization recommendations."
        }
        Capability::CostOptimization => {
            "Provide practical, actionable cost optimization advice based on local market knowledge."
        }
        Capability::MarketInsights => "Provide data-driven market insights based on local market knowledge.",
        Capability::General => {
            return format!(
                "{PLATFORM_INTRO}\n\
                 If the user is a vendor, help them with inventory management, finding suppliers, and optimizing costs.\n\
                 If the user is a supplier, help them with market trends, pricing strategies, and connecting with vendors.\n\
                 Always be helpful, concise, and provide actionable advice. Current user type: {role}."
            );
        }
    };
    format!("{PLATFORM_INTRO} {focus}")
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}

pub fn product_recommendation(ctx: &AssistantContext) -> String {
    format!(
        "As a supply chain assistant for street food vendors in India, provide personalized recommendations \
         for the following ingredients: {ingredients}.\n\n\
         The vendor is located in {location} and has a {budget} budget.\n\n\
         For each ingredient, recommend:\n\
         1. The best quality supplier in the area\n\
         2. Typical price range\n\
         3. Seasonal availability\n\
         4. Quality indicators to look for\n\
         5. Storage tips to reduce waste\n\n\
         Format your response as structured recommendations that can be easily parsed.",
        ingredients = ctx.ingredients.join(", "),
        location = ctx.location,
        budget = ctx.budget,
    )
}

pub fn order_analysis(ctx: &AssistantContext) -> String {
    let orders = pretty(&ctx.orders);
    match ctx.role {
        UserRole::Vendor => format!(
            "As a purchasing analyst for a street food vendor in India, analyze the following order history:\n\n\
             {orders}\n\n\
             Provide insights on:\n\
             1. Ordering patterns and frequency\n\
             2. Most frequently ordered ingredients\n\
             3. Price fluctuations and trends\n\
             4. Recommendations for optimizing order quantities\n\
             5. Suggestions for better inventory management\n\
             6. Potential cost-saving opportunities\n\n\
             Format your response as structured insights that can be easily read by the vendor."
        ),
        UserRole::Supplier => format!(
            "As a sales analyst for a food supplier in India, analyze the following order history from your customers:\n\n\
             {orders}\n\n\
             Provide insights on:\n\
             1. Product demand patterns and trends\n\
             2. Most popular products and potential bundle opportunities\n\
             3. Customer ordering behavior\n\
             4. Recommendations for inventory management\n\
             5. Potential upselling or cross-selling opportunities\n\
             6. Pricing optimization suggestions\n\n\
             Format your response as structured insights that can be easily read by the supplier."
        ),
    }
}

pub fn rejection_analysis(ctx: &AssistantContext) -> String {
    format!(
        "Analyze the following rejected/cancelled orders and their reasons:\n\n\
         {rejections}\n\n\
         Provide insights on:\n\
         1. Common patterns in rejection/cancellation reasons\n\
         2. Potential underlying issues that need to be addressed\n\
         3. Specific recommendations to reduce rejection/cancellation rates\n\
         4. Suggestions for improving communication between vendors and suppliers\n\n\
         Format your response as structured insights with clear, actionable recommendations.",
        rejections = pretty(&ctx.rejections),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedDelivery<'a> {
    order_id: &'a str,
    delivery_date: String,
    location: &'a str,
    items: String,
}

fn format_delivery(delivery: &DeliveryRecord) -> FormattedDelivery<'_> {
    let items = delivery
        .items
        .iter()
        .map(|item| match item.weight_kg {
            Some(weight) => format!("{} ({}, {weight}kg)", item.name, item.quantity),
            None => format!("{} ({})", item.name, item.quantity),
        })
        .collect::<Vec<_>>()
        .join(", ");
    FormattedDelivery {
        order_id: &delivery.order_id,
        delivery_date: delivery.delivery_date.format("%Y-%m-%d").to_string(),
        location: &delivery.location,
        items,
    }
}

pub fn delivery_optimization(ctx: &AssistantContext) -> String {
    let deliveries: Vec<_> = ctx.deliveries.iter().map(format_delivery).collect();
    format!(
        "As a logistics optimization expert for food suppliers in India, analyze the following delivery data:\n\n\
         {deliveries}\n\n\
         The central hub location is {location}.\n\n\
         Provide recommendations on:\n\
         1. Optimal delivery routes and grouping\n\
         2. Delivery scheduling to minimize costs\n\
         3. Strategies to reduce delivery times\n\
         4. Inventory staging suggestions\n\
         5. Potential areas for delivery service improvement\n\n\
         Format your response as structured recommendations with clear, actionable steps.",
        deliveries = pretty(&deliveries),
        location = ctx.location,
    )
}

pub fn cost_optimization(ctx: &AssistantContext) -> String {
    let ingredients = ctx
        .ingredient_costs
        .iter()
        .map(|i| format!("{}: ₹{} per {}", i.name, i.cost, i.quantity))
        .collect::<Vec<_>>()
        .join("\n");
    let menu = ctx
        .menu_items
        .iter()
        .map(|m| format!("{}: {}", m.name, m.ingredients.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "As a cost optimization expert for street food vendors in India, analyze the following ingredients and menu items:\n\n\
         Current Ingredients:\n{ingredients}\n\n\
         Menu Items:\n{menu}\n\n\
         Provide 3-5 specific suggestions to optimize costs while maintaining quality, including:\n\
         1. Ingredient substitutions or alternatives\n\
         2. Bulk purchasing opportunities\n\
         3. Seasonal adjustments\n\
         4. Supplier recommendations\n\
         5. Waste reduction strategies\n\n\
         For each suggestion, include the estimated cost savings percentage."
    )
}

pub fn market_insights(ctx: &AssistantContext) -> String {
    format!(
        "As a market analyst for food suppliers in India, provide detailed insights for a supplier \
         specializing in {categories} in the {region} region.\n\n\
         Include in your analysis:\n\
         1. Current demand trends for these categories among street food vendors\n\
         2. Pricing strategies that would be competitive yet profitable\n\
         3. Emerging opportunities or gaps in the market\n\
         4. Seasonal fluctuations to anticipate\n\
         5. Distribution and logistics recommendations\n\n\
         Format your response as structured insights that can be easily parsed.",
        categories = ctx.categories.join(", "),
        region = ctx.location,
    )
}

/// Free-form chat: earlier turns followed by the new prompt.
pub fn general(prompt: &str, ctx: &AssistantContext) -> String {
    let mut transcript = String::new();
    for turn in &ctx.history {
        transcript.push_str(&format!("{}: {}\n", turn.role, turn.content));
    }
    transcript.push_str(&format!("user: {prompt}"));
    transcript
}
