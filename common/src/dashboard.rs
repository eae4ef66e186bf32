use serde::{Deserialize, Serialize};

use crate::identity::UserRole;

/// One KPI card on the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub description: String,
}

fn card(title: &str, value: &str, description: &str) -> StatCard {
    StatCard {
        title: title.to_string(),
        value: value.to_string(),
        description: description.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub role: UserRole,
    pub heading: String,
    pub cards: Vec<StatCard>,
}

/// Overview page for `role`. Figures are fixed display values.
pub fn render_dashboard(role: UserRole) -> DashboardView {
    let cards = match role {
        UserRole::Supplier => vec![
            card("Monthly Revenue", "₹2,45,000", "+15.2% from last month"),
            card("Active Orders", "47", "12 pending approval"),
            card("Products Listed", "89", "+8 new this month"),
            card("Vendor Network", "156", "+23 new vendors"),
        ],
        UserRole::Vendor => vec![
            card("Active Orders", "8", "3 in transit"),
            card("Trusted Suppliers", "24", "All verified"),
            card("Products Explored", "156", "This month"),
            card("Savings This Month", "₹12,450", "Through bulk buying"),
        ],
    };
    DashboardView {
        role,
        heading: format!("{} Dashboard", role.label()),
        cards,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

const fn nav(href: &'static str, label: &'static str) -> NavItem {
    NavItem { href, label }
}

const SUPPLIER_NAV: &[NavItem] = &[
    nav("/dashboard", "Overview"),
    nav("/dashboard/products", "Products"),
    nav("/dashboard/orders", "Orders"),
    nav("/dashboard/chat", "Chat"),
    nav("/dashboard/assistant", "AI Assistant"),
    nav("/dashboard/profile", "Profile"),
];

const VENDOR_NAV: &[NavItem] = &[
    nav("/dashboard", "Overview"),
    nav("/dashboard/marketplace", "Marketplace"),
    nav("/dashboard/suppliers", "Find Suppliers"),
    nav("/dashboard/orders", "Orders"),
    nav("/dashboard/chat", "Chat"),
    nav("/dashboard/assistant", "AI Assistant"),
    nav("/dashboard/profile", "Profile"),
];

/// Sidebar entries for `role`.
pub fn navigation(role: UserRole) -> &'static [NavItem] {
    match role {
        UserRole::Supplier => SUPPLIER_NAV,
        UserRole::Vendor => VENDOR_NAV,
    }
}
