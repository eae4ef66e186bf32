//! Demo accounts: one login per directory supplier plus a vendor, so the
//! directory's "Contact" flow reaches a real inbox.

use supplylink_common::identity::{UserId, UserProfile, UserRole};

use crate::auth::AuthError;
use crate::state::AppState;

pub const DEMO_PASSWORD: &str = "supplylink";
pub const DEMO_VENDOR_EMAIL: &str = "vendor@supplylink.in";
pub const DEMO_VENDOR_ID: &str = "vendor-demo";

pub fn seed_accounts(state: &AppState) -> Result<usize, AuthError> {
    let mut accounts = vec![UserProfile::new(
        UserId::new(DEMO_VENDOR_ID),
        DEMO_VENDOR_EMAIL,
        "Mumbai Chaat Corner",
        UserRole::Vendor,
    )];
    accounts.extend(state.catalog.directory().iter().map(|entry| {
        UserProfile::new(
            UserId::new(entry.id.0.clone()),
            &entry.contact.email,
            &entry.name,
            UserRole::Supplier,
        )
    }));

    let count = accounts.len();
    for profile in accounts {
        state
            .identity
            .register(profile.id.clone(), &profile.email, DEMO_PASSWORD)?;
        tracing::info!(email = %profile.email, role = %profile.role, "demo account");
        state.users.insert_profile(profile);
    }
    Ok(count)
}
