//! Presence rules for each Printful write endpoint
//!
//! Built fresh for every call and dropped when the call returns.

use crate::validation::RuleSet;

/// POST /orders
pub fn order_rules() -> RuleSet {
    RuleSet::new()
        .required("external_id")
        .required("shipping")
        .required("recipient.name")
        .required("recipient.address1")
        .required("recipient.city")
        .required("recipient.state_code")
        .required("recipient.country_code")
        .required("recipient.zip")
        .required_array("items")
        .required("items.*.external_id")
        .required("items.*.variant_id")
        .required("items.*.quantity")
        .required("items.*.retail_price")
        .required("items.*.name")
        .required_array("items.*.files")
}

/// POST /tax/rates
pub fn tax_rate_rules() -> RuleSet {
    RuleSet::new()
        .required("recipient.country_code")
        .required("recipient.state_code")
        .required("recipient.city")
        .required("recipient.zip")
}

/// POST /shipping/rates
pub fn shipping_rate_rules() -> RuleSet {
    RuleSet::new()
        .required("recipient.address1")
        .required("recipient.city")
        .required("recipient.country_code")
        .required_array("items")
}
