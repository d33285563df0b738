use crate::domain::value::message_parts;

/// Default price of a single SMS segment in BDT.
pub const DEFAULT_COST_PER_SMS: f64 = 0.50;

/// Currency the gateway bills in.
pub const CURRENCY: &str = "BDT";

#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub message_length: usize,
    pub sms_parts: u8,
    pub recipient_count: u32,
    pub total_sms_count: u64,
    pub cost_per_sms: f64,
    pub total_cost: f64,
    pub currency: &'static str,
}

/// Estimate what sending `message` to `recipient_count` numbers will be billed.
pub fn estimate_cost(message: &str, recipient_count: u32, cost_per_sms: f64) -> CostEstimate {
    let sms_parts = message_parts(message);
    let total_sms_count = u64::from(sms_parts) * u64::from(recipient_count);

    CostEstimate {
        message_length: message.chars().count(),
        sms_parts,
        recipient_count,
        total_sms_count,
        cost_per_sms,
        total_cost: total_sms_count as f64 * cost_per_sms,
        currency: CURRENCY,
    }
}
