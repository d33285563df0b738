//! Transport layer: wire-format details of the BulkSMSBD endpoints.

mod balance;
mod envelope;
mod money;
mod send_sms;

pub use balance::encode_balance_query;
pub use envelope::decode_envelope;
pub use send_sms::{encode_send_bulk_sms_form, encode_send_sms_form};
