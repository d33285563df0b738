use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, PhoneNumber, SenderId};

#[derive(Debug, Clone)]
/// One message to one or more recipients (`smsapi`).
pub struct SendSms {
    recipients: Vec<PhoneNumber>,
    message: MessageText,
    sender_id: Option<SenderId>,
}

impl SendSms {
    /// Build a one-to-many request.
    ///
    /// `sender_id` of `None` means the client's default sender is used.
    pub fn new(
        recipients: Vec<PhoneNumber>,
        message: MessageText,
        sender_id: Option<SenderId>,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }
        Ok(Self {
            recipients,
            message,
            sender_id,
        })
    }

    /// Convenience constructor for a single recipient.
    pub fn one(recipient: PhoneNumber, message: MessageText, sender_id: Option<SenderId>) -> Self {
        Self {
            recipients: vec![recipient],
            message,
            sender_id,
        }
    }

    pub fn recipients(&self) -> &[PhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn sender_id(&self) -> Option<&SenderId> {
        self.sender_id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single recipient/message pair of a [`SendBulkSms`] batch.
pub struct BulkMessage {
    to: PhoneNumber,
    message: MessageText,
}

impl BulkMessage {
    pub fn new(to: PhoneNumber, message: MessageText) -> Self {
        Self { to, message }
    }

    /// Validate a raw pair, recipient first.
    pub fn parse(to: &str, message: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            to: PhoneNumber::parse(to)?,
            message: MessageText::new(message)?,
        })
    }

    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }
}

#[derive(Debug, Clone)]
/// Differing messages to differing recipients in a single call (`smsapimany`).
pub struct SendBulkSms {
    messages: Vec<BulkMessage>,
    sender_id: Option<SenderId>,
}

impl SendBulkSms {
    pub fn new(
        messages: Vec<BulkMessage>,
        sender_id: Option<SenderId>,
    ) -> Result<Self, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty { field: "messages" });
        }
        Ok(Self {
            messages,
            sender_id,
        })
    }

    pub fn messages(&self) -> &[BulkMessage] {
        &self.messages
    }

    pub fn sender_id(&self) -> Option<&SenderId> {
        self.sender_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_sms_requires_recipients() {
        let msg = MessageText::new("hi").unwrap();
        let err = SendSms::new(Vec::new(), msg, None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "number" });
    }

    #[test]
    fn bulk_requires_messages() {
        let err = SendBulkSms::new(Vec::new(), None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "messages" });
    }

    #[test]
    fn bulk_message_parse_validates_both_fields() {
        let pair = BulkMessage::parse("01712345678", "Hello John").unwrap();
        assert_eq!(pair.to().canonical(), "8801712345678");
        assert_eq!(pair.message().as_str(), "Hello John");

        assert!(matches!(
            BulkMessage::parse("12345", "Hello"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
        assert!(matches!(
            BulkMessage::parse("01712345678", ""),
            Err(ValidationError::Empty { field: "message" })
        ));
    }
}
