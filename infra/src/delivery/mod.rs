//! Out-of-band delivery of verification codes
//!
//! Real email and SMS gateways are not wired up; the console delivery
//! stands in for both by showing the code to the person at the terminal.

mod console;

pub use console::{ConsoleCodeDelivery, DeliveredCode};

use oh_core::domain::entities::Channel;

/// Message shown to the user for a delivered code
pub fn delivery_message(channel: Channel, code: &str) -> String {
    format!(
        "Your {} verification code is: {}",
        channel.as_str().to_uppercase(),
        code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_message() {
        assert_eq!(
            delivery_message(Channel::Email, "4821"),
            "Your EMAIL verification code is: 4821"
        );
        assert_eq!(
            delivery_message(Channel::Phone, "1002"),
            "Your PHONE verification code is: 1002"
        );
    }
}
