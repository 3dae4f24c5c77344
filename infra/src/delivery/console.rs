//! Console code delivery
//!
//! Prints each code to stdout instead of sending it, and keeps a record of
//! what was delivered for inspection.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use oh_core::domain::entities::Channel;
use oh_core::services::verification::CodeDeliveryTrait;
use oh_shared::utils::mask::{mask_email, mask_phone_number};

use super::delivery_message;

/// A code handed to the console delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredCode {
    pub delivery_id: String,
    pub channel: Channel,
    pub contact: String,
    pub code: String,
    pub delivered_at: DateTime<Utc>,
}

/// Development stand-in for email and SMS gateways
#[derive(Clone)]
pub struct ConsoleCodeDelivery {
    /// Counter for tracking number of codes delivered
    delivery_count: Arc<AtomicU64>,
    delivered: Arc<Mutex<Vec<DeliveredCode>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print codes to stdout
    console_output: bool,
}

impl ConsoleCodeDelivery {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a delivery with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            delivery_count: Arc::new(AtomicU64::new(0)),
            delivered: Arc::new(Mutex::new(Vec::new())),
            simulate_failure,
            console_output,
        }
    }

    /// Total number of codes delivered
    pub fn delivery_count(&self) -> u64 {
        self.delivery_count.load(Ordering::SeqCst)
    }

    /// Snapshot of everything delivered so far
    pub fn delivered(&self) -> Vec<DeliveredCode> {
        self.delivered
            .lock()
            .map(|delivered| delivered.clone())
            .unwrap_or_default()
    }

    /// Most recent code delivered for a channel
    pub fn last_code(&self, channel: Channel) -> Option<String> {
        self.delivered()
            .into_iter()
            .rev()
            .find(|delivered| delivered.channel == channel)
            .map(|delivered| delivered.code)
    }

    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for ConsoleCodeDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeDeliveryTrait for ConsoleCodeDelivery {
    fn deliver_code(&self, channel: Channel, contact: &str, code: &str) -> Result<String, String> {
        let masked = match channel {
            Channel::Email => mask_email(contact),
            Channel::Phone => mask_phone_number(contact),
        };

        if self.simulate_failure {
            warn!(
                target: "code_delivery",
                channel = %channel,
                contact = %masked,
                "Console delivery simulating failure"
            );
            return Err(format!("Simulated {} delivery failure", channel));
        }

        let mut delivered = self
            .delivered
            .lock()
            .map_err(|_| "Delivery log poisoned".to_string())?;

        let delivery_id = format!("console_{}", Uuid::new_v4());
        let count = self.delivery_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("[{} #{}] {}", channel.label(), count, delivery_message(channel, code));
        }

        // The code itself only reaches debug-level logs
        tracing::debug!(target: "code_delivery", channel = %channel, code = code, "Code content");
        info!(
            target: "code_delivery",
            provider = "console",
            channel = %channel,
            contact = %masked,
            delivery_id = %delivery_id,
            "Verification code delivered (console)"
        );

        delivered.push(DeliveredCode {
            delivery_id: delivery_id.clone(),
            channel,
            contact: contact.to_string(),
            code: code.to_string(),
            delivered_at: Utc::now(),
        });

        Ok(delivery_id)
    }
}
