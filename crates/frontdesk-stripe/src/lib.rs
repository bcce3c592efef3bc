// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stripe Checkout for subscription plans.
//!
//! [`StripePayments`] implements [`PaymentAdapter`]; [`checkout_request`]
//! resolves a plan and billing period to a configured price.

pub mod client;

use std::collections::BTreeMap;

use async_trait::async_trait;
use frontdesk_config::model::StripeConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::{PaymentAdapter, PluginAdapter};
use frontdesk_core::types::{AdapterType, CheckoutRequest, CheckoutSession, HealthStatus};
use tracing::{debug, info, warn};

use crate::client::StripeClient;

/// Key into `stripe.prices` for a plan and billing period.
pub fn price_key(plan_id: &str, is_yearly: bool) -> String {
    format!(
        "{plan_id}-{}",
        if is_yearly { "yearly" } else { "monthly" }
    )
}

/// Builds a checkout request for `plan_id`, redirecting back to `base_url`.
pub fn checkout_request(
    prices: &BTreeMap<String, String>,
    plan_id: &str,
    is_yearly: bool,
    customer_email: Option<&str>,
    base_url: &str,
) -> Result<CheckoutRequest, FrontdeskError> {
    let plan_id = plan_id.trim();
    if plan_id.is_empty() {
        return Err(FrontdeskError::Validation("Plan ID is required".into()));
    }
    let price_id = prices
        .get(&price_key(plan_id, is_yearly))
        .ok_or_else(|| FrontdeskError::Validation(format!("Invalid plan: {plan_id}")))?;
    let base = base_url.trim_end_matches('/');

    Ok(CheckoutRequest {
        price_id: price_id.clone(),
        plan_id: plan_id.to_string(),
        is_yearly,
        customer_email: customer_email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string),
        success_url: format!("{base}/checkout-success?session_id={{CHECKOUT_SESSION_ID}}"),
        cancel_url: format!("{base}/pricing"),
    })
}

pub struct StripePayments {
    client: Option<StripeClient>,
}

impl StripePayments {
    pub fn new(config: &StripeConfig) -> Result<Self, FrontdeskError> {
        let client = match config.secret_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(StripeClient::new(key, &config.base_url)?),
            None => {
                warn!("stripe.secret_key is not set; checkout is disabled");
                None
            }
        };
        info!(configured = client.is_some(), prices = config.prices.len(), "Stripe adapter initialized");
        Ok(Self { client })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl PluginAdapter for StripePayments {
    fn name(&self) -> &str {
        "stripe"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Payment
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        Ok(if self.is_configured() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded("secret key not configured".into())
        })
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        debug!("Stripe adapter shutting down");
        Ok(())
    }
}

#[async_trait]
impl PaymentAdapter for StripePayments {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, FrontdeskError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| FrontdeskError::NotConfigured("Payment processing".into()))?;
        let session = client.create_checkout_session(&request).await?;
        info!(session_id = %session.id, plan = %request.plan_id, "checkout session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> BTreeMap<String, String> {
        StripeConfig::default().prices
    }

    #[test]
    fn resolves_price_by_period() {
        let req = checkout_request(&prices(), "hobby-20", false, None, "https://x.test/").unwrap();
        assert_eq!(req.price_id, "price_hobby_monthly");
        assert_eq!(
            req.success_url,
            "https://x.test/checkout-success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(req.cancel_url, "https://x.test/pricing");

        let yearly = checkout_request(&prices(), "hobby-20", true, Some(" a@b.co "), "https://x.test")
            .unwrap();
        assert_eq!(yearly.price_id, "price_hobby_yearly");
        assert_eq!(yearly.customer_email.as_deref(), Some("a@b.co"));
    }

    #[test]
    fn rejects_missing_and_unknown_plans() {
        let err = checkout_request(&prices(), "  ", false, None, "https://x.test").unwrap_err();
        assert_eq!(err.to_string(), "Plan ID is required");

        let err = checkout_request(&prices(), "enterprise", false, None, "https://x.test")
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid plan: enterprise");
    }

    #[tokio::test]
    async fn unconfigured_adapter_refuses_checkout() {
        let payments = StripePayments::new(&StripeConfig::default()).unwrap();
        assert!(!payments.is_configured());
        let req = checkout_request(&prices(), "growth-100", true, None, "https://x.test").unwrap();
        let err = payments.create_checkout_session(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Payment processing is not configured");
    }
}
