// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock mailer, payment, and catalog adapters that record their calls.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use frontdesk_core::FrontdeskError;
use frontdesk_core::traits::{CatalogAdapter, MailerAdapter, PaymentAdapter, PluginAdapter};
use frontdesk_core::types::{
    AdapterType, CheckoutRequest, CheckoutSession, HealthStatus, IntegrationApp,
    IntegrationQuery, IntegrationResults, OutboundEmail,
};

macro_rules! mock_plugin {
    ($ty:ty, $name:literal, $kind:expr) => {
        #[async_trait]
        impl PluginAdapter for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn version(&self) -> semver::Version {
                semver::Version::new(0, 1, 0)
            }

            fn adapter_type(&self) -> AdapterType {
                $kind
            }

            async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
                Ok(HealthStatus::Healthy)
            }

            async fn shutdown(&self) -> Result<(), FrontdeskError> {
                Ok(())
            }
        }
    };
}

/// Records outgoing mail instead of sending it.
pub struct MockMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    failing: AtomicBool,
    company_email: String,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            company_email: "info@lagentry.com".to_string(),
        }
    }

    /// Makes every subsequent send fail (and record nothing) while `true`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

mock_plugin!(MockMailer, "mock-mailer", AdapterType::Mailer);

#[async_trait]
impl MailerAdapter for MockMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), FrontdeskError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(FrontdeskError::Mail {
                message: "mock SMTP rejected the message".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(email);
        Ok(())
    }

    fn company_address(&self) -> &str {
        &self.company_email
    }
}

/// Returns predictable checkout sessions and records requests.
pub struct MockPayments {
    requests: Mutex<Vec<CheckoutRequest>>,
    configured: bool,
}

impl MockPayments {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            configured: true,
        }
    }

    /// A payment adapter without credentials.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub async fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockPayments {
    fn default() -> Self {
        Self::new()
    }
}

mock_plugin!(MockPayments, "mock-payments", AdapterType::Payment);

#[async_trait]
impl PaymentAdapter for MockPayments {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, FrontdeskError> {
        if !self.configured {
            return Err(FrontdeskError::NotConfigured("Payment processing".into()));
        }
        let mut requests = self.requests.lock().await;
        requests.push(request);
        let id = format!("cs_test_{}", requests.len());
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.stripe.test/{id}")),
            id,
        })
    }
}

/// Serves a fixed app list, filtered the way the real catalog filters.
pub struct MockCatalog {
    apps: Vec<IntegrationApp>,
    calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new(apps: Vec<IntegrationApp>) -> Self {
        Self {
            apps,
            calls: AtomicUsize::new(0),
        }
    }

    /// A catalog with a handful of well-known apps.
    pub fn with_sample_apps() -> Self {
        let app = |id: &str, name: &str, category: &str| IntegrationApp {
            app_id: id.to_string(),
            app_name: name.to_string(),
            description: format!("{name} integration"),
            logo_url: format!("https://logos.test/{id}.png"),
            categories: vec![category.to_string()],
            auth_type: Some("oauth".to_string()),
        };
        Self::new(vec![
            app("slack", "Slack", "communication"),
            app("gmail", "Gmail", "email"),
            app("hubspot", "HubSpot", "crm"),
        ])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

mock_plugin!(MockCatalog, "mock-catalog", AdapterType::Catalog);

#[async_trait]
impl CatalogAdapter for MockCatalog {
    async fn search(&self, query: IntegrationQuery) -> Result<IntegrationResults, FrontdeskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let apps = self
            .apps
            .iter()
            .filter(|app| {
                query.query.is_empty()
                    || app.app_name.to_lowercase().contains(&query.query)
                    || app.categories.iter().any(|c| c.contains(&query.query))
            })
            .take(query.limit)
            .cloned()
            .collect();
        Ok(IntegrationResults {
            apps,
            from_cache: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            from_name: "Test".into(),
            to: "a@example.com".into(),
            subject: "s".into(),
            html: "<p>h</p>".into(),
            calendar: None,
        }
    }

    #[tokio::test]
    async fn mailer_records_and_fails_on_demand() {
        let mailer = MockMailer::new();
        mailer.send(email()).await.unwrap();
        mailer.set_failing(true);
        assert!(mailer.send(email()).await.is_err());
        assert_eq!(mailer.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn catalog_filters_by_query() {
        let catalog = MockCatalog::with_sample_apps();
        let results = catalog
            .search(IntegrationQuery {
                query: "crm".into(),
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(results.apps.len(), 1);
        assert_eq!(results.apps[0].app_id, "hubspot");
        assert_eq!(catalog.calls(), 1);
    }
}
