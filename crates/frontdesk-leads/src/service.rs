// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Waitlist, newsletter, and demo booking flows.
//!
//! Each flow validates first and has no side effects on invalid input. Lead
//! rows are best effort: a storage failure is logged and the flow goes on to
//! send its email.

use std::sync::Arc;
use std::time::Duration;

use frontdesk_config::model::FrontdeskConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::{MailerAdapter, StorageAdapter};
use frontdesk_core::types::{DemoBooking, LeadSource, NewLead, OutboundEmail, now_timestamp};
use frontdesk_email::{EmailTemplates, send_with_timeout};
use tracing::{error, info, warn};

use crate::forms::{DemoForm, LeadReceipt, NewsletterForm, WaitlistCount, WaitlistForm};
use crate::validation::{booking_token, normalize_email, optional};

pub struct LeadService {
    storage: Arc<dyn StorageAdapter>,
    mailer: Arc<dyn MailerAdapter>,
    templates: EmailTemplates,
    brand: String,
    mail_timeout: Duration,
    waitlist_base: u64,
}

impl LeadService {
    pub fn new(
        config: &FrontdeskConfig,
        storage: Arc<dyn StorageAdapter>,
        mailer: Arc<dyn MailerAdapter>,
    ) -> Self {
        Self {
            templates: EmailTemplates::from_config(&config.email, config.server.site_url()),
            brand: config.email.from_name.clone(),
            mail_timeout: Duration::from_secs(config.email.send_timeout_secs),
            waitlist_base: config.leads.waitlist_base_count,
            storage,
            mailer,
        }
    }

    /// Inserts a lead, logging instead of failing. Returns whether it was a duplicate.
    async fn record_lead(&self, source: LeadSource, lead: &NewLead) -> bool {
        match self.storage.insert_lead(source, lead).await {
            Ok(insert) => {
                info!(source = %source, duplicate = insert.duplicate, "lead recorded");
                insert.duplicate
            }
            Err(e) => {
                error!(source = %source, error = %e, "failed to save lead");
                false
            }
        }
    }

    async fn send(&self, email: OutboundEmail) -> Result<(), FrontdeskError> {
        send_with_timeout(self.mailer.as_ref(), email, self.mail_timeout).await
    }

    /// Mail failures are logged; the signup still succeeds.
    pub async fn join_waitlist(&self, form: WaitlistForm) -> Result<LeadReceipt, FrontdeskError> {
        let email = normalize_email(form.email.as_deref())?;
        let name = optional(form.name.as_deref());
        let lead = NewLead {
            email: email.clone(),
            name: name.clone(),
            phone: None,
            company: optional(form.company.as_deref()),
            message: optional(form.designation.as_deref()),
        };
        let duplicate = self.record_lead(LeadSource::Waitlist, &lead).await;

        let confirmation = self.templates.waitlist_confirmation(&email, name.as_deref());
        if let Err(e) = self.send(confirmation).await {
            warn!(error = %e, "failed to send waitlist confirmation");
        }

        Ok(LeadReceipt {
            message: format!(
                "You've successfully joined the {} waitlist! Stay tuned for updates.",
                self.brand
            ),
            duplicate,
        })
    }

    /// The welcome email is the point of the signup, so its failure is an error.
    pub async fn subscribe_newsletter(
        &self,
        form: NewsletterForm,
    ) -> Result<LeadReceipt, FrontdeskError> {
        let email = normalize_email(form.email.as_deref())?;
        let name = optional(form.name.as_deref());
        let lead = NewLead {
            email: email.clone(),
            name: name.clone(),
            ..NewLead::default()
        };
        let duplicate = self.record_lead(LeadSource::Newsletter, &lead).await;

        self.send(self.templates.newsletter_welcome(&email, name.as_deref()))
            .await?;

        Ok(LeadReceipt {
            message: "Successfully subscribed to newsletter!".to_string(),
            duplicate,
        })
    }

    /// Stores the booking, then sends the confirmation (required) and the
    /// internal notification (best effort).
    pub async fn book_demo(&self, form: DemoForm) -> Result<LeadReceipt, FrontdeskError> {
        let required = [
            &form.name,
            &form.email,
            &form.phone,
            &form.booking_date,
            &form.booking_time,
        ];
        if required.iter().any(|f| optional(f.as_deref()).is_none()) {
            return Err(FrontdeskError::Validation("Missing required fields".into()));
        }
        let email = normalize_email(form.email.as_deref())?;
        let trimmed = |v: &Option<String>| optional(v.as_deref()).unwrap_or_default();

        let booking = DemoBooking {
            token: booking_token(),
            name: trimmed(&form.name),
            email: email.clone(),
            phone: trimmed(&form.phone),
            booking_date: trimmed(&form.booking_date),
            booking_time: trimmed(&form.booking_time),
            company: optional(form.company.as_deref()),
            company_size: optional(form.company_size.as_deref()),
            agent_of_interest: optional(form.agent_of_interest.as_deref()),
            message: optional(form.message.as_deref()),
            created_at: now_timestamp(),
        };
        self.storage.save_demo_booking(&booking).await?;

        let lead = NewLead {
            email,
            name: Some(booking.name.clone()),
            phone: Some(booking.phone.clone()),
            company: booking.company.clone(),
            message: booking.message.clone(),
        };
        let duplicate = self.record_lead(LeadSource::BookMeeting, &lead).await;

        self.send(self.templates.demo_confirmation(&booking)).await?;
        info!(date = %booking.booking_date, time = %booking.booking_time, "demo booked");

        if let Err(e) = self.send(self.templates.demo_admin_notification(&booking)).await {
            warn!(error = %e, "failed to send demo booking notification");
        }

        Ok(LeadReceipt {
            message: "Demo booked successfully".to_string(),
            duplicate,
        })
    }

    pub async fn waitlist_count(&self) -> Result<WaitlistCount, FrontdeskError> {
        let count = self.storage.count_leads(LeadSource::Waitlist).await?;
        Ok(WaitlistCount {
            count,
            base: self.waitlist_base,
            display_count: self.waitlist_base + count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_test_utils::TestHarness;

    fn service(h: &TestHarness) -> LeadService {
        LeadService::new(&h.config, h.storage.clone(), h.mailer.clone())
    }

    fn waitlist(email: &str) -> WaitlistForm {
        WaitlistForm {
            email: Some(email.into()),
            name: Some("Ada Lovelace".into()),
            company: Some("Engines".into()),
            designation: Some("CTO".into()),
        }
    }

    fn demo() -> DemoForm {
        DemoForm {
            name: Some("Ada Lovelace".into()),
            email: Some("Ada@Example.com".into()),
            phone: Some("+1 555 0100".into()),
            booking_date: Some("2026-03-10".into()),
            booking_time: Some("14:00".into()),
            company: Some("Engines".into()),
            ..DemoForm::default()
        }
    }

    #[tokio::test]
    async fn waitlist_dedupes_and_counts() {
        let h = TestHarness::new().await.unwrap();
        let leads = service(&h);

        let first = leads.join_waitlist(waitlist("ada@example.com")).await.unwrap();
        assert!(!first.duplicate);
        assert!(first.message.contains("Lagentry waitlist"));
        let second = leads.join_waitlist(waitlist(" ADA@example.com ")).await.unwrap();
        assert!(second.duplicate);

        let count = leads.waitlist_count().await.unwrap();
        assert_eq!(count.count, 1);
        assert_eq!(count.base, 5784);
        assert_eq!(count.display_count, 5785);
        assert_eq!(h.mailer.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn malformed_email_has_no_side_effects() {
        let h = TestHarness::new().await.unwrap();
        let leads = service(&h);

        let err = leads.join_waitlist(waitlist("not-an-email")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format");
        let err = leads
            .subscribe_newsletter(NewsletterForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
        let mut form = demo();
        form.email = Some("ada@".into());
        assert!(leads.book_demo(form).await.is_err());

        assert_eq!(leads.waitlist_count().await.unwrap().count, 0);
        assert!(h.mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn waitlist_survives_mail_failure() {
        let h = TestHarness::builder().with_failing_mail().build().await.unwrap();
        let receipt = service(&h).join_waitlist(waitlist("ada@example.com")).await.unwrap();
        assert!(!receipt.duplicate);
    }

    #[tokio::test]
    async fn newsletter_mail_failure_is_an_error() {
        let h = TestHarness::builder().with_failing_mail().build().await.unwrap();
        let form = NewsletterForm {
            email: Some("sub@example.com".into()),
            name: None,
        };
        let err = service(&h).subscribe_newsletter(form).await.unwrap_err();
        assert!(matches!(err, FrontdeskError::Mail { .. }));
    }

    #[tokio::test]
    async fn newsletter_sends_welcome() {
        let h = TestHarness::new().await.unwrap();
        let form = NewsletterForm {
            email: Some("sub@example.com".into()),
            name: Some("Grace Hopper".into()),
        };
        let receipt = service(&h).subscribe_newsletter(form).await.unwrap();
        assert_eq!(receipt.message, "Successfully subscribed to newsletter!");
        let sent = h.mailer.sent().await;
        assert_eq!(sent[0].subject, "Welcome to Lagentry");
        assert!(sent[0].html.contains("Hi Grace,"));
    }

    #[tokio::test]
    async fn demo_booking_sends_invite_and_notification() {
        let h = TestHarness::new().await.unwrap();
        let receipt = service(&h).book_demo(demo()).await.unwrap();
        assert_eq!(receipt.message, "Demo booked successfully");

        let sent = h.mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "ada@example.com");
        assert!(sent[0].calendar.as_deref().unwrap().contains("DTSTART:20260310T140000Z"));
        assert!(sent[0].html.contains("/reschedule?token="));
        assert_eq!(sent[1].to, "info@lagentry.com");
    }

    #[tokio::test]
    async fn demo_requires_all_fields() {
        let h = TestHarness::new().await.unwrap();
        let mut form = demo();
        form.booking_time = Some("  ".into());
        let err = service(&h).book_demo(form).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields");
        assert!(h.mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn demo_confirmation_failure_is_an_error() {
        let h = TestHarness::builder().with_failing_mail().build().await.unwrap();
        let err = service(&h).book_demo(demo()).await.unwrap_err();
        assert!(matches!(err, FrontdeskError::Mail { .. }));
    }
}
