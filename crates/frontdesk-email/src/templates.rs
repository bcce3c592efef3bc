// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML bodies for every email the site sends.
//!
//! User-facing mail shares one table-based layout with inline styles, which
//! renders consistently across mail clients. Internal notifications are
//! plain lists of fields.

use chrono::Utc;
use frontdesk_config::model::EmailConfig;
use frontdesk_core::types::{DemoBooking, OutboundEmail};

use crate::ics::{Invite, render_invite};

const WAITLIST_ACCENT: &str = "#F97316";
const NEWSLETTER_ACCENT: &str = "#A855F7";

/// Escapes text for interpolation into HTML element content or attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First word of a display name, or "there" for a bare greeting.
pub fn first_name(name: Option<&str>) -> String {
    name.and_then(|n| n.split_whitespace().next())
        .unwrap_or("there")
        .to_string()
}

struct Cta<'a> {
    label: &'a str,
    url: String,
}

struct Layout<'a> {
    preheader: &'a str,
    eyebrow: &'a str,
    title: &'a str,
    greeting: String,
    highlight: &'a str,
    body_html: String,
    primary: Cta<'a>,
    secondary: Cta<'a>,
    footer_note: &'a str,
    accent: &'a str,
}

/// Renders outbound mail for one brand.
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    brand: String,
    site_url: String,
    sender_email: String,
    company_email: String,
}

impl EmailTemplates {
    pub fn new(
        brand: impl Into<String>,
        site_url: &str,
        sender_email: impl Into<String>,
        company_email: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            site_url: site_url.trim_end_matches('/').to_string(),
            sender_email: sender_email.into(),
            company_email: company_email.into(),
        }
    }

    /// Templates for the configured brand and sender.
    pub fn from_config(config: &EmailConfig, site_url: &str) -> Self {
        let sender = config
            .username
            .as_deref()
            .filter(|u| u.contains('@'))
            .unwrap_or(&config.company_email)
            .to_string();
        Self::new(&config.from_name, site_url, sender, &config.company_email)
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    fn notifications_from(&self) -> String {
        format!("{} Notifications", self.brand)
    }

    pub fn waitlist_confirmation(&self, email: &str, name: Option<&str>) -> OutboundEmail {
        let brand = escape_html(&self.brand);
        let body_html = format!(
            "<p style=\"margin:0 0 10px 0;\">You're in. Thanks for raising your hand early.</p>\
             <p style=\"margin:0 0 10px 0;\">We're building <strong>real AI employees</strong>: agents that work inside real teams, qualifying leads, answering support, and moving revenue.</p>\
             <p style=\"margin:0 0 10px 0;\">From here you'll get early product previews, first access when the private beta opens, and practical examples of how other operators use {brand}.</p>\
             <p style=\"margin:0 0 10px 0;\">If you want to share what you're hoping to automate, just hit reply.</p>\
             <p style=\"margin:0;\">Glad you're here.</p>"
        );
        let title = format!("You're officially on the {} waitlist", self.brand);
        let primary_label = format!("View what {} can do", self.brand);
        let html = self.render_layout(&Layout {
            preheader: &format!("You're officially on the {} waitlist.", self.brand),
            eyebrow: "WAITLIST CONFIRMED",
            title: &title,
            greeting: format!("Hi {},", escape_html(&first_name(name))),
            highlight: "Early access to AI employees just unlocked.",
            body_html,
            primary: Cta {
                label: &primary_label,
                url: format!("{}/#how-it-works", self.site_url),
            },
            secondary: Cta {
                label: "Book a live demo",
                url: format!("{}/book-demo", self.site_url),
            },
            footer_note: "No spam. Just sharp, operator-level updates on what's working with AI.",
            accent: WAITLIST_ACCENT,
        });

        OutboundEmail {
            from_name: self.brand.clone(),
            to: email.to_string(),
            subject: format!("You're on the {} Waitlist", self.brand),
            html,
            calendar: None,
        }
    }

    pub fn newsletter_welcome(&self, email: &str, name: Option<&str>) -> OutboundEmail {
        let brand = escape_html(&self.brand);
        let body_html = format!(
            "<p style=\"margin:0 0 10px 0;\">Thanks for subscribing to the {brand} newsletter.</p>\
             <p style=\"margin:0 0 10px 0;\">Expect short, practical notes on deploying AI employees: what shipped, what worked for real teams, and what we learned along the way.</p>\
             <p style=\"margin:0;\">Reply any time with questions or ideas for what we should cover.</p>"
        );
        let title = format!("Welcome to {}", self.brand);
        let html = self.render_layout(&Layout {
            preheader: &format!("Welcome to the {} newsletter.", self.brand),
            eyebrow: "NEWSLETTER",
            title: &title,
            greeting: format!("Hi {},", escape_html(&first_name(name))),
            highlight: "Operator-level updates on AI employees, straight to your inbox.",
            body_html,
            primary: Cta {
                label: "Read the latest updates",
                url: format!("{}/#updates", self.site_url),
            },
            secondary: Cta {
                label: "Book a live demo",
                url: format!("{}/book-demo", self.site_url),
            },
            footer_note: "You're receiving this because you subscribed on our website.",
            accent: NEWSLETTER_ACCENT,
        });

        OutboundEmail {
            from_name: self.brand.clone(),
            to: email.to_string(),
            subject: format!("Welcome to {}", self.brand),
            html,
            calendar: None,
        }
    }

    /// Confirmation with manage links and, when the slot parses, a calendar invite.
    pub fn demo_confirmation(&self, booking: &DemoBooking) -> OutboundEmail {
        let reschedule = format!("{}/reschedule?token={}", self.site_url, booking.token);
        let cancel = format!("{}/cancel?token={}", self.site_url, booking.token);
        let brand = escape_html(&self.brand);

        let html = format!(
            "<div style=\"font-family: Arial, sans-serif; line-height: 1.6;\">\
             <p>Hi {first},</p>\
             <p><strong>Your {brand} demo is successfully confirmed.</strong></p>\
             <p>During the session we will walk you through how {brand} AI agents operate in real production environments.</p>\
             <p>You will find the session added to your calendar via the attached invite.</p>\
             <p>You may manage your booking any time here:<br/>\
             <a href=\"{reschedule}\">Reschedule Demo</a> | <a href=\"{cancel}\">Cancel Demo</a></p>\
             <p>We look forward to speaking with you.</p>\
             <p>Warm regards,<br/><strong>Zoya</strong><br/>Founder &amp; CEO<br/>{brand}</p>\
             </div>",
            first = escape_html(&first_name(Some(&booking.name))),
            reschedule = escape_html(&reschedule),
            cancel = escape_html(&cancel),
        );

        let uid = format!("{}@frontdesk", booking.token);
        let summary = format!("{} Demo Session", self.brand);
        let description = format!("Your {} demo is confirmed.", self.brand);
        let calendar = render_invite(
            &Invite {
                uid: &uid,
                organizer_name: &self.brand,
                organizer_email: &self.sender_email,
                attendee_name: &booking.name,
                attendee_email: &booking.email,
                date: &booking.booking_date,
                time: &booking.booking_time,
                summary: &summary,
                description: &description,
            },
            Utc::now(),
        );

        OutboundEmail {
            from_name: self.brand.clone(),
            to: booking.email.clone(),
            subject: format!("Your {} Demo is Confirmed", self.brand),
            html,
            calendar,
        }
    }

    pub fn demo_admin_notification(&self, booking: &DemoBooking) -> OutboundEmail {
        let mut rows = vec![
            ("Name", booking.name.as_str()),
            ("Email", booking.email.as_str()),
            ("Phone", booking.phone.as_str()),
            ("Date", booking.booking_date.as_str()),
            ("Time", booking.booking_time.as_str()),
        ];
        for (label, value) in [
            ("Company", &booking.company),
            ("Company size", &booking.company_size),
            ("Agent of interest", &booking.agent_of_interest),
            ("Message", &booking.message),
        ] {
            if let Some(v) = value.as_deref() {
                rows.push((label, v));
            }
        }
        rows.push(("Source", "Website Booking Form"));

        OutboundEmail {
            from_name: self.notifications_from(),
            to: self.company_email.clone(),
            subject: format!("New Demo Booking – {}", booking.name),
            html: notification_html("New Demo Booking", &rows),
            calendar: None,
        }
    }

    /// Alert for the first message of a new website chat.
    pub fn chat_notification(
        &self,
        conversation_id: &str,
        user_message: &str,
        timestamp: &str,
    ) -> OutboundEmail {
        let admin_link = format!("{}/admin/chats?conversation={}", self.site_url, conversation_id);
        let mut html = notification_html(
            "New Website Chat",
            &[
                ("Conversation", conversation_id),
                ("Started", timestamp),
                ("First message", user_message),
            ],
        );
        html.push_str(&format!(
            "<p><a href=\"{}\">Open in the admin panel</a></p>",
            escape_html(&admin_link)
        ));

        OutboundEmail {
            from_name: self.notifications_from(),
            to: self.company_email.clone(),
            subject: format!("New Chat Conversation – {conversation_id}"),
            html,
            calendar: None,
        }
    }

    fn render_layout(&self, layout: &Layout<'_>) -> String {
        let brand = escape_html(&self.brand);
        let year = Utc::now().format("%Y");
        format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title></head>
<body style="margin:0;padding:0;background:#0B0B12;">
<span style="display:none;max-height:0;overflow:hidden;">{preheader}</span>
<table role="presentation" width="100%" cellpadding="0" cellspacing="0" style="background:#0B0B12;padding:32px 0;">
<tr><td align="center">
<table role="presentation" width="600" cellpadding="0" cellspacing="0" style="max-width:600px;width:100%;background:#13131F;border-radius:16px;font-family:Arial,Helvetica,sans-serif;color:#E5E7EB;">
<tr><td style="padding:32px 32px 0 32px;">
<div style="font-size:12px;letter-spacing:2px;font-weight:bold;color:{accent};">{eyebrow}</div>
<h1 style="margin:12px 0 0 0;font-size:24px;line-height:1.3;color:#FFFFFF;">{title}</h1>
</td></tr>
<tr><td style="padding:24px 32px 0 32px;font-size:15px;line-height:1.6;">
<p style="margin:0 0 12px 0;">{greeting}</p>
<p style="margin:0 0 16px 0;padding:12px 16px;border-left:3px solid {accent};background:#1C1C2B;color:#FFFFFF;">{highlight}</p>
{body}
</td></tr>
<tr><td style="padding:24px 32px;">
<a href="{primary_url}" style="display:inline-block;padding:12px 20px;border-radius:8px;background:{accent};color:#FFFFFF;text-decoration:none;font-weight:bold;">{primary_label}</a>
<a href="{secondary_url}" style="display:inline-block;margin-left:12px;padding:12px 20px;border-radius:8px;border:1px solid {accent};color:{accent};text-decoration:none;">{secondary_label}</a>
</td></tr>
<tr><td style="padding:0 32px 32px 32px;font-size:12px;color:#9CA3AF;">
<p style="margin:0 0 6px 0;">{footer}</p>
<p style="margin:0;">&copy; {year} {brand}</p>
</td></tr>
</table>
</td></tr>
</table>
</body>
</html>"#,
            title = escape_html(layout.title),
            preheader = escape_html(layout.preheader),
            accent = layout.accent,
            eyebrow = escape_html(layout.eyebrow),
            greeting = layout.greeting,
            highlight = escape_html(layout.highlight),
            body = layout.body_html,
            primary_url = escape_html(&layout.primary.url),
            primary_label = escape_html(layout.primary.label),
            secondary_url = escape_html(&layout.secondary.url),
            secondary_label = escape_html(layout.secondary.label),
            footer = escape_html(layout.footer_note),
        )
    }
}

fn notification_html(heading: &str, rows: &[(&str, &str)]) -> String {
    let mut html = format!(
        "<div style=\"font-family: Arial, sans-serif;\"><h3>{}</h3>",
        escape_html(heading)
    );
    for (label, value) in rows {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>",
            escape_html(label),
            escape_html(value)
        ));
    }
    html.push_str("</div>");
    html
}
