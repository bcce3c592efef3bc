// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Browser voice-call bootstrap.
//!
//! The call itself runs in the visitor's browser through the voice SDK; the
//! server only resolves the assistant for the requested agent type and hands
//! back the public key.

use std::sync::Arc;

use frontdesk_config::model::VoiceConfig;
use frontdesk_core::error::FrontdeskError;
use frontdesk_core::traits::StorageAdapter;
use frontdesk_core::types::{LeadSource, NewLead};
use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::{error, info};

use crate::forms::{VoiceCallForm, VoiceSession, VoiceVariables};
use crate::validation::{normalize_email, optional};

const LEAD_QUALIFICATION: &str = "lead-qualification";

/// `conv_<unix millis>_<9 lowercase alphanumerics>`.
pub fn conversation_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("conv_{}_{suffix}", chrono::Utc::now().timestamp_millis())
}

pub struct VoiceService {
    config: VoiceConfig,
    storage: Arc<dyn StorageAdapter>,
}

impl VoiceService {
    pub fn new(config: &VoiceConfig, storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            config: config.clone(),
            storage,
        }
    }

    pub async fn start_call(&self, form: VoiceCallForm) -> Result<VoiceSession, FrontdeskError> {
        let agent_type = optional(form.agent_type.as_deref())
            .ok_or_else(|| FrontdeskError::Validation("Agent type is required".into()))?;
        let agent_id = self.config.assistants.get(&agent_type).ok_or_else(|| {
            FrontdeskError::Validation(format!(
                "No assistant ID configured for agent type: {agent_type}"
            ))
        })?;
        let public_key = self
            .config
            .public_key
            .clone()
            .ok_or_else(|| FrontdeskError::NotConfigured("Voice calling".into()))?;

        let customer_name = optional(form.user_name.as_deref());
        if agent_type == LEAD_QUALIFICATION {
            self.record_qualification_lead(&form, customer_name.clone())
                .await;
        }

        let conversation_id = conversation_id();
        info!(agent_type = %agent_type, conversation_id = %conversation_id, "voice call started");
        Ok(VoiceSession {
            conversation_id,
            agent_id: agent_id.clone(),
            message: "Voice call initiated successfully".to_string(),
            web_rtc_enabled: true,
            public_api_key: public_key,
            variables: VoiceVariables { customer_name },
        })
    }

    async fn record_qualification_lead(&self, form: &VoiceCallForm, name: Option<String>) {
        let Ok(email) = normalize_email(form.user_email.as_deref()) else {
            return;
        };
        let lead = NewLead {
            email,
            name,
            phone: optional(form.user_phone.as_deref()),
            company: None,
            message: optional(form.prompt.as_deref()),
        };
        if let Err(e) = self
            .storage
            .insert_lead(LeadSource::LeadQualification, &lead)
            .await
        {
            error!(error = %e, "failed to save lead qualification lead");
        }
    }
}
