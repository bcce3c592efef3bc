// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead capture and voice-call endpoints.

use axum::Json;
use axum::extract::State;
use frontdesk_leads::{
    DemoForm, LeadReceipt, NewsletterForm, VoiceCallForm, VoiceSession, WaitlistCount,
    WaitlistForm,
};

use super::{Success, success};
use crate::error::{ApiError, JsonBody, failed};
use crate::server::AppState;

/// POST /waitlist
pub async fn post_waitlist(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<WaitlistForm>,
) -> Result<Json<Success<LeadReceipt>>, ApiError> {
    let receipt = state
        .leads
        .join_waitlist(form)
        .await
        .map_err(failed("Failed to process waitlist submission"))?;
    Ok(success(receipt))
}

/// POST /newsletter
pub async fn post_newsletter(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<NewsletterForm>,
) -> Result<Json<Success<LeadReceipt>>, ApiError> {
    let receipt = state
        .leads
        .subscribe_newsletter(form)
        .await
        .map_err(failed("Failed to process newsletter signup"))?;
    Ok(success(receipt))
}

/// POST /book-demo
pub async fn post_book_demo(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<DemoForm>,
) -> Result<Json<Success<LeadReceipt>>, ApiError> {
    let receipt = state
        .leads
        .book_demo(form)
        .await
        .map_err(failed("Internal server error"))?;
    Ok(success(receipt))
}

/// GET /waitlist-count
pub async fn get_waitlist_count(
    State(state): State<AppState>,
) -> Result<Json<Success<WaitlistCount>>, ApiError> {
    let count = state
        .leads
        .waitlist_count()
        .await
        .map_err(failed("Failed to load waitlist count"))?;
    Ok(success(count))
}

/// POST /start-voice-call
pub async fn post_voice_call(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<VoiceCallForm>,
) -> Result<Json<Success<VoiceSession>>, ApiError> {
    let session = state
        .voice
        .start_call(form)
        .await
        .map_err(failed("Failed to start voice call"))?;
    Ok(success(session))
}
