use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{
    Astrologer, AstrologerEnvelope, Booking, BookingEnvelope, CallRequest, CallRequestEnvelope,
    Expertise,
};
use crate::services::profile::{self, AstrologerForm};
use crate::services::transitions::{BookingTransition, CallTransition};

use super::{
    classify_booking_update, classify_call_update, classify_profile_submit, BookingApi,
    BOOKING_UPDATE_FAILED, CALL_UPDATE_FAILED, PROFILE_UPDATE_FAILED, REGISTER_FAILED,
};

pub struct AstrobartaClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AstrobartaClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> anyhow::Result<T> {
        let resp = self
            .client
            .get(self.url(endpoint))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("request to {endpoint} failed"))?
            .error_for_status()
            .with_context(|| format!("{endpoint} returned an error status"))?;

        resp.json()
            .await
            .with_context(|| format!("failed to parse {endpoint} response"))
    }

    /// POST a JSON payload and hand the parsed body to a per-endpoint
    /// classifier. Transport and parse failures surface as the generic
    /// `operation_failed` message; the real cause goes to the log.
    async fn post_classified<R>(
        &self,
        endpoint: &str,
        payload: &Value,
        operation_failed: &str,
        classify: impl FnOnce(&Value) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .query(&[("api_key", self.api_key.as_str())])
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint, "mutation request failed");
                AppError::Transport(operation_failed.to_string())
            })?;

        let body: Value = resp.json().await.map_err(|e| {
            tracing::error!(error = %e, endpoint, "mutation response was not JSON");
            AppError::Transport(operation_failed.to_string())
        })?;

        classify(&body)
    }

    async fn post_profile(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
        operation_failed: &str,
    ) -> Result<(), AppError> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .query(&[("api_key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint, "profile request failed");
                AppError::Transport(operation_failed.to_string())
            })?;

        let status = resp.status();
        let body: Value = resp.json().await.map_err(|e| {
            tracing::error!(error = %e, endpoint, "profile response was not JSON");
            AppError::Transport(operation_failed.to_string())
        })?;

        classify_profile_submit(status, &body)
    }
}

#[async_trait]
impl BookingApi for AstrobartaClient {
    async fn fetch_astrologers(&self) -> Vec<Astrologer> {
        match self.get_json::<AstrologerEnvelope>("get_astrologer.php").await {
            Ok(envelope) => envelope.data,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch astrologers");
                Vec::new()
            }
        }
    }

    async fn fetch_expertise(&self) -> Vec<Expertise> {
        match self.get_json::<Vec<Expertise>>("expertise.php").await {
            Ok(list) => list,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch expertise list");
                Vec::new()
            }
        }
    }

    async fn fetch_bookings(&self) -> Vec<Booking> {
        match self.get_json::<BookingEnvelope>("get_booking.php").await {
            Ok(envelope) => envelope.bookings,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch bookings");
                Vec::new()
            }
        }
    }

    async fn fetch_call_requests(&self) -> Vec<CallRequest> {
        match self
            .get_json::<CallRequestEnvelope>("api_get_call_request.php")
            .await
        {
            Ok(envelope) => envelope.data,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch call requests");
                Vec::new()
            }
        }
    }

    async fn update_booking_status(
        &self,
        transition: &BookingTransition,
    ) -> Result<String, AppError> {
        self.post_classified(
            "update_booking.php",
            &transition.payload(),
            BOOKING_UPDATE_FAILED,
            classify_booking_update,
        )
        .await
    }

    async fn update_call_request_status(
        &self,
        transition: &CallTransition,
    ) -> Result<String, AppError> {
        self.post_classified(
            "update_call_request.php",
            &transition.payload(),
            CALL_UPDATE_FAILED,
            classify_call_update,
        )
        .await
    }

    async fn register_astrologer(
        &self,
        form: &AstrologerForm,
        register_date: NaiveDate,
    ) -> Result<(), AppError> {
        self.post_profile(
            "register_astrologer.php",
            profile::registration_form(form, register_date),
            REGISTER_FAILED,
        )
        .await
    }

    async fn update_astrologer(&self, id: i64, form: &AstrologerForm) -> Result<(), AppError> {
        self.post_profile(
            "update_profile_astrologer.php",
            profile::update_form(form, id),
            PROFILE_UPDATE_FAILED,
        )
        .await
    }
}
