//! Reservation list synchronization.
//!
//! Reservation statuses are a backend-provided list (unlike the fixed
//! maintenance table), fetched concurrently with the reservations and
//! rebuilt on every fetch.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{parse_record_id, placeholder_id, validate_range};
use crate::api::{payload, ApiClient};
use crate::error::ApiError;
use crate::models::Reservation;
use crate::normalize::normalize_reservation;
use crate::refs::ReferenceMap;
use crate::sync::cache::ListCache;

const LIST_PATH: &str = "/api/Reservation/GetAllReservationsFront";
const STATUS_PATH: &str = "/api/Reservation/GetAllStatusReservation";
const CREATE_PATH: &str = "/api/Reservation/CreateReservation";
const UPDATE_PATH: &str = "/api/Reservation/UpdateReservation";
const DELETE_PATH: &str = "/api/Reservation/DeleteReservationById";

const STATUS_ID_KEYS: &[&str] = &["id", "idStatus", "statusId"];
const STATUS_LABEL_KEYS: &[&str] = &["name", "nombre", "status", "estado"];

/// Mutation payload for a reservation.
#[derive(Debug, Clone, Default)]
pub struct ReservationInput {
    pub facility_id: i64,
    pub user_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub status_id: Option<i64>,
}

impl ReservationInput {
    fn payload(&self) -> Value {
        let mut body = json!({
            "facilityId": self.facility_id,
            "userId": self.user_id,
            "startTime": self.start_time,
            "endTime": self.end_time,
        });
        if let Some(status_id) = self.status_id {
            body["statusId"] = json!(status_id);
        }
        body
    }
}

#[derive(Debug)]
pub struct SyncReservationRepository {
    client: Arc<ApiClient>,
    cache: ListCache<Reservation>,
}

impl SyncReservationRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: ListCache::new(),
        }
    }

    pub async fn list(&self) -> Vec<Reservation> {
        let client = Arc::clone(&self.client);
        let result = self
            .cache
            .get_or_fetch(async move {
                if !client.is_configured() {
                    return Ok(Vec::new());
                }
                let (body, statuses) =
                    futures::join!(client.get_json(LIST_PATH), Self::fetch_statuses(&client));
                let body = body?;
                Ok(payload::collection(body)
                    .iter()
                    .map(|raw| normalize_reservation(raw, &statuses))
                    .collect())
            })
            .await;
        match result {
            Ok(reservations) => reservations,
            Err(e) => {
                warn!("reservation list fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn refresh(&self) -> Vec<Reservation> {
        self.cache.invalidate();
        self.list().await
    }

    pub async fn create(&self, input: &ReservationInput) -> Result<Reservation, ApiError> {
        validate_range(&input.start_time, &input.end_time, "startTime", "endTime")?;

        let body = input.payload();
        let (raw, statuses) = if self.client.is_configured() {
            let response = self.client.post_json(CREATE_PATH, &body).await?;
            let statuses = Self::fetch_statuses(&self.client).await;
            (payload::merge_fallback(response, &body), statuses)
        } else {
            let mut local = body.clone();
            local["id"] = json!(placeholder_id());
            (local, ReferenceMap::new())
        };
        let reservation = normalize_reservation(&raw, &statuses);
        self.cache.insert(reservation.clone());
        Ok(reservation)
    }

    pub async fn update(&self, id: &str, input: &ReservationInput) -> Result<Reservation, ApiError> {
        let record_id = parse_record_id(id)?;
        validate_range(&input.start_time, &input.end_time, "startTime", "endTime")?;

        let mut body = input.payload();
        body["id"] = json!(record_id);

        let (raw, statuses) = if self.client.is_configured() {
            let response = self.client.post_json(UPDATE_PATH, &body).await?;
            let statuses = Self::fetch_statuses(&self.client).await;
            (payload::merge_fallback(response, &body), statuses)
        } else {
            (body.clone(), ReferenceMap::new())
        };
        let reservation = normalize_reservation(&raw, &statuses);
        self.cache
            .replace_where(|entry| entry.id == reservation.id, reservation.clone());
        Ok(reservation)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let record_id = parse_record_id(id)?;
        if self.client.is_configured() {
            self.client
                .delete_json(&format!("{}?id={}", DELETE_PATH, record_id))
                .await?;
        }
        self.cache.remove_where(|entry| entry.id == record_id);
        Ok(())
    }

    /// The status list is auxiliary: a failed fetch degrades to an empty
    /// map and labels fall back to whatever the records carry.
    async fn fetch_statuses(client: &ApiClient) -> ReferenceMap {
        match client.get_json(STATUS_PATH).await {
            Ok(body) => ReferenceMap::from_values(
                &payload::collection(body),
                STATUS_ID_KEYS,
                STATUS_LABEL_KEYS,
            ),
            Err(e) => {
                debug!("reservation status list fetch failed: {}", e);
                ReferenceMap::new()
            }
        }
    }
}
