use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod settings;

pub use settings::Settings;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_percentage: f64,
    pub original_price: f64,
    pub discounted_price: f64,
}

/// Body of both POST and PUT. PUT replaces every field, so it takes the
/// same shape as create.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferInput {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub discounted_price: f64,
}

impl OfferInput {
    fn into_offer(self, id: String) -> Offer {
        Offer {
            id,
            title: self.title,
            description: self.description,
            discount_percentage: self.discount_percentage,
            original_price: self.original_price,
            discounted_price: self.discounted_price,
        }
    }
}

/// Offers in insertion order.
pub type Db = Arc<RwLock<Vec<Offer>>>;

pub fn app() -> Router {
    app_with_offers(Vec::new())
}

pub fn app_with_offers(offers: Vec<Offer>) -> Router {
    let db: Db = Arc::new(RwLock::new(offers));
    let api = Router::new()
        .route("/offers", get(list_offers).post(create_offer))
        .route("/offers/{id}", get(get_offer).put(update_offer).delete(delete_offer))
        .with_state(db);
    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// 24 lowercase hex digits, the shape of a document id.
fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}

async fn list_offers(State(db): State<Db>) -> Json<Vec<Offer>> {
    Json(db.read().await.clone())
}

async fn create_offer(
    State(db): State<Db>,
    Json(input): Json<OfferInput>,
) -> (StatusCode, Json<Offer>) {
    let offer = input.into_offer(new_id());
    tracing::info!(id = %offer.id, title = %offer.title, "created offer");
    db.write().await.push(offer.clone());
    (StatusCode::CREATED, Json(offer))
}

async fn get_offer(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Offer>, StatusCode> {
    let offers = db.read().await;
    offers
        .iter()
        .find(|o| o.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_offer(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<OfferInput>,
) -> Result<Json<Offer>, StatusCode> {
    let mut offers = db.write().await;
    let slot = offers.iter_mut().find(|o| o.id == id).ok_or_else(|| {
        tracing::warn!(%id, "update of unknown offer");
        StatusCode::NOT_FOUND
    })?;
    *slot = input.into_offer(id);
    tracing::info!(id = %slot.id, "updated offer");
    Ok(Json(slot.clone()))
}

async fn delete_offer(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut offers = db.write().await;
    let index = offers.iter().position(|o| o.id == id).ok_or_else(|| {
        tracing::warn!(%id, "delete of unknown offer");
        StatusCode::NOT_FOUND
    })?;
    offers.remove(index);
    tracing::info!(%id, "deleted offer");
    Ok(Json(json!({ "message": "Offer deleted" })))
}
