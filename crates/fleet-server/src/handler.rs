//! Request handlers for the `/vehicles` resource.
//!
//! Each handler decodes its path, query, and body into typed values,
//! rejecting bad input with 400 before the service is called, and wraps
//! successful results in an [`Envelope`].

use std::str::FromStr;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use fleet_service::VehicleService;
use fleet_store::VehicleMap;
use fleet_types::{DimensionRange, Range, Vehicle, VehicleAttributes, VehicleId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: VehicleService,
}

impl AppState {
    pub fn new(service: VehicleService) -> Self {
        Self { service }
    }
}

/// Uniform success body: `{"message": "success", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            message: "success",
            data,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ColorYearParams {
    pub color: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DimensionParams {
    /// `"{min}-{max}"`
    pub length: Option<String>,
    /// `"{min}-{max}"`
    pub width: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeightParams {
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpeedBody {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct FuelBody {
    pub fuel_type: String,
}

/// Parse a required textual parameter.
fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> ApiResult<T> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest(format!("missing parameter '{name}'")))?;
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid parameter '{name}': '{raw}'")))
}

fn parse_id(raw: &str) -> ApiResult<VehicleId> {
    Ok(raw.parse::<VehicleId>()?)
}

/// Health check handler.
pub async fn health_handler(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let vehicles = state.service.count()?;
    Ok(Json(json!({
        "status": "ok",
        "vehicles": vehicles,
    })))
}

/// `GET /vehicles`, optionally filtered by `?color=&year=`.
///
/// Once any filter parameter is present `year` is required. An absent or
/// empty `color` filters on year alone.
pub async fn list_vehicles(
    State(state): State<AppState>,
    params: Result<Query<ColorYearParams>, QueryRejection>,
) -> ApiResult<Json<Envelope<VehicleMap>>> {
    let Query(params) = params?;
    if params.color.is_none() && params.year.is_none() {
        return Ok(Envelope::success(state.service.find_all()?));
    }

    let year: i32 = parse_param("year", params.year.as_deref())?;
    let found = state
        .service
        .find_by_color_and_year(params.color.as_deref(), year)?;
    Ok(Envelope::success(found))
}

/// `POST /vehicles`
pub async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<VehicleAttributes>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Vehicle>>)> {
    let Json(attributes) = payload?;
    let vehicle = state.service.create(attributes)?;
    tracing::info!(id = %vehicle.id, brand = %vehicle.attributes.brand, "vehicle created");
    Ok((StatusCode::CREATED, Envelope::success(vehicle)))
}

/// `POST /vehicles/batch`
pub async fn create_vehicles(
    State(state): State<AppState>,
    payload: Result<Json<Vec<VehicleAttributes>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Vec<Vehicle>>>)> {
    let Json(batch) = payload?;
    let created = state.service.create_batch(batch)?;
    tracing::info!(count = created.len(), "vehicle batch created");
    Ok((StatusCode::CREATED, Envelope::success(created)))
}

/// `GET /vehicles/brand/:brand/between/:start_year/:end_year`
pub async fn by_brand_and_years(
    State(state): State<AppState>,
    path: Result<Path<(String, String, String)>, PathRejection>,
) -> ApiResult<Json<Envelope<VehicleMap>>> {
    let Path((brand, start, end)) = path?;
    let start_year: i32 = parse_param("start_year", Some(start.as_str()))?;
    let end_year: i32 = parse_param("end_year", Some(end.as_str()))?;
    let found = state
        .service
        .find_by_brand_and_year_range(&brand, start_year, end_year)?;
    Ok(Envelope::success(found))
}

/// `GET /vehicles/average_speed/brand/:brand`
pub async fn average_speed(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<f64>>> {
    let Path(brand) = path?;
    Ok(Envelope::success(state.service.average_speed_by_brand(&brand)?))
}

/// `GET /vehicles/average_capacity/brand/:brand`
pub async fn average_capacity(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<f64>>> {
    let Path(brand) = path?;
    Ok(Envelope::success(state.service.average_capacity_by_brand(&brand)?))
}

/// `GET /vehicles/fuel_type/:fuel_type`
pub async fn by_fuel_type(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<VehicleMap>>> {
    let Path(fuel_type) = path?;
    Ok(Envelope::success(state.service.find_by_fuel_type(&fuel_type)?))
}

/// `GET /vehicles/transmission/:transmission`
pub async fn by_transmission(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Envelope<VehicleMap>>> {
    let Path(transmission) = path?;
    Ok(Envelope::success(
        state.service.find_by_transmission(&transmission)?,
    ))
}

/// `GET /vehicles/dimensions?length={min}-{max}&width={min}-{max}`
pub async fn by_dimensions(
    State(state): State<AppState>,
    params: Result<Query<DimensionParams>, QueryRejection>,
) -> ApiResult<Json<Envelope<VehicleMap>>> {
    let Query(params) = params?;
    let length = params
        .length
        .ok_or_else(|| ApiError::BadRequest("missing parameter 'length'".into()))?;
    let width = params
        .width
        .ok_or_else(|| ApiError::BadRequest("missing parameter 'width'".into()))?;
    let query = DimensionRange {
        length: Range::parse_span("length", &length)?,
        width: Range::parse_span("width", &width)?,
    };
    Ok(Envelope::success(state.service.find_by_dimensions(&query)?))
}

/// `GET /vehicles/weight?min=&max=`
pub async fn by_weight(
    State(state): State<AppState>,
    params: Result<Query<WeightParams>, QueryRejection>,
) -> ApiResult<Json<Envelope<VehicleMap>>> {
    let Query(params) = params?;
    let min: f64 = parse_param("min", params.min.as_deref())?;
    let max: f64 = parse_param("max", params.max.as_deref())?;
    Ok(Envelope::success(state.service.find_by_weight(min, max)?))
}

/// `PUT /vehicles/:id/update_speed`
pub async fn update_speed(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SpeedBody>, JsonRejection>,
) -> ApiResult<Json<Envelope<Vehicle>>> {
    let Path(id) = path?;
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let vehicle = state.service.update_speed(id, body.speed)?;
    tracing::info!(%id, speed = body.speed, "vehicle speed updated");
    Ok(Envelope::success(vehicle))
}

/// `PUT /vehicles/:id/update_fuel`
pub async fn update_fuel(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<FuelBody>, JsonRejection>,
) -> ApiResult<Json<Envelope<Vehicle>>> {
    let Path(id) = path?;
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let vehicle = state.service.update_fuel_type(id, &body.fuel_type)?;
    tracing::info!(%id, fuel_type = %body.fuel_type, "vehicle fuel type updated");
    Ok(Envelope::success(vehicle))
}

/// `DELETE /vehicles/:id`
pub async fn delete_vehicle(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    let id = parse_id(&id)?;
    state.service.delete(id)?;
    tracing::info!(%id, "vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_requires_value() {
        assert!(matches!(
            parse_param::<i32>("year", None),
            Err(ApiError::BadRequest(msg)) if msg.contains("year")
        ));
        assert!(parse_param::<i32>("year", Some("20x0")).is_err());
        assert_eq!(parse_param::<i32>("year", Some(" 2010 ")).unwrap(), 2010);
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert!(matches!(parse_id("abc"), Err(ApiError::BadRequest(_))));
        assert_eq!(parse_id("12").unwrap().get(), 12);
    }

    #[test]
    fn envelope_shape() {
        let Json(body) = Envelope::success(1.5);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"message": "success", "data": 1.5}));
    }
}
