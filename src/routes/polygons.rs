use crate::models::{
    AreaQuery, AroundQuery, BoundingBox, CacheStatsResponse, ErrorResponse, HealthResponse, Polygon,
    PolygonsResponse, TagSearchRequest,
};
use crate::services::{PolygonCategory, PolygonService, Repository, RepositoryError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PolygonService>,
}

/// Configure all polygon-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/polygons/search", web::post().to(search_polygons))
        .route("/polygons/around", web::get().to(polygons_around))
        .route("/polygons/{osm_id:\\d+}", web::get().to(get_polygon))
        .route("/polygons/{category}", web::get().to(get_category))
        .route("/cache/stats", web::get().to(cache_stats))
        .route("/cache", web::delete().to(clear_cache));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    error_response(actix_web::http::StatusCode::BAD_REQUEST, error, message)
}

fn repository_error(err: RepositoryError) -> HttpResponse {
    match err {
        RepositoryError::InvalidBoundingBox(_) => bad_request("Invalid bounding box", err.to_string()),
        RepositoryError::Unsupported(_) => bad_request("Unsupported operation", err.to_string()),
        RepositoryError::Overpass(_) => {
            tracing::error!("Overpass request failed: {}", err);
            error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Overpass request failed",
                err.to_string(),
            )
        }
    }
}

/// Apply the optional area window and wrap the result
fn build_response(
    service: &PolygonService,
    mut polygons: Vec<Polygon>,
    min_area: Option<f64>,
    max_area: Option<f64>,
) -> PolygonsResponse {
    if min_area.is_some() || max_area.is_some() {
        polygons = service.filter_by_area(polygons, min_area.unwrap_or(0.0), max_area);
    }

    PolygonsResponse {
        count: polygons.len(),
        statistics: service.get_statistics(&polygons),
        features: service.convert_to_geojson(&polygons),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let overpass_available = state.service.repository().client().is_available().await;
    let status = if overpass_available { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        overpass_available,
        timestamp: chrono::Utc::now(),
    })
}

/// Polygons of a named category
///
/// GET /api/v1/polygons/{buildings|industrial|water|parks}?south=&west=&north=&east=
async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<AreaQuery>,
) -> impl Responder {
    let slug = path.into_inner();
    let Some(category) = PolygonCategory::from_slug(&slug) else {
        return bad_request(
            "Unknown category",
            format!("Category must be one of: buildings, industrial, water, parks (got {})", slug),
        );
    };

    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let bbox = query.bounding_box();
    tracing::info!("Fetching {} in {}", slug, bbox);

    match state.service.get_category(category, &bbox).await {
        Ok(polygons) => HttpResponse::Ok().json(build_response(
            &state.service,
            polygons,
            query.min_area,
            query.max_area,
        )),
        Err(e) => repository_error(e),
    }
}

/// Buildings around a point
///
/// GET /api/v1/polygons/around?lat=&lon=&radiusKm=
async fn polygons_around(state: web::Data<AppState>, query: web::Query<AroundQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let bbox = BoundingBox::around(query.lat, query.lon, query.radius_km);
    tracing::info!("Fetching buildings within {}km of ({}, {})", query.radius_km, query.lat, query.lon);

    match state.service.get_buildings(&bbox).await {
        Ok(polygons) => HttpResponse::Ok().json(build_response(&state.service, polygons, None, None)),
        Err(e) => repository_error(e),
    }
}

/// Custom tag search
///
/// POST /api/v1/polygons/search
///
/// Request body:
/// ```json
/// {
///   "south": 48.81, "west": 2.22, "north": 48.90, "east": 2.47,
///   "tags": {"amenity": "school"},
///   "elementType": "way",
///   "minArea": 0.0,
///   "tagKey": "name", "tagValue": "..."
/// }
/// ```
async fn search_polygons(state: web::Data<AppState>, req: web::Json<TagSearchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    if req.tags.is_empty() {
        return bad_request("Validation failed", "At least one tag is required".to_string());
    }

    let bbox = req.bounding_box();
    let result = match req.element_type {
        crate::models::PolygonType::Relation => {
            state.service.get_relations_by_tags(&bbox, req.tags.clone()).await
        }
        crate::models::PolygonType::Way => state.service.get_polygons_by_tags(&bbox, req.tags.clone()).await,
        crate::models::PolygonType::Node => {
            return bad_request(
                "Unsupported element type",
                "Nodes carry no area; use way or relation".to_string(),
            );
        }
    };

    let mut polygons = match result {
        Ok(polygons) => polygons,
        Err(e) => return repository_error(e),
    };

    if let (Some(key), Some(value)) = (&req.tag_key, &req.tag_value) {
        polygons = state.service.filter_by_tag_value(polygons, key, value);
    }

    HttpResponse::Ok().json(build_response(&state.service, polygons, req.min_area, req.max_area))
}

/// Single cached polygon as a GeoJSON feature
///
/// GET /api/v1/polygons/{osm_id}
async fn get_polygon(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let osm_id = path.into_inner();

    match state.service.repository().find_by_id(osm_id).await {
        Some(polygon) => HttpResponse::Ok().json(polygon.to_geojson_feature()),
        None => error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Polygon not found",
            format!("No cached polygon with id {}", osm_id),
        ),
    }
}

/// GET /api/v1/cache/stats
async fn cache_stats(state: web::Data<AppState>) -> impl Responder {
    let repository = state.service.repository();
    let polygons = repository.cache_size().await;
    let responses = repository.response_cache_stats().await.unwrap_or_default();

    HttpResponse::Ok().json(CacheStatsResponse {
        polygons,
        responses: responses.entries,
        response_hits: responses.hits,
        response_misses: responses.misses,
        response_hit_rate: responses.hit_rate,
    })
}

/// DELETE /api/v1/cache
async fn clear_cache(state: web::Data<AppState>) -> impl Responder {
    state.service.repository().clear_cache();
    tracing::info!("Caches cleared");
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverpassSettings;
    use crate::models::{Coordinate, PolygonType};
    use crate::services::{OverpassClient, PolygonRepository};
    use actix_web::{test, App};

    fn state() -> AppState {
        let client = OverpassClient::new(OverpassSettings {
            url: "http://127.0.0.1:9/api/interpreter".to_string(),
            max_retries: 1,
            availability_timeout_secs: 1,
            ..OverpassSettings::default()
        })
        .unwrap();
        let repository = PolygonRepository::new(Arc::new(client), 100);
        AppState {
            service: Arc::new(PolygonService::new(repository)),
        }
    }

    #[actix_web::test]
    async fn test_unknown_category() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/polygons/forests?south=0&west=0&north=1&east=1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_out_of_range_bbox_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/polygons/buildings?south=0&west=0&north=95&east=1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_reversed_bbox_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/polygons/parks?south=50&west=10&north=40&east=5")
            .to_request();
        let resp: ErrorResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.error, "Invalid bounding box");
    }

    #[actix_web::test]
    async fn test_get_cached_polygon() {
        let state = state();
        let coords = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)];
        state
            .service
            .repository()
            .save(Polygon::new(77, PolygonType::Way, coords.into_iter().map(Coordinate::from).collect()))
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/polygons/77").to_request();
        let feature: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["properties"]["osm_id"], 77);

        let req = test::TestRequest::get().uri("/polygons/78").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_search_requires_tags() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/polygons/search")
            .set_json(serde_json::json!({"south": 0.0, "west": 0.0, "north": 1.0, "east": 1.0, "tags": {}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
