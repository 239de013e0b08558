use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ContactRequestResponse, CreateContactRequest};
use super::{engine_error_response, validation_error_response, AppState};

/// Configure contact request routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact-requests", web::post().to(create_contact_request));
}

/// Create contact request endpoint
///
/// POST /api/v1/contact-requests
/// Authorization: Bearer <access token>
///
/// Request body:
/// ```json
/// {
///   "shipmentId": "string",
///   "tripId": "string",
///   "message": "string"
/// }
/// ```
async fn create_contact_request(
    state: web::Data<AppState>,
    req: web::Json<CreateContactRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let authorization = http_req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let session = state.auth.session(authorization);

    match state
        .contacts
        .send_contact_request(&session, &req.shipment_id, &req.trip_id, &req.message)
        .await
    {
        Ok(contact_request) => HttpResponse::Created().json(ContactRequestResponse {
            success: true,
            contact_request,
        }),
        Err(e) => {
            tracing::warn!(
                "Contact request for shipment {} / trip {} failed: {}",
                req.shipment_id,
                req.trip_id,
                e
            );
            engine_error_response(&e)
        }
    }
}
