use axum::{extract::State, http::StatusCode, Json};
use common::types::MessageEnvelope;
use service::people::domain::{Person, PersonInput};

use crate::errors::ApiError;
use crate::metrics::PEOPLE_ADDED_TOTAL;
use crate::routes::ServerState;

pub const PERSON_ADDED_MESSAGE: &str = "Person added successfully";

#[utoipa::path(
    post,
    path = "/add_person",
    tag = "people",
    request_body = crate::openapi::PersonDoc,
    responses(
        (status = 201, description = "Person appended", body = crate::openapi::AddPersonResponseDoc),
        (status = 500, description = "Backing file unreadable or unwritable")
    )
)]
pub async fn add_person(
    State(state): State<ServerState>,
    Json(input): Json<PersonInput>,
) -> Result<(StatusCode, Json<MessageEnvelope<Person>>), ApiError> {
    let person = state.people.add_person(input).await?;
    PEOPLE_ADDED_TOTAL.inc();
    let body = MessageEnvelope { message: PERSON_ADDED_MESSAGE.to_string(), data: person };
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    get,
    path = "/export_people",
    tag = "people",
    responses(
        (status = 200, description = "Every stored person in insertion order", body = [crate::openapi::PersonDoc]),
        (status = 500, description = "Backing file unreadable")
    )
)]
pub async fn export_people(State(state): State<ServerState>) -> Result<Json<Vec<Person>>, ApiError> {
    let people = state.people.export_people().await?;
    Ok(Json(people))
}
