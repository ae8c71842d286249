//! # API Endpoint Handlers
//!
//! Read handlers take a snapshot under a short read lock and release the
//! lock before doing any work. Mutation handlers validate the body first,
//! then hold the write lock for the revision check and the mutation.

use super::{
    AppState,
    types::{
        AddChildOfRequest, AddChildRequest, CreatedResponse, ErrorResponse, GenerationResponse,
        HealthResponse, RevisionQuery, StatusResponse, UpdateResponse, validate_fields,
        validate_update,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kinship_core::{
    FamilyMetrics, FamilyStore, KinshipError, PersonFields, PersonId, PersonUpdate, audit,
    compute_generations,
};

// =============================================================================
// ERROR MAPPING
// =============================================================================

fn error_status(error: &KinshipError) -> StatusCode {
    match error {
        KinshipError::InvalidParents(_) | KinshipError::InvalidField(_) => StatusCode::BAD_REQUEST,
        KinshipError::PersonNotFound(_) => StatusCode::NOT_FOUND,
        KinshipError::RevisionConflict { .. } | KinshipError::IdsExhausted(_) => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: KinshipError) -> Response {
    let status = error_status(&error);
    if status.is_server_error() {
        tracing::error!(%error, "request failed");
    } else {
        tracing::debug!(%error, "request rejected");
    }
    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}

fn created(store: &FamilyStore, result: Result<PersonId, KinshipError>) -> Response {
    match result {
        Ok(id) => {
            let response = CreatedResponse {
                id,
                revision: store.revision(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// READ HANDLERS
// =============================================================================

/// Metrics of the current snapshot.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (snapshot, revision) = {
        let store = state.store.read().await;
        (store.snapshot(), store.revision())
    };

    let response = StatusResponse {
        revision,
        root_person_id: snapshot.root_person_id().clone(),
        metrics: FamilyMetrics::from_graph(&snapshot),
    };

    (StatusCode::OK, Json(response))
}

/// The full snapshot in wire shape.
pub async fn tree_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.store.read().await.snapshot();
    Json(snapshot.as_ref()).into_response()
}

/// One person record.
pub async fn person_handler(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
) -> Response {
    let snapshot = state.store.read().await.snapshot();
    match snapshot.get(&id) {
        Some(person) => Json(person).into_response(),
        None => error_response(KinshipError::PersonNotFound(id)),
    }
}

/// The generation layout of the current snapshot.
pub async fn generations_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.store.read().await.snapshot();
    let generations: Vec<GenerationResponse> = compute_generations(&snapshot)
        .into_iter()
        .map(GenerationResponse::from)
        .collect();

    Json(generations)
}

/// Link issues of the current snapshot.
pub async fn audit_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.store.read().await.snapshot();
    Json(audit(&snapshot))
}

// =============================================================================
// MUTATION HANDLERS
// =============================================================================

/// Add a child to `id`, with `otherParentId` or `id`'s spouse as the
/// second parent.
pub async fn add_child_of_handler(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    Query(guard): Query<RevisionQuery>,
    Json(request): Json<AddChildOfRequest>,
) -> Response {
    if let Err(e) = validate_fields(&request.fields) {
        return error_response(e);
    }

    let mut store = state.store.write().await;
    let result = store
        .check_revision(guard.expected_revision)
        .and_then(|()| add_child_of(&mut store, &id, request));
    created(&store, result)
}

fn add_child_of(
    store: &mut FamilyStore,
    id: &PersonId,
    request: AddChildOfRequest,
) -> Result<PersonId, KinshipError> {
    match request.other_parent_id {
        Some(other) => {
            if store.get(id).is_none() {
                return Err(KinshipError::PersonNotFound(id.clone()));
            }
            store.add_child(&[id.clone(), other], request.fields)
        }
        None => store.add_child_of(id, request.fields),
    }
}

/// Add a child with an explicit parent list.
pub async fn add_child_handler(
    State(state): State<AppState>,
    Query(guard): Query<RevisionQuery>,
    Json(request): Json<AddChildRequest>,
) -> Response {
    if let Err(e) = validate_fields(&request.fields) {
        return error_response(e);
    }

    let mut store = state.store.write().await;
    let result = store
        .check_revision(guard.expected_revision)
        .and_then(|()| store.add_child(&request.parent_ids, request.fields));
    created(&store, result)
}

/// Add a spouse to `id`.
pub async fn add_spouse_handler(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    Query(guard): Query<RevisionQuery>,
    Json(fields): Json<PersonFields>,
) -> Response {
    if let Err(e) = validate_fields(&fields) {
        return error_response(e);
    }

    let mut store = state.store.write().await;
    let result = store
        .check_revision(guard.expected_revision)
        .and_then(|()| store.add_spouse(&id, fields));
    created(&store, result)
}

/// Merge a partial update into `id`. Unknown ids answer `applied: false`.
pub async fn update_person_handler(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    Query(guard): Query<RevisionQuery>,
    Json(update): Json<PersonUpdate>,
) -> Response {
    if let Err(e) = validate_update(&update) {
        return error_response(e);
    }

    let mut store = state.store.write().await;
    if let Err(e) = store.check_revision(guard.expected_revision) {
        return error_response(e);
    }

    let applied = store.update_person(&id, &update);
    let response = UpdateResponse {
        applied,
        revision: store.revision(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
