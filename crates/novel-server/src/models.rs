use axum::Json;
use axum::extract::{Path, State};

use crate::error::ServerError;
use crate::protocol::{ModelDescriptor, ModelList};
use crate::state::AppState;

/// Handle `GET /v1/models`
pub(crate) async fn list_models(State(state): State<AppState>) -> Json<ModelList> {
    Json(ModelList::single(state.model().clone()))
}

/// Handle `GET /v1/models/{id}`
pub(crate) async fn retrieve_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ModelDescriptor>, ServerError> {
    let model = state.model();
    if model.id != id {
        return Err(ServerError::ModelNotFound(id));
    }

    Ok(Json(model.clone()))
}
