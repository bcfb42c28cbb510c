use crate::state::AppState;
use crate::types::AppError;
use axum::{extract::State, response::Html};
use minijinja::context;

pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render("home.html", context! {})?))
}
