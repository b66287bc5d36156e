//! Zone handlers: list/show plus provider-backed create/destroy.
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::SharedState;
use crate::db::Db;
use crate::db::zone_repo::{self, Zone};
use crate::error::AppError;
use crate::provider::types::ZoneCreatedBody;
use crate::validation::validate_zone_name;

const CREATE_FAILED_NOTICE: &str =
    "Something went wrong creating your Zone. Please try again shortly.";
const DESTROY_FAILED_NOTICE: &str =
    "Something went wrong destroying your Zone. Please try again shortly.";

/// Envelope for create requests; only the nested `zone` object is read.
#[derive(Debug, Deserialize)]
pub struct CreateZoneRequest {
    pub zone: ZoneParams,
}

/// Allow-listed zone attributes. Unknown keys are dropped on deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ZoneParams {
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub dns_servers: Option<DnsServersParam>,
}

/// `dns_servers` may arrive as a single hostname or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DnsServersParam {
    One(String),
    Many(Vec<String>),
}

impl DnsServersParam {
    fn into_vec(self) -> Vec<String> {
        match self {
            DnsServersParam::One(s) => vec![s],
            DnsServersParam::Many(v) => v,
        }
    }
}

/// Stored zone as returned by the read endpoints.
#[derive(Debug, Serialize)]
pub struct ZoneDto {
    pub id: i64,
    pub zone: String,
    pub dns_servers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Zone> for ZoneDto {
    fn from(z: Zone) -> Self {
        ZoneDto {
            id: z.id,
            zone: z.zone,
            dns_servers: z.dns_servers,
            created_at: z.created_at,
            updated_at: z.updated_at,
        }
    }
}

/// Candidate state echoed back whenever a form view is rendered.
#[derive(Debug, Default, Serialize)]
pub struct ZoneForm {
    pub zone: String,
    pub dns_servers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormView {
    New,
    Edit,
}

/// Explicit action outcome: where to send the user, or what to render.
#[derive(Debug)]
pub enum ActionOutcome {
    Redirect {
        location: String,
        notice: String,
    },
    Render {
        view: FormView,
        form: ZoneForm,
        errors: Vec<FieldError>,
    },
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect { location, notice } => (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, location)],
                Json(serde_json::json!({ "notice": notice })),
            )
                .into_response(),
            ActionOutcome::Render { view, form, errors } => {
                let status = if errors.is_empty() {
                    StatusCode::OK
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                };
                let body = Json(serde_json::json!({
                    "view": view,
                    "zone": form,
                    "errors": errors,
                }));
                (status, body).into_response()
            }
        }
    }
}

// GET /zones
pub async fn index(
    Extension(state): Extension<SharedState>,
) -> Result<Json<Vec<ZoneDto>>, AppError> {
    let zones = zone_repo::list(&state.db).await.map_err(AppError::internal)?;
    Ok(Json(zones.into_iter().map(ZoneDto::from).collect()))
}

// GET /zones/{id}
pub async fn show(
    Extension(state): Extension<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<ZoneDto>, AppError> {
    let zone = zone_repo::find(&state.db, id)
        .await
        .map_err(AppError::internal)?
        .ok_or(AppError::NotFound)?;

    Ok(Json(zone.into()))
}

// GET /zones/new
pub async fn new_zone() -> ActionOutcome {
    ActionOutcome::Render {
        view: FormView::New,
        form: ZoneForm::default(),
        errors: Vec::new(),
    }
}

// GET /zones/{id}/edit
pub async fn edit(
    Extension(state): Extension<SharedState>,
    Path(id): Path<i64>,
) -> Result<ActionOutcome, AppError> {
    let zone = zone_repo::find(&state.db, id)
        .await
        .map_err(AppError::internal)?
        .ok_or(AppError::NotFound)?;

    Ok(ActionOutcome::Render {
        view: FormView::Edit,
        form: ZoneForm {
            zone: zone.zone,
            dns_servers: zone.dns_servers,
        },
        errors: Vec::new(),
    })
}

// POST /zones
pub async fn create(
    Extension(state): Extension<SharedState>,
    Json(req): Json<CreateZoneRequest>,
) -> Result<ActionOutcome, AppError> {
    let mut form = ZoneForm {
        zone: req.zone.zone,
        dns_servers: req
            .zone
            .dns_servers
            .map(DnsServersParam::into_vec)
            .unwrap_or_default(),
    };

    // Provisioning happens before local validation; an invalid candidate can
    // still leave a remote zone behind.
    let provisioned = match state.provider.create_zone(&form.zone).await {
        Ok(res) if res.success => res,
        Ok(res) => {
            warn!("provider rejected create for '{}': {}", form.zone, res.body);
            return Ok(retry_new_zone());
        }
        Err(err) => {
            warn!("provider create call for '{}' failed: {err}", form.zone);
            return Ok(retry_new_zone());
        }
    };

    // A success response with an unreadable body counts as a failure.
    let Ok(created) = serde_json::from_str::<ZoneCreatedBody>(&provisioned.body) else {
        warn!("unparseable create response for '{}'", form.zone);
        return Ok(retry_new_zone());
    };
    form.dns_servers = created.dns_servers;

    match save(&state.db, &form).await? {
        SaveOutcome::Saved(id) => {
            info!("created zone '{}' (id {id})", form.zone);
            Ok(ActionOutcome::Redirect {
                location: format!("/zones/{id}"),
                notice: "Zone was successfully created.".into(),
            })
        }
        SaveOutcome::Invalid(errors) => Ok(ActionOutcome::Render {
            view: FormView::New,
            form,
            errors,
        }),
    }
}

// DELETE /zones/{id}
pub async fn destroy(
    Extension(state): Extension<SharedState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<ActionOutcome, AppError> {
    let zone = zone_repo::find(&state.db, id)
        .await
        .map_err(AppError::internal)?
        .ok_or(AppError::NotFound)?;

    let deprovisioned = match state.provider.destroy_zone(&zone.zone).await {
        Ok(res) => {
            if !res.success {
                warn!("provider rejected destroy for '{}': {}", zone.zone, res.body);
            }
            res.success
        }
        Err(err) => {
            warn!("provider destroy call for '{}' failed: {err}", zone.zone);
            false
        }
    };

    if !deprovisioned {
        // Send the user back where they came from, list as fallback.
        let location = headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("/zones")
            .to_string();
        return Ok(ActionOutcome::Redirect {
            location,
            notice: DESTROY_FAILED_NOTICE.into(),
        });
    }

    zone_repo::delete(&state.db, id)
        .await
        .map_err(AppError::internal)?;
    info!("destroyed zone '{}' (id {id})", zone.zone);

    Ok(ActionOutcome::Redirect {
        location: "/zones".into(),
        notice: "Zone was successfully destroyed.".into(),
    })
}

fn retry_new_zone() -> ActionOutcome {
    ActionOutcome::Redirect {
        location: "/zones/new".into(),
        notice: CREATE_FAILED_NOTICE.into(),
    }
}

enum SaveOutcome {
    Saved(i64),
    Invalid(Vec<FieldError>),
}

/// Validate the candidate and insert it. Field errors are returned as a
/// value so the caller can re-render the form.
async fn save(db: &Db, form: &ZoneForm) -> Result<SaveOutcome, AppError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_zone_name(&form.zone) {
        errors.push(FieldError {
            field: "zone",
            message: e.to_string(),
        });
    } else if zone_repo::exists(db, &form.zone)
        .await
        .map_err(AppError::internal)?
    {
        errors.push(FieldError {
            field: "zone",
            message: "has already been taken".into(),
        });
    }

    if !errors.is_empty() {
        return Ok(SaveOutcome::Invalid(errors));
    }

    let id = zone_repo::insert(db, &form.zone, &form.dns_servers)
        .await
        .map_err(AppError::internal)?;
    Ok(SaveOutcome::Saved(id))
}
