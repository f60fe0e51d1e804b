use axum::{Extension, Json};
use serde::{Deserialize, Deserializer};
use sqlx::PgPool;
use tournament_core::TournamentInfo;
use validator::{Validate, ValidateUrl};

use crate::auth::middleware::AdminSession;
use crate::db::settings::{self, SettingsUpdate};
use crate::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub about: Option<String>,
    /// Absent keeps the stored URL, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub logo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub knockout_image_url: Option<Option<String>>,
}

/// Marks a field that was present in the body, even when it is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn check_url(field: &str, value: &Option<Option<String>>) -> Result<(), AppError> {
    match value {
        Some(Some(url)) if !url.validate_url() => {
            Err(AppError::BadRequest(format!("{field} must be a valid URL")))
        }
        _ => Ok(()),
    }
}

/// GET /api/settings
pub async fn get_settings(
    Extension(pool): Extension<PgPool>,
) -> Result<Json<TournamentInfo>, AppError> {
    Ok(Json(settings::get_settings(&pool).await?))
}

/// PUT /api/admin/settings
pub async fn update_settings(
    Extension(pool): Extension<PgPool>,
    _admin: AdminSession,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<TournamentInfo>, AppError> {
    req.validate()?;
    check_url("logoUrl", &req.logo_url)?;
    check_url("knockoutImageUrl", &req.knockout_image_url)?;

    let name = req.name.as_deref().map(str::trim);
    if name == Some("") {
        return Err(AppError::BadRequest("Name cannot be empty".into()));
    }

    let updated = settings::update_settings(
        &pool,
        &SettingsUpdate {
            name,
            about: req.about.as_deref(),
            logo_url: req.logo_url.as_ref().map(|v| v.as_deref()),
            knockout_image_url: req.knockout_image_url.as_ref().map(|v| v.as_deref()),
        },
    )
    .await?;

    tracing::info!("Tournament settings updated");
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_url_clears_and_absent_keeps() {
        let req: UpdateSettingsRequest =
            serde_json::from_str(r#"{"logoUrl": null, "name": "Cup"}"#).unwrap();
        assert_eq!(req.logo_url, Some(None));
        assert_eq!(req.knockout_image_url, None);

        let req: UpdateSettingsRequest =
            serde_json::from_str(r#"{"knockoutImageUrl": "https://cdn.example.org/b.png"}"#)
                .unwrap();
        assert_eq!(
            req.knockout_image_url,
            Some(Some("https://cdn.example.org/b.png".to_string()))
        );
        assert_eq!(req.logo_url, None);
    }

    #[test]
    fn test_check_url() {
        assert!(check_url("logoUrl", &None).is_ok());
        assert!(check_url("logoUrl", &Some(None)).is_ok());
        assert!(check_url("logoUrl", &Some(Some("https://cdn.example.org/l.png".into()))).is_ok());
        assert!(matches!(
            check_url("logoUrl", &Some(Some("not a url".into()))),
            Err(AppError::BadRequest(_))
        ));
    }
}
