use sqlx::PgPool;
use tournament_core::TournamentInfo;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SettingsRow {
    pub name: String,
    pub about: String,
    pub logo_url: Option<String>,
    pub knockout_image_url: Option<String>,
}

impl From<SettingsRow> for TournamentInfo {
    fn from(row: SettingsRow) -> Self {
        TournamentInfo {
            name: row.name,
            about: row.about,
            logo_url: row.logo_url,
            knockout_image_url: row.knockout_image_url,
        }
    }
}

impl From<&TournamentInfo> for SettingsRow {
    fn from(info: &TournamentInfo) -> Self {
        SettingsRow {
            name: info.name.clone(),
            about: info.about.clone(),
            logo_url: info.logo_url.clone(),
            knockout_image_url: info.knockout_image_url.clone(),
        }
    }
}

/// Fields left as `None` keep their stored value. The image URLs can also be
/// cleared with `Some(None)`.
#[derive(Debug, Default)]
pub struct SettingsUpdate<'a> {
    pub name: Option<&'a str>,
    pub about: Option<&'a str>,
    pub logo_url: Option<Option<&'a str>>,
    pub knockout_image_url: Option<Option<&'a str>>,
}

/// Split a clearable field into (overwrite?, new value) bind parameters.
fn clearable(field: Option<Option<&str>>) -> (bool, Option<&str>) {
    (field.is_some(), field.flatten())
}

pub async fn get_settings(pool: &PgPool) -> Result<TournamentInfo, AppError> {
    let row = sqlx::query_as::<_, SettingsRow>(
        "SELECT name, about, logo_url, knockout_image_url FROM tournament_settings WHERE id = 1",
    )
    .fetch_optional(pool)
    .await
    .map_err(AppError::Sqlx)?
    .ok_or_else(|| AppError::Internal("Tournament settings row missing".into()))?;

    Ok(row.into())
}

/// Update the singleton settings row in place and return the new values.
pub async fn update_settings(
    pool: &PgPool,
    update: &SettingsUpdate<'_>,
) -> Result<TournamentInfo, AppError> {
    let (set_logo, logo_url) = clearable(update.logo_url);
    let (set_knockout, knockout_image_url) = clearable(update.knockout_image_url);

    let row = sqlx::query_as::<_, SettingsRow>(
        r#"UPDATE tournament_settings SET
            name = COALESCE($1, name),
            about = COALESCE($2, about),
            logo_url = CASE WHEN $4 THEN $3 ELSE logo_url END,
            knockout_image_url = CASE WHEN $6 THEN $5 ELSE knockout_image_url END,
            updated_at = NOW()
        WHERE id = 1
        RETURNING name, about, logo_url, knockout_image_url"#,
    )
    .bind(update.name)
    .bind(update.about)
    .bind(logo_url)
    .bind(set_logo)
    .bind(knockout_image_url)
    .bind(set_knockout)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Sqlx)?
    .ok_or_else(|| AppError::Internal("Tournament settings row missing".into()))?;

    Ok(row.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let row = SettingsRow {
            name: "Summer Cup 2026".into(),
            about: "Eight teams, two groups.".into(),
            logo_url: Some("https://cdn.example.org/logo.png".into()),
            knockout_image_url: None,
        };
        let info = TournamentInfo::from(row.clone());
        assert_eq!(SettingsRow::from(&info), row);
    }

    #[test]
    fn test_clearable_distinguishes_keep_and_clear() {
        assert_eq!(clearable(None), (false, None));
        assert_eq!(clearable(Some(None)), (true, None));
        assert_eq!(
            clearable(Some(Some("https://cdn.example.org/logo.png"))),
            (true, Some("https://cdn.example.org/logo.png"))
        );
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let info = TournamentInfo::from(SettingsRow {
            name: "Cup".into(),
            about: String::new(),
            logo_url: None,
            knockout_image_url: Some("https://cdn.example.org/bracket.png".into()),
        });
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["knockoutImageUrl"], "https://cdn.example.org/bracket.png");
        assert!(json["logoUrl"].is_null());
    }
}
