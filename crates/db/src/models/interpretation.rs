use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Which calculator a piece of interpretation text belongs to
#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, Hash, TS, EnumString, Display,
)]
#[sqlx(type_name = "interpretation_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterpretationCategory {
    LifePath,
    Destiny,
    SoulUrge,
    Personality,
    Daily,
    PersonalDay,
}

/// Pre-written Romanian text for one numerology number
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, TS)]
pub struct NumberInterpretation {
    pub category: InterpretationCategory,
    #[ts(type = "number")]
    pub number: i64,
    pub title: String,
    pub summary: String,
    pub body: String,
}

impl NumberInterpretation {
    pub async fn find(
        pool: &SqlitePool,
        category: InterpretationCategory,
        number: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, NumberInterpretation>(
            r#"SELECT category, number, title, summary, body
               FROM number_interpretations
               WHERE category = $1 AND number = $2"#,
        )
        .bind(category)
        .bind(number)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_category(
        pool: &SqlitePool,
        category: InterpretationCategory,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, NumberInterpretation>(
            r#"SELECT category, number, title, summary, body
               FROM number_interpretations
               WHERE category = $1
               ORDER BY number ASC"#,
        )
        .bind(category)
        .fetch_all(pool)
        .await
    }

    pub async fn upsert(pool: &SqlitePool, data: &NumberInterpretation) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, NumberInterpretation>(
            r#"INSERT INTO number_interpretations (category, number, title, summary, body)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT(category, number) DO UPDATE SET
                   title = excluded.title,
                   summary = excluded.summary,
                   body = excluded.body,
                   updated_at = datetime('now', 'subsec')
               RETURNING category, number, title, summary, body"#,
        )
        .bind(data.category)
        .bind(data.number)
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.body)
        .fetch_one(pool)
        .await
    }
}
