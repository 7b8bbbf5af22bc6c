use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::text::{fold_diacritic, search_key, slugify};

/// An entry of the dream dictionary
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct DreamSymbol {
    pub slug: String,
    pub name: String,
    pub letter: String, // Uppercase initial with diacritics folded (Ș -> S)
    pub category: String,
    pub summary: String,
    pub interpretation: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateDreamSymbol {
    pub name: String,
    pub category: String,
    pub summary: String,
    pub interpretation: String,
}

impl CreateDreamSymbol {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    pub fn letter(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| fold_diacritic(c).to_uppercase().to_string())
            .unwrap_or_default()
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

impl DreamSymbol {
    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, DreamSymbol>(
            r#"SELECT slug, name, letter, category, summary, interpretation,
                      created_at
               FROM dream_symbols
               WHERE slug = $1"#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_letter(pool: &SqlitePool, letter: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, DreamSymbol>(
            r#"SELECT slug, name, letter, category, summary, interpretation,
                      created_at
               FROM dream_symbols
               WHERE letter = $1
               ORDER BY search_name ASC"#,
        )
        .bind(letter)
        .fetch_all(pool)
        .await
    }

    /// Case- and diacritic-insensitive substring search; prefix matches rank first.
    pub async fn search(pool: &SqlitePool, query: &str, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let needle = escape_like(&search_key(query));
        sqlx::query_as::<_, DreamSymbol>(
            r#"SELECT slug, name, letter, category, summary, interpretation,
                      created_at
               FROM dream_symbols
               WHERE search_name LIKE '%' || $1 || '%' ESCAPE '\'
               ORDER BY CASE WHEN search_name LIKE $1 || '%' ESCAPE '\' THEN 0 ELSE 1 END,
                        search_name ASC
               LIMIT $2"#,
        )
        .bind(needle)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dream_symbols")
            .fetch_one(pool)
            .await
    }

    /// The symbol at position `index` in slug order
    pub async fn find_nth(pool: &SqlitePool, index: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, DreamSymbol>(
            r#"SELECT slug, name, letter, category, summary, interpretation,
                      created_at
               FROM dream_symbols
               ORDER BY slug ASC
               LIMIT 1 OFFSET $1"#,
        )
        .bind(index)
        .fetch_optional(pool)
        .await
    }

    pub async fn upsert(pool: &SqlitePool, data: &CreateDreamSymbol) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, DreamSymbol>(
            r#"INSERT INTO dream_symbols (slug, name, search_name, letter, category, summary, interpretation)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT(slug) DO UPDATE SET
                   name = excluded.name,
                   search_name = excluded.search_name,
                   letter = excluded.letter,
                   category = excluded.category,
                   summary = excluded.summary,
                   interpretation = excluded.interpretation
               RETURNING slug, name, letter, category, summary, interpretation,
                         created_at"#,
        )
        .bind(data.slug())
        .bind(data.name.trim())
        .bind(search_key(&data.name))
        .bind(data.letter())
        .bind(&data.category)
        .bind(&data.summary)
        .bind(&data.interpretation)
        .fetch_one(pool)
        .await
    }
}
