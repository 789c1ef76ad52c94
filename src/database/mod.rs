pub mod models;
pub mod schema;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

use models::*;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Database { pool })
    }

    /// In-memory database for the test suite. A single connection keeps
    /// every query on the same memory store.
    pub async fn new_in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Ok(Database { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(schema::INITIAL_SCHEMA)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ---- postal areas & villages ----

    /// Look up a postal area by code together with its villages.
    /// `approved_only` controls the village filter: the resolver's cache
    /// hit path shows approved villages only, while the post-materialize
    /// re-read returns everything.
    pub async fn get_postal_area_with_villages(
        &self,
        code: &str,
        approved_only: bool,
    ) -> Result<Option<PostalAreaWithVillages>, sqlx::Error> {
        let area = sqlx::query_as::<_, PostalArea>(
            "SELECT id, code, state, district, created_at FROM pincodes WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        let Some(area) = area else {
            return Ok(None);
        };

        let sql = if approved_only {
            "SELECT id, name FROM villages WHERE pincode_id = ? AND approved = 1"
        } else {
            "SELECT id, name FROM villages WHERE pincode_id = ?"
        };
        let villages = sqlx::query_as::<_, VillageSummary>(sql)
            .bind(&area.id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(PostalAreaWithVillages {
            id: area.id,
            code: area.code,
            state: area.state,
            district: area.district,
            created_at: area.created_at,
            villages,
        }))
    }

    /// Atomic find-or-create for a postal area keyed by code. The insert
    /// is a no-op on conflict, so two concurrent first-time lookups both
    /// land on the same row.
    pub async fn upsert_postal_area(
        &self,
        code: &str,
        state: &str,
        district: &str,
    ) -> Result<PostalArea, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO pincodes (id, code, state, district, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(code)
        .bind(state)
        .bind(district)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, PostalArea>(
            "SELECT id, code, state, district, created_at FROM pincodes WHERE code = ?",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
    }

    /// Bulk-insert villages under an area, skipping duplicates by
    /// (name, pincode_id).
    pub async fn insert_villages(
        &self,
        pincode_id: &str,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        for name in names {
            sqlx::query(
                r#"
                INSERT INTO villages (id, name, approved, pincode_id, created_at)
                VALUES (?, ?, 1, ?, ?)
                ON CONFLICT (name, pincode_id) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .bind(pincode_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn find_village(&self, id: &str) -> Result<Option<Village>, sqlx::Error> {
        sqlx::query_as::<_, Village>(
            "SELECT id, name, approved, pincode_id, created_at FROM villages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_village_by_name_and_code(
        &self,
        name: &str,
        code: &str,
    ) -> Result<Option<Village>, sqlx::Error> {
        sqlx::query_as::<_, Village>(
            r#"
            SELECT v.id, v.name, v.approved, v.pincode_id, v.created_at
            FROM villages v
            JOIN pincodes p ON p.id = v.pincode_id
            WHERE v.name = ? AND p.code = ?
            "#,
        )
        .bind(name)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn all_villages(&self) -> Result<Vec<VillageSummary>, sqlx::Error> {
        sqlx::query_as::<_, VillageSummary>("SELECT id, name FROM villages")
            .fetch_all(&self.pool)
            .await
    }

    // ---- users ----

    /// Atomic find-or-create for a user keyed by email.
    pub async fn upsert_user(&self, email: &str) -> Result<User, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, User>("SELECT id, email, created_at FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, email, created_at FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    // ---- stories ----

    pub async fn insert_story(
        &self,
        title: &str,
        original_text: &str,
        original_lang: &str,
        village_id: &str,
        author_id: &str,
    ) -> Result<Story, sqlx::Error> {
        let story = Story {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            original_text: original_text.to_string(),
            original_lang: original_lang.to_string(),
            village_id: village_id.to_string(),
            author_id: author_id.to_string(),
            approved: true,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO stories (id, title, original_text, original_lang, village_id, author_id, approved, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&story.id)
        .bind(&story.title)
        .bind(&story.original_text)
        .bind(&story.original_lang)
        .bind(&story.village_id)
        .bind(&story.author_id)
        .bind(story.approved)
        .bind(story.created_at)
        .execute(&self.pool)
        .await?;

        Ok(story)
    }

    pub async fn get_story_detail(&self, id: &str) -> Result<Option<StoryDetail>, sqlx::Error> {
        sqlx::query_as::<_, StoryDetail>(
            r#"
            SELECT s.id, s.title, s.original_text, s.original_lang, s.created_at,
                   u.email AS author_email,
                   v.id AS village_id, v.name AS village_name, p.code AS pincode_code
            FROM stories s
            JOIN users u ON u.id = s.author_id
            JOIN villages v ON v.id = s.village_id
            JOIN pincodes p ON p.id = v.pincode_id
            WHERE s.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All stories, newest first. Deliberately unfiltered by approval,
    /// matching the asymmetry in the read model.
    pub async fn list_story_details(&self) -> Result<Vec<StoryDetail>, sqlx::Error> {
        sqlx::query_as::<_, StoryDetail>(
            r#"
            SELECT s.id, s.title, s.original_text, s.original_lang, s.created_at,
                   u.email AS author_email,
                   v.id AS village_id, v.name AS village_name, p.code AS pincode_code
            FROM stories s
            JOIN users u ON u.id = s.author_id
            JOIN villages v ON v.id = s.village_id
            JOIN pincodes p ON p.id = v.pincode_id
            ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_stories_for_village(
        &self,
        village_id: &str,
    ) -> Result<Vec<StoryWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.title, s.original_text, s.original_lang, s.village_id,
                   s.author_id, u.email AS author_email, s.approved, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            WHERE s.village_id = ?
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(village_id)
        .fetch_all(&self.pool)
        .await
    }

    // ---- photos ----

    pub async fn insert_photo(
        &self,
        title: &str,
        description: Option<&str>,
        image_url: &str,
        village_id: &str,
    ) -> Result<Photo, sqlx::Error> {
        let photo = Photo {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            image_url: image_url.to_string(),
            village_id: village_id.to_string(),
            approved: true,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO photos (id, title, description, image_url, village_id, approved, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&photo.id)
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(&photo.image_url)
        .bind(&photo.village_id)
        .bind(photo.approved)
        .bind(photo.created_at)
        .execute(&self.pool)
        .await?;

        Ok(photo)
    }

    pub async fn list_photo_details(&self) -> Result<Vec<PhotoDetail>, sqlx::Error> {
        sqlx::query_as::<_, PhotoDetail>(
            r#"
            SELECT ph.id, ph.title, ph.description, ph.image_url,
                   v.name AS village_name, p.code AS pincode_code
            FROM photos ph
            JOIN villages v ON v.id = ph.village_id
            JOIN pincodes p ON p.id = v.pincode_id
            WHERE ph.approved = 1
            ORDER BY ph.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    // ---- foods ----

    /// Insert a food item. Fails with a unique violation when the
    /// (name, village) pair already exists; callers map that to 409.
    pub async fn insert_food(
        &self,
        name: &str,
        description: Option<&str>,
        ingredients: Option<&str>,
        image_url: Option<&str>,
        village_id: &str,
    ) -> Result<Food, sqlx::Error> {
        let food = Food {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            ingredients: ingredients.map(str::to_string),
            image_url: image_url.map(str::to_string),
            village_id: village_id.to_string(),
            approved: true,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO foods (id, name, description, ingredients, image_url, village_id, approved, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&food.id)
        .bind(&food.name)
        .bind(&food.description)
        .bind(&food.ingredients)
        .bind(&food.image_url)
        .bind(&food.village_id)
        .bind(food.approved)
        .bind(food.created_at)
        .execute(&self.pool)
        .await?;

        Ok(food)
    }

    pub async fn list_food_details(&self) -> Result<Vec<FoodDetail>, sqlx::Error> {
        sqlx::query_as::<_, FoodDetail>(
            r#"
            SELECT f.id, f.name, f.description, f.ingredients, f.image_url,
                   v.name AS village_name, p.code AS pincode_code
            FROM foods f
            JOIN villages v ON v.id = f.village_id
            JOIN pincodes p ON p.id = v.pincode_id
            WHERE f.approved = 1
            ORDER BY f.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    // ---- specialties ----

    /// Insert a specialty. Unique on (title, village); callers map the
    /// violation to 409.
    pub async fn insert_specialty(
        &self,
        title: &str,
        description: Option<&str>,
        category: &str,
        village_id: &str,
    ) -> Result<Specialty, sqlx::Error> {
        let specialty = Specialty {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            category: category.to_string(),
            image_url: None,
            village_id: village_id.to_string(),
            approved: true,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO specialties (id, title, description, category, image_url, village_id, approved, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&specialty.id)
        .bind(&specialty.title)
        .bind(&specialty.description)
        .bind(&specialty.category)
        .bind(&specialty.image_url)
        .bind(&specialty.village_id)
        .bind(specialty.approved)
        .bind(specialty.created_at)
        .execute(&self.pool)
        .await?;

        Ok(specialty)
    }

    pub async fn list_specialty_details(&self) -> Result<Vec<SpecialtyDetail>, sqlx::Error> {
        sqlx::query_as::<_, SpecialtyDetail>(
            r#"
            SELECT sp.id, sp.title, sp.description, sp.category, sp.image_url,
                   v.name AS village_name, p.code AS pincode_code
            FROM specialties sp
            JOIN villages v ON v.id = sp.village_id
            JOIN pincodes p ON p.id = v.pincode_id
            WHERE sp.approved = 1
            ORDER BY sp.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    // ---- aggregate ----

    /// Fetch a village with its postal area and all four content
    /// collections. Stories come back regardless of approval; photos,
    /// foods and specialties are approved-only.
    pub async fn get_village_bundle(
        &self,
        village_id: &str,
    ) -> Result<Option<VillageBundle>, sqlx::Error> {
        let Some(village) = self.find_village(village_id).await? else {
            return Ok(None);
        };

        let area = sqlx::query_as::<_, PostalArea>(
            "SELECT id, code, state, district, created_at FROM pincodes WHERE id = ?",
        )
        .bind(&village.pincode_id)
        .fetch_one(&self.pool)
        .await?;

        let stories = self.list_stories_for_village(village_id).await?;

        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, title, description, image_url, village_id, approved, created_at
            FROM photos WHERE village_id = ? AND approved = 1
            ORDER BY created_at DESC
            "#,
        )
        .bind(village_id)
        .fetch_all(&self.pool)
        .await?;

        let foods = sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, description, ingredients, image_url, village_id, approved, created_at
            FROM foods WHERE village_id = ? AND approved = 1
            ORDER BY created_at DESC
            "#,
        )
        .bind(village_id)
        .fetch_all(&self.pool)
        .await?;

        let specialties = sqlx::query_as::<_, Specialty>(
            r#"
            SELECT id, title, description, category, image_url, village_id, approved, created_at
            FROM specialties WHERE village_id = ? AND approved = 1
            ORDER BY created_at DESC
            "#,
        )
        .bind(village_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(VillageBundle {
            village,
            area,
            stories,
            photos,
            foods,
            specialties,
        }))
    }

    // ---- debug ----

    /// Full wipe, children before parents. Debug use only.
    pub async fn clear_all(&self) -> Result<(), sqlx::Error> {
        for table in [
            "stories",
            "photos",
            "foods",
            "specialties",
            "users",
            "villages",
            "pincodes",
        ] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}
