//! Database repository for member CRUD operations.
//!
//! Uses prepared statements; email uniqueness is enforced by the UNIQUE
//! constraint on the members table, not by application-level checks.

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Member, MemberPatch, NewMember};

/// Database repository for all member data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all members, newest-created first. Ties are broken by insertion order.
    pub async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, role, email, phone, specialization, join_date, bio, image, created_at, updated_at \
             FROM members ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| member_from_row(&row)).collect())
    }

    /// Get a member by ID.
    pub async fn get_member(&self, id: &str) -> Result<Option<Member>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, role, email, phone, specialization, join_date, bio, image, created_at, updated_at \
             FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(member_from_row))
    }

    /// Create a new member. `image` is the already-stored asset path, if any.
    pub async fn create_member(
        &self,
        new: &NewMember,
        image: Option<String>,
    ) -> Result<Member, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO members (id, name, role, email, phone, specialization, join_date, bio, image, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.role)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.specialization)
        .bind(new.join_date)
        .bind(&new.bio)
        .bind(&image)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &new.email))?;

        Ok(Member {
            id,
            name: new.name.clone(),
            role: new.role.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            specialization: new.specialization.clone(),
            join_date: new.join_date,
            bio: new.bio.clone(),
            image,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a member with a partial merge: only supplied fields change.
    /// `image = None` leaves the stored path untouched.
    pub async fn update_member(
        &self,
        id: &str,
        patch: &MemberPatch,
        image: Option<String>,
    ) -> Result<Member, AppError> {
        let existing = self
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        let now = Utc::now().to_rfc3339();

        let name = patch.name.clone().unwrap_or(existing.name);
        let role = patch.role.clone().unwrap_or(existing.role);
        let email = patch.email.clone().unwrap_or(existing.email);
        let phone = patch.phone.clone().or(existing.phone);
        let specialization = patch.specialization.clone().or(existing.specialization);
        let join_date = patch.join_date.or(existing.join_date);
        let bio = patch.bio.clone().or(existing.bio);
        let image = image.or(existing.image);

        sqlx::query(
            "UPDATE members SET name = ?, role = ?, email = ?, phone = ?, specialization = ?, \
             join_date = ?, bio = ?, image = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&name)
        .bind(&role)
        .bind(&email)
        .bind(&phone)
        .bind(&specialization)
        .bind(join_date)
        .bind(&bio)
        .bind(&image)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &email))?;

        Ok(Member {
            id: id.to_string(),
            name,
            role,
            email,
            phone,
            specialization,
            join_date,
            bio,
            image,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a member.
    pub async fn delete_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        Ok(())
    }
}

/// Map a UNIQUE constraint violation on email to a duplicate error.
fn map_unique_violation(err: sqlx::Error, email: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::DuplicateEmail(format!(
                "A member with email {} already exists",
                email
            ));
        }
    }
    err.into()
}

/// Convert a database row into a Member.
fn member_from_row(row: &SqliteRow) -> Member {
    Member {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        email: row.get("email"),
        phone: row.get("phone"),
        specialization: row.get("specialization"),
        join_date: row.get::<Option<NaiveDate>, _>("join_date"),
        bio: row.get("bio"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
