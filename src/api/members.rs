//! Member API endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::{ApiResult, Confirmation};
use crate::errors::AppError;
use crate::models::{Member, MemberPatch, NewMember};
use crate::service::ImageUpload;
use crate::AppState;

/// GET /api/members - List all members, newest first.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<Member>>> {
    let members = state.members.list().await?;
    Ok(Json(members))
}

/// GET /api/members/:id - Get a single member.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Member>> {
    let member = state.members.get(&id).await?;
    Ok(Json(member))
}

/// POST /api/members - Create a new member from a multipart form.
pub async fn create_member(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let form = read_member_form(multipart).await?;

    let new = NewMember {
        name: form.name.unwrap_or_default(),
        role: form.role.unwrap_or_default(),
        email: form.email.unwrap_or_default(),
        phone: form.phone,
        specialization: form.specialization,
        join_date: form.join_date,
        bio: form.bio,
    };

    let member = state.members.create(new, form.image).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/members/:id - Update a member from a multipart form.
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<Member>> {
    let form = read_member_form(multipart).await?;

    let patch = MemberPatch {
        name: form.name,
        role: form.role,
        email: form.email,
        phone: form.phone,
        specialization: form.specialization,
        join_date: form.join_date,
        bio: form.bio,
    };

    let member = state.members.update(&id, patch, form.image).await?;
    Ok(Json(member))
}

/// DELETE /api/members/:id - Delete a member and its image.
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Confirmation>> {
    state.members.delete(&id).await?;
    Ok(Json(Confirmation::new("Member deleted successfully")))
}

/// Fields decoded from the member multipart form.
#[derive(Debug, Default)]
struct MemberForm {
    name: Option<String>,
    role: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    specialization: Option<String>,
    join_date: Option<NaiveDate>,
    bio: Option<String>,
    image: Option<ImageUpload>,
}

/// Drain the multipart stream into a MemberForm. Unknown fields are ignored;
/// empty optional fields are treated as absent.
async fn read_member_form(mut multipart: Multipart) -> Result<MemberForm, AppError> {
    let mut form = MemberForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" {
            let original_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await?.to_vec();

            form.image = Some(ImageUpload {
                field_name: name,
                original_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "name" => form.name = Some(value),
            "role" => form.role = Some(value),
            "email" => form.email = Some(value),
            "phone" => form.phone = non_empty(value),
            "specialization" => form.specialization = non_empty(value),
            "joinDate" => {
                if let Some(value) = non_empty(value) {
                    form.join_date = Some(parse_join_date(&value)?);
                }
            }
            "bio" => form.bio = non_empty(value),
            _ => {}
        }
    }

    Ok(form)
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_join_date(value: &str) -> Result<NaiveDate, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid joinDate: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_date() {
        assert_eq!(
            parse_join_date("2024-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
        );
        assert!(parse_join_date("September 1st").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }
}
