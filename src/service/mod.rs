//! Member lifecycle service.
//!
//! Orchestrates the record store and the asset store so that create, update
//! and delete appear atomic to callers, even though the underlying record
//! and file mutations are two separate steps with no shared transaction.
//! If the record write fails after a file was stored, the file is left
//! behind as an orphan; no compensation runs.

use validator::Validate;

use crate::assets::AssetStore;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{Member, MemberPatch, NewMember};

/// An uploaded image, decoded from the multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Multipart field the file arrived under
    pub field_name: String,
    /// Client-supplied filename, used only for its extension
    pub original_name: String,
    /// Declared content type
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Service binding record-store and asset-store mutations into logical
/// member operations.
#[derive(Clone)]
pub struct MemberService {
    repo: Repository,
    assets: AssetStore,
}

impl MemberService {
    pub fn new(repo: Repository, assets: AssetStore) -> Self {
        Self { repo, assets }
    }

    /// List all members, newest-created first.
    pub async fn list(&self) -> Result<Vec<Member>, AppError> {
        self.repo.list_members().await
    }

    /// Get a single member.
    pub async fn get(&self, id: &str) -> Result<Member, AppError> {
        self.repo
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    /// Create a member, storing the uploaded image first when one is supplied.
    pub async fn create(
        &self,
        new: NewMember,
        upload: Option<ImageUpload>,
    ) -> Result<Member, AppError> {
        new.validate()?;

        let image = match upload {
            Some(upload) => Some(self.store_upload(&upload).await?),
            None => None,
        };

        // A failed insert leaves the just-stored file orphaned on disk.
        self.repo.create_member(&new, image).await
    }

    /// Update a member. With an upload: store the new file, delete the old
    /// one, then write the record. Without one, the image is untouched.
    pub async fn update(
        &self,
        id: &str,
        patch: MemberPatch,
        upload: Option<ImageUpload>,
    ) -> Result<Member, AppError> {
        patch.validate()?;

        let existing = self.get(id).await?;

        let image = match upload {
            Some(upload) => {
                let new_path = self.store_upload(&upload).await?;
                if let Some(old_path) = &existing.image {
                    self.assets.delete(old_path).await?;
                }
                Some(new_path)
            }
            None => None,
        };

        self.repo.update_member(id, &patch, image).await
    }

    /// Delete a member and its associated image file, if any.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let existing = self.get(id).await?;

        if let Some(image) = &existing.image {
            self.assets.delete(image).await?;
        }

        self.repo.delete_member(id).await
    }

    async fn store_upload(&self, upload: &ImageUpload) -> Result<String, AppError> {
        self.assets
            .store(
                &upload.field_name,
                &upload.original_name,
                &upload.content_type,
                &upload.data,
            )
            .await
    }
}
