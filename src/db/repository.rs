//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    format_file_size, BoardMember, BoardMemberType, CategoryCount, CreateBoardMemberRequest,
    CreateStaffMemberRequest, CreateVacancyRequest, Document, DocumentCategory, GalleryCategory,
    GalleryImage, GalleryStats, NewDocument, NewGalleryImage, RoleReassignment, RoleUpdateResult,
    StaffMember, UpdateBoardMemberRequest, UpdateDocumentRequest, UpdateImageRequest,
    UpdateStaffMemberRequest, UpdateVacancyRequest, Vacancy,
};

const DOCUMENT_COLUMNS: &str = "id, title, description, category, policy_slug, file_url, \
     file_name, file_size, tags, is_published, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, title, description, category, file_url, thumbnail_url, \
     width, height, file_size, tags, author, is_published, created_at, updated_at";

const VACANCY_COLUMNS: &str = "id, title, department, employment_type, description, \
     requirements, responsibilities, qualifications, closing_date, is_published, is_urgent, \
     created_at, updated_at";

/// Database repository for all content operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== DOCUMENT OPERATIONS ====================

    /// List documents, optionally category-scoped. Public callers exclude drafts.
    pub async fn list_documents(
        &self,
        category: Option<DocumentCategory>,
        include_unpublished: bool,
    ) -> Result<Vec<Document>, AppError> {
        let mut sql = format!("SELECT {} FROM documents", DOCUMENT_COLUMNS);
        let mut clauses: Vec<&str> = Vec::new();
        if !include_unpublished {
            clauses.push("is_published = 1");
        }
        if category.is_some() {
            clauses.push("category = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY title");

        let mut query = sqlx::query(&sql);
        if let Some(category) = category {
            query = query.bind(category.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(document_from_row).collect())
    }

    /// Get a document by ID.
    pub async fn get_document(&self, id: &str) -> Result<Option<Document>, AppError> {
        let sql = format!("SELECT {} FROM documents WHERE id = ?", DOCUMENT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(document_from_row))
    }

    /// Create a new document record for an uploaded file.
    pub async fn create_document(&self, new: &NewDocument) -> Result<Document, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tags_json = new
            .tags
            .as_ref()
            .map(|t| serde_json::to_string(t).unwrap_or_default());

        sqlx::query(
            "INSERT INTO documents (id, title, description, category, policy_slug, file_url, file_name, file_size, tags, is_published, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.category.as_str())
        .bind(&new.policy_slug)
        .bind(&new.file_url)
        .bind(&new.file_name)
        .bind(new.file_size)
        .bind(&tags_json)
        .bind(new.is_published as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Document {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            category: new.category,
            policy_slug: new.policy_slug.clone(),
            file_url: new.file_url.clone(),
            file_name: new.file_name.clone(),
            file_size: new.file_size,
            file_size_display: format_file_size(new.file_size),
            tags: new.tags.clone(),
            is_published: new.is_published,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a document's metadata. Last write wins.
    pub async fn update_document(
        &self,
        id: &str,
        request: &UpdateDocumentRequest,
    ) -> Result<Document, AppError> {
        let existing = self
            .get_document(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let description = request.description.clone().or(existing.description.clone());
        let category = request.category.unwrap_or(existing.category);
        let policy_slug = request.policy_slug.clone().or(existing.policy_slug.clone());
        let tags = request.tags.clone().or(existing.tags.clone());
        let is_published = request.is_published.unwrap_or(existing.is_published);
        let tags_json = tags
            .as_ref()
            .map(|t| serde_json::to_string(t).unwrap_or_default());

        sqlx::query(
            "UPDATE documents SET title = ?, description = ?, category = ?, policy_slug = ?, tags = ?, is_published = ?, updated_at = ? WHERE id = ?"
        )
        .bind(title)
        .bind(&description)
        .bind(category.as_str())
        .bind(&policy_slug)
        .bind(&tags_json)
        .bind(is_published as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Document {
            id: id.to_string(),
            title: title.clone(),
            description,
            category,
            policy_slug,
            file_url: existing.file_url,
            file_name: existing.file_name,
            file_size: existing.file_size,
            file_size_display: format_file_size(existing.file_size),
            tags,
            is_published,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a document.
    pub async fn delete_document(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Document {} not found", id)));
        }

        Ok(())
    }

    // ==================== GALLERY OPERATIONS ====================

    /// List gallery images, newest first, optionally category-scoped.
    pub async fn list_images(
        &self,
        category: Option<GalleryCategory>,
        include_unpublished: bool,
    ) -> Result<Vec<GalleryImage>, AppError> {
        let mut sql = format!("SELECT {} FROM gallery_images", IMAGE_COLUMNS);
        let mut clauses: Vec<&str> = Vec::new();
        if !include_unpublished {
            clauses.push("is_published = 1");
        }
        if category.is_some() {
            clauses.push("category = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query(&sql);
        if let Some(category) = category {
            query = query.bind(category.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(image_from_row).collect())
    }

    /// Get a gallery image by ID.
    pub async fn get_image(&self, id: &str) -> Result<Option<GalleryImage>, AppError> {
        let sql = format!("SELECT {} FROM gallery_images WHERE id = ?", IMAGE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(image_from_row))
    }

    /// Create a new gallery image record for an uploaded file.
    pub async fn create_image(&self, new: &NewGalleryImage) -> Result<GalleryImage, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tags_json = new
            .tags
            .as_ref()
            .map(|t| serde_json::to_string(t).unwrap_or_default());

        sqlx::query(
            "INSERT INTO gallery_images (id, title, description, category, file_url, thumbnail_url, width, height, file_size, tags, author, is_published, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.category.as_str())
        .bind(&new.file_url)
        .bind(&new.thumbnail_url)
        .bind(new.width)
        .bind(new.height)
        .bind(new.file_size)
        .bind(&tags_json)
        .bind(&new.author)
        .bind(new.is_published as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(GalleryImage {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            category: new.category,
            file_url: new.file_url.clone(),
            thumbnail_url: new.thumbnail_url.clone(),
            width: new.width,
            height: new.height,
            file_size: new.file_size,
            file_size_display: format_file_size(new.file_size),
            tags: new.tags.clone(),
            author: new.author.clone(),
            is_published: new.is_published,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a gallery image's metadata. Last write wins.
    pub async fn update_image(
        &self,
        id: &str,
        request: &UpdateImageRequest,
    ) -> Result<GalleryImage, AppError> {
        let existing = self
            .get_image(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Image {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let description = request.description.clone().or(existing.description.clone());
        let category = request.category.unwrap_or(existing.category);
        let thumbnail_url = request
            .thumbnail_url
            .clone()
            .or(existing.thumbnail_url.clone());
        let width = request.width.or(existing.width);
        let height = request.height.or(existing.height);
        let tags = request.tags.clone().or(existing.tags.clone());
        let author = request.author.clone().or(existing.author.clone());
        let is_published = request.is_published.unwrap_or(existing.is_published);
        let tags_json = tags
            .as_ref()
            .map(|t| serde_json::to_string(t).unwrap_or_default());

        sqlx::query(
            "UPDATE gallery_images SET title = ?, description = ?, category = ?, thumbnail_url = ?, width = ?, height = ?, tags = ?, author = ?, is_published = ?, updated_at = ? WHERE id = ?"
        )
        .bind(title)
        .bind(&description)
        .bind(category.as_str())
        .bind(&thumbnail_url)
        .bind(width)
        .bind(height)
        .bind(&tags_json)
        .bind(&author)
        .bind(is_published as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(GalleryImage {
            id: id.to_string(),
            title: title.clone(),
            description,
            category,
            file_url: existing.file_url,
            thumbnail_url,
            width,
            height,
            file_size: existing.file_size,
            file_size_display: format_file_size(existing.file_size),
            tags,
            author,
            is_published,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Toggle publication of a gallery image.
    pub async fn set_image_published(
        &self,
        id: &str,
        is_published: bool,
    ) -> Result<GalleryImage, AppError> {
        let mut existing = self
            .get_image(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Image {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        sqlx::query("UPDATE gallery_images SET is_published = ?, updated_at = ? WHERE id = ?")
            .bind(is_published as i32)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        existing.is_published = is_published;
        existing.updated_at = now;
        Ok(existing)
    }

    /// Delete a gallery image.
    pub async fn delete_image(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Image {} not found", id)));
        }

        Ok(())
    }

    /// Aggregate per-category image counts.
    pub async fn gallery_stats(&self) -> Result<GalleryStats, AppError> {
        let rows = sqlx::query(
            "SELECT category, COUNT(*) AS total, COUNT(CASE WHEN is_published = 1 THEN 1 END) AS published FROM gallery_images GROUP BY category ORDER BY category"
        )
        .fetch_all(&self.pool)
        .await?;

        let mut total = 0i64;
        let mut published = 0i64;
        let mut by_category = Vec::new();

        for row in rows {
            let category_str: String = row.get("category");
            let category_total: i64 = row.get("total");
            let category_published: i64 = row.get("published");

            total += category_total;
            published += category_published;
            by_category.push(CategoryCount {
                category: GalleryCategory::from_str(&category_str)
                    .unwrap_or(GalleryCategory::Other),
                total: category_total,
                published: category_published,
            });
        }

        Ok(GalleryStats {
            total,
            published,
            by_category,
        })
    }

    // ==================== BOARD MEMBER OPERATIONS ====================

    /// List all board members in display order.
    pub async fn list_board_members(&self) -> Result<Vec<BoardMember>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, role, member_type, email, phone, bio, display_order, created_at, updated_at FROM board_members ORDER BY display_order, name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(board_member_from_row).collect())
    }

    /// Get a board member by ID.
    pub async fn get_board_member(&self, id: &str) -> Result<Option<BoardMember>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, role, member_type, email, phone, bio, display_order, created_at, updated_at FROM board_members WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(board_member_from_row))
    }

    /// Create a new board member.
    pub async fn create_board_member(
        &self,
        request: &CreateBoardMemberRequest,
    ) -> Result<BoardMember, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO board_members (id, name, role, member_type, email, phone, bio, display_order, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.role)
        .bind(request.member_type.as_str())
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.bio)
        .bind(request.display_order)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(BoardMember {
            id,
            name: request.name.clone(),
            role: request.role.clone(),
            member_type: request.member_type,
            email: request.email.clone(),
            phone: request.phone.clone(),
            bio: request.bio.clone(),
            display_order: request.display_order,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a board member. Last write wins.
    pub async fn update_board_member(
        &self,
        id: &str,
        request: &UpdateBoardMemberRequest,
    ) -> Result<BoardMember, AppError> {
        let existing = self
            .get_board_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Board member {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let role = request.role.as_ref().unwrap_or(&existing.role);
        let member_type = request.member_type.unwrap_or(existing.member_type);
        let email = request.email.clone().or(existing.email.clone());
        let phone = request.phone.clone().or(existing.phone.clone());
        let bio = request.bio.clone().or(existing.bio.clone());
        let display_order = request.display_order.unwrap_or(existing.display_order);

        sqlx::query(
            "UPDATE board_members SET name = ?, role = ?, member_type = ?, email = ?, phone = ?, bio = ?, display_order = ?, updated_at = ? WHERE id = ?"
        )
        .bind(name)
        .bind(role)
        .bind(member_type.as_str())
        .bind(&email)
        .bind(&phone)
        .bind(&bio)
        .bind(display_order)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(BoardMember {
            id: id.to_string(),
            name: name.clone(),
            role: role.clone(),
            member_type,
            email,
            phone,
            bio,
            display_order,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a board member.
    pub async fn delete_board_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM board_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Board member {} not found", id)));
        }

        Ok(())
    }

    // ==================== VACANCY OPERATIONS ====================

    /// List vacancies, newest first. Public callers exclude drafts.
    pub async fn list_vacancies(
        &self,
        include_unpublished: bool,
    ) -> Result<Vec<Vacancy>, AppError> {
        let mut sql = format!("SELECT {} FROM vacancies", VACANCY_COLUMNS);
        if !include_unpublished {
            sql.push_str(" WHERE is_published = 1");
        }
        sql.push_str(" ORDER BY is_urgent DESC, created_at DESC");

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(vacancy_from_row).collect())
    }

    /// Get a vacancy by ID.
    pub async fn get_vacancy(&self, id: &str) -> Result<Option<Vacancy>, AppError> {
        let sql = format!("SELECT {} FROM vacancies WHERE id = ?", VACANCY_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(vacancy_from_row))
    }

    /// Create a new vacancy.
    pub async fn create_vacancy(
        &self,
        request: &CreateVacancyRequest,
    ) -> Result<Vacancy, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let requirements_json = serde_json::to_string(&request.requirements).unwrap_or_default();
        let responsibilities_json =
            serde_json::to_string(&request.responsibilities).unwrap_or_default();
        let qualifications_json =
            serde_json::to_string(&request.qualifications).unwrap_or_default();

        sqlx::query(
            "INSERT INTO vacancies (id, title, department, employment_type, description, requirements, responsibilities, qualifications, closing_date, is_published, is_urgent, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.department)
        .bind(&request.employment_type)
        .bind(&request.description)
        .bind(&requirements_json)
        .bind(&responsibilities_json)
        .bind(&qualifications_json)
        .bind(&request.closing_date)
        .bind(request.is_published as i32)
        .bind(request.is_urgent as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Vacancy {
            id,
            title: request.title.clone(),
            department: request.department.clone(),
            employment_type: request.employment_type.clone(),
            description: request.description.clone(),
            requirements: request.requirements.clone(),
            responsibilities: request.responsibilities.clone(),
            qualifications: request.qualifications.clone(),
            is_open: Vacancy::closing_date_open(request.closing_date.as_deref(), Utc::now()),
            closing_date: request.closing_date.clone(),
            is_published: request.is_published,
            is_urgent: request.is_urgent,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a vacancy. Last write wins.
    pub async fn update_vacancy(
        &self,
        id: &str,
        request: &UpdateVacancyRequest,
    ) -> Result<Vacancy, AppError> {
        let existing = self
            .get_vacancy(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vacancy {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let department = request.department.as_ref().unwrap_or(&existing.department);
        let employment_type = request
            .employment_type
            .as_ref()
            .unwrap_or(&existing.employment_type);
        let description = request
            .description
            .as_ref()
            .unwrap_or(&existing.description);
        let requirements = request
            .requirements
            .clone()
            .unwrap_or(existing.requirements.clone());
        let responsibilities = request
            .responsibilities
            .clone()
            .unwrap_or(existing.responsibilities.clone());
        let qualifications = request
            .qualifications
            .clone()
            .unwrap_or(existing.qualifications.clone());
        let closing_date = request.closing_date.clone().or(existing.closing_date.clone());
        let is_published = request.is_published.unwrap_or(existing.is_published);
        let is_urgent = request.is_urgent.unwrap_or(existing.is_urgent);

        let requirements_json = serde_json::to_string(&requirements).unwrap_or_default();
        let responsibilities_json = serde_json::to_string(&responsibilities).unwrap_or_default();
        let qualifications_json = serde_json::to_string(&qualifications).unwrap_or_default();

        sqlx::query(
            "UPDATE vacancies SET title = ?, department = ?, employment_type = ?, description = ?, requirements = ?, responsibilities = ?, qualifications = ?, closing_date = ?, is_published = ?, is_urgent = ?, updated_at = ? WHERE id = ?"
        )
        .bind(title)
        .bind(department)
        .bind(employment_type)
        .bind(description)
        .bind(&requirements_json)
        .bind(&responsibilities_json)
        .bind(&qualifications_json)
        .bind(&closing_date)
        .bind(is_published as i32)
        .bind(is_urgent as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Vacancy {
            id: id.to_string(),
            title: title.clone(),
            department: department.clone(),
            employment_type: employment_type.clone(),
            description: description.clone(),
            requirements,
            responsibilities,
            qualifications,
            is_open: Vacancy::closing_date_open(closing_date.as_deref(), Utc::now()),
            closing_date,
            is_published,
            is_urgent,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a vacancy.
    pub async fn delete_vacancy(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vacancies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vacancy {} not found", id)));
        }

        Ok(())
    }

    // ==================== STAFF OPERATIONS ====================

    /// List all staff members.
    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, role, grade, created_at, updated_at FROM staff_members ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(staff_member_from_row).collect())
    }

    /// Get a staff member by ID.
    pub async fn get_staff_member(&self, id: &str) -> Result<Option<StaffMember>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, role, grade, created_at, updated_at FROM staff_members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(staff_member_from_row))
    }

    /// Create a new staff member.
    pub async fn create_staff_member(
        &self,
        request: &CreateStaffMemberRequest,
    ) -> Result<StaffMember, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO staff_members (id, name, role, grade, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.role)
        .bind(&request.grade)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(StaffMember {
            id,
            name: request.name.clone(),
            role: request.role.clone(),
            grade: request.grade.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a staff member. Last write wins.
    pub async fn update_staff_member(
        &self,
        id: &str,
        request: &UpdateStaffMemberRequest,
    ) -> Result<StaffMember, AppError> {
        let existing = self
            .get_staff_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Staff member {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let role = request.role.as_ref().unwrap_or(&existing.role);
        let grade = request.grade.clone().or(existing.grade.clone());

        sqlx::query(
            "UPDATE staff_members SET name = ?, role = ?, grade = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(role)
        .bind(&grade)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(StaffMember {
            id: id.to_string(),
            name: name.clone(),
            role: role.clone(),
            grade,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a staff member.
    pub async fn delete_staff_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM staff_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Staff member {} not found", id)));
        }

        Ok(())
    }

    /// Apply bulk role reassignments by name substring, atomically.
    pub async fn bulk_update_staff_roles(
        &self,
        updates: &[RoleReassignment],
    ) -> Result<Vec<RoleUpdateResult>, AppError> {
        let mut results = Vec::new();

        // Use a transaction for atomicity
        let mut tx = self.pool.begin().await?;

        for rule in updates {
            let now = Utc::now().to_rfc3339();
            let pattern = format!("%{}%", rule.name_contains);

            let result = sqlx::query(
                "UPDATE staff_members SET role = ?, grade = COALESCE(?, grade), updated_at = ? WHERE name LIKE ?"
            )
            .bind(&rule.role)
            .bind(&rule.grade)
            .bind(&now)
            .bind(&pattern)
            .execute(&mut *tx)
            .await?;

            results.push(RoleUpdateResult {
                name_contains: rule.name_contains.clone(),
                matched: result.rows_affected(),
            });
        }

        tx.commit().await?;

        Ok(results)
    }
}

// Helper functions for row conversion

fn document_from_row(row: &sqlx::sqlite::SqliteRow) -> Document {
    let is_published: i32 = row.get("is_published");
    let tags_str: Option<String> = row.get("tags");
    let category_str: String = row.get("category");
    let file_size: i64 = row.get("file_size");

    Document {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: DocumentCategory::from_str(&category_str).unwrap_or(DocumentCategory::Other),
        policy_slug: row.get("policy_slug"),
        file_url: row.get("file_url"),
        file_name: row.get("file_name"),
        file_size,
        file_size_display: format_file_size(file_size),
        tags: tags_str.map(|s| parse_json_array(&s)),
        is_published: is_published != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn image_from_row(row: &sqlx::sqlite::SqliteRow) -> GalleryImage {
    let is_published: i32 = row.get("is_published");
    let tags_str: Option<String> = row.get("tags");
    let category_str: String = row.get("category");
    let file_size: i64 = row.get("file_size");

    GalleryImage {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: GalleryCategory::from_str(&category_str).unwrap_or(GalleryCategory::Other),
        file_url: row.get("file_url"),
        thumbnail_url: row.get("thumbnail_url"),
        width: row.get("width"),
        height: row.get("height"),
        file_size,
        file_size_display: format_file_size(file_size),
        tags: tags_str.map(|s| parse_json_array(&s)),
        author: row.get("author"),
        is_published: is_published != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn board_member_from_row(row: &sqlx::sqlite::SqliteRow) -> BoardMember {
    let member_type_str: String = row.get("member_type");

    BoardMember {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        member_type: BoardMemberType::from_str(&member_type_str)
            .unwrap_or(BoardMemberType::Member),
        email: row.get("email"),
        phone: row.get("phone"),
        bio: row.get("bio"),
        display_order: row.get("display_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn vacancy_from_row(row: &sqlx::sqlite::SqliteRow) -> Vacancy {
    let is_published: i32 = row.get("is_published");
    let is_urgent: i32 = row.get("is_urgent");
    let requirements_str: Option<String> = row.get("requirements");
    let responsibilities_str: Option<String> = row.get("responsibilities");
    let qualifications_str: Option<String> = row.get("qualifications");
    let closing_date: Option<String> = row.get("closing_date");

    Vacancy {
        id: row.get("id"),
        title: row.get("title"),
        department: row.get("department"),
        employment_type: row.get("employment_type"),
        description: row.get("description"),
        requirements: requirements_str
            .map(|s| parse_json_array(&s))
            .unwrap_or_default(),
        responsibilities: responsibilities_str
            .map(|s| parse_json_array(&s))
            .unwrap_or_default(),
        qualifications: qualifications_str
            .map(|s| parse_json_array(&s))
            .unwrap_or_default(),
        is_open: Vacancy::closing_date_open(closing_date.as_deref(), Utc::now()),
        closing_date,
        is_published: is_published != 0,
        is_urgent: is_urgent != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn staff_member_from_row(row: &sqlx::sqlite::SqliteRow) -> StaffMember {
    StaffMember {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        grade: row.get("grade"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
