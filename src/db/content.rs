//! Repository operations for credentials, text blocks, and link lists.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};

use super::Repository;
use crate::errors::AppError;
use crate::models::{
    LinkEntry, LinkKind, NewTextBlock, Patch, TextBlock, UpdateTextBlockRequest, User,
};

impl Repository {
    // ==================== USER OPERATIONS ====================

    /// Store a new credential. Fails with a duplicate error if the login is taken.
    pub async fn create_user(&self, login: &str, password_hash: &str) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, login, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(login)
        .bind(password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id,
            login: login.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    /// Find a credential by login.
    /// Create a user only while the users table is empty.
    ///
    /// Returns `None` when another account already exists. The check and the
    /// insert are one statement, so two racing first signups cannot both win.
    pub async fn create_first_user(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (id, login, password_hash, created_at) \
             SELECT ?, ?, ?, ? WHERE NOT EXISTS (SELECT 1 FROM users)",
        )
        .bind(&id)
        .bind(login)
        .bind(password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(User {
            id,
            login: login.to_string(),
            password_hash: password_hash.to_string(),
        }))
    }

    pub async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, login, password_hash FROM users WHERE login = ?")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            login: row.get("login"),
            password_hash: row.get("password_hash"),
        }))
    }

    // ==================== TEXT BLOCK OPERATIONS ====================

    /// List all text blocks in creation order.
    pub async fn list_text_blocks(&self) -> Result<Vec<TextBlock>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, subtitle, content FROM text_blocks ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(text_block_from_row).collect())
    }

    /// Create a text block.
    pub async fn create_text_block(&self, block: &NewTextBlock) -> Result<TextBlock, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let title = Patch::from_field(block.title.as_deref()).apply(None);
        let subtitle = Patch::from_field(block.subtitle.as_deref()).apply(None);
        let content = Patch::from_field(block.content.as_deref()).apply(None);

        sqlx::query(
            "INSERT INTO text_blocks (id, title, subtitle, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&title)
        .bind(&subtitle)
        .bind(&content)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(TextBlock {
            id,
            title,
            subtitle,
            content,
        })
    }

    /// Update a text block. Absent fields are kept, empty ones cleared.
    pub async fn update_text_block(
        &self,
        request: &UpdateTextBlockRequest,
    ) -> Result<TextBlock, AppError> {
        let title = Patch::from_field(request.title.as_deref());
        let subtitle = Patch::from_field(request.subtitle.as_deref());
        let content = Patch::from_field(request.content.as_deref());

        // Each column keeps its stored value unless the request touches it.
        let row = sqlx::query(
            r#"
            UPDATE text_blocks SET
                title = CASE WHEN ? THEN title ELSE ? END,
                subtitle = CASE WHEN ? THEN subtitle ELSE ? END,
                content = CASE WHEN ? THEN content ELSE ? END
            WHERE id = ?
            RETURNING id, title, subtitle, content
            "#,
        )
        .bind(title.is_keep())
        .bind(title.value().map(String::as_str))
        .bind(subtitle.is_keep())
        .bind(subtitle.value().map(String::as_str))
        .bind(content.is_keep())
        .bind(content.value().map(String::as_str))
        .bind(&request.id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(text_block_from_row)
            .ok_or_else(|| AppError::NotFound(format!("Text {} not found", request.id)))
    }

    // ==================== LINK LIST OPERATIONS ====================

    /// List the entries of one link list in creation order.
    pub async fn list_links(&self, kind: LinkKind) -> Result<Vec<LinkEntry>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT id, src FROM {} ORDER BY created_at, rowid",
            kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(link_from_row).collect())
    }

    /// Add an entry to a link list.
    pub async fn create_link(&self, kind: LinkKind, src: &str) -> Result<LinkEntry, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(&format!(
            "INSERT INTO {} (id, src, created_at) VALUES (?, ?, ?)",
            kind.table()
        ))
        .bind(&id)
        .bind(src)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(LinkEntry {
            id,
            src: src.to_string(),
        })
    }

    /// Remove an entry from a link list, returning the removed entry.
    pub async fn delete_link(&self, kind: LinkKind, id: &str) -> Result<LinkEntry, AppError> {
        let row = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = ? RETURNING id, src",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(link_from_row)
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.label(), id)))
    }
}

fn text_block_from_row(row: &SqliteRow) -> TextBlock {
    TextBlock {
        id: row.get("id"),
        title: row.get("title"),
        subtitle: row.get("subtitle"),
        content: row.get("content"),
    }
}

fn link_from_row(row: &SqliteRow) -> LinkEntry {
    LinkEntry {
        id: row.get("id"),
        src: row.get("src"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_database, sqlite_url};
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let url = sqlite_url(&dir.path().join("content.sqlite"));
        let pool = init_database(&url).await.expect("Failed to init DB");
        (Repository::new(pool), dir)
    }

    #[tokio::test]
    async fn test_duplicate_login_is_reported() {
        let (repo, _dir) = repo().await;
        repo.create_user("coach", "hash-1").await.unwrap();

        let err = repo.create_user("coach", "hash-2").await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(ref f) if f == &vec!["login".to_string()]));

        let user = repo.find_user_by_login("coach").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "hash-1");
        assert!(repo.find_user_by_login("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_first_user_only_while_table_empty() {
        let (repo, _dir) = repo().await;

        let first = repo.create_first_user("owner", "hash-1").await.unwrap();
        assert_eq!(first.map(|u| u.login).as_deref(), Some("owner"));

        assert!(repo.create_first_user("intruder", "hash-2").await.unwrap().is_none());
        assert!(repo.find_user_by_login("intruder").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_text_block_fields_are_trimmed_on_create() {
        let (repo, _dir) = repo().await;
        let block = repo
            .create_text_block(&NewTextBlock {
                title: Some("  About  ".to_string()),
                subtitle: Some(String::new()),
                content: Some("   ".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(block.title.as_deref(), Some("About"));
        assert_eq!(block.subtitle, None);
        assert_eq!(block.content, None);
        assert_eq!(repo.list_text_blocks().await.unwrap(), vec![block]);
    }

    #[tokio::test]
    async fn test_update_unknown_text_block() {
        let (repo, _dir) = repo().await;
        let err = repo
            .update_text_block(&UpdateTextBlockRequest {
                id: uuid::Uuid::new_v4().to_string(),
                title: Some("Ghost".to_string()),
                subtitle: None,
                content: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.list_text_blocks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_block_merge_policy() {
        let (repo, _dir) = repo().await;
        let block = repo
            .create_text_block(&NewTextBlock {
                title: Some("About".to_string()),
                subtitle: Some("Who we are".to_string()),
                content: Some("Founded in 2019".to_string()),
            })
            .await
            .unwrap();

        let updated = repo
            .update_text_block(&UpdateTextBlockRequest {
                id: block.id.clone(),
                title: Some("About us".to_string()),
                subtitle: Some(String::new()),
                content: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.title.as_deref(), Some("About us"));
        assert_eq!(updated.subtitle, None);
        assert_eq!(updated.content.as_deref(), Some("Founded in 2019"));

        let listed = repo.list_text_blocks().await.unwrap();
        assert_eq!(listed, vec![updated]);
    }

    #[tokio::test]
    async fn test_link_lists_are_independent() {
        let (repo, _dir) = repo().await;
        let image = repo.create_link(LinkKind::Image, "/img/banner.png").await.unwrap();
        repo.create_link(LinkKind::Partner, "/img/sponsor.png").await.unwrap();

        assert_eq!(repo.list_links(LinkKind::Image).await.unwrap(), vec![image.clone()]);
        assert_eq!(repo.list_links(LinkKind::Partner).await.unwrap().len(), 1);
        assert!(repo.list_links(LinkKind::Profile).await.unwrap().is_empty());

        let removed = repo.delete_link(LinkKind::Image, &image.id).await.unwrap();
        assert_eq!(removed, image);
        assert!(matches!(
            repo.delete_link(LinkKind::Image, &image.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
