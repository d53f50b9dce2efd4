//! Database repository for teams, players, and admins.
//!
//! Image blobs are written alongside their owning row and only read back by
//! the dedicated blob queries; list and detail queries never select the bytes.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Admin, AdminChanges, ImageMeta, NewAdmin, NewPlayer, NewTeam, Player, PlayerChanges,
    PlayerProfile, PlayerWithTeam, SocialLinks, StoredImage, Team, TeamChanges,
};

const TEAM_COLUMNS: &str = "id, name, route, photo_content_type, photo_original_name, \
     logo_content_type, logo_original_name, created_at";

const PLAYER_COLUMNS: &str = "id, name, title, description, photo_content_type, \
     photo_original_name, instagram, twitter, twitch, team_id, created_at";

const ADMIN_COLUMNS: &str = "id, name, title, description, photo_content_type, \
     photo_original_name, instagram, twitter, twitch, created_at";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pub(super) pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== TEAM OPERATIONS ====================

    /// List all teams.
    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let rows = sqlx::query(&format!("SELECT {} FROM teams ORDER BY id", TEAM_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    /// Get a team by its numeric id.
    pub async fn get_team(&self, id: i64) -> Result<Option<Team>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM teams WHERE id = ?", TEAM_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    /// Fetch every team whose id appears in `ids`, keyed by id.
    ///
    /// One round trip regardless of how many players reference each team.
    pub async fn teams_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Team>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut unique: Vec<i64> = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM teams WHERE id IN (", TEAM_COLUMNS));
        let mut separated = builder.separated(", ");
        for id in &unique {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows = builder.build().fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(team_from_row)
            .map(|team| (team.id, team))
            .collect())
    }

    /// Create a new team.
    pub async fn create_team(&self, team: &NewTeam) -> Result<Team, AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO teams (
                id, name, route,
                photo_data, photo_content_type, photo_original_name,
                logo_data, logo_content_type, logo_original_name,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.route)
        .bind(&team.photo.data)
        .bind(&team.photo.content_type)
        .bind(&team.photo.original_name)
        .bind(&team.game_logo.data)
        .bind(&team.game_logo.content_type)
        .bind(&team.game_logo.original_name)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!("Created team {} ({})", team.id, team.name);

        Ok(Team {
            id: team.id,
            name: team.name.clone(),
            route: team.route.clone(),
            photo: Some(team.photo.meta()),
            game_logo: Some(team.game_logo.meta()),
            created_at: now,
            foto_url: Team::photo_path(team.id),
            logo_url: Team::logo_path(team.id),
        })
    }

    /// Update a team. Absent fields and images are left unchanged.
    pub async fn update_team(&self, id: i64, changes: &TeamChanges) -> Result<Team, AppError> {
        let photo = changes.photo.as_ref();
        let logo = changes.game_logo.as_ref();

        let result = sqlx::query(
            r#"UPDATE teams SET
                name = COALESCE(?, name),
                route = COALESCE(?, route),
                photo_data = COALESCE(?, photo_data),
                photo_content_type = COALESCE(?, photo_content_type),
                photo_original_name = COALESCE(?, photo_original_name),
                logo_data = COALESCE(?, logo_data),
                logo_content_type = COALESCE(?, logo_content_type),
                logo_original_name = COALESCE(?, logo_original_name)
            WHERE id = ?"#,
        )
        .bind(&changes.name)
        .bind(&changes.route)
        .bind(photo.map(|p| &p.data))
        .bind(photo.map(|p| &p.content_type))
        .bind(photo.and_then(|p| p.original_name.as_ref()))
        .bind(logo.map(|l| &l.data))
        .bind(logo.map(|l| &l.content_type))
        .bind(logo.and_then(|l| l.original_name.as_ref()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }

        self.get_team(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    /// Delete a team that no player references.
    ///
    /// The reference check and the delete are one statement, so a player
    /// attached concurrently cannot be left pointing at a deleted team.
    pub async fn delete_team(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM teams WHERE id = ? AND NOT EXISTS (SELECT 1 FROM players WHERE team_id = ?)",
        )
        .bind(id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!("Deleted team {}", id);
            return Ok(());
        }

        if self.get_team(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }

        let players = self.count_players_in_team(id).await?;
        Err(AppError::Conflict(format!(
            "Team {} cannot be deleted: {} player(s) still reference it",
            id, players
        )))
    }

    /// Get a team's photo.
    pub async fn team_photo(&self, id: i64) -> Result<Option<StoredImage>, AppError> {
        let row = sqlx::query(
            "SELECT photo_data, photo_content_type, photo_original_name FROM teams WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().and_then(|r| image_from_row(r, "photo")))
    }

    /// Get a team's game logo.
    pub async fn team_logo(&self, id: i64) -> Result<Option<StoredImage>, AppError> {
        let row = sqlx::query(
            "SELECT logo_data, logo_content_type, logo_original_name FROM teams WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().and_then(|r| image_from_row(r, "logo")))
    }

    // ==================== PLAYER OPERATIONS ====================

    /// List all players in insertion order.
    pub async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM players ORDER BY created_at, rowid",
            PLAYER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    /// List all players with their team resolved.
    pub async fn list_players_with_teams(&self) -> Result<Vec<PlayerWithTeam>, AppError> {
        let players = self.list_players().await?;
        let team_ids: Vec<i64> = players.iter().map(|p| p.team_id).collect();
        let teams = self.teams_by_ids(&team_ids).await?;

        Ok(resolve_teams(players, &teams))
    }

    /// List the players of one team.
    pub async fn list_players_by_team(&self, team_id: i64) -> Result<Vec<Player>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM players WHERE team_id = ? ORDER BY created_at, rowid",
            PLAYER_COLUMNS
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    /// Get a player by ID.
    pub async fn get_player(&self, id: &str) -> Result<Option<Player>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM players WHERE id = ?", PLAYER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(player_from_row))
    }

    /// Get a player with its team resolved.
    pub async fn get_player_with_team(&self, id: &str) -> Result<Option<PlayerWithTeam>, AppError> {
        let Some(player) = self.get_player(id).await? else {
            return Ok(None);
        };
        let teams = self.teams_by_ids(&[player.team_id]).await?;

        Ok(resolve_teams(vec![player], &teams).pop())
    }

    async fn count_players_in_team(&self, team_id: i64) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM players WHERE team_id = ?")
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    /// Create a new player.
    pub async fn create_player(&self, player: &NewPlayer) -> Result<Player, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO players (
                id, name, title, description,
                photo_data, photo_content_type, photo_original_name,
                instagram, twitter, twitch, team_id, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&player.name)
        .bind(&player.title)
        .bind(&player.description)
        .bind(&player.photo.data)
        .bind(&player.photo.content_type)
        .bind(&player.photo.original_name)
        .bind(&player.socials.instagram)
        .bind(&player.socials.twitter)
        .bind(&player.socials.twitch)
        .bind(player.team_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!("Created player {} for team {}", id, player.team_id);

        Ok(Player {
            profile: PlayerProfile {
                foto_url: PlayerProfile::photo_path(&id),
                id,
                name: player.name.clone(),
                title: player.title.clone(),
                description: player.description.clone(),
                photo: Some(player.photo.meta()),
                socials: player.socials.clone(),
                created_at: now,
            },
            team_id: player.team_id,
        })
    }

    /// Update a player. The photo is replaced only when a new one was uploaded.
    pub async fn update_player(
        &self,
        id: &str,
        changes: PlayerChanges,
    ) -> Result<Player, AppError> {
        let existing = self
            .get_player(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", id)))?;

        let socials = changes.socials.apply(existing.profile.socials);
        let team_id = changes.team_id.unwrap_or(existing.team_id);
        let photo = changes.photo.as_ref();

        let result = sqlx::query(
            r#"UPDATE players SET
                name = ?, title = ?, description = ?,
                instagram = ?, twitter = ?, twitch = ?, team_id = ?,
                photo_data = COALESCE(?, photo_data),
                photo_content_type = COALESCE(?, photo_content_type),
                photo_original_name = COALESCE(?, photo_original_name)
            WHERE id = ?"#,
        )
        .bind(&changes.name)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&socials.instagram)
        .bind(&socials.twitter)
        .bind(&socials.twitch)
        .bind(team_id)
        .bind(photo.map(|p| &p.data))
        .bind(photo.map(|p| &p.content_type))
        .bind(photo.and_then(|p| p.original_name.as_ref()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Player {} not found", id)));
        }

        Ok(Player {
            profile: PlayerProfile {
                id: id.to_string(),
                name: changes.name,
                title: changes.title,
                description: changes.description,
                photo: changes.photo.map(|p| p.meta()).or(existing.profile.photo),
                socials,
                created_at: existing.profile.created_at,
                foto_url: existing.profile.foto_url,
            },
            team_id,
        })
    }

    /// Delete a player.
    pub async fn delete_player(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Player {} not found", id)));
        }

        Ok(())
    }

    /// Get a player's photo.
    pub async fn player_photo(&self, id: &str) -> Result<Option<StoredImage>, AppError> {
        let row = sqlx::query(
            "SELECT photo_data, photo_content_type, photo_original_name FROM players WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().and_then(|r| image_from_row(r, "photo")))
    }

    // ==================== ADMIN OPERATIONS ====================

    /// List all admins, newest first.
    pub async fn list_admins(&self) -> Result<Vec<Admin>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM admins ORDER BY created_at DESC, rowid DESC",
            ADMIN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(admin_from_row).collect())
    }

    /// Get an admin by ID.
    pub async fn get_admin(&self, id: &str) -> Result<Option<Admin>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM admins WHERE id = ?", ADMIN_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(admin_from_row))
    }

    /// Create a new admin.
    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<Admin, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let photo = admin.photo.as_ref();

        sqlx::query(
            r#"INSERT INTO admins (
                id, name, title, description,
                photo_data, photo_content_type, photo_original_name,
                instagram, twitter, twitch, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&admin.name)
        .bind(&admin.title)
        .bind(&admin.description)
        .bind(photo.map(|p| &p.data))
        .bind(photo.map(|p| &p.content_type))
        .bind(photo.and_then(|p| p.original_name.as_ref()))
        .bind(&admin.socials.instagram)
        .bind(&admin.socials.twitter)
        .bind(&admin.socials.twitch)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!("Created admin {}", id);

        Ok(Admin {
            foto_url: photo.map(|_| Admin::photo_path(&id)),
            id,
            name: admin.name.clone(),
            title: admin.title.clone(),
            description: admin.description.clone(),
            photo: photo.map(StoredImage::meta),
            socials: admin.socials.clone(),
            created_at: now,
        })
    }

    /// Update an admin. Absent fields are left unchanged.
    pub async fn update_admin(&self, id: &str, changes: AdminChanges) -> Result<Admin, AppError> {
        let existing = self
            .get_admin(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Admin {} not found", id)))?;

        let name = changes.name.unwrap_or(existing.name);
        let title = changes.title.unwrap_or(existing.title);
        let description = changes.description.unwrap_or(existing.description);
        let socials = changes.socials.apply(existing.socials);
        let photo = changes.photo.as_ref();

        let result = sqlx::query(
            r#"UPDATE admins SET
                name = ?, title = ?, description = ?,
                instagram = ?, twitter = ?, twitch = ?,
                photo_data = COALESCE(?, photo_data),
                photo_content_type = COALESCE(?, photo_content_type),
                photo_original_name = COALESCE(?, photo_original_name)
            WHERE id = ?"#,
        )
        .bind(&name)
        .bind(&title)
        .bind(&description)
        .bind(&socials.instagram)
        .bind(&socials.twitter)
        .bind(&socials.twitch)
        .bind(photo.map(|p| &p.data))
        .bind(photo.map(|p| &p.content_type))
        .bind(photo.and_then(|p| p.original_name.as_ref()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Admin {} not found", id)));
        }

        let photo = changes.photo.map(|p| p.meta()).or(existing.photo);
        Ok(Admin {
            id: id.to_string(),
            name,
            title,
            description,
            foto_url: photo.as_ref().map(|_| Admin::photo_path(id)),
            photo,
            socials,
            created_at: existing.created_at,
        })
    }

    /// Delete an admin.
    pub async fn delete_admin(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Admin {} not found", id)));
        }

        Ok(())
    }

    /// Get an admin's photo.
    ///
    /// The outer `Option` is `None` when the admin does not exist; the inner
    /// one is `None` when the admin has no photo.
    pub async fn admin_photo(&self, id: &str) -> Result<Option<Option<StoredImage>>, AppError> {
        let row = sqlx::query(
            "SELECT photo_data, photo_content_type, photo_original_name FROM admins WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(|r| image_from_row(r, "photo")))
    }
}

/// Attach each player's team, or `None` when its id matches no team.
pub fn resolve_teams(players: Vec<Player>, teams: &HashMap<i64, Team>) -> Vec<PlayerWithTeam> {
    players
        .into_iter()
        .map(|player| PlayerWithTeam {
            team: teams.get(&player.team_id).cloned(),
            profile: player.profile,
        })
        .collect()
}

// Helper functions for row conversion

fn meta_from_row(row: &SqliteRow, prefix: &str) -> Option<ImageMeta> {
    let content_type: Option<String> = row.get(format!("{}_content_type", prefix).as_str());
    content_type.map(|content_type| ImageMeta {
        content_type,
        original_name: row.get(format!("{}_original_name", prefix).as_str()),
    })
}

fn image_from_row(row: &SqliteRow, prefix: &str) -> Option<StoredImage> {
    let data: Option<Vec<u8>> = row.get(format!("{}_data", prefix).as_str());
    let meta = meta_from_row(row, prefix)?;
    data.map(|data| StoredImage {
        data,
        content_type: meta.content_type,
        original_name: meta.original_name,
    })
}

fn socials_from_row(row: &SqliteRow) -> SocialLinks {
    SocialLinks {
        instagram: row.get("instagram"),
        twitter: row.get("twitter"),
        twitch: row.get("twitch"),
    }
}

fn team_from_row(row: &SqliteRow) -> Team {
    let id: i64 = row.get("id");
    Team {
        id,
        name: row.get("name"),
        route: row.get("route"),
        photo: meta_from_row(row, "photo"),
        game_logo: meta_from_row(row, "logo"),
        created_at: row.get("created_at"),
        foto_url: Team::photo_path(id),
        logo_url: Team::logo_path(id),
    }
}

fn player_from_row(row: &SqliteRow) -> Player {
    let id: String = row.get("id");
    Player {
        profile: PlayerProfile {
            foto_url: PlayerProfile::photo_path(&id),
            id,
            name: row.get("name"),
            title: row.get("title"),
            description: row.get("description"),
            photo: meta_from_row(row, "photo"),
            socials: socials_from_row(row),
            created_at: row.get("created_at"),
        },
        team_id: row.get("team_id"),
    }
}

fn admin_from_row(row: &SqliteRow) -> Admin {
    let id: String = row.get("id");
    let photo = meta_from_row(row, "photo");
    Admin {
        foto_url: photo.as_ref().map(|_| Admin::photo_path(&id)),
        id,
        name: row.get("name"),
        title: row.get("title"),
        description: row.get("description"),
        photo,
        socials: socials_from_row(row),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_database, sqlite_url};
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let url = sqlite_url(&dir.path().join("repo.sqlite"));
        let pool = init_database(&url).await.expect("Failed to init DB");
        (Repository::new(pool), dir)
    }

    fn png(name: &str) -> StoredImage {
        StoredImage {
            data: vec![0x89, b'P', b'N', b'G'],
            content_type: "image/png".to_string(),
            original_name: Some(name.to_string()),
        }
    }

    fn new_team(id: i64, name: &str, route: &str) -> NewTeam {
        NewTeam {
            id,
            name: name.to_string(),
            route: route.to_string(),
            photo: png("team.png"),
            game_logo: png("logo.png"),
        }
    }

    fn new_player(name: &str, team_id: i64) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            title: "Captain".to_string(),
            description: "Shot caller".to_string(),
            photo: png("player.png"),
            socials: SocialLinks::default(),
            team_id,
        }
    }

    fn team(id: i64) -> Team {
        Team {
            id,
            name: format!("Team {}", id),
            route: format!("team-{}", id),
            photo: None,
            game_logo: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            foto_url: Team::photo_path(id),
            logo_url: Team::logo_path(id),
        }
    }

    fn player(id: &str, team_id: i64) -> Player {
        Player {
            profile: PlayerProfile {
                id: id.to_string(),
                name: id.to_string(),
                title: "Support".to_string(),
                description: "Wards".to_string(),
                photo: None,
                socials: SocialLinks::default(),
                created_at: "2024-01-01T00:00:00Z".to_string(),
                foto_url: PlayerProfile::photo_path(id),
            },
            team_id,
        }
    }

    #[test]
    fn test_resolve_teams_attaches_or_nulls() {
        let teams: HashMap<i64, Team> = [(1, team(1))].into_iter().collect();
        let resolved = resolve_teams(vec![player("a", 1), player("b", 2)], &teams);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].team.as_ref().map(|t| t.id), Some(1));
        assert!(resolved[1].team.is_none());
        assert_eq!(resolved[1].profile.id, "b");
    }

    #[test]
    fn test_resolve_teams_preserves_order() {
        let teams: HashMap<i64, Team> = [(1, team(1)), (2, team(2))].into_iter().collect();
        let resolved = resolve_teams(
            vec![player("x", 2), player("y", 1), player("z", 2)],
            &teams,
        );
        let ids: Vec<&str> = resolved.iter().map(|p| p.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[tokio::test]
    async fn test_teams_by_ids_batches_and_dedups() {
        let (repo, _dir) = repo().await;
        repo.create_team(&new_team(1, "Alpha", "alpha")).await.unwrap();
        repo.create_team(&new_team(2, "Bravo", "bravo")).await.unwrap();

        let map = repo.teams_by_ids(&[2, 2, 1, 99]).await.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1].name, "Alpha");
        assert_eq!(map[&2].route, "bravo");

        assert!(repo.teams_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_team_fields_are_named() {
        let (repo, _dir) = repo().await;
        repo.create_team(&new_team(1, "Alpha", "alpha")).await.unwrap();

        let err = repo.create_team(&new_team(1, "Other", "other")).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(ref f) if f == &vec!["id".to_string()]));

        let err = repo.create_team(&new_team(2, "Alpha", "other")).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(ref f) if f == &vec!["nome".to_string()]));

        let err = repo.create_team(&new_team(3, "Third", "alpha")).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(ref f) if f == &vec!["rota".to_string()]));
    }

    #[tokio::test]
    async fn test_delete_team_blocked_by_players() {
        let (repo, _dir) = repo().await;
        repo.create_team(&new_team(7, "Seven", "seven")).await.unwrap();
        let player = repo.create_player(&new_player("Ana", 7)).await.unwrap();

        let err = repo.delete_team(7).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        repo.delete_player(&player.profile.id).await.unwrap();
        repo.delete_team(7).await.unwrap();
        assert!(repo.get_team(7).await.unwrap().is_none());

        let err = repo.delete_team(7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_player_keeps_photo_without_upload() {
        let (repo, _dir) = repo().await;
        let created = repo.create_player(&new_player("Bia", 1)).await.unwrap();
        let id = created.profile.id.clone();

        let updated = repo
            .update_player(
                &id,
                PlayerChanges {
                    name: "Bia".to_string(),
                    title: "Coach".to_string(),
                    description: "Strategy".to_string(),
                    socials: crate::models::SocialPatch::from_fields(
                        Some("https://instagram.com/bia"),
                        None,
                        None,
                    ),
                    photo: None,
                    team_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.profile.title, "Coach");
        assert_eq!(
            updated.profile.socials.instagram.as_deref(),
            Some("https://instagram.com/bia")
        );
        assert_eq!(updated.team_id, 1);

        let photo = repo.player_photo(&id).await.unwrap().unwrap();
        assert_eq!(photo.content_type, "image/png");
        assert_eq!(photo.data, png("x").data);
    }

    #[tokio::test]
    async fn test_admin_photo_distinguishes_missing_admin() {
        let (repo, _dir) = repo().await;
        let admin = repo
            .create_admin(&NewAdmin {
                name: "Caio".to_string(),
                title: "President".to_string(),
                description: "Runs the club".to_string(),
                photo: None,
                socials: SocialLinks::default(),
            })
            .await
            .unwrap();

        assert!(admin.foto_url.is_none());
        assert_eq!(repo.admin_photo(&admin.id).await.unwrap(), Some(None));
        assert_eq!(repo.admin_photo("missing").await.unwrap(), None);
    }
}
