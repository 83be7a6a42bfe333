//! Ranking queries over the game tables.
//!
//! Ranks are computed with window functions so they stay correct across
//! pagination offsets.

use sqlx::MySqlPool;

use muweb_core::pagination::{clamp_limit, clamp_offset, DEFAULT_RANKING_LIMIT, MAX_RANKING_LIMIT};

use crate::models::ranking::{CharacterRankingRow, GuildRankingRow, OnlineSnapshot};

/// Character ranking SELECT list; the ORDER BY inside the window decides
/// the board.
const CHARACTER_RANKING: &str = "SELECT \
        CAST(ROW_NUMBER() OVER (ORDER BY {order}) AS SIGNED) AS `rank`, \
        c.name, c.class_code, c.level, c.resets, c.pk_kills, \
        g.name AS guild_name \
     FROM characters c \
     LEFT JOIN guilds g ON g.id = c.guild_id \
     ORDER BY `rank` \
     LIMIT ? OFFSET ?";

/// Provides the public ranking queries.
pub struct RankingRepo;

impl RankingRepo {
    /// Top characters by resets, ties broken by level.
    pub async fn by_resets(
        pool: &MySqlPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<CharacterRankingRow>, sqlx::Error> {
        Self::character_board(pool, "c.resets DESC, c.level DESC, c.name ASC", limit, offset).await
    }

    /// Top characters by level, ties broken by experience.
    pub async fn by_level(
        pool: &MySqlPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<CharacterRankingRow>, sqlx::Error> {
        Self::character_board(
            pool,
            "c.level DESC, c.experience DESC, c.name ASC",
            limit,
            offset,
        )
        .await
    }

    /// Top player killers.
    pub async fn by_pk(
        pool: &MySqlPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<CharacterRankingRow>, sqlx::Error> {
        Self::character_board(pool, "c.pk_kills DESC, c.name ASC", limit, offset).await
    }

    async fn character_board(
        pool: &MySqlPool,
        order: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<CharacterRankingRow>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_RANKING_LIMIT, MAX_RANKING_LIMIT);
        let offset = clamp_offset(offset);

        // `order` comes from the fixed strings above, never from user input.
        let query = CHARACTER_RANKING.replace("{order}", order);
        sqlx::query_as::<_, CharacterRankingRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Top guilds by score, with member counts.
    pub async fn guilds(
        pool: &MySqlPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<GuildRankingRow>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_RANKING_LIMIT, MAX_RANKING_LIMIT);
        let offset = clamp_offset(offset);

        sqlx::query_as::<_, GuildRankingRow>(
            "SELECT
                CAST(ROW_NUMBER() OVER (ORDER BY g.score DESC, g.name ASC) AS SIGNED) AS `rank`,
                g.id, g.name, g.master_name, g.score,
                (SELECT COUNT(*) FROM characters c WHERE c.guild_id = g.id) AS member_count
             FROM guilds g
             ORDER BY `rank`
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Current online count plus a sample of online character names.
    pub async fn online(pool: &MySqlPool, sample: i64) -> Result<OnlineSnapshot, sqlx::Error> {
        let online_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE is_online = TRUE")
                .fetch_one(pool)
                .await?;

        let sample = sample.clamp(0, MAX_RANKING_LIMIT);
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT c.name
             FROM characters c
             JOIN accounts a ON a.id = c.account_id
             WHERE a.is_online = TRUE
             ORDER BY c.level DESC
             LIMIT ?",
        )
        .bind(sample)
        .fetch_all(pool)
        .await?;

        Ok(OnlineSnapshot {
            online_count,
            sample: names,
        })
    }
}
