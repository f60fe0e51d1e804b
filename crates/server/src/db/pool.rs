use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run the full Postgres schema migration inline.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Teams
CREATE TABLE IF NOT EXISTS teams (
    id          BIGSERIAL PRIMARY KEY,
    name        TEXT NOT NULL,
    logo_url    TEXT,
    coach_name  TEXT,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Players (team rosters)
CREATE TABLE IF NOT EXISTS players (
    id           BIGSERIAL PRIMARY KEY,
    team_id      BIGINT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
    name         TEXT NOT NULL,
    shirt_number INTEGER NOT NULL CHECK (shirt_number > 0),
    position     TEXT,
    UNIQUE(team_id, shirt_number)
);

CREATE INDEX IF NOT EXISTS idx_players_team_id ON players (team_id);

-- Groups and their standings rows
CREATE TABLE IF NOT EXISTS tournament_groups (
    id    BIGSERIAL PRIMARY KEY,
    name  TEXT UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS group_teams (
    id             BIGSERIAL PRIMARY KEY,
    group_id       BIGINT NOT NULL REFERENCES tournament_groups(id) ON DELETE CASCADE,
    team_id        BIGINT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
    played         INTEGER NOT NULL DEFAULT 0 CHECK (played >= 0),
    won            INTEGER NOT NULL DEFAULT 0 CHECK (won >= 0),
    drawn          INTEGER NOT NULL DEFAULT 0 CHECK (drawn >= 0),
    lost           INTEGER NOT NULL DEFAULT 0 CHECK (lost >= 0),
    goals_for      INTEGER NOT NULL DEFAULT 0 CHECK (goals_for >= 0),
    goals_against  INTEGER NOT NULL DEFAULT 0 CHECK (goals_against >= 0),
    points         INTEGER NOT NULL DEFAULT 0 CHECK (points >= 0),
    UNIQUE(group_id, team_id)
);

-- Matches
CREATE TABLE IF NOT EXISTS matches (
    id               BIGSERIAL PRIMARY KEY,
    team_a_id        BIGINT NOT NULL REFERENCES teams(id),
    team_b_id        BIGINT NOT NULL REFERENCES teams(id),
    date_time        TIMESTAMPTZ NOT NULL,
    venue            TEXT NOT NULL DEFAULT '',
    status           TEXT NOT NULL DEFAULT 'scheduled'
                     CHECK (status IN ('scheduled', 'live', 'completed')),
    score_a          INTEGER CHECK (score_a >= 0),
    score_b          INTEGER CHECK (score_b >= 0),
    lineup_a_ids     BIGINT[],
    lineup_b_ids     BIGINT[],
    player_of_match  BIGINT REFERENCES players(id) ON DELETE SET NULL,
    group_id         BIGINT REFERENCES tournament_groups(id) ON DELETE SET NULL,
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_matches_date_time ON matches (date_time);
CREATE INDEX IF NOT EXISTS idx_matches_status    ON matches (status);

-- Match event log (append-only)
CREATE TABLE IF NOT EXISTS match_events (
    id           BIGSERIAL PRIMARY KEY,
    match_id     BIGINT NOT NULL REFERENCES matches(id) ON DELETE CASCADE,
    event_type   TEXT NOT NULL CHECK (event_type IN ('goal', 'substitution', 'card')),
    time_label   TEXT NOT NULL,
    player_name  TEXT,
    team_id      BIGINT REFERENCES teams(id),
    details      TEXT,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_match_events_match_id ON match_events (match_id);

-- Tournament settings (single row)
CREATE TABLE IF NOT EXISTS tournament_settings (
    id                  SMALLINT PRIMARY KEY DEFAULT 1 CHECK (id = 1),
    name                TEXT NOT NULL DEFAULT 'Tournament',
    about               TEXT NOT NULL DEFAULT '',
    logo_url            TEXT,
    knockout_image_url  TEXT,
    updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

INSERT INTO tournament_settings (id) VALUES (1) ON CONFLICT DO NOTHING;
"#;
