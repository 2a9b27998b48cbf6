use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager, ManagerConfig},
    AsyncPgConnection,
};

pub type DbPool = Pool<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    // The hosted Postgres instance only accepts TLS connections.
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    AsyncPgConnection::try_from(client).await
}

pub fn establish_connection_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let mut manager_config = ManagerConfig::default();
    manager_config.custom_setup =
        Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
        database_url,
        manager_config,
    );
    let pool = Pool::builder(config).build()?;

    Ok(pool)
}

// Sermon database operations
pub mod sermons {
    use super::AsyncPgConnection;
    use crate::models::{NewSermon, SermonChangeset};
    use chrono::NaiveDate;
    use diesel::prelude::*;
    use diesel_async::RunQueryDsl;
    use shared_types::Sermon;
    use uuid::Uuid;

    pub async fn list_all(
        conn: &mut AsyncPgConnection,
        church: Option<Uuid>,
    ) -> anyhow::Result<Vec<Sermon>> {
        use crate::schema::sermons::dsl::*;

        let mut query = sermons.order_by(created_at.desc()).into_boxed();
        if let Some(c) = church {
            query = query.filter(church_id.eq(c));
        }

        let items = query.load::<Sermon>(conn).await?;
        Ok(items)
    }

    /// Feed query: ascending by date with nulls last. Undated sermons never
    /// match a `from`/`to` bound (SQL comparison against NULL is not true).
    pub async fn list_in_range(
        conn: &mut AsyncPgConnection,
        church: Option<Uuid>,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Sermon>> {
        use crate::schema::sermons::dsl::*;

        let mut query = sermons.order(date.asc().nulls_last()).into_boxed();
        if let Some(c) = church {
            query = query.filter(church_id.eq(c));
        }
        if let Some(f) = from_date {
            query = query.filter(date.ge(f));
        }
        if let Some(t) = to_date {
            query = query.filter(date.le(t));
        }

        let items = query.load::<Sermon>(conn).await?;
        Ok(items)
    }

    pub async fn get_by_id(
        conn: &mut AsyncPgConnection,
        sermon_id: Uuid,
    ) -> anyhow::Result<Option<Sermon>> {
        use crate::schema::sermons::dsl::*;

        let sermon = sermons
            .filter(id.eq(sermon_id))
            .first::<Sermon>(conn)
            .await
            .optional()?;

        Ok(sermon)
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_sermon: NewSermon,
    ) -> anyhow::Result<Sermon> {
        use crate::schema::sermons::dsl::*;

        let sermon = diesel::insert_into(sermons)
            .values(new_sermon)
            .get_result::<Sermon>(conn)
            .await?;

        Ok(sermon)
    }

    pub async fn update(
        conn: &mut AsyncPgConnection,
        sermon_id: Uuid,
        changes: SermonChangeset,
    ) -> anyhow::Result<Option<Sermon>> {
        use crate::schema::sermons::dsl::*;

        if !changes.has_changes() {
            return get_by_id(conn, sermon_id).await;
        }

        let sermon = diesel::update(sermons.filter(id.eq(sermon_id)))
            .set(changes)
            .get_result::<Sermon>(conn)
            .await
            .optional()?;

        Ok(sermon)
    }

    pub async fn delete(conn: &mut AsyncPgConnection, sermon_id: Uuid) -> anyhow::Result<bool> {
        use crate::schema::sermons::dsl::*;

        let deleted = diesel::delete(sermons.filter(id.eq(sermon_id)))
            .execute(conn)
            .await?;

        Ok(deleted > 0)
    }
}

// Church database operations
pub mod churches {
    use super::AsyncPgConnection;
    use diesel::prelude::*;
    use diesel_async::RunQueryDsl;
    use uuid::Uuid;

    /// Resolve an opaque feed token to the church that owns it.
    pub async fn resolve_feed_token(
        conn: &mut AsyncPgConnection,
        token: &str,
    ) -> anyhow::Result<Option<Uuid>> {
        use crate::schema::churches::dsl::*;

        let church = churches
            .filter(feed_token.eq(token))
            .select(id)
            .first::<Uuid>(conn)
            .await
            .optional()?;

        Ok(church)
    }
}

// Series database operations
pub mod series {
    use super::AsyncPgConnection;
    use crate::models::{NewSeries, SeriesChangeset};
    use diesel::prelude::*;
    use diesel_async::RunQueryDsl;
    use shared_types::Series;
    use uuid::Uuid;

    pub async fn list_all(conn: &mut AsyncPgConnection) -> anyhow::Result<Vec<Series>> {
        use crate::schema::series::dsl::*;

        let items = series
            .order_by(created_at.desc())
            .load::<Series>(conn)
            .await?;

        Ok(items)
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_series: NewSeries,
    ) -> anyhow::Result<Series> {
        use crate::schema::series::dsl::*;

        let created = diesel::insert_into(series)
            .values(new_series)
            .get_result::<Series>(conn)
            .await?;

        Ok(created)
    }

    pub async fn update(
        conn: &mut AsyncPgConnection,
        series_id: Uuid,
        changes: SeriesChangeset,
    ) -> anyhow::Result<Option<Series>> {
        use crate::schema::series::dsl::*;

        if !changes.has_changes() {
            let existing = series
                .filter(id.eq(series_id))
                .first::<Series>(conn)
                .await
                .optional()?;
            return Ok(existing);
        }

        let updated = diesel::update(series.filter(id.eq(series_id)))
            .set(changes)
            .get_result::<Series>(conn)
            .await
            .optional()?;

        Ok(updated)
    }

    pub async fn delete(conn: &mut AsyncPgConnection, series_id: Uuid) -> anyhow::Result<bool> {
        use crate::schema::series::dsl::*;

        let deleted = diesel::delete(series.filter(id.eq(series_id)))
            .execute(conn)
            .await?;

        Ok(deleted > 0)
    }
}

// Song library operations
pub mod songs {
    use super::AsyncPgConnection;
    use crate::models::NewSong;
    use diesel::prelude::*;
    use diesel_async::RunQueryDsl;
    use shared_types::Song;

    pub async fn list_all(conn: &mut AsyncPgConnection) -> anyhow::Result<Vec<Song>> {
        use crate::schema::songs::dsl::*;

        let items = songs.order_by(id.asc()).load::<Song>(conn).await?;
        Ok(items)
    }

    pub async fn create(conn: &mut AsyncPgConnection, new_song: NewSong) -> anyhow::Result<Song> {
        use crate::schema::songs::dsl::*;

        let created = diesel::insert_into(songs)
            .values(new_song)
            .get_result::<Song>(conn)
            .await?;

        Ok(created)
    }
}

// Scripture library operations
pub mod verses {
    use super::AsyncPgConnection;
    use diesel::prelude::*;
    use diesel_async::RunQueryDsl;
    use shared_types::{Verse, VerseText};

    pub async fn list_all(conn: &mut AsyncPgConnection) -> anyhow::Result<Vec<Verse>> {
        use crate::schema::verses::dsl::*;

        let items = verses.order_by(ref_.asc()).load::<Verse>(conn).await?;
        Ok(items)
    }

    pub async fn list_texts(conn: &mut AsyncPgConnection) -> anyhow::Result<Vec<VerseText>> {
        use crate::schema::verse_texts::dsl::*;

        let items = verse_texts
            .order_by(ref_.asc())
            .load::<VerseText>(conn)
            .await?;

        Ok(items)
    }
}
