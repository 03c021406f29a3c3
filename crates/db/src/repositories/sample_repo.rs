//! Repository for `samples` and their nested color, size and material rows.
//!
//! Create and full update write the sample row and every nested row inside
//! one transaction; any failure leaves no trace.

use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::sample::{
    CreateSample, Sample, SampleColor, SampleDetail, SampleFilter, SampleMaterial, SampleSize,
    UpdateSample,
};

const COLUMNS: &str = "id, product_id, season_id, supplier_id, sample_number, sample_type, \
    status, requested_at, received_at, notes, created_at, updated_at";

const COLOR_QUERY: &str = "\
    SELECT sc.id, sc.sample_id, sc.color_id, c.name, c.code, c.pantone_code, c.hex \
    FROM sample_colors sc \
    JOIN colors c ON c.id = sc.color_id \
    WHERE sc.sample_id = $1 \
    ORDER BY sc.id";

const SIZE_QUERY: &str = "\
    SELECT ss.id, ss.sample_id, ss.size_master_id, sm.label, ss.quantity \
    FROM sample_sizes ss \
    JOIN size_masters sm ON sm.id = ss.size_master_id \
    WHERE ss.sample_id = $1 \
    ORDER BY sm.sort_order, sm.label";

const MATERIAL_QUERY: &str = "\
    SELECT smt.id, smt.sample_id, smt.material_id, m.name AS material_name, m.composition, \
           smt.placement, smt.consumption \
    FROM sample_materials smt \
    JOIN materials m ON m.id = smt.material_id \
    WHERE smt.sample_id = $1 \
    ORDER BY smt.id";

/// Provides transactional CRUD for samples.
pub struct SampleRepo;

impl SampleRepo {
    /// Insert a sample with its nested rows.
    ///
    /// A missing `sample_number` is generated from the product's style
    /// number. Returns `RowNotFound` if the product does not exist.
    pub async fn create(pool: &PgPool, input: &CreateSample) -> Result<SampleDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let sample_number = match input.sample_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => number.to_string(),
            _ => Self::next_sample_number(&mut tx, input.product_id).await?,
        };

        let query = format!(
            "INSERT INTO samples
                (product_id, season_id, supplier_id, sample_number, sample_type, status,
                 requested_at, received_at, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'REQUESTED'), $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let sample = sqlx::query_as::<_, Sample>(&query)
            .bind(input.product_id)
            .bind(input.season_id)
            .bind(input.supplier_id)
            .bind(&sample_number)
            .bind(&input.sample_type)
            .bind(&input.status)
            .bind(input.requested_at)
            .bind(input.received_at)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        Self::write_children(&mut tx, sample.id, input).await?;
        let detail = Self::load_detail(&mut tx, sample).await?;

        tx.commit().await?;
        Ok(detail)
    }

    /// Overwrite the sample row and replace all nested rows.
    ///
    /// Returns `None` if no sample with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateSample,
    ) -> Result<Option<SampleDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE samples SET
                product_id = $2, season_id = $3, supplier_id = $4,
                sample_number = COALESCE(NULLIF(TRIM($5), ''), sample_number),
                sample_type = $6, status = COALESCE($7, 'REQUESTED'),
                requested_at = $8, received_at = $9, notes = $10
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let sample = sqlx::query_as::<_, Sample>(&query)
            .bind(id)
            .bind(input.product_id)
            .bind(input.season_id)
            .bind(input.supplier_id)
            .bind(&input.sample_number)
            .bind(&input.sample_type)
            .bind(&input.status)
            .bind(input.requested_at)
            .bind(input.received_at)
            .bind(&input.notes)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(sample) = sample else {
            return Ok(None);
        };

        for table in ["sample_colors", "sample_sizes", "sample_materials"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE sample_id = $1"))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        Self::write_children(&mut tx, id, input).await?;
        let detail = Self::load_detail(&mut tx, sample).await?;

        tx.commit().await?;
        Ok(Some(detail))
    }

    /// Patch the sample row only. Nested rows are untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSample,
    ) -> Result<Option<Sample>, sqlx::Error> {
        let query = format!(
            "UPDATE samples SET
                season_id = COALESCE($2, season_id),
                supplier_id = COALESCE($3, supplier_id),
                sample_number = COALESCE($4, sample_number),
                sample_type = COALESCE($5, sample_type),
                status = COALESCE($6, status),
                requested_at = COALESCE($7, requested_at),
                received_at = COALESCE($8, received_at),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sample>(&query)
            .bind(id)
            .bind(input.season_id)
            .bind(input.supplier_id)
            .bind(&input.sample_number)
            .bind(&input.sample_type)
            .bind(&input.status)
            .bind(input.requested_at)
            .bind(input.received_at)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sample>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM samples WHERE id = $1");
        sqlx::query_as::<_, Sample>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a sample together with its nested rows.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<SampleDetail>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {COLUMNS} FROM samples WHERE id = $1");
        let sample = sqlx::query_as::<_, Sample>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        match sample {
            Some(sample) => Ok(Some(Self::load_detail(&mut conn, sample).await?)),
            None => Ok(None),
        }
    }

    /// Filtered list, most recently created first.
    pub async fn list(pool: &PgPool, filter: &SampleFilter) -> Result<Vec<Sample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM samples
             WHERE ($1::BIGINT IS NULL OR product_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BIGINT IS NULL OR season_id = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Sample>(&query)
            .bind(filter.product_id)
            .bind(&filter.status)
            .bind(filter.season_id)
            .fetch_all(pool)
            .await
    }

    /// Nested rows cascade with the sample.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM samples WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Next free `{style_number}-S{NN}` for a product.
    ///
    /// The product row is locked so concurrent creates for the same product
    /// cannot pick the same number.
    async fn next_sample_number(
        conn: &mut PgConnection,
        product_id: DbId,
    ) -> Result<String, sqlx::Error> {
        let style_number: String =
            sqlx::query_scalar("SELECT style_number FROM products WHERE id = $1 FOR UPDATE")
                .bind(product_id)
                .fetch_one(&mut *conn)
                .await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM samples WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&mut *conn)
            .await?;

        let mut seq = existing + 1;
        loop {
            let candidate = format!("{style_number}-S{seq:02}");
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM samples WHERE sample_number = $1)")
                    .bind(&candidate)
                    .fetch_one(&mut *conn)
                    .await?;
            if !taken {
                return Ok(candidate);
            }
            seq += 1;
        }
    }

    async fn write_children(
        conn: &mut PgConnection,
        sample_id: DbId,
        input: &CreateSample,
    ) -> Result<(), sqlx::Error> {
        for &color_id in &input.colors {
            sqlx::query("INSERT INTO sample_colors (sample_id, color_id) VALUES ($1, $2)")
                .bind(sample_id)
                .bind(color_id)
                .execute(&mut *conn)
                .await?;
        }

        for size in &input.sizes {
            sqlx::query(
                "INSERT INTO sample_sizes (sample_id, size_master_id, quantity)
                 VALUES ($1, $2, COALESCE($3, 1))",
            )
            .bind(sample_id)
            .bind(size.size_master_id)
            .bind(size.quantity)
            .execute(&mut *conn)
            .await?;
        }

        for material in &input.materials {
            sqlx::query(
                "INSERT INTO sample_materials (sample_id, material_id, placement, consumption)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(sample_id)
            .bind(material.material_id)
            .bind(&material.placement)
            .bind(material.consumption)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    async fn load_detail(
        conn: &mut PgConnection,
        sample: Sample,
    ) -> Result<SampleDetail, sqlx::Error> {
        let colors = sqlx::query_as::<_, SampleColor>(COLOR_QUERY)
            .bind(sample.id)
            .fetch_all(&mut *conn)
            .await?;
        let sizes = sqlx::query_as::<_, SampleSize>(SIZE_QUERY)
            .bind(sample.id)
            .fetch_all(&mut *conn)
            .await?;
        let materials = sqlx::query_as::<_, SampleMaterial>(MATERIAL_QUERY)
            .bind(sample.id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(SampleDetail {
            sample,
            colors,
            sizes,
            materials,
        })
    }
}
