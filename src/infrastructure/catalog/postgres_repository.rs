//! PostgreSQL catalog repository implementations

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::catalog::{
    CatalogPage, CatalogQuery, ContentItem, ContentRepository, Course, CourseLevel,
    CourseRepository, Product, ProductRepository,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`ContentRepository`].
#[derive(Debug, Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<ContentItem>, DomainError> {
        let mut builder = QueryBuilder::new(
            "SELECT id, title, slug, content, category, featured, author_id, created_at \
             FROM content_items",
        );
        apply_filters(&mut builder, query);
        apply_page(&mut builder, query);

        let fetch = async {
            builder
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to list content: {}", e)))
        };

        let (total, rows) =
            futures::try_join!(count_rows(&self.pool, "content_items", query), fetch)?;

        let mut items = Vec::with_capacity(rows.len());

        for row in rows {
            items.push(ContentItem {
                id: row.get("id"),
                title: row.get("title"),
                slug: row.get("slug"),
                content: row.get("content"),
                category: row.get("category"),
                featured: row.get("featured"),
                author_id: row.get::<Option<Uuid>, _>("author_id"),
                created_at: row.get("created_at"),
            });
        }

        Ok(CatalogPage { items, total })
    }

    async fn create(&self, item: ContentItem) -> Result<ContentItem, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO content_items
                (id, title, slug, content, category, featured, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.slug)
        .bind(&item.content)
        .bind(&item.category)
        .bind(item.featured)
        .bind(item.author_id)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!("Content slug '{}' already exists", item.slug))
            } else {
                DomainError::storage(format!("Failed to create content: {}", e))
            }
        })?;

        Ok(item)
    }
}

/// PostgreSQL implementation of [`CourseRepository`].
#[derive(Debug, Clone)]
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<Course>, DomainError> {
        let mut builder = QueryBuilder::new(
            "SELECT id, title, instructor_name, category, level, price, featured, \
             created_by, created_at FROM courses",
        );
        apply_filters(&mut builder, query);
        apply_page(&mut builder, query);

        let fetch = async {
            builder
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to list courses: {}", e)))
        };

        let (total, rows) = futures::try_join!(count_rows(&self.pool, "courses", query), fetch)?;

        let mut items = Vec::with_capacity(rows.len());

        for row in rows {
            let level: String = row.get("level");

            items.push(Course {
                id: row.get("id"),
                title: row.get("title"),
                instructor_name: row.get("instructor_name"),
                category: row.get("category"),
                level: CourseLevel::from_str_lossy(&level),
                price: row.get("price"),
                featured: row.get("featured"),
                created_by: row.get::<Option<Uuid>, _>("created_by"),
                created_at: row.get("created_at"),
            });
        }

        Ok(CatalogPage { items, total })
    }

    async fn create(&self, course: Course) -> Result<Course, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO courses
                (id, title, instructor_name, category, level, price, featured,
                 created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.instructor_name)
        .bind(&course.category)
        .bind(course.level.as_str())
        .bind(course.price)
        .bind(course.featured)
        .bind(course.created_by)
        .bind(course.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create course: {}", e)))?;

        Ok(course)
    }
}

/// PostgreSQL implementation of [`ProductRepository`].
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<Product>, DomainError> {
        let mut builder = QueryBuilder::new(
            "SELECT id, title, category, price, featured, created_by, created_at FROM products",
        );
        apply_filters(&mut builder, query);
        apply_page(&mut builder, query);

        let fetch = async {
            builder
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to list products: {}", e)))
        };

        let (total, rows) = futures::try_join!(count_rows(&self.pool, "products", query), fetch)?;

        let mut items = Vec::with_capacity(rows.len());

        for row in rows {
            items.push(Product {
                id: row.get("id"),
                title: row.get("title"),
                category: row.get("category"),
                price: row.get("price"),
                featured: row.get("featured"),
                created_by: row.get::<Option<Uuid>, _>("created_by"),
                created_at: row.get("created_at"),
            });
        }

        Ok(CatalogPage { items, total })
    }

    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, title, category, price, featured, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.featured)
        .bind(product.created_by)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create product: {}", e)))?;

        Ok(product)
    }
}

fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &CatalogQuery) {
    let mut clause = " WHERE ";

    if let Some(ref category) = query.category {
        builder.push(clause).push("category = ").push_bind(category.clone());
        clause = " AND ";
    }

    if let Some(featured) = query.featured {
        builder.push(clause).push("featured = ").push_bind(featured);
        clause = " AND ";
    }

    if let Some(ref search) = query.search {
        builder
            .push(clause)
            .push("title ILIKE ")
            .push_bind(format!("%{}%", search));
    }
}

fn apply_page(builder: &mut QueryBuilder<'_, Postgres>, query: &CatalogQuery) {
    builder
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(i64::try_from(query.limit).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(query.offset).unwrap_or(i64::MAX));
}

async fn count_rows(
    pool: &PgPool,
    table: &str,
    query: &CatalogQuery,
) -> Result<u64, DomainError> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", table));
    apply_filters(&mut builder, query);

    let count: i64 = builder
        .build_query_scalar()
        .fetch_one(pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to count {}: {}", table, e)))?;

    Ok(u64::try_from(count).unwrap_or(0))
}
