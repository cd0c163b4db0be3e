//! Seed the default category list.
//!
//! Loading the registry seeds the defaults when nothing has been persisted
//! yet, so this command is safe to run repeatedly: an existing list (even a
//! deliberately emptied one) is left untouched.

use secrecy::SecretString;

use haberdash_web::catalog::CategoryRegistry;
use haberdash_web::db::PgSettings;

/// Seed the category registry with its default labels.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the stored category
/// list is corrupted.
pub async fn categories() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("HABERDASH_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "HABERDASH_DATABASE_URL not set")?;

    let pool = haberdash_web::db::create_pool(&database_url).await?;

    let registry = CategoryRegistry::new(PgSettings::new(pool));
    let categories = registry.load().await?;

    tracing::info!(count = categories.len(), "categories ready: {categories:?}");
    Ok(())
}
