//! Seed script for development: populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@tutorhub.local";
const DEFAULT_PASSWORD: &str = "Test1234!";

const TUTORS: &[(&str, &str, &[&str], f64)] = &[
    ("sarah@tutorhub.local", "Sarah Chen", &["Math", "Physics"], 45.0),
    ("omar@tutorhub.local", "Omar Haddad", &["Chemistry"], 38.0),
    ("lena@tutorhub.local", "Lena Vogel", &["English", "History"], 30.0),
];

const LEARNERS: &[(&str, &str)] = &[
    ("maya@tutorhub.local", "Maya Ortiz"),
    ("tom@tutorhub.local", "Tom Becker"),
    ("ines@tutorhub.local", "Ines Duarte"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = tutorhub::db::create_pool(&db_url, 5).await?;
    tutorhub::db::run_migrations(&pool).await?;

    println!("=== TutorHub Seed Script ===");

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        println!("[skip] Database already has {existing} users");
        return Ok(());
    }

    let hash = tutorhub::services::auth::hash_password(DEFAULT_PASSWORD)?;

    insert_user(&pool, ADMIN_EMAIL, "Platform Admin", "Admin", &hash, 90).await?;

    let mut tutor_ids = Vec::new();
    for (i, (email, name, subjects, rate)) in TUTORS.iter().enumerate() {
        let id = insert_user(&pool, email, name, "Tutor", &hash, 60 - i as i64 * 7).await?;
        sqlx::query(
            r#"
            INSERT INTO tutor_profiles (id, display_name, bio, subjects, hourly_rate,
                experience_years, education, rating, review_count)
            VALUES ($1, $2, $3, $4, $5, $6, 'BSc', 4.5, 12)
            "#,
        )
        .bind(id)
        .bind(*name)
        .bind(format!("{name} teaches {}.", subjects.join(" and ")))
        .bind(serde_json::json!(subjects))
        .bind(*rate)
        .bind(3 + i as i32)
        .execute(&pool)
        .await?;
        tutor_ids.push((id, subjects[0], *rate));
    }
    println!("[done] Created admin and {} tutors", tutor_ids.len());

    let mut learner_ids = Vec::new();
    for (i, (email, name)) in LEARNERS.iter().enumerate() {
        learner_ids.push(insert_user(&pool, email, name, "Learner", &hash, 20 - i as i64 * 5).await?);
    }
    println!("[done] Created {} learners", learner_ids.len());

    seed_bookings(&pool, &learner_ids, &tutor_ids).await?;
    seed_posts(&pool, &learner_ids).await?;
    seed_application(&pool, learner_ids[0]).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: {ADMIN_EMAIL} / {DEFAULT_PASSWORD}");

    Ok(())
}

async fn insert_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    role: &str,
    hash: &str,
    days_ago: i64,
) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password_hash, display_name, role, created_at)
        VALUES ($1, $2, $3, $4::user_role, $5)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(hash)
    .bind(name)
    .bind(role)
    .bind(Utc::now() - Duration::days(days_ago))
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Spread bookings across the last eight months and a mix of statuses.
async fn seed_bookings(
    pool: &PgPool,
    learners: &[Uuid],
    tutors: &[(Uuid, &str, f64)],
) -> anyhow::Result<()> {
    let statuses = ["completed", "completed", "pending", "cancelled", "completed"];
    let mut count = 0;

    for month in 0..8i64 {
        for (i, (tutor_id, topic, rate)) in tutors.iter().enumerate() {
            let learner = learners[(month as usize + i) % learners.len()];
            let status = statuses[(month as usize + i) % statuses.len()];
            sqlx::query(
                r#"
                INSERT INTO bookings (learner_id, tutor_id, topic, status, amount, scheduled_at, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                "#,
            )
            .bind(learner)
            .bind(*tutor_id)
            .bind(*topic)
            .bind(status)
            .bind(*rate)
            .bind(Utc::now() - Duration::days(month * 30 + i as i64))
            .execute(pool)
            .await?;
            count += 1;
        }
    }

    // A booking against a tutor id with no profile, as left behind by a deleted account.
    sqlx::query(
        "INSERT INTO bookings (learner_id, tutor_id, topic, status, amount) VALUES ($1, $2, 'Biology', 'completed', 25)",
    )
    .bind(learners[0])
    .bind(Uuid::new_v4())
    .execute(pool)
    .await?;

    println!("[done] Created {} bookings", count + 1);
    Ok(())
}

async fn seed_posts(pool: &PgPool, authors: &[Uuid]) -> anyhow::Result<()> {
    let posts = [
        ("Finally understood integrals thanks to my tutor!", false),
        ("Anyone have tips for the chemistry midterm?", false),
        ("Buy cheap followers at spam.example", true),
    ];
    for (i, (content, hidden)) in posts.iter().enumerate() {
        sqlx::query("INSERT INTO posts (author_id, content, is_hidden) VALUES ($1, $2, $3)")
            .bind(authors[i % authors.len()])
            .bind(*content)
            .bind(*hidden)
            .execute(pool)
            .await?;
    }
    println!("[done] Created {} posts", posts.len());
    Ok(())
}

async fn seed_application(pool: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tutor_applications (user_id, display_name, email, bio, subjects, hourly_rate)
        VALUES ($1, 'Maya Ortiz', 'maya@tutorhub.local', 'Spanish native speaker', '["Spanish"]', 28)
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    println!("[done] Created 1 pending tutor application");
    Ok(())
}
