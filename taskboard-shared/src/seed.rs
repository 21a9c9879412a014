/// Demo dataset seeding
///
/// Wipes the four collections and repopulates them with a fixed demo
/// dataset: three users (admin, devops, developer), two projects, four
/// stories, and six tasks wired to owners and assignees. The wipe and
/// repopulation run in one transaction.
///
/// `auto_seed_if_empty` is the startup hook: it seeds only when the users
/// and projects tables are both empty, so a populated database is never
/// touched.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::models::{project::Project, user::User};

/// Seeds the demo dataset, wiping whatever is there
///
/// # Errors
///
/// Returns an error if any statement fails; the transaction rolls back and
/// the previous contents survive.
pub async fn seed_demo_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    wipe_all(&mut tx).await?;

    // Users: one per active role.
    let alice = insert_user(&mut tx, "Alice", "Stone", "admin", "alice@taskboard.dev").await?;
    let bruno = insert_user(&mut tx, "Bruno", "Vega", "devops", "bruno@taskboard.dev").await?;
    let carol = insert_user(&mut tx, "Carol", "Ngai", "developer", "carol@taskboard.dev").await?;

    // Projects.
    let webshop = insert_project(
        &mut tx,
        "Webshop Relaunch",
        "Rebuild of the storefront and checkout flow",
    )
    .await?;
    let mobile = insert_project(&mut tx, "Mobile App", "Companion app for iOS and Android").await?;

    // Stories under the webshop project.
    let catalog = insert_story(&mut tx, "Product catalog", "high", webshop, carol).await?;
    let checkout = insert_story(&mut tx, "Checkout flow", "high", webshop, carol).await?;
    let deploys = insert_story(&mut tx, "Deployment pipeline", "medium", webshop, bruno).await?;

    // One story under the mobile project.
    let onboarding = insert_story(&mut tx, "Onboarding screens", "low", mobile, carol).await?;

    // Tasks. A couple are mid-flight to make the board interesting.
    insert_task(&mut tx, "Design catalog schema", 4.0, catalog, None, "todo").await?;
    insert_task(
        &mut tx,
        "Implement product search",
        8.0,
        catalog,
        Some(carol),
        "doing",
    )
    .await?;
    insert_task(&mut tx, "Cart state handling", 6.0, checkout, Some(carol), "doing").await?;
    insert_task(&mut tx, "Payment provider spike", 2.0, checkout, None, "todo").await?;
    insert_task(&mut tx, "Provision staging cluster", 3.0, deploys, Some(bruno), "done").await?;
    insert_task(&mut tx, "Sketch welcome flow", 1.5, onboarding, None, "todo").await?;

    // The admin starts focused on the webshop.
    sqlx::query("UPDATE users SET default_project_id = $2 WHERE id = $1")
        .bind(alice)
        .bind(webshop)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Demo dataset seeded");
    Ok(())
}

/// Seeds only when the users and projects tables are both empty
///
/// Returns whether the seed ran.
pub async fn auto_seed_if_empty(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let users = User::count(pool).await?;
    let projects = Project::count(pool).await?;

    if users == 0 && projects == 0 {
        info!("Empty database detected, seeding demo data");
        seed_demo_data(pool).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Deletes all rows, children before parents
async fn wipe_all(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET default_project_id = NULL")
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM tasks").execute(&mut **tx).await?;
    sqlx::query("DELETE FROM stories").execute(&mut **tx).await?;
    sqlx::query("DELETE FROM projects").execute(&mut **tx).await?;
    sqlx::query("DELETE FROM users").execute(&mut **tx).await?;
    Ok(())
}

async fn insert_user(
    tx: &mut Transaction<'_, Postgres>,
    first_name: &str,
    last_name: &str,
    role: &str,
    email: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (first_name, last_name, role, email)
        VALUES ($1, $2, $3::user_role, $4)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(role)
    .bind(email)
    .fetch_one(&mut **tx)
    .await
}

async fn insert_project(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    description: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO projects (name, description)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(&mut **tx)
    .await
}

async fn insert_story(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    priority: &str,
    project_id: Uuid,
    owner_id: Uuid,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO stories (name, description, priority, project_id, owner_id)
        VALUES ($1, '', $2::work_priority, $3, $4)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(priority)
    .bind(project_id)
    .bind(owner_id)
    .fetch_one(&mut **tx)
    .await
}

async fn insert_task(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    estimated_hours: f64,
    story_id: Uuid,
    assigned_user_id: Option<Uuid>,
    status: &str,
) -> Result<Uuid, sqlx::Error> {
    // Stamp dates consistently with the lifecycle rules: anything past todo
    // has started, done has also ended.
    sqlx::query_scalar(
        r#"
        INSERT INTO tasks (name, description, story_id, estimated_hours, assigned_user_id, status,
                           started_at, ended_at)
        VALUES ($1, '', $2, $3, $4, $5::work_status,
                CASE WHEN $5 <> 'todo' THEN NOW() END,
                CASE WHEN $5 = 'done' THEN NOW() END)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(story_id)
    .bind(estimated_hours)
    .bind(assigned_user_id)
    .bind(status)
    .fetch_one(&mut **tx)
    .await
}
