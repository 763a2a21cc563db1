//! Development seed tool.
//!
//! Populates an empty database with a small but realistic catalog: one
//! branch hierarchy, a few subjects, demo accounts for every role, approved
//! and pending resources, a roadmap with steps, and ratings. Refuses to run
//! against a database that already has branches.
//!
//! Usage: `DATABASE_URL=... cargo run -p campushub-seed`

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campushub_api::auth::password::hash_password;
use campushub_core::roadmap::StepInput;
use campushub_core::types::DbId;
use campushub_db::models::catalog::{CreateBranch, CreateProgram, CreateSemester, CreateYear};
use campushub_db::models::rating::UpsertRating;
use campushub_db::models::resource::CreateResource;
use campushub_db::models::roadmap::CreateRoadmap;
use campushub_db::models::subject::CreateSubject;
use campushub_db::models::user::CreateUser;
use campushub_db::repositories::{
    BranchRepo, ProgramRepo, RatingRepo, ResourceRepo, RoadmapRepo, SemesterRepo, SubjectRepo,
    UserRepo, YearRepo,
};
use campushub_db::DbPool;

/// Every demo account gets the same password.
const DEMO_PASSWORD: &str = "campushub-demo";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campushub_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set to run the seed tool")?;

    let pool = campushub_db::create_pool(&database_url)
        .await
        .context("Failed to connect to the database")?;
    campushub_db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    if !BranchRepo::list(&pool).await?.is_empty() {
        bail!("Database already contains branches; refusing to seed twice");
    }

    let users = seed_users(&pool).await?;
    let subjects = seed_catalog(&pool).await?;
    seed_content(&pool, &users, &subjects).await?;

    tracing::info!(
        password = DEMO_PASSWORD,
        "Seed complete; demo accounts admin@campushub.dev, mod@campushub.dev, \
         asha@campushub.dev, vikram@campushub.dev"
    );
    Ok(())
}

struct SeedUsers {
    moderator: DbId,
    asha: DbId,
    vikram: DbId,
}

async fn seed_users(pool: &DbPool) -> Result<SeedUsers> {
    let password_hash =
        hash_password(DEMO_PASSWORD).map_err(|e| anyhow::anyhow!("Password hashing: {e}"))?;

    let mut ids = Vec::new();
    for (name, email, role) in [
        ("Admin", "admin@campushub.dev", "admin"),
        ("Maya Moderator", "mod@campushub.dev", "moderator"),
        ("Asha Rao", "asha@campushub.dev", "student"),
        ("Vikram Iyer", "vikram@campushub.dev", "student"),
    ] {
        let user = UserRepo::create(
            pool,
            &CreateUser {
                name: name.into(),
                email: email.into(),
                password_hash: password_hash.clone(),
                role: role.into(),
            },
        )
        .await?;
        tracing::info!(user_id = user.id, email, role, "Seeded user");
        ids.push(user.id);
    }

    Ok(SeedUsers {
        moderator: ids[1],
        asha: ids[2],
        vikram: ids[3],
    })
}

struct SeedSubjects {
    data_structures: DbId,
    algorithms: DbId,
    circuits: DbId,
}

async fn seed_catalog(pool: &DbPool) -> Result<SeedSubjects> {
    let cse = BranchRepo::create(
        pool,
        &CreateBranch {
            code: "CSE".into(),
            name: "Computer Science & Engineering".into(),
        },
    )
    .await?;
    let ece = BranchRepo::create(
        pool,
        &CreateBranch {
            code: "ECE".into(),
            name: "Electronics & Communication".into(),
        },
    )
    .await?;

    let mut semesters = Vec::new();
    for branch in [&cse, &ece] {
        let program = ProgramRepo::create(
            pool,
            &CreateProgram {
                branch_id: branch.id,
                code: "BTECH".into(),
                name: "B.Tech".into(),
                duration_years: Some(4),
            },
        )
        .await?;

        // Four years, two semesters each.
        for year_number in 1..=4 {
            let year = YearRepo::create(
                pool,
                &CreateYear {
                    program_id: program.id,
                    year_number,
                },
            )
            .await?;
            for offset in 0..2 {
                let semester = SemesterRepo::create(
                    pool,
                    &CreateSemester {
                        year_id: year.id,
                        semester_number: (year_number - 1) * 2 + offset + 1,
                    },
                )
                .await?;
                semesters.push((branch.id, semester.id, semester.semester_number));
            }
        }
    }

    let find_semester = |branch_id: DbId, number: i32| -> Result<DbId> {
        semesters
            .iter()
            .find(|(b, _, n)| *b == branch_id && *n == number)
            .map(|(_, id, _)| *id)
            .context("Seeded semester missing")
    };

    let data_structures = SubjectRepo::create(
        pool,
        &CreateSubject {
            code: "CS301".into(),
            name: "Data Structures".into(),
            branch_id: cse.id,
            semester_id: find_semester(cse.id, 3)?,
            credits: Some(4),
            topics: vec!["arrays".into(), "linked lists".into(), "trees".into()],
        },
    )
    .await?;
    let algorithms = SubjectRepo::create(
        pool,
        &CreateSubject {
            code: "CS401".into(),
            name: "Design & Analysis of Algorithms".into(),
            branch_id: cse.id,
            semester_id: find_semester(cse.id, 4)?,
            credits: Some(4),
            topics: vec!["sorting".into(), "graphs".into(), "dynamic programming".into()],
        },
    )
    .await?;
    let circuits = SubjectRepo::create(
        pool,
        &CreateSubject {
            code: "EC201".into(),
            name: "Circuit Theory".into(),
            branch_id: ece.id,
            semester_id: find_semester(ece.id, 2)?,
            credits: Some(3),
            topics: vec!["network theorems".into(), "transients".into()],
        },
    )
    .await?;

    tracing::info!(branches = 2, subjects = 3, "Seeded catalog");

    Ok(SeedSubjects {
        data_structures: data_structures.id,
        algorithms: algorithms.id,
        circuits: circuits.id,
    })
}

async fn seed_content(pool: &DbPool, users: &SeedUsers, subjects: &SeedSubjects) -> Result<()> {
    let resources = [
        // (subject, type, title, provider, approved)
        (
            subjects.data_structures,
            "lecture",
            "MIT OCW: Introduction to Data Structures",
            Some("MIT OpenCourseWare"),
            true,
        ),
        (
            subjects.data_structures,
            "notes",
            "Balanced trees summary notes",
            None,
            true,
        ),
        (
            subjects.algorithms,
            "book",
            "Introduction to Algorithms (CLRS)",
            None,
            true,
        ),
        (
            subjects.circuits,
            "syllabus",
            "EC201 official syllabus",
            None,
            true,
        ),
        // A pending submission so the moderation queue is not empty.
        (
            subjects.algorithms,
            "notes",
            "My DP cheat sheet",
            None,
            false,
        ),
    ];

    let mut resource_ids = Vec::new();
    for (subject_id, resource_type, title, provider, approved) in resources {
        let resource = ResourceRepo::create(
            pool,
            &CreateResource {
                resource_type: resource_type.into(),
                title: title.into(),
                url: format!(
                    "https://resources.campushub.dev/{}",
                    title.to_lowercase().replace(' ', "-")
                ),
                description: Some(format!("{title} for exam preparation")),
                provider: provider.map(String::from),
                subject_id,
                topics: vec![],
                tags: vec!["seed".into()],
                added_by: Some(users.asha),
                is_approved: approved,
                quality_score: if approved { 70 } else { 0 },
            },
        )
        .await?;
        resource_ids.push(resource.id);
    }

    RoadmapRepo::create(
        pool,
        &CreateRoadmap {
            subject_id: subjects.data_structures,
            roadmap_type: "exam-prep".into(),
            title: "Data Structures in three weeks".into(),
            description: Some("End-semester preparation path".into()),
            difficulty: "intermediate".into(),
            created_by: Some(users.moderator),
            is_public: true,
            is_approved: true,
            tags: vec!["exam".into()],
        },
        &[
            StepInput {
                title: "Arrays, stacks, queues".into(),
                description: Some("Warm-up on linear structures".into()),
                estimated_hours: 6.0,
                prerequisites: vec![],
                resource_ids: vec![resource_ids[0]],
            },
            StepInput {
                title: "Trees and heaps".into(),
                description: None,
                estimated_hours: 8.0,
                prerequisites: vec!["Arrays, stacks, queues".into()],
                resource_ids: vec![resource_ids[0], resource_ids[1]],
            },
            StepInput {
                title: "Past papers".into(),
                description: None,
                estimated_hours: 4.0,
                prerequisites: vec!["Trees and heaps".into()],
                resource_ids: vec![],
            },
        ],
    )
    .await?;

    RatingRepo::upsert(
        pool,
        resource_ids[0],
        users.asha,
        &UpsertRating {
            rating: 5,
            review: Some("Best lecture series for this subject".into()),
        },
    )
    .await?;
    RatingRepo::upsert(
        pool,
        resource_ids[0],
        users.vikram,
        &UpsertRating {
            rating: 4,
            review: None,
        },
    )
    .await?;

    tracing::info!(
        resources = resource_ids.len(),
        roadmaps = 1,
        ratings = 2,
        "Seeded content"
    );
    Ok(())
}
