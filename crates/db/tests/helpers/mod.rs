//! Shared fixtures for db integration tests.
#![allow(dead_code)]

use sqlx::PgPool;

use campushub_core::types::DbId;
use campushub_db::models::catalog::{CreateBranch, CreateProgram, CreateSemester, CreateYear};
use campushub_db::models::resource::CreateResource;
use campushub_db::models::subject::CreateSubject;
use campushub_db::models::user::CreateUser;
use campushub_db::repositories::{
    BranchRepo, ProgramRepo, ResourceRepo, SemesterRepo, SubjectRepo, UserRepo, YearRepo,
};

/// Ids of a minimal seeded catalog: one branch, program, year, semester, and
/// subject (CS301 "Data Structures").
pub struct HierarchyCtx {
    pub branch_id: DbId,
    pub program_id: DbId,
    pub semester_id: DbId,
    pub subject_id: DbId,
}

pub async fn seed_hierarchy(pool: &PgPool) -> HierarchyCtx {
    let branch = BranchRepo::create(
        pool,
        &CreateBranch {
            code: "CSE".into(),
            name: "Computer Science".into(),
        },
    )
    .await
    .unwrap();

    let program = ProgramRepo::create(
        pool,
        &CreateProgram {
            branch_id: branch.id,
            code: "BTECH".into(),
            name: "B.Tech".into(),
            duration_years: Some(4),
        },
    )
    .await
    .unwrap();

    let year = YearRepo::create(
        pool,
        &CreateYear {
            program_id: program.id,
            year_number: 2,
        },
    )
    .await
    .unwrap();

    let semester = SemesterRepo::create(
        pool,
        &CreateSemester {
            year_id: year.id,
            semester_number: 3,
        },
    )
    .await
    .unwrap();

    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            code: "CS301".into(),
            name: "Data Structures".into(),
            branch_id: branch.id,
            semester_id: semester.id,
            credits: Some(4),
            topics: vec!["arrays".into(), "trees".into()],
        },
    )
    .await
    .unwrap();

    HierarchyCtx {
        branch_id: branch.id,
        program_id: program.id,
        semester_id: semester.id,
        subject_id: subject.id,
    }
}

pub async fn seed_user(pool: &PgPool, name: &str, email: &str, role: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.into(),
            email: email.into(),
            password_hash: "$argon2id$fake-hash-for-tests".into(),
            role: role.into(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Insert a resource with the given approval state; other fields get
/// serviceable defaults.
pub async fn seed_resource(
    pool: &PgPool,
    subject_id: DbId,
    added_by: DbId,
    title: &str,
    resource_type: &str,
    approved: bool,
) -> DbId {
    ResourceRepo::create(
        pool,
        &CreateResource {
            resource_type: resource_type.into(),
            title: title.into(),
            url: "https://example.com/r".into(),
            description: Some(format!("{title} description")),
            provider: None,
            subject_id,
            topics: vec![],
            tags: vec![],
            added_by: Some(added_by),
            is_approved: approved,
            quality_score: 50,
        },
    )
    .await
    .unwrap()
    .id
}
