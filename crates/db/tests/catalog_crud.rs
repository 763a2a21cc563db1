//! Integration tests for catalog repositories: hierarchy creation, unique
//! codes, listing filters, and dependent-row counts behind the delete guard.

use sqlx::PgPool;

use campushub_db::models::catalog::{CreateBranch, CreateProgram, CreateSemester, CreateYear};
use campushub_db::models::subject::{CreateSubject, SubjectFilter};
use campushub_db::repositories::{BranchRepo, ProgramRepo, SemesterRepo, SubjectRepo, YearRepo};

mod helpers;
use helpers::seed_hierarchy;

#[sqlx::test]
async fn create_full_hierarchy(pool: PgPool) {
    let branch = BranchRepo::create(
        &pool,
        &CreateBranch {
            code: "CSE".into(),
            name: "Computer Science".into(),
        },
    )
    .await
    .unwrap();

    let program = ProgramRepo::create(
        &pool,
        &CreateProgram {
            branch_id: branch.id,
            code: "BTECH".into(),
            name: "B.Tech".into(),
            duration_years: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(program.duration_years, 4);

    let year = YearRepo::create(
        &pool,
        &CreateYear {
            program_id: program.id,
            year_number: 2,
        },
    )
    .await
    .unwrap();

    let semester = SemesterRepo::create(
        &pool,
        &CreateSemester {
            year_id: year.id,
            semester_number: 3,
        },
    )
    .await
    .unwrap();

    let subject = SubjectRepo::create(
        &pool,
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

    assert_eq!(subject.credits, 4);
    assert_eq!(subject.topics.len(), 2);
}

#[sqlx::test]
async fn duplicate_branch_code_violates_unique_constraint(pool: PgPool) {
    BranchRepo::create(
        &pool,
        &CreateBranch {
            code: "ECE".into(),
            name: "Electronics".into(),
        },
    )
    .await
    .unwrap();

    let err = BranchRepo::create(
        &pool,
        &CreateBranch {
            code: "ECE".into(),
            name: "Electronics Again".into(),
        },
    )
    .await
    .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test]
async fn branch_dependent_count_reflects_children(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;

    // One program + one subject hang off the branch.
    let count = BranchRepo::count_dependents(&pool, ctx.branch_id).await.unwrap();
    assert_eq!(count, 2);

    let empty = BranchRepo::create(
        &pool,
        &CreateBranch {
            code: "MECH".into(),
            name: "Mechanical".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(BranchRepo::count_dependents(&pool, empty.id).await.unwrap(), 0);
}

#[sqlx::test]
async fn subject_listing_filters_by_branch_and_pattern(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;

    SubjectRepo::create(
        &pool,
        &CreateSubject {
            code: "CS302".into(),
            name: "Operating Systems".into(),
            branch_id: ctx.branch_id,
            semester_id: ctx.semester_id,
            credits: None,
            topics: vec![],
        },
    )
    .await
    .unwrap();

    let all = SubjectFilter {
        branch_id: Some(ctx.branch_id),
        ..Default::default()
    };
    assert_eq!(SubjectRepo::count_listed(&pool, &all).await.unwrap(), 2);

    let filtered = SubjectFilter {
        branch_id: Some(ctx.branch_id),
        name_like: Some("%operating%".into()),
        ..Default::default()
    };
    let rows = SubjectRepo::list(&pool, &filtered, 20, 0).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].code, "CS302");

    // Ordered by code for deterministic pagination.
    let rows = SubjectRepo::list(&pool, &all, 20, 0).await.unwrap();
    assert_eq!(rows[0].code, "CS301");
    assert_eq!(rows[1].code, "CS302");
}
