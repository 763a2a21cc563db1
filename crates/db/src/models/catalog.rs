//! Catalog hierarchy models: branch, program, year, semester.
//!
//! These are reference data, created by admins or the seed tool and rarely
//! mutated afterwards. Subjects live in their own module since they carry
//! the listing/search surface.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campushub_core::types::{DbId, Timestamp};

/// A row from the `branches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Branch {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a branch.
#[derive(Debug, Deserialize)]
pub struct CreateBranch {
    pub code: String,
    pub name: String,
}

/// DTO for updating a branch.
#[derive(Debug, Deserialize)]
pub struct UpdateBranch {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// A row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub branch_id: DbId,
    pub code: String,
    pub name: String,
    pub duration_years: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a program.
#[derive(Debug, Deserialize)]
pub struct CreateProgram {
    pub branch_id: DbId,
    pub code: String,
    pub name: String,
    pub duration_years: Option<i32>,
}

/// DTO for updating a program.
#[derive(Debug, Deserialize)]
pub struct UpdateProgram {
    pub code: Option<String>,
    pub name: Option<String>,
    pub duration_years: Option<i32>,
}

/// A row from the `years` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Year {
    pub id: DbId,
    pub program_id: DbId,
    pub year_number: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a year.
#[derive(Debug, Deserialize)]
pub struct CreateYear {
    pub program_id: DbId,
    pub year_number: i32,
}

/// A row from the `semesters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Semester {
    pub id: DbId,
    pub year_id: DbId,
    pub semester_number: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a semester.
#[derive(Debug, Deserialize)]
pub struct CreateSemester {
    pub year_id: DbId,
    pub semester_number: i32,
}
