//! Student repository.
//!
//! All SQL is derived from the [`schema`](crate::schema) descriptor. The
//! ownership rules live here, not in mapping metadata: deleting a student
//! removes its grade rows and collection-table entries, while badge and
//! picture rows survive. Grades, the alternative grade map, and the picture
//! are lazy; fetch them with the dedicated loaders.

use crate::schema;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use gradebook_core::pagination::{PaginationMeta, PaginationParams};
use gradebook_models::{
    Address, Badge, CreateStudentDto, Discipline, Grade, PhoneNumber, Student, StudentId,
    UpdateStudentDto,
};
use sqlx::{FromRow, PgPool};
use std::collections::BTreeMap;
use tracing::{info, instrument};
use validator::Validate;

/// Row shape of the students table; private to the mapping layer.
#[derive(FromRow)]
struct StudentRow {
    id: StudentId,
    last_name: Option<String>,
    first_name: Option<String>,
    birth_date: Option<NaiveDate>,
    phone_number: Option<PhoneNumber>,
    street: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
}

impl StudentRow {
    /// Hydrates the entity. Lazy associations stay unloaded: the grade list
    /// is empty and the picture absent until the loaders run.
    fn into_student(self, badge: Option<Badge>) -> Student {
        let address = if self.street.is_none() && self.postal_code.is_none() && self.city.is_none()
        {
            None
        } else {
            Some(Address {
                street: self.street,
                postal_code: self.postal_code,
                city: self.city,
            })
        };
        Student {
            id: Some(self.id),
            last_name: self.last_name,
            first_name: self.first_name,
            birth_date: self.birth_date,
            phone_number: self.phone_number,
            gender: None,
            address,
            grades: Vec::new(),
            alternative_grades: BTreeMap::new(),
            picture: None,
            badge,
        }
    }
}

#[derive(FromRow)]
struct GradeRow {
    id: i64,
    discipline: Discipline,
    score: Option<i32>,
}

fn select_students_sql() -> String {
    format!(
        "SELECT {} FROM {}",
        schema::STUDENTS.select_list(),
        schema::STUDENTS.table
    )
}

pub struct StudentRepository;

impl StudentRepository {
    /// Inserts a validated student together with its seeded grade slots.
    ///
    /// The returned entity carries the database-assigned keys.
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateStudentDto) -> Result<Student> {
        dto.validate().context("invalid student payload")?;
        let mut student: Student = dto.into();
        student.validate()?;

        let mut tx = db.begin().await.context("Failed to open transaction")?;

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            schema::STUDENTS.table,
            schema::STUDENTS.insert_list(),
            schema::STUDENTS.insert_placeholders(),
            schema::STUDENTS.primary_key,
        );
        let id: StudentId = sqlx::query_scalar(&sql)
            .bind(&student.last_name)
            .bind(&student.first_name)
            .bind(student.birth_date)
            .bind(&student.phone_number)
            .bind(student.address.as_ref().and_then(|a| a.street.clone()))
            .bind(student.address.as_ref().and_then(|a| a.postal_code.clone()))
            .bind(student.address.as_ref().and_then(|a| a.city.clone()))
            .fetch_one(&mut *tx)
            .await
            .context("Failed to insert student")?;
        student.id = Some(id);

        let grade_sql = format!(
            "INSERT INTO {} ({}, discipline, score) VALUES ($1, $2, $3) RETURNING id",
            schema::GRADES.table,
            schema::GRADES.join_column,
        );
        for grade in &mut student.grades {
            let grade_id: i64 = sqlx::query_scalar(&grade_sql)
                .bind(id)
                .bind(grade.discipline)
                .bind(grade.score)
                .fetch_one(&mut *tx)
                .await
                .with_context(|| format!("Failed to seed grade slot for {}", grade.discipline))?;
            grade.id = Some(grade_id.into());
        }

        tx.commit().await.context("Failed to commit student insert")?;
        info!(student = %student.key(), "created student");
        Ok(student)
    }

    /// Fetches one student by id, badge back-reference included.
    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: StudentId) -> Result<Option<Student>> {
        let sql = format!("{} WHERE {} = $1", select_students_sql(), schema::STUDENTS.primary_key);
        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student by id")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let badge = Self::find_badge(db, id).await?;
        Ok(Some(row.into_student(badge)))
    }

    /// Lists students ordered by last name then first name.
    ///
    /// Badges and lazy associations are not loaded here.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<Student>, PaginationMeta)> {
        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", schema::STUDENTS.table))
                .fetch_one(db)
                .await
                .context("Failed to count students")?;

        let sql = format!(
            "{} ORDER BY last_name, first_name LIMIT $1 OFFSET $2",
            select_students_sql()
        );
        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(db)
            .await
            .context("Failed to list students")?;

        let students = rows.into_iter().map(|r| r.into_student(None)).collect();
        Ok((students, PaginationMeta::for_page(params, total)))
    }

    /// Fetches every student with the given first name, ordered by last
    /// name.
    #[instrument(skip(db))]
    pub async fn find_all_by_first_name(db: &PgPool, first_name: &str) -> Result<Vec<Student>> {
        let sql = format!(
            "{} WHERE first_name = $1 ORDER BY last_name",
            select_students_sql()
        );
        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(first_name)
            .fetch_all(db)
            .await
            .context("Failed to fetch students by first name")?;
        Ok(rows.into_iter().map(|r| r.into_student(None)).collect())
    }

    /// Applies the provided fields over the stored record.
    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Option<Student>> {
        dto.validate().context("invalid student payload")?;

        let Some(existing) = Self::find_by_id(db, id).await? else {
            return Ok(None);
        };

        let last_name = dto.last_name.or(existing.last_name);
        let first_name = dto.first_name.or(existing.first_name);
        let birth_date = dto.birth_date.or(existing.birth_date);
        let phone_number = dto.phone_number.or(existing.phone_number);
        let address = dto.address.or(existing.address);

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            schema::STUDENTS.table,
            schema::STUDENTS.update_assignments(),
            schema::STUDENTS.primary_key,
            schema::STUDENTS.columns.len() + 1,
        );
        sqlx::query(&sql)
            .bind(&last_name)
            .bind(&first_name)
            .bind(birth_date)
            .bind(&phone_number)
            .bind(address.as_ref().and_then(|a| a.street.clone()))
            .bind(address.as_ref().and_then(|a| a.postal_code.clone()))
            .bind(address.as_ref().and_then(|a| a.city.clone()))
            .bind(id)
            .execute(db)
            .await
            .context("Failed to update student")?;

        Self::find_by_id(db, id).await
    }

    /// Deletes a student and the rows it owns.
    ///
    /// Grade rows and collection-table entries go with the student; the
    /// badge row and the secondary-table picture row are left in place per
    /// the schema descriptor.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: StudentId) -> Result<bool> {
        let mut tx = db.begin().await.context("Failed to open transaction")?;

        sqlx::query(&format!(
            "DELETE FROM {} WHERE {} = $1",
            schema::ALTERNATIVE_GRADES.table,
            schema::ALTERNATIVE_GRADES.join_column
        ))
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete collection-table grades")?;

        sqlx::query(&format!(
            "DELETE FROM {} WHERE {} = $1",
            schema::GRADES.table,
            schema::GRADES.join_column
        ))
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete owned grades")?;

        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE {} = $1",
            schema::STUDENTS.table,
            schema::STUDENTS.primary_key
        ))
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete student")?;

        tx.commit().await.context("Failed to commit student delete")?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(%id, "deleted student and owned grades");
        }
        Ok(deleted)
    }

    /// Loads the owned grade slots, descending by discipline.
    #[instrument(skip(db, student))]
    pub async fn load_grades(db: &PgPool, student: &mut Student) -> Result<()> {
        let Some(id) = student.id else {
            bail!("cannot load grades for a transient student");
        };
        let order_by = schema::GRADES.order_by.unwrap_or("id");
        let sql = format!(
            "SELECT id, discipline, score FROM {} WHERE {} = $1 ORDER BY {}",
            schema::GRADES.table,
            schema::GRADES.join_column,
            order_by,
        );
        let rows = sqlx::query_as::<_, GradeRow>(&sql)
            .bind(id)
            .fetch_all(db)
            .await
            .context("Failed to load grades")?;

        student.grades = rows
            .into_iter()
            .map(|r| Grade {
                id: Some(r.id.into()),
                discipline: r.discipline,
                score: r.score,
            })
            .collect();
        Ok(())
    }

    /// Loads the denormalized grade map from the collection table.
    #[instrument(skip(db, student))]
    pub async fn load_alternative_grades(db: &PgPool, student: &mut Student) -> Result<()> {
        let Some(id) = student.id else {
            bail!("cannot load grades for a transient student");
        };
        let sql = format!(
            "SELECT {}, {} FROM {} WHERE {} = $1",
            schema::ALTERNATIVE_GRADES.key_column,
            schema::ALTERNATIVE_GRADES.value_column,
            schema::ALTERNATIVE_GRADES.table,
            schema::ALTERNATIVE_GRADES.join_column,
        );
        let rows: Vec<(Discipline, i32)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_all(db)
            .await
            .context("Failed to load collection-table grades")?;

        student.alternative_grades = rows.into_iter().collect();
        Ok(())
    }

    /// Records a score, keeping both grade representations in step: the
    /// owned grade row is updated (or created) and the collection-table
    /// entry upserted.
    #[instrument(skip(db))]
    pub async fn record_grade(
        db: &PgPool,
        id: StudentId,
        discipline: Discipline,
        score: i32,
    ) -> Result<()> {
        let mut tx = db.begin().await.context("Failed to open transaction")?;

        let updated = sqlx::query(&format!(
            "UPDATE {} SET score = $3 WHERE {} = $1 AND discipline = $2",
            schema::GRADES.table,
            schema::GRADES.join_column
        ))
        .bind(id)
        .bind(discipline)
        .bind(score)
        .execute(&mut *tx)
        .await
        .context("Failed to update grade")?;

        if updated.rows_affected() == 0 {
            sqlx::query(&format!(
                "INSERT INTO {} ({}, discipline, score) VALUES ($1, $2, $3)",
                schema::GRADES.table,
                schema::GRADES.join_column
            ))
            .bind(id)
            .bind(discipline)
            .bind(score)
            .execute(&mut *tx)
            .await
            .context("Failed to insert grade")?;
        }

        sqlx::query(&format!(
            "INSERT INTO {table} ({join}, {key}, {value}) VALUES ($1, $2, $3) \
             ON CONFLICT ({join}, {key}) DO UPDATE SET {value} = EXCLUDED.{value}",
            table = schema::ALTERNATIVE_GRADES.table,
            join = schema::ALTERNATIVE_GRADES.join_column,
            key = schema::ALTERNATIVE_GRADES.key_column,
            value = schema::ALTERNATIVE_GRADES.value_column,
        ))
        .bind(id)
        .bind(discipline)
        .bind(score)
        .execute(&mut *tx)
        .await
        .context("Failed to upsert collection-table grade")?;

        tx.commit().await.context("Failed to commit grade")?;
        info!(%id, %discipline, score, "recorded grade");
        Ok(())
    }

    /// Loads the picture from the secondary table, on demand only.
    #[instrument(skip(db))]
    pub async fn load_picture(db: &PgPool, id: StudentId) -> Result<Option<Vec<u8>>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            schema::PICTURES.column.column,
            schema::PICTURES.table,
            schema::PICTURES.join_column,
        );
        sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to load picture")
    }

    /// Stores (or replaces) the picture in the secondary table.
    #[instrument(skip(db, picture))]
    pub async fn store_picture(db: &PgPool, id: StudentId, picture: &[u8]) -> Result<()> {
        let sql = format!(
            "INSERT INTO {table} ({join}, {col}) VALUES ($1, $2) \
             ON CONFLICT ({join}) DO UPDATE SET {col} = EXCLUDED.{col}",
            table = schema::PICTURES.table,
            join = schema::PICTURES.join_column,
            col = schema::PICTURES.column.column,
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(picture)
            .execute(db)
            .await
            .context("Failed to store picture")?;
        Ok(())
    }

    async fn find_badge(db: &PgPool, id: StudentId) -> Result<Option<Badge>> {
        let sql = format!(
            "SELECT id, serial, {join} FROM {} WHERE {join} = $1",
            schema::BADGES.table,
            join = schema::BADGES.join_column,
        );
        let row: Option<(i64, Option<String>, Option<StudentId>)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch badge")?;
        Ok(row.map(|(badge_id, serial, student_id)| Badge {
            id: Some(badge_id.into()),
            serial,
            student_id,
        }))
    }
}
