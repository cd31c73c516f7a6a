//! Student seeding functionality.
//!
//! Generates fake student records and inserts them through the repository,
//! so seeded data goes through exactly the same validation and grade-slot
//! seeding as production writes.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use gradebook_db::{PgPool, StudentRepository};
use gradebook_models::{Address, CreateStudentDto, Discipline, PhoneNumber};
use tracing::info;

/// Inserts `count` fake students, each with a sprinkling of recorded
/// grades. Returns the number of students created.
pub async fn seed_students(pool: &PgPool, count: usize) -> Result<usize> {
    for _ in 0..count {
        let student = StudentRepository::create(pool, fake_student()).await?;
        let id = student.id.context("created student has no id")?;

        for discipline in Discipline::ALL {
            // Leave roughly a quarter of the slots ungraded
            if (0..4).fake::<u8>() != 0 {
                let score: i32 = (1..7).fake();
                StudentRepository::record_grade(pool, id, discipline, score).await?;
            }
        }
    }

    info!(count, "seeded students");
    Ok(count)
}

/// One fake student creation payload.
fn fake_student() -> CreateStudentDto {
    CreateStudentDto {
        first_name: FirstName().fake(),
        last_name: Some(LastName().fake()),
        birth_date: fake_birth_date(),
        phone_number: Some(fake_phone()),
        address: Some(Address {
            street: Some(format!("{} Rue du Lac", (1..200).fake::<u8>())),
            postal_code: Some(format!("{}", (1000..9999).fake::<u16>())),
            city: Some("Lausanne".into()),
        }),
    }
}

fn fake_birth_date() -> NaiveDate {
    let year: i32 = (1990..2012).fake();
    let month: u32 = (1..13).fake();
    let day: u32 = (1..29).fake();
    NaiveDate::from_ymd_opt(year, month, day).expect("days below 29 exist in every month")
}

fn fake_phone() -> PhoneNumber {
    let text = format!(
        "+41 {:02} {:03} {:02} {:02}",
        (10..100).fake::<u8>(),
        (0..1000).fake::<u16>(),
        (0..100).fake::<u8>(),
        (0..100).fake::<u8>(),
    );
    PhoneNumber::new(text).expect("generated numbers are well formed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate as _;

    #[test]
    fn test_fake_student_passes_validation() {
        for _ in 0..50 {
            let dto = fake_student();
            assert!(dto.validate().is_ok());
        }
    }

    #[test]
    fn test_fake_birth_date_is_in_range() {
        for _ in 0..50 {
            let date = fake_birth_date();
            assert!((1990..2012).contains(&chrono::Datelike::year(&date)));
        }
    }

    #[test]
    fn test_fake_phone_is_valid() {
        for _ in 0..50 {
            let phone = fake_phone();
            let digits = phone.digits_only().len();
            assert!((7..=15).contains(&digits));
        }
    }
}
