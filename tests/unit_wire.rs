//! Wire representation and schema descriptor contracts.

use chrono::NaiveDate;
use gradebook::schema;
use gradebook::{Discipline, Gender, PhoneNumber, Student, StudentRecord};

fn sample_student() -> Student {
    let mut student = Student::new(
        "Hostettler",
        "Steve",
        NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
    );
    student.gender = Some(Gender::Male);
    student.phone_number = Some(PhoneNumber::new("+41 21 693 11 11").unwrap());
    student
}

#[test]
fn serialized_students_never_carry_gender() {
    let record = StudentRecord::from(&sample_student());
    let json = serde_json::to_value(&record).unwrap();
    assert!(json.get("gender").is_none());
}

#[test]
fn last_name_travels_under_its_external_tag() {
    let record = StudentRecord::from(&sample_student());
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["last_name"], "Hostettler");
}

#[test]
fn wire_fields_keep_declaration_order() {
    let record = StudentRecord::from(&sample_student());
    let json = serde_json::to_string(&record).unwrap();
    let last = json.find("last_name").unwrap();
    let first = json.find("first_name").unwrap();
    let birth = json.find("birth_date").unwrap();
    let phone = json.find("phone_number").unwrap();
    assert!(last < first && first < birth && birth < phone);
}

#[test]
fn phone_codec_keeps_the_textual_form_on_the_wire() {
    let record = StudentRecord::from(&sample_student());
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["phone_number"], "+41 21 693 11 11");
}

#[test]
fn descriptor_mirrors_the_specified_column_contract() {
    let first = schema::STUDENTS.column_for("first_name").unwrap();
    assert!(!first.nullable);
    assert_eq!(first.length, Some(35));

    let last = schema::STUDENTS.column_for("last_name").unwrap();
    assert!(last.nullable);
    assert_eq!(last.length, Some(35));

    // transient field stays unmapped
    assert!(schema::STUDENTS.column_for("gender").is_none());
}

#[test]
fn descriptor_places_the_picture_in_a_lazy_secondary_table() {
    assert_eq!(schema::PICTURES.join_column, "student_id");
    assert_eq!(schema::PICTURES.fetch, schema::Fetch::Lazy);
}

#[test]
fn descriptor_cascades_grades_but_not_badges() {
    assert!(schema::GRADES.cascade_delete);
    assert_eq!(schema::GRADES.order_by, Some("discipline DESC"));
    assert!(!schema::BADGES.cascade_delete);
}

#[test]
fn discipline_names_are_stable_on_the_wire() {
    for d in Discipline::ALL {
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", d.as_str()));
    }
}
