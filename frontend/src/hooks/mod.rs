pub mod use_students;
