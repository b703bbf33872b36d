//! Uppdateringsmotor för portalens dokument
//!
//! Rena funktioner: tar nuvarande samling plus en riktad ändring och
//! returnerar en ny samling. Inga sidoeffekter, ingen lagring.

pub mod classes;
pub mod collections;
pub mod profile;

pub use classes::{
    classes_in_grade, delete_exam_by_grade, replace_chapter_by_grade, replace_class_resource,
    replace_class_resource_by_grade, ChapterPatch, ClassResource,
};
pub use collections::{
    changed_ids, delete_extra, delete_student, upsert_extra, upsert_student, Keyed,
};
pub use profile::merge_profile;
