//! Upsert och borttagning i platta samlingar nycklade på id

use crate::models::{ClassData, ExtraContent, ResourceItem, Student};

/// Post med en stabil nyckel inom sin samling
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Student {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ExtraContent {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ClassData {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ResourceItem {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Ersätt posten med samma nyckel på sin plats, annars lägg till sist
pub fn upsert_by_key<T: Keyed + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut out = items.to_vec();
    match out.iter().position(|existing| existing.key() == item.key()) {
        Some(index) => out[index] = item,
        None => out.push(item),
    }
    out
}

/// Ta bort posten med given nyckel; saknas den returneras en kopia
pub fn remove_by_key<T: Keyed + Clone>(items: &[T], key: &str) -> Vec<T> {
    items.iter().filter(|i| i.key() != key).cloned().collect()
}

pub fn upsert_student(students: &[Student], student: Student) -> Vec<Student> {
    upsert_by_key(students, student)
}

pub fn delete_student(students: &[Student], id: &str) -> Vec<Student> {
    remove_by_key(students, id)
}

pub fn upsert_extra(extras: &[ExtraContent], extra: ExtraContent) -> Vec<ExtraContent> {
    upsert_by_key(extras, extra)
}

pub fn delete_extra(extras: &[ExtraContent], id: &str) -> Vec<ExtraContent> {
    remove_by_key(extras, id)
}

/// Id:n för dokument som är nya eller skiljer sig i värde mellan två versioner
pub fn changed_ids<T: Keyed + PartialEq>(before: &[T], after: &[T]) -> Vec<String> {
    after
        .iter()
        .filter(|new| {
            before
                .iter()
                .find(|old| old.key() == new.key())
                .map_or(true, |old| old != *new)
        })
        .map(|doc| doc.key().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtraCategory, Gender, ResourceBody};

    fn students() -> Vec<Student> {
        vec![
            Student::new("1", "Ani", Gender::Female, "7A"),
            Student::new("2", "Budi", Gender::Male, "7A"),
            Student::new("3", "Citra", Gender::Female, "7B"),
        ]
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let before = students();
        let updated = Student::new("2", "Budi Santoso", Gender::Male, "7B");

        let after = upsert_student(&before, updated.clone());

        assert_eq!(after.len(), 3);
        assert_eq!(after[1], updated);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        // Indata orörd
        assert_eq!(before[1].name, "Budi");
    }

    #[test]
    fn test_upsert_appends_new() {
        let after = upsert_student(&students(), Student::new("4", "Dewi", Gender::Female, "8A"));
        assert_eq!(after.len(), 4);
        assert_eq!(after[3].id, "4");
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let student = Student::new("9", "Eka", Gender::Male, "9C");
        let once = upsert_student(&students(), student.clone());
        let twice = upsert_student(&once, student);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_delete_student() {
        let after = delete_student(&students(), "1");
        assert_eq!(after.len(), 2);
        assert!(after.iter().all(|s| s.id != "1"));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let before = students();
        assert_eq!(delete_student(&before, "404"), before);
    }

    #[test]
    fn test_extra_upsert_and_delete() {
        let extra = ExtraContent::new("e1", "Scratch", ExtraCategory::Tools, ResourceBody::link("https://scratch.mit.edu"));
        let extras = upsert_extra(&[], extra.clone());
        assert_eq!(extras, vec![extra.clone()]);

        let renamed = ExtraContent {
            title: "Scratch Online".into(),
            ..extra
        };
        let extras = upsert_extra(&extras, renamed);
        assert_eq!(extras.len(), 1);
        assert_eq!(extras[0].title, "Scratch Online");

        assert!(delete_extra(&extras, "e1").is_empty());
    }

    #[test]
    fn test_changed_ids() {
        let before = students();
        let after = upsert_student(&before, Student::new("3", "Citra", Gender::Female, "7C"));
        let after = upsert_student(&after, Student::new("5", "Fajar", Gender::Male, "7A"));

        assert_eq!(changed_ids(&before, &after), vec!["3".to_string(), "5".to_string()]);
        assert!(changed_ids(&before, &before).is_empty());
    }
}
