//! Riktade ändringar i klassträdet
//!
//! Alla funktioner lämnar indata orörd och returnerar en ny samling där
//! exakt den utpekade noden är ersatt. Syskon behålls oförändrade och i
//! samma ordning. En uppslagning som missar är ingen felsituation: då
//! returneras en kopia som är lika med indata.

use serde::{Deserialize, Serialize};

use super::collections::{remove_by_key, upsert_by_key};
use crate::models::{
    Chapter, ClassData, ContentSection, GradeLevel, ResourceItem, Semester, SemesterId,
};

/// Fältvis ändring av ett kapitel. `None` lämnar fältet orört, `Some`
/// ersätter det helt (listor slås inte ihop).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<u8>,
    pub contents: Option<Vec<ContentSection>>,
    pub videos: Option<Vec<ResourceItem>>,
    pub quizzes: Option<Vec<ResourceItem>>,
}

impl ChapterPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(&self, chapter: &Chapter) -> Chapter {
        let mut out = chapter.clone();
        if let Some(title) = &self.title {
            out.title = title.clone();
        }
        if let Some(description) = &self.description {
            out.description = description.clone();
        }
        if let Some(progress) = self.progress {
            out.progress = progress;
        }
        if let Some(contents) = &self.contents {
            out.contents = contents.clone();
        }
        if let Some(videos) = &self.videos {
            out.videos = videos.clone();
        }
        if let Some(quizzes) = &self.quizzes {
            out.quizzes = quizzes.clone();
        }
        out
    }
}

/// Resurs som fästs på en klass eller en av dess terminer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassResource {
    /// Klassens schema, ersätts helt
    Schedule(ResourceItem),
    /// Betygsöversikt för en termin, ersätts helt
    Grades { semester: SemesterId, item: ResourceItem },
    /// Prov i terminens provbank: ersätt på plats eller lägg till sist
    ExamUpsert { semester: SemesterId, item: ResourceItem },
}

/// Klasserna i en årskurs
pub fn classes_in_grade(classes: &[ClassData], grade: GradeLevel) -> Vec<&ClassData> {
    classes.iter().filter(|c| c.grade_level == grade).collect()
}

fn map_semester<F>(class: &ClassData, semester: SemesterId, f: F) -> ClassData
where
    F: FnOnce(&Semester) -> Semester,
{
    let mut out = class.clone();
    if let Some(index) = out.semesters.iter().position(|s| s.id == semester) {
        out.semesters[index] = f(&class.semesters[index]);
    }
    out
}

fn map_classes<P, F>(classes: &[ClassData], selects: P, f: F) -> Vec<ClassData>
where
    P: Fn(&ClassData) -> bool,
    F: Fn(&ClassData) -> ClassData,
{
    classes
        .iter()
        .map(|c| if selects(c) { f(c) } else { c.clone() })
        .collect()
}

fn replace_chapter(semester: &Semester, chapter_id: &str, patch: &ChapterPatch) -> Semester {
    let mut out = semester.clone();
    if let Some(index) = out.chapters.iter().position(|c| c.id == chapter_id) {
        out.chapters[index] = patch.apply(&semester.chapters[index]);
    }
    out
}

fn apply_resource(class: &ClassData, resource: &ClassResource) -> ClassData {
    match resource {
        ClassResource::Schedule(item) => ClassData {
            schedule: Some(item.clone()),
            ..class.clone()
        },
        ClassResource::Grades { semester, item } => map_semester(class, *semester, |s| Semester {
            grades: Some(item.clone()),
            ..s.clone()
        }),
        ClassResource::ExamUpsert { semester, item } => map_semester(class, *semester, |s| Semester {
            exams: upsert_by_key(&s.exams, item.clone()),
            ..s.clone()
        }),
    }
}

/// Ändra ett kapitel i varje klass i årskursen
pub fn replace_chapter_by_grade(
    classes: &[ClassData],
    grade: GradeLevel,
    semester: SemesterId,
    chapter_id: &str,
    patch: &ChapterPatch,
) -> Vec<ClassData> {
    map_classes(
        classes,
        |c| c.grade_level == grade,
        |c| map_semester(c, semester, |s| replace_chapter(s, chapter_id, patch)),
    )
}

/// Sätt en resurs på en enskild klass
pub fn replace_class_resource(
    classes: &[ClassData],
    class_id: &str,
    resource: &ClassResource,
) -> Vec<ClassData> {
    map_classes(classes, |c| c.id == class_id, |c| apply_resource(c, resource))
}

/// Sätt en resurs på varje klass i årskursen
pub fn replace_class_resource_by_grade(
    classes: &[ClassData],
    grade: GradeLevel,
    resource: &ClassResource,
) -> Vec<ClassData> {
    map_classes(
        classes,
        |c| c.grade_level == grade,
        |c| apply_resource(c, resource),
    )
}

/// Ta bort ett prov ur terminens provbank i varje klass i årskursen
pub fn delete_exam_by_grade(
    classes: &[ClassData],
    grade: GradeLevel,
    exam_id: &str,
    semester: SemesterId,
) -> Vec<ClassData> {
    map_classes(
        classes,
        |c| c.grade_level == grade,
        |c| {
            map_semester(c, semester, |s| Semester {
                exams: remove_by_key(&s.exams, exam_id),
                ..s.clone()
            })
        },
    )
}
