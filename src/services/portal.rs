//! Portalens kontroller
//!
//! Äger applikationstillståndet (profil, klassträd, elever, extramaterial)
//! och dokumentlagret. Varje ändring körs genom uppdateringsmotorn, ersätter
//! det lokala tillståndet och skrivs sedan till lagret. Lokalt tillstånd
//! gäller även om skrivningen misslyckas.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::db::seed::seed_classes;
use crate::db::{Collection, DocumentStore};
use crate::engine::{self, ChapterPatch, ClassResource};
use crate::models::{
    Chapter, ClassData, ExtraCategory, ExtraContent, GradeLevel, ProfilePatch, ResourceItem,
    SchoolProfile, SemesterId, Student,
};
use crate::roster::{ImportResult, RosterImporter, RosterRow, SpreadsheetParser};
use crate::utils::{AppError, AppResult};

use super::sync::{SyncOutcome, Synchronizer};

/// Allt portalen visar, i minnet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortalState {
    pub profile: SchoolProfile,
    pub classes: Vec<ClassData>,
    pub students: Vec<Student>,
    pub extras: Vec<ExtraContent>,
}

impl PortalState {
    /// Tillstånd från startdata, används när lagret inte går att läsa
    pub fn seeded() -> Self {
        Self {
            profile: SchoolProfile::default(),
            classes: seed_classes(),
            students: Vec::new(),
            extras: Vec::new(),
        }
    }
}

pub struct Portal<S: DocumentStore> {
    store: S,
    state: PortalState,
}

impl<S: DocumentStore> Portal<S> {
    /// Läs in allt från lagret. Tomt lager fylls med startdata.
    pub fn load(store: S) -> Self {
        let state = match Self::hydrate(&store) {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Kunde inte läsa dokumentlagret, startar från startdata: {:#}", e);
                PortalState::seeded()
            }
        };

        tracing::info!(
            "Portal laddad: {} klasser, {} elever, {} extramaterial",
            state.classes.len(),
            state.students.len(),
            state.extras.len()
        );

        Self { store, state }
    }

    /// Läs om allt från lagret (t.ex. efter restore)
    pub fn reload(&mut self) {
        match Self::hydrate(&self.store) {
            Ok(state) => self.state = state,
            Err(e) => tracing::error!("Kunde inte läsa om dokumentlagret: {:#}", e),
        }
    }

    fn hydrate(store: &S) -> Result<PortalState> {
        let sync = Synchronizer::new(store);

        let profile = match store.get(Collection::Settings, SchoolProfile::DOCUMENT_ID)? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("Ogiltig skolprofil, använder standard: {}", e);
                SchoolProfile::default()
            }),
            None => {
                let profile = SchoolProfile::default();
                sync.sync_one(Collection::Settings, SchoolProfile::DOCUMENT_ID, &profile);
                profile
            }
        };

        // Startdata skrivs bara till ett helt tomt lager, aldrig över
        // befintliga dokument som inte gick att tolka
        let raw_classes = store.get_all(Collection::Classes)?;
        let classes = if raw_classes.is_empty() {
            tracing::info!("Inga klasser i lagret, skriver startdata");
            let classes = seed_classes();
            sync.sync_many(Collection::Classes, &classes);
            classes
        } else {
            let mut classes: Vec<ClassData> = parse_documents(Collection::Classes, raw_classes);

            let mut repaired = Vec::new();
            for class in classes.iter_mut() {
                if class.ensure_semesters() {
                    repaired.push(class.id.clone());
                }
            }
            if !repaired.is_empty() {
                tracing::warn!("Lade till saknade terminer i {} klasser", repaired.len());
                sync.sync_many(
                    Collection::Classes,
                    classes.iter().filter(|c| repaired.contains(&c.id)),
                );
            }
            classes
        };

        let students = load_collection(store, Collection::Students)?;
        let extras = load_collection(store, Collection::Extras)?;

        Ok(PortalState {
            profile,
            classes,
            students,
            extras,
        })
    }

    fn sync(&self) -> Synchronizer<'_, S> {
        Synchronizer::new(&self.store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &PortalState {
        &self.state
    }

    // ------------------------------------------------------------
    // Läsning
    // ------------------------------------------------------------

    pub fn profile(&self) -> &SchoolProfile {
        &self.state.profile
    }

    pub fn classes(&self) -> &[ClassData] {
        &self.state.classes
    }

    pub fn class(&self, class_id: &str) -> Option<&ClassData> {
        self.state.classes.iter().find(|c| c.id == class_id)
    }

    pub fn classes_in_grade(&self, grade: GradeLevel) -> Vec<&ClassData> {
        engine::classes_in_grade(&self.state.classes, grade)
    }

    pub fn chapter(&self, class_id: &str, semester: SemesterId, chapter_id: &str) -> Option<&Chapter> {
        self.class(class_id)?.semester(semester)?.chapter(chapter_id)
    }

    pub fn students(&self) -> &[Student] {
        &self.state.students
    }

    pub fn students_in_class(&self, class_id: &str) -> Vec<&Student> {
        self.state
            .students
            .iter()
            .filter(|s| s.class_id == class_id)
            .collect()
    }

    /// Elevinloggning: namnet måste finnas i vald klass
    pub fn find_student(&self, class_id: &str, name: &str) -> Option<&Student> {
        self.state
            .students
            .iter()
            .find(|s| s.class_id == class_id && s.matches_name(name))
    }

    pub fn extras(&self) -> &[ExtraContent] {
        &self.state.extras
    }

    pub fn extras_in_category(&self, category: ExtraCategory) -> Vec<&ExtraContent> {
        self.state
            .extras
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    // ------------------------------------------------------------
    // Klassträdet
    // ------------------------------------------------------------

    /// Ändra ett kapitel för hela årskursen
    pub fn update_chapter(
        &mut self,
        grade: GradeLevel,
        semester: SemesterId,
        chapter_id: &str,
        patch: &ChapterPatch,
    ) -> SyncOutcome {
        let after =
            engine::replace_chapter_by_grade(&self.state.classes, grade, semester, chapter_id, patch);
        self.commit_grade(grade, after)
    }

    /// Sätt schema eller betygsöversikt (eller prov) på en enskild klass
    pub fn set_class_resource(&mut self, class_id: &str, resource: &ClassResource) -> SyncOutcome {
        let after = engine::replace_class_resource(&self.state.classes, class_id, resource);
        let changed = engine::changed_ids(&self.state.classes, &after);
        self.state.classes = after;

        if changed.is_empty() {
            return SyncOutcome::Skipped;
        }

        let sync = self.sync();
        let docs = self.state.classes.iter().filter(|c| changed.contains(&c.id));
        sync.sync_many(Collection::Classes, docs)
    }

    /// Sätt en resurs på varje klass i årskursen
    pub fn set_grade_resource(&mut self, grade: GradeLevel, resource: &ClassResource) -> SyncOutcome {
        let after = engine::replace_class_resource_by_grade(&self.state.classes, grade, resource);
        self.commit_grade(grade, after)
    }

    /// Lägg till eller ändra ett prov i årskursens provbank
    pub fn upsert_exam(&mut self, grade: GradeLevel, semester: SemesterId, item: ResourceItem) -> SyncOutcome {
        self.set_grade_resource(grade, &ClassResource::ExamUpsert { semester, item })
    }

    /// Ta bort ett prov ur årskursens provbank
    pub fn delete_exam(&mut self, grade: GradeLevel, semester: SemesterId, exam_id: &str) -> SyncOutcome {
        let after = engine::delete_exam_by_grade(&self.state.classes, grade, exam_id, semester);
        self.commit_grade(grade, after)
    }

    /// Varje klass i årskursen bär en egen kopia, så hela årskursen skrivs
    /// i samma batch så fort någon av dem ändrats
    fn commit_grade(&mut self, grade: GradeLevel, after: Vec<ClassData>) -> SyncOutcome {
        let changed = engine::changed_ids(&self.state.classes, &after);
        self.state.classes = after;

        if changed.is_empty() {
            return SyncOutcome::Skipped;
        }

        let group = engine::classes_in_grade(&self.state.classes, grade);
        self.sync().sync_many(Collection::Classes, group)
    }

    // ------------------------------------------------------------
    // Elever
    // ------------------------------------------------------------

    /// Spara en elev från formuläret. Namn och NIS krävs.
    pub fn save_student(&mut self, student: Student) -> AppResult<SyncOutcome> {
        student.validate()?;
        if self.class(&student.class_id).is_none() {
            return Err(AppError::not_found(format!("Klass {}", student.class_id)));
        }

        Ok(self.put_student(student))
    }

    fn put_student(&mut self, student: Student) -> SyncOutcome {
        self.state.students = engine::upsert_student(&self.state.students, student.clone());
        self.sync().sync_one(Collection::Students, &student.id, &student)
    }

    pub fn delete_student(&mut self, id: &str) -> SyncOutcome {
        self.state.students = engine::delete_student(&self.state.students, id);
        self.sync().remove(Collection::Students, id)
    }

    /// Importera rader; varje elev sparas för sig, sista raden vinner vid samma id
    pub fn import_roster(&mut self, rows: &[RosterRow]) -> ImportResult {
        let mut result = RosterImporter::new().import_rows(rows);

        let mut failed = 0;
        for student in result.students.clone() {
            if self.put_student(student).is_failed() {
                failed += 1;
            }
        }

        if failed > 0 {
            result
                .warnings
                .push(format!("{} elever kunde inte sparas i lagret", failed));
        }

        tracing::info!("Elevimport klar: {}", result.summary());
        result
    }

    /// Tolka ett kalkylblad och importera raderna
    pub fn import_roster_bytes<P: SpreadsheetParser + ?Sized>(
        &mut self,
        parser: &P,
        bytes: &[u8],
    ) -> AppResult<ImportResult> {
        let rows = parser.parse(bytes)?;
        Ok(self.import_roster(&rows))
    }

    // ------------------------------------------------------------
    // Extramaterial
    // ------------------------------------------------------------

    pub fn save_extra(&mut self, extra: ExtraContent) -> AppResult<SyncOutcome> {
        if extra.id.trim().is_empty() {
            return Err(AppError::validation("Extramaterial saknar id"));
        }
        if extra.title.trim().is_empty() {
            return Err(AppError::validation("Titel krävs"));
        }

        self.state.extras = engine::upsert_extra(&self.state.extras, extra.clone());
        Ok(self.sync().sync_one(Collection::Extras, &extra.id, &extra))
    }

    pub fn delete_extra(&mut self, id: &str) -> SyncOutcome {
        self.state.extras = engine::delete_extra(&self.state.extras, id);
        self.sync().remove(Collection::Extras, id)
    }

    // ------------------------------------------------------------
    // Skolprofil
    // ------------------------------------------------------------

    pub fn update_profile(&mut self, patch: &ProfilePatch) -> AppResult<SyncOutcome> {
        patch.validate()?;

        self.state.profile = engine::merge_profile(&self.state.profile, patch);
        Ok(self
            .sync()
            .sync_one(Collection::Settings, SchoolProfile::DOCUMENT_ID, &self.state.profile))
    }
}

/// Läs och tolka alla dokument i en samling. Ogiltiga dokument hoppas över.
fn load_collection<S, T>(store: &S, collection: Collection) -> Result<Vec<T>>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    Ok(parse_documents(collection, store.get_all(collection)?))
}

fn parse_documents<T: DeserializeOwned>(collection: Collection, docs: Vec<(String, Value)>) -> Vec<T> {
    let mut items = Vec::with_capacity(docs.len());

    for (id, value) in docs {
        match serde_json::from_value(value) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!("Hoppar över ogiltigt dokument {}/{}: {}", collection, id, e),
        }
    }

    items
}
