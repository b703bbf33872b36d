use crate::db::DocumentStore;
use crate::models::{AppSettings, ExtraCategory, SemesterId, Student};
use crate::services::Portal;

/// Felmeddelande vid fel adminlösenord
pub const WRONG_PASSWORD: &str = "Password salah!";

/// Felmeddelande när namnet inte finns i vald klass
pub const STUDENT_NOT_FOUND: &str = "Nama tidak ditemukan di kelas ini.";

/// Aktuell vy i portalen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    StudentLogin,
    ClassDetail,
    ChapterContent,
    AdminLogin,
    AdminDashboard,
    ExtraCategoryList,
}

/// Jämför mot det delade adminlösenordet
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Spärr med lösenordet från inställningarna
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.admin_password.clone())
    }

    pub fn verify(&self, attempt: &str) -> Result<(), &'static str> {
        if attempt == self.secret {
            Ok(())
        } else {
            Err(WRONG_PASSWORD)
        }
    }
}

/// Navigationstillstånd. Äger ingen data, bara vad som är valt.
#[derive(Debug, Default)]
pub struct AppState {
    /// Aktuell vy
    pub current_view: View,

    pub selected_class_id: Option<String>,
    pub selected_chapter_id: Option<String>,
    pub selected_semester: SemesterId,
    pub selected_category: Option<ExtraCategory>,

    /// Inloggad elev
    pub logged_in_student: Option<Student>,

    pub admin_error: Option<String>,
    pub login_error: Option<String>,

    /// Statusmeddelande
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Välj klass på startsidan
    pub fn open_student_login(&mut self, class_id: &str) {
        self.selected_class_id = Some(class_id.to_string());
        self.login_error = None;
        self.current_view = View::StudentLogin;
    }

    /// Logga in elev med namn i vald klass
    pub fn login_student<S: DocumentStore>(&mut self, portal: &Portal<S>, name: &str) -> bool {
        let Some(class_id) = self.selected_class_id.as_deref() else {
            self.login_error = Some(STUDENT_NOT_FOUND.to_string());
            return false;
        };

        match portal.find_student(class_id, name) {
            Some(student) => {
                tracing::info!("Elev {} loggade in i {}", student.id, class_id);
                self.logged_in_student = Some(student.clone());
                self.login_error = None;
                self.current_view = View::ClassDetail;
                true
            }
            None => {
                self.login_error = Some(STUDENT_NOT_FOUND.to_string());
                false
            }
        }
    }

    pub fn select_semester(&mut self, semester: SemesterId) {
        self.selected_semester = semester;
    }

    /// Öppna ett kapitel i vald klass
    pub fn open_chapter(&mut self, chapter_id: &str) {
        self.selected_chapter_id = Some(chapter_id.to_string());
        self.current_view = View::ChapterContent;
    }

    /// Tillbaka från kapitel till klassvyn
    pub fn close_chapter(&mut self) {
        self.selected_chapter_id = None;
        self.current_view = View::ClassDetail;
    }

    pub fn open_admin_login(&mut self) {
        self.admin_error = None;
        self.current_view = View::AdminLogin;
    }

    pub fn submit_admin_password(&mut self, gate: &AdminGate, attempt: &str) -> bool {
        match gate.verify(attempt) {
            Ok(()) => {
                self.admin_error = None;
                self.current_view = View::AdminDashboard;
                true
            }
            Err(message) => {
                self.admin_error = Some(message.to_string());
                false
            }
        }
    }

    pub fn open_extra_category(&mut self, category: ExtraCategory) {
        self.selected_category = Some(category);
        self.current_view = View::ExtraCategoryList;
    }

    /// Tillbaka till startsidan. Inloggad elev behålls.
    pub fn back_to_landing(&mut self) {
        self.selected_chapter_id = None;
        self.selected_category = None;
        self.admin_error = None;
        self.current_view = View::Landing;
    }

    /// Logga ut elev eller admin
    pub fn logout(&mut self) {
        self.logged_in_student = None;
        self.selected_class_id = None;
        self.selected_chapter_id = None;
        self.selected_semester = SemesterId::default();
        self.current_view = View::Landing;
    }

    /// Visa statusmeddelande
    pub fn show_status(&mut self, message: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: message.to_string(),
            status_type,
            created_at: std::time::Instant::now(),
        });
    }

    pub fn show_success(&mut self, message: &str) {
        self.show_status(message, StatusType::Success);
    }

    pub fn show_error(&mut self, message: &str) {
        self.show_status(message, StatusType::Error);
    }

    pub fn show_info(&mut self, message: &str) {
        self.show_status(message, StatusType::Info);
    }

    /// Rensa statusmeddelande om det är för gammalt
    pub fn clear_old_status(&mut self) {
        if let Some(ref status) = self.status_message {
            if status.created_at.elapsed().as_secs() > STATUS_TTL_SECS {
                self.status_message = None;
            }
        }
    }
}

const STATUS_TTL_SECS: u64 = 5;

/// Statusmeddelande
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub status_type: StatusType,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Success,
    Error,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::testing::RecordingStore;
    use crate::models::Gender;

    fn portal_with_student() -> Portal<RecordingStore> {
        let mut portal = Portal::load(RecordingStore::default());
        portal
            .save_student(Student::new("9001", "Budi", Gender::Male, "8B"))
            .unwrap();
        portal
    }

    #[test]
    fn test_student_login_flow() {
        let portal = portal_with_student();
        let mut state = AppState::new();

        state.open_student_login("8B");
        assert_eq!(state.current_view, View::StudentLogin);

        assert!(state.login_student(&portal, "  budi "));
        assert_eq!(state.current_view, View::ClassDetail);
        assert_eq!(state.logged_in_student.as_ref().unwrap().id, "9001");

        state.open_chapter("8-ganjil-bab1");
        assert_eq!(state.current_view, View::ChapterContent);
        state.close_chapter();
        assert_eq!(state.current_view, View::ClassDetail);

        state.logout();
        assert_eq!(state.current_view, View::Landing);
        assert!(state.logged_in_student.is_none());
    }

    #[test]
    fn test_student_login_wrong_class() {
        let portal = portal_with_student();
        let mut state = AppState::new();

        state.open_student_login("8A");
        assert!(!state.login_student(&portal, "Budi"));
        assert_eq!(state.current_view, View::StudentLogin);
        assert_eq!(state.login_error.as_deref(), Some(STUDENT_NOT_FOUND));
    }

    #[test]
    fn test_admin_gate() {
        let gate = AdminGate::new("rahasia");
        let mut state = AppState::new();
        state.open_admin_login();

        assert!(!state.submit_admin_password(&gate, "salah"));
        assert_eq!(state.admin_error.as_deref(), Some("Password salah!"));
        assert_eq!(state.current_view, View::AdminLogin);

        assert!(state.submit_admin_password(&gate, "rahasia"));
        assert_eq!(state.current_view, View::AdminDashboard);
        assert!(state.admin_error.is_none());
    }

    #[test]
    fn test_gate_uses_configured_password() {
        let settings = AppSettings {
            admin_password: "kepsek2026".into(),
            ..AppSettings::default()
        };
        let gate = AdminGate::from_settings(&settings);

        assert_eq!(gate.verify(crate::models::DEFAULT_ADMIN_PASSWORD), Err(WRONG_PASSWORD));
        assert_eq!(gate.verify("kepsek2026"), Ok(()));
    }

    #[test]
    fn test_extra_category_and_back() {
        let mut state = AppState::new();
        state.open_extra_category(ExtraCategory::Game);
        assert_eq!(state.current_view, View::ExtraCategoryList);
        assert_eq!(state.selected_category, Some(ExtraCategory::Game));

        state.back_to_landing();
        assert_eq!(state.current_view, View::Landing);
        assert!(state.selected_category.is_none());
    }

    #[test]
    fn test_status_message() {
        let mut state = AppState::new();
        state.show_success("Tersimpan");
        state.clear_old_status();

        let status = state.status_message.as_ref().unwrap();
        assert_eq!(status.status_type, StatusType::Success);
        assert_eq!(status.text, "Tersimpan");
    }
}
