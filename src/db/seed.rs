//! Startdata: klasser med kursplan för årskurs 7–9

use crate::models::{Chapter, ClassData, GradeLevel, SemesterId};

/// (sektion, färg) per klass inom en årskurs
const SECTIONS: &[(&str, &str)] = &[("A", "blue"), ("B", "green"), ("C", "orange")];

/// Kapitel per (årskurs, termin): (titel, beskrivning)
fn curriculum(grade: GradeLevel, semester: SemesterId) -> &'static [(&'static str, &'static str)] {
    match (grade, semester) {
        (GradeLevel::Seven, SemesterId::Ganjil) => &[
            ("Berpikir Komputasional", "Memecahkan masalah dengan dekomposisi, pola dan abstraksi"),
            ("Teknologi Informasi dan Komunikasi", "Mengenal aplikasi perkantoran dan etika digital"),
            ("Sistem Komputer", "Perangkat keras, perangkat lunak dan cara kerjanya"),
        ],
        (GradeLevel::Seven, SemesterId::Genap) => &[
            ("Jaringan Komputer dan Internet", "Konektivitas, internet dan keamanan dasar"),
            ("Analisis Data", "Mengolah dan menyajikan data sederhana"),
            ("Algoritma dan Pemrograman", "Menyusun algoritma dengan pemrograman blok"),
        ],
        (GradeLevel::Eight, SemesterId::Ganjil) => &[
            ("Berpikir Komputasional", "Struktur data dan pencarian"),
            ("Teknologi Informasi dan Komunikasi", "Pengolah kata dan presentasi lanjutan"),
            ("Sistem Komputer", "Representasi data dan sistem bilangan"),
        ],
        (GradeLevel::Eight, SemesterId::Genap) => &[
            ("Jaringan Komputer dan Internet", "Enkripsi dan keamanan data"),
            ("Analisis Data", "Lembar kerja dan visualisasi data"),
            ("Algoritma dan Pemrograman", "Percabangan dan perulangan"),
            ("Dampak Sosial Informatika", "Media sosial dan jejak digital"),
        ],
        (GradeLevel::Nine, SemesterId::Ganjil) => &[
            ("Berpikir Komputasional", "Graf, pohon dan optimasi sederhana"),
            ("Teknologi Informasi dan Komunikasi", "Publikasi dan kolaborasi daring"),
            ("Sistem Komputer", "Sistem operasi dan otomasi"),
        ],
        (GradeLevel::Nine, SemesterId::Genap) => &[
            ("Jaringan Komputer dan Internet", "Infrastruktur jaringan dan cloud"),
            ("Analisis Data", "Pengumpulan data dan interpretasi"),
            ("Algoritma dan Pemrograman", "Membuat program teks sederhana"),
            ("Praktik Lintas Bidang", "Proyek informatika berkelompok"),
        ],
    }
}

/// Kapitel-id är gemensamma för alla klasser i samma årskurs så att
/// ändringar per årskurs träffar samma kapitel i varje klass.
pub fn chapter_id(grade: GradeLevel, semester: SemesterId, number: usize) -> String {
    format!("{}-{}-bab{}", grade.as_str(), semester.as_str(), number)
}

/// Alla klasser med tomma resurser och kursplanens kapitel
pub fn seed_classes() -> Vec<ClassData> {
    let mut classes = Vec::new();

    for grade in GradeLevel::all() {
        for (section, color) in SECTIONS {
            let id = format!("{}{}", grade.as_str(), section);
            let mut class = ClassData::new(id.clone(), format!("Kelas {}", id), *grade, *color);

            for semester in class.semesters.iter_mut() {
                semester.chapters = curriculum(*grade, semester.id)
                    .iter()
                    .enumerate()
                    .map(|(i, (title, description))| {
                        Chapter::new(chapter_id(*grade, semester.id, i + 1), *title, *description)
                    })
                    .collect();
            }

            classes.push(class);
        }
    }

    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_three_classes_per_grade() {
        let classes = seed_classes();
        assert_eq!(classes.len(), 9);
        for grade in GradeLevel::all() {
            let count = classes.iter().filter(|c| c.grade_level == *grade).count();
            assert_eq!(count, 3);
        }
    }

    #[test]
    fn test_seed_chapter_ids_shared_within_grade() {
        let classes = seed_classes();
        let a = classes.iter().find(|c| c.id == "8A").unwrap();
        let c = classes.iter().find(|c| c.id == "8C").unwrap();

        assert_eq!(a.semesters, c.semesters);
        assert_eq!(a.semesters[1].chapters[0].id, "8-genap-bab1");
    }

    #[test]
    fn test_seed_chapter_ids_unique_per_semester() {
        for class in seed_classes() {
            for semester in &class.semesters {
                let mut ids: Vec<&str> = semester.chapters.iter().map(|c| c.id.as_str()).collect();
                let total = ids.len();
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), total, "dubbletter i {} {}", class.id, semester.id);
            }
        }
    }
}
