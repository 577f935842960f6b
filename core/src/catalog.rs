//! Static course catalog: module groups, chapters, and downloadable materials.
//!
//! The catalog is the only course data the backend owns. It is built once at
//! startup and shared read-only across requests; the quiz endpoint uses it to
//! scope prompts to a chapter title, and the content endpoints expose it to
//! the frontend.

use serde::Serialize;

/// A single chapter within a module group
#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub video_url: String,
}

/// A group of chapters sharing one downloadable PDF
#[derive(Debug, Clone, Serialize)]
pub struct CourseModule {
    pub key: String,
    pub title: String,
    pub download_url: String,
    pub chapters: Vec<Chapter>,
}

/// The full curriculum
#[derive(Debug, Clone, Serialize)]
pub struct CourseCatalog {
    modules: Vec<CourseModule>,
}

impl CourseCatalog {
    /// The built-in eleven-chapter medical-statistics curriculum
    pub fn builtin() -> Self {
        let chapter = |id: &str, title: &str| Chapter {
            id: id.to_string(),
            title: title.to_string(),
            video_url: "https://www.youtube.com/embed/placeholder".to_string(),
        };

        Self {
            modules: vec![
                CourseModule {
                    key: "module1-3".to_string(),
                    title: "Modules 1-3: Foundations of Medical Research".to_string(),
                    download_url: "/static/downloads/chapters-1-3.pdf".to_string(),
                    chapters: vec![
                        chapter("1", "Chapter 1: Overview of Research in Medicine"),
                        chapter("2", "Chapter 2: Problem Statements, Objectives and Hypotheses"),
                        chapter("3", "Chapter 3: Study Designs and Sample Size"),
                    ],
                },
                CourseModule {
                    key: "module4-6".to_string(),
                    title: "Modules 4-6: Data Collection, Analysis and Reporting".to_string(),
                    download_url: "/static/downloads/chapters-4-6.pdf".to_string(),
                    chapters: vec![
                        chapter("4", "Chapter 4: Variables and Data Collection Techniques"),
                        chapter("5", "Chapter 5: Summarizing, Analyzing and Presenting Data"),
                        chapter("6", "Chapter 6: Writing and Presenting a Research Report"),
                    ],
                },
                CourseModule {
                    // One PDF covers all chapters in this group
                    key: "module7-11".to_string(),
                    title: "Modules 7-11: SPSS Practice Labs".to_string(),
                    download_url: "/static/downloads/chapters-7-8.pdf".to_string(),
                    chapters: vec![
                        chapter("7", "Chapters 7 & 8: Entering and Cleaning Data"),
                        chapter("9", "Chapter 9: Computing and Transforming Data"),
                        chapter("10", "Chapters 10 & 11: Descriptive Statistics and Significance Tests"),
                    ],
                },
            ],
        }
    }

    /// All module groups, in curriculum order
    pub fn modules(&self) -> &[CourseModule] {
        &self.modules
    }

    /// Find a chapter and its enclosing module by chapter id
    pub fn chapter(&self, id: &str) -> Option<(&CourseModule, &Chapter)> {
        self.modules.iter().find_map(|module| {
            module
                .chapters
                .iter()
                .find(|chapter| chapter.id == id)
                .map(|chapter| (module, chapter))
        })
    }

    /// Title of the chapter with the given id, if it exists
    pub fn chapter_title(&self, id: &str) -> Option<&str> {
        self.chapter(id).map(|(_, chapter)| chapter.title.as_str())
    }

    /// Content slug for a chapter id.
    ///
    /// Chapters 7 and 10 share merged content pages with their successors.
    pub fn content_slug(id: &str) -> String {
        match id {
            "7" => "7_8".to_string(),
            "10" => "10_11".to_string(),
            other => other.to_string(),
        }
    }
}
