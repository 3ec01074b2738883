use quiz_core::model::{QuestionDraft, QuestionKind};
use services::AppServices;

/// Rows written by a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub folders: usize,
    pub categories: usize,
    pub questions: usize,
}

struct DemoCategory {
    name: &'static str,
    questions: fn() -> Vec<QuestionDraft>,
}

struct DemoFolder {
    name: &'static str,
    categories: &'static [DemoCategory],
}

const DEMO: &[DemoFolder] = &[
    DemoFolder {
        name: "General Knowledge",
        categories: &[
            DemoCategory {
                name: "Geography",
                questions: geography,
            },
            DemoCategory {
                name: "Science",
                questions: science,
            },
        ],
    },
    DemoFolder {
        name: "Flags",
        categories: &[DemoCategory {
            name: "Europe",
            questions: flags,
        }],
    },
];

fn geography() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft::new(QuestionKind::Text, "What is the capital of France?", "Paris"),
        QuestionDraft::new(
            QuestionKind::MultipleChoice,
            "Which is the longest river in the world?",
            "Nile",
        )
        .with_options(["Amazon", "Nile", "Yangtze", "Mississippi"]),
        QuestionDraft::new(QuestionKind::TrueFalse, "Australia is a continent.", "true"),
        QuestionDraft::new(QuestionKind::TrueFalse, "Mount Everest is in Peru.", "false"),
    ]
}

fn science() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft::new(QuestionKind::Text, "What is the chemical symbol for gold?", "Au"),
        QuestionDraft::new(
            QuestionKind::MultipleChoice,
            "Which planet is known as the Red Planet?",
            "Mars",
        )
        .with_options(["Venus", "Mars", "Jupiter"]),
        QuestionDraft::new(QuestionKind::TrueFalse, "Sound travels faster than light.", "false"),
        QuestionDraft::new(QuestionKind::Text, "How many legs does a spider have?", "8")
            .with_active(false),
    ]
}

fn flags() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft::new(QuestionKind::Image, "Which country does this flag belong to?", "France")
            .with_image_url(
                "https://upload.wikimedia.org/wikipedia/en/thumb/c/c3/Flag_of_France.svg/320px-Flag_of_France.svg.png",
            ),
        QuestionDraft::new(
            QuestionKind::MultipleChoice,
            "Which colour is not on the Italian flag?",
            "Blue",
        )
        .with_options(["Green", "White", "Red", "Blue"]),
    ]
}

/// Create the demo folders that do not exist yet; existing ones are left alone.
///
/// # Errors
///
/// Returns the first service error; rows written before it stay in place.
pub async fn seed_demo(services: &AppServices) -> Result<SeedReport, Box<dyn std::error::Error>> {
    let existing: Vec<String> = services
        .folders()
        .list_folders()
        .await?
        .iter()
        .map(|folder| folder.name().to_owned())
        .collect();

    let mut report = SeedReport::default();
    for demo in DEMO {
        if existing.iter().any(|name| name == demo.name) {
            log::info!("seed: folder {:?} already present, skipping", demo.name);
            continue;
        }
        let folder = services.folders().create_folder(demo.name).await?;
        report.folders += 1;
        for demo_category in demo.categories {
            let category = services
                .categories()
                .create_category(folder.id(), demo_category.name)
                .await?;
            report.categories += 1;
            for draft in (demo_category.questions)() {
                services
                    .questions()
                    .create_question(category.id(), draft)
                    .await?;
                report.questions += 1;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizSettings;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn seeding_twice_only_writes_once() {
        let services = AppServices::in_memory(fixed_clock(), QuizSettings::default());
        let first = seed_demo(&services).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                folders: 2,
                categories: 3,
                questions: 10,
            }
        );
        assert_eq!(seed_demo(&services).await.unwrap(), SeedReport::default());
        assert_eq!(services.folders().list_folders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn seeded_categories_are_playable() {
        let services = AppServices::in_memory(fixed_clock(), QuizSettings::default());
        seed_demo(&services).await.unwrap();
        let folders = services.quiz().list_folders().await.unwrap();
        let categories = services.quiz().list_categories(folders[0].id()).await.unwrap();
        let session = services.quiz().start_session(categories[1].id()).await;
        // one science question is inactive
        assert_eq!(session.total(), 3);
    }
}
