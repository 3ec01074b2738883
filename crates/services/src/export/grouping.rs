use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{CategoryId, Question};

const UNCATEGORIZED: &str = "Uncategorized";

/// Questions of one category as they appear on the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionGroup {
    pub category_name: String,
    pub questions: Vec<Question>,
}

/// Group by category name in order of first appearance and shuffle each group
/// independently. Every input question lands in exactly one group.
pub fn group_by_category<R: Rng + ?Sized>(
    questions: Vec<Question>,
    names: &HashMap<CategoryId, String>,
    rng: &mut R,
) -> Vec<QuestionGroup> {
    let mut groups: Vec<QuestionGroup> = Vec::new();
    for question in questions {
        let name = names
            .get(&question.category_id())
            .map_or(UNCATEGORIZED, String::as_str);
        match groups.iter_mut().find(|g| g.category_name == name) {
            Some(group) => group.questions.push(question),
            None => groups.push(QuestionGroup {
                category_name: name.to_owned(),
                questions: vec![question],
            }),
        }
    }
    for group in &mut groups {
        group.questions.shuffle(rng);
    }
    groups
}

/// `"Science Questions"` becomes `"science-questions-questions.pdf"`.
#[must_use]
pub fn export_file_name(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{slug}-questions.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionDraft, QuestionId, QuestionKind};
    use quiz_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn q(category: CategoryId, prompt: &str) -> Question {
        let content = QuestionDraft::new(QuestionKind::Text, prompt, "a")
            .validate()
            .unwrap();
        Question::new(QuestionId::random(), category, content, true, fixed_now())
    }

    #[test]
    fn grouping_keeps_every_question_once() {
        let (a, b, c) = (CategoryId::random(), CategoryId::random(), CategoryId::random());
        let names = HashMap::from([(a, "Maths".to_string()), (b, "Art".to_string())]);
        let input = vec![q(a, "1"), q(b, "2"), q(a, "3"), q(c, "4"), q(b, "5")];
        let expected: HashSet<QuestionId> = input.iter().map(Question::id).collect();

        let groups = group_by_category(input, &names, &mut StdRng::seed_from_u64(9));

        let titles: Vec<&str> = groups.iter().map(|g| g.category_name.as_str()).collect();
        assert_eq!(titles, ["Maths", "Art", "Uncategorized"]);

        let seen: Vec<QuestionId> = groups
            .iter()
            .flat_map(|g| g.questions.iter().map(Question::id))
            .collect();
        assert_eq!(seen.len(), expected.len());
        assert_eq!(seen.into_iter().collect::<HashSet<_>>(), expected);
        assert!(groups[0].questions.iter().all(|x| x.category_id() == a));
    }

    #[test]
    fn same_named_categories_share_a_group() {
        let (a, b) = (CategoryId::random(), CategoryId::random());
        let names = HashMap::from([(a, "Misc".to_string()), (b, "Misc".to_string())]);
        let groups = group_by_category(
            vec![q(a, "1"), q(b, "2")],
            &names,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].questions.len(), 2);
    }

    #[test]
    fn file_name_is_slugged() {
        assert_eq!(
            export_file_name("World  History Questions"),
            "world-history-questions-questions.pdf"
        );
    }
}
