//! Deterministic assembly of the generation instruction.

use crate::domain::foundation::Gender;
use crate::domain::intake::{Choice, CompleteAnswers, FormatMode};

use super::contract::{
    closings, education_clause, CORE_LINE_WORDS, FORBIDDEN_PHRASES, GREETINGS, HEADER_LINES,
    IDENTITY_PREFIX, TELEGRAPHIC_MAX_WORDS,
};

const PREAMBLE: &str = "Ты редактор актёрских видеовизиток для кастингов. \
Напиши один текст видеовизитки, который актёр произнесёт в камеру.";

const EDITORIAL_RULES: &[&str] = &[
    "не резюме и не перечень достижений",
    "не объяснение и не рассказ о себе",
    "одно цельное впечатление о человеке",
    "текст читается и без звука",
    "недосказанность важнее полноты",
];

/// Builds the instruction sent to the generation backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

fn gender_note(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => {
            "Актёр мужчина: все глаголы прошедшего времени и краткие прилагательные \
             о себе в мужском роде (окончил, рад, готов)."
        }
        Gender::Female => {
            "Актриса женщина: все глаголы прошедшего времени и краткие прилагательные \
             о себе в женском роде (окончила, рада, готова)."
        }
    }
}

fn quoted(items: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    items
        .into_iter()
        .map(|item| format!("«{}»", item.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Renders the instruction. Same inputs always give the same text.
    pub fn build(&self, answers: &CompleteAnswers, mode: FormatMode) -> String {
        let sections = [
            vec![PREAMBLE.to_string()],
            data_section(answers, mode),
            structure_section(answers),
            vec![gender_note(answers.gender).to_string()],
            rules_section(answers.gender),
            vec![
                format!(
                    "Запрещено использовать: {}.",
                    quoted(FORBIDDEN_PHRASES.iter().map(|entry| entry.phrase))
                ),
                "Выведи только текст визитки: без заголовков, нумерации, вариантов, \
                 пояснений и оформления."
                    .to_string(),
            ],
        ];

        sections
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn data_section(answers: &CompleteAnswers, mode: FormatMode) -> Vec<String> {
    let project = match mode {
        FormatMode::ProjectSpecific => format!("Проект: {}", answers.project.label()),
        FormatMode::Universal => format!(
            "Проект: {} (только ориентир, визитка должна подойти и для других проектов)",
            answers.project.label()
        ),
    };

    vec![
        "Данные:".to_string(),
        project,
        format!("Задача визитки: {}", answers.purpose.label()),
        format!("Имя: {}", answers.name),
        format!("Образование: {}", answers.education),
        format!("Действие в кадре: {}", answers.action.label()),
        format!("Присутствие: {}", answers.presence.label()),
        format!("Поведение: {}", answers.behavior.label()),
        format!("Тон: {}", answers.tone.label()),
    ]
}

fn structure_section(answers: &CompleteAnswers) -> Vec<String> {
    let core_lines = answers.length.core_lines();
    let first_core = HEADER_LINES + 1;
    let last_core = HEADER_LINES + core_lines;

    vec![
        "Структура, каждая фраза на отдельной строке:".to_string(),
        format!("1. Приветствие, ровно одно из: {}.", quoted(GREETINGS)),
        format!("2. «{} {}.»", IDENTITY_PREFIX, answers.name),
        format!(
            "3. «{} {}.»",
            education_clause(answers.gender),
            answers.education
        ),
        format!(
            "{}–{}. Ровно {} фразы о впечатлении, каждая от {} до {} слов. \
             Две фразы подряд короче {} слов недопустимы.",
            first_core,
            last_core,
            core_lines,
            CORE_LINE_WORDS.start(),
            CORE_LINE_WORDS.end(),
            TELEGRAPHIC_MAX_WORDS + 1
        ),
        format!(
            "{}. «{}»",
            last_core + 1,
            answers.closing.text(answers.gender)
        ),
    ]
}

fn rules_section(gender: Gender) -> Vec<String> {
    let mut lines = vec!["Правила:".to_string()];
    lines.extend(EDITORIAL_RULES.iter().map(|rule| format!("- {}", rule)));
    lines.push("- имя не повторяется отдельной строкой".to_string());
    lines.push(format!(
        "- последняя строка только одна из: {}",
        quoted(closings(gender))
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{fixtures::complete_answer_set, ScriptLength};
    use crate::domain::script::ClosingPhrase;

    fn male() -> CompleteAnswers {
        complete_answer_set().complete().unwrap()
    }

    fn female() -> CompleteAnswers {
        let mut answers = male();
        answers.gender = Gender::Female;
        answers.name = "Анна Смирнова".to_string();
        answers.closing = ClosingPhrase::SeeYouAtAudition;
        answers
    }

    #[test]
    fn build_is_deterministic() {
        let builder = PromptBuilder::new();
        let answers = male();
        assert_eq!(
            builder.build(&answers, FormatMode::ProjectSpecific),
            builder.build(&answers, FormatMode::ProjectSpecific)
        );
    }

    #[test]
    fn embeds_answer_fields() {
        let prompt = PromptBuilder::new().build(&male(), FormatMode::ProjectSpecific);
        assert!(prompt.contains("Меня зовут Иван Петров."));
        assert!(prompt.contains("Щукинское училище, курс Владимира Иванова"));
        assert!(prompt.contains("Современная драма"));
        assert!(prompt.contains("Спокойный центр"));
    }

    #[test]
    fn male_variant_uses_male_clause_and_closings() {
        let prompt = PromptBuilder::new().build(&male(), FormatMode::ProjectSpecific);
        assert!(prompt.contains("«Я окончил Щукинское"));
        assert!(prompt.contains("«Буду рад работать вместе.»"));
        assert!(!prompt.contains("Буду рада"));
    }

    #[test]
    fn female_variant_uses_female_clause_and_closings() {
        let prompt = PromptBuilder::new().build(&female(), FormatMode::ProjectSpecific);
        assert!(prompt.contains("«Я окончила Щукинское"));
        assert!(prompt.contains("7. «Буду рада встрече на пробах.»"));
        assert!(!prompt.contains("Буду рад "));
    }

    #[test]
    fn lists_every_forbidden_phrase() {
        let prompt = PromptBuilder::new().build(&male(), FormatMode::ProjectSpecific);
        for entry in FORBIDDEN_PHRASES {
            assert!(
                prompt.contains(&format!("«{}»", entry.phrase)),
                "missing {:?}",
                entry.phrase
            );
        }
    }

    #[test]
    fn core_line_count_follows_length() {
        let mut answers = male();
        let short = PromptBuilder::new().build(&answers, FormatMode::ProjectSpecific);
        assert!(short.contains("4–6. Ровно 3 фразы"));

        answers.length = ScriptLength::Extended;
        let extended = PromptBuilder::new().build(&answers, FormatMode::ProjectSpecific);
        assert!(extended.contains("4–7. Ровно 4 фразы"));
        assert!(extended.contains("8. «Спасибо за внимание.»"));
    }

    #[test]
    fn sections_are_separated_by_single_blank_lines() {
        let prompt = PromptBuilder::new().build(&male(), FormatMode::ProjectSpecific);
        assert!(prompt.starts_with(PREAMBLE));
        assert!(prompt.contains(".\n\nДанные:\nПроект: Современная драма\n"));
        assert!(!prompt.contains("\n\n\n"));
        assert!(prompt.ends_with("пояснений и оформления."));
    }

    #[test]
    fn universal_mode_changes_project_line() {
        let builder = PromptBuilder::new();
        let answers = male();
        let specific = builder.build(&answers, FormatMode::ProjectSpecific);
        let universal = builder.build(&answers, FormatMode::Universal);
        assert_ne!(specific, universal);
        assert!(universal.contains("только ориентир"));
    }
}
