//! Prompt assembly for the assistant.
//!
//! The prompt is the learner's profile preamble, an optional earlier message
//! normalized into a sentence, and the new message appended verbatim.

use crate::models::{LearningStyle, User};

/// The profile block, one `\n`-terminated line per attribute plus a blank line.
pub fn profile_preamble(user: &User, style: &LearningStyle) -> String {
    format!(
        "My name is: {}\n\
         My age is: {}\n\
         My gender is: {}\n\
         My study program (major) is: {}\n\
         My employment status is: {}\n\
         My civil status is: {}\n\
         My Learning Style is: {}. {}.\n\
         \n",
        user.name,
        user.age,
        user.gender,
        user.course_program_study,
        user.employment_status,
        user.civil_status,
        style.learning_style_name,
        style.description,
    )
}

/// Terminates `pre` with a period (unless it already ends in one) and a newline.
pub fn normalize_pre_message(pre: &str) -> String {
    if pre.ends_with('.') {
        format!("{pre}\n")
    } else {
        format!("{pre}.\n")
    }
}

/// Full prompt sent to the completion service. An empty `pre_message` counts
/// as absent.
pub fn assemble(
    user: &User,
    style: &LearningStyle,
    pre_message: Option<&str>,
    message: &str,
) -> String {
    let mut prompt = profile_preamble(user, style);
    if let Some(pre) = pre_message.filter(|p| !p.is_empty()) {
        prompt.push_str(&normalize_pre_message(pre));
    }
    prompt.push_str(message);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CivilStatus, EmploymentStatus, Gender};

    fn ana() -> (User, LearningStyle) {
        let user = User {
            id: 1,
            name: "Ana".into(),
            middle_name: String::new(),
            lastname: "Lopez".into(),
            age: 22,
            gender: Gender::Female,
            course_program_study: "CS".into(),
            email_address: "ana@example.com".into(),
            employment_status: EmploymentStatus::Unemployed,
            civil_status: CivilStatus::Single,
            has_kids: false,
            learning_style_id: 1,
        };
        let style = LearningStyle {
            id: 1,
            learning_style_name: "Visual".into(),
            description: "prefers diagrams".into(),
        };
        (user, style)
    }

    #[test]
    fn preamble_has_fixed_order_and_wording() {
        let (user, style) = ana();
        assert_eq!(
            profile_preamble(&user, &style),
            "My name is: Ana\n\
             My age is: 22\n\
             My gender is: female\n\
             My study program (major) is: CS\n\
             My employment status is: unemployed\n\
             My civil status is: single\n\
             My Learning Style is: Visual. prefers diagrams.\n\n"
        );
    }

    #[test]
    fn ana_prompt_ends_with_pre_message_then_question() {
        let (user, style) = ana();
        let prompt = assemble(&user, &style, Some("I study at night"), "How do I focus better?");
        assert!(prompt.ends_with("prefers diagrams.\n\nI study at night.\nHow do I focus better?"));
        assert!(prompt.starts_with("My name is: Ana\n"));
    }

    #[test]
    fn pre_message_already_ending_in_period_is_not_doubled() {
        assert_eq!(normalize_pre_message("I study at night."), "I study at night.\n");
        assert_eq!(normalize_pre_message("Hi!"), "Hi!.\n");
    }

    #[test]
    fn message_is_appended_verbatim_without_pre_message() {
        let (user, style) = ana();
        let prompt = assemble(&user, &style, None, "  raw\ttext ");
        assert!(prompt.ends_with("prefers diagrams.\n\n  raw\ttext "));

        let empty_pre = assemble(&user, &style, Some(""), "Q");
        assert_eq!(empty_pre, prompt.replace("  raw\ttext ", "Q"));
    }
}
