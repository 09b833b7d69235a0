//! Prompt construction.
//!
//! The refusal behaviour for personal or off-topic questions lives only in
//! this instruction text; nothing server-side classifies the question.

use crate::knowledge::RenderedKnowledge;

/// Build the fixed system instruction for `owner`.
pub fn system_instruction(owner: &str) -> String {
    format!(
        "You are {owner}'s professional AI portfolio assistant.\n\
         You must only answer questions about {owner}'s work, experience, projects, or skills.\n\
         You can explain their background, skills, and projects in detail.\n\
         Do not answer anything personal - respond with:\n\
         \"I can't answer that, but feel free to check {owner}'s LinkedIn or contact them directly.\"\n\
         Do not answer anything inappropriate, or unrelated - respond with:\n\
         \"I'm here to answer professional questions about {owner}'s work. Please ask something relevant.\"\n\
         If the user's message is not in English, kindly inform them that you will attempt to translate and respond accurately. \
         Do your best to translate and assist them in a professional manner.\n\
         \n\
         Use the following knowledge base:"
    )
}

/// Assemble the single prompt string sent to the model.
pub fn build_prompt(instruction: &str, knowledge: &RenderedKnowledge, question: &str) -> String {
    format!(
        "{}\n\nKNOWLEDGE BASE:\n{}\n\nQUESTION: {}\n\nPlease answer based on the knowledge base above.",
        instruction,
        knowledge.to_prompt_text(),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::knowledge::knowledge::tests::SAMPLE;

    #[test]
    fn test_instruction_names_owner_and_refusals() {
        let text = system_instruction("Jane Doe");
        assert!(text.starts_with("You are Jane Doe's professional AI portfolio assistant."));
        assert!(text.contains("check Jane Doe's LinkedIn"));
        assert!(text.contains("professional questions about Jane Doe's work"));
        assert!(text.contains("not in English"));
        assert!(text.contains("contact them directly"));
        for word in [" his ", " him ", " her ", " she ", " he "] {
            assert!(!text.contains(word), "gendered pronoun {:?} in instruction", word);
        }
    }

    #[test]
    fn test_prompt_layout() {
        let knowledge = KnowledgeBase::from_json(SAMPLE).unwrap().render();
        let prompt = build_prompt("SYSTEM", &knowledge, "What are your skills?");

        assert!(prompt.starts_with("SYSTEM\n\nKNOWLEDGE BASE:\n=== ABOUT ===\n"));
        assert!(prompt.contains("=== SKILLS ===\nRust, TypeScript, PostgreSQL"));
        assert!(prompt.ends_with(
            "\n\nQUESTION: What are your skills?\n\nPlease answer based on the knowledge base above."
        ));
    }

    #[test]
    fn test_question_is_embedded_literally() {
        let knowledge = KnowledgeBase::from_json(SAMPLE).unwrap().render();
        let question = "Quels sont tes projets ? {\"x\": 1}";
        let prompt = build_prompt("S", &knowledge, question);
        assert!(prompt.contains(&format!("QUESTION: {}\n", question)));
    }
}
