//! Prompt construction for document translation.

/// Rules every provider is given.
const FORMAT_RULES: &str = "1. Preserve the original document format (Markdown, HTML, plain text, etc.) EXACTLY\n\
     2. Maintain ALL syntax, tags, symbols, and structure\n\
     3. Do NOT translate code blocks, URLs, or technical identifiers\n\
     4. Do NOT change the document structure or format in any way\n\
     5. Output ONLY the translated document - no explanations, prefixes, or additional text";

/// System prompt for chat-style APIs.
pub fn system_prompt() -> String {
    format!(
        "You are a professional document translator. Your task is to translate documents \
         while preserving their original format perfectly.\n\n\
         CRITICAL RULES:\n{FORMAT_RULES}\n\
         6. If the document is already in the target language, return it unchanged\n\n\
         Respond with the translated document only."
    )
}

/// User message for chat-style APIs.
pub fn user_prompt(language: &str, code: &str, instruction: Option<&str>, content: &str) -> String {
    let mut prompt = format!("Translate the following document to {language} ({code}).");
    push_instruction(&mut prompt, instruction);
    prompt.push_str("\n\nDocument to translate:\n");
    prompt.push_str(content);
    prompt
}

/// Single self-contained prompt for command-line agents.
pub fn standalone_prompt(
    language: &str,
    code: &str,
    instruction: Option<&str>,
    content: &str,
) -> String {
    let mut prompt = format!(
        "Translate the following document to {language} ({code}).\n\n\
         IMPORTANT:\n{FORMAT_RULES}\n\n\
         If the document is already in {language}, return it unchanged."
    );
    push_instruction(&mut prompt, instruction);
    prompt.push_str("\n\nDocument:\n");
    prompt.push_str(content);
    prompt
}

fn push_instruction(prompt: &mut String, instruction: Option<&str>) {
    if let Some(instruction) = instruction.filter(|i| !i.trim().is_empty()) {
        prompt.push_str("\n\nAdditional instruction: ");
        prompt.push_str(instruction);
    }
}
