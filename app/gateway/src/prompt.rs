//! Prompt templates for the two model calls.
//!
//! The persona and style directive are fixed configuration baked into
//! the template, not user-configurable per request.

use memory::Facts;

/// Build the answer prompt: persona, style directive, known facts as
/// JSON, and the user's literal question.
pub fn answer(facts: &Facts, question: &str) -> String {
    let known = serde_json::to_string(facts).unwrap_or_else(|_| String::from("{}"));
    format!(
        "You are a Free Fire assistant.\n\
         \n\
         LANGUAGE RULE:\n\
         Reply mostly in Tamil written using English letters (Tanglish).\n\
         About 75% Tamil and 25% English.\n\
         Use casual gamer tone.\n\
         Do not use Tamil script.\n\
         \n\
         Known player info:\n\
         {known}\n\
         \n\
         User question:\n\
         {question}\n"
    )
}

/// Build the extraction prompt over a generated reply.
pub fn extraction(reply: &str) -> String {
    format!(
        "Extract ONLY permanent player information.\n\
         Return JSON only. If nothing, return {{}}.\n\
         \n\
         Text:\n\
         {reply}\n"
    )
}
