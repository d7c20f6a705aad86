use std::sync::OnceLock;

use regex::Regex;

struct SpeechFilters {
    code_fence: Regex,
    link: Regex,
    heading: Regex,
    bullet: Regex,
    bold: Regex,
    italic: Regex,
    markers: Regex,
    symbols: Regex,
    whitespace: Regex,
}

fn filters() -> &'static SpeechFilters {
    static FILTERS: OnceLock<SpeechFilters> = OnceLock::new();
    FILTERS.get_or_init(|| SpeechFilters {
        code_fence: Regex::new(r"```[A-Za-z0-9_+-]*").expect("valid regex"),
        link: Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("valid regex"),
        heading: Regex::new(r"(?m)^\s*#{1,6}\s*").expect("valid regex"),
        bullet: Regex::new(r"(?m)^\s*[-*+]\s+").expect("valid regex"),
        bold: Regex::new(r"(\*\*|__)(.+?)(\*\*|__)").expect("valid regex"),
        italic: Regex::new(r"\*([^*\n]+)\*").expect("valid regex"),
        markers: Regex::new(r"---\s*(Page \d+|Table \d+|End Table)\s*---").expect("valid regex"),
        symbols: Regex::new(
            r"[\x{1F000}-\x{1FAFF}\x{2600}-\x{27BF}\x{2B00}-\x{2BFF}\x{FE0F}\x{200D}]",
        )
        .expect("valid regex"),
        whitespace: Regex::new(r"\s+").expect("valid regex"),
    })
}

/// Strip markdown and pictographs so the TTS voice reads only prose.
pub fn clean_for_speech(text: &str) -> String {
    let f = filters();

    let text = f.code_fence.replace_all(text, "");
    let text = text.replace('`', "");
    let text = f.link.replace_all(&text, "$1");
    let text = f.heading.replace_all(&text, "");
    let text = f.bullet.replace_all(&text, "");
    let text = f.bold.replace_all(&text, "$2");
    let text = f.italic.replace_all(&text, "$1");
    let text = f.markers.replace_all(&text, " ");
    let text = f.symbols.replace_all(&text, "");
    let text = f.whitespace.replace_all(&text, " ");

    text.trim().to_string()
}
