/// Built-in English strings. Every UI key has an entry here; translation
/// files only need to override what they translate.
pub const ENGLISH: &[(&str, &str)] = &[
    // Header
    ("app_title", "AI Multi-Document Assistant"),
    ("app_subtitle", "Chat with all of your documents at once"),
    ("powered_by", "Powered by AI"),
    // Sidebar
    ("language_selector", "Language"),
    ("document_library", "Document Library"),
    ("loading_docs", "Loading documents..."),
    ("docs_loaded", "{count} documents loaded"),
    ("no_docs_loaded", "No documents loaded"),
    ("looking_in", "Looking for documents in {folder}"),
    ("supported_formats", "Supported formats: PDF (.pdf) and Word (.docx)"),
    ("total_files", "Total files"),
    ("total_words", "Total words"),
    ("total_pages", "Total pages"),
    ("total_size", "Total size"),
    ("reading_time", "Reading time"),
    ("minutes", "min"),
    ("document_details", "Document details"),
    ("file_type", "Type"),
    ("words", "Words"),
    ("size", "Size"),
    ("pages", "Pages"),
    ("paragraphs", "Paragraphs"),
    ("tables", "Tables"),
    ("extraction_method", "Extraction"),
    ("preview", "Preview"),
    ("failed_files", "Files that could not be read"),
    ("controls", "Controls"),
    ("clear_chat", "Clear Chat"),
    ("reload_docs", "Reload Documents"),
    ("system_status", "System Status"),
    ("ai_connected", "AI Service Connected"),
    ("ai_not_connected", "AI Service Not Available"),
    // Voice
    ("voice_settings", "Voice Settings"),
    ("enable_audio", "Enable Audio Responses"),
    ("audio_help", "Toggle audio responses for accessibility"),
    ("select_voice", "Select Voice"),
    ("voice_help", "Choose the voice for audio responses"),
    ("test_voice", "Test Voice"),
    ("test_audio_text", "Hello! This is how I will sound when reading responses to you."),
    ("generating_audio", "Generating audio..."),
    ("audio_ready", "Audio ready!"),
    ("audio_error", "Failed to generate audio"),
    ("audio_disabled", "Audio responses are disabled"),
    ("audio_unavailable", "Text-to-speech is not available"),
    ("audio_response", "Audio Response"),
    ("audio_not_supported", "Your browser does not support audio playback."),
    // Chat
    ("api_key_not_found", "API key not found"),
    ("add_api_key", "Add your API key to the .env file:"),
    ("looking_for_files", "Looking for files in {folder}"),
    ("ready_to_search", "Ready to search {count} documents"),
    ("search_through", "Ask me anything about {docs}"),
    ("and_more", "and more"),
    ("try_asking", "Try asking:"),
    ("example_1", "What are the main topics covered in these documents?"),
    ("example_2", "Summarize the key points of each document"),
    ("example_3", "What do the documents say about deadlines?"),
    ("example_4", "Compare the information across the documents"),
    ("you", "You"),
    ("ai_assistant", "AI Assistant"),
    ("search_placeholder", "Ask a question about your documents..."),
    ("send", "Send"),
    ("enter_question", "Please enter a question"),
    ("searching", "Searching documents..."),
    (
        "hello_response",
        "Hello! I'm the {app_name}. I have {doc_count} documents ready: {doc_list}. What would you like to know about them?",
    ),
    // Errors
    ("api_key_missing", "API key not configured"),
    ("no_docs_error", "No documents are loaded. Add PDF or Word files to the data folder and reload."),
    ("rate_limit_error", "Rate limit reached. Please wait a moment and try again."),
    ("auth_error", "Authentication failed. Please check your API key."),
    ("invalid_request", "Invalid request: {error}"),
    ("response_error", "Error generating response: {error}"),
    ("app_error", "Application error: {error}"),
    ("refresh_page", "Please refresh the page and try again."),
    ("session_not_found", "Your chat session has expired. A new one has been started."),
    // Load status
    ("data_folder_not_found", "Data folder '{folder}' not found"),
    ("no_supported_docs", "No supported documents found in '{folder}'. Files present: {files}"),
    ("failed_to_load", "Failed to load documents: {errors}"),
    ("loaded_docs_status", "Loaded {success} of {total} documents ({failed} failed)"),
    ("all_docs_loaded", "Successfully loaded all {success} of {total} documents"),
];
