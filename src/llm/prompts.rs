/// Build the summary instruction for the given format and language labels.
///
/// The instruction spans three lines and ends with a trailing space, since
/// the transcript is appended directly after it.
pub fn build_summary_prompt(format: &str, language: &str) -> String {
    format!(
        "You are a YouTube video summarizer. You will take the transcript text \n\
         and summarize the entire video based on the requested format and language. \n\
         Summarize in the format: {format}. Language: {language}. \
         Please provide the summary of the text given here: "
    )
}

/// Full prompt: instruction immediately followed by the transcript.
pub fn assemble_prompt(format: &str, language: &str, transcript: &str) -> String {
    let mut prompt = build_summary_prompt(format, language);
    prompt.push_str(transcript);
    prompt
}
