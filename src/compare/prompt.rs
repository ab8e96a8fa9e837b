/// System preamble sent with every comparison request.
pub const SYSTEM_PROMPT: &str = "You are a professional speech-recognition quality analyst \
specializing in transcription accuracy assessment, including CJK text. \
Provide objective, consistent evaluations.";

/// Build the few-shot comparison prompt.
///
/// Generative backends are inconsistent in output shape and scoring scale
/// when asked cold, so the prompt carries two worked examples (a
/// fully-mismatched pair and a near-match pair) pinning down both the JSON
/// shape and the scale.
pub fn build_comparison_prompt(reference_text: &str, transcribed_text: &str) -> String {
    format!(
        r#"Compare the transcription against the reference text and reply with ONLY a JSON object matching the examples below.

---
[Example 1]
[Input]
Reference: 今天天氣真好
Transcript: 請投入適量衣物
[Output JSON]
{{
  "summary": "The transcription is completely unrelated to the reference text.",
  "accuracy_score": 0,
  "semantic_similarity": 0,
  "error_analysis": {{
    "substitutions": 0,
    "deletions": 6,
    "insertions": 7,
    "total_errors": 13
  }},
  "key_differences": ["content is entirely different"],
  "suggestions": ["verify the audio file matches the reference text"],
  "reasoning": "The transcript shares no topic or content with the reference; the error count reflects deleting the full reference and inserting the full transcript."
}}
---
[Example 2]
[Input]
Reference: 我喜歡吃蘋果
Transcript: 我喜歡吃蘋安
[Output JSON]
{{
  "summary": "The transcription is mostly correct with one homophone substitution.",
  "accuracy_score": 80,
  "semantic_similarity": 85,
  "error_analysis": {{
    "substitutions": 1,
    "deletions": 0,
    "insertions": 0,
    "total_errors": 1
  }},
  "key_differences": ["'果' was transcribed as '安'"],
  "suggestions": ["improve homophone disambiguation"],
  "reasoning": "The overall meaning is preserved; a single character was substituted, a common homophone error."
}}
---

Now evaluate the following pair using the same logic and format:

[Input]
Reference: {reference_text}
Transcript: {transcribed_text}
[Output JSON]
"#
    )
}
