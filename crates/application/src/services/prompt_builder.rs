//! Provider prompt templates
//!
//! Pure string templating shared by the provider adapters. Nothing here
//! performs I/O or inspects provider responses.

use domain::ToneProfile;

/// Maximum number of prompt characters forwarded to image providers
pub const IMAGE_SUBJECT_MAX_CHARS: usize = 100;

/// Subject used when a prompt is empty after sanitising
pub const DEFAULT_SUBJECT: &str = "this product";

/// System prompt for the text provider: tone persona plus the JSON contract
#[must_use]
pub fn text_system_prompt(profile: &ToneProfile) -> String {
    format!(
        "{persona}\n\n\
         Your task: Create marketing content for the given product/idea. You must respond \
         with EXACTLY this JSON format:\n\
         {{\n  \"headline\": \"A catchy headline (10-15 words max)\",\n  \
         \"caption\": \"An engaging caption (2-3 sentences, 30-50 words)\"\n}}\n\n\
         Make the content {style}. Do not include any other text outside the JSON.",
        persona = profile.system_prompt,
        style = profile.text_style_directives,
    )
}

#[must_use]
pub fn text_user_prompt(prompt: &str) -> String {
    format!("Create marketing content for: {prompt}")
}

/// Reduce a free-form prompt to a safe image subject
///
/// Keeps the first 100 characters, then drops everything that is not
/// alphanumeric or whitespace.
#[must_use]
pub fn sanitize_image_subject(prompt: &str) -> String {
    let subject: String = prompt
        .chars()
        .take(IMAGE_SUBJECT_MAX_CHARS)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let subject = subject.split_whitespace().collect::<Vec<_>>().join(" ");

    if subject.is_empty() {
        DEFAULT_SUBJECT.to_string()
    } else {
        subject
    }
}

/// Full image prompt for `prompt` in the profile's tone
#[must_use]
pub fn image_prompt(prompt: &str, profile: &ToneProfile) -> String {
    format!(
        "A high-quality photo of {subject}, in a {tone} style ({modifiers}), 4K product display.",
        subject = sanitize_image_subject(prompt),
        tone = profile.tone,
        modifiers = profile.image_style_modifiers,
    )
}
