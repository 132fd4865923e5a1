//! LLM prompt construction for organization extraction

/// System message sent with every extraction request
pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert at extracting structured organization \
data from email content. Always respond with valid JSON.";

/// Fields the model is asked to fill, in response order
pub const RESPONSE_FIELDS: &str =
    "name, location, owners, activities, age (number), website, industry";

/// Builds the user prompt for the LLM
pub struct PromptBuilder<'a> {
    email: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(email: &'a str) -> Self {
        Self { email }
    }

    /// System message for the request
    pub fn instructions(&self) -> &'static str {
        SYSTEM_INSTRUCTIONS
    }

    /// Build the complete user prompt
    pub fn build(&self) -> String {
        format!(
            "Extract organization information from this email and respond with JSON \
             containing: {}.\n\nEmail: {}",
            RESPONSE_FIELDS, self.email
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_email_and_fields() {
        let prompt = PromptBuilder::new("Hi from Acme Corp").build();

        assert!(prompt.starts_with("Extract organization information"));
        assert!(prompt.contains("age (number)"));
        assert!(prompt.ends_with("\n\nEmail: Hi from Acme Corp"));
    }

    #[test]
    fn test_instructions_require_json() {
        let builder = PromptBuilder::new("");
        assert!(builder.instructions().contains("valid JSON"));
    }
}
