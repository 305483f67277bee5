//! Prompt templates for MBTI analysis and coaching conversations

use std::collections::HashMap;

/// Template with `{{name}}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template with variables
    #[must_use]
    pub fn render(&self, values: &HashMap<&str, String>) -> String {
        let mut result = self.template.clone();
        for var in &self.variables {
            if let Some(value) = values.get(var.as_str()) {
                result = result.replace(&format!("{{{{{var}}}}}"), value);
            }
        }
        result
    }

    /// Render from `(name, value)` pairs
    #[must_use]
    pub fn render_with(&self, pairs: &[(&str, &str)]) -> String {
        let values: HashMap<&str, String> = pairs
            .iter()
            .map(|(k, v)| (*k, (*v).to_string()))
            .collect();
        self.render(&values)
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == '}' {
                    chars.next();
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        break;
                    }
                } else {
                    var_name.push(ch);
                    chars.next();
                }
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

/// Prompt templates used by the analyzer and the coaches
pub struct MbtiPrompts;

impl MbtiPrompts {
    /// System prompt for the per-speaker analysis
    #[must_use]
    pub fn analysis_system() -> &'static str {
        r#"You are an expert MBTI analyst.
Task: Analyze the provided text samples for EACH speaker independently.

For EACH speaker, determine:
1. MBTI Type (e.g., INTJ, ENFP).
2. Intensity Scores (0-100) for the 4 dimensions:
   - Energy (I <30 ... E >70)
   - Information (S <30 ... N >70)
   - Decisions (T <30 ... F >70)
   - Lifestyle (J <30 ... P >70)

【Output Format (JSON ONLY)】
{
    "results": [
        { "name": "Name1", "mbti": "XXXX", "scores": [10, 20, 30, 40] },
        { "name": "Name2", "mbti": "XXXX", "scores": [80, 90, 10, 50] }
    ]
}
"#
    }

    /// Rules appended to the analysis system prompt
    #[must_use]
    pub fn analysis_guard() -> PromptTemplate {
        PromptTemplate::new(
            r#"
CRITICAL RULES:
- Analyze EACH speaker independently
- NEVER merge people
- Output MUST be valid JSON with "results" array
- One object per speaker
- Format: {"results": [{"name": "...", "mbti": "XXXX", "scores": [E, N, F, P]}]}

PEOPLE TO ANALYZE:
{{people}}
"#,
        )
    }

    /// Psychologist refining a self-test result through conversation
    #[must_use]
    pub fn interview() -> PromptTemplate {
        PromptTemplate::new(
            r"You are an expert MBTI Psychologist.
The user's initial test result: {{mbti}}

Your goal: Verify and refine their MBTI type through conversation.

Guidelines:
1. Ask thoughtful questions about their natural behaviors
2. Focus on one dimension at a time (E/I, S/N, T/F, J/P)
3. Keep responses under 3 sentences
4. Be empathetic and non-judgmental
5. Do NOT output JSON - just have a natural conversation
{{language}}",
        )
    }

    /// Life coach giving type-specific advice
    #[must_use]
    pub fn growth_coach() -> PromptTemplate {
        PromptTemplate::new(
            r"You are an expert MBTI Life Coach specializing in {{mbti}} ({{nickname}}).

Your role:
- Provide actionable advice tailored to {{mbti}} strengths and weaknesses
- Help them grow and overcome challenges
- Be specific and practical
- Keep responses under 5 sentences

{{mbti}} Key Traits: {{traits}}. Consider their natural tendencies when giving advice.
{{language}}",
        )
    }

    /// Stylist producing a markdown outfit guide
    #[must_use]
    pub fn style_advice() -> PromptTemplate {
        PromptTemplate::new(
            r"You are a professional fashion stylist.
Client MBTI: {{mbti}}

Rules:
- Provide specific outfit suggestions
- ONLY provide Pinterest search links for inspiration
- Be concise and practical

Output Markdown Format:
### 🎨 {{mbti}} Style Guide
**Vibe:** [personality-aligned aesthetic]
**Outfit Suggestions:** [specific clothing items]
**Color Palette:** [recommended colors]
**Style Tip:** [one practical tip]
**Pinterest Inspiration:**
- https://www.pinterest.com/search/pins/?q={{mbti}}%20fashion",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_variables() {
        let template = PromptTemplate::new("Hello {{name}}, you are {{age}} years old.");
        assert_eq!(template.variables(), &["name", "age"]);
    }

    #[test]
    fn test_template_render() {
        let template = PromptTemplate::new("Hello {{name}}!");
        assert_eq!(template.render_with(&[("name", "Alice")]), "Hello Alice!");
    }

    #[test]
    fn test_json_examples_are_not_variables() {
        assert_eq!(MbtiPrompts::analysis_guard().variables(), &["people"]);
        assert_eq!(
            MbtiPrompts::growth_coach().variables(),
            &["mbti", "nickname", "traits", "language"]
        );
    }

    #[test]
    fn test_style_prompt_links_type() {
        let prompt = MbtiPrompts::style_advice().render_with(&[("mbti", "ENFP")]);
        assert!(prompt.contains("?q=ENFP%20fashion"));
        assert!(prompt.contains("### 🎨 ENFP Style Guide"));
    }
}
