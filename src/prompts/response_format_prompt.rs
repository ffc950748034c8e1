pub const RESPONSE_FORMAT_PROMPT: &str = r#"
Respond with a single JSON object and nothing else, in this format:
{
    "issues": [
        {
            "severity": "critical|high|medium|low",
            "title": "Brief issue title",
            "description": "Detailed description of the issue",
            "line_number": number or null,
            "code_snippet": "relevant code or null",
            "recommendation": "Specific fix recommendation"
        }
    ],
    "recommendations": [
        "High-level recommendation"
    ]
}

Rules:
- Only include issues actually present in the code
- Give line numbers whenever you can
- Keep each recommendation specific and actionable
- If nothing is wrong, return an empty "issues" array
"#;
