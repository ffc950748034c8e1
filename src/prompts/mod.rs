pub mod response_format_prompt;
pub mod security_prompt;
pub mod code_quality_prompt;
pub mod ui_ux_prompt;
