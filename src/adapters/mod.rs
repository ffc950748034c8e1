pub mod llm_analyzer;
