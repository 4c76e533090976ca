// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
#[allow(dead_code)] // roast currently bakes this into ROAST_SYSTEM directly
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Guardrail appended to every roast-flavored prompt. Satire targets the
/// career artifact, never the person.
pub const ROAST_GUARDRAILS: &str = "\
    HARD RULES for humor: roast the resume, the jargon, the career choices. \
    NEVER joke about names, appearance, ethnicity, gender, age, disability, \
    or anything the person did not choose. When in doubt, aim at the deck.";
