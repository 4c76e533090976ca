// All LLM prompt constants for the roast module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::roast::detect::SourceKind;

/// System prompt for card generation — enforces JSON-only output.
pub const ROAST_SYSTEM: &str =
    "You are a ruthless but loving comedy writer who turns product managers \
    into satirical trading cards. Your roasts are specific, observational, \
    and punch at the resume, never at protected traits. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Card generation prompt template.
/// Replace: {tone_instruction}, {source_angle}, {submission}
pub const ROAST_PROMPT_TEMPLATE: &str = r#"{tone_instruction}

{source_angle}

Turn the following submission into a trading card. Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 73,
  "archetype": "The Roadmap Whisperer",
  "emoji": "🗺️",
  "description": "One devastating sentence about who this PM really is",
  "element": "Synergy",
  "stage": "Mid Evolution",
  "weakness": "A direct question",
  "flavor_text": "Italic card-bottom text, like a nature documentary caption",
  "moves": [
    {"name": "Stakeholder Alignment", "energyCost": 3, "damage": 40, "effect": "Opponent skips a sprint"},
    {"name": "Quick Sync", "energyCost": 1, "damage": 10}
  ],
  "product_sense": 61,
  "execution": 44,
  "leadership": 70,
  "dream_role": "CEO of a pre-idea startup",
  "quote": "Something they would actually say",
  "recruiter_reaction": "A recruiter's one-line reaction to this card",
  "roast_bullets": ["2-4 short, specific roast lines grounded in the submission"],
  "grade": "B-",
  "roast_mode": "spicy",
  "profile_evaluation": "One paragraph of mock-serious career analysis"
}

Rules:
1. "score" and the three stat fields are integers 0-100. Be honest; most cards land 40-85.
2. 2-4 moves. "energyCost" 1-4, "damage" 10-120 in steps of 10. "effect" is optional per move.
3. Every joke must trace to something in the submission. Generic PM jokes score lower than specific ones.
4. Keep "emoji" to a single emoji. Keep "description" under 160 characters.
5. Do NOT mock names, appearance, or anything the person did not choose.

SUBMISSION:
{submission}"#;

/// Tone of the roast as a whole. Single mode for now; the field rides
/// along in the result so stored cards stay honest about their setting.
pub const TONE_SPICY: &str = "\
    TONE: spicy. Sharp, specific, quotable. The reader should laugh, wince, \
    and share the card anyway.";

/// Per-source angle blocks.
const ANGLE_LINKEDIN: &str = "\
    SOURCE: a LinkedIn profile. Lean into the performative optimism: the \
    humble brags, the 'I'm thrilled to announce', the inspirational \
    parables with a product lesson at the end.";

const ANGLE_TWITTER: &str = "\
    SOURCE: an X/Twitter presence. Lean into the hot takes, the thread-boi \
    cadence, the ratio near-misses, the 'building in public' of things that \
    never ship.";

const ANGLE_RESUME: &str = "\
    SOURCE: a resume. Lean into the metric inflation, the 'spearheaded', \
    the strategic vagueness about what was actually built, the tool salad \
    in the skills section.";

/// Returns the roast angle for a detected source kind.
pub fn source_angle(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Linkedin => ANGLE_LINKEDIN,
        SourceKind::Twitter => ANGLE_TWITTER,
        SourceKind::Resume => ANGLE_RESUME,
    }
}
