/// System prompt for the connectivity probe. Kept short so a probe costs a
/// handful of tokens.
pub const CONNECTIVITY_SYSTEM: &str = "You are a connectivity check for the SkillSync API. \
    Answer the user's message in as few words as possible.";
