// Shared prompt fragments. Each caller defines its own prompts.rs alongside it;
// only cross-cutting pieces live here.

/// Appended to every prompt that could tempt the model into inventing identity data.
pub const NO_PERSONAL_DATA_INSTRUCTION: &str = "\
    Do NOT include names, email addresses, phone numbers, street addresses, \
    profile links or images. Personal details are supplied by the user, not by you.";
