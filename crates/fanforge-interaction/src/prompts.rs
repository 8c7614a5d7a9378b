//! Prompt construction for the generation service.
//!
//! One builder per remote operation, plus the two instruction builders
//! the application layer feeds into `generate_narrative`.

use fanforge_core::session::{DeviationLevel, NarrativeLength};

/// Prompt for the source-IP analysis operation.
pub fn analysis(ip_input: &str) -> String {
    format!(
        "Analyze the following intellectual property description. Identify its key latent characteristics, common tropes, recurring motifs, and highlight specific elements (like named characters, unique locations, or plot points) that are highly characteristic and might be prone to direct AI memorization.\n---\nIP Description: \"{ip_input}\"\n---\nReturn the analysis as a JSON object with keys: \"characteristics\", \"tropes\", \"motifs\", and \"copyrightableElements\"."
    )
}

/// Prompt for the fanon-trope exploration operation.
pub fn tropes(ip_input: &str) -> String {
    format!(
        "Based on the following intellectual property, list 5-7 common fan-created tropes (\"fanon\") associated with it.\n---\nIP Description: \"{ip_input}\"\n---\nReturn the result as a JSON object with a single key \"tropes\" which is an array of strings."
    )
}

/// Prompt for the transformative-twist operation.
pub fn twists(ip_input: &str) -> String {
    format!(
        "Based on the following intellectual property, generate one \"transformative twist\" for each of the following categories: Conceptual Blending, Dimensional Thinking, Multi-Perspective Simulation, Core Concept Inversion.\n---\nIP Description: \"{ip_input}\"\n---\nReturn the result as a JSON object with keys: \"conceptualBlending\", \"dimensionalThinking\", \"multiPerspective\", and \"coreInversion\"."
    )
}

/// Wraps source material and a free-form instruction into the narrative
/// generation prompt.
pub fn narrative(ip_input: &str, instruction: &str) -> String {
    format!(
        "Here is the source material: \"{ip_input}\". Now, follow this instruction: \"{instruction}\"."
    )
}

/// Prompt for the advisory risk assessment.
pub fn risk(original: &str, generated: &str) -> String {
    format!(
        "You are an AI assistant providing an advisory, non-legal analysis of potential copyright risk in a derivative text. Compare the \"Original IP\" with the \"Generated Text\".\n\nYour analysis must include:\n1. A `riskScore` of \"Low\", \"Medium\", or \"High\".\n2. A detailed `explanation` for the score. This explanation must break down the analysis, detailing which aspects of the \"Generated Text\" contributed to the risk. Specifically comment on similarities or differences in:\n    - Plot and key story events.\n    - Character voice, personality, and motivations.\n    - Unique or memorable phrasing and terminology from the source IP.\n3. A list of `similarPassages` containing specific phrases or sentences from the \"Generated Text\" that are very close to the \"Original IP\".\n\nThe score should reflect direct copying, close paraphrasing of unique expressions, and substantial similarity in plot and characterization.\n---\nOriginal IP: \"{original}\"\n---\nGenerated Text: \"{generated}\"\n---\nReturn the analysis as a JSON object with keys: \"riskScore\", \"explanation\", and \"similarPassages\" (an array of strings)."
    )
}

/// Instruction for the narrative divergence prompter.
pub fn divergence_instruction(length: NarrativeLength, tone: Option<&str>) -> String {
    let base = format!(
        "Suggest a 'what happened next?' scenario or a retelling from a different perspective. The narrative should be {}.",
        length.phrase()
    );
    match tone {
        Some(tone) if !tone.trim().is_empty() => {
            format!("{base} The tone should be {}.", tone.trim())
        }
        _ => base,
    }
}

/// Instruction for narrative generation at a controlled deviation level.
pub fn deviation_instruction(level: DeviationLevel) -> String {
    format!(
        "Generate a short narrative based on the source material, but with a {} level of stylistic and thematic deviation to foster originality.",
        level.as_str().to_lowercase()
    )
}
