//! Prompt composition for every generation call. Pure functions over
//! `TeamMember` values; the LLM client and parsing live elsewhere.

use teamlens_core::TeamMember;

// ---------------------------------------------------------------------------
// Shared formatting
// ---------------------------------------------------------------------------

fn big_five_line(m: &TeamMember) -> String {
    format!(
        "Openness: {}, Conscientiousness: {}, Extraversion: {}, Agreeableness: {}, Neuroticism: {}",
        m.big_five.openness,
        m.big_five.conscientiousness,
        m.big_five.extraversion,
        m.big_five.agreeableness,
        m.big_five.neuroticism
    )
}

/// Full dossier block for one member, used in the chat system prompt.
fn dossier(m: &TeamMember) -> String {
    format!(
        "\n## {name}\n\
         - **MBTI**: {mbti}\n\
         - **DISC**: {disc}\n\
         - **Enneagram**: {enneagram}\n\
         - **CliftonStrengths**: {strengths}\n\
         - **Big Five**: {big_five}\n\n\
         ### Communication Style\n\
         How to communicate: {how}\n\
         Feedback preference: {feedback}\n\n\
         ### User Manual\n\
         How to get the best out of them: {best}\n\
         What shuts them down: {shuts}\n\n\
         ### Ideal Collaborator\n\
         {ideal}\n\n\
         ### Full Profile\n\
         {full}\n",
        name = m.name,
        mbti = m.mbti,
        disc = m.disc,
        enneagram = m.enneagram,
        strengths = m.clifton_strengths.join(", "),
        big_five = big_five_line(m),
        how = m.communication_style.how_to_communicate.join(" | "),
        feedback = m.communication_style.feedback_preference.join(" | "),
        best = m.user_manual.how_to_get_best_out.join(" | "),
        shuts = m.user_manual.what_shuts_down.join(" | "),
        ideal = m.ideal_collaborator,
        full = m.full_profile,
    )
}

/// Compact one-line profile used in the insights prompt.
fn profile_line(m: &TeamMember) -> String {
    format!(
        "- {} (id: {}): MBTI {}, DISC {}, Enneagram {}, Strengths: {}, Big Five: O={} C={} E={} A={} N={}, Communication: {}, Ideal Collaborator: {}",
        m.name,
        m.id,
        m.mbti,
        m.disc,
        m.enneagram,
        m.clifton_strengths.join(", "),
        m.big_five.openness,
        m.big_five.conscientiousness,
        m.big_five.extraversion,
        m.big_five.agreeableness,
        m.big_five.neuroticism,
        m.communication_style.how_to_communicate.join("; "),
        m.ideal_collaborator,
    )
}

fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

// ---------------------------------------------------------------------------
// Profile generation
// ---------------------------------------------------------------------------

/// Quiz answers → full profile. The JSON schema is described in the prompt
/// itself; the caller parses the output and retries once on malformed JSON.
pub fn profile_generation(name: &str, email: &str, answers_transcript: &str) -> String {
    format!(
        r#"You are a personality assessment expert. Based on the following workplace scenario quiz answers, generate a complete team collaboration profile for this person.

Person: {name} ({email})

Quiz Answers:
{answers_transcript}

Based on these answers, infer the person's personality across all 5 frameworks (MBTI, DISC, Enneagram, CliftonStrengths, Big Five) and generate a complete profile.

Return ONLY a valid JSON object (no markdown, no code fences) matching this exact structure:
{{
  "id": "firstname-lastname" (lowercase, hyphenated),
  "name": "{name}",
  "email": "{email}",
  "mbti": "e.g. INTJ",
  "disc": "e.g. C (Conscientiousness)",
  "enneagram": "e.g. Type 5w6 (The Investigator)",
  "cliftonStrengths": ["Strength1", "Strength2", "Strength3", "Strength4", "Strength5"],
  "bigFive": {{
    "openness": "e.g. High",
    "conscientiousness": "e.g. Very High",
    "extraversion": "e.g. Low",
    "agreeableness": "e.g. Moderate",
    "neuroticism": "e.g. Low"
  }},
  "communicationStyle": {{
    "howToCommunicate": ["tip1", "tip2", "tip3"],
    "feedbackPreference": ["pref1", "pref2", "pref3"]
  }},
  "userManual": {{
    "howToGetBestOut": ["tip1", "tip2", "tip3"],
    "whatShutsDown": ["item1", "item2", "item3"]
  }},
  "idealCollaborator": "A description of the ideal collaborator for this person, referencing specific personality types",
  "fullProfile": "A 150-250 word personal README summarizing this person's working style, core traits, values, and what to expect from them"
}}

Make the profile detailed, specific, and actionable—as if written by a professional organizational psychologist who knows this person well. Each communication tip and user manual item should be a full sentence with concrete, practical advice."#
    )
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// System prompt carrying the whole directory, rebuilt per request so newly
/// onboarded members are visible immediately.
pub fn chat_system(members: &[TeamMember]) -> String {
    let dossiers = members.iter().map(dossier).collect::<Vec<_>>().join("\n---\n");
    format!(
        r#"You are a helpful team collaboration assistant for Casper Studios. Your role is to help team members understand each other better and work together more effectively.

You have access to detailed personality profiles for all team members based on MBTI, DISC, Enneagram, CliftonStrengths, and Big Five assessments.

Here are the team members and their profiles:

{dossiers}

Guidelines:
1. Be specific and actionable in your advice
2. Reference the actual personality data when giving recommendations
3. Be warm but direct - this is a professional tool
4. When comparing two people, highlight both complementary traits and potential friction points
5. Give concrete examples of how to apply the advice
6. Keep responses concise but comprehensive (aim for 150-300 words unless more detail is needed)
7. If asked about someone not in the team, politely explain you only have data on the team members listed"#
    )
}

// ---------------------------------------------------------------------------
// Pairwise comparison
// ---------------------------------------------------------------------------

fn comparison_block(m: &TeamMember) -> String {
    format!(
        "## {name}\n\
         - **MBTI**: {mbti}\n\
         - **DISC**: {disc}\n\
         - **Enneagram**: {enneagram}\n\
         - **CliftonStrengths**: {strengths}\n\
         - **Big Five**: {big_five}\n\
         - **Communication Style**: {how}\n\
         - **What helps them thrive**: {best}\n\
         - **What shuts them down**: {shuts}\n\
         - **Ideal Collaborator**: {ideal}",
        name = m.name,
        mbti = m.mbti,
        disc = m.disc,
        enneagram = m.enneagram,
        strengths = m.clifton_strengths.join(", "),
        big_five = big_five_line(m),
        how = m.communication_style.how_to_communicate.join(" | "),
        best = m.user_manual.how_to_get_best_out.join(" | "),
        shuts = m.user_manual.what_shuts_down.join(" | "),
        ideal = m.ideal_collaborator,
    )
}

pub fn comparison(a: &TeamMember, b: &TeamMember) -> String {
    format!(
        r#"Analyze the compatibility and collaboration dynamics between these two team members:

{block_a}

{block_b}

Provide a detailed compatibility analysis with the following sections:

**Compatibility Overview**
A brief 2-3 sentence summary of how these two work together.

**Complementary Strengths**
How their different traits balance each other out. Be specific.

**Potential Friction Points**
Where they might clash and why. Be honest but constructive.

**Communication Tips**
Specific advice for how {a_first} should communicate with {b_first} and vice versa.

**Collaboration Strategies**
3-4 actionable tips for working together effectively on projects.

**Best Project Scenarios**
What types of work or projects would this pair excel at together?

Keep the tone professional but warm. Be specific and reference their actual personality data."#,
        block_a = comparison_block(a),
        block_b = comparison_block(b),
        a_first = first_name(&a.name),
        b_first = first_name(&b.name),
    )
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// One person against the rest of the directory; the reply is JSON parsed
/// once with no retry.
pub fn insights(current: &TeamMember, teammates: &[TeamMember]) -> String {
    let teammate_lines = teammates
        .iter()
        .map(profile_line)
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"Given this person's personality profile:
{current_line}

And these teammates:
{teammate_lines}

Identify:
1. Most Similar - who shares the most personality traits and working style
2. Most Compatible - who would be the best collaboration partner (complementary strengths)
3. Best Communication Match - who has the most aligned communication preferences
4. Growth Partner - who would challenge them in the most productive ways

Return ONLY valid JSON (no markdown, no code fences) in this exact format:
{{"similar":{{"id":"teammate-id","name":"Name","reason":"1-2 sentence explanation"}},"compatible":{{"id":"teammate-id","name":"Name","reason":"1-2 sentence explanation"}},"communicationMatch":{{"id":"teammate-id","name":"Name","reason":"1-2 sentence explanation"}},"growthPartner":{{"id":"teammate-id","name":"Name","reason":"1-2 sentence explanation"}}}}"#,
        current_line = profile_line(current),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use teamlens_core::roster;

    fn leo() -> TeamMember {
        roster::builtin()
            .iter()
            .find(|m| m.id == "leo-kim")
            .cloned()
            .unwrap()
    }

    fn basti() -> TeamMember {
        roster::builtin()
            .iter()
            .find(|m| m.id == "basti-ortiz")
            .cloned()
            .unwrap()
    }

    #[test]
    fn profile_generation_embeds_identity_and_answers() {
        let prompt = profile_generation("Ada Lovelace", "ada@casperstudios.xyz", "Q1: ...");
        assert!(prompt.contains("Person: Ada Lovelace (ada@casperstudios.xyz)"));
        assert!(prompt.contains("Q1: ..."));
        assert!(prompt.contains("Return ONLY a valid JSON object"));
        assert!(prompt.contains("\"cliftonStrengths\""));
    }

    #[test]
    fn chat_system_includes_every_member_dossier() {
        let members = vec![leo(), basti()];
        let prompt = chat_system(&members);
        assert!(prompt.contains("## Leo Kim"));
        assert!(prompt.contains("## Basti Ortiz"));
        assert!(prompt.contains("### User Manual"));
        assert!(prompt.contains("only have data on the team members listed"));
    }

    #[test]
    fn comparison_addresses_both_by_first_name() {
        let prompt = comparison(&leo(), &basti());
        assert!(prompt.contains("how Leo should communicate with Basti"));
        assert!(prompt.contains("## Leo Kim"));
        assert!(prompt.contains("## Basti Ortiz"));
    }

    #[test]
    fn insights_excludes_nobody_and_demands_json() {
        let prompt = insights(&leo(), &[basti()]);
        assert!(prompt.contains("(id: leo-kim)"));
        assert!(prompt.contains("(id: basti-ortiz)"));
        assert!(prompt.contains(r#""growthPartner""#));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }
}
