//! Prompt templates sent to the completion model.

use crate::profile::Profile;
use crate::topic::TopicRequest;

const NOT_SPECIFIED: &str = "Not specified";

fn or_unspecified(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_SPECIFIED)
}

/// Prompt asking for a personalised roadmap in the [`RoadmapContent`] shape.
///
/// [`RoadmapContent`]: crate::roadmap::RoadmapContent
pub fn roadmap_prompt(profile: &Profile) -> String {
    let hours = or_unspecified(profile.hours_per_week.as_deref());
    let skills = if profile.known_skills.is_empty() {
        "None listed".to_string()
    } else {
        profile.known_skills.join(", ")
    };

    format!(
        r#"You are an expert career counselor and learning path designer. Generate a comprehensive, personalized learning roadmap for a student/professional with the following profile:

Background: {background}
Current Role: {role}
Years of Experience: {years}
Known Skills: {skills}
Target Goal: {goal}
Preferred Programming Language: {language}
Learning Pace: {pace}
Hours per Week: {hours}
Learning Style: {style}

Create a structured learning roadmap with:
1. Prerequisites (foundational skills needed)
2. Core Concepts (essential skills for the target role)
3. Advanced Topics (specialization areas)
4. Tools & Frameworks (industry-standard tools)
5. Estimated timeline for each module based on {hours} hours/week

IMPORTANT: Respond ONLY with valid JSON in this exact format (no markdown, no code blocks):
{{
  "phases": [
    {{
      "id": "phase-1",
      "title": "Phase Title",
      "description": "Phase description",
      "estimatedWeeks": 4,
      "modules": [
        {{
          "id": "module-1-1",
          "title": "Module Title",
          "description": "Module description",
          "topics": ["Topic 1", "Topic 2", "Topic 3", "Topic 4", "Topic 5"],
          "estimatedHours": 20,
          "difficulty": "beginner",
          "resources": [
            {{ "type": "video", "title": "Resource title", "url": "" }}
          ]
        }}
      ]
    }}
  ],
  "totalEstimatedWeeks": 24,
  "skillsToMaster": ["Skill 1", "Skill 2", "Skill 3"]
}}"#,
        background = or_unspecified(profile.background.as_deref()),
        role = or_unspecified(profile.current_role.as_deref()),
        years = or_unspecified(profile.years_of_experience.as_deref()),
        goal = or_unspecified(profile.target_goal.as_deref()),
        language = or_unspecified(profile.preferred_language.as_deref()),
        pace = or_unspecified(profile.learning_pace.as_deref()),
        style = or_unspecified(profile.learning_style.as_deref()),
    )
}

/// Prompt asking for learning material on a single topic.
pub fn topic_prompt(request: &TopicRequest) -> String {
    format!(
        r#"You are an expert educator creating comprehensive learning materials. Generate comprehensive learning content for the following topic:

Topic: {topic}
Module: {module}
Difficulty: {difficulty}
Target Career: {goal}

Provide:
1. A detailed explanation of the concept (200-300 words)
2. Key learning points (5-7 bullet points)
3. Real-world applications and examples (3-5 items)
4. Common pitfalls to avoid (3-5 items)
5. Practice suggestions (3-5 items)
6. 3-5 specific YouTube video search queries that would help learn this topic (be very specific with technical terms)

IMPORTANT: Respond ONLY with valid JSON in this exact format (no markdown, no code blocks):
{{
  "explanation": "detailed text here",
  "keyPoints": ["point 1", "point 2", "point 3", "point 4", "point 5"],
  "applications": ["app 1", "app 2", "app 3"],
  "pitfalls": ["pitfall 1", "pitfall 2", "pitfall 3"],
  "practiceIdeas": ["idea 1", "idea 2", "idea 3"],
  "youtubeSearchQueries": ["specific query 1", "specific query 2", "specific query 3"]
}}"#,
        topic = request.topic,
        module = request.module_title,
        difficulty = request.difficulty,
        goal = request.target_goal,
    )
}

/// Prompt for the mentor chat, with whatever profile context exists.
pub fn mentor_prompt(profile: Option<&Profile>, question: &str) -> String {
    let goal = or_unspecified(profile.and_then(|p| p.target_goal.as_deref()));
    let background = or_unspecified(profile.and_then(|p| p.background.as_deref()));
    let role = or_unspecified(profile.and_then(|p| p.current_role.as_deref()));
    let pace = or_unspecified(profile.and_then(|p| p.learning_pace.as_deref()));
    let skills = profile
        .map(|p| p.known_skills.join(", "))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "None listed".to_string());

    format!(
        "You are an AI learning mentor helping a student achieve their career goal. \n\n\
         Student Profile:\n\
         - Target Goal: {goal}\n\
         - Background: {background}\n\
         - Current Role: {role}\n\
         - Known Skills: {skills}\n\
         - Learning Pace: {pace}\n\n\
         Provide helpful, encouraging guidance. Answer questions about concepts, provide code \
         examples when relevant, suggest resources, and help them stay motivated. Keep responses \
         concise but informative.\n\n\
         User's question: {question}"
    )
}
