//! Built-in roadmap templates used when generation fails.
//!
//! A template is picked by checking whether its name occurs in the learner's
//! target goal; anything unmatched gets the Full-Stack Developer template.

use crate::profile::Profile;
use crate::roadmap::{Difficulty, Phase, Roadmap, RoadmapContent, RoadmapModule};
use crate::types::Timestamp;

pub const DATA_SCIENTIST: &str = "Data Scientist";
pub const FULL_STACK_DEVELOPER: &str = "Full-Stack Developer";

/// Goal assumed when the profile names none.
pub const DEFAULT_GOAL: &str = FULL_STACK_DEVELOPER;

/// Template names in match order.
pub const TEMPLATE_NAMES: &[&str] = &[DATA_SCIENTIST, FULL_STACK_DEVELOPER];

/// Name of the template that serves `goal`.
pub fn template_name_for_goal(goal: &str) -> &'static str {
    TEMPLATE_NAMES
        .iter()
        .copied()
        .find(|name| goal.contains(name))
        .unwrap_or(DEFAULT_GOAL)
}

/// Template content for `goal`.
pub fn template_for_goal(goal: &str) -> RoadmapContent {
    match template_name_for_goal(goal) {
        DATA_SCIENTIST => data_scientist(),
        _ => full_stack_developer(),
    }
}

/// Build the fallback roadmap for a profile.
pub fn template_roadmap(profile: &Profile, reason: Option<String>, now: Timestamp) -> Roadmap {
    let goal = profile
        .target_goal
        .clone()
        .unwrap_or_else(|| DEFAULT_GOAL.to_string());

    Roadmap {
        user_id: profile.user_id,
        content: template_for_goal(&goal),
        target_goal: goal,
        created_at: now,
        last_updated: now,
        is_template: true,
        fallback_reason: reason,
    }
}

fn module(
    id: &str,
    title: &str,
    description: &str,
    topics: &[&str],
    estimated_hours: u32,
    difficulty: Difficulty,
) -> RoadmapModule {
    RoadmapModule {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        estimated_hours,
        difficulty,
        resources: Vec::new(),
    }
}

fn phase(
    id: &str,
    title: &str,
    description: &str,
    estimated_weeks: u32,
    modules: Vec<RoadmapModule>,
) -> Phase {
    Phase {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        estimated_weeks,
        modules,
    }
}

fn skills(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn data_scientist() -> RoadmapContent {
    use Difficulty::*;

    RoadmapContent {
        phases: vec![
            phase(
                "phase-1",
                "Foundations",
                "Build a strong foundation in programming, mathematics, and statistics",
                8,
                vec![
                    module(
                        "module-1-1",
                        "Python Programming Basics",
                        "Master Python syntax, data structures, and basic programming concepts",
                        &["Variables & Data Types", "Control Flow", "Functions", "OOP Basics", "File I/O"],
                        40,
                        Beginner,
                    ),
                    module(
                        "module-1-2",
                        "Statistics & Probability",
                        "Understand statistical concepts essential for data science",
                        &["Descriptive Statistics", "Probability Distributions", "Hypothesis Testing", "Correlation"],
                        35,
                        Beginner,
                    ),
                    module(
                        "module-1-3",
                        "Linear Algebra & Calculus",
                        "Learn mathematical foundations for machine learning",
                        &["Vectors & Matrices", "Matrix Operations", "Derivatives", "Gradients"],
                        30,
                        Intermediate,
                    ),
                ],
            ),
            phase(
                "phase-2",
                "Data Analysis & Visualization",
                "Learn to manipulate, analyze, and visualize data",
                6,
                vec![
                    module(
                        "module-2-1",
                        "NumPy & Pandas",
                        "Master data manipulation with NumPy and Pandas",
                        &["NumPy Arrays", "Pandas DataFrames", "Data Cleaning", "Data Transformation"],
                        30,
                        Intermediate,
                    ),
                    module(
                        "module-2-2",
                        "Data Visualization",
                        "Create compelling visualizations with Matplotlib and Seaborn",
                        &["Matplotlib Basics", "Seaborn", "Statistical Plots", "Interactive Visualizations"],
                        25,
                        Intermediate,
                    ),
                ],
            ),
            phase(
                "phase-3",
                "Machine Learning",
                "Build and deploy machine learning models",
                10,
                vec![
                    module(
                        "module-3-1",
                        "Supervised Learning",
                        "Learn regression and classification algorithms",
                        &["Linear Regression", "Logistic Regression", "Decision Trees", "Random Forests", "SVM"],
                        45,
                        Advanced,
                    ),
                    module(
                        "module-3-2",
                        "Unsupervised Learning",
                        "Explore clustering and dimensionality reduction",
                        &["K-Means Clustering", "Hierarchical Clustering", "PCA", "t-SNE"],
                        35,
                        Advanced,
                    ),
                    module(
                        "module-3-3",
                        "Model Evaluation & Deployment",
                        "Evaluate models and deploy to production",
                        &["Cross-Validation", "Hyperparameter Tuning", "Model Metrics", "Flask API", "Docker"],
                        30,
                        Advanced,
                    ),
                ],
            ),
        ],
        total_estimated_weeks: 24,
        skills_to_master: skills(&["Python", "Statistics", "Machine Learning", "Data Visualization", "SQL"]),
    }
}

fn full_stack_developer() -> RoadmapContent {
    use Difficulty::*;

    RoadmapContent {
        phases: vec![
            phase(
                "phase-1",
                "Frontend Fundamentals",
                "Master the building blocks of web development",
                6,
                vec![
                    module(
                        "module-1-1",
                        "HTML & CSS",
                        "Learn to structure and style web pages",
                        &["HTML5 Semantics", "CSS Flexbox", "CSS Grid", "Responsive Design", "CSS Animations"],
                        30,
                        Beginner,
                    ),
                    module(
                        "module-1-2",
                        "JavaScript Fundamentals",
                        "Master modern JavaScript",
                        &["ES6+ Syntax", "DOM Manipulation", "Async/Await", "Promises", "Fetch API"],
                        40,
                        Beginner,
                    ),
                ],
            ),
            phase(
                "phase-2",
                "Modern Frontend",
                "Build interactive UIs with React",
                8,
                vec![
                    module(
                        "module-2-1",
                        "React Fundamentals",
                        "Learn component-based development",
                        &["Components", "Props & State", "Hooks", "Context API", "React Router"],
                        45,
                        Intermediate,
                    ),
                    module(
                        "module-2-2",
                        "State Management",
                        "Manage complex application state",
                        &["Redux", "Redux Toolkit", "Context Patterns", "TanStack Query"],
                        30,
                        Intermediate,
                    ),
                ],
            ),
            phase(
                "phase-3",
                "Backend Development",
                "Build robust server-side applications",
                10,
                vec![
                    module(
                        "module-3-1",
                        "Node.js & Express",
                        "Create RESTful APIs",
                        &["Express Setup", "Routing", "Middleware", "Error Handling", "Authentication"],
                        40,
                        Intermediate,
                    ),
                    module(
                        "module-3-2",
                        "Databases",
                        "Work with SQL and NoSQL databases",
                        &["PostgreSQL", "MongoDB", "ORMs", "Database Design", "Transactions"],
                        35,
                        Advanced,
                    ),
                    module(
                        "module-3-3",
                        "Deployment & DevOps",
                        "Deploy applications to production",
                        &["Docker", "CI/CD", "AWS/Vercel", "Monitoring", "Testing"],
                        30,
                        Advanced,
                    ),
                ],
            ),
        ],
        total_estimated_weeks: 24,
        skills_to_master: skills(&["React", "Node.js", "Express", "PostgreSQL", "MongoDB", "Docker", "AWS"]),
    }
}
